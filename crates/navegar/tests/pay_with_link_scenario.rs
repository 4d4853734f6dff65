//! End-to-end pay-with-link scenario: tabular data in, contact form and
//! pre-application through the page models, reference number out to the
//! record log.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::io::Write;
use std::path::PathBuf;

use navegar::{
    ContactData, InteractOptions, Locator, MockDriver, MockElement, NavegarError, PageModel,
    PayWithLinkPage, RecordLog, Session, MERCHANT_SIGNUP_URL, PAY_WITH_LINK_URL,
};
use tempfile::TempDir;

type Page = PayWithLinkPage<MockDriver>;

fn fast_session(driver: MockDriver) -> Session<MockDriver> {
    Session::with_options(
        driver,
        InteractOptions::new().with_timeout(200).with_poll_interval(10),
    )
}

fn write_contact_csv(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("contact.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    // Phone exported in spreadsheet scientific notation
    write!(
        file,
        "First Name,Surname,Email,Website,Phone\n\
         Ayşe,Yılmaz,ayse@example.com,https://ayse.example,5.551234567E9\n"
    )
    .unwrap();
    path
}

fn seed_contact_page(driver: &MockDriver) {
    for locator in [
        Page::accept_cookies_button(),
        Page::first_name_input(),
        Page::surname_input(),
        Page::email_input(),
        Page::website_input(),
        Page::phone_input(),
        Page::business_type_dropdown(),
        Page::sole_proprietorship_option(),
    ] {
        driver.insert(MockElement::new(locator, "input"));
    }
    // The agreement checkbox sits under a styled overlay
    driver.insert(MockElement::new(Page::agreement_checkbox(), "input").visible(false));
    driver.insert(
        MockElement::new(Page::submit_button(), "button").navigates_to(MERCHANT_SIGNUP_URL),
    );
}

fn seed_signup_page(driver: &MockDriver) {
    driver.insert(MockElement::new(Page::pre_application_button(), "button").visible(false));
    for locator in [
        Page::company_title_input(),
        Page::national_id_input(),
        Page::tax_office_input(),
        Page::monthly_sales_input(),
    ] {
        driver.insert(MockElement::new(locator, "input"));
    }
    driver.insert(MockElement::new(Page::complete_pre_application_button(), "button"));
    driver.insert(
        MockElement::new(Page::thank_you_heading(), "h3")
            .text("Teşekkürler, ön başvurunuz tarafımıza ulaşmıştır."),
    );
    driver.insert(
        MockElement::new(Page::reference_details_link(), "a").text("Referans no: REF-2024-001"),
    );
}

// ============================================================================
// Full Scenario
// ============================================================================

#[test]
fn test_pay_with_link_application_end_to_end() {
    let dir = TempDir::new().unwrap();
    let data = navegar::read_first_row(&write_contact_csv(&dir)).unwrap();
    let contact = ContactData::from_row(&data);
    assert_eq!(contact.phone, "5551234567");

    let driver = MockDriver::new();
    seed_contact_page(&driver);
    seed_signup_page(&driver);
    let session = fast_session(driver);

    let page = session.pay_with_link_page();
    page.open().unwrap();
    assert!(page.verify_current_url(PAY_WITH_LINK_URL));

    page.accept_cookies().unwrap();
    page.fill_contact_form(&contact).unwrap();
    page.choose_business_type().unwrap();
    page.agree_to_terms().unwrap();
    page.submit().unwrap();
    assert!(page.verify_current_url(MERCHANT_SIGNUP_URL));

    page.start_pre_application().unwrap();
    page.fill_pre_application("Ayşe Ticaret", "29657511646", "Kadıköy", "100000")
        .unwrap();
    page.complete_pre_application().unwrap();

    assert_eq!(
        page.thank_you_message().unwrap(),
        "Teşekkürler, ön başvurunuz tarafımıza ulaşmıştır."
    );

    let log = RecordLog::new(dir.path().join("reference_data.csv"));
    let (key, value) = page.capture_reference(&log).unwrap();
    assert_eq!(key, "Referans no");
    assert_eq!(value, "REF-2024-001");
    assert_eq!(
        std::fs::read_to_string(log.path()).unwrap(),
        "Referans no,REF-2024-001\n"
    );

    // Typed values made it into the form fields verbatim
    let driver = session.driver();
    assert_eq!(driver.value_of(&Page::phone_input()).as_deref(), Some("5551234567"));
    assert_eq!(driver.value_of(&Page::first_name_input()).as_deref(), Some("Ayşe"));
    assert_eq!(
        driver.value_of(&Page::national_id_input()).as_deref(),
        Some("29657511646")
    );
}

// ============================================================================
// Failure Paths
// ============================================================================

#[test]
fn test_failure_names_the_offending_locator_and_still_quits() {
    let driver = MockDriver::new();
    // Contact page missing entirely: the first fill fails
    let session = fast_session(driver);
    let shared = std::sync::Arc::clone(session.driver());

    let page = session.pay_with_link_page();
    let result = page.fill_contact_form(&ContactData {
        first_name: "Ayşe".to_string(),
        surname: String::new(),
        email: String::new(),
        website: String::new(),
        phone: String::new(),
    });
    match result {
        Err(NavegarError::FieldFill { locator, .. }) => assert_eq!(locator, "id(first-name)"),
        other => panic!("Expected FieldFill, got {other:?}"),
    }

    drop(session);
    assert!(shared.was_quit());
}

#[test]
fn test_record_log_accumulates_across_runs() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("reference_data.csv");

    for reference in ["Referans no: REF1", "Referans no: REF2"] {
        let driver = MockDriver::new();
        driver.insert(MockElement::new(Page::reference_details_link(), "a").text(reference));
        let session = fast_session(driver);

        let page = session.pay_with_link_page();
        page.capture_reference(&RecordLog::new(&log_path)).unwrap();
    }

    let rows = RecordLog::new(&log_path).read_all().unwrap();
    assert_eq!(
        rows,
        vec![
            ("Referans no".to_string(), "REF1".to_string()),
            ("Referans no".to_string(), "REF2".to_string()),
        ]
    );
}

#[test]
fn test_locator_helpers_are_distinct() {
    let all = [
        Page::first_name_input(),
        Page::surname_input(),
        Page::email_input(),
        Page::website_input(),
        Page::phone_input(),
        Page::business_type_dropdown(),
        Page::sole_proprietorship_option(),
        Page::agreement_checkbox(),
        Page::submit_button(),
        Page::accept_cookies_button(),
        Page::pre_application_button(),
        Page::company_title_input(),
        Page::national_id_input(),
        Page::tax_office_input(),
        Page::monthly_sales_input(),
        Page::complete_pre_application_button(),
        Page::thank_you_heading(),
        Page::reference_details_link(),
    ];
    let unique: std::collections::HashSet<Locator> = all.iter().cloned().collect();
    assert_eq!(unique.len(), all.len());
}
