//! Pay-with-link page model: contact form, pre-application flow, and
//! thank-you/reference capture.

use std::collections::HashMap;

use crate::driver::BrowserDriver;
use crate::interact::Interactor;
use crate::locator::Locator;
use crate::page::PageModel;
use crate::record::{parse_reference, RecordLog};
use crate::result::{NavegarError, NavegarResult};

/// Canonical pay-with-link page URL
pub const PAY_WITH_LINK_URL: &str = "https://www.merchant.example/linkle-odeme";

/// URL of the merchant-signup page the form redirects to
pub const MERCHANT_SIGNUP_URL: &str = "https://www.merchant.example/uye-isyeri-olun";

/// The contact form data record: read once at scenario start, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactData {
    /// First name
    pub first_name: String,
    /// Surname
    pub surname: String,
    /// Email address
    pub email: String,
    /// Website URL
    pub website: String,
    /// Phone number (plain digits)
    pub phone: String,
}

impl ContactData {
    /// Build the record from a header→value row map (as produced by
    /// [`crate::data::read_first_row`]). Missing cells yield empty strings.
    #[must_use]
    pub fn from_row(row: &HashMap<String, String>) -> Self {
        let cell = |header: &str| row.get(header).cloned().unwrap_or_default();
        Self {
            first_name: cell("First Name"),
            surname: cell("Surname"),
            email: cell("Email"),
            website: cell("Website"),
            phone: cell("Phone"),
        }
    }
}

/// Pay-with-link page: contact form and merchant pre-application.
#[derive(Debug, Clone)]
pub struct PayWithLinkPage<D: BrowserDriver> {
    engine: Interactor<D>,
}

impl<D: BrowserDriver> PageModel<D> for PayWithLinkPage<D> {
    fn engine(&self) -> &Interactor<D> {
        &self.engine
    }

    fn url(&self) -> &str {
        PAY_WITH_LINK_URL
    }
}

impl<D: BrowserDriver> PayWithLinkPage<D> {
    /// Create the page model over a shared engine
    #[must_use]
    pub fn new(engine: Interactor<D>) -> Self {
        Self { engine }
    }

    /// First name input
    #[must_use]
    pub fn first_name_input() -> Locator {
        Locator::id("first-name")
    }

    /// Surname input
    #[must_use]
    pub fn surname_input() -> Locator {
        Locator::name("surname")
    }

    /// Email input
    #[must_use]
    pub fn email_input() -> Locator {
        Locator::id("email")
    }

    /// Website input
    #[must_use]
    pub fn website_input() -> Locator {
        Locator::name("website")
    }

    /// Phone input
    #[must_use]
    pub fn phone_input() -> Locator {
        Locator::name("tel")
    }

    /// Business type dropdown
    #[must_use]
    pub fn business_type_dropdown() -> Locator {
        Locator::xpath("//form[@id='contact-form']//div[.='İşletme Tipi']")
    }

    /// Sole-proprietorship option in the business type dropdown
    #[must_use]
    pub fn sole_proprietorship_option() -> Locator {
        Locator::xpath("//form[@id='contact-form']//div[.='Şahıs İşletmesi (Vergi Levham Var)']")
    }

    /// Terms agreement checkbox (sits under a styled overlay)
    #[must_use]
    pub fn agreement_checkbox() -> Locator {
        Locator::id("telefon")
    }

    /// Contact form submit button
    #[must_use]
    pub fn submit_button() -> Locator {
        Locator::xpath("//*[@id='contact-form']/button")
    }

    /// Accept-all button of the cookie banner
    #[must_use]
    pub fn accept_cookies_button() -> Locator {
        Locator::xpath("//div[@class='section-container']//button[.='Tümünü Kabul Et']")
    }

    /// Pre-application start button on the signup page
    #[must_use]
    pub fn pre_application_button() -> Locator {
        Locator::xpath("//*[@id='__next']/div/div[2]/div[2]/div/div/form/div[8]/div/button")
    }

    /// Company title input (pre-application)
    #[must_use]
    pub fn company_title_input() -> Locator {
        Locator::id("company_title")
    }

    /// National id input (pre-application)
    #[must_use]
    pub fn national_id_input() -> Locator {
        Locator::id("tc_no")
    }

    /// Tax office input (pre-application)
    #[must_use]
    pub fn tax_office_input() -> Locator {
        Locator::id("tax_office")
    }

    /// Monthly sales input (pre-application)
    #[must_use]
    pub fn monthly_sales_input() -> Locator {
        Locator::id("monthly_sale")
    }

    /// Pre-application completion button
    #[must_use]
    pub fn complete_pre_application_button() -> Locator {
        Locator::xpath("//*[@id='__next']/div/div[2]/div[2]/div/div/form/div[6]/div/button")
    }

    /// Thank-you message heading
    #[must_use]
    pub fn thank_you_heading() -> Locator {
        Locator::xpath("//*[@id='__next']/div/div/div/h3")
    }

    /// Reference details link ("Referans no: REF...")
    #[must_use]
    pub fn reference_details_link() -> Locator {
        Locator::xpath("//*[@id='__next']/div/div/div/div/a")
    }

    /// Dismiss the cookie banner
    pub fn accept_cookies(&self) -> NavegarResult<()> {
        self.engine.click(&Self::accept_cookies_button())
    }

    /// Fill the contact form fields in order.
    ///
    /// Sequential and non-transactional: a failure partway leaves the earlier
    /// fields filled and reports the locator that failed.
    pub fn fill_contact_form(&self, data: &ContactData) -> NavegarResult<()> {
        self.engine.fill_field(&Self::first_name_input(), &data.first_name)?;
        self.engine.fill_field(&Self::surname_input(), &data.surname)?;
        self.engine.fill_field(&Self::email_input(), &data.email)?;
        self.engine.fill_field(&Self::website_input(), &data.website)?;
        self.engine.fill_field(&Self::phone_input(), &data.phone)?;
        Ok(())
    }

    /// Open the business type dropdown and pick the sole-proprietorship
    /// option
    pub fn choose_business_type(&self) -> NavegarResult<()> {
        self.engine.click(&Self::business_type_dropdown())?;
        self.engine.click(&Self::sole_proprietorship_option())?;
        Ok(())
    }

    /// Tick the terms agreement checkbox. Script-clicked: the checkbox sits
    /// under a styled overlay the clickability gate cannot see past.
    pub fn agree_to_terms(&self) -> NavegarResult<()> {
        self.engine.click_via_script(&Self::agreement_checkbox())
    }

    /// Submit the contact form
    pub fn submit(&self) -> NavegarResult<()> {
        self.engine.click(&Self::submit_button())
    }

    /// Start the merchant pre-application (script-clicked overlay button)
    pub fn start_pre_application(&self) -> NavegarResult<()> {
        self.engine.click_via_script(&Self::pre_application_button())
    }

    /// Fill the pre-application fields in order (non-transactional)
    pub fn fill_pre_application(
        &self,
        company_title: &str,
        national_id: &str,
        tax_office: &str,
        monthly_sales: &str,
    ) -> NavegarResult<()> {
        self.engine.fill_field(&Self::company_title_input(), company_title)?;
        self.engine.fill_field(&Self::national_id_input(), national_id)?;
        self.engine.fill_field(&Self::tax_office_input(), tax_office)?;
        self.engine.fill_field(&Self::monthly_sales_input(), monthly_sales)?;
        Ok(())
    }

    /// Complete the pre-application
    pub fn complete_pre_application(&self) -> NavegarResult<()> {
        self.engine.click(&Self::complete_pre_application_button())
    }

    /// Read the thank-you message shown after a completed pre-application
    pub fn thank_you_message(&self) -> NavegarResult<String> {
        self.engine.get_text(&Self::thank_you_heading())
    }

    /// Read the raw reference details text ("Referans no: REF123")
    pub fn reference_details(&self) -> NavegarResult<String> {
        self.engine.get_text(&Self::reference_details_link())
    }

    /// Read the reference details, split them into a key/value record, and
    /// append the record to `log`. Returns the captured pair.
    ///
    /// # Errors
    ///
    /// [`NavegarError::TextRead`] when the rendered text does not have the
    /// `key: value` shape; read and append errors propagate unchanged.
    pub fn capture_reference(&self, log: &RecordLog) -> NavegarResult<(String, String)> {
        let text = self.reference_details()?;
        let (key, value) =
            parse_reference(&text).ok_or_else(|| NavegarError::TextRead {
                locator: Self::reference_details_link().to_string(),
                message: format!("reference text {text:?} is not of the form 'key: value'"),
            })?;
        log.append(&key, &value)?;
        Ok((key, value))
    }
}
