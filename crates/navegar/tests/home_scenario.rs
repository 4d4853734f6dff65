//! Home page scenario: carousel traversal and section visibility over a
//! scripted driver.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use navegar::{
    BoundingBox, HomePage, InteractOptions, Locator, MockDriver, MockElement, PageModel, Section,
    Session, HOME_URL,
};

const NEXT_BUTTON: &str = ".next-btn-container.custom-swiper-button-next";
const SLIDER_CARDS: &str = "[tab-id] [aria-live] [role='group']";

fn fast_session(driver: MockDriver) -> Session<MockDriver> {
    Session::with_options(
        driver,
        InteractOptions::new().with_timeout(200).with_poll_interval(10),
    )
}

/// Script a four-card carousel: card 1 visible up front, each later card
/// revealed by one more script-click on the next control.
fn seed_home(driver: &MockDriver) {
    let next = Locator::css(NEXT_BUTTON);
    driver.insert(MockElement::new(next.clone(), "button"));
    for i in 1..=4u32 {
        let card = MockElement::new(HomePage::<MockDriver>::card(i as usize), "div");
        let card = if i == 1 {
            card
        } else {
            card.reveal_after_script_clicks(next.clone(), i - 1)
        };
        driver.insert(card);
        driver.insert(MockElement::new(Locator::css(SLIDER_CARDS), "div"));
    }
    for section in Section::all() {
        // Sections start below the fold
        driver.insert(
            MockElement::new(section.locator(), "h2")
                .bbox(BoundingBox::new(2200.0, 0.0, 2280.0, 800.0)),
        );
    }
}

// ============================================================================
// Carousel Scenario
// ============================================================================

#[test]
fn test_full_carousel_traversal() {
    let driver = MockDriver::new();
    seed_home(&driver);
    let session = fast_session(driver);

    let home = session.home_page();
    home.open().unwrap();
    assert!(home.verify_current_url(HOME_URL));

    assert_eq!(home.total_card_count().unwrap(), 4);
    assert!(home.is_card_visible(1));

    for index in 1..4 {
        home.advance_carousel(index).unwrap();
        assert!(home.is_card_visible(index + 1), "card {} not revealed", index + 1);
    }
}

#[test]
fn test_carousel_stuck_past_last_card() {
    let driver = MockDriver::new();
    seed_home(&driver);
    let session = fast_session(driver);

    let home = session.home_page();
    home.open().unwrap();

    for index in 1..4 {
        home.advance_carousel(index).unwrap();
    }
    // There is no card 5; the retry bound is exhausted
    let err = home.advance_carousel(4).unwrap_err();
    assert!(err.to_string().contains('4'), "error should name the index: {err}");
}

// ============================================================================
// Section Visibility Scenario
// ============================================================================

#[test]
fn test_every_section_reachable_by_scrolling() {
    let driver = MockDriver::new();
    seed_home(&driver);
    let session = fast_session(driver);

    let home = session.home_page();
    home.open().unwrap();

    for section in Section::all() {
        assert!(home.is_section_visible(section), "{section:?} not visible");
    }
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_session_quits_driver_after_scenario() {
    let driver = MockDriver::new();
    seed_home(&driver);
    let session = fast_session(driver);

    let driver = std::sync::Arc::clone(session.driver());
    session.home_page().open().unwrap();
    drop(session);
    assert!(driver.was_quit());
}
