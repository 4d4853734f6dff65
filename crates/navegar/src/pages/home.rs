//! Home page model: hero carousel and content sections.

use tracing::info;

use crate::driver::BrowserDriver;
use crate::interact::Interactor;
use crate::locator::Locator;
use crate::page::PageModel;
use crate::result::{NavegarError, NavegarResult};

/// Canonical home page URL
pub const HOME_URL: &str = "https://www.merchant.example/";

/// Content sections checked for visibility on the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// "Manage products from your store panel" heading
    ProductManagement,
    /// "For developers" heading
    ForDevelopers,
    /// "Why choose us?" heading
    WhyChooseUs,
    /// "Our business partners" heading
    BusinessPartners,
    /// FAQ section heading
    Faq,
}

impl Section {
    /// Locator of the section's heading element
    #[must_use]
    pub fn locator(&self) -> Locator {
        match self {
            Self::ProductManagement => Locator::id("urunleri-magaza-panelinizden-kolayca-yonetin"),
            Self::ForDevelopers => Locator::id("gelistiriciler-icin"),
            Self::WhyChooseUs => Locator::xpath("/html/body/div[1]/div[4]/h2"),
            Self::BusinessPartners => Locator::xpath("/html/body/div[1]/section[5]/div[1]/h2"),
            Self::Faq => Locator::xpath("/html/body/div[1]/section[6]/div[1]/h2"),
        }
    }

    /// All sections, in page order
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::ProductManagement,
            Self::ForDevelopers,
            Self::WhyChooseUs,
            Self::BusinessPartners,
            Self::Faq,
        ]
    }
}

/// Home page: hero card carousel, content sections, payments menu.
#[derive(Debug, Clone)]
pub struct HomePage<D: BrowserDriver> {
    engine: Interactor<D>,
}

impl<D: BrowserDriver> PageModel<D> for HomePage<D> {
    fn engine(&self) -> &Interactor<D> {
        &self.engine
    }

    fn url(&self) -> &str {
        HOME_URL
    }
}

impl<D: BrowserDriver> HomePage<D> {
    /// Create the page model over a shared engine
    #[must_use]
    pub fn new(engine: Interactor<D>) -> Self {
        Self { engine }
    }

    fn slider_cards() -> Locator {
        Locator::css("[tab-id] [aria-live] [role='group']")
    }

    /// Locator of the carousel card at a 1-based index
    #[must_use]
    pub fn card(index: usize) -> Locator {
        Self::slider_cards().nth_of_type(index)
    }

    fn next_button() -> Locator {
        Locator::css(".next-btn-container.custom-swiper-button-next")
    }

    fn payments_menu() -> Locator {
        Locator::xpath("/html/body/header/div[2]/div[2]/div[2]/nav/div[2]")
    }

    fn pay_with_link_entry() -> Locator {
        Locator::xpath("//div[@id='online-odeme-cozumleri']/a[@href='/linkle-odeme']")
    }

    /// Number of carousel cards realized in the current document.
    ///
    /// Lazily-rendered carousels may under-report until advanced.
    pub fn total_card_count(&self) -> NavegarResult<usize> {
        let count = self.engine.driver().find_elements(&Self::slider_cards())?.len();
        info!(count, "Counted carousel cards");
        Ok(count)
    }

    /// Best-effort visibility probe for the card at a 1-based index:
    /// `false` for missing, hidden, or out-of-range cards, never raises.
    #[must_use]
    pub fn is_card_visible(&self, index: usize) -> bool {
        let probe = || -> NavegarResult<bool> {
            let card = self.engine.driver().find_element(&Self::card(index))?;
            self.engine.scroll_into_view_if_needed(&card)?;
            self.engine.try_is_displayed(&card)
        };
        probe().unwrap_or(false)
    }

    /// Advance the carousel until the card after `current_index` is visible.
    ///
    /// The next control is script-clicked because the carousel's transition
    /// animation is asynchronous relative to the click; each attempt is
    /// followed by a visibility check on card `current_index + 1`, up to the
    /// configured retry bound.
    ///
    /// # Errors
    ///
    /// [`NavegarError::CarouselAdvance`] carrying `current_index` when the
    /// bound is exhausted without the next card becoming visible.
    pub fn advance_carousel(&self, current_index: usize) -> NavegarResult<()> {
        let attempts = self.engine.options().carousel_attempts;
        for attempt in 1..=attempts {
            self.engine.click_via_script(&Self::next_button())?;
            if self.is_card_visible(current_index + 1) {
                info!(current_index, attempt, "Carousel advanced");
                return Ok(());
            }
        }
        Err(NavegarError::CarouselAdvance {
            index: current_index,
        })
    }

    /// Best-effort visibility probe for a content section heading
    #[must_use]
    pub fn is_section_visible(&self, section: Section) -> bool {
        let probe = || -> NavegarResult<bool> {
            let element = self.engine.driver().find_element(&section.locator())?;
            self.engine.scroll_into_view_if_needed(&element)?;
            self.engine.try_is_displayed(&element)
        };
        probe().unwrap_or(false)
    }

    /// Open the payments menu and follow the pay-with-link entry.
    ///
    /// # Errors
    ///
    /// [`NavegarError::Click`] naming the menu or entry locator.
    pub fn open_pay_with_link(&self) -> NavegarResult<()> {
        self.engine.click(&Self::payments_menu())?;
        self.engine.click(&Self::pay_with_link_entry())?;
        Ok(())
    }
}
