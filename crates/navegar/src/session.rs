//! Scenario session: shared driver lifecycle and page model construction.
//!
//! A session owns the driver for one scenario run. Page models and engines
//! handed out by the session share that driver; when the session drops, the
//! driver is told to quit regardless of how the scenario ended.

use std::sync::Arc;

use tracing::{error, info};

use crate::driver::BrowserDriver;
use crate::interact::{InteractOptions, Interactor};
use crate::pages::{HomePage, PayWithLinkPage};

/// One scenario's driver session. Quits the driver on drop.
#[derive(Debug)]
pub struct Session<D: BrowserDriver> {
    driver: Arc<D>,
    options: InteractOptions,
}

impl<D: BrowserDriver> Session<D> {
    /// Start a session over `driver` with default interaction options
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self::with_options(driver, InteractOptions::new())
    }

    /// Start a session with explicit interaction options
    #[must_use]
    pub fn with_options(driver: D, options: InteractOptions) -> Self {
        info!("Session started");
        Self {
            driver: Arc::new(driver),
            options,
        }
    }

    /// The shared driver
    #[must_use]
    pub fn driver(&self) -> &Arc<D> {
        &self.driver
    }

    /// A fresh engine over the session's driver and options
    #[must_use]
    pub fn interactor(&self) -> Interactor<D> {
        Interactor::with_options(Arc::clone(&self.driver), self.options.clone())
    }

    /// Home page model bound to this session
    #[must_use]
    pub fn home_page(&self) -> HomePage<D> {
        HomePage::new(self.interactor())
    }

    /// Pay-with-link page model bound to this session
    #[must_use]
    pub fn pay_with_link_page(&self) -> PayWithLinkPage<D> {
        PayWithLinkPage::new(self.interactor())
    }
}

impl<D: BrowserDriver> Drop for Session<D> {
    fn drop(&mut self) {
        match self.driver.quit() {
            Ok(()) => info!("Session ended, driver quit"),
            Err(e) => error!(error = %e, "Driver quit failed during teardown"),
        }
    }
}

/// Install the global tracing subscriber, honoring `RUST_LOG`. Repeated
/// calls are no-ops, so scenario binaries and tests may all call it.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Locator;
    use crate::mock::{MockDriver, MockElement};
    use crate::page::PageModel;
    use crate::result::NavegarError;

    #[test]
    fn test_drop_quits_driver() {
        let session = Session::new(MockDriver::new());
        let driver = Arc::clone(session.driver());
        drop(session);
        assert!(driver.was_quit());
    }

    #[test]
    fn test_drop_quits_driver_when_scenario_errors() {
        let session = Session::with_options(
            MockDriver::new(),
            InteractOptions::new().with_timeout(100).with_poll_interval(10),
        );
        let driver = Arc::clone(session.driver());

        let run = || -> crate::result::NavegarResult<()> {
            let engine = session.interactor();
            engine.click(&Locator::id("missing"))?;
            Ok(())
        };
        assert!(matches!(run(), Err(NavegarError::Click { .. })));

        drop(session);
        assert!(driver.was_quit());
    }

    #[test]
    fn test_page_models_share_the_session_driver() {
        let session = Session::with_options(
            MockDriver::new(),
            InteractOptions::new().with_timeout(100).with_poll_interval(10),
        );
        session.driver().insert(
            MockElement::new(Locator::id("gelistiriciler-icin"), "h2"),
        );

        let home = session.home_page();
        assert!(home.is_section_visible(crate::pages::Section::ForDevelopers));
        assert_eq!(home.url(), crate::pages::HOME_URL);

        let pay = session.pay_with_link_page();
        assert_eq!(pay.engine().options().timeout_ms, 100);
    }
}
