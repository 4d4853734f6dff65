//! Element interaction engine.
//!
//! Wraps a [`BrowserDriver`] with visibility/clickability waiting,
//! viewport-aware scrolling, safe fill/click/text operations, and URL
//! polling, hiding timing and viewport variability from page models.
//!
//! Every element-mutating operation funnels through the same sequence
//! (visibility, scroll-into-view, clickability, action), so flaky timing and
//! occlusion failures surface as one deterministic, typed failure point that
//! names the offending locator instead of a driver exception scattered across
//! call sites. Waits re-locate by locator on every poll iteration; handles
//! are never cached across waits.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::driver::{BrowserDriver, ElementHandle};
use crate::locator::Locator;
use crate::result::{NavegarError, NavegarResult};

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Default retry bound for carousel advancement
pub const DEFAULT_CAROUSEL_ATTEMPTS: u32 = 5;

/// Configuration for the interaction engine.
///
/// The reference timeouts are defaults, not hidden process-wide state:
/// scenarios thread their own options into [`Interactor::with_options`].
#[derive(Debug, Clone)]
pub struct InteractOptions {
    /// Wait timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
    /// Retry bound for carousel advancement
    pub carousel_attempts: u32,
}

impl Default for InteractOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            carousel_attempts: DEFAULT_CAROUSEL_ATTEMPTS,
        }
    }
}

impl InteractOptions {
    /// Create options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wait timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Set the carousel retry bound
    #[must_use]
    pub const fn with_carousel_attempts(mut self, attempts: u32) -> Self {
        self.carousel_attempts = attempts;
        self
    }

    /// Get the timeout as a Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get the poll interval as a Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Safe, idempotent interaction primitives over a [`BrowserDriver`].
///
/// Cheap to clone; clones share the same driver session. A session is owned
/// by one scenario at a time; operations block (bounded polling) and are not
/// safe to invoke concurrently against the same driver.
#[derive(Debug)]
pub struct Interactor<D: BrowserDriver> {
    driver: Arc<D>,
    options: InteractOptions,
}

impl<D: BrowserDriver> Clone for Interactor<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            options: self.options.clone(),
        }
    }
}

impl<D: BrowserDriver> Interactor<D> {
    /// Create an engine with default options
    #[must_use]
    pub fn new(driver: Arc<D>) -> Self {
        Self::with_options(driver, InteractOptions::default())
    }

    /// Create an engine with explicit options
    #[must_use]
    pub fn with_options(driver: Arc<D>, options: InteractOptions) -> Self {
        Self { driver, options }
    }

    /// The underlying driver session
    #[must_use]
    pub fn driver(&self) -> &Arc<D> {
        &self.driver
    }

    /// The engine's options
    #[must_use]
    pub fn options(&self) -> &InteractOptions {
        &self.options
    }

    /// Navigate the session to a URL
    pub fn navigate(&self, url: &str) -> NavegarResult<()> {
        info!(url, "Navigating");
        self.driver.navigate(url)
    }

    /// Bounded poll loop: evaluates `probe` every poll interval until it
    /// yields a value or the timeout elapses. The probe runs at least once.
    fn wait_until<T>(
        &self,
        condition: &str,
        mut probe: impl FnMut() -> Option<T>,
    ) -> NavegarResult<T> {
        let start = Instant::now();
        loop {
            if let Some(value) = probe() {
                return Ok(value);
            }
            if start.elapsed() >= self.options.timeout() {
                return Err(NavegarError::Timeout {
                    ms: self.options.timeout_ms,
                    condition: condition.to_string(),
                });
            }
            std::thread::sleep(self.options.poll_interval());
        }
    }

    /// Wait until the locator resolves to a visible element.
    ///
    /// Re-locates on every poll iteration to avoid staleness.
    ///
    /// # Errors
    ///
    /// `Timeout` when nothing visible matches within the configured bound.
    pub fn wait_for_visibility(&self, locator: &Locator) -> NavegarResult<ElementHandle> {
        self.wait_until(&format!("visibility of {locator}"), || {
            self.driver
                .find_element(locator)
                .ok()
                .filter(ElementHandle::is_visible)
        })
    }

    /// Wait until the locator resolves to a visible, enabled element.
    ///
    /// # Errors
    ///
    /// `Timeout` when nothing clickable matches within the configured bound.
    pub fn wait_for_clickability(&self, locator: &Locator) -> NavegarResult<ElementHandle> {
        self.wait_until(&format!("clickability of {locator}"), || {
            self.driver
                .find_element(locator)
                .ok()
                .filter(|el| el.is_visible() && el.enabled)
        })
    }

    /// Scroll the element into view unless its bounding box already lies
    /// fully within the viewport. No-op when in view, so repeated calls issue
    /// no redundant scrolls.
    pub fn scroll_into_view_if_needed(&self, element: &ElementHandle) -> NavegarResult<()> {
        let in_view = match element.bounding_box {
            Some(bbox) => bbox.fully_within(&self.driver.viewport()?),
            // Not rendered: let the driver bring it in
            None => false,
        };
        if in_view {
            debug!(element = %element.id, "Already in viewport, skipping scroll");
            return Ok(());
        }
        self.driver.scroll_into_view(element)
    }

    /// Locate, wait for visibility, scroll into view, clear, and type.
    ///
    /// # Errors
    ///
    /// `FieldFill` carrying the locator on any step failure.
    pub fn fill_field(&self, locator: &Locator, value: &str) -> NavegarResult<()> {
        let fill = || -> NavegarResult<()> {
            let element = self.wait_for_visibility(locator)?;
            self.scroll_into_view_if_needed(&element)?;
            self.driver.clear(&element)?;
            self.driver.type_text(&element, value)?;
            Ok(())
        };
        match fill() {
            Ok(()) => {
                info!(%locator, value, "Filled field");
                Ok(())
            }
            Err(e) => {
                error!(%locator, value, error = %e, "Failed to fill field");
                Err(NavegarError::FieldFill {
                    locator: locator.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Locate, wait for visibility, scroll, wait for clickability, click.
    ///
    /// # Errors
    ///
    /// `Click` carrying the locator on any step failure.
    pub fn click(&self, locator: &Locator) -> NavegarResult<()> {
        let click = || -> NavegarResult<()> {
            let element = self.wait_for_visibility(locator)?;
            self.scroll_into_view_if_needed(&element)?;
            let element = self.wait_for_clickability(locator)?;
            self.driver.click(&element)?;
            Ok(())
        };
        match click() {
            Ok(()) => {
                info!(%locator, "Clicked element");
                Ok(())
            }
            Err(e) => {
                error!(%locator, error = %e, "Failed to click element");
                Err(NavegarError::Click {
                    locator: locator.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Locate (without waiting) and issue a direct DOM-level click, bypassing
    /// the visibility/clickability gates. For controls blocked by overlays
    /// the viewport check cannot detect.
    ///
    /// # Errors
    ///
    /// `ScriptClick` carrying the locator on any step failure.
    pub fn click_via_script(&self, locator: &Locator) -> NavegarResult<()> {
        let click = || -> NavegarResult<()> {
            let element = self.driver.find_element(locator)?;
            self.driver
                .execute_script("arguments[0].click();", &[json!({ "element": element.id })])?;
            Ok(())
        };
        match click() {
            Ok(()) => {
                info!(%locator, "Clicked element via script");
                Ok(())
            }
            Err(e) => {
                error!(%locator, error = %e, "Script click failed");
                Err(NavegarError::ScriptClick {
                    locator: locator.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Locate, wait for visibility, and read the rendered text content.
    ///
    /// # Errors
    ///
    /// `TextRead` carrying the locator on any step failure.
    pub fn get_text(&self, locator: &Locator) -> NavegarResult<String> {
        let read = || -> NavegarResult<String> {
            let element = self.wait_for_visibility(locator)?;
            self.driver.text(&element)
        };
        match read() {
            Ok(text) => {
                info!(%locator, text, "Read element text");
                Ok(text)
            }
            Err(e) => {
                error!(%locator, error = %e, "Failed to read element text");
                Err(NavegarError::TextRead {
                    locator: locator.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Whether an already-held handle is currently rendered and visible.
    ///
    /// # Errors
    ///
    /// Errors when the probe itself fails (stale handle, driver failure):
    /// the distinction between "confirmed absent" and "probe failed" stays
    /// available here; [`Self::is_displayed`] collapses both to `false`.
    pub fn try_is_displayed(&self, element: &ElementHandle) -> NavegarResult<bool> {
        self.driver.is_displayed(element)
    }

    /// Best-effort visibility probe: `false` on hidden, stale, or errored,
    /// never raises.
    #[must_use]
    pub fn is_displayed(&self, element: &ElementHandle) -> bool {
        match self.try_is_displayed(element) {
            Ok(displayed) => displayed,
            Err(e) => {
                warn!(element = %element.id, error = %e, "Visibility probe failed");
                false
            }
        }
    }

    /// Poll the current document location until it equals `expected` or the
    /// timeout elapses.
    ///
    /// # Errors
    ///
    /// Errors only when reading the current URL itself fails; a plain
    /// mismatch is `Ok(false)`.
    pub fn try_wait_for_url_equals(
        &self,
        expected: &str,
        timeout: Duration,
    ) -> NavegarResult<bool> {
        let start = Instant::now();
        loop {
            let current = self.driver.current_url()?;
            debug!(current, expected, "Checking URL");
            if current == expected {
                info!(url = expected, "Current URL matches expected URL");
                return Ok(true);
            }
            if start.elapsed() >= timeout {
                warn!(current, expected, "Current URL does not match");
                return Ok(false);
            }
            std::thread::sleep(self.options.poll_interval());
        }
    }

    /// Poll the current document location for equality with `expected`,
    /// using the configured timeout. Returns `false` on mismatch or probe
    /// failure, never raises; callers decide whether a mismatch is fatal.
    #[must_use]
    pub fn wait_for_url_equals(&self, expected: &str) -> bool {
        match self.try_wait_for_url_equals(expected, self.options.timeout()) {
            Ok(matched) => matched,
            Err(e) => {
                error!(expected, error = %e, "Error verifying current URL");
                false
            }
        }
    }
}
