//! Page model trait.
//!
//! A page model is a named bundle of locators plus operations scoped to one
//! logical page, composed from the [`Interactor`]. Page models own no mutable
//! state beyond the shared engine they are constructed with, and know nothing
//! about waiting or scrolling mechanics.

use crate::driver::BrowserDriver;
use crate::interact::Interactor;
use crate::result::NavegarResult;

/// Trait for page models representing one logical page.
///
/// # Example
///
/// ```ignore
/// struct LoginPage<D: BrowserDriver> {
///     engine: Interactor<D>,
/// }
///
/// impl<D: BrowserDriver> PageModel<D> for LoginPage<D> {
///     fn engine(&self) -> &Interactor<D> {
///         &self.engine
///     }
///
///     fn url(&self) -> &str {
///         "https://www.merchant.example/login"
///     }
/// }
/// ```
pub trait PageModel<D: BrowserDriver> {
    /// The interaction engine the page is composed from
    fn engine(&self) -> &Interactor<D>;

    /// Canonical URL of the page
    fn url(&self) -> &str;

    /// Page name for logging/debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Navigate the session to the page's canonical URL
    fn open(&self) -> NavegarResult<()> {
        self.engine().navigate(self.url())
    }

    /// Whether the current document location equals `expected` (polls up to
    /// the engine's configured timeout; `false` never raises)
    fn verify_current_url(&self, expected: &str) -> bool {
        self.engine().wait_for_url_equals(expected)
    }
}
