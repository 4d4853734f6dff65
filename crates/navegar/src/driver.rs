//! Abstract browser driver trait and element geometry.
//!
//! [`BrowserDriver`] is the capability object the rest of the crate is built
//! on: navigation, element lookup, script execution, element-level actions,
//! and session shutdown. Navegar consumes this interface, it does not
//! implement a wire protocol: any WebDriver/CDP client can sit behind it,
//! and [`crate::mock::MockDriver`] sits behind it in tests.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session ──► PageModel ──► Interactor ──► BrowserDriver     │
//! │                 (locators)   (wait/scroll/   (navigate,     │
//! │                               click funnel)   find, script) │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Semantics are synchronous and error-on-failure: every call either completes
//! or returns an error the [`Interactor`](crate::interact::Interactor)
//! translates into its typed taxonomy.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::locator::Locator;
use crate::result::NavegarResult;

/// Bounding box of a rendered element, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Distance from the viewport's top edge
    pub top: f64,
    /// Distance from the viewport's left edge
    pub left: f64,
    /// Distance of the bottom edge from the viewport's top edge
    pub bottom: f64,
    /// Distance of the right edge from the viewport's left edge
    pub right: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    #[must_use]
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Whether the box lies fully within the viewport.
    ///
    /// The predicate behind scroll-if-needed: top ≥ 0, left ≥ 0,
    /// bottom ≤ viewport height, right ≤ viewport width.
    #[must_use]
    pub fn fully_within(&self, viewport: &Viewport) -> bool {
        self.top >= 0.0
            && self.left >= 0.0
            && self.bottom <= f64::from(viewport.height)
            && self.right <= f64::from(viewport.width)
    }
}

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Viewport width
    pub width: u32,
    /// Viewport height
    pub height: u32,
}

impl Viewport {
    /// Create a new viewport
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A live reference to a single located node.
///
/// Valid only within the document generation it was found in; a navigation or
/// re-render invalidates it. Callers must re-locate rather than cache handles
/// across waits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Driver-assigned node identifier
    pub id: String,
    /// Element tag name
    pub tag_name: String,
    /// Bounding box if rendered and visible
    pub bounding_box: Option<BoundingBox>,
    /// Whether the element is enabled for interaction
    pub enabled: bool,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
            bounding_box: None,
            enabled: true,
        }
    }

    /// Check if the element is rendered and visible
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.bounding_box.is_some()
    }
}

/// Abstract synchronous browser session.
///
/// One session is exclusively owned by the currently-executing scenario; no
/// method is safe to call concurrently against the same session. All methods
/// take `&self` so implementations carry their own interior mutability.
pub trait BrowserDriver {
    /// Navigate the session to a URL
    fn navigate(&self, url: &str) -> NavegarResult<()>;

    /// Find the first element matching the locator.
    ///
    /// # Errors
    ///
    /// Returns [`NavegarError::ElementNotFound`](crate::result::NavegarError::ElementNotFound)
    /// when nothing matches.
    fn find_element(&self, locator: &Locator) -> NavegarResult<ElementHandle>;

    /// Find all elements matching the locator (possibly empty)
    fn find_elements(&self, locator: &Locator) -> NavegarResult<Vec<ElementHandle>>;

    /// Execute a script in the document, with JSON-encoded arguments
    fn execute_script(&self, script: &str, args: &[Value]) -> NavegarResult<Value>;

    /// Current document location
    fn current_url(&self) -> NavegarResult<String>;

    /// Current viewport dimensions
    fn viewport(&self) -> NavegarResult<Viewport>;

    /// Scroll the document so the element becomes fully visible
    fn scroll_into_view(&self, element: &ElementHandle) -> NavegarResult<()>;

    /// Click the element
    fn click(&self, element: &ElementHandle) -> NavegarResult<()>;

    /// Clear the element's current value
    fn clear(&self, element: &ElementHandle) -> NavegarResult<()>;

    /// Type text into the element
    fn type_text(&self, element: &ElementHandle, text: &str) -> NavegarResult<()>;

    /// Rendered text content of the element
    fn text(&self, element: &ElementHandle) -> NavegarResult<String>;

    /// Whether the element is currently rendered and visible.
    ///
    /// # Errors
    ///
    /// Errors when the handle is stale (found in an earlier document
    /// generation).
    fn is_displayed(&self, element: &ElementHandle) -> NavegarResult<bool>;

    /// Shut the session down and release the browser
    fn quit(&self) -> NavegarResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod bounding_box_tests {
        use super::*;

        const VIEWPORT: Viewport = Viewport::new(1920, 1080);

        #[test]
        fn test_fully_within() {
            let bbox = BoundingBox::new(10.0, 10.0, 500.0, 500.0);
            assert!(bbox.fully_within(&VIEWPORT));
        }

        #[test]
        fn test_above_viewport() {
            let bbox = BoundingBox::new(-5.0, 10.0, 500.0, 500.0);
            assert!(!bbox.fully_within(&VIEWPORT));
        }

        #[test]
        fn test_left_of_viewport() {
            let bbox = BoundingBox::new(10.0, -1.0, 500.0, 500.0);
            assert!(!bbox.fully_within(&VIEWPORT));
        }

        #[test]
        fn test_below_viewport() {
            let bbox = BoundingBox::new(900.0, 10.0, 1081.0, 500.0);
            assert!(!bbox.fully_within(&VIEWPORT));
        }

        #[test]
        fn test_right_of_viewport() {
            let bbox = BoundingBox::new(10.0, 1800.0, 500.0, 1921.0);
            assert!(!bbox.fully_within(&VIEWPORT));
        }

        #[test]
        fn test_edges_inclusive() {
            let bbox = BoundingBox::new(0.0, 0.0, 1080.0, 1920.0);
            assert!(bbox.fully_within(&VIEWPORT));
        }
    }

    mod element_handle_tests {
        use super::*;

        #[test]
        fn test_handle_without_box_is_not_visible() {
            let handle = ElementHandle::new("e1", "div");
            assert!(!handle.is_visible());
        }

        #[test]
        fn test_handle_with_box_is_visible() {
            let mut handle = ElementHandle::new("e1", "button");
            handle.bounding_box = Some(BoundingBox::new(0.0, 0.0, 40.0, 120.0));
            assert!(handle.is_visible());
            assert!(handle.enabled);
        }
    }
}
