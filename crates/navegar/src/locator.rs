//! Locator abstraction for element selection.
//!
//! A [`Locator`] is an opaque descriptor (selector strategy + selector string)
//! identifying zero-or-more elements in a rendered document. Locators are
//! declared once per page model and re-resolved at call time, never bound to a
//! cached element: re-locating on every wait iteration is what guards against
//! stale references after a navigation or re-render.

use serde::{Deserialize, Serialize};

/// Selector strategy for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., `"button.primary"`)
    Css(String),
    /// XPath selector
    XPath(String),
    /// Element id attribute
    Id(String),
    /// Element name attribute
    Name(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a name-attribute selector
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Convert to a JavaScript query expression resolving the first match
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue")
            }
            Self::Id(id) => format!("document.getElementById({id:?})"),
            Self::Name(name) => format!("document.getElementsByName({name:?})[0]"),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css({s})"),
            Self::XPath(s) => write!(f, "xpath({s})"),
            Self::Id(s) => write!(f, "id({s})"),
            Self::Name(s) => write!(f, "name({s})"),
        }
    }
}

/// A locator for finding elements.
///
/// Immutable once built; cheap to clone. Its [`Display`](std::fmt::Display)
/// form is what interaction errors carry, so a failed scenario reports the
/// specific locator that failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    selector: Selector,
}

impl Locator {
    /// Create a locator from a selector
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self { selector }
    }

    /// Create a CSS locator
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(Selector::css(selector))
    }

    /// Create an XPath locator
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::new(Selector::xpath(selector))
    }

    /// Create an id locator
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::new(Selector::id(id))
    }

    /// Create a name-attribute locator
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::new(Selector::name(name))
    }

    /// Get the selector
    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Narrow a CSS locator to its 1-based nth structural match.
    ///
    /// Used for repeating items (carousel cards): the base locator counts the
    /// realized items, the indexed locator probes one of them.
    #[must_use]
    pub fn nth_of_type(&self, index: usize) -> Self {
        match &self.selector {
            Selector::Css(css) => Self::css(format!("{css}:nth-of-type({index})")),
            // Non-CSS strategies fall back to XPath positional indexing
            Selector::XPath(xp) => Self::xpath(format!("({xp})[{index}]")),
            Selector::Id(id) => Self::xpath(format!("(//*[@id='{id}'])[{index}]")),
            Selector::Name(name) => Self::xpath(format!("(//*[@name='{name}'])[{index}]")),
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.selector)
    }
}
