//! # Navegar
//!
//! Page-object browser testing toolkit: a typed interaction engine over a
//! pluggable browser driver, page models composed from it, and scenario
//! plumbing (session lifecycle, tabular data input, record logging).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ Scenario (session, data source, record log) │
//! ├─────────────────────────────────────────────┤
//! │ Page models (HomePage, PayWithLinkPage)     │
//! ├─────────────────────────────────────────────┤
//! │ Interactor: wait / scroll / fill / click    │
//! ├─────────────────────────────────────────────┤
//! │ BrowserDriver trait (MockDriver in tests)   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Element-mutating operations funnel through one deterministic sequence
//! (visibility wait, viewport-aware scroll, clickability wait, action), and
//! every failure is a typed error naming the locator involved.
//!
//! ## Example
//!
//! ```
//! use navegar::{InteractOptions, Locator, MockDriver, MockElement, Session};
//!
//! let driver = MockDriver::new();
//! driver.insert(MockElement::new(Locator::id("email"), "input"));
//!
//! let session = Session::with_options(
//!     driver,
//!     InteractOptions::new().with_timeout(500).with_poll_interval(10),
//! );
//! let engine = session.interactor();
//! engine.fill_field(&Locator::id("email"), "ayse@example.com")?;
//! # Ok::<(), navegar::NavegarError>(())
//! ```

#![warn(missing_docs)]

pub mod data;
pub mod driver;
pub mod interact;
pub mod locator;
pub mod mock;
pub mod page;
pub mod pages;
pub mod record;
pub mod result;
pub mod session;

pub use data::read_first_row;
pub use driver::{BoundingBox, BrowserDriver, ElementHandle, Viewport};
pub use interact::{InteractOptions, Interactor};
pub use locator::{Locator, Selector};
pub use mock::{MockDriver, MockElement};
pub use page::PageModel;
pub use pages::{
    ContactData, HomePage, PayWithLinkPage, Section, HOME_URL, MERCHANT_SIGNUP_URL,
    PAY_WITH_LINK_URL,
};
pub use record::{parse_reference, RecordLog};
pub use result::{NavegarError, NavegarResult};
pub use session::{init_tracing, Session};
