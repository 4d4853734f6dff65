//! Concrete page models for the merchant marketing site.

mod home;
mod pay_with_link;

pub use home::{HomePage, Section, HOME_URL};
pub use pay_with_link::{ContactData, PayWithLinkPage, MERCHANT_SIGNUP_URL, PAY_WITH_LINK_URL};
