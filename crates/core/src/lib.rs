pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod pricing;

pub use catalog::{Catalog, CatalogEntry};
pub use domain::course::Course;
pub use domain::customer::Customer;
pub use domain::identity::ItemId;
pub use domain::lesson::Lesson;
pub use domain::module::Module;
pub use errors::{ApplicationError, DomainError};
pub use pricing::add_ons::{wrap_with_add_ons, AddOn, AddOnKind, AddOnRates, AddOnSelection};
pub use pricing::cart::Cart;
pub use pricing::checkout::{
    build_checkout_chain, complete_checkout, AppliedDiscount, CheckoutEngine, CheckoutSummary,
    StandardCheckoutEngine,
};
pub use pricing::discounts::{
    Discount, DiscountKind, DiscountPolicy, DiscountRule, EligibilityMode,
};
pub use pricing::Purchasable;
