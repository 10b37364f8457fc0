//! The shared pricing capability and the pieces composed around it.
//!
//! Every catalog entity, the cart and every decorator implement [`Purchasable`], so a
//! checkout pipeline treats a bare lesson and a triply-decorated module the same way.

pub mod add_ons;
pub mod cart;
pub mod checkout;
pub mod discounts;

use std::fmt::Debug;

use rust_decimal::Decimal;

use crate::domain::identity::ItemId;

use self::cart::Cart;

pub trait Purchasable: Debug {
    fn id(&self) -> ItemId;

    fn price(&self) -> Decimal;

    /// Total hours of content.
    fn duration(&self) -> Decimal;

    /// Number of modules reachable under this node.
    fn module_count(&self) -> u32;

    /// Display-only rendering of this node and everything below it.
    fn describe(&self, indent: &str) -> String;

    /// `Some` only when this value is a cart, used by type-gated discount eligibility.
    fn as_cart(&self) -> Option<&Cart> {
        None
    }
}

impl<T: Purchasable + ?Sized> Purchasable for &T {
    fn id(&self) -> ItemId {
        (**self).id()
    }

    fn price(&self) -> Decimal {
        (**self).price()
    }

    fn duration(&self) -> Decimal {
        (**self).duration()
    }

    fn module_count(&self) -> u32 {
        (**self).module_count()
    }

    fn describe(&self, indent: &str) -> String {
        (**self).describe(indent)
    }

    fn as_cart(&self) -> Option<&Cart> {
        (**self).as_cart()
    }
}

impl<T: Purchasable + ?Sized> Purchasable for Box<T> {
    fn id(&self) -> ItemId {
        (**self).id()
    }

    fn price(&self) -> Decimal {
        (**self).price()
    }

    fn duration(&self) -> Decimal {
        (**self).duration()
    }

    fn module_count(&self) -> u32 {
        (**self).module_count()
    }

    fn describe(&self, indent: &str) -> String {
        (**self).describe(indent)
    }

    fn as_cart(&self) -> Option<&Cart> {
        (**self).as_cart()
    }
}

pub(crate) fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::lesson::Lesson;
    use crate::pricing::{cart::Cart, floor_at_zero, Purchasable};

    #[test]
    fn references_and_boxes_delegate_to_the_value() {
        let lesson = Lesson::new("Thread Basics", Decimal::new(25, 0), Decimal::new(3, 0));
        let boxed: Box<dyn Purchasable> = Box::new(lesson.clone());
        let borrowed = &lesson;

        assert_eq!(boxed.id(), lesson.id());
        assert_eq!(boxed.price(), Decimal::new(75, 0));
        assert_eq!(borrowed.duration(), Decimal::new(3, 0));
        assert_eq!(borrowed.module_count(), 0);
        assert_eq!(boxed.describe("  "), lesson.describe("  "));
    }

    #[test]
    fn cart_is_visible_through_references_only_as_itself() {
        let cart = Cart::new();
        let lesson = Lesson::new("HTML Basics", Decimal::new(10, 0), Decimal::new(2, 0));

        assert!((&cart).as_cart().is_some());
        assert!(Box::new(Cart::new()).as_cart().is_some());
        assert!(lesson.as_cart().is_none());
    }

    #[test]
    fn floor_clamps_negative_values() {
        assert_eq!(floor_at_zero(Decimal::new(-15, 0)), Decimal::ZERO);
        assert_eq!(floor_at_zero(Decimal::new(125, 0)), Decimal::new(125, 0));
    }
}
