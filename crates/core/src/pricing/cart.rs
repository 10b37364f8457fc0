use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::identity::ItemId;
use crate::errors::DomainError;
use crate::pricing::Purchasable;

/// Insertion-ordered collection of top-level purchasable items.
#[derive(Debug, Default)]
pub struct Cart {
    id: ItemId,
    items: Vec<Box<dyn Purchasable>>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Box<dyn Purchasable>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| &item.id() == id)
    }

    /// Returns `false` when an item with the same identity is already in the cart.
    pub fn add_item(&mut self, item: Box<dyn Purchasable>) -> bool {
        let item_id = item.id();
        if self.contains(&item_id) {
            debug!(
                event_name = "pricing.cart.duplicate_rejected",
                cart_id = %self.id,
                item_id = %item_id,
                "item already present in cart"
            );
            return false;
        }

        self.items.push(item);
        debug!(
            event_name = "pricing.cart.item_added",
            cart_id = %self.id,
            item_id = %item_id,
            item_count = self.items.len(),
            "item added to cart"
        );
        true
    }

    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id() != id);
        self.items.len() != before
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Box<dyn Purchasable>, DomainError> {
        if index >= self.items.len() {
            return Err(DomainError::IndexOutOfRange { index, len: self.items.len() });
        }
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
        debug!(event_name = "pricing.cart.cleared", cart_id = %self.id, "cart cleared");
    }
}

impl Purchasable for Cart {
    fn id(&self) -> ItemId {
        self.id
    }

    fn price(&self) -> Decimal {
        self.items.iter().map(|item| item.price()).sum()
    }

    fn duration(&self) -> Decimal {
        self.items.iter().map(|item| item.duration()).sum()
    }

    fn module_count(&self) -> u32 {
        self.items.iter().map(|item| item.module_count()).sum()
    }

    fn describe(&self, indent: &str) -> String {
        let mut out = format!("{indent}Cart Details:\n");
        let nested = format!("{indent}  ");
        for (position, item) in self.items.iter().enumerate() {
            out.push_str(&format!("{indent}Item {}:\n", position + 1));
            out.push_str(&item.describe(&nested));
            out.push_str(&format!("{indent}-------------------\n"));
        }
        out.push_str(&format!("{indent}Total Price: ${:.2}\n", self.price()));
        out.push_str(&format!("{indent}Total Duration: {:.2} hours\n", self.duration()));
        out
    }

    fn as_cart(&self) -> Option<&Cart> {
        Some(self)
    }
}
