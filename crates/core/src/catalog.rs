use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::module::Module;
use crate::errors::DomainError;
use crate::pricing::Purchasable;

/// One row of the top-level listing shown to a shopper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub index: usize,
    pub title: String,
    pub price: Decimal,
    pub duration: Decimal,
    pub course_count: usize,
}

/// Top-level modules available for purchase, in display order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    modules: Vec<Module>,
}

impl Catalog {
    pub fn new(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.modules
            .iter()
            .enumerate()
            .map(|(index, module)| CatalogEntry {
                index,
                title: module.title().to_string(),
                price: module.price(),
                duration: module.duration(),
                course_count: module.len(),
            })
            .collect()
    }

    /// Zero-based selection; the returned module keeps its catalog identity.
    pub fn select(&self, index: usize) -> Result<&Module, DomainError> {
        self.modules
            .get(index)
            .ok_or(DomainError::CatalogSelection { index, len: self.modules.len() })
    }

    pub fn find(&self, title: &str) -> Option<&Module> {
        self.modules.iter().find(|module| module.title().eq_ignore_ascii_case(title))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::Catalog;
    use crate::domain::{course::Course, lesson::Lesson, module::Module};
    use crate::errors::DomainError;
    use crate::pricing::{cart::Cart, Purchasable};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Module::with_courses(
                "Web Development Fundamentals",
                vec![Course::with_lessons(
                    "HTML & CSS Essentials",
                    vec![Lesson::new("HTML Basics", Decimal::new(10, 0), Decimal::new(2, 0))],
                )],
            ),
            Module::new("Data Science Essentials"),
        ])
    }

    #[test]
    fn entries_list_modules_in_order() {
        let entries = catalog().entries();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].index, 0);
        assert_eq!(entries[0].title, "Web Development Fundamentals");
        assert_eq!(entries[0].price, Decimal::new(20, 0));
        assert_eq!(entries[0].course_count, 1);
        assert_eq!(entries[1].price, Decimal::ZERO);
    }

    #[test]
    fn select_out_of_range_is_reported() {
        let error = catalog().select(2).expect_err("only two modules");
        assert_eq!(error, DomainError::CatalogSelection { index: 2, len: 2 });
    }

    #[test]
    fn selecting_the_same_module_twice_is_a_cart_duplicate() {
        let catalog = catalog();
        let mut cart = Cart::new();

        let first = catalog.select(0).expect("in range").clone();
        let again = catalog.select(0).expect("in range").clone();
        assert!(cart.add_item(Box::new(first)));
        assert!(!cart.add_item(Box::new(again)));
    }

    #[test]
    fn find_ignores_ascii_case() {
        let catalog = catalog();
        let module = catalog.find("data science essentials").expect("present");
        assert_eq!(module.module_count(), 1);
        assert!(catalog.find("Cooking").is_none());
    }
}
