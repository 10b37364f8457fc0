use rust_decimal::Decimal;

use crate::domain::identity::ItemId;
use crate::pricing::Purchasable;

/// Terminal priceable unit.
///
/// Rates and durations are expected to be non-negative; callers own that precondition.
#[derive(Clone, Debug, PartialEq)]
pub struct Lesson {
    id: ItemId,
    title: String,
    price_per_hour: Decimal,
    duration_hours: Decimal,
}

impl Lesson {
    pub fn new(title: impl Into<String>, price_per_hour: Decimal, duration_hours: Decimal) -> Self {
        Self { id: ItemId::new(), title: title.into(), price_per_hour, duration_hours }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price_per_hour(&self) -> Decimal {
        self.price_per_hour
    }

    pub fn duration_hours(&self) -> Decimal {
        self.duration_hours
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_price_per_hour(&mut self, price_per_hour: Decimal) {
        self.price_per_hour = price_per_hour;
    }

    pub fn set_duration_hours(&mut self, duration_hours: Decimal) {
        self.duration_hours = duration_hours;
    }
}

impl Purchasable for Lesson {
    fn id(&self) -> ItemId {
        self.id
    }

    fn price(&self) -> Decimal {
        self.price_per_hour * self.duration_hours
    }

    fn duration(&self) -> Decimal {
        self.duration_hours
    }

    fn module_count(&self) -> u32 {
        0
    }

    fn describe(&self, indent: &str) -> String {
        format!(
            "{indent}Lesson: {}\n{indent}Lesson Price: ${:.2}\n{indent}Duration: {:.2} hours\n",
            self.title,
            self.price(),
            self.duration_hours
        )
    }
}
