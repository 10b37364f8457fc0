use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use edulearn_core::config::AppConfig;
use edulearn_core::{
    complete_checkout, wrap_with_add_ons, AddOnRates, AddOnSelection, ApplicationError, Cart,
    Catalog, CheckoutSummary, Customer, DomainError, ItemId, Purchasable,
    StandardCheckoutEngine,
};
use serde::Serialize;
use tracing::warn;

use crate::commands::CommandResult;
use crate::QuoteArgs;

/// One `--item` argument: a 1-based catalog path plus the add-ons to wrap it in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemSpec {
    pub module: usize,
    pub course: Option<usize>,
    pub lesson: Option<usize>,
    pub add_ons: AddOnSelection,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (path, selection) = match value.split_once(':') {
            Some((path, selection)) => (path, selection),
            None => (value, "none"),
        };
        let add_ons = selection.parse::<AddOnSelection>().map_err(|error| error.to_string())?;

        let numbers = path
            .split('.')
            .map(|segment| {
                segment
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|number| *number > 0)
                    .ok_or_else(|| {
                        format!("invalid item path `{path}`: segments must be numbers >= 1")
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        match numbers.as_slice() {
            [module] => Ok(Self { module: *module, course: None, lesson: None, add_ons }),
            [module, course] => {
                Ok(Self { module: *module, course: Some(*course), lesson: None, add_ons })
            }
            [module, course, lesson] => Ok(Self {
                module: *module,
                course: Some(*course),
                lesson: Some(*lesson),
                add_ons,
            }),
            _ => Err(format!("invalid item path `{path}`: expected module[.course[.lesson]]")),
        }
    }
}

impl fmt::Display for ItemSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.module)?;
        if let Some(course) = self.course {
            write!(f, ".{course}")?;
        }
        if let Some(lesson) = self.lesson {
            write!(f, ".{lesson}")?;
        }
        write!(f, ":{}", self.add_ons)
    }
}

#[derive(Debug, Serialize)]
struct QuotePayload<'a> {
    #[serde(flatten)]
    summary: &'a CheckoutSummary,
    skipped_duplicates: &'a [String],
}

pub fn run(config: &AppConfig, catalog: &Catalog, args: &QuoteArgs) -> CommandResult {
    match quote(config, catalog, args) {
        Ok(output) => CommandResult::rendered(output),
        Err(error) => CommandResult::from_error("quote", &error),
    }
}

fn quote(
    config: &AppConfig,
    catalog: &Catalog,
    args: &QuoteArgs,
) -> Result<String, ApplicationError> {
    let mut cart = Cart::new();
    let mut picked = HashSet::new();
    let mut skipped = Vec::new();
    for spec in &args.items {
        let (entity_id, item) = resolve_item(catalog, spec, &config.pricing.add_ons)?;
        // add-on wrappers are fresh identities, so repeats are caught on the catalog entity
        if !picked.insert(entity_id) || !cart.add_item(item) {
            warn!(
                event_name = "cli.quote.duplicate_skipped",
                item = %spec,
                "duplicate cart item skipped"
            );
            skipped.push(spec.to_string());
        }
    }

    let details = cart.describe("");
    let customer = Customer::new(args.name.clone(), args.student, args.developing_country);
    let engine = StandardCheckoutEngine::new(config.pricing.discounts.clone());
    let summary = complete_checkout(&engine, &mut cart, &customer)?;

    if args.json {
        let payload = QuotePayload { summary: &summary, skipped_duplicates: &skipped };
        return serde_json::to_string_pretty(&payload)
            .map_err(|error| DomainError::InvariantViolation(error.to_string()).into());
    }

    Ok(render_human(&details, &summary, &skipped))
}

/// Clones the selected catalog entity, keeping its identity, and wraps it in add-ons.
fn resolve_item(
    catalog: &Catalog,
    spec: &ItemSpec,
    rates: &AddOnRates,
) -> Result<(ItemId, Box<dyn Purchasable>), DomainError> {
    let module = catalog.select(spec.module - 1)?;
    let Some(course_number) = spec.course else {
        return Ok((module.id(), wrap_with_add_ons(module.clone(), spec.add_ons, rates)));
    };

    let course = module
        .courses()
        .get(course_number - 1)
        .ok_or(DomainError::CatalogSelection { index: course_number - 1, len: module.len() })?;
    let Some(lesson_number) = spec.lesson else {
        return Ok((course.id(), wrap_with_add_ons(course.clone(), spec.add_ons, rates)));
    };

    let lesson = course
        .lessons()
        .get(lesson_number - 1)
        .ok_or(DomainError::CatalogSelection { index: lesson_number - 1, len: course.len() })?;
    Ok((lesson.id(), wrap_with_add_ons(lesson.clone(), spec.add_ons, rates)))
}

fn render_human(details: &str, summary: &CheckoutSummary, skipped: &[String]) -> String {
    let mut lines = vec![
        "ORDER SUMMARY".to_string(),
        format!("Customer: {}", summary.customer.name),
        String::new(),
        details.trim_end().to_string(),
        String::new(),
        format!("Subtotal: ${:.2}", summary.subtotal),
        format!("Total Duration: {:.2} hours", summary.duration),
        format!("Modules: {}", summary.module_count),
        "Discounts Applied:".to_string(),
    ];

    if summary.applied_discounts.is_empty() {
        lines.push("  (none)".to_string());
    }
    lines.extend(summary.applied_discounts.iter().map(|discount| {
        format!(
            "  - {} ({}): -${:.2}",
            discount.label, discount.condition, discount.effective_amount
        )
    }));

    lines.push(format!("Final Price: ${:.2}", summary.final_price));
    if summary.has_savings() {
        lines.push(format!("You save: ${:.2}", summary.savings));
    }
    if !skipped.is_empty() {
        lines.push(format!("Skipped duplicates: {}", skipped.join(", ")));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use edulearn_core::config::AppConfig;
    use edulearn_core::{AddOnSelection, EligibilityMode};

    use super::{run, ItemSpec};
    use crate::seed::default_catalog;
    use crate::QuoteArgs;

    fn args(items: &[&str], student: bool, developing_country: bool) -> QuoteArgs {
        QuoteArgs {
            items: items.iter().map(|item| item.parse().expect("item spec")).collect(),
            name: "Amina".to_string(),
            student,
            developing_country,
            json: false,
        }
    }

    #[test]
    fn item_spec_parses_paths_and_add_ons() {
        let spec: ItemSpec = "1.2.3:both".parse().expect("spec");
        assert_eq!(spec.module, 1);
        assert_eq!(spec.course, Some(2));
        assert_eq!(spec.lesson, Some(3));
        assert_eq!(spec.add_ons, AddOnSelection::Both);

        let bare: ItemSpec = "3".parse().expect("spec");
        assert_eq!(bare.course, None);
        assert_eq!(bare.add_ons, AddOnSelection::None);
        assert_eq!(bare.to_string(), "3:none");
    }

    #[test]
    fn item_spec_rejects_bad_input() {
        for value in ["0", "1.x", "1.1.1.1", "2:gold", ""] {
            assert!(value.parse::<ItemSpec>().is_err(), "{value} should be rejected");
        }
    }

    #[test]
    fn prices_add_ons_and_all_three_discounts() {
        let result = run(
            &AppConfig::default(),
            &default_catalog(),
            &args(&["1:both", "3"], true, true),
        );

        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("Subtotal: $725.00"));
        assert!(result.output.contains("Total Duration: 33.00 hours"));
        assert!(result.output.contains("Modules: 2"));
        assert!(result.output.contains("  - Special Discount (duration >= 5.0 hours): -$12.00"));
        assert!(result
            .output
            .contains("  - Developing Country Student Discount (student from a developing country): -$10.00"));
        assert!(result.output.contains("  - Multi-Module Discount (2+ modules): -$15.00"));
        assert!(result.output.contains("Final Price: $688.00"));
        assert!(result.output.contains("You save: $37.00"));
    }

    #[test]
    fn single_short_lesson_gets_no_discount() {
        let result =
            run(&AppConfig::default(), &default_catalog(), &args(&["1.1.1"], false, false));

        assert!(result.output.contains("Subtotal: $20.00"));
        assert!(result.output.contains("  (none)"));
        assert!(result.output.contains("Final Price: $20.00"));
        assert!(!result.output.contains("You save"));
    }

    #[test]
    fn repeated_item_is_skipped_not_priced_twice() {
        let result =
            run(&AppConfig::default(), &default_catalog(), &args(&["2", "2:mentor"], false, false));

        assert!(result.output.contains("Subtotal: $225.00"));
        assert!(result.output.contains("Skipped duplicates: 2:mentor"));
    }

    #[test]
    fn cart_only_mode_skips_discounts_on_cart_with_one_module() {
        let mut config = AppConfig::default();
        config.pricing.discounts.eligibility = EligibilityMode::CartOnly;

        let result = run(&config, &default_catalog(), &args(&["3"], false, false));

        assert!(result.output.contains("Final Price: $383.00"));
    }

    #[test]
    fn unknown_course_is_a_selection_error() {
        let result = run(&AppConfig::default(), &default_catalog(), &args(&["1.9"], false, false));

        assert_eq!(result.exit_code, 3);
        assert!(result.output.contains("\"error_class\":\"selection\""));
    }
}
