use edulearn_core::Catalog;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct CatalogRow {
    number: usize,
    title: String,
    price: Decimal,
    duration_hours: Decimal,
    course_count: usize,
}

pub fn run(catalog: &Catalog, json_output: bool) -> CommandResult {
    let rows = catalog
        .entries()
        .into_iter()
        .map(|entry| CatalogRow {
            number: entry.index + 1,
            title: entry.title,
            price: entry.price,
            duration_hours: entry.duration,
            course_count: entry.course_count,
        })
        .collect::<Vec<_>>();

    if json_output {
        return match serde_json::to_string_pretty(&rows) {
            Ok(output) => CommandResult::rendered(output),
            Err(error) => CommandResult::failure("catalog", "serialization", error.to_string(), 1),
        };
    }

    CommandResult::rendered(render_human(&rows))
}

fn render_human(rows: &[CatalogRow]) -> String {
    if rows.is_empty() {
        return "catalog is empty".to_string();
    }

    let mut lines = vec!["AVAILABLE MODULES".to_string()];
    lines.extend(rows.iter().map(|row| {
        format!(
            "{}. {} - ${:.2} ({:.2} hours, {} course(s))",
            row.number, row.title, row.price, row.duration_hours, row.course_count
        )
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use edulearn_core::Catalog;

    use super::run;
    use crate::seed::default_catalog;

    #[test]
    fn human_listing_is_one_based() {
        let result = run(&default_catalog(), false);

        assert_eq!(result.exit_code, 0);
        assert!(result
            .output
            .contains("1. Web Development Fundamentals - $300.00 (17.00 hours, 2 course(s))"));
        assert!(result.output.contains("3. Advanced Java Programming"));
    }

    #[test]
    fn empty_catalog_says_so() {
        assert_eq!(run(&Catalog::default(), false).output, "catalog is empty");
    }
}
