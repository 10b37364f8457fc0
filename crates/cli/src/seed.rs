//! Demo catalog loaded by every command.

use edulearn_core::{Catalog, Course, Lesson, Module};
use rust_decimal::Decimal;

pub fn default_catalog() -> Catalog {
    Catalog::new(vec![web_development(), data_science(), advanced_java()])
}

fn web_development() -> Module {
    Module::with_courses(
        "Web Development Fundamentals",
        vec![
            course(
                "HTML & CSS Essentials",
                &[("HTML Basics", 100, 20), ("CSS Styling", 150, 30), ("Responsive Design", 120, 25)],
            ),
            course(
                "JavaScript Mastery",
                &[
                    ("JS Fundamentals", 200, 30),
                    ("DOM Manipulation", 180, 25),
                    ("Async Programming", 250, 40),
                ],
            ),
        ],
    )
}

fn data_science() -> Module {
    Module::with_courses(
        "Data Science Essentials",
        vec![
            course(
                "Python for Data Science",
                &[
                    ("Python Basics", 150, 20),
                    ("NumPy & Pandas", 200, 30),
                    ("Data Visualization", 180, 25),
                ],
            ),
            course(
                "Statistics & Probability",
                &[("Descriptive Statistics", 150, 20), ("Hypothesis Testing", 200, 30)],
            ),
        ],
    )
}

fn advanced_java() -> Module {
    Module::with_courses(
        "Advanced Java Programming",
        vec![
            course(
                "Concurrency and Multithreading",
                &[("Thread Basics", 250, 30), ("Synchronization", 300, 40)],
            ),
            course(
                "Design Patterns in Java",
                &[
                    ("Creational Patterns", 200, 25),
                    ("Structural Patterns", 220, 30),
                    ("Behavioral Patterns", 240, 35),
                ],
            ),
        ],
    )
}

/// Rates and hours are given in tenths.
fn course(title: &str, lessons: &[(&str, i64, i64)]) -> Course {
    Course::with_lessons(
        title,
        lessons
            .iter()
            .map(|(name, rate, hours)| {
                Lesson::new(*name, Decimal::new(*rate, 1), Decimal::new(*hours, 1))
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use edulearn_core::Purchasable;
    use rust_decimal::Decimal;

    use super::default_catalog;

    #[test]
    fn seeds_three_modules_in_menu_order() {
        let titles =
            default_catalog().entries().into_iter().map(|entry| entry.title).collect::<Vec<_>>();
        assert_eq!(
            titles,
            vec![
                "Web Development Fundamentals",
                "Data Science Essentials",
                "Advanced Java Programming"
            ]
        );
    }

    #[test]
    fn seeded_totals_are_exact() {
        let catalog = default_catalog();
        let prices = catalog.modules().iter().map(|module| module.price()).collect::<Vec<_>>();
        let hours = catalog.modules().iter().map(|module| module.duration()).collect::<Vec<_>>();

        assert_eq!(prices, vec![Decimal::new(300, 0), Decimal::new(225, 0), Decimal::new(395, 0)]);
        assert_eq!(hours, vec![Decimal::new(170, 1), Decimal::new(125, 1), Decimal::new(160, 1)]);
    }
}
