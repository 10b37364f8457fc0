use rust_decimal::Decimal;

use crate::domain::course::Course;
use crate::domain::identity::ItemId;
use crate::pricing::Purchasable;

/// Ordered collection of courses, counted as exactly one module by the multi-module rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    id: ItemId,
    title: String,
    courses: Vec<Course>,
}

impl Module {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_courses(title, Vec::new())
    }

    /// Builds a module from `courses`, dropping any course whose identity repeats.
    pub fn with_courses(title: impl Into<String>, courses: Vec<Course>) -> Self {
        let mut module = Self { id: ItemId::new(), title: title.into(), courses: Vec::new() };
        for course in courses {
            module.add_course(course);
        }
        module
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course_mut(&mut self, id: &ItemId) -> Option<&mut Course> {
        self.courses.iter_mut().find(|course| &course.id() == id)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.courses.iter().any(|course| &course.id() == id)
    }

    pub fn add_course(&mut self, course: Course) -> bool {
        if self.contains(&course.id()) {
            return false;
        }
        self.courses.push(course);
        true
    }

    pub fn remove_course(&mut self, id: &ItemId) -> bool {
        let before = self.courses.len();
        self.courses.retain(|course| &course.id() != id);
        self.courses.len() != before
    }
}

impl Purchasable for Module {
    fn id(&self) -> ItemId {
        self.id
    }

    fn price(&self) -> Decimal {
        self.courses.iter().map(Purchasable::price).sum()
    }

    fn duration(&self) -> Decimal {
        self.courses.iter().map(Purchasable::duration).sum()
    }

    fn module_count(&self) -> u32 {
        1
    }

    fn describe(&self, indent: &str) -> String {
        let mut out = format!(
            "{indent}Module: {}\n{indent}Total Price: ${:.2}\n{indent}Total Duration: {:.2} hours\n",
            self.title,
            self.price(),
            self.duration()
        );
        let nested = format!("{indent}  ");
        for (position, course) in self.courses.iter().enumerate() {
            out.push_str(&format!("{indent}Course {}:\n", position + 1));
            out.push_str(&course.describe(&nested));
            out.push('\n');
        }
        out
    }
}
