use rust_decimal::Decimal;

use crate::domain::identity::ItemId;
use crate::domain::lesson::Lesson;
use crate::pricing::Purchasable;

/// Ordered collection of lessons. A course never counts as a module.
#[derive(Clone, Debug, PartialEq)]
pub struct Course {
    id: ItemId,
    title: String,
    lessons: Vec<Lesson>,
}

impl Course {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_lessons(title, Vec::new())
    }

    /// Builds a course from `lessons`, dropping any lesson whose identity repeats.
    pub fn with_lessons(title: impl Into<String>, lessons: Vec<Lesson>) -> Self {
        let mut course = Self { id: ItemId::new(), title: title.into(), lessons: Vec::new() };
        for lesson in lessons {
            course.add_lesson(lesson);
        }
        course
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn lesson_mut(&mut self, id: &ItemId) -> Option<&mut Lesson> {
        self.lessons.iter_mut().find(|lesson| &lesson.id() == id)
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.lessons.iter().any(|lesson| &lesson.id() == id)
    }

    /// Returns `false` and leaves the course untouched when the lesson is already present.
    pub fn add_lesson(&mut self, lesson: Lesson) -> bool {
        if self.contains(&lesson.id()) {
            return false;
        }
        self.lessons.push(lesson);
        true
    }

    pub fn remove_lesson(&mut self, id: &ItemId) -> bool {
        let before = self.lessons.len();
        self.lessons.retain(|lesson| &lesson.id() != id);
        self.lessons.len() != before
    }
}

impl Purchasable for Course {
    fn id(&self) -> ItemId {
        self.id
    }

    fn price(&self) -> Decimal {
        self.lessons.iter().map(Purchasable::price).sum()
    }

    fn duration(&self) -> Decimal {
        self.lessons.iter().map(Purchasable::duration).sum()
    }

    fn module_count(&self) -> u32 {
        0
    }

    fn describe(&self, indent: &str) -> String {
        let mut out = format!(
            "{indent}Course: {}\n{indent}Course Price: ${:.2}\n{indent}Total Duration: {:.2} hours\n{indent}Lessons:\n",
            self.title,
            self.price(),
            self.duration()
        );
        let nested = format!("{indent}  ");
        for (position, lesson) in self.lessons.iter().enumerate() {
            out.push_str(&format!("{indent}Lesson {}:\n", position + 1));
            out.push_str(&lesson.describe(&nested));
        }
        out
    }
}
