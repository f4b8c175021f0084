use super::models::{Course, MenuItem};

/// Items belonging to `course`, in their original order; every item when
/// no course is given.
pub fn apply(items: &[MenuItem], course: Option<Course>) -> Vec<&MenuItem> {
    match course {
        None => items.iter().collect(),
        Some(course) => items.iter().filter(|i| i.course() == course).collect(),
    }
}

/// Which course a guest has chosen to look at. Starts out showing "All".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CourseSelection {
    selected: Option<Course>,
}

impl CourseSelection {
    pub fn new() -> Self {
        CourseSelection::default()
    }

    pub fn select_all(&mut self) {
        self.selected = None;
    }

    pub fn select_course(&mut self, course: Course) {
        self.selected = Some(course);
    }

    pub fn selected(&self) -> Option<Course> {
        self.selected
    }

    pub fn label(&self) -> &'static str {
        self.selected.map(|c| c.name()).unwrap_or("All")
    }

    pub fn apply<'a>(&self, items: &'a [MenuItem]) -> Vec<&'a MenuItem> {
        apply(items, self.selected)
    }
}
