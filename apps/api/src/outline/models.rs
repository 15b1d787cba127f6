//! The intended shape of a generated course outline.
//!
//! The endpoint only enforces this shape in strict validation mode; see
//! `validation`.

use serde::{Deserialize, Serialize};

/// Advisory module count the system prompt asks for.
pub const EXPECTED_MODULES: std::ops::RangeInclusive<usize> = 5..=7;
/// Advisory lesson count per module.
pub const EXPECTED_LESSONS: std::ops::RangeInclusive<usize> = 3..=4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseOutline {
    pub course_title: String,
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub title: String,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl CourseOutline {
    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }
}
