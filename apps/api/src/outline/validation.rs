//! Shape check for model output against `CourseOutline`.
//!
//! Problems make an outline unusable (missing title, wrong types). Warnings
//! only flag departures from the advisory module/lesson counts.

use serde_json::Value;

use crate::outline::models::{CourseOutline, EXPECTED_LESSONS, EXPECTED_MODULES};

#[derive(Debug, Clone, Default)]
pub struct OutlineReport {
    pub problems: Vec<String>,
    pub warnings: Vec<String>,
    /// Typed view of the outline, present only when there are no problems.
    pub outline: Option<CourseOutline>,
}

impl OutlineReport {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Checks a parsed JSON value against the `CourseOutline` shape.
///
/// Unknown extra fields are allowed at every level.
pub fn validate_outline(value: &Value) -> OutlineReport {
    let mut report = OutlineReport::default();

    let Some(root) = value.as_object() else {
        report.problems.push("outline: expected a JSON object".to_string());
        return report;
    };

    check_title(root.get("course_title"), "course_title", &mut report.problems);

    match root.get("modules").and_then(Value::as_array) {
        None => report
            .problems
            .push("modules: missing or not an array".to_string()),
        Some(modules) => {
            if !EXPECTED_MODULES.contains(&modules.len()) {
                report.warnings.push(format!(
                    "modules: {} modules, expected {}-{}",
                    modules.len(),
                    EXPECTED_MODULES.start(),
                    EXPECTED_MODULES.end()
                ));
            }
            for (i, module) in modules.iter().enumerate() {
                check_module(module, i, &mut report);
            }
        }
    }

    if report.is_valid() {
        match serde_json::from_value::<CourseOutline>(value.clone()) {
            Ok(outline) => report.outline = Some(outline),
            Err(e) => report.problems.push(format!("outline: {e}")),
        }
    }

    report
}

fn check_module(module: &Value, index: usize, report: &mut OutlineReport) {
    let path = format!("modules[{index}]");
    let Some(fields) = module.as_object() else {
        report.problems.push(format!("{path}: expected an object"));
        return;
    };

    check_title(fields.get("title"), &format!("{path}.title"), &mut report.problems);

    let Some(lessons) = fields.get("lessons").and_then(Value::as_array) else {
        report
            .problems
            .push(format!("{path}.lessons: missing or not an array"));
        return;
    };

    if !EXPECTED_LESSONS.contains(&lessons.len()) {
        report.warnings.push(format!(
            "{path}.lessons: {} lessons, expected {}-{}",
            lessons.len(),
            EXPECTED_LESSONS.start(),
            EXPECTED_LESSONS.end()
        ));
    }

    for (j, lesson) in lessons.iter().enumerate() {
        let lesson_path = format!("{path}.lessons[{j}]");
        let Some(lesson_fields) = lesson.as_object() else {
            report.problems.push(format!("{lesson_path}: expected an object"));
            continue;
        };
        check_title(
            lesson_fields.get("title"),
            &format!("{lesson_path}.title"),
            &mut report.problems,
        );
        match lesson_fields.get("summary") {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => report
                .problems
                .push(format!("{lesson_path}.summary: expected a string")),
        }
    }
}

fn check_title(value: Option<&Value>, path: &str, problems: &mut Vec<String>) {
    match value.and_then(Value::as_str) {
        Some(title) if !title.trim().is_empty() => {}
        _ => problems.push(format!("{path}: missing or empty")),
    }
}
