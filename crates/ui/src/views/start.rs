use marathon_core::model::Course;
use marathon_core::rules::{CORRECT_POINTS, STAMINA_COST, STAMINA_RECOVERY, WRONG_PENALTY};

use super::banner;

#[must_use]
pub fn render_start(course: &Course) -> String {
    let stations = course.aid_stations().count();
    [
        banner(course.name()),
        format!(
            "{} course, {} questions, {stations} aid stations.",
            course.length(),
            course.len()
        ),
        format!(
            "Right answers: +{CORRECT_POINTS} points, +{STAMINA_RECOVERY} stamina. \
             Wrong answers: -{WRONG_PENALTY} points, -{STAMINA_COST} stamina."
        ),
        "Run out of stamina and your race is over.".to_string(),
        String::new(),
    ]
    .join("\n")
}
