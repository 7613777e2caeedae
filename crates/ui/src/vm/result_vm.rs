use marathon_core::engine::{FinishReport, GameOverReport};
use marathon_core::rules::Accuracy;
use services::RunSummary;

use crate::vm::time_fmt::format_elapsed;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub title: String,
    pub lines: Vec<String>,
}

impl ResultVm {
    #[must_use]
    pub fn game_over(report: &GameOverReport, summary: Option<&RunSummary>) -> Self {
        let mut lines = vec![
            format!("You ran out of stamina at {}.", report.reached),
            format!(
                "Correct answers: {}",
                Accuracy::new(report.correct_count, report.total_answered)
            ),
            format!("Score: {}", report.score),
        ];
        push_run_lines(&mut lines, summary);
        Self {
            title: "Out of stamina".to_string(),
            lines,
        }
    }

    #[must_use]
    pub fn finished(
        report: &FinishReport,
        summary: Option<&RunSummary>,
        personal_best: Option<&RunSummary>,
    ) -> Self {
        let mut lines = vec![
            format!("Medal: {}", report.medal),
            format!("Score: {}", report.score),
            format!("Accuracy: {}", report.accuracy),
            format!("Stamina left: {}", report.stamina),
        ];
        push_run_lines(&mut lines, summary);
        if let Some(best) = personal_best {
            let marker = match summary {
                Some(current) if current.run_id == best.run_id => " (new!)",
                _ => "",
            };
            lines.push(format!(
                "Personal best: {} on attempt {}{marker}",
                best.score, best.attempt
            ));
        }
        Self {
            title: "Finish!".to_string(),
            lines,
        }
    }
}

fn push_run_lines(lines: &mut Vec<String>, summary: Option<&RunSummary>) {
    if let Some(run) = summary {
        lines.push(format!("Time: {}", format_elapsed(run.elapsed())));
        lines.push(format!("Attempt: {}", run.attempt));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marathon_core::model::Distance;
    use marathon_core::rules::Medal;

    #[test]
    fn game_over_lists_reached_marker() {
        let report = GameOverReport {
            score: 6,
            correct_count: 2,
            total_answered: 11,
            reached: Distance::from_meters(25_000),
        };
        let vm = ResultVm::game_over(&report, None);
        assert_eq!(vm.title, "Out of stamina");
        assert!(vm.lines.contains(&"You ran out of stamina at 25 km.".to_string()));
        assert!(vm.lines.contains(&"Correct answers: 2/11 (18%)".to_string()));
    }

    #[test]
    fn finish_shows_medal_without_summary() {
        let report = FinishReport {
            score: 170,
            accuracy: Accuracy::new(17, 17),
            stamina: 100,
            medal: Medal::Gold,
        };
        let vm = ResultVm::finished(&report, None, None);
        assert_eq!(vm.lines[0], "Medal: Gold");
        assert!(vm.lines.iter().all(|l| !l.starts_with("Personal best")));
    }
}
