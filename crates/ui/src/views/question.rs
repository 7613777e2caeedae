use crate::vm::{OptionMark, QuestionVm};

#[must_use]
pub fn render_question(vm: &QuestionVm) -> String {
    let mut out = vec![
        format!("-- {} --", vm.header),
        format!(
            "Score {} | Stamina {} | {}% done",
            vm.score, vm.stamina_bar, vm.course_percent
        ),
        String::new(),
        vm.prompt.clone(),
    ];

    for option in &vm.options {
        let suffix = match option.mark {
            OptionMark::Plain => "",
            OptionMark::Correct => "  <- correct",
            OptionMark::Wrong => "  <- your answer",
        };
        out.push(format!("  {}) {}{suffix}", option.label, option.text));
    }

    if let Some(feedback) = &vm.feedback {
        out.push(String::new());
        let verdict = if feedback.is_correct { "Correct!" } else { "Wrong." };
        out.push(format!(
            "{verdict} {:+} points, {:+} stamina",
            feedback.score_delta, feedback.stamina_delta
        ));
        out.push(feedback.explanation.clone());
        if !feedback.aid_items.is_empty() {
            out.push(format!("Aid station: {}", feedback.aid_items.join(", ")));
        }
        if let Some(landmark) = &feedback.landmark {
            out.push(format!("Landmark: {landmark}"));
        }
        if feedback.exhausted {
            out.push("Your legs are gone...".to_string());
        }
    }

    out.push(String::new());
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::{FeedbackVm, OptionVm};

    fn vm(feedback: Option<FeedbackVm>) -> QuestionVm {
        QuestionVm {
            header: "3/17 · 5 km · Nutrition".into(),
            prompt: "Why drink early?".into(),
            score: 17,
            stamina_bar: "[bar] 88/100".into(),
            course_percent: 11,
            options: (1..=4)
                .map(|label| OptionVm {
                    label,
                    text: format!("option {label}"),
                    mark: match label {
                        2 if feedback.is_some() => OptionMark::Correct,
                        4 if feedback.is_some() => OptionMark::Wrong,
                        _ => OptionMark::Plain,
                    },
                })
                .collect(),
            feedback,
        }
    }

    #[test]
    fn unanswered_question_lists_options() {
        let text = render_question(&vm(None));
        assert!(text.contains("-- 3/17 · 5 km · Nutrition --"));
        assert!(text.contains("  1) option 1\n"));
        assert!(text.contains("  4) option 4\n"));
        assert!(!text.contains("<-"));
    }

    #[test]
    fn feedback_shows_marks_deltas_and_aid() {
        let text = render_question(&vm(Some(FeedbackVm {
            is_correct: false,
            score_delta: -3,
            stamina_delta: -12,
            explanation: "Thirst lags behind.".into(),
            aid_items: vec!["Water".into(), "Sports drink".into()],
            landmark: None,
            exhausted: false,
        })));
        assert!(text.contains("  2) option 2  <- correct"));
        assert!(text.contains("  4) option 4  <- your answer"));
        assert!(text.contains("Wrong. -3 points, -12 stamina"));
        assert!(text.contains("Aid station: Water, Sports drink"));
        assert!(!text.contains("Landmark:"));
    }
}
