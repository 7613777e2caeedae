use marathon_core::engine::AnswerOutcome;
use marathon_core::model::{AnswerIndex, Question, SessionState};
use marathon_core::rules::MAX_STAMINA;
use services::RaceProgress;

const BAR_WIDTH: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    Correct,
    /// The player's pick, when it was wrong.
    Wrong,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: u8,
    pub text: String,
    pub mark: OptionMark,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub is_correct: bool,
    pub score_delta: i32,
    pub stamina_delta: i16,
    pub explanation: String,
    pub aid_items: Vec<String>,
    pub landmark: Option<String>,
    pub exhausted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub header: String,
    pub prompt: String,
    pub score: u32,
    pub stamina_bar: String,
    pub course_percent: u8,
    pub options: Vec<OptionVm>,
    pub feedback: Option<FeedbackVm>,
}

impl QuestionVm {
    #[must_use]
    pub fn new(
        question: &Question,
        state: &SessionState,
        progress: &RaceProgress,
        outcome: Option<&AnswerOutcome>,
    ) -> Self {
        let options = AnswerIndex::all()
            .map(|index| OptionVm {
                label: index.label(),
                text: question.option(index).to_string(),
                mark: option_mark(index, outcome),
            })
            .collect();

        let feedback = outcome.map(|outcome| FeedbackVm {
            is_correct: outcome.is_correct,
            score_delta: outcome.applied.score,
            stamina_delta: outcome.applied.stamina,
            explanation: question.explanation().to_string(),
            aid_items: outcome
                .aid_station
                .as_ref()
                .map(|aid| aid.items().to_vec())
                .unwrap_or_default(),
            landmark: outcome.landmark.clone(),
            exhausted: outcome.stamina == 0,
        });

        Self {
            header: format!(
                "{}/{} · {} · {}",
                progress.question_number,
                progress.total_questions,
                progress.distance,
                question.category()
            ),
            prompt: question.prompt().to_string(),
            score: state.score(),
            stamina_bar: stamina_bar(state.stamina()),
            course_percent: progress.percent_complete,
            options,
            feedback,
        }
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.feedback.is_some()
    }
}

fn option_mark(index: AnswerIndex, outcome: Option<&AnswerOutcome>) -> OptionMark {
    match outcome {
        Some(o) if index == o.correct => OptionMark::Correct,
        Some(o) if index == o.selected => OptionMark::Wrong,
        _ => OptionMark::Plain,
    }
}

/// `[#####---------------] 25/100`
#[must_use]
pub fn stamina_bar(stamina: u8) -> String {
    let stamina = stamina.min(MAX_STAMINA);
    let filled = usize::from(stamina) * BAR_WIDTH / usize::from(MAX_STAMINA);
    format!(
        "[{}{}] {stamina}/{MAX_STAMINA}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}
