//! Compiled-in quiz table for the standard city marathon course.

use crate::model::{COURSE_LENGTH, Category, Course, CourseError, QuestionDraft, QuestionId};

pub const STANDARD_COURSE_NAME: &str = "City Marathon";

struct QuestionSeed {
    km: f64,
    category: Category,
    prompt: &'static str,
    options: [&'static str; 4],
    correct: usize,
    explanation: &'static str,
    aid: &'static [&'static str],
    landmark: Option<&'static str>,
}

impl QuestionSeed {
    fn draft(&self) -> QuestionDraft {
        QuestionDraft {
            distance_km: self.km,
            category: self.category,
            prompt: self.prompt.to_string(),
            options: self.options.iter().map(|o| (*o).to_string()).collect(),
            correct: self.correct,
            explanation: self.explanation.to_string(),
            aid_station: self.aid.iter().map(|a| (*a).to_string()).collect(),
            landmark: self.landmark.map(str::to_string),
        }
    }
}

const SEEDS: &[QuestionSeed] = &[
    QuestionSeed {
        km: 0.0,
        category: Category::Rules,
        prompt: "How long is an official marathon?",
        options: ["40 km", "42 km", "42.195 km", "45 km"],
        correct: 2,
        explanation: "The distance was set at the 1908 London Olympics and standardised in 1921.",
        aid: &[],
        landmark: Some("Start gantry on the main square"),
    },
    QuestionSeed {
        km: 2.5,
        category: Category::History,
        prompt: "Whose legendary run from Marathon to Athens inspired the race?",
        options: ["Pheidippides", "Leonidas", "Achilles", "Pericles"],
        correct: 0,
        explanation: "Legend says the messenger Pheidippides ran to Athens to announce victory at Marathon.",
        aid: &[],
        landmark: None,
    },
    QuestionSeed {
        km: 5.0,
        category: Category::Nutrition,
        prompt: "Why drink at the early aid stations even if you are not thirsty?",
        options: [
            "To gain weight for the hills",
            "To stay ahead of dehydration",
            "To slow your pace on purpose",
            "Because it is mandatory",
        ],
        correct: 1,
        explanation: "Thirst lags behind fluid loss, so small regular sips prevent a deficit later on.",
        aid: &["Water", "Sports drink"],
        landmark: None,
    },
    QuestionSeed {
        km: 7.5,
        category: Category::Training,
        prompt: "What is a 'negative split'?",
        options: [
            "Skipping an aid station",
            "Running the first half faster than the second",
            "Losing time to a wrong turn",
            "Running the second half faster than the first",
        ],
        correct: 3,
        explanation: "Most marathon records are set with an even or slightly negative split.",
        aid: &[],
        landmark: Some("Old harbour bridge"),
    },
    QuestionSeed {
        km: 10.0,
        category: Category::History,
        prompt: "Where was the first modern Olympic marathon held?",
        options: ["Paris", "Athens", "London", "Stockholm"],
        correct: 1,
        explanation: "The 1896 Athens Olympics revived the race, won by Spyridon Louis.",
        aid: &["Water", "Banana", "Orange slices"],
        landmark: None,
    },
    QuestionSeed {
        km: 12.5,
        category: Category::Physiology,
        prompt: "What mainly causes 'hitting the wall' late in a marathon?",
        options: [
            "Running out of stored glycogen",
            "Too much oxygen in the blood",
            "Wearing new shoes",
            "Drinking water too slowly",
        ],
        correct: 0,
        explanation: "When muscle and liver glycogen run low, the body must rely on slower fat metabolism.",
        aid: &[],
        landmark: None,
    },
    QuestionSeed {
        km: 15.0,
        category: Category::Nutrition,
        prompt: "How much carbohydrate per hour do most guides suggest during a marathon?",
        options: ["None at all", "About 5 g", "About 30 to 60 g", "Over 300 g"],
        correct: 2,
        explanation: "Around 30 to 60 g per hour keeps blood sugar steady without upsetting the stomach.",
        aid: &["Water", "Energy gel", "Banana"],
        landmark: None,
    },
    QuestionSeed {
        km: 17.5,
        category: Category::Rules,
        prompt: "Which body ratifies world records in road running?",
        options: ["FIFA", "World Athletics", "The IOC", "UNESCO"],
        correct: 1,
        explanation: "World Athletics, formerly the IAAF, ratifies records on certified courses.",
        aid: &[],
        landmark: Some("Cathedral square"),
    },
    QuestionSeed {
        km: 21.1,
        category: Category::Course,
        prompt: "You just passed halfway. How long is a half marathon?",
        options: ["20 km", "21.0975 km", "25 km", "19.5 km"],
        correct: 1,
        explanation: "A half marathon is exactly half of 42.195 km.",
        aid: &["Water", "Sports drink"],
        landmark: Some("Halfway arch by the city park"),
    },
    QuestionSeed {
        km: 25.0,
        category: Category::History,
        prompt: "Who was the first woman to run the Boston Marathon as an official entrant, in 1967?",
        options: ["Paula Radcliffe", "Joan Benoit", "Grete Waitz", "Kathrine Switzer"],
        correct: 3,
        explanation: "Kathrine Switzer finished in 1967 despite an official trying to pull her off the course.",
        aid: &[],
        landmark: None,
    },
    QuestionSeed {
        km: 28.0,
        category: Category::Physiology,
        prompt: "Which mineral do you lose most through sweat?",
        options: ["Iron", "Calcium", "Sodium", "Zinc"],
        correct: 2,
        explanation: "Sweat is salty; sodium losses can reach several grams over a marathon.",
        aid: &[],
        landmark: None,
    },
    QuestionSeed {
        km: 30.0,
        category: Category::Nutrition,
        prompt: "Drinking large amounts of plain water only can lead to what?",
        options: ["Hyponatremia", "Hypothermia", "Altitude sickness", "Anaemia"],
        correct: 0,
        explanation: "Over-drinking dilutes blood sodium; salty snacks and sports drinks help prevent it.",
        aid: &["Water", "Cola", "Salt tablets"],
        landmark: None,
    },
    QuestionSeed {
        km: 32.5,
        category: Category::History,
        prompt: "Who first ran a marathon distance in under two hours, in 2019?",
        options: ["Kenenisa Bekele", "Eliud Kipchoge", "Haile Gebrselassie", "Mo Farah"],
        correct: 1,
        explanation: "Kipchoge ran 1:59:40 in Vienna; the paced event was not eligible as a record.",
        aid: &[],
        landmark: Some("Riverside promenade"),
    },
    QuestionSeed {
        km: 35.0,
        category: Category::Training,
        prompt: "What is a 'taper'?",
        options: [
            "A bandage for blisters",
            "A hill sprint session",
            "Reducing training volume before race day",
            "A type of running shoe",
        ],
        correct: 2,
        explanation: "Two to three weeks of reduced mileage lets the body recover and absorb training.",
        aid: &["Water", "Energy gel"],
        landmark: None,
    },
    QuestionSeed {
        km: 38.0,
        category: Category::Rules,
        prompt: "What does 'DNF' mean in race results?",
        options: ["Did Not Finish", "Disqualified, No Fault", "Draft Not Filed", "Day N Finish"],
        correct: 0,
        explanation: "A DNF is recorded for a starter who leaves the course before the finish.",
        aid: &[],
        landmark: None,
    },
    QuestionSeed {
        km: 40.0,
        category: Category::History,
        prompt: "Which marathon is the oldest still run every year, since 1897?",
        options: ["New York", "Berlin", "Chicago", "Boston"],
        correct: 3,
        explanation: "The Boston Marathon was first held in April 1897.",
        aid: &["Water", "Sports drink"],
        landmark: Some("Last bend along the old city wall"),
    },
    QuestionSeed {
        km: 42.195,
        category: Category::Course,
        prompt: "You crossed the line! What should you do first?",
        options: [
            "Sit down right on the line",
            "Keep walking and rehydrate",
            "Sprint another lap",
            "Skip food until tomorrow",
        ],
        correct: 1,
        explanation: "Walking on helps blood return from the legs; fluids and food start recovery.",
        aid: &["Water", "Recovery drink", "Medal"],
        landmark: Some("Finish line at the stadium"),
    },
];

impl Course {
    /// Builds the standard course from the compiled-in table.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if any record is malformed or the table breaks an
    /// ordering invariant. Callers are expected to abort on error.
    pub fn standard() -> Result<Course, CourseError> {
        let questions = SEEDS
            .iter()
            .enumerate()
            .map(|(position, seed)| {
                let id = QuestionId::from_index(position);
                seed.draft()
                    .validate(id)
                    .map_err(|source| CourseError::Question { id, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let course = Course::new(STANDARD_COURSE_NAME, questions, COURSE_LENGTH)?;
        log::debug!(
            "loaded course {:?}: {} questions over {}",
            course.name(),
            course.len(),
            course.length()
        );
        Ok(course)
    }
}
