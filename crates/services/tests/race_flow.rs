use chrono::Duration;
use marathon_core::engine::Transition;
use marathon_core::rules::{Medal, MedalPolicy};
use marathon_core::time::fixed_clock;
use services::{RaceService, RaceSession, RunOutcome, Screen};

fn correct(session: &RaceSession) -> usize {
    session
        .engine()
        .current_question()
        .expect("question on screen")
        .correct()
        .value()
}

fn wrong(session: &RaceSession) -> usize {
    (correct(session) + 2) % 4
}

#[test]
fn correct_then_wrong_updates_score_and_stamina() {
    let service = RaceService::standard().expect("standard course");
    let mut session = service.new_session();
    session.start().unwrap();

    let first = session.submit_answer(correct(&session)).unwrap();
    assert_eq!((first.score, first.stamina), (10, 100));
    session.advance().unwrap();

    let second = session.submit_answer(wrong(&session)).unwrap();
    assert_eq!((second.score, second.stamina), (7, 88));
}

#[test]
fn game_over_then_retry_then_finish_tracks_personal_best() {
    let service = RaceService::standard()
        .unwrap()
        .with_clock(fixed_clock())
        .with_medal_policy(MedalPolicy::new(80, 50).unwrap());
    let mut session = service.new_session();
    session.start().unwrap();

    for _ in 0..9 {
        session.submit_answer(wrong(&session)).unwrap();
        session.advance().unwrap();
    }
    let Screen::GameOver { report, summary } = session.screen() else {
        panic!("expected game over");
    };
    assert_eq!(report.total_answered, 9);
    assert_eq!(summary.unwrap().outcome, RunOutcome::GameOver);

    session.retry().unwrap();
    assert_eq!(session.engine().state().score(), 0);
    assert_eq!(session.engine().state().current_index(), 0);

    // miss the first two, then run clean
    let mut misses = 2;
    let report = loop {
        let pick = if misses > 0 {
            misses -= 1;
            wrong(&session)
        } else {
            correct(&session)
        };
        session.submit_answer(pick).unwrap();
        session.clock_mut().advance(Duration::seconds(5));
        match session.advance().unwrap() {
            Transition::Continue { .. } => {}
            Transition::Finished(report) => break report,
            Transition::GameOver(_) => panic!("two misses cannot exhaust stamina"),
        }
    };

    let total = u32::try_from(session.engine().course().len()).unwrap();
    assert_eq!(report.accuracy.correct, total - 2);
    assert_eq!(report.medal, Medal::Silver);
    // two misses cost 24 stamina, the next three correct answers recover it
    assert_eq!(report.stamina, 100);
    // both misses happen at score 0, so the floor absorbs the penalty
    assert_eq!(report.score, 10 * (total - 2));

    let best = session.personal_best().expect("finished run");
    assert_eq!(best.attempt, 2);
    assert_eq!(session.runs().len(), 2);
}
