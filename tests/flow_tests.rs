//! End-to-end walks of the navigation state machine over the built-in
//! dataset, exercising the same action sequences the TUI dispatches.

use tapmath::content::ContentRegistry;
use tapmath::core::action::{Action, Effect, NavError, update};
use tapmath::core::evaluate::evaluate;
use tapmath::core::highlight::segments;
use tapmath::core::state::{App, Screen};

fn app() -> App {
    App::new(ContentRegistry::builtin().expect("builtin dataset must validate"))
}

#[test]
fn full_capture_flow_reaches_summary_and_deep_dive() {
    let mut app = app();

    update(&mut app, Action::StartCapture).unwrap();
    assert_eq!(app.screen, Screen::Camera);
    assert_eq!(app.active_problem.id, "prob_001");

    update(&mut app, Action::CaptureComplete).unwrap();
    assert_eq!(app.screen, Screen::Analysis);

    // First try the wrong answer: feedback is recorded, no transition.
    update(&mut app, Action::SelectOption("opt_A".into())).unwrap();
    let verdict = evaluate(&app.active_problem, "opt_A").unwrap();
    assert!(!verdict.is_correct);
    assert!(matches!(
        update(&mut app, Action::Matched),
        Err(NavError::InvalidTransition { .. })
    ));
    assert_eq!(app.screen, Screen::Analysis);

    // Correct answer unlocks the scaffold.
    update(&mut app, Action::SelectOption("opt_B".into())).unwrap();
    update(&mut app, Action::Matched).unwrap();
    assert_eq!(app.screen, Screen::Scaffold);

    // s1, s2 (pitfall shown then passed), s3 completes to Summary.
    let mut advances = 0;
    while app.screen == Screen::Scaffold {
        update(&mut app, Action::AdvanceStep).unwrap();
        advances += 1;
        assert!(advances <= 10, "scaffold never completed");
    }
    assert_eq!(app.screen, Screen::Summary);
    assert_eq!(advances, 4);

    update(&mut app, Action::OpenLink("r1".into())).unwrap();
    assert_eq!(app.screen, Screen::DeepDive);
    assert_eq!(app.selected_link.as_ref().map(|l| l.id.as_str()), Some("r1"));

    update(&mut app, Action::Back).unwrap();
    assert_eq!(app.screen, Screen::Summary);
    assert!(app.selected_link.is_none());

    update(&mut app, Action::GoHome).unwrap();
    assert_eq!(app.screen, Screen::Home);
}

#[test]
fn library_and_notebook_round_trips() {
    let mut app = app();

    update(&mut app, Action::OpenLibrary).unwrap();
    assert_eq!(app.screen, Screen::Library);
    update(&mut app, Action::Back).unwrap();
    assert_eq!(app.screen, Screen::Home);

    update(&mut app, Action::OpenMistakeList).unwrap();
    assert_eq!(app.screen, Screen::MistakeList);
    update(&mut app, Action::SelectProblem("prob_002".into())).unwrap();
    assert_eq!(app.screen, Screen::Summary);
    assert_eq!(app.active_problem.id, "prob_002");

    // A notebook entry's summary supports the same deep-dive jump.
    update(&mut app, Action::OpenLink("r4".into())).unwrap();
    assert_eq!(app.screen, Screen::DeepDive);
}

#[test]
fn rejected_transitions_never_change_observable_state() {
    let mut app = app();
    let invalid_on_home = [
        Action::CaptureComplete,
        Action::SelectOption("opt_B".into()),
        Action::Matched,
        Action::AdvanceStep,
        Action::OpenLink("r1".into()),
        Action::SelectProblem("prob_002".into()),
        Action::Back,
    ];
    for action in invalid_on_home {
        let label = action.label();
        assert!(update(&mut app, action).is_err(), "'{label}' accepted on Home");
        assert_eq!(app.screen, Screen::Home);
        assert!(app.selected_option.is_none());
        assert!(app.selected_link.is_none());
    }
}

#[test]
fn quit_works_on_every_screen() {
    let mut app = app();
    assert_eq!(update(&mut app, Action::Quit).unwrap(), Effect::Quit);

    update(&mut app, Action::StartCapture).unwrap();
    assert_eq!(update(&mut app, Action::Quit).unwrap(), Effect::Quit);
    // Quit produces an effect, not a transition.
    assert_eq!(app.screen, Screen::Camera);
}

#[test]
fn highlighting_matches_every_builtin_statement() {
    let app = app();
    for problem in app.registry.problems() {
        let rebuilt: String = segments(&problem.raw_text, &problem.triggers)
            .map(|seg| seg.text())
            .collect();
        assert_eq!(rebuilt, problem.raw_text, "problem {}", problem.id);
        // Every trigger in the built-in dataset occurs in declaration
        // order, so all of them should be highlighted.
        let highlighted = segments(&problem.raw_text, &problem.triggers)
            .filter(|seg| matches!(seg, tapmath::core::highlight::Segment::Trigger { .. }))
            .count();
        assert_eq!(highlighted, problem.triggers.len(), "problem {}", problem.id);
    }
}

#[test]
fn restudying_a_mistake_starts_a_fresh_flow() {
    let mut app = app();
    // Complete a flow to leave residue in selection/scaffold state.
    update(&mut app, Action::StartCapture).unwrap();
    update(&mut app, Action::CaptureComplete).unwrap();
    update(&mut app, Action::SelectOption("opt_B".into())).unwrap();
    update(&mut app, Action::Matched).unwrap();
    update(&mut app, Action::AdvanceStep).unwrap();

    update(&mut app, Action::GoHome).unwrap();
    update(&mut app, Action::OpenMistakeList).unwrap();
    update(&mut app, Action::SelectProblem("prob_003".into())).unwrap();

    assert_eq!(app.active_problem.id, "prob_003");
    assert!(app.selected_option.is_none());
    assert_eq!(app.scaffold.step_index, 0);
}
