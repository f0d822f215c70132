//! # Actions
//!
//! Every screen transition trigger becomes an `Action`. User presses the
//! shutter? The capture timer fires `Action::CaptureComplete`. A quiz
//! option is chosen? That's `Action::SelectOption(id)`.
//!
//! The `update()` function is the Navigation Controller: it takes the
//! current state and an action, checks the transition table, and applies
//! the transition's side effects together with the screen change. No I/O
//! happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State
//! ```
//!
//! Guards are evaluated before any field is written, so a rejected
//! transition leaves `App` exactly as it was - no partial updates are
//! observable. A rejection is an error value, never a panic: the adapter
//! logs it and re-renders the unchanged state.

use std::fmt;

use crate::core::evaluate::{self, UnknownOption};
use crate::core::scaffold::{Advance, ScaffoldProgress};
use crate::core::state::{App, Screen};

/// Named transition triggers dispatched to the Navigation Controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Home → Camera; resets the active problem to the default.
    StartCapture,
    /// Home → Library.
    OpenLibrary,
    /// Home → MistakeList.
    OpenMistakeList,
    /// Camera → Analysis; fired by the mocked capture timer.
    CaptureComplete,
    /// Record a quiz selection on Analysis; evaluates but never
    /// transitions.
    SelectOption(String),
    /// Analysis → Scaffold; guarded on the selection being correct.
    Matched,
    /// One step-walker advance on Scaffold; completion transitions to
    /// Summary.
    AdvanceStep,
    /// Summary → DeepDive; guarded on the link belonging to the active
    /// problem.
    OpenLink(String),
    /// MistakeList → Summary with the selected problem.
    SelectProblem(String),
    /// DeepDive → Summary, Library → Home, MistakeList → Home.
    Back,
    /// Valid from every screen; abandons any in-progress flow.
    GoHome,
    Quit,
}

impl Action {
    /// Trigger name as it appears in the transition table, for error
    /// reporting and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Action::StartCapture => "start capture",
            Action::OpenLibrary => "open library",
            Action::OpenMistakeList => "open mistake list",
            Action::CaptureComplete => "capture complete",
            Action::SelectOption(_) => "select option",
            Action::Matched => "matched",
            Action::AdvanceStep => "advance step",
            Action::OpenLink(_) => "related link clicked",
            Action::SelectProblem(_) => "problem selected",
            Action::Back => "back",
            Action::GoHome => "go home",
            Action::Quit => "quit",
        }
    }
}

/// What the adapter should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// The trigger is not defined for the current state, or its guard is
    /// not satisfied. Recovered locally: the request is ignored and the
    /// state left unchanged.
    InvalidTransition { screen: Screen, trigger: &'static str },
    /// The evaluator was handed an option id outside the active problem's
    /// set - a caller or data-integrity bug.
    UnknownOption(UnknownOption),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::InvalidTransition { screen, trigger } => {
                write!(f, "transition '{trigger}' is not valid on {screen:?}")
            }
            NavError::UnknownOption(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for NavError {}

impl From<UnknownOption> for NavError {
    fn from(e: UnknownOption) -> Self {
        NavError::UnknownOption(e)
    }
}

/// Apply one transition trigger to the app state.
///
/// Errors never leave the app on an unrenderable screen: on `Err` the
/// state is untouched and the caller keeps rendering the current screen.
pub fn update(app: &mut App, action: Action) -> Result<Effect, NavError> {
    match (app.screen, action) {
        (_, Action::Quit) => Ok(Effect::Quit),

        // Global escape hatch: Home is reachable from every screen, so the
        // state machine has no orphan states.
        (_, Action::GoHome) => {
            app.screen = Screen::Home;
            app.selected_link = None;
            app.selected_option = None;
            app.scaffold = ScaffoldProgress::default();
            Ok(Effect::None)
        }

        (Screen::Home, Action::StartCapture) => {
            app.active_problem = app
                .registry
                .problem(&app.default_problem_id)
                .unwrap_or_else(|| app.registry.default_problem())
                .clone();
            app.selected_option = None;
            app.scaffold = ScaffoldProgress::default();
            app.screen = Screen::Camera;
            Ok(Effect::None)
        }
        (Screen::Home, Action::OpenLibrary) => {
            app.screen = Screen::Library;
            Ok(Effect::None)
        }
        (Screen::Home, Action::OpenMistakeList) => {
            app.screen = Screen::MistakeList;
            Ok(Effect::None)
        }

        (Screen::Camera, Action::CaptureComplete) => {
            app.screen = Screen::Analysis;
            Ok(Effect::None)
        }

        (Screen::Analysis, Action::SelectOption(option_id)) => {
            // Reject unknown ids before recording anything.
            evaluate::evaluate(&app.active_problem, &option_id)?;
            app.selected_option = Some(option_id);
            Ok(Effect::None)
        }
        (Screen::Analysis, Action::Matched) => {
            let correct = app
                .selected_option
                .as_deref()
                .and_then(|id| evaluate::evaluate(&app.active_problem, id).ok())
                .is_some_and(|verdict| verdict.is_correct);
            if !correct {
                return Err(NavError::InvalidTransition {
                    screen: Screen::Analysis,
                    trigger: "matched",
                });
            }
            app.scaffold = ScaffoldProgress::default();
            app.screen = Screen::Scaffold;
            Ok(Effect::None)
        }

        (Screen::Scaffold, Action::AdvanceStep) => {
            if app.scaffold.advance(&app.active_problem.steps) == Advance::Completed {
                app.screen = Screen::Summary;
            }
            Ok(Effect::None)
        }

        (Screen::Summary, Action::OpenLink(link_id)) => {
            let link = app
                .active_problem
                .related_links
                .iter()
                .find(|link| link.id == link_id)
                .cloned()
                .ok_or(NavError::InvalidTransition {
                    screen: Screen::Summary,
                    trigger: "related link clicked",
                })?;
            app.selected_link = Some(link);
            app.screen = Screen::DeepDive;
            Ok(Effect::None)
        }

        (Screen::DeepDive, Action::Back) => {
            app.selected_link = None;
            app.screen = Screen::Summary;
            Ok(Effect::None)
        }
        (Screen::Library, Action::Back) | (Screen::MistakeList, Action::Back) => {
            app.screen = Screen::Home;
            Ok(Effect::None)
        }

        (Screen::MistakeList, Action::SelectProblem(problem_id)) => {
            let problem = app
                .registry
                .problem(&problem_id)
                .cloned()
                .ok_or(NavError::InvalidTransition {
                    screen: Screen::MistakeList,
                    trigger: "problem selected",
                })?;
            app.active_problem = problem;
            app.selected_option = None;
            app.scaffold = ScaffoldProgress::default();
            app.screen = Screen::Summary;
            Ok(Effect::None)
        }

        (screen, other) => Err(NavError::InvalidTransition {
            screen,
            trigger: other.label(),
        }),
    }
}
