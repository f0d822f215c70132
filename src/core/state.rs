//! # Application State
//!
//! Core business state. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── registry: ContentRegistry        // static content datasets
//! ├── screen: Screen                   // what is on screen
//! ├── active_problem: Problem          // the problem being worked
//! ├── selected_option: Option<String>  // current quiz selection
//! ├── selected_link: Option<RelatedLink> // set only on DeepDive
//! ├── scaffold: ScaffoldProgress       // step index + pitfall gate
//! └── status_message: String           // status bar text
//! ```
//!
//! State changes only happen through `update(app, action)` in action.rs.
//! No other component may change the active screen directly; that keeps
//! the state machine's invariants centrally enforced.

use log::warn;

use crate::content::{ContentRegistry, Problem, RelatedLink};
use crate::core::config::ResolvedConfig;
use crate::core::scaffold::ScaffoldProgress;

/// Screen identifier. `Home` is reachable from every screen via back/home,
/// forming a cycle; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Camera,
    Analysis,
    Scaffold,
    Summary,
    Library,
    DeepDive,
    MistakeList,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "TAP · 数学",
            Screen::Camera => "拍题 · 提取图式",
            Screen::Analysis => "模式识别 (Schema)",
            Screen::Scaffold => "思维脚手架",
            Screen::Summary => "TAP 图式卡片",
            Screen::Library => "图式模型库",
            Screen::DeepDive => "深入拓展",
            Screen::MistakeList => "错题本",
        }
    }
}

pub struct App {
    pub registry: ContentRegistry,
    pub screen: Screen,
    /// Problem the capture flow loads, configurable via `[general]`.
    pub default_problem_id: String,
    /// Owning copy of the problem being worked; replaced whole, never
    /// edited in place.
    pub active_problem: Problem,
    /// Quiz selection on the analysis screen.
    pub selected_option: Option<String>,
    /// Valid only while on the deep-dive screen.
    pub selected_link: Option<RelatedLink>,
    pub scaffold: ScaffoldProgress,
    pub status_message: String,
}

impl App {
    pub fn new(registry: ContentRegistry) -> Self {
        let active_problem = registry.default_problem().clone();
        let default_problem_id = active_problem.id.clone();
        Self {
            registry,
            screen: Screen::Home,
            default_problem_id,
            active_problem,
            selected_option: None,
            selected_link: None,
            scaffold: ScaffoldProgress::default(),
            status_message: String::from("欢迎使用 TAP 数学"),
        }
    }

    /// Build the app from a resolved config. An unknown configured problem
    /// id is logged and ignored rather than failing startup.
    pub fn from_config(registry: ContentRegistry, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(registry);
        if let Some(id) = &config.default_problem {
            if let Some(problem) = app.registry.problem(id).cloned() {
                app.default_problem_id = id.clone();
                app.active_problem = problem;
            } else {
                warn!("Configured default problem '{}' not in dataset, ignoring", id);
            }
        }
        app
    }
}
