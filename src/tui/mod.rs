//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//! The intention is to swap this out for a different adapter (mobile, web)
//! in the future if needed.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw: it sleeps in `poll` until the
//! next presentation timer is due (or an idle cap), and only draws after
//! an event, a fired timer, or a resize.
//!
//! ## Presentation Timers
//!
//! The mocked camera scan and the summary graph's two-phase reveal are
//! timed effects. Each pending timer is stamped with the screen epoch it
//! was scheduled in; the epoch bumps on every screen change, so a timer
//! that outlives its screen is detected as stale and dropped instead of
//! firing into the wrong screen.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::time::{Duration, Instant};

use crate::content::ContentRegistry;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Screen};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    AnalysisEvent, AnalysisState, CameraState, DeepDiveEvent, DeepDiveState, HomeEvent, HomeState,
    LibraryEvent, LibraryState, NotebookEvent, NotebookState, ScaffoldViewState, SummaryEvent,
    SummaryState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Poll timeout when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(500);

/// What a presentation timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerFire {
    /// Scan finished; dispatch the capture-complete transition.
    CaptureComplete,
    /// Summary graph: nodes become visible.
    GraphNodes,
    /// Summary graph: links are drawn.
    GraphLinks,
}

/// A scheduled one-shot presentation timer, stamped with the screen epoch
/// it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct PendingTimer {
    pub due: Instant,
    pub epoch: u64,
    pub fire: TimerFire,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Per-screen component states
    pub home: HomeState,
    pub camera: CameraState,
    pub analysis: AnalysisState,
    pub scaffold_view: ScaffoldViewState,
    pub summary: SummaryState,
    pub library: LibraryState,
    pub deep_dive: DeepDiveState,
    pub notebook: NotebookState,
    // Timer bookkeeping
    pub screen_epoch: u64,
    pub timers: Vec<PendingTimer>,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            home: HomeState::default(),
            camera: CameraState::default(),
            analysis: AnalysisState::new(&app.active_problem),
            scaffold_view: ScaffoldViewState::default(),
            summary: SummaryState::new(&app.active_problem),
            library: LibraryState::default(),
            deep_dive: DeepDiveState::default(),
            notebook: NotebookState::default(),
            screen_epoch: 0,
            timers: Vec::new(),
        }
    }

    fn schedule(&mut self, delay_ms: u64, fire: TimerFire) {
        let timer = PendingTimer {
            due: Instant::now() + Duration::from_millis(delay_ms),
            epoch: self.screen_epoch,
            fire,
        };
        debug!("Scheduling {:?} in {}ms (epoch {})", fire, delay_ms, timer.epoch);
        self.timers.push(timer);
    }
}

/// Apply one action, returning whether the app should quit. A rejected
/// transition is logged and surfaced in the status bar; the state stays
/// renderable either way.
fn dispatch(app: &mut App, action: Action) -> bool {
    let trigger = action.label();
    match update(app, action) {
        Ok(Effect::Quit) => true,
        Ok(Effect::None) => {
            app.status_message.clear();
            false
        }
        Err(e) => {
            warn!("Rejected '{}' on {:?}: {}", trigger, app.screen, e);
            app.status_message = e.to_string();
            false
        }
    }
}

/// Reset presentation state for a freshly entered screen and schedule its
/// timed reveals. Bumping the epoch invalidates every timer scheduled for
/// the previous screen.
fn on_screen_change(app: &App, tui: &mut TuiState, config: &ResolvedConfig) {
    tui.screen_epoch += 1;
    tui.timers.clear();
    info!("Screen -> {:?} (epoch {})", app.screen, tui.screen_epoch);
    match app.screen {
        Screen::Home => tui.home = HomeState::default(),
        Screen::Camera => tui.camera = CameraState::default(),
        Screen::Analysis => tui.analysis = AnalysisState::new(&app.active_problem),
        Screen::Scaffold => tui.scaffold_view = ScaffoldViewState::default(),
        Screen::Summary => {
            tui.summary = SummaryState::new(&app.active_problem);
            tui.schedule(config.graph_nodes_delay_ms, TimerFire::GraphNodes);
            tui.schedule(config.graph_links_delay_ms, TimerFire::GraphLinks);
        }
        Screen::Library => tui.library = LibraryState::default(),
        Screen::DeepDive => tui.deep_dive = DeepDiveState::default(),
        Screen::MistakeList => tui.notebook = NotebookState::default(),
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let registry = ContentRegistry::builtin().map_err(std::io::Error::other)?;
    let mut app = App::from_config(registry, &config);
    let mut tui = TuiState::new(&app);

    let mut terminal = ratatui::init();
    let mut needs_redraw = true;
    let mut should_quit = false;
    let mut prev_screen = app.screen;

    while !should_quit {
        // Sync component props with app state
        tui.analysis.selected = app.selected_option.clone();
        tui.library.item_count = app.registry.filter_schemas(tui.library.category).len();
        tui.notebook.ids = app
            .registry
            .filter_mistakes(tui.notebook.filter)
            .iter()
            .map(|p| p.id.clone())
            .collect();

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Sleep until the next timer is due, capped by the idle timeout.
        let now = Instant::now();
        let timeout = tui
            .timers
            .iter()
            .map(|t| t.due.saturating_duration_since(now))
            .min()
            .unwrap_or(IDLE_POLL);
        let first_event = poll_event_timeout(timeout);

        // Fire due timers. Timers from an older epoch belong to a screen we
        // already left - dropped, never fired.
        let now = Instant::now();
        let mut due = Vec::new();
        tui.timers.retain(|t| {
            if t.due <= now {
                due.push(*t);
                false
            } else {
                true
            }
        });
        for timer in due {
            if timer.epoch != tui.screen_epoch {
                debug!(
                    "Dropping stale timer {:?} (epoch {} != {})",
                    timer.fire, timer.epoch, tui.screen_epoch
                );
                continue;
            }
            needs_redraw = true;
            match timer.fire {
                TimerFire::CaptureComplete => {
                    should_quit |= dispatch(&mut app, Action::CaptureComplete);
                }
                TimerFire::GraphNodes => tui.summary.graph_phase = tui.summary.graph_phase.max(1),
                TimerFire::GraphLinks => tui.summary.graph_phase = 2,
            }
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;

            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            // Ctrl+C always quits regardless of screen
            if matches!(event, TuiEvent::ForceQuit) {
                should_quit |= dispatch(&mut app, Action::Quit);
                continue;
            }
            // 'q' quits, 'h' jumps home, from anywhere
            if matches!(event, TuiEvent::InputChar('q')) {
                should_quit |= dispatch(&mut app, Action::Quit);
                continue;
            }
            if matches!(event, TuiEvent::InputChar('h')) && app.screen != Screen::Home {
                should_quit |= dispatch(&mut app, Action::GoHome);
                continue;
            }

            match app.screen {
                Screen::Home => {
                    if let Some(home_event) = tui.home.handle_event(&event) {
                        let action = match home_event {
                            HomeEvent::Capture => Action::StartCapture,
                            HomeEvent::Library => Action::OpenLibrary,
                            HomeEvent::MistakeList => Action::OpenMistakeList,
                            HomeEvent::Quit => Action::Quit,
                        };
                        should_quit |= dispatch(&mut app, action);
                    }
                }
                Screen::Camera => match event {
                    TuiEvent::Submit if !tui.camera.scanning => {
                        tui.camera.scanning = true;
                        info!("Shutter pressed, scanning for {}ms", config.scan_delay_ms);
                        tui.schedule(config.scan_delay_ms, TimerFire::CaptureComplete);
                    }
                    TuiEvent::Back => {
                        should_quit |= dispatch(&mut app, Action::GoHome);
                    }
                    _ => {}
                },
                Screen::Analysis => {
                    if matches!(event, TuiEvent::Back) {
                        should_quit |= dispatch(&mut app, Action::GoHome);
                    } else if let Some(analysis_event) = tui.analysis.handle_event(&event) {
                        let action = match analysis_event {
                            AnalysisEvent::Select(id) => Action::SelectOption(id),
                            AnalysisEvent::Confirm => Action::Matched,
                        };
                        should_quit |= dispatch(&mut app, action);
                    }
                }
                Screen::Scaffold => match event {
                    TuiEvent::Submit => {
                        should_quit |= dispatch(&mut app, Action::AdvanceStep);
                    }
                    TuiEvent::Back => {
                        should_quit |= dispatch(&mut app, Action::GoHome);
                    }
                    other => tui.scaffold_view.handle_event(&other),
                },
                Screen::Summary => {
                    if matches!(event, TuiEvent::Back) {
                        should_quit |= dispatch(&mut app, Action::GoHome);
                    } else if let Some(SummaryEvent::OpenLink(id)) =
                        tui.summary.handle_event(&event)
                    {
                        should_quit |= dispatch(&mut app, Action::OpenLink(id));
                    }
                }
                Screen::Library => {
                    if let Some(LibraryEvent::Back) = tui.library.handle_event(&event) {
                        should_quit |= dispatch(&mut app, Action::Back);
                    }
                }
                Screen::DeepDive => {
                    if let Some(DeepDiveEvent::Back) = tui.deep_dive.handle_event(&event) {
                        should_quit |= dispatch(&mut app, Action::Back);
                    }
                }
                Screen::MistakeList => {
                    if let Some(notebook_event) = tui.notebook.handle_event(&event) {
                        let action = match notebook_event {
                            NotebookEvent::Open(id) => Action::SelectProblem(id),
                            NotebookEvent::Back => Action::Back,
                        };
                        should_quit |= dispatch(&mut app, action);
                    }
                }
            }
        }

        if app.screen != prev_screen {
            on_screen_change(&app, &mut tui, &config);
            prev_screen = app.screen;
            needs_redraw = true;
        }
    }

    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_config() -> ResolvedConfig {
        ResolvedConfig {
            default_problem: None,
            scan_delay_ms: 0,
            graph_nodes_delay_ms: 0,
            graph_links_delay_ms: 0,
        }
    }

    fn app() -> App {
        App::new(ContentRegistry::builtin().unwrap())
    }

    #[test]
    fn screen_change_bumps_epoch_and_clears_timers() {
        let mut app = app();
        let mut tui = TuiState::new(&app);
        tui.schedule(1000, TimerFire::CaptureComplete);
        assert_eq!(tui.timers.len(), 1);

        dispatch(&mut app, Action::StartCapture);
        on_screen_change(&app, &mut tui, &instant_config());
        assert_eq!(tui.screen_epoch, 1);
        assert!(tui.timers.is_empty());
    }

    #[test]
    fn entering_summary_schedules_both_graph_phases() {
        let mut app = app();
        let mut tui = TuiState::new(&app);
        app.screen = Screen::Summary;
        on_screen_change(&app, &mut tui, &instant_config());
        let fires: Vec<TimerFire> = tui.timers.iter().map(|t| t.fire).collect();
        assert_eq!(fires, [TimerFire::GraphNodes, TimerFire::GraphLinks]);
        assert_eq!(tui.summary.graph_phase, 0);
    }

    #[test]
    fn stale_timer_epoch_differs_after_screen_change() {
        let mut app = app();
        let mut tui = TuiState::new(&app);
        dispatch(&mut app, Action::StartCapture);
        on_screen_change(&app, &mut tui, &instant_config());
        tui.schedule(0, TimerFire::CaptureComplete);
        let scheduled_epoch = tui.timers[0].epoch;

        dispatch(&mut app, Action::GoHome);
        on_screen_change(&app, &mut tui, &instant_config());
        assert_ne!(scheduled_epoch, tui.screen_epoch);
    }

    #[test]
    fn dispatch_surfaces_rejections_in_status_bar() {
        let mut app = app();
        let quit = dispatch(&mut app, Action::AdvanceStep);
        assert!(!quit);
        assert_eq!(app.screen, Screen::Home);
        assert!(app.status_message.contains("advance step"));
    }

    #[test]
    fn dispatch_quit_returns_true() {
        let mut app = app();
        assert!(dispatch(&mut app, Action::Quit));
    }
}
