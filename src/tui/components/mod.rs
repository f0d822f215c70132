//! # TUI Components
//!
//! One file per screen, following two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display screens that receive all data as struct fields and render
//! them: `Camera`, `Scaffold`.
//!
//! ### Stateful Components (Event-Driven)
//!
//! Screens with local presentation state (cursors, filters, overlays) keep a
//! persistent `*State` struct in `TuiState` and render through a transient
//! wrapper borrowing that state. Their `handle_event` translates low-level
//! `TuiEvent`s into high-level screen events which the main loop maps onto
//! `core::Action`s; everything the screen can do locally (moving a cursor,
//! toggling an overlay) stays inside the component.
//!
//! ## Co-location of Concerns
//!
//! Each component file contains everything related to that screen: state
//! types, event types, rendering logic, event handling, and tests. You can
//! read one file to understand how a screen works.
//!
//! ## Props-Based Data Flow
//!
//! Components receive app data explicitly (borrowed `Problem`, registry
//! lookups done by the caller), never by reaching into global state. This
//! keeps dependencies visible and the components renderable under
//! `TestBackend`.

pub mod analysis;
pub mod camera;
pub mod deep_dive;
pub mod home;
pub mod library;
pub mod notebook;
pub mod scaffold;
pub mod tap_card;

pub use analysis::{Analysis, AnalysisEvent, AnalysisState};
pub use camera::{Camera, CameraState};
pub use deep_dive::{DeepDive, DeepDiveEvent, DeepDiveState};
pub use home::{Home, HomeEvent, HomeState};
pub use library::{Library, LibraryEvent, LibraryState};
pub use notebook::{Notebook, NotebookEvent, NotebookState};
pub use scaffold::{Scaffold, ScaffoldViewState};
pub use tap_card::{Summary, SummaryEvent, SummaryState};
