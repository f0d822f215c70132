//! # Core Application Logic
//!
//! The navigation state machine and the pure helpers around it.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (App)          │
//!                    │  • Action (triggers)    │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   mobile   │      │    web     │
//!     │  Adapter   │      │  (future)  │      │  (future)  │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: the `App` struct — the single owner of "what is on screen"
//! - [`action`]: the `Action` enum and the `update()` reducer enforcing the
//!   transition table
//! - [`evaluate`]: schema-matching evaluator (pure function)
//! - [`highlight`]: trigger highlighter (pure segment iterator)
//! - [`scaffold`]: step walker with pitfall gating
//! - [`config`]: layered configuration (defaults → file → CLI)

pub mod action;
pub mod config;
pub mod evaluate;
pub mod highlight;
pub mod scaffold;
pub mod state;
