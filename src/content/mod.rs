//! # Content Model
//!
//! The static, hand-authored mock content everything else reads.
//! This module contains data and validation only - no navigation logic,
//! no TUI types.
//!
//! ```text
//! content
//! ├── model     Problem, SchemaItem, RelatedLink, TapCard + validation
//! ├── registry  ContentRegistry: lookups, deep-dive resolution, filters
//! └── builtin   the built-in dataset (three problems, seven schemas)
//! ```
//!
//! Records are defined once at startup and never mutated in place. The
//! registry hands out references; the one owning copy the rest of the app
//! holds (`App::active_problem`) is a whole-value clone.

pub mod builtin;
pub mod model;
pub mod registry;

pub use model::{
    ContentError, LinkKind, NotebookMeta, NotebookStatus, Pitfall, Problem, RelatedLink,
    SchemaCategory, SchemaItem, SchemaOption, Step, TapCard, Trigger,
};
pub use registry::{ConceptContent, ContentRegistry, DeepDiveContent, VariantContent};
