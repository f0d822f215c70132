//! # Content Registry
//!
//! Owns the validated datasets and resolves lookups for the rest of the
//! app: problems by id, the schema library filtered by category, the
//! mistake notebook filtered by status, and deep-dive content by related
//! link id.
//!
//! Deep-dive resolution degrades gracefully: an unrecognized link id falls
//! back to a designated default record instead of erroring, but the miss is
//! logged loudly so data-authoring bugs don't hide behind the fallback.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::content::builtin;
use crate::content::model::{
    self, ContentError, NotebookStatus, Problem, SchemaCategory, SchemaItem,
};

/// One solution step of a deep-dive variant problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantStep {
    pub title: String,
    pub content: String,
    pub tip: Option<String>,
}

/// Side-by-side comparison of the original schema and its variant form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelComparison {
    pub original: String,
    pub variant: String,
}

/// A solvable variant problem with a revealed walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantContent {
    pub title: String,
    pub problem: String,
    pub steps: Vec<VariantStep>,
    pub conclusion: String,
    pub comparison: ModelComparison,
}

/// One bullet point in a concept explainer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptPoint {
    pub label: String,
    pub desc: String,
}

/// A standalone concept explainer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptContent {
    pub title: String,
    pub body: String,
    pub points: Vec<ConceptPoint>,
    pub example: Option<String>,
    pub insight: String,
    /// Rendered as a warning (易错警示) rather than an insight card.
    pub warning: bool,
}

/// Deep-dive display content, keyed by `RelatedLink::id`. Each variant
/// carries only the fields it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeepDiveContent {
    Variant(VariantContent),
    Concept(ConceptContent),
}

impl DeepDiveContent {
    pub fn title(&self) -> &str {
        match self {
            DeepDiveContent::Variant(v) => &v.title,
            DeepDiveContent::Concept(c) => &c.title,
        }
    }
}

/// Static content store, built once at startup.
pub struct ContentRegistry {
    problems: Vec<Problem>,
    schemas: Vec<SchemaItem>,
    deep_dives: HashMap<String, DeepDiveContent>,
    fallback: DeepDiveContent,
}

impl ContentRegistry {
    /// Build a registry after validating every record.
    pub fn new(
        problems: Vec<Problem>,
        schemas: Vec<SchemaItem>,
        deep_dives: HashMap<String, DeepDiveContent>,
        fallback: DeepDiveContent,
    ) -> Result<Self, ContentError> {
        if problems.is_empty() {
            return Err(ContentError::EmptyDataset);
        }
        for problem in &problems {
            model::validate_problem(problem)?;
        }
        for schema in &schemas {
            model::validate_schema(schema)?;
        }
        Ok(Self { problems, schemas, deep_dives, fallback })
    }

    /// The built-in mock dataset. Its validity is covered by tests, so the
    /// only way this can fail at runtime is a broken edit to `builtin`.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::new(
            builtin::problems(),
            builtin::schemas(),
            builtin::deep_dives(),
            builtin::deep_dive_fallback(),
        )
    }

    /// The first problem in the dataset - the default active problem.
    pub fn default_problem(&self) -> &Problem {
        // Constructor rejects empty datasets.
        &self.problems[0]
    }

    pub fn problem(&self, id: &str) -> Option<&Problem> {
        self.problems.iter().find(|p| p.id == id)
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// Resolve a related link to deep-dive content. Unknown ids fall back
    /// to the default record; the miss is logged, not raised.
    pub fn resolve_deep_dive(&self, link_id: &str) -> &DeepDiveContent {
        match self.deep_dives.get(link_id) {
            Some(content) => content,
            None => {
                warn!("no deep-dive content for link {link_id}, using fallback");
                &self.fallback
            }
        }
    }

    /// Schema library entries, optionally restricted to one category.
    /// Order is stable under the library's natural order.
    pub fn filter_schemas(&self, category: Option<SchemaCategory>) -> Vec<&SchemaItem> {
        self.schemas
            .iter()
            .filter(|s| category.is_none_or(|c| s.category == c))
            .collect()
    }

    /// Notebook problems, optionally restricted to one review status.
    /// Problems without notebook metadata never appear.
    pub fn filter_mistakes(&self, status: Option<NotebookStatus>) -> Vec<&Problem> {
        self.problems
            .iter()
            .filter(|p| match (&p.notebook, status) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(meta), Some(wanted)) => meta.status == wanted,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ContentRegistry {
        ContentRegistry::builtin().expect("builtin dataset must validate")
    }

    #[test]
    fn builtin_dataset_validates() {
        registry();
    }

    #[test]
    fn first_problem_is_default() {
        let registry = registry();
        assert_eq!(registry.default_problem().id, "prob_001");
    }

    #[test]
    fn known_link_resolves_to_its_content() {
        let registry = registry();
        let content = registry.resolve_deep_dive("r1");
        assert!(matches!(content, DeepDiveContent::Variant(_)));
        assert_eq!(content.title(), "变式训练：奇函数与不等式");
    }

    #[test]
    fn unknown_link_falls_back_to_default() {
        let registry = registry();
        let content = registry.resolve_deep_dive("r_nonexistent");
        assert_eq!(content, &builtin::deep_dive_fallback());
    }

    #[test]
    fn filter_schemas_all_preserves_library_order() {
        let registry = registry();
        let all = registry.filter_schemas(None);
        assert_eq!(all.len(), 7);
        let ids: Vec<String> = all.iter().map(|s| s.id.clone()).collect();
        let dataset_ids: Vec<String> = builtin::schemas().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, dataset_ids);
    }

    #[test]
    fn filter_schemas_by_category() {
        let registry = registry();
        let functions = registry.filter_schemas(Some(SchemaCategory::Function));
        assert_eq!(functions.len(), 3);
        assert!(functions.iter().all(|s| s.category == SchemaCategory::Function));
        let stats = registry.filter_schemas(Some(SchemaCategory::Statistics));
        assert!(stats.is_empty());
    }

    #[test]
    fn mastered_filter_returns_only_prob_003() {
        let registry = registry();
        let mastered = registry.filter_mistakes(Some(NotebookStatus::Mastered));
        let ids: Vec<&str> = mastered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["prob_003"]);
    }

    #[test]
    fn reviewing_filter_excludes_mastered() {
        let registry = registry();
        let reviewing = registry.filter_mistakes(Some(NotebookStatus::Reviewing));
        let ids: Vec<&str> = reviewing.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["prob_001", "prob_002"]);
    }

    #[test]
    fn empty_dataset_rejected() {
        let result = ContentRegistry::new(
            vec![],
            vec![],
            HashMap::new(),
            builtin::deep_dive_fallback(),
        );
        assert!(matches!(result, Err(ContentError::EmptyDataset)));
    }
}
