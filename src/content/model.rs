//! Content model types and dataset validation.
//!
//! A [`Problem`] is one practice item: the raw statement, the trigger spans
//! to highlight in it, the schema-matching quiz options, the guided solution
//! steps (with optional pitfalls), the generated TAP summary card, and the
//! related links shown on the summary screen.
//!
//! Invariants the dataset must satisfy are enforced by [`validate_problem`]
//! and [`validate_schema`]; the registry constructor runs them over the
//! whole dataset so malformed content is rejected at startup rather than
//! discovered mid-flow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The radial summary layout has five fixed node positions.
pub const MAX_RELATED_LINKS: usize = 5;

/// A substring of the problem statement that should cue recognition of a
/// specific mental model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub id: String,
    /// Literal text to locate in `Problem::raw_text`.
    pub text: String,
    /// Links to a mental model in the schema library.
    pub schema_id: String,
}

/// One answer in the schema-matching quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaOption {
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_correct: bool,
    /// Why this option is right or wrong; shown as feedback either way.
    pub explanation: String,
}

/// A documented common error anchored to a solution step. It must be shown
/// at least once before the user may advance past that step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pitfall {
    pub title: String,
    pub description: String,
    /// The "painful lesson" - a concrete counterexample.
    pub counter_example: String,
}

/// One step of the guided solution scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    /// What the user should do on paper.
    pub instruction: String,
    /// The actual logic/math content.
    pub content: String,
    pub pitfall: Option<Pitfall>,
}

/// The three-field summary generated at the end of a guided solution.
/// Also reused as the body of a library [`SchemaItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TapCard {
    pub trigger: String,
    pub action: String,
    pub pitfall: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// A solvable variant problem (变式题).
    Variant,
    /// A standalone concept explainer (关联概念).
    Concept,
}

/// A pointer from a completed problem to a variant or concept explainer,
/// resolved by id against the registry's deep-dive table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedLink {
    pub id: String,
    pub title: String,
    pub kind: LinkKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotebookStatus {
    Reviewing,
    Mastered,
}

impl NotebookStatus {
    pub fn label(&self) -> &'static str {
        match self {
            NotebookStatus::Reviewing => "待复习",
            NotebookStatus::Mastered => "已掌握",
        }
    }
}

/// Mistake-notebook metadata attached to a problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookMeta {
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub status: NotebookStatus,
    /// Name of the schema linked to this mistake.
    pub schema_title: String,
}

/// One practice item. Defined at startup, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub raw_text: String,
    pub triggers: Vec<Trigger>,
    pub schema_options: Vec<SchemaOption>,
    pub steps: Vec<Step>,
    pub tap_card: TapCard,
    pub related_links: Vec<RelatedLink>,
    pub notebook: Option<NotebookMeta>,
}

impl Problem {
    /// The single correct quiz option. Validation guarantees exactly one
    /// exists, so this only returns `None` on an unvalidated problem.
    pub fn correct_option(&self) -> Option<&SchemaOption> {
        self.schema_options.iter().find(|opt| opt.is_correct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaCategory {
    Function,
    Sequence,
    Geometry,
    Statistics,
}

impl SchemaCategory {
    pub const ALL: [SchemaCategory; 4] = [
        SchemaCategory::Function,
        SchemaCategory::Sequence,
        SchemaCategory::Geometry,
        SchemaCategory::Statistics,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SchemaCategory::Function => "函数与导数",
            SchemaCategory::Sequence => "数列",
            SchemaCategory::Geometry => "解析几何",
            SchemaCategory::Statistics => "概率统计",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            SchemaCategory::Function => "函数",
            SchemaCategory::Sequence => "数列",
            SchemaCategory::Geometry => "几何",
            SchemaCategory::Statistics => "统计",
        }
    }
}

/// A reusable mental-model library entry, independent of any single problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaItem {
    pub id: String,
    pub category: SchemaCategory,
    pub title: String,
    pub sub_title: String,
    /// 0..=100. Display-only mock data; nothing in the flow updates it.
    pub mastery_level: u8,
    /// Display string like "2天前"; not a parsed date.
    pub last_reviewed: String,
    pub tap: TapCard,
}

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
pub enum ContentError {
    /// The problem dataset is empty; the first problem is the default
    /// active problem, so at least one is required.
    EmptyDataset,
    /// The quiz is unsolvable (or trivially ambiguous): a problem must have
    /// exactly one correct option.
    CorrectOptionCount { problem_id: String, count: usize },
    EmptyTriggerText { problem_id: String, trigger_id: String },
    /// A trigger's text does not occur verbatim in the raw text, so it
    /// could never be highlighted.
    TriggerNotInText { problem_id: String, trigger_id: String },
    TooManyLinks { problem_id: String, count: usize },
    MasteryOutOfRange { schema_id: String, level: u8 },
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::EmptyDataset => {
                write!(f, "problem dataset is empty (at least one problem is required)")
            }
            ContentError::CorrectOptionCount { problem_id, count } => write!(
                f,
                "problem {problem_id}: expected exactly one correct option, found {count}"
            ),
            ContentError::EmptyTriggerText { problem_id, trigger_id } => {
                write!(f, "problem {problem_id}: trigger {trigger_id} has empty text")
            }
            ContentError::TriggerNotInText { problem_id, trigger_id } => write!(
                f,
                "problem {problem_id}: trigger {trigger_id} text not found in raw text"
            ),
            ContentError::TooManyLinks { problem_id, count } => write!(
                f,
                "problem {problem_id}: {count} related links exceeds the maximum of {MAX_RELATED_LINKS}"
            ),
            ContentError::MasteryOutOfRange { schema_id, level } => {
                write!(f, "schema {schema_id}: mastery level {level} out of range 0..=100")
            }
        }
    }
}

impl std::error::Error for ContentError {}

pub fn validate_problem(problem: &Problem) -> Result<(), ContentError> {
    let correct = problem
        .schema_options
        .iter()
        .filter(|opt| opt.is_correct)
        .count();
    if correct != 1 {
        return Err(ContentError::CorrectOptionCount {
            problem_id: problem.id.clone(),
            count: correct,
        });
    }

    for trigger in &problem.triggers {
        if trigger.text.is_empty() {
            return Err(ContentError::EmptyTriggerText {
                problem_id: problem.id.clone(),
                trigger_id: trigger.id.clone(),
            });
        }
        if !problem.raw_text.contains(&trigger.text) {
            return Err(ContentError::TriggerNotInText {
                problem_id: problem.id.clone(),
                trigger_id: trigger.id.clone(),
            });
        }
    }

    if problem.related_links.len() > MAX_RELATED_LINKS {
        return Err(ContentError::TooManyLinks {
            problem_id: problem.id.clone(),
            count: problem.related_links.len(),
        });
    }

    Ok(())
}

pub fn validate_schema(schema: &SchemaItem) -> Result<(), ContentError> {
    if schema.mastery_level > 100 {
        return Err(ContentError::MasteryOutOfRange {
            schema_id: schema.id.clone(),
            level: schema.mastery_level,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::builtin;

    fn minimal_problem() -> Problem {
        Problem {
            id: "p_test".to_string(),
            raw_text: "若 f(x) 是偶函数，求 a。".to_string(),
            triggers: vec![Trigger {
                id: "t1".to_string(),
                text: "偶函数".to_string(),
                schema_id: "sch_f1".to_string(),
            }],
            schema_options: vec![
                SchemaOption {
                    id: "a".to_string(),
                    title: "A".to_string(),
                    description: String::new(),
                    is_correct: true,
                    explanation: String::new(),
                },
                SchemaOption {
                    id: "b".to_string(),
                    title: "B".to_string(),
                    description: String::new(),
                    is_correct: false,
                    explanation: String::new(),
                },
            ],
            steps: vec![],
            tap_card: TapCard {
                trigger: String::new(),
                action: String::new(),
                pitfall: String::new(),
            },
            related_links: vec![],
            notebook: None,
        }
    }

    #[test]
    fn valid_problem_passes() {
        assert_eq!(validate_problem(&minimal_problem()), Ok(()));
    }

    #[test]
    fn two_correct_options_rejected() {
        let mut problem = minimal_problem();
        problem.schema_options[1].is_correct = true;
        assert_eq!(
            validate_problem(&problem),
            Err(ContentError::CorrectOptionCount {
                problem_id: "p_test".to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn no_correct_option_rejected() {
        let mut problem = minimal_problem();
        problem.schema_options[0].is_correct = false;
        assert!(matches!(
            validate_problem(&problem),
            Err(ContentError::CorrectOptionCount { count: 0, .. })
        ));
    }

    #[test]
    fn trigger_missing_from_text_rejected() {
        let mut problem = minimal_problem();
        problem.triggers[0].text = "单调递增".to_string();
        assert!(matches!(
            validate_problem(&problem),
            Err(ContentError::TriggerNotInText { .. })
        ));
    }

    #[test]
    fn sixth_link_rejected() {
        let mut problem = minimal_problem();
        problem.related_links = (0..6)
            .map(|i| RelatedLink {
                id: format!("r{i}"),
                title: format!("link {i}"),
                kind: LinkKind::Concept,
            })
            .collect();
        assert!(matches!(
            validate_problem(&problem),
            Err(ContentError::TooManyLinks { count: 6, .. })
        ));
    }

    #[test]
    fn mastery_over_100_rejected() {
        let mut schema = builtin::schemas().remove(0);
        schema.mastery_level = 101;
        assert!(matches!(
            validate_schema(&schema),
            Err(ContentError::MasteryOutOfRange { level: 101, .. })
        ));
    }

    #[test]
    fn builtin_problems_have_exactly_one_correct_option() {
        for problem in builtin::problems() {
            let correct = problem.schema_options.iter().filter(|o| o.is_correct).count();
            assert_eq!(correct, 1, "problem {}", problem.id);
        }
    }

    #[test]
    fn builtin_triggers_occur_in_raw_text() {
        for problem in builtin::problems() {
            for trigger in &problem.triggers {
                assert!(
                    problem.raw_text.contains(&trigger.text),
                    "problem {} trigger {}",
                    problem.id,
                    trigger.id
                );
            }
        }
    }
}
