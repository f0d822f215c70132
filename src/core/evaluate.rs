//! Schema-matching evaluator.
//!
//! Given the active problem's option set and a user-selected option id,
//! determine correctness and produce feedback. Pure: never mutates the
//! problem; the caller (the reducer) decides whether to transition.

use std::fmt;

use crate::content::Problem;

/// Evaluation result; borrows the explanation from the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict<'a> {
    pub is_correct: bool,
    pub explanation: &'a str,
}

/// The given option id does not belong to the problem's option set.
/// This indicates a caller or data-integrity bug, never expected in
/// normal operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    pub problem_id: String,
    pub option_id: String,
}

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "option {} does not belong to problem {}",
            self.option_id, self.problem_id
        )
    }
}

impl std::error::Error for UnknownOption {}

pub fn evaluate<'a>(problem: &'a Problem, option_id: &str) -> Result<Verdict<'a>, UnknownOption> {
    let option = problem
        .schema_options
        .iter()
        .find(|opt| opt.id == option_id)
        .ok_or_else(|| UnknownOption {
            problem_id: problem.id.clone(),
            option_id: option_id.to_string(),
        })?;
    Ok(Verdict {
        is_correct: option.is_correct,
        explanation: &option.explanation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRegistry;

    #[test]
    fn correct_option_yields_correct_verdict() {
        let registry = ContentRegistry::builtin().unwrap();
        let problem = registry.problem("prob_001").unwrap();
        let verdict = evaluate(problem, "opt_B").unwrap();
        assert!(verdict.is_correct);
        assert!(verdict.explanation.starts_with("正确！"));
    }

    #[test]
    fn wrong_option_yields_its_explanation() {
        let registry = ContentRegistry::builtin().unwrap();
        let problem = registry.problem("prob_001").unwrap();
        let verdict = evaluate(problem, "opt_A").unwrap();
        assert!(!verdict.is_correct);
        assert_eq!(
            verdict.explanation,
            problem.schema_options[0].explanation
        );
    }

    #[test]
    fn unknown_option_is_an_error() {
        let registry = ContentRegistry::builtin().unwrap();
        let problem = registry.problem("prob_001").unwrap();
        let err = evaluate(problem, "opt_Z").unwrap_err();
        assert_eq!(err.option_id, "opt_Z");
        assert_eq!(err.problem_id, "prob_001");
    }

    #[test]
    fn evaluate_is_idempotent_and_does_not_mutate() {
        let registry = ContentRegistry::builtin().unwrap();
        let problem = registry.problem("prob_001").unwrap().clone();
        let before = problem.clone();
        let first = evaluate(&problem, "opt_B").unwrap();
        let second = evaluate(&problem, "opt_B").unwrap();
        assert_eq!(first, second);
        assert_eq!(problem, before);
    }
}
