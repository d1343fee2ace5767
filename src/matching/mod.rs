//! Skill matching: scoring designers against a task's requirements.
//!
//! Provides match rules (service category, keyword overlap, language,
//! past-task similarity) and a `SkillMatcher` that combines them into a
//! bounded score and a deterministic ranking.
//!
//! # Usage
//!
//! ```
//! use designer_schedule::matching::{rules, SkillMatcher};
//!
//! let matcher = SkillMatcher::new()
//!     .with_rule(rules::ServiceCategory, 0.6)
//!     .with_rule(rules::KeywordOverlap, 0.4);
//! // let ranked = matcher.rank_designers(&task, &roster);
//! ```
//!
//! # Score Convention
//! Rules return a fraction in [0, 1], **higher = better fit**, or `None`
//! when the rule does not apply to the task (e.g. no language required).
//! Non-applicable rules are left out of the weighted average.

mod context;
mod engine;
pub mod rules;
pub mod text;

pub use context::MatchContext;
pub use engine::SkillMatcher;

use crate::models::{Designer, TaskRequirement};
use std::fmt::Debug;

/// A rule's verdict for one designer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleMatch {
    /// Fraction in [0, 1].
    pub score: f64,
    /// Operator-facing reasons behind the score.
    pub reasons: Vec<String>,
}

impl RuleMatch {
    pub fn new(score: f64) -> Self {
        Self {
            score: if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) },
            reasons: Vec::new(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }
}

/// A rule scoring one aspect of a designer's fit for a task.
pub trait MatchRule: Send + Sync + Debug {
    /// Rule name (e.g., "SERVICE", "KEYWORD").
    fn name(&self) -> &'static str;

    /// Scores a designer, or returns `None` if the rule does not apply.
    fn evaluate(
        &self,
        designer: &Designer,
        task: &TaskRequirement,
        context: &MatchContext,
    ) -> Option<RuleMatch>;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
