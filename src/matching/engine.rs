//! Skill matcher: weighted rule combination and ranking.

use std::sync::Arc;

use super::{rules, MatchContext, MatchRule};
use crate::config::MatchingConfig;
use crate::models::{Designer, MatchResult, TaskRequirement};

#[derive(Clone)]
struct WeightedRule {
    rule: Arc<dyn MatchRule>,
    weight: f64,
}

/// Scores and ranks designers for a task.
///
/// The score is the weighted average of all applicable rules, scaled to
/// [0, 100] and rounded to two decimals. Rounding keeps ties exact, so
/// the id tie-break is reached reliably.
///
/// # Example
/// ```
/// use designer_schedule::matching::{rules, SkillMatcher};
///
/// let matcher = SkillMatcher::new()
///     .with_rule(rules::ServiceCategory, 0.7)
///     .with_rule(rules::History, 0.3);
/// ```
#[derive(Clone)]
pub struct SkillMatcher {
    rules: Vec<WeightedRule>,
    min_token_len: usize,
}

impl SkillMatcher {
    /// Creates a matcher with no rules.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            min_token_len: MatchingConfig::default().min_token_len,
        }
    }

    /// Creates the standard four-rule matcher from configured weights.
    pub fn from_config(config: &MatchingConfig) -> Self {
        Self::new()
            .with_rule(rules::ServiceCategory, config.service)
            .with_rule(rules::KeywordOverlap, config.keyword)
            .with_rule(rules::Language, config.language)
            .with_rule(rules::History, config.history)
            .with_min_token_len(config.min_token_len)
    }

    /// Adds a rule with a weight (negative weights count as zero).
    pub fn with_rule<R: MatchRule + 'static>(mut self, rule: R, weight: f64) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight: weight.max(0.0),
        });
        self
    }

    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len.max(1);
        self
    }

    /// Scores one designer.
    ///
    /// Designers without profile data score 0 with the rationale
    /// "no match information"; they are never dropped.
    pub fn score(
        &self,
        designer: &Designer,
        task: &TaskRequirement,
        context: &MatchContext,
    ) -> MatchResult {
        if !designer.has_profile() {
            return MatchResult::no_information(&designer.id, designer.display_name());
        }

        let mut weighted_sum = 0.0;
        let mut applicable_weight = 0.0;
        let mut reasons = Vec::new();

        for wr in &self.rules {
            if let Some(m) = wr.rule.evaluate(designer, task, context) {
                weighted_sum += wr.weight * m.score;
                applicable_weight += wr.weight;
                if wr.weight > 0.0 {
                    reasons.extend(m.reasons);
                }
            }
        }

        let raw = if applicable_weight > 0.0 {
            100.0 * weighted_sum / applicable_weight
        } else {
            0.0
        };
        let score = (raw.clamp(0.0, 100.0) * 100.0).round() / 100.0;

        MatchResult {
            designer_id: designer.id.clone(),
            designer_name: designer.display_name().to_string(),
            score,
            rationale: if reasons.is_empty() {
                None
            } else {
                Some(reasons.join("; "))
            },
            has_profile: true,
        }
    }

    /// Ranks a roster for a task, best fit first.
    ///
    /// Every designer appears exactly once. Equal scores are ordered by
    /// designer id ascending, so unchanged input always yields the same
    /// order.
    pub fn rank_designers(&self, task: &TaskRequirement, roster: &[Designer]) -> Vec<MatchResult> {
        let context = MatchContext::from_roster(roster, self.min_token_len);

        let mut results: Vec<MatchResult> = roster
            .iter()
            .map(|d| {
                let result = self.score(d, task, &context);
                tracing::debug!(
                    designer_id = %result.designer_id,
                    score = result.score,
                    "scored designer"
                );
                result
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.designer_id.cmp(&b.designer_id))
        });
        results
    }
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::from_config(&MatchingConfig::default())
    }
}

impl std::fmt::Debug for SkillMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillMatcher")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| format!("{}(w={})", r.rule.name(), r.weight))
                    .collect::<Vec<_>>(),
            )
            .field("min_token_len", &self.min_token_len)
            .finish()
    }
}
