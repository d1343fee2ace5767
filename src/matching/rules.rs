//! Built-in match rules.
//!
//! # Rules
//!
//! - **SERVICE**: exact service-category matches, weighted by proficiency
//! - **KEYWORD**: specificity-weighted term overlap with the whole profile
//! - **LANGUAGE**: coverage of the task's required languages
//! - **HISTORY**: similarity to the closest past task
//!
//! All rules return higher scores for better fits.

use std::collections::BTreeSet;

use super::text::{jaccard, normalize, tokenize};
use super::{MatchContext, MatchRule, RuleMatch};
use crate::models::{Category, Designer, Skill, TaskRequirement};

/// Credit multiplier for a service that only shares words with an
/// unresolved category label.
const PARTIAL_SERVICE_CREDIT: f64 = 0.5;

/// Keywords listed in a rationale.
const MAX_LISTED_KEYWORDS: usize = 5;

// ======================== Service category ========================

/// Service-category match.
///
/// For each task category, takes the best credit any of the designer's
/// services earns, then averages over categories:
/// - resolved category, same catalogue id or same name: proficiency
/// - unresolved label, same name: proficiency
/// - unresolved label sharing words with a service name:
///   `0.5 × proficiency × word overlap`
///
/// Not applicable when the task has no categories.
#[derive(Debug, Clone, Copy)]
pub struct ServiceCategory;

impl ServiceCategory {
    fn credit(category: &Category, service: &Skill, min_len: usize) -> (f64, bool) {
        let service_name = normalize(&service.name);
        match category {
            Category::Resolved { id, name } => {
                let same_id = service.category_id.as_deref() == Some(id.as_str());
                if same_id || service_name == normalize(name) {
                    (service.level, true)
                } else {
                    (0.0, false)
                }
            }
            Category::Unresolved { text } => {
                if service_name == normalize(text) {
                    return (service.level, true);
                }
                let overlap = jaccard(&tokenize(text, min_len), &tokenize(&service.name, min_len));
                (PARTIAL_SERVICE_CREDIT * service.level * overlap, false)
            }
        }
    }
}

impl MatchRule for ServiceCategory {
    fn name(&self) -> &'static str {
        "SERVICE"
    }

    fn evaluate(
        &self,
        designer: &Designer,
        task: &TaskRequirement,
        context: &MatchContext,
    ) -> Option<RuleMatch> {
        if task.categories.is_empty() {
            return None;
        }

        let mut total = 0.0;
        let mut reasons = Vec::new();
        for category in &task.categories {
            let mut best: Option<(f64, bool, &Skill)> = None;
            for service in &designer.services {
                let (credit, exact) = Self::credit(category, service, context.min_token_len);
                if credit > best.map_or(0.0, |(c, _, _)| c) {
                    best = Some((credit, exact, service));
                }
            }
            if let Some((credit, exact, service)) = best {
                total += credit;
                if exact {
                    reasons.push(format!(
                        "offers '{}' (level {:.1})",
                        service.name, service.level
                    ));
                } else {
                    reasons.push(format!(
                        "related service '{}' for '{}'",
                        service.name,
                        category.label()
                    ));
                }
            }
        }

        let mut result = RuleMatch::new(total / task.categories.len() as f64);
        result.reasons = reasons;
        Some(result)
    }

    fn description(&self) -> &'static str {
        "Service category match weighted by proficiency"
    }
}

// ======================== Keyword overlap ========================

/// Specificity-weighted keyword overlap.
///
/// Fraction of the task's term weight found anywhere in the designer's
/// profile. Terms are weighted by `MatchContext::specificity`, so a rare
/// shared term counts more than one every designer lists.
///
/// Not applicable when the task text yields no terms.
#[derive(Debug, Clone, Copy)]
pub struct KeywordOverlap;

impl MatchRule for KeywordOverlap {
    fn name(&self) -> &'static str {
        "KEYWORD"
    }

    fn evaluate(
        &self,
        designer: &Designer,
        task: &TaskRequirement,
        context: &MatchContext,
    ) -> Option<RuleMatch> {
        let task_terms = tokenize(&task.requirement_text(), context.min_token_len);
        if task_terms.is_empty() {
            return None;
        }
        let profile_terms = tokenize(&designer.profile_text(), context.min_token_len);

        let total_weight: f64 = task_terms.iter().map(|t| context.specificity(t)).sum();
        let mut shared: Vec<(&String, f64)> = task_terms
            .intersection(&profile_terms)
            .map(|t| (t, context.specificity(t)))
            .collect();
        let shared_weight: f64 = shared.iter().map(|(_, w)| w).sum();

        let mut result = RuleMatch::new(shared_weight / total_weight);
        if !shared.is_empty() {
            // Most specific first; alphabetical among equals.
            shared.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            let listed: Vec<&str> = shared
                .iter()
                .take(MAX_LISTED_KEYWORDS)
                .map(|(t, _)| t.as_str())
                .collect();
            result = result.with_reason(format!("shares keywords: {}", listed.join(", ")));
        }
        Some(result)
    }

    fn description(&self) -> &'static str {
        "Specificity-weighted keyword overlap"
    }
}

// ======================== Language ========================

/// Required-language coverage.
///
/// Not applicable when the task requires no language.
#[derive(Debug, Clone, Copy)]
pub struct Language;

impl MatchRule for Language {
    fn name(&self) -> &'static str {
        "LANGUAGE"
    }

    fn evaluate(
        &self,
        designer: &Designer,
        task: &TaskRequirement,
        _context: &MatchContext,
    ) -> Option<RuleMatch> {
        if task.languages.is_empty() {
            return None;
        }

        let (spoken, missing): (Vec<&String>, Vec<&String>) =
            task.languages.iter().partition(|l| designer.speaks(l));

        let mut result = RuleMatch::new(spoken.len() as f64 / task.languages.len() as f64);
        if !spoken.is_empty() {
            let names: Vec<&str> = spoken.iter().map(|l| l.as_str()).collect();
            result = result.with_reason(format!("works in {}", names.join(", ")));
        }
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|l| l.as_str()).collect();
            result = result.with_reason(format!("does not list {}", names.join(", ")));
        }
        Some(result)
    }

    fn description(&self) -> &'static str {
        "Required language coverage"
    }
}

// ======================== History ========================

/// Similarity to the closest past task.
///
/// Jaccard similarity between the task's terms and each past task
/// description; the best one counts. Designers without history score 0.
///
/// Not applicable when the task text yields no terms.
#[derive(Debug, Clone, Copy)]
pub struct History;

impl MatchRule for History {
    fn name(&self) -> &'static str {
        "HISTORY"
    }

    fn evaluate(
        &self,
        designer: &Designer,
        task: &TaskRequirement,
        context: &MatchContext,
    ) -> Option<RuleMatch> {
        let task_terms: BTreeSet<String> =
            tokenize(&task.requirement_text(), context.min_token_len);
        if task_terms.is_empty() {
            return None;
        }

        let mut best: Option<(f64, &String)> = None;
        for past in &designer.past_tasks {
            let similarity = jaccard(&task_terms, &tokenize(past, context.min_token_len));
            if similarity > best.map_or(0.0, |(s, _)| s) {
                best = Some((similarity, past));
            }
        }

        Some(match best {
            Some((similarity, past)) => {
                RuleMatch::new(similarity).with_reason(format!("similar past task: '{past}'"))
            }
            None => RuleMatch::new(0.0),
        })
    }

    fn description(&self) -> &'static str {
        "Similarity to past task descriptions"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn task() -> TaskRequirement {
        let deadline = Utc.with_ymd_and_hms(2026, 3, 6, 17, 0, 0).unwrap();
        TaskRequirement::new("T1", deadline, Duration::hours(4)).unwrap()
    }

    fn ctx(roster: &[Designer]) -> MatchContext {
        MatchContext::from_roster(roster, 3)
    }

    #[test]
    fn test_service_resolved_by_id() {
        let t = task().with_category(Category::resolved("17", "Presentations"));
        let d = Designer::new("A").with_catalogue_service("17", "Slide decks", 0.8);
        let m = ServiceCategory.evaluate(&d, &t, &ctx(&[])).unwrap();
        assert!((m.score - 0.8).abs() < 1e-10);
        assert!(m.reasons[0].contains("Slide decks"));
    }

    #[test]
    fn test_service_resolved_by_name() {
        let t = task().with_category(Category::resolved("17", "Logo Design"));
        let d = Designer::new("A").with_service("logo  design", 1.0);
        let m = ServiceCategory.evaluate(&d, &t, &ctx(&[])).unwrap();
        assert!((m.score - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_service_unresolved_partial_credit() {
        let t = task().with_category(Category::unresolved("Logo Animation"));
        let d = Designer::new("A").with_service("Logo Design", 1.0);
        let m = ServiceCategory.evaluate(&d, &t, &ctx(&[])).unwrap();
        // overlap {logo} / {logo, animation, design} = 1/3, × 0.5
        assert!((m.score - 0.5 / 3.0).abs() < 1e-10);
        assert!(m.reasons[0].starts_with("related service"));
    }

    #[test]
    fn test_service_exact_beats_generic() {
        let t = task().with_category(Category::unresolved("Logo Design"));
        let exact = Designer::new("A").with_service("Logo Design", 0.6);
        let generic = Designer::new("B").with_service("Logo Animation", 1.0);
        let c = ctx(&[]);
        let a = ServiceCategory.evaluate(&exact, &t, &c).unwrap().score;
        let b = ServiceCategory.evaluate(&generic, &t, &c).unwrap().score;
        assert!(a > b);
    }

    #[test]
    fn test_service_not_applicable_without_categories() {
        let d = Designer::new("A").with_service("Logo Design", 1.0);
        assert!(ServiceCategory.evaluate(&d, &task(), &ctx(&[])).is_none());
    }

    #[test]
    fn test_service_averages_over_categories() {
        let t = task()
            .with_category(Category::unresolved("Logo Design"))
            .with_category(Category::unresolved("Packaging"));
        let d = Designer::new("A").with_service("Logo Design", 1.0);
        let m = ServiceCategory.evaluate(&d, &t, &ctx(&[])).unwrap();
        assert!((m.score - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_keyword_overlap_prefers_rare_terms() {
        let roster = vec![
            Designer::new("A").with_bio("poster illustration"),
            Designer::new("B").with_bio("poster typography"),
            Designer::new("C").with_bio("poster"),
        ];
        let c = ctx(&roster);
        let t = task().with_name("Poster illustration");

        let a = KeywordOverlap.evaluate(&roster[0], &t, &c).unwrap();
        let cc = KeywordOverlap.evaluate(&roster[2], &t, &c).unwrap();
        assert!((a.score - 1.0).abs() < 1e-10);
        // "poster" is common, "illustration" rare → less than half the weight
        assert!(cc.score < 0.5);
        assert_eq!(a.reasons[0], "shares keywords: illustration, poster");
    }

    #[test]
    fn test_keyword_not_applicable_for_empty_text() {
        let d = Designer::new("A").with_bio("poster");
        assert!(KeywordOverlap.evaluate(&d, &task(), &ctx(&[])).is_none());
    }

    #[test]
    fn test_language_coverage() {
        let t = task().with_language("English").with_language("German");
        let d = Designer::new("A").with_language("english");
        let m = Language.evaluate(&d, &t, &ctx(&[])).unwrap();
        assert!((m.score - 0.5).abs() < 1e-10);
        assert_eq!(m.reasons, vec!["works in English", "does not list German"]);
        assert!(Language.evaluate(&d, &task(), &ctx(&[])).is_none());
    }

    #[test]
    fn test_history_best_past_task() {
        let t = task().with_name("Annual report layout");
        let d = Designer::new("A")
            .with_past_task("Menu card")
            .with_past_task("Annual report layout 2025");
        let m = History.evaluate(&d, &t, &ctx(&[])).unwrap();
        assert!((m.score - 0.75).abs() < 1e-10); // 3 shared / 4 total
        assert!(m.reasons[0].contains("Annual report layout 2025"));
    }

    #[test]
    fn test_history_without_past_tasks_scores_zero() {
        let t = task().with_name("Annual report");
        let m = History.evaluate(&Designer::new("A"), &t, &ctx(&[])).unwrap();
        assert_eq!(m.score, 0.0);
        assert!(m.reasons.is_empty());
    }
}
