//! Roster-wide statistics passed to match rules.

use std::collections::HashMap;

use super::text::tokenize;
use crate::models::Designer;

/// Term statistics for one ranking pass.
///
/// Built once from the roster snapshot so that every designer is scored
/// against the same term weights.
#[derive(Debug, Clone, Default)]
pub struct MatchContext {
    /// Number of designers in the roster.
    pub roster_size: usize,
    /// Profiles containing each term (term → count).
    pub document_frequency: HashMap<String, usize>,
    /// Minimum token length used for every tokenisation in the pass.
    pub min_token_len: usize,
}

impl MatchContext {
    /// Builds term statistics from a roster.
    pub fn from_roster(roster: &[Designer], min_token_len: usize) -> Self {
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for designer in roster {
            for term in tokenize(&designer.profile_text(), min_token_len) {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }
        Self {
            roster_size: roster.len(),
            document_frequency,
            min_token_len,
        }
    }

    /// Specificity weight of a term: `ln(1 + N / df)`.
    ///
    /// Terms few designers mention weigh more than terms everyone lists.
    /// Unseen terms get the weight of a term seen once.
    pub fn specificity(&self, term: &str) -> f64 {
        let df = self.document_frequency.get(term).copied().unwrap_or(0).max(1);
        let n = self.roster_size.max(1);
        (1.0 + n as f64 / df as f64).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_frequency() {
        let roster = vec![
            Designer::new("A").with_service("Logo Design", 0.8),
            Designer::new("B").with_service("Logo Animation", 0.5),
            Designer::new("C").with_bio("Packaging"),
        ];
        let ctx = MatchContext::from_roster(&roster, 3);
        assert_eq!(ctx.roster_size, 3);
        assert_eq!(ctx.document_frequency["logo"], 2);
        assert_eq!(ctx.document_frequency["packaging"], 1);
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let roster = vec![
            Designer::new("A").with_bio("logo motion"),
            Designer::new("B").with_bio("logo"),
        ];
        let ctx = MatchContext::from_roster(&roster, 3);
        assert!(ctx.specificity("motion") > ctx.specificity("logo"));
        assert!((ctx.specificity("unseen") - ctx.specificity("motion")).abs() < 1e-10);
    }

    #[test]
    fn test_empty_roster() {
        let ctx = MatchContext::from_roster(&[], 3);
        assert!(ctx.specificity("anything") > 0.0);
    }
}
