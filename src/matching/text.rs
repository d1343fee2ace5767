//! Text normalisation for keyword matching.

use std::collections::BTreeSet;

/// Words too common in task and profile text to carry signal.
const STOPWORDS: &[&str] = &[
    "and", "the", "for", "with", "from", "into", "our", "your", "this", "that", "are", "was",
    "will", "new", "all", "per", "via", "use", "using", "need", "needs", "please",
];

/// Splits text into lowercase alphanumeric terms.
///
/// Terms shorter than `min_len` characters and stopwords are dropped.
/// A `BTreeSet` keeps iteration order stable across runs.
pub fn tokenize(text: &str, min_len: usize) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .filter(|t| t.chars().count() >= min_len)
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .collect()
}

/// Lowercases and collapses whitespace, for exact label comparison.
pub fn normalize(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Jaccard similarity of two term sets (0.0 when both are empty).
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let terms = tokenize("Logo & Brand-Identity for the Café, v2", 3);
        let terms: Vec<&str> = terms.iter().map(String::as_str).collect();
        assert_eq!(terms, vec!["brand", "café", "identity", "logo"]);
    }

    #[test]
    fn test_tokenize_min_len() {
        assert!(tokenize("ui ux", 3).is_empty());
        assert_eq!(tokenize("ui ux", 2).len(), 2);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Logo   DESIGN "), "logo design");
    }

    #[test]
    fn test_jaccard() {
        let a = tokenize("poster print layout", 3);
        let b = tokenize("print layout brochure", 3);
        assert!((jaccard(&a, &b) - 0.5).abs() < 1e-10); // 2 shared / 4 total
        assert_eq!(jaccard(&BTreeSet::new(), &BTreeSet::new()), 0.0);
    }
}
