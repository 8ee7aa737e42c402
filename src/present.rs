//! Pure result-to-presentation mapping.
//!
//! Both functions here are total, deterministic, and side-effect-free:
//! a score maps to a display tier, and a result body maps to a bounded
//! excerpt.

/// Maximum excerpt length in characters, excluding the ellipsis marker.
pub const EXCERPT_LIMIT: usize = 300;

/// Three-level relevance classification derived from a result score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Excellent,
    Good,
    Weak,
}

impl ScoreTier {
    /// Classify a score. Boundary values belong to the higher tier.
    pub fn of(score: f64) -> Self {
        if score >= 0.8 {
            ScoreTier::Excellent
        } else if score >= 0.6 {
            ScoreTier::Good
        } else {
            ScoreTier::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent Match",
            ScoreTier::Good => "Good Match",
            ScoreTier::Weak => "Weak Match",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "green",
            ScoreTier::Good => "yellow",
            ScoreTier::Weak => "red",
        }
    }
}

/// Bounded preview of a result's full text.
///
/// Returns the text unchanged when it fits within `limit` characters;
/// otherwise the first `limit` characters followed by a three-character
/// ellipsis marker.
pub fn excerpt(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(limit).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_belong_to_the_higher_tier() {
        assert_eq!(ScoreTier::of(0.8), ScoreTier::Excellent);
        assert_eq!(ScoreTier::of(0.6), ScoreTier::Good);
    }

    #[test]
    fn test_tier_ranges() {
        assert_eq!(ScoreTier::of(1.0), ScoreTier::Excellent);
        assert_eq!(ScoreTier::of(0.92), ScoreTier::Excellent);
        assert_eq!(ScoreTier::of(0.799), ScoreTier::Good);
        assert_eq!(ScoreTier::of(0.65), ScoreTier::Good);
        assert_eq!(ScoreTier::of(0.599), ScoreTier::Weak);
        assert_eq!(ScoreTier::of(0.0), ScoreTier::Weak);
    }

    #[test]
    fn test_tier_labels_and_colors() {
        assert_eq!(ScoreTier::Excellent.label(), "Excellent Match");
        assert_eq!(ScoreTier::Good.label(), "Good Match");
        assert_eq!(ScoreTier::Weak.label(), "Weak Match");
        assert_eq!(ScoreTier::Excellent.color(), "green");
        assert_eq!(ScoreTier::Good.color(), "yellow");
        assert_eq!(ScoreTier::Weak.color(), "red");
    }

    #[test]
    fn test_excerpt_short_text_unchanged() {
        assert_eq!(excerpt("short", EXCERPT_LIMIT), "short");
    }

    #[test]
    fn test_excerpt_at_the_limit_unchanged() {
        let text = "x".repeat(EXCERPT_LIMIT);
        assert_eq!(excerpt(&text, EXCERPT_LIMIT), text);
    }

    #[test]
    fn test_excerpt_truncates_to_limit_plus_marker() {
        let text = "x".repeat(EXCERPT_LIMIT + 50);
        let preview = excerpt(&text, EXCERPT_LIMIT);
        assert_eq!(preview.chars().count(), EXCERPT_LIMIT + 3);
        assert!(preview.ends_with("..."));
        assert!(preview.starts_with(&"x".repeat(EXCERPT_LIMIT)));
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let text = "é".repeat(EXCERPT_LIMIT + 1);
        let preview = excerpt(&text, EXCERPT_LIMIT);
        assert_eq!(preview.chars().count(), EXCERPT_LIMIT + 3);
        assert!(preview.ends_with("..."));
    }
}
