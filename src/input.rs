//! Query input gating and example-query shortcuts.

/// Example queries offered as one-click shortcuts.
pub const EXAMPLE_QUERIES: &[&str] = &[
    "troubleshoot crashloopbackoff",
    "python logging standards",
    "python best practices",
    "Who works on the checkout API?",
    "How do I fetch a product by id?",
    "AWS lambda functions",
];

/// Owns the query text and decides when a submission may fire.
#[derive(Debug, Clone, Default)]
pub struct QueryInput {
    value: String,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Yields the trimmed query when non-empty; otherwise `None` and no
    /// submission fires.
    pub fn submit(&self) -> Option<String> {
        let trimmed = self.value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Select an example query: sets the input value to the example's text
    /// and immediately yields it for submission. This is the one place where
    /// selection fires a search without an explicit submit.
    pub fn pick_example(&mut self, index: usize) -> Option<&'static str> {
        let example = *EXAMPLE_QUERIES.get(index)?;
        self.value = example.to_string();
        Some(example)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_does_not_submit() {
        let input = QueryInput::new();
        assert_eq!(input.submit(), None);
    }

    #[test]
    fn test_whitespace_only_input_does_not_submit() {
        let mut input = QueryInput::new();
        input.set_value("   \t ");
        assert_eq!(input.submit(), None);
    }

    #[test]
    fn test_submit_trims_the_query() {
        let mut input = QueryInput::new();
        input.set_value("  kubernetes deployment  ");
        assert_eq!(input.submit().as_deref(), Some("kubernetes deployment"));
    }

    #[test]
    fn test_pick_example_sets_value_and_fires() {
        let mut input = QueryInput::new();
        let fired = input.pick_example(0);
        assert_eq!(fired, Some(EXAMPLE_QUERIES[0]));
        assert_eq!(input.value(), EXAMPLE_QUERIES[0]);
    }

    #[test]
    fn test_pick_example_out_of_range_is_a_noop() {
        let mut input = QueryInput::new();
        input.set_value("typed so far");
        assert_eq!(input.pick_example(EXAMPLE_QUERIES.len()), None);
        assert_eq!(input.value(), "typed so far");
    }
}
