//! Text matching utilities for AST assertions

/// Text matching strategies for assertions
#[derive(Debug, Clone)]
pub enum TextMatch {
    /// Exact text match
    Exact(String),
    /// Text starts with prefix
    StartsWith(String),
    /// Text contains substring
    Contains(String),
}

impl TextMatch {
    /// Assert that the actual text matches this pattern
    pub fn assert(&self, actual: &str, context: &str) {
        match self {
            TextMatch::Exact(expected) => {
                assert_eq!(
                    actual, expected,
                    "{context}: Expected text to be {expected:?}, but got {actual:?}"
                );
            }
            TextMatch::StartsWith(prefix) => {
                assert!(
                    actual.starts_with(prefix),
                    "{context}: Expected text to start with {prefix:?}, but got {actual:?}"
                );
            }
            TextMatch::Contains(substring) => {
                assert!(
                    actual.contains(substring),
                    "{context}: Expected text to contain {substring:?}, but got {actual:?}"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches() {
        TextMatch::Exact("abc".to_string()).assert("abc", "ctx");
        TextMatch::StartsWith("ab".to_string()).assert("abc", "ctx");
        TextMatch::Contains("b".to_string()).assert("abc", "ctx");
    }

    #[test]
    #[should_panic(expected = "ctx: Expected text to start with \"x\", but got \"abc\"")]
    fn test_prefix_mismatch() {
        TextMatch::StartsWith("x".to_string()).assert("abc", "ctx");
    }
}
