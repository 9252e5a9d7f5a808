//! Pluggable external strategies, consulted only when AI mode is on.

use crate::core::types::Candidate;
use crate::errors::Result;

/// Resolves a token the local strategies could not handle.
///
/// `context` is the full input text the token came from.
pub trait FallbackStrategy: Send + Sync {
    fn resolve(&self, token: &str, context: &str) -> Result<Option<Candidate>>;
}

/// Produces a gloss for text the offline engine is not confident about.
pub trait TranslationFallback: Send + Sync {
    fn translate(&self, text: &str) -> Result<Option<String>>;
}

impl<F> FallbackStrategy for F
where
    F: Fn(&str, &str) -> Result<Option<Candidate>> + Send + Sync,
{
    fn resolve(&self, token: &str, context: &str) -> Result<Option<Candidate>> {
        self(token, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Method, Sign};

    #[test]
    fn test_closure_is_a_strategy() {
        let strategy = |token: &str, _ctx: &str| -> Result<Option<Candidate>> {
            Ok(Some(Candidate::found(
                vec![Sign::new("00001", token)],
                token,
                Method::Fallback("model".to_string()),
            )))
        };
        let cand = strategy.resolve("hej", "hej då").unwrap().unwrap();
        assert_eq!(cand.base, "hej");
    }
}
