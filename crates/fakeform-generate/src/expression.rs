//! `#{provider.operation}` expression strings.
//!
//! The wrapping `#{…}` is optional, so `svnr.svnr` and `#{svnr.svnr}`
//! resolve identically. Anything after the first whitespace inside the
//! braces is a parameter string, e.g.
//! `#{svnr.svnr_for birth_date=010180}`.

use crate::errors::GenerateError;
use crate::params::Params;

/// A parsed expression: provider, operation, and inline parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    provider: String,
    operation: String,
    params: Params,
}

impl Expression {
    pub fn new(provider: &str, operation: &str) -> Self {
        Self {
            provider: provider.to_string(),
            operation: operation.to_string(),
            params: Params::empty(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, GenerateError> {
        let trimmed = input.trim();
        let inner = if let Some(stripped) = trimmed.strip_prefix("#{") {
            stripped
                .strip_suffix('}')
                .ok_or_else(|| GenerateError::InvalidExpression(input.to_string()))?
        } else {
            trimmed
        };

        let (head, payload) = match inner.split_once(char::is_whitespace) {
            Some((head, payload)) => (head, payload.trim()),
            None => (inner, ""),
        };

        let Some((provider, operation)) = head.split_once('.') else {
            return Err(GenerateError::InvalidExpression(input.to_string()));
        };
        if provider.is_empty() || operation.is_empty() || operation.contains('.') {
            return Err(GenerateError::InvalidExpression(input.to_string()));
        }

        Ok(Self {
            provider: provider.to_string(),
            operation: operation.to_string(),
            params: Params::parse(payload),
        })
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Column label for formatted output: the text after the dot, as a
    /// field name.
    pub fn field_name(&self) -> &str {
        &self.operation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_and_wrapped_forms() {
        let bare = Expression::parse("svnr.svnr").expect("valid");
        let wrapped = Expression::parse("#{svnr.svnr}").expect("valid");
        assert_eq!(bare, wrapped);
        assert_eq!(bare.provider(), "svnr");
        assert_eq!(bare.operation(), "svnr");
        assert_eq!(bare.field_name(), "svnr");
    }

    #[test]
    fn parses_inline_parameters() {
        let expression =
            Expression::parse("#{svnr.svnr_for birth_date=010180}").expect("valid");
        assert_eq!(expression.operation(), "svnr_for");
        assert_eq!(expression.params().get("birth_date"), Some("010180"));
    }

    #[test]
    fn rejects_malformed_expressions() {
        for input in ["#{svnr.svnr", "justoneword", ".svnr", "svnr.", "a.b.c", ""] {
            assert!(
                matches!(
                    Expression::parse(input),
                    Err(GenerateError::InvalidExpression(_))
                ),
                "expected rejection for {input:?}"
            );
        }
    }
}
