//! Lexing
//!
//!     Literal text and placeholders are told apart before any token is produced: the
//!     [scanner] walks the input with a [cursor] and emits the longest literal run it can,
//!     declining at bytes that open a placeholder completable on the same line. Only then is
//!     the logos lexer ([`Token`](crate::template::token::Token)) run, over the placeholder's
//!     line, by the reducer.
//!
//!     [`tokenize`] returns the combined stream (literal runs, line breaks and placeholder
//!     tokens) in source order.

pub mod cursor;
pub mod scanner;

pub use cursor::Cursor;
pub use scanner::{scan_literal, Expected, ScanOutcome, ScanState};

use crate::template::parsing::Reducer;
use crate::template::token::TokenStream;

/// The full token stream for `source`. Detokenizing it gives back `source`.
pub fn tokenize(source: &str) -> TokenStream {
    let (_, tokens) = Reducer::new(source).run();
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::token::TemplateToken;

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_go_property() {
        let tokens: Vec<TemplateToken> = tokenize("{{.Name}}")
            .into_iter()
            .map(|(token, _)| token)
            .collect();

        assert_eq!(
            tokens,
            vec![
                TemplateToken::GoPropertyOpen,
                TemplateToken::Dot,
                TemplateToken::Identifier("Name".to_string()),
                TemplateToken::GoPropertyClose,
            ]
        );
    }

    #[test]
    fn test_tokenize_keeps_raw_digits() {
        let tokens = tokenize("{007}");
        assert_eq!(tokens[1].0, TemplateToken::Number("007".to_string()));
        assert_eq!(tokens[1].1, 1..4);
    }
}
