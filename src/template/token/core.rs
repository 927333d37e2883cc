//! Placeholder interior tokens
//!
//! The logos lexer only ever runs inside a placeholder, over the slice between the opener and
//! the end of the current line. Literal text is the scanner's business and has no token here.

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    #[token("{{")]
    DoubleOpenBrace,
    #[token("}}")]
    DoubleCloseBrace,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,

    #[token("$")]
    Dollar,
    #[token("@")]
    At,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Values beyond u64 fail the callback and surface as a lex error
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    Number(u64),

    #[regex(r"[ \t]+")]
    Whitespace,
}

impl Token {
    pub fn is_hint(&self) -> bool {
        matches!(self, Token::At | Token::Dollar)
    }

    /// Tokens a placeholder head is made of: hints, dots, identifiers and numbers.
    pub fn belongs_to_head(&self) -> bool {
        self.is_hint() || matches!(self, Token::Dot | Token::Identifier(_) | Token::Number(_))
    }
}

/// Lex `source` into tokens with absolute spans, starting at byte `offset`.
///
/// Lexing is lazy and stops at the first token that cannot be part of a head (`:`, a closer,
/// whitespace, another brace) or at the first lex error. A placeholder therefore never lexes
/// past the next brace, and each byte of a line is lexed by at most one placeholder.
pub fn lex_head(source: &str, offset: usize) -> Vec<(Token, std::ops::Range<usize>)> {
    Token::lexer(source)
        .spanned()
        .map_while(|(result, span)| match result {
            Ok(token) if token.belongs_to_head() => {
                Some((token, span.start + offset..span.end + offset))
            }
            _ => None,
        })
        .collect()
}
