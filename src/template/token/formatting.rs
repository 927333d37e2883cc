//! Detokenizer
//!
//! Converts a token stream back into source text. The stream covers every input byte, so
//! `detokenize(&tokenize(s)) == s` for any `s`; the round-trip tests rely on it.

use super::stream::TemplateToken;
use std::ops::Range;

pub trait ToTemplateString {
    fn to_template_string(&self) -> String;
}

impl ToTemplateString for TemplateToken {
    fn to_template_string(&self) -> String {
        match self {
            TemplateToken::LiteralText(text)
            | TemplateToken::LineBreak(text)
            | TemplateToken::Identifier(text)
            | TemplateToken::Number(text)
            | TemplateToken::FormatText(text) => text.clone(),
            TemplateToken::PropertyOpen => "{".to_string(),
            TemplateToken::GoPropertyOpen => "{{".to_string(),
            TemplateToken::BuiltinOpen => "${".to_string(),
            TemplateToken::PropertyClose => "}".to_string(),
            TemplateToken::GoPropertyClose => "}}".to_string(),
            TemplateToken::Hint(kind) => kind.as_char().to_string(),
            TemplateToken::Dot => ".".to_string(),
            TemplateToken::Colon => ":".to_string(),
        }
    }
}

pub fn detokenize(tokens: &[(TemplateToken, Range<usize>)]) -> String {
    tokens
        .iter()
        .map(|(token, _)| token.to_template_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::lexing::tokenize;

    #[test]
    fn test_detokenize_round_trip() {
        for source in [
            "",
            "plain",
            "Hi {@User.Name:j}!\r\n{{.Go}} ${Env:u}",
            "{0.b} {a {{x} $ {",
            "\n\n{Time:HH:mm}\r",
        ] {
            assert_eq!(detokenize(&tokenize(source)), source);
        }
    }
}
