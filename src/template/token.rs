//! Tokens
//!
//!     Two token types live here. [`Token`] is the logos token used to lex placeholder heads.
//!     [`TemplateToken`] is the token stream the reducer works from, covering the whole input,
//!     which is what the `token-*` output formats show.

pub mod core;
pub mod formatting;
pub mod stream;

pub use self::core::{lex_head, Token};
pub use formatting::{detokenize, ToTemplateString};
pub use stream::{TemplateToken, TokenStream};
