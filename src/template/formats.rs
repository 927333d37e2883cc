//! Output formats for templates
//!
//! - Tree formats, each a [`Formatter`] in the [`FormatRegistry`]: sexp, treeviz, tag, json,
//!   yaml, diagnostics, highlights
//! - Token streams back to source text: see [`detokenize`](crate::template::token::detokenize)

pub mod data;
pub mod registry;
pub mod sexp;
pub mod tag;
pub mod treeviz;

pub use data::{DiagnosticsFormatter, HighlightsFormatter, JsonFormatter, YamlFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use sexp::{to_sexp_string, SexpFormatter};
pub use tag::{serialize_template as serialize_ast_tag, TagFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
