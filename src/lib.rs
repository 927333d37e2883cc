//! # mtlog-template
//!
//! A tolerant parser for message templates.
//!
//! A message template mixes literal text with placeholders written in three syntaxes:
//!
//! ```text
//! User {@User} logged in from {Ip:l}     single brace, optional hint and format
//! Rendered by {{.Handler}}               double brace (Go template style)
//! Started at ${Timestamp:HH:mm:ss}       dollar brace, built-in values
//! ```
//!
//! Parsing never fails: whatever the input, [`parse_template`](template::parse_template)
//! returns a [`Template`](template::ast::Template). Text that only looks like a placeholder
//! degrades to literal text, and placeholders that start but do not finish come back as
//! nodes with their missing parts absent.
//!
//! File Layout
//!
//! src/template
//!   ├── lexing      Cursor, segment scanner and the token stream driver
//!   ├── token       Placeholder tokens (logos) and the stream token model
//!   ├── parsing     Placeholder grammar and the reducer building the tree
//!   ├── ast         Template tree, locations, diagnostics, highlights
//!   ├── formats     Serializers (sexp, treeviz, tag, json, yaml)
//!   ├── processor   Stage/format selection used by the CLI
//!   ├── config      Layered configuration
//!   └── testing     Fluent assertions for tests
//!
//! For testing guidelines, see the [testing module](template::testing).

pub mod template;

pub use template::ast::Template;
pub use template::parse_template;
