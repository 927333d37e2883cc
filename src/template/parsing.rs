//! Parsing
//!
//!     Parsing never fails. Text that only looks like a placeholder stays literal, and
//!     placeholders that break off early are kept with `closed = false` and whatever children
//!     were recognized before the break. Strict checks are a separate pass, see
//!     [`Template::diagnostics`](crate::template::ast::Template::diagnostics).
//!
//!     - [grammar]: chumsky parsers for placeholder heads
//!     - [reducer]: scanner driver and segment assembly

pub mod grammar;
pub mod reducer;

use crate::template::ast::Template;
pub use reducer::Reducer;

/// Parse a template. Always returns a tree.
pub fn parse_template(source: &str) -> Template {
    let (segments, _) = Reducer::new(source).run();
    Template::new(source.to_string(), segments)
}
