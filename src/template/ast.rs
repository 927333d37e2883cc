//! Template tree
//!
//!     The tree produced by the parser is deliberately flat: a template is a list of segments,
//!     and placeholders only nest their own children (hint, name, format). See [nodes] for the
//!     node shapes and [tree] for the root.
//!
//!     Modules layered on top of the tree never feed back into parsing:
//!         - [snapshot]: normalized node view shared by the text serializers
//!         - [lookup]: position based queries for editors
//!         - [diagnostics]: strict validation pass over a parsed template
//!         - [highlights]: classified spans for syntax highlighting

pub mod diagnostics;
pub mod highlights;
pub mod lookup;
pub mod nodes;
pub mod range;
pub mod snapshot;
pub mod tree;

pub use diagnostics::{Diagnostic, DiagnosticOptions, DiagnosticSeverity};
pub use highlights::{Highlight, HighlightKind};
pub use nodes::{
    BuiltinProperty, DottedName, FormatSpec, GoProperty, Hint, HintKind, Identifier,
    InvalidPropertyName, LiteralText, NumericIndex, Property, PropertyName, Segment,
    SegmentKind,
};
pub use range::{Position, Range, SourceLocation};
pub use snapshot::{snapshot_from_template, TemplateSnapshot};
pub use tree::Template;
