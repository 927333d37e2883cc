//! S-expression rendering
//!
//! One line, stable, and compact enough to compare whole trees in test assertions. This is also
//! what `Display` prints for a [`Template`].
//!
//! ```text
//! a{@Name:x}b  →  (template (literal_text "a") (property hint: (hint "@") name: (dotted_name (identifier "Name")) format: (format_spec "x")) (literal_text "b"))
//! ```
//!
//! Strings are printed with Rust debug escaping. A placeholder that never reached its closer ends
//! with `(MISSING "}")` (or `"}}"` for go properties).

use super::registry::{FormatError, Formatter};
use crate::template::ast::{PropertyName, Segment, Template};

pub fn to_sexp_string(template: &Template) -> String {
    let mut output = String::from("(template");
    for segment in template.iter() {
        output.push(' ');
        write_segment(&mut output, segment);
    }
    output.push(')');
    output
}

pub fn segment_to_sexp(segment: &Segment) -> String {
    let mut output = String::new();
    write_segment(&mut output, segment);
    output
}

fn write_segment(output: &mut String, segment: &Segment) {
    if let Segment::LiteralText(literal) = segment {
        output.push_str(&format!("(literal_text {:?})", literal.text));
        return;
    }

    output.push('(');
    output.push_str(segment.kind().node_type());

    if let Some(hint) = segment.hint() {
        output.push_str(&format!(" hint: (hint \"{}\")", hint.kind));
    }
    if segment.as_go_property().is_some_and(|go| go.leading_dot) {
        output.push_str(" dot: \".\"");
    }
    if let Some(name) = segment.name() {
        output.push_str(" name: ");
        write_name(output, name);
    }
    if let Some(format) = segment.format() {
        output.push_str(&format!(" format: (format_spec {:?})", format.text));
    }
    if !segment.is_closed() {
        if let Some(closer) = segment.kind().closer() {
            output.push_str(&format!(" (MISSING \"{}\")", closer));
        }
    }

    output.push(')');
}

fn write_name(output: &mut String, name: &PropertyName) {
    match name {
        PropertyName::NumericIndex(index) => {
            output.push_str(&format!("(numeric_index \"{}\")", index.value))
        }
        PropertyName::DottedName(dotted) => {
            output.push_str("(dotted_name");
            for part in dotted.parts() {
                output.push_str(&format!(" (identifier {:?})", part.name));
            }
            output.push(')');
        }
    }
}

pub struct SexpFormatter;

impl Formatter for SexpFormatter {
    fn name(&self) -> &str {
        "sexp"
    }

    fn serialize(&self, template: &Template) -> Result<String, FormatError> {
        Ok(to_sexp_string(template))
    }

    fn description(&self) -> &str {
        "Single line S-expression of the tree"
    }
}
