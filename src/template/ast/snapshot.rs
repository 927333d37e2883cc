//! Template snapshot - a normalized view of the tree
//!
//! The snapshot flattens every node into the same shape (type, label, attributes, children)
//! so the text serializers only deal with presentation. Build one with
//! [`snapshot_from_template`] rather than walking segments in each serializer.

use super::nodes::{FormatSpec, Hint, PropertyName, Segment};
use super::tree::Template;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSnapshot {
    /// e.g. "property", "dotted_name"
    pub node_type: String,
    /// Primary text of the node
    pub label: String,
    pub attributes: BTreeMap<String, String>,
    pub span: Range<usize>,
    pub children: Vec<TemplateSnapshot>,
}

impl TemplateSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            attributes: BTreeMap::new(),
            span,
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn with_child(mut self, child: TemplateSnapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = TemplateSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

pub fn snapshot_from_template(template: &Template) -> TemplateSnapshot {
    TemplateSnapshot::new(
        "template",
        format!("{} segments", template.len()),
        0..template.source().len(),
    )
    .with_children(
        template
            .iter()
            .map(|segment| snapshot_segment(template, segment)),
    )
}

pub fn snapshot_segment(template: &Template, segment: &Segment) -> TemplateSnapshot {
    let node = TemplateSnapshot::new(
        segment.kind().node_type(),
        template.raw_text(segment),
        segment.span(),
    );

    match segment {
        Segment::LiteralText(_) => node,
        Segment::Property(property) => node
            .with_attribute("closed", property.closed.to_string())
            .with_children(property.hint.as_ref().map(snapshot_hint))
            .with_children(property.name.as_ref().map(snapshot_name))
            .with_children(property.format.as_ref().map(snapshot_format)),
        Segment::GoProperty(property) => node
            .with_attribute("closed", property.closed.to_string())
            .with_attribute("leading_dot", property.leading_dot.to_string())
            .with_children(property.name.as_ref().map(snapshot_name))
            .with_children(property.format.as_ref().map(snapshot_format)),
        Segment::BuiltinProperty(property) => node
            .with_attribute("closed", property.closed.to_string())
            .with_children(property.name.as_ref().map(snapshot_name))
            .with_children(property.format.as_ref().map(snapshot_format)),
    }
}

fn snapshot_hint(hint: &Hint) -> TemplateSnapshot {
    TemplateSnapshot::new("hint", hint.kind.to_string(), hint.span.clone())
        .with_attribute("kind", format!("{:?}", hint.kind).to_lowercase())
}

fn snapshot_name(name: &PropertyName) -> TemplateSnapshot {
    let node = TemplateSnapshot::new(name.node_type(), name.to_string(), name.span());
    match name {
        PropertyName::NumericIndex(_) => node,
        PropertyName::DottedName(dotted) => node.with_children(dotted.parts().iter().map(|part| {
            TemplateSnapshot::new("identifier", part.name.clone(), part.span.clone())
        })),
    }
}

fn snapshot_format(format: &FormatSpec) -> TemplateSnapshot {
    TemplateSnapshot::new("format_spec", format.text.clone(), format.span.clone())
}
