//! XML-like tag serialization
//!
//! Node type → tag name (`go_property` → `go-property`), label → text content, snapshot
//! attributes → XML attributes, children → nested tags.
//!
//! ```text
//! <template>2 segments
//!   <literal-text>Hi </literal-text>
//!   <property closed="true">{User}
//!     <dotted-name>User
//!       <identifier>User</identifier>
//!     </dotted-name>
//!   </property>
//! </template>
//! ```

use super::registry::{FormatError, Formatter};
use crate::template::ast::{snapshot_from_template, Template, TemplateSnapshot};

struct TagSerializer {
    output: String,
    indent_level: usize,
}

impl TagSerializer {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
        }
    }

    fn push_indent(&mut self, s: &str) {
        self.output.push_str(&"  ".repeat(self.indent_level));
        self.output.push_str(s);
    }

    fn serialize_snapshot(&mut self, snapshot: &TemplateSnapshot) {
        let tag = to_tag_name(&snapshot.node_type);
        let attributes: String = snapshot
            .attributes
            .iter()
            .map(|(key, value)| format!(" {}=\"{}\"", to_tag_name(key), escape_xml(value)))
            .collect();

        self.push_indent(&format!("<{}{}>", tag, attributes));
        self.output.push_str(&escape_xml(&snapshot.label));

        if snapshot.children.is_empty() {
            self.output.push_str(&format!("</{}>\n", tag));
        } else {
            self.output.push('\n');
            self.indent_level += 1;
            for child in &snapshot.children {
                self.serialize_snapshot(child);
            }
            self.indent_level -= 1;
            self.push_indent(&format!("</{}>\n", tag));
        }
    }
}

fn to_tag_name(node_type: &str) -> String {
    node_type.replace('_', "-")
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn serialize_template(template: &Template) -> String {
    let mut serializer = TagSerializer::new();
    serializer.serialize_snapshot(&snapshot_from_template(template));
    serializer.output
}

pub struct TagFormatter;

impl Formatter for TagFormatter {
    fn name(&self) -> &str {
        "tag"
    }

    fn serialize(&self, template: &Template) -> Result<String, FormatError> {
        Ok(serialize_template(template))
    }

    fn description(&self) -> &str {
        "XML-like tag format with hierarchical structure"
    }
}
