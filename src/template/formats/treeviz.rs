//! Treeviz formatter
//!
//! One line per node, nesting drawn with box characters, so a template's structure can be read
//! at a glance:
//!
//! ```text
//! ⧉ 3 segments
//! ├─ ◦ Hi
//! ├─ ⊕ {@User.Name:j}
//! │ ├─ @ @
//! │ ├─ ≡ User.Name
//! │ │ ├─ • User
//! │ │ └─ • Name
//! │ └─ ⌗ j
//! └─ ◦ !
//! ```
//!
//! Icons
//!     Template: ⧉
//!     LiteralText: ◦
//!     Property: ⊕
//!     GoProperty: ⊗
//!     BuiltinProperty: $
//!     Hint: @
//!     NumericIndex: #
//!     DottedName: ≡
//!     Identifier: •
//!     FormatSpec: ⌗
//!
//! Labels are cut at `max_label_chars` characters. With `show_linum` every node line starts
//! with the 1-based source line of the node.

use super::registry::{FormatError, Formatter};
use crate::template::ast::{snapshot_from_template, SourceLocation, Template, TemplateSnapshot};
use crate::template::config::TreevizConfig;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "template" => "⧉",
        "literal_text" => "◦",
        "property" => "⊕",
        "go_property" => "⊗",
        "builtin_property" => "$",
        "hint" => "@",
        "numeric_index" => "#",
        "dotted_name" => "≡",
        "identifier" => "•",
        "format_spec" => "⌗",
        _ => "○",
    }
}

struct TreevizWriter<'a> {
    location: SourceLocation,
    options: &'a TreevizConfig,
    output: String,
}

impl TreevizWriter<'_> {
    fn label(&self, snapshot: &TemplateSnapshot) -> String {
        let mut label = truncate(&snapshot.label, self.options.max_label_chars);
        if snapshot.attributes.get("closed").map(String::as_str) == Some("false") {
            label.push_str(" (unclosed)");
        }
        label
    }

    fn write_node(
        &mut self,
        snapshot: &TemplateSnapshot,
        prefix: &str,
        child_index: usize,
        child_count: usize,
    ) {
        let is_last = child_index == child_count - 1;
        let connector = if is_last { "└─" } else { "├─" };

        if self.options.show_linum {
            let line = self.location.byte_to_position(snapshot.span.start).line + 1;
            self.output.push_str(&format!("{:02} ", line));
        }
        let label = self.label(snapshot);
        self.output.push_str(&format!(
            "{}{} {} {}\n",
            prefix,
            connector,
            get_icon(&snapshot.node_type),
            label
        ));

        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        let child_count = snapshot.children.len();
        for (i, child) in snapshot.children.iter().enumerate() {
            self.write_node(child, &child_prefix, i, child_count);
        }
    }
}

pub fn to_treeviz_str(template: &Template) -> String {
    to_treeviz_str_with_options(template, &TreevizConfig::default())
}

pub fn to_treeviz_str_with_options(template: &Template, options: &TreevizConfig) -> String {
    let snapshot = snapshot_from_template(template);
    let mut writer = TreevizWriter {
        location: template.source_location(),
        options,
        output: format!("{} {}\n", get_icon(&snapshot.node_type), snapshot.label),
    };

    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        writer.write_node(child, "", i, child_count);
    }
    writer.output
}

#[derive(Debug, Clone, Default)]
pub struct TreevizFormatter {
    options: TreevizConfig,
}

impl TreevizFormatter {
    pub fn from_config(options: &TreevizConfig) -> Self {
        Self {
            options: options.clone(),
        }
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, template: &Template) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_options(template, &self.options))
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }
}
