//! Position based queries
//!
//! Editors ask "what is under the cursor". Segment ranges are end-inclusive here (see
//! [`Range::contains`](super::Range::contains)), so when two segments touch, the earlier one wins.

use super::nodes::{FormatSpec, PropertyName, Segment};
use super::range::Position;
use super::tree::Template;

impl Template {
    /// The segment covering a line/column position.
    pub fn segment_at(&self, position: Position) -> Option<&Segment> {
        let location = self.source_location();
        self.iter()
            .find(|segment| location.byte_range_to_range(&segment.span()).contains(position))
    }

    /// The segment covering a byte offset, end exclusive.
    pub fn segment_at_offset(&self, offset: usize) -> Option<&Segment> {
        self.iter().find(|segment| segment.span().contains(&offset))
    }

    /// The property name under a position, if the position is on a placeholder's name.
    pub fn name_at_position(&self, position: Position) -> Option<&PropertyName> {
        let offset = self.source_location().position_to_byte(position)?;
        self.properties()
            .filter_map(Segment::name)
            .find(|name| {
                let span = name.span();
                span.start <= offset && offset <= span.end
            })
    }

    /// The format specifier under a position.
    pub fn format_at_position(&self, position: Position) -> Option<&FormatSpec> {
        let offset = self.source_location().position_to_byte(position)?;
        self.properties()
            .filter_map(Segment::format)
            .find(|format| format.span.start <= offset && offset <= format.span.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ast::SegmentKind;
    use crate::template::parse_template;

    #[test]
    fn test_segment_at_position() {
        let template = parse_template("Hello\nuser {Name}!");

        let hit = template.segment_at(Position::new(1, 7)).unwrap();
        assert_eq!(hit.kind(), SegmentKind::Property);

        let hit = template.segment_at(Position::new(0, 2)).unwrap();
        assert_eq!(hit.kind(), SegmentKind::LiteralText);

        assert!(template.segment_at(Position::new(4, 0)).is_none());
    }

    #[test]
    fn test_segment_at_offset() {
        let template = parse_template("a{B}c");

        assert_eq!(template.segment_at_offset(0).unwrap().kind(), SegmentKind::LiteralText);
        assert_eq!(template.segment_at_offset(1).unwrap().kind(), SegmentKind::Property);
        assert_eq!(template.segment_at_offset(4).unwrap().kind(), SegmentKind::LiteralText);
        assert!(template.segment_at_offset(5).is_none());
    }

    #[test]
    fn test_name_and_format_at_position() {
        let template = parse_template("{Time:HH:mm} {User}");

        let format = template.format_at_position(Position::new(0, 8)).unwrap();
        assert_eq!(format.text, "HH:mm");

        let name = template.name_at_position(Position::new(0, 15)).unwrap();
        assert_eq!(name.to_string(), "User");

        assert!(template.name_at_position(Position::new(0, 12)).is_none());
    }
}
