//! Testing utilities
//!
//!     Tests should assert on whole segments, not on a handful of fields picked out by hand.
//!     [`assert_template`] gives a fluent API that checks kinds, children and closure for each
//!     segment and prints the full segment list when something does not match:
//!
//!     ```rust,ignore
//!     use mtlog_template::template::testing::assert_template;
//!     use mtlog_template::template::ast::HintKind;
//!
//!     let template = parse_template("Hello {@User:j}!");
//!     assert_template(&template)
//!         .segment_count(3)
//!         .reconstructs()
//!         .segment(0, |s| { s.assert_literal().text("Hello "); })
//!         .segment(1, |s| {
//!             s.assert_property()
//!                 .hint(HintKind::Capture)
//!                 .name("User")
//!                 .format("j")
//!                 .closed();
//!         });
//!     ```

mod assertions;
pub mod matchers;

pub use assertions::{
    assert_template, LiteralAssertion, PlaceholderAssertion, SegmentAssertion, TemplateAssertion,
};
pub use matchers::TextMatch;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ast::{HintKind, SegmentKind};
    use crate::template::parse_template;

    #[test]
    fn test_fluent_assertions() {
        let template = parse_template("Hello {@User:j}! {{.Id}} ${0}");
        assert_template(&template)
            .segment_count(6)
            .property_count(3)
            .reconstructs()
            .segment(0, |s| {
                s.assert_literal().text("Hello ");
            })
            .segment(1, |s| {
                s.assert_property()
                    .hint(HintKind::Capture)
                    .name("User")
                    .format("j")
                    .closed();
            })
            .segment(3, |s| {
                s.assert_go_property().leading_dot(true).name("Id").no_format();
            })
            .segment(5, |s| {
                s.assert_builtin_property().no_hint().numeric(0).raw("${0}");
            });
    }

    #[test]
    #[should_panic(expected = "segments[0]: Expected property")]
    fn test_wrong_kind_panics() {
        assert_template(&parse_template("text")).segment(0, |s| {
            s.assert_property();
        });
    }

    #[test]
    fn test_kinds() {
        assert_template(&parse_template("a{b}")).kinds(&[
            SegmentKind::LiteralText,
            SegmentKind::Property,
        ]);
    }
}
