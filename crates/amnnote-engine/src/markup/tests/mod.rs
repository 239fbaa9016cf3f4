//! Tests for the markup module as a whole: analyzer output snapshots,
//! invariants over tricky inputs and encode/parse round trips.


use rstest::rstest;

use crate::markup::{
    analyze,
    model::{TextDirection, TextStyle},
    parse,
    snapshot::{dump, invariants},
};

fn analyzed(input: &str) -> String {
    let blocks = analyze(input);
    invariants(input, &blocks);
    dump(&blocks)
}

// Snapshot tests

#[test]
fn snapshot_bold_and_italic() {
    insta::assert_snapshot!(analyzed("**bold** plain *italic*"), @r#"
    0: Body bold "bold" content=2..=5 markers=[0..=1, 6..=7]
    1: Body " plain " content=8..=14
    2: Body italic "italic" content=16..=21 markers=[15..=15, 22..=22]
    "#);
}

#[test]
fn snapshot_link_between_text() {
    insta::assert_snapshot!(analyzed("See [docs](https://x.test) now"), @r#"
    0: Body "See " content=0..=3
    1: Link "docs" -> https://x.test content=5..=8 markers=[4..=4, 9..=25]
    2: Body " now" content=26..=29
    "#);
}

#[test]
fn snapshot_directive_heading_and_bullet() {
    insta::assert_snapshot!(analyzed("\\rtl# Title\n- item\n"), @r#"
    0: Heading1 Rtl "Title\n" content=6..=11 markers=[0..=3, 4..=5]
    1: ListItem Rtl "item\n" content=14..=18 markers=[12..=13]
    "#);
}

#[test]
fn snapshot_closing_marker_on_next_line() {
    // The closing toggle binds to the block flushed last, even across a line.
    insta::assert_snapshot!(analyzed("**a\n**b"), @r#"
    0: Body bold "a\n" content=2..=3 markers=[0..=1, 4..=5]
    1: Body "b" content=6..=6
    "#);
}

// Line prefixes

#[rstest]
#[case("# T", TextStyle::Heading1)]
#[case("## T", TextStyle::Heading2)]
#[case("### T", TextStyle::Heading3)]
#[case("#### T", TextStyle::Heading4)]
#[case("##### T", TextStyle::Heading5)]
#[case("###### T", TextStyle::Heading5)]
#[case("#T", TextStyle::Body)]
#[case(" # T", TextStyle::Body)]
#[case("- T", TextStyle::ListItem)]
#[case("-T", TextStyle::Body)]
#[case("\\rtl- T", TextStyle::ListItem)]
#[case("\\# T", TextStyle::Body)]
fn line_prefix_sets_style(#[case] input: &str, #[case] expected: TextStyle) {
    let blocks = parse(input);
    assert_eq!(blocks.last().map(|b| b.style), Some(expected), "{input:?}");
}

#[test]
fn heading_lines_parse_to_one_block() {
    let blocks = parse("# Title\n");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text, "Title\n");
    assert_eq!(blocks[0].style, TextStyle::Heading1);

    assert_eq!(parse("###### Title\n")[0].style, TextStyle::Heading5);
}

#[test]
fn direction_persists_until_changed() {
    let blocks = parse("a\n\\rtlb\nc\n\\ltrd");
    let dirs: Vec<_> = blocks.iter().map(|b| b.direction).collect();
    assert_eq!(
        dirs,
        vec![
            TextDirection::None,
            TextDirection::Rtl,
            TextDirection::Rtl,
            TextDirection::Ltr
        ]
    );
}

// Invariants over awkward input

#[rstest]
#[case("")]
#[case("\n\n\n")]
#[case("*")]
#[case("**")]
#[case("***")]
#[case("\\")]
#[case("\\rtl")]
#[case("# ")]
#[case("- ")]
#[case("[")]
#[case("[]()")]
#[case("[](u)y")]
#[case("x[](u)y")]
#[case("[a](u)[b](u)")]
#[case("[a\\](u)")]
#[case("**a\n\\rtl**b")]
#[case("*a**b*c**")]
#[case("\\rtl\\ltr\\rtl")]
#[case("# [a](u) **b** *c*\n- \\- d")]
#[case("سلام **دنیا** [پیوند](https://x.test)")]
fn invariants_hold(#[case] input: &str) {
    let blocks = analyze(input);
    invariants(input, &blocks);
}
