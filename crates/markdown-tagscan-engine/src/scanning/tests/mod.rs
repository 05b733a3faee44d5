//! Behaviour-pinning tests for the scanner.
//!
//! Each table scans an input, checks the output invariants and compares the
//! normalized tags. Property tests live in `properties`.


use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::scanning::{
    Buffer, CharUnit, ScanOptions, StyleFlags, TagKind, scan,
    snapshot::{self, TagSnap},
};

fn scan_snaps(text: &str) -> Vec<TagSnap> {
    let buffer = Buffer::new(text, CharUnit::Scalar);
    let tags = scan(&buffer, &ScanOptions::default()).unwrap();
    snapshot::invariants(&buffer, &tags);
    snapshot::normalize(&buffer, &tags)
}

const ITALICS: StyleFlags = StyleFlags::ITALICS;
const BOLD: StyleFlags = StyleFlags::BOLD;
const STRIKE: StyleFlags = StyleFlags::STRIKETHROUGH;

#[rstest]
#[case::header_level_cap("###### Title\n", vec![TagSnap::header(6, "Title")])]
#[case::header_overflow("####### Title\n", vec![TagSnap::header(6, "# Title")])]
#[case::italics("*italic*", vec![TagSnap::style(ITALICS, "italic")])]
#[case::bold("**bold**", vec![TagSnap::style(BOLD, "bold")])]
#[case::bold_italics("***both***", vec![TagSnap::style(ITALICS | BOLD, "both")])]
#[case::strikethrough("~~struck~~", vec![TagSnap::style(STRIKE, "struck")])]
#[case::single_tilde("~text~", vec![TagSnap::normal("~text~")])]
#[case::nested_same_trigger(
    "*bold **nested** end*",
    vec![
        TagSnap::style(ITALICS, "bold "),
        TagSnap::style(ITALICS | BOLD, "nested"),
        TagSnap::style(ITALICS, " end"),
    ]
)]
#[case::paragraphs(
    "Para one\n\nPara two",
    vec![TagSnap::normal("Para one"), TagSnap::paragraph(), TagSnap::normal("Para two")]
)]
#[case::escaped_delimiters("\\*not italic\\*", vec![TagSnap::normal("*not italic*").escaped()])]
fn pinned_behaviour(#[case] input: &str, #[case] expected: Vec<TagSnap>) {
    assert_eq!(scan_snaps(input), expected);
}

#[rstest]
#[case::combination(
    "A strange ***combination** tag*.",
    vec![
        TagSnap::normal("A strange "),
        TagSnap::style(BOLD, "*combination"),
        TagSnap::normal(" tag*."),
    ]
)]
#[case::unclosed_emphasis("a *b c", vec![TagSnap::normal("a *b c")])]
#[case::header_between_text(
    "Some text\n# Heading\nmore",
    vec![
        TagSnap::normal("Some text"),
        TagSnap::header(1, "Heading"),
        TagSnap::normal("more"),
    ]
)]
#[case::hash_mid_line("a # not header", vec![TagSnap::normal("a # not header")])]
#[case::header_without_text_ends_search(
    "text\n###   ",
    vec![TagSnap::normal("text\n###   ")]
)]
#[case::paragraph_after_style(
    "**a**\n\nb",
    vec![TagSnap::style(BOLD, "a"), TagSnap::paragraph(), TagSnap::normal("b")]
)]
#[case::intraword_underscore(
    "snake_case_name",
    vec![
        TagSnap::normal("snake"),
        TagSnap::style(ITALICS, "case"),
        TagSnap::normal("name"),
    ]
)]
#[case::strike_around_bold(
    "~~**all bold**~~",
    vec![TagSnap::style(STRIKE | BOLD, "all bold")]
)]
#[case::multibyte_text("é *ü*", vec![TagSnap::normal("é "), TagSnap::style(ITALICS, "ü")])]
#[case::whitespace_only("  \n\n \n", vec![])]
#[case::empty("", vec![])]
fn edge_cases(#[case] input: &str, #[case] expected: Vec<TagSnap>) {
    assert_eq!(scan_snaps(input), expected);
}

#[test]
fn full_sample_document() {
    let input = [
        "Some text **before** the captions",
        "# Caption 1",
        "Some lines of _styled and **double styled** text_ which should be formatted correctly.",
        "Also new lines should work properly.",
        "### Caption 3",
        "The caption above is a bit smaller. Below add more lines to start a new \\*paragraph\\*.",
        "",
        "New paragraph here with ~~strike through text in **bold**~~.",
    ]
    .join("\n");

    assert_eq!(
        scan_snaps(&input),
        vec![
            TagSnap::normal("Some text "),
            TagSnap::style(BOLD, "before"),
            TagSnap::normal(" the captions"),
            TagSnap::header(1, "Caption 1"),
            TagSnap::normal("Some lines of "),
            TagSnap::style(ITALICS, "styled and "),
            TagSnap::style(ITALICS | BOLD, "double styled"),
            TagSnap::style(ITALICS, " text"),
            TagSnap::normal(
                " which should be formatted correctly.\nAlso new lines should work properly."
            ),
            TagSnap::header(3, "Caption 3"),
            TagSnap::normal(
                "The caption above is a bit smaller. Below add more lines to start a new *paragraph*."
            )
            .escaped(),
            TagSnap::paragraph(),
            TagSnap::normal("New paragraph here with "),
            TagSnap::style(STRIKE, "strike through text in "),
            TagSnap::style(STRIKE | BOLD, "bold"),
            TagSnap::normal("."),
        ]
    );
}

#[test]
fn malformed_tail_stops_tag_search() {
    let buffer = Buffer::from_bytes(b"*a* b \xFF *c*", CharUnit::Scalar);
    let tags = scan(&buffer, &ScanOptions::default()).unwrap();
    snapshot::invariants(&buffer, &tags);
    assert_eq!(
        snapshot::normalize(&buffer, &tags),
        vec![
            TagSnap::style(ITALICS, "a"),
            TagSnap::normal(" b \u{FFFD} *c*"),
        ]
    );
}

#[test]
fn truncated_sequence_at_end_is_plain_text() {
    let buffer = Buffer::from_bytes(b"**x** y\xE2\x82", CharUnit::Scalar);
    let tags = scan(&buffer, &ScanOptions::default()).unwrap();
    snapshot::invariants(&buffer, &tags);
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[1].kind, TagKind::Normal);
    assert_eq!(tags[1].end_position, buffer.end());
}

#[test]
fn utf16_positions_count_surrogate_pairs() {
    let text = "😀 *a*";
    let buffer = Buffer::new(text, CharUnit::Utf16);
    let tags = scan(&buffer, &ScanOptions::with_unit(CharUnit::Utf16)).unwrap();
    snapshot::invariants(&buffer, &tags);

    let italic = &tags[1];
    assert_eq!(italic.start_position.char_index(), 3);
    assert_eq!(italic.start_text.char_index(), 4);
    assert_eq!(italic.end_position.char_index(), 6);
    assert_eq!(italic.start_position.byte_offset(), 5);
    assert_eq!(buffer.char_len(), text.encode_utf16().count());
}

#[test]
fn tags_tile_the_document() {
    let text = "# Head\nplain *it* and ~~gone~~\n\nnext **para**";
    let buffer = Buffer::new(text, CharUnit::Scalar);
    let tags = scan(&buffer, &ScanOptions::default()).unwrap();
    snapshot::invariants(&buffer, &tags);

    let spans: Vec<_> = tags
        .iter()
        .filter(|tag| tag.kind != TagKind::Paragraph)
        .map(|tag| (tag.start_position.byte_offset(), tag.end_position.byte_offset()))
        .collect();
    assert_eq!(
        spans,
        vec![(0, 7), (7, 13), (13, 17), (17, 22), (22, 30), (30, 37), (37, 45)]
    );
}
