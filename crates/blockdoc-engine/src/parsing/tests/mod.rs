//! Decoder scenario tests.
//!
//! Trees are compared through the id-free outline, since every decode
//! assigns fresh block ids.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::editing::format_outline;
use crate::models::{BlockKind, HeadingLevel, MetaValue};
use crate::parsing::{parse_blocks, parse_document};

fn outline(body: &str) -> String {
    let doc = parse_document(body.as_bytes());
    assert!(doc.is_valid());
    format_outline(doc.tree())
}

#[test]
fn header_and_checklist_document() {
    let doc = parse_document(
        b"---\ntitle: Demo\ntags: [a, b]\n---\n# Hello\n- [ ] task one\n- [x] task two\n",
    );

    assert_eq!(doc.metadata.title, "Demo");
    assert_eq!(doc.metadata.tags, vec!["a", "b"]);
    assert!(!doc.metadata.id.is_empty());

    let blocks = doc.blocks();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].kind, BlockKind::Heading(HeadingLevel::H1));
    assert_eq!(blocks[0].text, "Hello");
    assert_eq!(blocks[1].kind, BlockKind::Checklist { checked: false });
    assert_eq!(blocks[1].text, "task one");
    assert_eq!(blocks[2].kind, BlockKind::Checklist { checked: true });
    assert_eq!(blocks[2].text, "task two");
}

#[test]
fn unknown_header_keys_are_kept_in_order() {
    let doc = parse_document(b"---\nid: abc\nmood: \"sunny\"\nrank: 3\npinned: true\n---\nbody\n");

    assert_eq!(doc.metadata.id, "abc");
    let keys: Vec<&str> = doc.metadata.extra.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["mood", "rank", "pinned"]);
    assert_eq!(
        doc.metadata.get_extra("mood"),
        Some(&MetaValue::String("sunny".into()))
    );
    assert_eq!(doc.metadata.get_extra("rank"), Some(&MetaValue::Number(3.0)));
    assert_eq!(doc.metadata.get_extra("pinned"), Some(&MetaValue::Bool(true)));
}

#[test]
fn unterminated_header_is_body_text() {
    let doc = parse_document(b"---\ntitle: Nope\nstill going\n");
    assert!(doc.metadata.title.is_empty());
    assert_eq!(doc.blocks()[0].kind, BlockKind::Divider);
    assert_eq!(doc.blocks()[1].text, "title: Nope\nstill going");
}

#[rstest]
#[case::empty(b"")]
#[case::only_newlines(b"\n\n")]
#[case::junk_bytes(&[0xff, 0xfe, 0x00, 0x80, b'\n', 0xc3])]
#[case::unterminated_fence(b"```rust\nfn main() {}\n")]
#[case::lonely_pipes(b"|\n||\n| |\n")]
#[case::crlf(b"# Title\r\n- item\r\n")]
fn decoding_never_fails(#[case] input: &[u8]) {
    let doc = parse_document(input);
    assert!(doc.is_valid());
    assert!(!doc.blocks().is_empty());
}

#[test]
fn empty_input_is_one_empty_text_block() {
    let doc = parse_document(b"");
    assert_eq!(doc.blocks().len(), 1);
    assert_eq!(doc.blocks()[0].kind, BlockKind::Text);
    assert!(doc.blocks()[0].text.is_empty());
}

#[test]
fn unterminated_fence_runs_to_end() {
    let blocks = parse_blocks("```rust\nfn main() {}\n\n- not a bullet\n");
    assert_eq!(blocks.len(), 1);
    assert_eq!(
        blocks[0].kind,
        BlockKind::Code {
            language: "rust".into()
        }
    );
    assert_eq!(blocks[0].text, "fn main() {}\n\n- not a bullet");
}

#[test]
fn ragged_table_rows_are_padded() {
    let blocks = parse_blocks("| a | b | c |\n| --- | --- | --- |\n| 1 |\n| 1 | 2 | 3 | 4 |\n");
    let BlockKind::Table(table) = &blocks[0].kind else {
        panic!("expected a table, got {:?}", blocks[0].kind);
    };
    assert!(table.is_rectangular());
    assert_eq!(table.width(), 4);
    assert_eq!(table.rows()[1], vec!["1", "", "", ""]);
    assert_eq!(table.rows()[0], vec!["a", "b", "c", ""]);
}

#[test]
fn only_the_row_after_the_header_is_a_separator() {
    let blocks = parse_blocks("| h |\n| - |\n| --- |\n");
    let BlockKind::Table(table) = &blocks[0].kind else {
        panic!("expected a table");
    };
    assert_eq!(table.rows().len(), 2);
    assert_eq!(table.rows()[1], vec!["---"]);
}

#[test]
fn table_cells_unescape_pipes() {
    let blocks = parse_blocks(r"| a\|b | c |");
    let BlockKind::Table(table) = &blocks[0].kind else {
        panic!("expected a table");
    };
    assert_eq!(table.rows()[0], vec!["a|b", "c"]);
}

#[test]
fn paragraph_lines_join_until_structure() {
    insta::assert_snapshot!(outline("first\nsecond\n# Head\nthird\n\nfourth\n"), @r#"
    Text "first\nsecond"
    Heading1 "Head"
    Text "third"
    Text ""
    Text "fourth"
    "#);
}

#[test]
fn quotes_callouts_and_toggles() {
    insta::assert_snapshot!(outline(
        "> one\n>\n> two\n> [!WARNING] Careful\n> body\n>> [collapsed] Details\n\thidden\n\t\t- deeper\n>> Open\nafter\n"
    ), @r#"
    Quote "one\n\ntwo"
    Callout(WARNING: Careful) "body"
    Toggle[collapsed] "Details"
      > Text "hidden"
      >   Text "- deeper"
    Toggle "Open"
    Text "after"
    "#);
}

#[test]
fn indentation_from_tabs_and_spaces() {
    insta::assert_snapshot!(outline("- a\n\t- b\n    - c\n   - d\n"), @r#"
    Bullet "a"
      Bullet "b"
        Bullet "c"
      Bullet "d"
    "#);
}

#[test]
fn embeds_split_on_image_extension() {
    insta::assert_snapshot!(outline("![[photo.JPG|Beach]]\n![[report.pdf]]\n![[notes]]\n"), @r#"
    ImageEmbed(Beach) "photo.JPG"
    FileEmbed "report.pdf"
    FileEmbed "notes"
    "#);
}

#[test]
fn precedence_of_openers() {
    insta::assert_snapshot!(outline("- [X] upper\n---\n----\n1. first\n12. twelfth\n```\nraw\n```\n"), @r#"
    Checklist[x] "upper"
    Divider
    Divider
    Ordered(1) "first"
    Ordered(2) "twelfth"
    Code "raw"
    "#);
}
