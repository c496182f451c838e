use super::*;

#[test]
fn parse_trims_and_skips_blank_lines() {
    let parsed = Roster::parse("  Alice \n\n Bob\r\n   \nCharlie\r\n");
    assert_eq!(parsed.roster.entries(), ["Alice", "Bob", "Charlie"]);
    assert_eq!(parsed.dropped, 0);
}

#[test]
fn parse_caps_at_max_entries() {
    let text = (0..130).map(|i| format!("p{i}")).collect::<Vec<_>>().join("\n");
    let parsed = Roster::parse(&text);
    assert_eq!(parsed.roster.len(), MAX_ENTRIES);
    assert_eq!(parsed.dropped, 30);
    assert_eq!(parsed.roster.entries()[99], "p99");
}

#[test]
fn blank_lines_do_not_count_toward_cap() {
    let mut lines = vec![String::new(); 50];
    lines.extend((0..100).map(|i| format!("n{i}")));
    let parsed = Roster::from_entries(lines);
    assert_eq!(parsed.roster.len(), 100);
    assert_eq!(parsed.dropped, 0);
}

#[test]
fn from_json_reads_string_arrays() {
    let parsed = Roster::from_json(r#"["Ann", " ", "Ben "]"#).unwrap();
    assert_eq!(parsed.roster.entries(), ["Ann", "Ben"]);
}

#[test]
fn from_json_rejects_non_arrays() {
    let err = Roster::from_json(r#"{"a": 1}"#).unwrap_err();
    assert!(matches!(err, WheelError::InvalidEntries(_)));
}

#[test]
fn defaults_are_eight_names() {
    let roster = Roster::with_defaults();
    assert_eq!(roster.len(), 8);
    assert_eq!(roster.entries()[0], "Alice");
    assert_eq!(roster.entries()[7], "Heidi");
}

#[test]
fn dedupe_keeps_first_occurrence_order() {
    let mut roster = Roster::parse("Bob\nAlice\nBob\nEve\nAlice").roster;
    assert_eq!(roster.dedupe(), 2);
    assert_eq!(roster.entries(), ["Bob", "Alice", "Eve"]);
    assert_eq!(roster.dedupe(), 0);
}

#[test]
fn remove_winner_removes_all_copies() {
    let mut roster = Roster::parse("Bob\nAlice\nBob").roster;
    assert_eq!(roster.remove_winner("Bob"), 2);
    assert_eq!(roster.entries(), ["Alice"]);
    assert_eq!(roster.remove_winner("Zed"), 0);
}

#[test]
fn can_spin_needs_two_entries() {
    assert!(!Roster::default().can_spin());
    assert!(!Roster::parse("Solo").roster.can_spin());
    assert!(Roster::parse("A\nB").roster.can_spin());
}

#[test]
fn display_segments_substitutes_placeholder_when_empty() {
    assert_eq!(Roster::default().display_segments(), ["Add Names", "To Spin"]);
    assert_eq!(Roster::parse("Solo").roster.display_segments(), ["Solo"]);
}

#[test]
fn to_text_round_trips_through_parse() {
    let roster = Roster::with_defaults();
    assert_eq!(Roster::parse(&roster.to_text()).roster, roster);
}

#[test]
fn serializes_as_plain_array() {
    let roster = Roster::parse("A\nB").roster;
    assert_eq!(serde_json::to_string(&roster).unwrap(), r#"["A","B"]"#);
}
