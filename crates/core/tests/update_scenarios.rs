//! Document-level properties of the updater.

use chrono::DateTime;
use lastmod_core::frontmatter::parse;
use lastmod_core::settings::Settings;
use lastmod_core::timestamp::{DateFormat, FixedClock};
use lastmod_core::{FrontmatterUpdater, UpdateOutcome};

fn clock() -> FixedClock {
    FixedClock(DateTime::parse_from_rfc3339("2024-01-15T14:30:25.123Z").unwrap())
}

fn update(settings: &Settings, content: &str) -> UpdateOutcome {
    let clock = clock();
    FrontmatterUpdater::new(settings, &clock).update(content).unwrap()
}

#[test]
fn documents_without_frontmatter_are_untouched() {
    let settings = Settings::default();
    for content in ["Just text", "", "# Title\n\n---\nnot: frontmatter\n---\n", "---\nunclosed"] {
        assert_eq!(update(&settings, content), UpdateOutcome::Rejected, "{content:?}");
    }
}

#[test]
fn unrelated_lines_and_body_survive_byte_for_byte() {
    let settings = Settings::default();
    let content = "---\n# comment line\ntitle:  \"Quoted: title\"\nlast-updated: 2020-01-01 00:00:00\naliases: [one, two]\nnested:\n  deep: true\n---\n\nBody with --- and\n\ttabs\n";

    let UpdateOutcome::Patched(out) = update(&settings, content) else {
        panic!("expected a patch");
    };

    let expected = content.replace("2020-01-01 00:00:00", "2024-01-15 14:30:25");
    assert_eq!(out, expected);
}

#[test]
fn each_format_lands_in_the_document() {
    let cases = [
        (DateFormat::Date, "2024-01-15"),
        (DateFormat::DateTimeMinutes, "2024-01-15 14:30"),
        (DateFormat::DateTimeSeconds, "2024-01-15 14:30:25"),
        (DateFormat::Iso, "2024-01-15T14:30:25.123Z"),
    ];

    for (format, expected) in cases {
        let settings = Settings { date_format: format, ..Settings::default() };
        let UpdateOutcome::Patched(out) = update(&settings, "---\nlast-updated: x\n---\nB")
        else {
            panic!("expected a patch for {format}");
        };
        let fm = parse(&out).unwrap().frontmatter.unwrap();
        assert_eq!(fm.get_str("last-updated"), Some(expected));
    }
}

#[test]
fn reserialized_header_quotes_timestamp() {
    let settings = Settings::default();
    let UpdateOutcome::Patched(out) = update(&settings, "---\ntitle: X\ntags: [a]\n---\nBody")
    else {
        panic!("expected a patch");
    };

    assert_eq!(
        out,
        "---\ntitle: X\ntags:\n- a\nlast-updated: \"2024-01-15 14:30:25\"\n---\nBody"
    );
}

#[test]
fn crlf_documents_keep_their_line_endings() {
    let settings = Settings { date_format: DateFormat::Date, ..Settings::default() };
    let content = "---\r\nlast-updated: old\r\ntitle: X\r\n---\r\nBody\r\n";

    assert_eq!(
        update(&settings, content),
        UpdateOutcome::Patched(
            "---\r\nlast-updated: 2024-01-15\r\ntitle: X\r\n---\r\nBody\r\n".into()
        )
    );
}

#[test]
fn closing_delimiter_at_end_of_file_stays_last() {
    let settings = Settings { date_format: DateFormat::Date, ..Settings::default() };

    assert_eq!(
        update(&settings, "---\nlast-updated: x\n---"),
        UpdateOutcome::Patched("---\nlast-updated: 2024-01-15\n---".into())
    );
    assert_eq!(
        update(&settings, "---\ntitle: X\n---"),
        UpdateOutcome::Patched("---\ntitle: X\nlast-updated: 2024-01-15\n---".into())
    );
}

#[test]
fn mixed_line_endings_outside_the_field_are_kept() {
    let settings = Settings { date_format: DateFormat::Date, ..Settings::default() };

    assert_eq!(
        update(&settings, "---\nlast-updated: x\r\n---\r\nBody"),
        UpdateOutcome::Patched("---\nlast-updated: 2024-01-15\r\n---\r\nBody".into())
    );
    assert_eq!(
        update(&settings, "---\r\nlast-updated: x\n---\nBody"),
        UpdateOutcome::Patched("---\r\nlast-updated: 2024-01-15\n---\nBody".into())
    );
}
