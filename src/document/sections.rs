//! The closed marker vocabulary the upstream agent is prompted to emit.
//!
//! Section titles, icon glyphs, and header markers live here as data so
//! recognizing a new section is a table change, not a new match arm. The
//! decoder's markdown synthesizer uses the same constants, which keeps the
//! two halves of the pipeline from drifting apart.

use std::sync::OnceLock;

use regex::Regex;

/// A recognized subsection: canonical title plus the icon it renders with.
#[derive(Debug)]
pub struct SectionSpec {
    pub title: &'static str,
    pub icon: &'static str,
}

pub const DISCUSSION_SECTION: SectionSpec = SectionSpec {
    title: "Key Discussion Points",
    icon: "💬",
};

pub const DECISIONS_SECTION: SectionSpec = SectionSpec {
    title: "Decisions Made",
    icon: "✅",
};

pub const RISKS_SECTION: SectionSpec = SectionSpec {
    title: "Risks or Open Questions",
    icon: "⚠️",
};

/// Subsection whitelist. Lines carrying one of these titles become H4
/// headings and force list-mode for the lines that follow.
pub const SUBSECTIONS: &[SectionSpec] = &[DISCUSSION_SECTION, DECISIONS_SECTION, RISKS_SECTION];

/// Icons a subsection title may arrive prefixed with.
pub const ICON_GLYPHS: &[&str] = &["💬", "✅", "⚠️", "📌", "❗"];

/// Marker prefix for workstream sub-headings.
pub const WORKSTREAM_GLYPH: &str = "🔹";

/// Anchor id assigned to the first workstream heading in a document.
pub const FIRST_WORKSTREAM_ANCHOR: &str = "workstreams";

/// Fixed prefix for the purpose line under the document title.
pub const PURPOSE_PREFIX: &str = "Meeting Purpose:";

/// Lowercase needle marking an intentionally empty section.
pub const EMPTY_SECTION_SENTINEL: &str = "no notes for this section";

/// Title of the section whose raw content is replaced by the rendered
/// action-item table.
pub const NEXT_STEPS_TITLE: &str = "NEXT STEPS";

fn re_major_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `## TITLE`, `#### Title`, or a glyph-run header like `◆◆ NEXT STEPS ◆◆`.
    RE.get_or_init(|| Regex::new(r"^(?:#{1,4}|[◆■]+)\s*([A-Z][^◆■#]*?)\s*[◆■]*$").unwrap())
}

fn re_bullet() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[-*•]\s+").unwrap())
}

fn re_horizontal_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:-{3,}|_{3,}|\*{3,})$").unwrap())
}

/// Captured title of a major header line, if this line is one.
pub fn major_header_title(line: &str) -> Option<&str> {
    re_major_header()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Title text of a workstream sub-heading line, if this line is one.
pub fn workstream_title(line: &str) -> Option<&str> {
    line.strip_prefix(WORKSTREAM_GLYPH).map(str::trim)
}

/// Whitelisted subsection for this line, tolerating any known icon prefix
/// (or none) and an optional trailing colon.
pub fn subsection_for_line(line: &str) -> Option<&'static SectionSpec> {
    let mut rest = line.trim();
    for icon in ICON_GLYPHS {
        if let Some(stripped) = rest.strip_prefix(icon) {
            rest = stripped.trim_start();
            break;
        }
    }
    let rest = rest.trim_end_matches(':').trim();
    SUBSECTIONS
        .iter()
        .find(|spec| spec.title.eq_ignore_ascii_case(rest))
}

/// True for any pipe-delimited table line.
pub fn is_table_row(line: &str) -> bool {
    line.starts_with('|')
}

/// True for a table separator row (`| --- | :---: |`).
pub fn is_separator_row(line: &str) -> bool {
    if !is_table_row(line) {
        return false;
    }
    let mut saw_dash = false;
    for cell in line.split('|') {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        if !cell.chars().all(|c| c == '-' || c == ':') {
            return false;
        }
        saw_dash = true;
    }
    saw_dash
}

/// Split a table line into trimmed cell strings, dropping the empty edge
/// cells produced by leading/trailing pipes.
pub fn split_table_cells(line: &str) -> Vec<&str> {
    let inner = line.trim().trim_start_matches('|').trim_end_matches('|');
    inner.split('|').map(str::trim).collect()
}

/// Content of a bulleted line with the prefix stripped, if bulleted.
pub fn bullet_content(line: &str) -> Option<&str> {
    re_bullet()
        .find(line)
        .map(|m| line[m.end()..].trim())
}

pub fn is_horizontal_rule(line: &str) -> bool {
    re_horizontal_rule().is_match(line)
}

/// True when the line carries the intentionally-empty-section sentinel.
pub fn is_sentinel_line(line: &str) -> bool {
    line.to_lowercase().contains(EMPTY_SECTION_SENTINEL)
}

/// Strip heading markers and header glyphs off a line, for rendering a
/// decorated first line as the document title.
pub fn strip_heading_decoration(line: &str) -> &str {
    line.trim_start_matches(['#', '◆', '■'])
        .trim_end_matches(['◆', '■'])
        .trim()
}

/// Convert a heading title to a URL-safe kebab-case anchor id.
///
/// Example: "Decisions Made" → "decisions-made"
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_header_markdown_forms() {
        assert_eq!(major_header_title("## NEXT STEPS"), Some("NEXT STEPS"));
        assert_eq!(major_header_title("#### Budget Review"), Some("Budget Review"));
        assert_eq!(major_header_title("##NEXT STEPS"), Some("NEXT STEPS"));
    }

    #[test]
    fn test_major_header_glyph_forms() {
        assert_eq!(major_header_title("◆◆ NEXT STEPS ◆◆"), Some("NEXT STEPS"));
        assert_eq!(major_header_title("■ MEETING SUMMARY"), Some("MEETING SUMMARY"));
    }

    #[test]
    fn test_major_header_rejects_uncapitalized_and_plain_text() {
        assert_eq!(major_header_title("## next steps"), None);
        assert_eq!(major_header_title("Just a sentence."), None);
        assert_eq!(major_header_title("- List item"), None);
    }

    #[test]
    fn test_workstream_line() {
        assert_eq!(workstream_title("🔹 Design Sprint"), Some("Design Sprint"));
        assert_eq!(workstream_title("No glyph here"), None);
    }

    #[test]
    fn test_subsection_with_and_without_icon() {
        assert_eq!(
            subsection_for_line("💬 Key Discussion Points").map(|s| s.title),
            Some("Key Discussion Points")
        );
        assert_eq!(
            subsection_for_line("Decisions Made:").map(|s| s.title),
            Some("Decisions Made")
        );
        // Any known icon is tolerated, the canonical one is not required
        assert_eq!(
            subsection_for_line("📌 risks or open questions").map(|s| s.title),
            Some("Risks or Open Questions")
        );
        assert!(subsection_for_line("Unrelated Heading").is_none());
    }

    #[test]
    fn test_separator_rows() {
        assert!(is_separator_row("|---|---|"));
        assert!(is_separator_row("| :--- | ---: |"));
        assert!(!is_separator_row("| Owner | Task |"));
        assert!(!is_separator_row("---"));
    }

    #[test]
    fn test_table_cell_split_drops_edges() {
        assert_eq!(
            split_table_cells("| Owner | Task |"),
            vec!["Owner", "Task"]
        );
        assert_eq!(split_table_cells("|a|b|c|"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_bullets() {
        assert_eq!(bullet_content("- item"), Some("item"));
        assert_eq!(bullet_content("• item"), Some("item"));
        assert_eq!(bullet_content("* item"), Some("item"));
        assert_eq!(bullet_content("**bold** start"), None);
        assert_eq!(bullet_content("plain"), None);
    }

    #[test]
    fn test_horizontal_rules() {
        assert!(is_horizontal_rule("---"));
        assert!(is_horizontal_rule("_____"));
        assert!(!is_horizontal_rule("--"));
        assert!(!is_horizontal_rule("--- extra"));
    }

    #[test]
    fn test_sentinel_detection_is_case_insensitive() {
        assert!(is_sentinel_line("No notes for this section."));
        assert!(is_sentinel_line("_no NOTES for this section_"));
        assert!(!is_sentinel_line("Notes for this section follow"));
    }

    #[test]
    fn test_heading_decoration_stripping() {
        assert_eq!(strip_heading_decoration("## Weekly Sync"), "Weekly Sync");
        assert_eq!(strip_heading_decoration("◆◆ RECAP ◆◆"), "RECAP");
        assert_eq!(strip_heading_decoration("Untouched title"), "Untouched title");
    }

    #[test]
    fn test_slugify_titles() {
        assert_eq!(slugify("NEXT STEPS"), "next-steps");
        assert_eq!(slugify("Risks or Open Questions"), "risks-or-open-questions");
        assert_eq!(slugify("Q2 — Platform Migration"), "q2-platform-migration");
    }
}
