//! Partner profile document parsing.
//!
//! Parses the markdown conventions used by partner profile files:
//! - Line `# パートナー名` followed by the partner name on the next non-blank line
//! - `## <Title>` sections, each body running to the next `##` heading or EOF
//!
//! Scanning is line-oriented with whole-line anchoring: a `##` sequence inside
//! a paragraph never opens a section. The downstream modules type each section
//! body ([`classify`]), convert tables to records ([`to_records`]) and split
//! loose text into items ([`extract_items`]).

mod classify;
mod items;
mod table;

use indexmap::IndexMap;
use tracing::debug;

use partnerboard_shared::Document;

pub use classify::{classify, extract_diagram_source, is_diagram_source, is_table_like};
pub use items::extract_items;
pub use table::to_records;

/// The top-level heading label introducing the partner name.
const PARTNER_NAME_LABEL: &str = "パートナー名";

// ---------------------------------------------------------------------------
// Document parsing
// ---------------------------------------------------------------------------

/// Parse one profile into a [`Document`].
///
/// Pure transformation; the input text is never mutated and nothing is cached
/// between calls.
pub fn parse_document(source_id: &str, text: &str) -> Document {
    let partner_name = find_partner_name(text);
    let sections = split_sections(text);

    debug!(
        source_id,
        has_name = partner_name.is_some(),
        section_count = sections.len(),
        "profile parsed"
    );

    Document {
        source_id: source_id.to_string(),
        partner_name,
        sections,
    }
}

/// Find the partner name: the first non-blank line after a `# パートナー名`
/// heading line. `None` when the heading is absent or nothing follows it.
pub fn find_partner_name(text: &str) -> Option<String> {
    let mut after_heading = false;

    for line in text.lines() {
        if after_heading {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        } else if is_name_heading(line) {
            after_heading = true;
        }
    }

    None
}

/// Split the text into its `##` sections.
///
/// Bodies are trimmed; text before the first heading is discarded. A repeated
/// title replaces the earlier body in place (last-wins) while keeping its
/// first-occurrence position in the map.
pub fn split_sections(text: &str) -> IndexMap<String, String> {
    let mut sections: IndexMap<String, String> = IndexMap::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some(title) = section_title(line) {
            if let Some((done_title, body)) = current.take() {
                sections.insert(done_title, body.join("\n").trim().to_string());
            }
            current = Some((title, Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }

    if let Some((done_title, body)) = current.take() {
        sections.insert(done_title, body.join("\n").trim().to_string());
    }

    sections
}

/// Whether the whole line is a `# パートナー名` heading (trailing whitespace
/// ignored). A `##` line never matches.
fn is_name_heading(line: &str) -> bool {
    match line.strip_prefix('#') {
        Some(rest) if !rest.starts_with('#') => rest.trim() == PARTNER_NAME_LABEL,
        _ => false,
    }
}

/// The section title when the line is a `##` heading, `None` otherwise.
fn section_title(line: &str) -> Option<String> {
    let rest = line.strip_prefix("##")?;
    let title = rest.trim();
    if title.is_empty() {
        return None;
    }
    Some(title.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partner_name_after_heading() {
        let text = "# パートナー名\n\nAcme Corp\n\n## 連係領域\n営業\n";
        assert_eq!(find_partner_name(text), Some("Acme Corp".to_string()));
    }

    #[test]
    fn partner_name_absent_without_heading() {
        let text = "## 連係領域\n営業\nAcme Corp\n";
        assert_eq!(find_partner_name(text), None);
    }

    #[test]
    fn partner_name_absent_when_nothing_follows() {
        assert_eq!(find_partner_name("# パートナー名\n\n\n"), None);
        assert_eq!(find_partner_name("# パートナー名"), None);
    }

    #[test]
    fn name_heading_requires_whole_line() {
        // `##` headings and mid-paragraph mentions do not introduce the name.
        assert_eq!(find_partner_name("## パートナー名\nAcme\n"), None);
        assert_eq!(find_partner_name("text # パートナー名\nAcme\n"), None);
        // Trailing whitespace after the label is tolerated.
        assert_eq!(
            find_partner_name("# パートナー名  \nAcme\n"),
            Some("Acme".to_string())
        );
    }

    #[test]
    fn sections_in_order() {
        let sections = split_sections("## A\nbody1\n## B\nbody2\n");
        let titles: Vec<&String> = sections.keys().collect();
        assert_eq!(titles, ["A", "B"]);
        assert_eq!(sections["A"], "body1");
        assert_eq!(sections["B"], "body2");
    }

    #[test]
    fn duplicate_section_title_last_wins() {
        let sections = split_sections("## A\nfirst\n## A\nsecond\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections["A"], "second");
    }

    #[test]
    fn duplicate_title_keeps_first_position() {
        let sections = split_sections("## A\n1\n## B\n2\n## A\n3\n");
        let titles: Vec<&String> = sections.keys().collect();
        assert_eq!(titles, ["A", "B"]);
        assert_eq!(sections["A"], "3");
    }

    #[test]
    fn text_before_first_heading_is_discarded() {
        let sections = split_sections("preamble\nmore preamble\n## A\nbody\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections["A"], "body");
    }

    #[test]
    fn hashes_inside_paragraph_do_not_open_sections() {
        let sections = split_sections("## A\nsee ## B for details\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections["A"], "see ## B for details");
    }

    #[test]
    fn section_bodies_are_trimmed() {
        let sections = split_sections("## A\n\n  body  \n\n## B\n\n");
        assert_eq!(sections["A"], "body");
        assert_eq!(sections["B"], "");
    }

    #[test]
    fn parse_document_assembles_both_parts() {
        let text = "# パートナー名\nAcme Corp\n\n## リレーションレベル\n強化\n## 連係領域\n* 営業\n";
        let doc = parse_document("acme.md", text);

        assert_eq!(doc.source_id, "acme.md");
        assert_eq!(doc.partner_name.as_deref(), Some("Acme Corp"));
        assert_eq!(doc.section("リレーションレベル"), "強化");
        assert_eq!(doc.section("連係領域"), "* 営業");
    }
}
