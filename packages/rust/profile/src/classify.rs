//! Content-kind classification for section bodies.
//!
//! A small ordered chain of pure predicates with a hard precedence contract:
//! diagram source > table > bullet list > free text.

use partnerboard_shared::ContentKind;

/// Fence marker opening a mermaid diagram block.
const DIAGRAM_FENCE: &str = "```mermaid";

/// Bare mermaid grammar openers accepted without a fence.
const DIAGRAM_OPENERS: [&str; 5] = [
    "graph",
    "sequenceDiagram",
    "flowchart",
    "classDiagram",
    "stateDiagram",
];

/// Classify a section body. Pure function of the text; the empty body is
/// [`ContentKind::FreeText`].
pub fn classify(body: &str) -> ContentKind {
    if is_diagram_source(body) {
        ContentKind::DiagramSource
    } else if is_table_like(body) {
        ContentKind::Table
    } else if is_bullet_list(body) {
        ContentKind::BulletList
    } else {
        ContentKind::FreeText
    }
}

/// Whether the body is mermaid diagram source: a ```` ```mermaid ```` fence
/// anywhere, or a first non-blank line starting with a diagram grammar opener.
pub fn is_diagram_source(body: &str) -> bool {
    if body.contains(DIAGRAM_FENCE) {
        return true;
    }

    let Some(first) = body.lines().map(str::trim).find(|line| !line.is_empty()) else {
        return false;
    };
    DIAGRAM_OPENERS.iter().any(|opener| first.starts_with(opener))
}

/// Whether the body contains a markdown table header/separator pair.
///
/// The test runs against the original text: a line containing a pipe must be
/// immediately followed, on the next physical line, by a separator line. This
/// deliberately differs from the blank-filtered scan in [`crate::to_records`];
/// a pair split only by blank lines classifies as Table yet may extract no
/// records, and callers fall back to free-text rendering.
pub fn is_table_like(body: &str) -> bool {
    let lines: Vec<&str> = body.lines().collect();
    lines
        .windows(2)
        .any(|pair| pair[0].contains('|') && is_separator_line(pair[1]))
}

/// Extract the mermaid source from a body.
///
/// With a fence: the text strictly between the end of the ```` ```mermaid ````
/// marker and the next ```` ``` ````, trimmed; no closing fence returns
/// everything after the marker. Without a fence the whole input is returned
/// trimmed.
pub fn extract_diagram_source(body: &str) -> String {
    if let Some((_, after)) = body.split_once(DIAGRAM_FENCE) {
        let inner = match after.split_once("```") {
            Some((inner, _)) => inner,
            None => after,
        };
        return inner.trim().to_string();
    }
    body.trim().to_string()
}

/// Every non-blank line, trimmed, starts with `*` or `-`; at least one
/// non-blank line must exist.
fn is_bullet_list(body: &str) -> bool {
    let mut saw_line = false;
    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !(trimmed.starts_with('*') || trimmed.starts_with('-')) {
            return false;
        }
        saw_line = true;
    }
    saw_line
}

/// Separator line as seen by classification: after trimming, a `|` followed by
/// at least one character, all from `-`, `:`, `|`, space, tab.
fn is_separator_line(line: &str) -> bool {
    let Some(rest) = line.trim().strip_prefix('|') else {
        return false;
    };
    !rest.is_empty()
        && rest
            .chars()
            .all(|c| matches!(c, '-' | ':' | '|' | ' ' | '\t'))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_mermaid_is_diagram() {
        let body = "```mermaid\ngraph TD\n  A --> B\n```";
        assert!(is_diagram_source(body));
        assert_eq!(classify(body), ContentKind::DiagramSource);
    }

    #[test]
    fn bare_grammar_opener_is_diagram() {
        assert!(is_diagram_source("graph TD\n  A --> B\n"));
        assert!(is_diagram_source("\n\nsequenceDiagram\n  A->>B: hi\n"));
        assert!(is_diagram_source("flowchart LR\nX --> Y\n"));
        assert!(!is_diagram_source("diagram of the org\n"));
        assert!(!is_diagram_source(""));
    }

    #[test]
    fn diagram_wins_over_table() {
        // A mermaid block that also happens to contain a table-shaped pair.
        let body = "```mermaid\n| a |\n|---|\n```";
        assert_eq!(classify(body), ContentKind::DiagramSource);
    }

    #[test]
    fn header_separator_pair_is_table() {
        let body = "| 項目 | 値 |\n|---|---|\n| a | b |\n";
        assert_eq!(classify(body), ContentKind::Table);
    }

    #[test]
    fn table_wins_over_bullet_lines() {
        let body = "| H |\n|---|\n- looks like a bullet\n";
        assert_eq!(classify(body), ContentKind::Table);
    }

    #[test]
    fn separator_must_be_adjacent() {
        // Blank line between header and separator: not table-like.
        let body = "| 項目 | 値 |\n\n|---|---|\n";
        assert!(!is_table_like(body));
        assert_eq!(classify(body), ContentKind::FreeText);
    }

    #[test]
    fn bullet_list_requires_every_line() {
        assert_eq!(classify("* x\n* y\n"), ContentKind::BulletList);
        assert_eq!(classify("- x\n\n- y\n"), ContentKind::BulletList);
        assert_eq!(classify("* x\nplain\n"), ContentKind::FreeText);
    }

    #[test]
    fn empty_body_is_free_text() {
        assert_eq!(classify(""), ContentKind::FreeText);
        assert_eq!(classify("\n  \n"), ContentKind::FreeText);
    }

    #[test]
    fn extract_fenced_source() {
        let body = "before\n```mermaid\ngraph TD\n  A --> B\n```\nafter";
        assert_eq!(extract_diagram_source(body), "graph TD\n  A --> B");
    }

    #[test]
    fn extract_unclosed_fence_takes_rest() {
        let body = "```mermaid\ngraph TD\n  A --> B";
        assert_eq!(extract_diagram_source(body), "graph TD\n  A --> B");
    }

    #[test]
    fn extract_without_fence_returns_trimmed_input() {
        assert_eq!(extract_diagram_source("  graph TD\n  A --> B\n"), "graph TD\n  A --> B");
    }
}
