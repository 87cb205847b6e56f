//! Free-text item extraction.
//!
//! Section bodies like `連係領域` arrive as bullet lists, comma-separated
//! lines, or a single line; all three collapse to an ordered item sequence.

/// Extract discrete items from a loosely formatted body.
///
/// Order is preserved and duplicates are kept. A bullet line is emitted as a
/// single item even if it contains commas; only non-bullet lines are split on
/// commas. Empty input yields an empty sequence.
pub fn extract_items(body: &str) -> Vec<String> {
    let mut items = Vec::new();

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('*') || line.starts_with('-') {
            let item = line.trim_start_matches(['*', '-', ' ']).trim();
            items.push(item.to_string());
        } else if line.contains(',') {
            items.extend(
                line.split(',')
                    .map(str::trim)
                    .filter(|piece| !piece.is_empty())
                    .map(String::from),
            );
        } else {
            items.push(line.to_string());
        }
    }

    items
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
