//! Markdown-table-to-record conversion.

use partnerboard_shared::Record;

/// Convert a markdown table body into one [`Record`] per data row.
///
/// Returns `None` when no header/separator pair exists — a structural
/// mismatch is an absent result, never an error, so callers can fall back to
/// another rendering path.
pub fn to_records(body: &str) -> Option<Vec<Record>> {
    // Blank lines are removed (not just collapsed) before scanning; see
    // `classify::is_table_like` for the adjacency test on the raw text.
    let lines: Vec<&str> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let header_idx = lines
        .windows(2)
        .position(|pair| pair[0].contains('|') && is_separator_row(pair[1]))?;

    let headers = split_row(lines[header_idx]);

    let mut records = Vec::new();
    for row in &lines[header_idx + 2..] {
        // A line with no pipe at all is skipped, not emitted as a record.
        if !row.contains('|') {
            continue;
        }

        let mut cells = split_row(row);
        if cells.len() < headers.len() {
            cells.resize(headers.len(), String::new());
        }

        // Positional zip: extra cells beyond the header length are dropped;
        // duplicate header names are kept as given.
        let fields = headers.iter().cloned().zip(cells).collect();
        records.push(Record { fields });
    }

    Some(records)
}

/// Split a table row on pipes, stripping one optional leading and one
/// optional trailing pipe; each cell is trimmed.
fn split_row(row: &str) -> Vec<String> {
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    row.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Separator row as seen by extraction: at least two cells, each non-empty
/// and composed only of `-`, `:`, spaces, and tabs.
fn is_separator_row(line: &str) -> bool {
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    let mut cell_count = 0;

    for cell in line.split('|') {
        if cell.is_empty()
            || !cell.chars().all(|c| matches!(c, '-' | ':' | ' ' | '\t'))
        {
            return false;
        }
        cell_count += 1;
    }

    cell_count >= 2
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
