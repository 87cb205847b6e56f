//! Domain mapping aggregation.
//!
//! Scans a batch of profile documents and indexes each partner under the
//! master domains its `連係領域` items match.

use tracing::{debug, instrument, warn};

use partnerboard_profile::{extract_items, parse_document};
use partnerboard_shared::{
    MappingEntry, MappingIndex, SECTION_DOMAINS, SECTION_RELATION_LEVEL, UNKNOWN_NAME,
};

use crate::source::DocumentRef;

/// Build the domain → partners index over a batch of documents.
///
/// Every master domain is present in the result, in master order, even when
/// empty. Documents are processed in slice order; an unreadable document is
/// skipped (the batch never aborts) and appears nowhere in the result. A
/// partner whose items match no master domain is recorded once in
/// `uncategorized` — including partners with no `連係領域` section at all.
#[instrument(skip_all, fields(doc_count = documents.len(), domain_count = master_domains.len()))]
pub fn build_mapping<D: DocumentRef>(documents: &[D], master_domains: &[String]) -> MappingIndex {
    let mut index = MappingIndex::new(master_domains);

    for doc_ref in documents {
        let text = match doc_ref.read() {
            Ok(text) => text,
            Err(e) => {
                warn!(source_id = doc_ref.id(), error = %e, "skipping unreadable document");
                continue;
            }
        };

        let doc = parse_document(doc_ref.id(), &text);
        let label = partner_label(
            doc.partner_name.as_deref(),
            doc.section(SECTION_RELATION_LEVEL),
        );
        let items = extract_items(doc.section(SECTION_DOMAINS));

        let mut matched = false;
        for item in &items {
            // Exact string equality against the master list, no normalization.
            if let Some(entries) = index.domains.get_mut(item) {
                entries.push(MappingEntry {
                    label: label.clone(),
                    source_id: doc.source_id.clone(),
                });
                matched = true;
            }
        }

        if !matched {
            index.uncategorized.push(MappingEntry {
                label,
                source_id: doc.source_id,
            });
        }
    }

    debug!(
        uncategorized = index.uncategorized.len(),
        "mapping index built"
    );

    index
}

/// `"{name}({relation_level})"`, with placeholder defaults for both parts.
fn partner_label(partner_name: Option<&str>, relation_level: &str) -> String {
    let name = partner_name.unwrap_or(UNKNOWN_NAME);
    let level = relation_level.trim();
    let level = if level.is_empty() { "-" } else { level };
    format!("{name}({level})")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
