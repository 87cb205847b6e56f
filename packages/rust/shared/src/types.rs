//! Core domain types for partner profile documents.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Placeholder used when a profile has no partner-name heading.
pub const UNKNOWN_NAME: &str = "(名前不明)";

// Section titles with dedicated handling in the detail and mapping views.
// Any other `##` title is still kept in [`Document::sections`].
pub const SECTION_RELATION_LEVEL: &str = "リレーションレベル";
pub const SECTION_DOMAINS: &str = "連係領域";
pub const SECTION_PURPOSE: &str = "連係目的";
pub const SECTION_PARTNERS: &str = "連携先";
pub const SECTION_URL: &str = "URL";
pub const SECTION_CONTACTS: &str = "関係者との接点";
pub const SECTION_PRODUCTS: &str = "製品サービス";
pub const SECTION_RECENT_RESULTS: &str = "直近の実績";
pub const SECTION_EVALUATION: &str = "パートナー評価";
pub const SECTION_FUTURE: &str = "今後の関係性";

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A parsed partner profile document.
///
/// `sections` maps each `##` heading title to its trimmed body. The map is
/// insertion-ordered; a duplicate title replaces the earlier body in place
/// (last-wins) without changing the title's position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Identifier of the source (typically the file name).
    pub source_id: String,
    /// The partner name, if the profile carries a name heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_name: Option<String>,
    /// Section title → trimmed body, in first-occurrence order.
    pub sections: IndexMap<String, String>,
}

impl Document {
    /// The section body for `title`, or `""` when the section is absent.
    pub fn section(&self, title: &str) -> &str {
        self.sections.get(title).map(String::as_str).unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// ContentKind
// ---------------------------------------------------------------------------

/// Structural category of a section body.
///
/// Classification precedence is a hard contract:
/// `DiagramSource` > `Table` > `BulletList` > `FreeText`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Mermaid diagram source (fenced block or bare grammar opener).
    DiagramSource,
    /// Markdown table with a header/separator line pair.
    Table,
    /// Every non-blank line is a `*` or `-` bullet.
    BulletList,
    /// Anything else, including the empty body.
    FreeText,
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One data row of a markdown table, keyed by the header row.
///
/// Fields are ordered pairs rather than a map so duplicate column names
/// survive as given; cells are zipped to columns positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub fields: Vec<(String, String)>,
}

impl Record {
    /// The cell under the first column named `column`, if any.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

// ---------------------------------------------------------------------------
// MappingIndex
// ---------------------------------------------------------------------------

/// One partner appearing under a domain (or in the uncategorized bucket).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// `"{name}({relation_level})"` display label.
    pub label: String,
    /// Identifier of the source document.
    pub source_id: String,
}

/// Cross-document index: master domain → partners connected to it.
///
/// Every master domain is present (in master order) even when its list is
/// empty, so a consumer can render a complete taxonomy grid. Partners whose
/// items matched no master domain land once in `uncategorized`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingIndex {
    pub domains: IndexMap<String, Vec<MappingEntry>>,
    pub uncategorized: Vec<MappingEntry>,
}

impl MappingIndex {
    /// An index with every master domain mapped to an empty list.
    pub fn new(master_domains: &[String]) -> Self {
        Self {
            domains: master_domains
                .iter()
                .map(|domain| (domain.clone(), Vec::new()))
                .collect(),
            uncategorized: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_lookup_defaults_to_empty() {
        let mut sections = IndexMap::new();
        sections.insert(SECTION_RELATION_LEVEL.to_string(), "強化".to_string());
        let doc = Document {
            source_id: "acme.md".into(),
            partner_name: Some("Acme Corp".into()),
            sections,
        };

        assert_eq!(doc.section(SECTION_RELATION_LEVEL), "強化");
        assert_eq!(doc.section(SECTION_DOMAINS), "");
    }

    #[test]
    fn record_keeps_duplicate_columns() {
        let record = Record {
            fields: vec![
                ("項目".into(), "a".into()),
                ("項目".into(), "b".into()),
            ],
        };
        // Lookup returns the first match; both pairs survive positionally.
        assert_eq!(record.get("項目"), Some("a"));
        assert_eq!(record.fields.len(), 2);
    }

    #[test]
    fn mapping_index_keeps_master_order() {
        let master = vec!["営業".to_string(), "運用".to_string()];
        let index = MappingIndex::new(&master);
        let keys: Vec<&String> = index.domains.keys().collect();
        assert_eq!(keys, ["営業", "運用"]);
        assert!(index.domains["営業"].is_empty());
    }

    #[test]
    fn document_serializes_in_section_order() {
        let mut sections = IndexMap::new();
        sections.insert("A".to_string(), "1".to_string());
        sections.insert("B".to_string(), "2".to_string());
        let doc = Document {
            source_id: "x.md".into(),
            partner_name: None,
            sections,
        };

        let json = serde_json::to_string(&doc).expect("serialize");
        assert!(json.find("\"A\"").unwrap() < json.find("\"B\"").unwrap());
        let parsed: Document = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.sections.len(), 2);
    }
}
