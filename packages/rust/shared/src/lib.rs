//! Shared types, error model, and configuration for PartnerBoard.
//!
//! This crate is the foundation depended on by all other PartnerBoard crates.
//! It provides:
//! - [`PartnerBoardError`] — the unified error type
//! - Domain types ([`Document`], [`ContentKind`], [`Record`], [`MappingIndex`])
//! - Configuration ([`AppConfig`], master-list loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from, load_master_list, load_relation_master,
};
pub use error::{PartnerBoardError, Result};
pub use types::{
    ContentKind, Document, MappingEntry, MappingIndex, Record, SECTION_CONTACTS,
    SECTION_DOMAINS, SECTION_EVALUATION, SECTION_FUTURE, SECTION_PARTNERS, SECTION_PRODUCTS,
    SECTION_PURPOSE, SECTION_RECENT_RESULTS, SECTION_RELATION_LEVEL, SECTION_URL, UNKNOWN_NAME,
};
