//! Batch aggregation over partner profile documents.
//!
//! Runs the profile parser over a set of [`DocumentRef`]s and builds the
//! cross-document [`MappingIndex`](partnerboard_shared::MappingIndex).

pub mod mapping;
pub mod source;

pub use mapping::build_mapping;
pub use source::{DocumentRef, FileDocument, list_profile_files};
