//! Layout and field-schema extraction over the export markup.
//!
//! This crate provides:
//! - [`document`]: query helpers over `roxmltree` and nested-layout parsing
//! - [`layouts`]: the three-pass layout group processor
//! - [`schema`]: the database field schema extractor

pub mod document;
pub mod layouts;
pub mod schema;

pub use document::{child_path, parse_document, parse_nested};
pub use layouts::{
    LAYOUT_PASSES, LayoutElement, LayoutPass, LayoutRegistries, canonical_field_id,
    process_layout_groups, profile_name,
};
pub use schema::{MISSING_COLUMN_PART, extract_db_fields, parse_lovs};
