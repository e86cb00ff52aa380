//! End-to-end `parseCombined` pipeline: combined export XML → normalized registries.

use std::time::Instant;

use tracing::{debug, info, instrument};

use layoutmap_extract::{
    LayoutRegistries, child_path, extract_db_fields, parse_document, process_layout_groups,
};
use layoutmap_shared::{ExtractionConfig, ExtractionResult, LayoutMapError, Result};

/// Outer result container.
const ROOT_TAG: &str = "ExportResult";

/// Layout sub-section, relative to the root.
const LAYOUT_SECTION_PATH: [&str; 2] = ["LayoutExport", "Layouts"];

/// Field-schema sub-section, relative to the root.
const SCHEMA_SECTION_PATH: [&str; 2] = ["SchemaExport", "Fields"];

/// Run the full extraction over one combined export.
///
/// 1. Parse the outer document
/// 2. Locate `<ExportResult>` and its layout and schema sections
/// 3. Run the three layout passes into one accumulator
/// 4. Extract the database field registry (empty if the section is absent)
/// 5. Link database fields into field records, if configured
#[instrument(skip_all, fields(xml_len = xml.len()))]
pub fn parse_combined(xml: &str, config: &ExtractionConfig) -> Result<ExtractionResult> {
    let start = Instant::now();

    let doc = parse_document(xml)?;
    let root = doc
        .descendants()
        .find(|n| n.has_tag_name(ROOT_TAG))
        .ok_or(LayoutMapError::MissingRoot)?;

    let layout_root =
        child_path(root, &LAYOUT_SECTION_PATH).ok_or(LayoutMapError::MissingLayoutData)?;

    let mut registries = LayoutRegistries::default();
    process_layout_groups(layout_root, config, &mut registries);

    let db_data = match child_path(root, &SCHEMA_SECTION_PATH) {
        Some(schema_root) => extract_db_fields(schema_root),
        None => {
            debug!("no schema section, database field registry left empty");
            Default::default()
        }
    };

    let LayoutRegistries {
        fields,
        profiles,
        cards,
        buttons,
        stats,
    } = registries;

    let mut result = ExtractionResult {
        fields,
        cards,
        buttons,
        profile_mapping: profiles,
        db_data,
        stats,
    };

    if config.link_db_fields {
        let linked = link_db_fields(&mut result);
        debug!(linked, "linked database fields");
    }

    info!(
        fields = result.fields.len(),
        profiles = result.profile_mapping.len(),
        cards = result.cards.len(),
        buttons = result.buttons.len(),
        db_fields = result.db_data.len(),
        layouts = result.stats.layouts,
        layouts_skipped = result.stats.layouts_skipped,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "extraction complete"
    );

    Ok(result)
}

/// Attach database metadata to field records.
///
/// A field matches a database entry by canonical id, then by original id.
/// Matched records get a copy of the entry as `db_info`, and the entry's LOV
/// list in the `lovs` slot of every layout type the field appears in.
/// Returns the number of records linked.
pub fn link_db_fields(result: &mut ExtractionResult) -> usize {
    let ExtractionResult {
        fields, db_data, ..
    } = result;

    let mut linked = 0;
    for record in fields.values_mut() {
        let Some(db) = db_data
            .get(&record.field_id)
            .or_else(|| db_data.get(&record.original_id))
        else {
            continue;
        };

        for layout_type in record.layouts.keys() {
            *record.lovs.slot_mut(*layout_type) = db.lovs.clone();
        }
        record.db_info = Some(db.clone());
        linked += 1;
    }

    linked
}
