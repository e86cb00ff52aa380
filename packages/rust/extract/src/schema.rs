//! Field schema extraction: `<Fields>` section → database-field registry.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use roxmltree::Node;
use tracing::{debug, instrument};

use layoutmap_shared::{DbFieldRecord, DbFieldRegistry};

use crate::document::{child_text, descendants_named};

/// Rendered in place of a missing table or field name in `columnName`.
pub const MISSING_COLUMN_PART: &str = "unknown";

/// Comma, optionally followed by one space.
static LOV_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r", ?").expect("LOV separator regex"));

/// Build the database-field registry from the schema section.
///
/// Fields without a `<FieldId>` are skipped; every other child is optional.
#[instrument(skip_all)]
pub fn extract_db_fields(schema_root: Node<'_, '_>) -> DbFieldRegistry {
    let mut registry = IndexMap::new();

    for field in descendants_named(schema_root, "Field") {
        let Some(id) = child_text(field, "FieldId").filter(|id| !id.is_empty()) else {
            debug!("skipping schema field without id");
            continue;
        };

        let table_name = child_text(field, "TableName");
        let field_name = child_text(field, "FieldName");
        let column_name = format!(
            "{}.{}",
            table_name.as_deref().unwrap_or(MISSING_COLUMN_PART),
            field_name.as_deref().unwrap_or(MISSING_COLUMN_PART),
        );

        registry.insert(
            id,
            DbFieldRecord {
                label: child_text(field, "Label"),
                field_type: child_text(field, "FieldType"),
                length: child_text(field, "Length"),
                default_value: child_text(field, "DefaultValue"),
                table_name,
                field_name,
                column_name,
                lovs: parse_lovs(child_text(field, "Lov").as_deref()),
            },
        );
    }

    debug!(fields = registry.len(), "schema extraction complete");
    registry
}

/// Split a list-of-values string; `None` when absent or blank.
pub fn parse_lovs(raw: Option<&str>) -> Option<Vec<String>> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(LOV_SEPARATOR.split(trimmed).map(String::from).collect())
}
