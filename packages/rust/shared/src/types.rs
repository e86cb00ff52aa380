//! Core domain types for the normalized layout model.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LayoutType
// ---------------------------------------------------------------------------

/// The UI context a layout definition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutType {
    /// Create/edit form.
    NewEdit,
    /// Read-only detail view.
    Detail,
    /// Change-history view.
    History,
}

impl LayoutType {
    /// Wire name of the layout type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewEdit => "newEdit",
            Self::Detail => "detail",
            Self::History => "history",
        }
    }
}

impl std::fmt::Display for LayoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Per-layout field flags
// ---------------------------------------------------------------------------

/// A boolean column setting, rendered as `"Yes"` / `"No"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Flag {
    Yes,
    #[default]
    No,
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

/// How a field behaves in one layout type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutFlags {
    pub is_required: Flag,
    pub is_read_only: Flag,
    pub is_hidden: Flag,
}

// ---------------------------------------------------------------------------
// Dependencies
// ---------------------------------------------------------------------------

/// Fields made visible when the owning field takes a given value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    /// Trigger value.
    pub on_value: String,
    /// Dependent field ids, distinct, in first-seen order.
    pub child_fields: Vec<String>,
}

impl Dependency {
    /// Create an entry, dropping duplicate children.
    pub fn new(on_value: impl Into<String>, children: impl IntoIterator<Item = String>) -> Self {
        let mut dependency = Self {
            on_value: on_value.into(),
            child_fields: Vec::new(),
        };
        dependency.absorb(children);
        dependency
    }

    /// Append children not already listed.
    pub fn absorb(&mut self, children: impl IntoIterator<Item = String>) {
        for child in children {
            if !self.child_fields.contains(&child) {
                self.child_fields.push(child);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// FieldRecord
// ---------------------------------------------------------------------------

/// List-of-values slots, one per layout type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldLovs {
    pub new_edit: Option<Vec<String>>,
    pub detail: Option<Vec<String>>,
    pub history: Option<Vec<String>>,
}

impl FieldLovs {
    /// Mutable access to the slot for a layout type.
    pub fn slot_mut(&mut self, layout_type: LayoutType) -> &mut Option<Vec<String>> {
        match layout_type {
            LayoutType::NewEdit => &mut self.new_edit,
            LayoutType::Detail => &mut self.detail,
            LayoutType::History => &mut self.history,
        }
    }
}

/// A field merged across every layout type it appears in.
///
/// `original_id`, `layout_label` and `section` are fixed by the first layout
/// pass that sees the field. Everything else accumulates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    /// Canonical id (custom-field prefix stripped).
    pub field_id: String,
    /// Id exactly as it appeared in the first layout.
    pub original_id: String,
    pub layout_label: Option<String>,
    pub section: String,
    pub layouts: IndexMap<LayoutType, LayoutFlags>,
    pub visibility_options: Option<Vec<String>>,
    pub dependency_contexts: IndexSet<LayoutType>,
    pub dependencies: Vec<Dependency>,
    pub db_info: Option<DbFieldRecord>,
    pub lovs: FieldLovs,
}

impl FieldRecord {
    /// Create a record with its identity fixed and nothing accumulated yet.
    pub fn new(
        field_id: impl Into<String>,
        original_id: impl Into<String>,
        layout_label: Option<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            original_id: original_id.into(),
            layout_label,
            section: section.into(),
            layouts: IndexMap::new(),
            visibility_options: None,
            dependency_contexts: IndexSet::new(),
            dependencies: Vec::new(),
            db_info: None,
            lovs: FieldLovs::default(),
        }
    }

    /// Merge the children for one trigger value into the dependency list.
    pub fn merge_dependency(
        &mut self,
        on_value: &str,
        children: impl IntoIterator<Item = String>,
    ) {
        match self
            .dependencies
            .iter_mut()
            .find(|dep| dep.on_value == on_value)
        {
            Some(existing) => existing.absorb(children),
            None => self.dependencies.push(Dependency::new(on_value, children)),
        }
    }
}

// ---------------------------------------------------------------------------
// Profiles, cards, buttons
// ---------------------------------------------------------------------------

/// Association from a group id to the profile its layout belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMapping {
    pub profile_name: String,
    pub layout_type: LayoutType,
    pub group_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub name: String,
    pub layout_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonRecord {
    pub id: String,
    pub caption: Option<String>,
    pub layout_name: String,
}

// ---------------------------------------------------------------------------
// DbFieldRecord
// ---------------------------------------------------------------------------

/// A database field as described by the schema section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbFieldRecord {
    pub label: Option<String>,
    pub field_type: Option<String>,
    pub length: Option<String>,
    pub default_value: Option<String>,
    pub table_name: Option<String>,
    pub field_name: Option<String>,
    /// `table.field`, always present.
    pub column_name: String,
    pub lovs: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Registries and the extraction result
// ---------------------------------------------------------------------------

pub type FieldRegistry = IndexMap<String, FieldRecord>;
pub type ProfileRegistry = IndexMap<String, ProfileMapping>;
pub type CardRegistry = IndexMap<String, CardRecord>;
pub type ButtonRegistry = IndexMap<String, ButtonRecord>;
pub type DbFieldRegistry = IndexMap<String, DbFieldRecord>;

/// Counters for fragments dropped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractStats {
    /// Group nodes visited across all passes.
    pub groups: usize,
    /// Layout definitions that parsed and were processed.
    pub layouts: usize,
    /// Layout definitions skipped because they were empty or malformed.
    pub layouts_skipped: usize,
    /// Columns skipped for a missing or blank-cell field id.
    pub columns_skipped: usize,
}

/// Everything one extraction call produces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    #[serde(with = "crate::pairs")]
    pub fields: FieldRegistry,
    #[serde(with = "crate::pairs")]
    pub cards: CardRegistry,
    #[serde(with = "crate::pairs")]
    pub buttons: ButtonRegistry,
    #[serde(with = "crate::pairs")]
    pub profile_mapping: ProfileRegistry,
    #[serde(with = "crate::pairs")]
    pub db_data: DbFieldRegistry,
    pub stats: ExtractStats,
}
