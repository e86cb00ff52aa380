//! Layout group processing.
//!
//! Walks the three layout categories in pass order and merges what each
//! embedded layout definition declares into one [`LayoutRegistries`]
//! accumulator: field records, profile mappings, cards and custom buttons.

use roxmltree::Node;
use tracing::{debug, instrument};

use layoutmap_shared::{
    ButtonRecord, ButtonRegistry, CardRecord, CardRegistry, ExtractStats, ExtractionConfig,
    FieldRecord, FieldRegistry, Flag, LayoutFlags, LayoutType, ProfileMapping, ProfileRegistry,
};

use crate::document::{child, descendants_named, has_marker, parse_nested, text_content};

// ---------------------------------------------------------------------------
// Markup vocabulary
// ---------------------------------------------------------------------------

const GROUP_ID_ATTR: &str = "groupId";
const LAYOUT_DEFINITION_TAG: &str = "LayoutDefinition";
const LAYOUT_NAME_ATTR: &str = "name";

const SECTION_TAG: &str = "Section";
const SECTION_LABEL_TAG: &str = "SectionLabel";
const SECTION_TEXT_ATTR: &str = "localizedText";

const CARD_MARKER_ATTR: &str = "hasCardName";
const PROPERTY_TAG: &str = "Property";
const CARD_NAME_KEY: &str = "cardName";

const BUTTON_MARKER_ATTR: &str = "isCustomButton";

const COLUMN_TAG: &str = "Column";
const VISIBILITY_TAG: &str = "VisibilityOptions";
const DEPENDENTS_TAG: &str = "Dependents";
const OPTION_TAG: &str = "Option";
const DEPENDENT_FIELD_TAG: &str = "DependentField";

/// One layout category: the group element that holds it and its layout type.
#[derive(Debug, Clone, Copy)]
pub struct LayoutPass {
    pub group_tag: &'static str,
    pub layout_type: LayoutType,
}

/// The three passes, in merge order.
pub const LAYOUT_PASSES: [LayoutPass; 3] = [
    LayoutPass {
        group_tag: "NewEditLayoutGroup",
        layout_type: LayoutType::NewEdit,
    },
    LayoutPass {
        group_tag: "DetailLayoutGroup",
        layout_type: LayoutType::Detail,
    },
    LayoutPass {
        group_tag: "HistoryLayoutGroup",
        layout_type: LayoutType::History,
    },
];

// ---------------------------------------------------------------------------
// Accumulator
// ---------------------------------------------------------------------------

/// Registries shared by all three passes of one extraction call.
#[derive(Debug, Default)]
pub struct LayoutRegistries {
    pub fields: FieldRegistry,
    pub profiles: ProfileRegistry,
    pub cards: CardRegistry,
    pub buttons: ButtonRegistry,
    pub stats: ExtractStats,
}

// ---------------------------------------------------------------------------
// Element model
// ---------------------------------------------------------------------------

/// A layout element the processor cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement<'a> {
    Section(SectionDef<'a>),
    Card { card_name: Option<&'a str> },
    CustomButton {
        id: Option<&'a str>,
        caption: Option<&'a str>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionDef<'a> {
    pub label: Option<&'a str>,
    pub columns: Vec<ColumnDef<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef<'a> {
    pub field_id: Option<&'a str>,
    pub label: Option<&'a str>,
    pub flags: LayoutFlags,
    pub visibility_options: Option<Vec<String>>,
    pub dependents: Option<Vec<DependentOption<'a>>>,
}

/// One `<Option>` under a column's dependents node. Options without a
/// `value` attribute are dropped when read.
#[derive(Debug, Clone, PartialEq)]
pub struct DependentOption<'a> {
    pub on_value: &'a str,
    pub child_ids: Vec<&'a str>,
}

impl<'a> LayoutElement<'a> {
    /// Every kind an element carries. The `Section` tag and the two marker
    /// attributes are independent, so one element can yield several kinds.
    pub fn classify(node: Node<'a, '_>) -> Vec<Self> {
        let mut kinds = Vec::new();
        if !node.is_element() {
            return kinds;
        }
        if node.has_tag_name(SECTION_TAG) {
            kinds.push(Self::Section(SectionDef::read(node)));
        }
        if has_marker(node, CARD_MARKER_ATTR) {
            kinds.push(Self::Card {
                card_name: card_name(node),
            });
        }
        if has_marker(node, BUTTON_MARKER_ATTR) {
            kinds.push(Self::CustomButton {
                id: non_empty_attr(node, "id"),
                caption: node.attribute("caption"),
            });
        }
        kinds
    }
}

impl<'a> SectionDef<'a> {
    /// Columns belong to their nearest enclosing `Section`.
    fn read(node: Node<'a, '_>) -> Self {
        Self {
            label: child(node, SECTION_LABEL_TAG)
                .and_then(|label| label.attribute(SECTION_TEXT_ATTR)),
            columns: descendants_named(node, COLUMN_TAG)
                .filter(|column| {
                    column
                        .ancestors()
                        .find(|a| a.has_tag_name(SECTION_TAG))
                        .is_some_and(|owner| owner == node)
                })
                .map(ColumnDef::read)
                .collect(),
        }
    }
}

impl<'a> ColumnDef<'a> {
    fn read(node: Node<'a, '_>) -> Self {
        let required = matches!(node.attribute("required"), Some("1" | "true"));
        let read_only = node.attribute("readOnly") == Some("1");
        let hidden = node.attribute("hidden") == Some("1");

        Self {
            field_id: non_empty_attr(node, "fieldId"),
            label: node.attribute("label"),
            flags: LayoutFlags {
                is_required: Flag::from(required),
                is_read_only: Flag::from(read_only),
                is_hidden: Flag::from(hidden),
            },
            visibility_options: child(node, VISIBILITY_TAG)
                .map(|v| split_display_names(v.attribute("displayNames").unwrap_or_default())),
            dependents: child(node, DEPENDENTS_TAG).map(read_dependents),
        }
    }
}

fn read_dependents<'a>(node: Node<'a, '_>) -> Vec<DependentOption<'a>> {
    node.children()
        .filter(|n| n.has_tag_name(OPTION_TAG))
        .filter_map(|option| {
            let on_value = option.attribute("value")?;
            let child_ids = descendants_named(option, DEPENDENT_FIELD_TAG)
                .filter_map(|field| non_empty_attr(field, "id"))
                .collect();
            Some(DependentOption {
                on_value,
                child_ids,
            })
        })
        .collect()
}

fn card_name<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    descendants_named(node, PROPERTY_TAG)
        .find(|p| p.attribute("key") == Some(CARD_NAME_KEY))
        .and_then(|p| p.attribute("value"))
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

fn non_empty_attr<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).filter(|value| !value.trim().is_empty())
}

/// Split a comma-separated display-name list, dropping empty entries.
fn split_display_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Canonicalization
// ---------------------------------------------------------------------------

/// Strip the custom-field prefix, if present.
pub fn canonical_field_id<'a>(raw: &'a str, prefix: &str) -> &'a str {
    raw.strip_prefix(prefix).unwrap_or(raw)
}

/// Profile name encoded in a layout name: the part after the last `:`.
pub fn profile_name(layout_name: &str) -> &str {
    layout_name
        .rsplit_once(':')
        .map_or(layout_name, |(_, tail)| tail)
        .trim()
}

// ---------------------------------------------------------------------------
// Processing
// ---------------------------------------------------------------------------

/// Run all three layout passes over the layout sub-section.
#[instrument(skip_all)]
pub fn process_layout_groups(
    layout_root: Node<'_, '_>,
    config: &ExtractionConfig,
    registries: &mut LayoutRegistries,
) {
    for pass in LAYOUT_PASSES {
        process_pass(layout_root, pass, config, registries);
    }
}

fn process_pass(
    layout_root: Node<'_, '_>,
    pass: LayoutPass,
    config: &ExtractionConfig,
    registries: &mut LayoutRegistries,
) {
    let fields_before = registries.fields.len();

    for group in descendants_named(layout_root, pass.group_tag) {
        registries.stats.groups += 1;
        let group_id = non_empty_attr(group, GROUP_ID_ATTR);

        for definition in descendants_named(group, LAYOUT_DEFINITION_TAG) {
            let body = text_content(definition);
            let Some(layout) = parse_nested(&body) else {
                registries.stats.layouts_skipped += 1;
                debug!(
                    layout_type = %pass.layout_type,
                    group_id = group_id.unwrap_or("-"),
                    "skipping layout definition"
                );
                continue;
            };

            registries.stats.layouts += 1;
            process_layout(
                layout.root_element(),
                pass.layout_type,
                group_id,
                config,
                registries,
            );
        }
    }

    debug!(
        layout_type = %pass.layout_type,
        new_fields = registries.fields.len() - fields_before,
        "layout pass complete"
    );
}

/// Merge one parsed layout definition into the registries.
pub fn process_layout(
    layout: Node<'_, '_>,
    layout_type: LayoutType,
    group_id: Option<&str>,
    config: &ExtractionConfig,
    registries: &mut LayoutRegistries,
) {
    let layout_name = layout
        .attribute(LAYOUT_NAME_ATTR)
        .unwrap_or(&config.default_layout_name);

    if let Some(group_id) = group_id {
        let profile = profile_name(layout_name);
        if !profile.is_empty() {
            registries.profiles.insert(
                group_id.to_string(),
                ProfileMapping {
                    profile_name: profile.to_string(),
                    layout_type,
                    group_id: group_id.to_string(),
                },
            );
        }
    }

    for element in layout.descendants().flat_map(LayoutElement::classify) {
        match element {
            LayoutElement::Card {
                card_name: Some(card_name),
            } => {
                registries.cards.insert(
                    format!("{layout_name}-{card_name}"),
                    CardRecord {
                        name: card_name.to_string(),
                        layout_name: layout_name.to_string(),
                    },
                );
            }
            LayoutElement::Card { card_name: None } => {}
            LayoutElement::CustomButton {
                id: Some(id),
                caption,
            } => {
                registries.buttons.insert(
                    id.to_string(),
                    ButtonRecord {
                        id: id.to_string(),
                        caption: caption.map(String::from),
                        layout_name: layout_name.to_string(),
                    },
                );
            }
            LayoutElement::CustomButton { id: None, .. } => {}
            LayoutElement::Section(section) => {
                let section_name = section.label.unwrap_or(&config.default_section_name);
                for column in &section.columns {
                    merge_column(column, section_name, layout_type, config, registries);
                }
            }
        }
    }
}

fn merge_column(
    column: &ColumnDef<'_>,
    section_name: &str,
    layout_type: LayoutType,
    config: &ExtractionConfig,
    registries: &mut LayoutRegistries,
) {
    let Some(raw_id) = column
        .field_id
        .filter(|id| *id != config.blank_cell_marker)
    else {
        registries.stats.columns_skipped += 1;
        return;
    };

    let field_id = canonical_field_id(raw_id, &config.custom_field_prefix);
    let record = registries
        .fields
        .entry(field_id.to_string())
        .or_insert_with(|| {
            FieldRecord::new(
                field_id,
                raw_id,
                column.label.map(String::from),
                section_name,
            )
        });

    record.layouts.insert(layout_type, column.flags);

    if let Some(options) = &column.visibility_options {
        record.visibility_options = Some(options.clone());
    }

    if let Some(dependents) = &column.dependents {
        record.dependency_contexts.insert(layout_type);
        for option in dependents {
            let children = option.child_ids.iter().map(|id| id.to_string());
            record.merge_dependency(option.on_value, children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;

    fn config() -> ExtractionConfig {
        ExtractionConfig::default()
    }

    /// One group element holding the given layout bodies as CDATA.
    fn group(tag: &str, group_id: Option<&str>, bodies: &[&str]) -> String {
        let mut xml = match group_id {
            Some(id) => format!("<{tag} groupId=\"{id}\">"),
            None => format!("<{tag}>"),
        };
        for body in bodies {
            xml.push_str(&format!("<LayoutDefinition><![CDATA[{body}]]></LayoutDefinition>"));
        }
        xml.push_str(&format!("</{tag}>"));
        xml
    }

    fn layouts_xml(groups: &[String]) -> String {
        format!("<Layouts>{}</Layouts>", groups.concat())
    }

    fn run(xml: &str) -> LayoutRegistries {
        let doc = parse_document(xml).expect("outer parse");
        let mut registries = LayoutRegistries::default();
        process_layout_groups(doc.root_element(), &config(), &mut registries);
        registries
    }

    #[test]
    fn canonicalizes_custom_prefix() {
        assert_eq!(canonical_field_id("cust_42", "cust_"), "42");
        assert_eq!(canonical_field_id("name", "cust_"), "name");
        assert_eq!(canonical_field_id("my_cust_1", "cust_"), "my_cust_1");
    }

    #[test]
    fn profile_name_after_last_colon() {
        assert_eq!(profile_name("Default Layout: Sales: Manager "), "Manager");
        assert_eq!(profile_name("  Standalone "), "Standalone");
        assert_eq!(profile_name("Trailing:   "), "");
    }

    #[test]
    fn merges_field_across_layout_types() {
        let new_edit = r#"<Layout name="Edit: Sales">
            <Section><SectionLabel localizedText="General"/>
              <Column fieldId="cust_42" label="Budget" required="1"/>
            </Section></Layout>"#;
        let detail = r#"<Layout name="Detail: Sales">
            <Section><SectionLabel localizedText="Finance"/>
              <Column fieldId="cust_42" label="Budget (detail)" hidden="1"/>
            </Section></Layout>"#;
        let xml = layouts_xml(&[
            group("DetailLayoutGroup", Some("G2"), &[detail]),
            group("NewEditLayoutGroup", Some("G1"), &[new_edit]),
        ]);

        let registries = run(&xml);
        let record = registries.fields.get("42").expect("merged record");

        assert_eq!(registries.fields.len(), 1);
        assert_eq!(record.original_id, "cust_42");
        // newEdit runs first regardless of document order
        assert_eq!(record.layout_label.as_deref(), Some("Budget"));
        assert_eq!(record.section, "General");
        assert_eq!(record.layouts[&LayoutType::NewEdit].is_required, Flag::Yes);
        assert_eq!(record.layouts[&LayoutType::Detail].is_hidden, Flag::Yes);
        assert_eq!(record.layouts[&LayoutType::Detail].is_required, Flag::No);
    }

    #[test]
    fn required_accepts_both_markers() {
        let body = r#"<Layout name="L"><Section>
            <Column fieldId="a" required="true"/>
            <Column fieldId="b" required="yes"/>
            <Column fieldId="c" readOnly="1" hidden="true"/>
          </Section></Layout>"#;
        let registries = run(&layouts_xml(&[group("NewEditLayoutGroup", None, &[body])]));

        let flags = |id: &str| registries.fields[id].layouts[&LayoutType::NewEdit];
        assert_eq!(flags("a").is_required, Flag::Yes);
        assert_eq!(flags("b").is_required, Flag::No);
        assert_eq!(flags("c").is_read_only, Flag::Yes);
        assert_eq!(flags("c").is_hidden, Flag::No);
    }

    #[test]
    fn blank_and_missing_ids_are_skipped() {
        let body = r#"<Layout name="L"><Section>
            <Column fieldId="BLANK_CELL" label="x"/>
            <Column label="no id"/>
            <Column fieldId="  "/>
            <Column fieldId="real"/>
          </Section></Layout>"#;
        let registries = run(&layouts_xml(&[group("NewEditLayoutGroup", None, &[body])]));

        assert_eq!(registries.fields.len(), 1);
        assert!(registries.fields.contains_key("real"));
        assert_eq!(registries.stats.columns_skipped, 3);
    }

    #[test]
    fn malformed_layout_is_skipped_and_siblings_continue() {
        let broken = r#"<Layout name="Broken"><Section>"#;
        let good = r#"<Layout name="Good"><Section><Column fieldId="f1"/></Section></Layout>"#;
        let later = r#"<Layout name="Later"><Section><Column fieldId="f2"/></Section></Layout>"#;
        let xml = layouts_xml(&[
            group("NewEditLayoutGroup", Some("G1"), &[broken, "   ", good]),
            group("HistoryLayoutGroup", Some("G2"), &[later]),
        ]);

        let registries = run(&xml);

        assert!(registries.fields.contains_key("f1"));
        assert!(registries.fields.contains_key("f2"));
        assert_eq!(registries.stats.layouts, 2);
        assert_eq!(registries.stats.layouts_skipped, 2);
        assert_eq!(registries.stats.groups, 2);
    }

    #[test]
    fn dependencies_merge_per_trigger_value() {
        let new_edit = r#"<Layout name="L"><Section>
            <Column fieldId="status">
              <Dependents>
                <Option value="Open"><DependentField id="cust_a"/><DependentField id="b"/></Option>
                <Option value="Open"><DependentField id="b"/><DependentField id="c"/></Option>
                <Option value="Closed"><DependentField id="a"/></Option>
                <Option><DependentField id="ignored"/></Option>
              </Dependents>
            </Column></Section></Layout>"#;
        let detail = r#"<Layout name="L"><Section>
            <Column fieldId="status">
              <Dependents>
                <Option value="Open"><DependentField id="c"/><DependentField id="cust_a"/><DependentField id="d"/></Option>
              </Dependents>
            </Column></Section></Layout>"#;
        let xml = layouts_xml(&[
            group("NewEditLayoutGroup", None, &[new_edit]),
            group("DetailLayoutGroup", None, &[detail]),
        ]);

        let registries = run(&xml);
        let record = &registries.fields["status"];

        assert_eq!(record.dependencies.len(), 2);
        assert_eq!(record.dependencies[0].on_value, "Open");
        assert_eq!(
            record.dependencies[0].child_fields,
            vec!["cust_a", "b", "c", "d"]
        );
        assert_eq!(record.dependencies[1].on_value, "Closed");
        assert_eq!(record.dependencies[1].child_fields, vec!["a"]);
        let contexts: Vec<LayoutType> = record.dependency_contexts.iter().copied().collect();
        assert_eq!(contexts, vec![LayoutType::NewEdit, LayoutType::Detail]);
    }

    #[test]
    fn visibility_options_last_write_wins() {
        let first = r#"<Layout name="L"><Section><Column fieldId="f">
            <VisibilityOptions displayNames="Create, Edit,View"/></Column></Section></Layout>"#;
        let second = r#"<Layout name="L"><Section><Column fieldId="f">
            <VisibilityOptions displayNames="History"/></Column></Section></Layout>"#;
        let untouched = r#"<Layout name="L"><Section><Column fieldId="f"/></Section></Layout>"#;

        let registries = run(&layouts_xml(&[group("NewEditLayoutGroup", None, &[first])]));
        assert_eq!(
            registries.fields["f"].visibility_options,
            Some(vec!["Create".into(), "Edit".into(), "View".into()])
        );

        let registries = run(&layouts_xml(&[
            group("NewEditLayoutGroup", None, &[first]),
            group("DetailLayoutGroup", None, &[second]),
            group("HistoryLayoutGroup", None, &[untouched]),
        ]));
        assert_eq!(
            registries.fields["f"].visibility_options,
            Some(vec!["History".into()])
        );
    }

    #[test]
    fn profiles_cards_and_buttons() {
        let first = r#"<Layout name="Standard: Sales Rep">
            <Control hasCardName="true"><Property key="other" value="x"/><Property key="cardName" value="Pipeline"/></Control>
            <Control hasCardName="true"><Property key="other" value="x"/></Control>
            <Control isCustomButton="true" id="btnApprove" caption="Approve"/>
            <Control isCustomButton="true" caption="No id"/>
          </Layout>"#;
        let second = r#"<Layout name="Standard: Sales Manager">
            <Control isCustomButton="true" id="btnApprove" caption="Approve All"/>
          </Layout>"#;
        let no_profile = r#"<Layout name="Trailing: "/>"#;
        let xml = layouts_xml(&[
            group("NewEditLayoutGroup", Some("G1"), &[first, second, no_profile]),
            group("DetailLayoutGroup", None, &[first]),
        ]);

        let registries = run(&xml);

        assert_eq!(registries.profiles.len(), 1);
        let mapping = &registries.profiles["G1"];
        assert_eq!(mapping.profile_name, "Sales Manager");
        assert_eq!(mapping.layout_type, LayoutType::NewEdit);
        assert_eq!(mapping.group_id, "G1");

        assert_eq!(registries.cards.len(), 1);
        let card = &registries.cards["Standard: Sales Rep-Pipeline"];
        assert_eq!(card.name, "Pipeline");

        assert_eq!(registries.buttons.len(), 1);
        let button = &registries.buttons["btnApprove"];
        assert_eq!(button.caption.as_deref(), Some("Approve"));
        assert_eq!(button.layout_name, "Standard: Sales Rep");
    }

    #[test]
    fn defaults_for_missing_names() {
        let body = r#"<Layout><Section><Column fieldId="f"/></Section>
            <Control hasCardName="true"><Property key="cardName" value="Summary"/></Control></Layout>"#;
        let registries = run(&layouts_xml(&[group("NewEditLayoutGroup", Some("G9"), &[body])]));

        assert_eq!(registries.fields["f"].section, "Untitled Section");
        assert_eq!(registries.fields["f"].layout_label, None);
        assert!(registries.cards.contains_key("Unnamed Layout-Summary"));
        assert_eq!(registries.profiles["G9"].profile_name, "Unnamed Layout");
    }

    #[test]
    fn classify_yields_every_marker() {
        let doc = parse_document(
            r#"<Layout><Control isCustomButton="true" hasCardName="true" id="b1"/><Plain/></Layout>"#,
        )
        .expect("parse");
        let kinds: Vec<LayoutElement<'_>> = doc
            .root_element()
            .descendants()
            .flat_map(LayoutElement::classify)
            .collect();

        assert_eq!(kinds.len(), 2);
        assert!(matches!(kinds[0], LayoutElement::Card { card_name: None }));
        assert!(matches!(
            kinds[1],
            LayoutElement::CustomButton { id: Some("b1"), .. }
        ));
    }

    #[test]
    fn element_with_both_markers_registers_card_and_button() {
        let body = r#"<Layout name="Board">
            <Control isCustomButton="true" hasCardName="true" id="b1" caption="Open">
              <Property key="cardName" value="Pipeline"/>
            </Control>
            <Section hasCardName="true" isCustomButton="true" id="s1">
              <Property key="cardName" value="Summary"/>
              <Column fieldId="f"/>
            </Section>
          </Layout>"#;
        let registries = run(&layouts_xml(&[group("NewEditLayoutGroup", None, &[body])]));

        assert_eq!(registries.buttons.len(), 2);
        assert_eq!(registries.buttons["b1"].caption.as_deref(), Some("Open"));
        assert!(registries.buttons.contains_key("s1"));
        assert_eq!(registries.cards.len(), 2);
        assert!(registries.cards.contains_key("Board-Pipeline"));
        assert!(registries.cards.contains_key("Board-Summary"));
        assert!(registries.fields.contains_key("f"));
    }

    #[test]
    fn dependent_ids_are_kept_as_written() {
        let body = r#"<Layout name="L"><Section>
            <Column fieldId="status">
              <Dependents>
                <Option value="Won"><DependentField id="cust_a"/><DependentField id="a"/><DependentField id="cust_a"/></Option>
              </Dependents>
            </Column></Section></Layout>"#;
        let registries = run(&layouts_xml(&[group("NewEditLayoutGroup", None, &[body])]));

        let dependency = &registries.fields["status"].dependencies[0];
        assert_eq!(dependency.child_fields, vec!["cust_a", "a"]);
    }

    #[test]
    fn option_without_value_and_blank_field_id_are_dropped() {
        let body = r#"<Layout name="L"><Section>
            <Column fieldId="   " label="whitespace"/>
            <Column fieldId="status">
              <Dependents>
                <Option><DependentField id="x"/></Option>
                <Option value=""><DependentField id="y"/></Option>
              </Dependents>
            </Column></Section></Layout>"#;
        let registries = run(&layouts_xml(&[group("NewEditLayoutGroup", None, &[body])]));

        assert_eq!(registries.fields.len(), 1);
        assert_eq!(registries.stats.columns_skipped, 1);
        let dependencies = &registries.fields["status"].dependencies;
        assert_eq!(dependencies.len(), 1);
        assert_eq!(dependencies[0].on_value, "");
        assert_eq!(dependencies[0].child_fields, vec!["y"]);
    }

    #[test]
    fn nested_section_owns_its_columns() {
        let body = r#"<Layout name="L">
            <Section><SectionLabel localizedText="Outer"/>
              <Column fieldId="outer" label="BLANK"/>
              <Section><SectionLabel localizedText="Inner"/>
                <Column fieldId="inner"/>
                <Column fieldId="BLANK_CELL"/>
              </Section>
            </Section></Layout>"#;
        let registries = run(&layouts_xml(&[group("NewEditLayoutGroup", None, &[body])]));

        assert_eq!(registries.fields["outer"].section, "Outer");
        assert_eq!(registries.fields["inner"].section, "Inner");
        assert_eq!(registries.stats.columns_skipped, 1);
    }
}
