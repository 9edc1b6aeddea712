//! Declarative toolbar item model.
//!
//! Settings plugins describe toolbars as arrays of [`ToolbarItemSpec`]
//! objects under the [`TOOLBAR_SCHEMA_KEY`] schema key. This module holds
//! the spec type plus the pure merge/sort functions the factory builder runs
//! on every settings change; both are deliberately free of any settings or
//! widget machinery so they can be tested standalone.

use serde::{Deserialize, Serialize};

use crate::widget::WidgetHandle;

/// Schema key under which plugins contribute toolbar item arrays.
///
/// The value is an object mapping factory names to `ToolbarItemSpec` arrays.
pub const TOOLBAR_SCHEMA_KEY: &str = "jupyter.lab.toolbars";

/// Schema flag requesting array-merge transform semantics for user data.
///
/// When a plugin sets this to `true`, its user-level `"toolbar"` array is
/// merged into the schema defaults instead of overwriting them.
pub const TRANSFORM_SCHEMA_KEY: &str = "jupyter.lab.transform";

/// Effective rank for items that do not specify one.
///
/// Combined with a stable sort this realizes the "default = insertion
/// order" rule: unranked items keep their contribution order relative to
/// each other.
pub const DEFAULT_RANK: i64 = 50;

/// What kind of toolbar entry an item spec describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolbarItemKind {
    /// A command-bound widget built through the registry.
    #[default]
    Command,
    /// Flexible empty space; no widget factory involved.
    Spacer,
    /// A dividing line; no widget factory involved.
    Separator,
}

/// One declarative toolbar entry, as contributed by a settings plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarItemSpec {
    /// Item name, unique within a resolved toolbar.
    pub name: String,

    /// Command id to bind, for `command` items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Entry kind. Defaults to `command`.
    #[serde(rename = "type", default)]
    pub kind: ToolbarItemKind,

    /// Sort key controlling left-to-right position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,

    /// Arguments passed to the command on activation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<serde_json::Value>,

    /// Disabled items are dropped from the resolved toolbar entirely.
    #[serde(default)]
    pub disabled: bool,
}

impl ToolbarItemSpec {
    /// Create a `command` item spec with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: None,
            kind: ToolbarItemKind::default(),
            rank: None,
            args: None,
            disabled: false,
        }
    }

    /// Set the command id using the builder pattern.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set the entry kind using the builder pattern.
    pub fn with_kind(mut self, kind: ToolbarItemKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the rank using the builder pattern.
    pub fn with_rank(mut self, rank: i64) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Set command arguments using the builder pattern.
    pub fn with_args(mut self, args: serde_json::Value) -> Self {
        self.args = Some(args);
        self
    }

    /// Mark the item disabled using the builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// The rank used for ordering, applying [`DEFAULT_RANK`] when unset.
    pub fn effective_rank(&self) -> i64 {
        self.rank.unwrap_or(DEFAULT_RANK)
    }
}

/// A toolbar entry resolved to a concrete widget.
pub struct ResolvedToolbarItem {
    /// The item name from the spec.
    pub name: String,
    /// The constructed widget handle.
    pub widget: WidgetHandle,
}

/// Merge one plugin's contribution into the accumulated item list.
///
/// Items are keyed by name. A later contributor replaces an earlier item's
/// definition in place - the earlier slot is kept, so contribution order
/// still anchors tie-breaking in the subsequent rank sort. New names append.
///
/// This is the single point implementing the "last-loaded contributor wins"
/// collision policy.
pub fn merge_contribution(
    items: &mut Vec<ToolbarItemSpec>,
    contribution: impl IntoIterator<Item = ToolbarItemSpec>,
) {
    for item in contribution {
        match items.iter_mut().find(|existing| existing.name == item.name) {
            Some(slot) => *slot = item,
            None => items.push(item),
        }
    }
}

/// Stable ascending sort on effective rank.
///
/// Ties preserve contribution order (`sort_by_key` is stable).
pub fn sort_by_rank(items: &mut [ToolbarItemSpec]) {
    items.sort_by_key(ToolbarItemSpec::effective_rank);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[ToolbarItemSpec]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_spec_deserializes_from_schema_shape() {
        let spec: ToolbarItemSpec = serde_json::from_value(serde_json::json!({
            "name": "insert",
            "command": "notebook:insert-cell-below",
            "rank": 20
        }))
        .unwrap();

        assert_eq!(spec.name, "insert");
        assert_eq!(spec.command.as_deref(), Some("notebook:insert-cell-below"));
        assert_eq!(spec.kind, ToolbarItemKind::Command);
        assert_eq!(spec.rank, Some(20));
        assert!(!spec.disabled);
    }

    #[test]
    fn test_spec_type_field_maps_to_kind() {
        let spec: ToolbarItemSpec =
            serde_json::from_value(serde_json::json!({ "name": "gap", "type": "spacer" })).unwrap();
        assert_eq!(spec.kind, ToolbarItemKind::Spacer);

        let spec: ToolbarItemSpec =
            serde_json::from_value(serde_json::json!({ "name": "div", "type": "separator" }))
                .unwrap();
        assert_eq!(spec.kind, ToolbarItemKind::Separator);
    }

    #[test]
    fn test_merge_appends_new_names() {
        let mut items = vec![ToolbarItemSpec::new("cut").with_rank(21)];
        merge_contribution(&mut items, vec![ToolbarItemSpec::new("insert").with_rank(20)]);
        assert_eq!(names(&items), vec!["cut", "insert"]);
    }

    #[test]
    fn test_merge_replaces_in_place_on_collision() {
        let mut items = vec![
            ToolbarItemSpec::new("cut").with_rank(21),
            ToolbarItemSpec::new("paste").with_rank(22),
        ];
        merge_contribution(&mut items, vec![ToolbarItemSpec::new("cut").with_rank(5)]);

        // the later definition wins, in the earlier slot
        assert_eq!(names(&items), vec!["cut", "paste"]);
        assert_eq!(items[0].rank, Some(5));
    }

    #[test]
    fn test_sort_by_rank_is_stable() {
        let mut items = vec![
            ToolbarItemSpec::new("a").with_rank(10),
            ToolbarItemSpec::new("b").with_rank(10),
            ToolbarItemSpec::new("c").with_rank(5),
        ];
        sort_by_rank(&mut items);
        assert_eq!(names(&items), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_unranked_items_use_default_rank() {
        let mut items = vec![
            ToolbarItemSpec::new("late").with_rank(90),
            ToolbarItemSpec::new("plain"),
            ToolbarItemSpec::new("early").with_rank(10),
        ];
        sort_by_rank(&mut items);
        // plain sits at DEFAULT_RANK (50), between the ranked items
        assert_eq!(names(&items), vec!["early", "plain", "late"]);
    }

    #[test]
    fn test_single_contribution_order() {
        // spec scenario: insert(20), spacer(100), cut(21) resolves in order
        // insert, cut, spacer
        let mut items = Vec::new();
        merge_contribution(
            &mut items,
            vec![
                ToolbarItemSpec::new("insert").with_rank(20),
                ToolbarItemSpec::new("spacer")
                    .with_kind(ToolbarItemKind::Spacer)
                    .with_rank(100),
                ToolbarItemSpec::new("cut").with_rank(21),
            ],
        );
        sort_by_rank(&mut items);

        assert_eq!(items.len(), 3);
        assert_eq!(names(&items), vec!["insert", "cut", "spacer"]);
    }
}
