//! Path-keyed type hints and the record of every resolution made during a run.
//!
//! A [`TypeContext`] is a path of names (function → parameter, class → member,
//! or synthetic slots like `@return`) plus two shared tables: the read-only
//! hints and the record accumulator. Descending never mutates; resolving
//! writes the answer (or its absence) into the records the first time a path
//! is seen.
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};

use crate::ast::{AnyNode, Identifier, Node};

/// Synthetic path segments for slots that have no identifier of their own.
pub const RETURN_SEGMENT: &str = "@return";
pub const GENERIC_SEGMENT: &str = "@generic";
pub const PREFIX_SEGMENT: &str = "@prefix";
pub const INITIALIZER_SEGMENT: &str = "init";

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// One entry of a hint or record tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeHint {
    /// explicit "no type"
    Unknown,
    /// rendered as `true` / `false`
    Flag(bool),
    Name(String),
    Table(BTreeMap<String, TypeHint>),
}

/// Read-only hint table, loaded before generation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeHints(BTreeMap<String, TypeHint>);

/// Accumulator with the same shape as [`TypeHints`]; first write per path wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRecords(BTreeMap<String, TypeHint>);

#[derive(Clone)]
pub struct TypeContext<'a> {
    path: Vec<String>,
    hints: &'a TypeHints,
    records: &'a RefCell<TypeRecords>,
}

/// What a context can descend by.
#[derive(Clone, Copy)]
pub enum Step<'n> {
    Node(&'n Node),
    Name(&'n str),
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl TypeHint {
    fn leaf_text(&self) -> Option<String> {
        match self {
            Self::Name(name) => Some(name.clone()),
            Self::Flag(flag) => Some(flag.to_string()),
            Self::Unknown | Self::Table(_) => None,
        }
    }
}

/// Walk `path` through `table`; a leaf met on the way answers for the whole path.
fn lookup<'t>(table: &'t BTreeMap<String, TypeHint>, path: &[String]) -> Option<&'t TypeHint> {
    let (first, rest) = path.split_first()?;
    match table.get(first)? {
        TypeHint::Table(nested) => lookup(nested, rest),
        TypeHint::Unknown => None,
        leaf => Some(leaf),
    }
}

impl TypeHints {
    pub fn new(table: BTreeMap<String, TypeHint>) -> Self {
        Self(table)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lookup(&self, path: &[String]) -> Option<&TypeHint> {
        lookup(&self.0, path)
    }
}

impl TypeRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &BTreeMap<String, TypeHint> {
        &self.0
    }

    /// Store `hint` at `path` unless something is already there.
    /// Returns whether the tree changed.
    pub fn record(&mut self, path: &[String], hint: TypeHint) -> bool {
        record(&mut self.0, path, hint)
    }

    /// Fold `other` in; entries already present here win.
    pub fn merge(&mut self, other: TypeRecords) {
        merge(&mut self.0, other.0);
    }

    /// The records as the next run's hints.
    pub fn into_hints(self) -> TypeHints {
        TypeHints(self.0)
    }
}

fn record(table: &mut BTreeMap<String, TypeHint>, path: &[String], hint: TypeHint) -> bool {
    let Some((first, rest)) = path.split_first() else { return false };
    if rest.is_empty() {
        return match table.entry(first.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(hint);
                true
            }
            Entry::Occupied(_) => false,
        };
    }
    let slot = table.entry(first.clone()).or_insert(TypeHint::Unknown);
    if matches!(slot, TypeHint::Unknown) {
        *slot = TypeHint::Table(BTreeMap::new());
    }
    match slot {
        TypeHint::Table(nested) => record(nested, rest, hint),
        leaf => {
            log::debug!("`{first}` already recorded as {leaf:?}; not descending");
            false
        }
    }
}

fn merge(into: &mut BTreeMap<String, TypeHint>, from: BTreeMap<String, TypeHint>) {
    for (key, incoming) in from {
        match into.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                TypeHint::Table(existing) => {
                    if let TypeHint::Table(incoming) = incoming {
                        merge(existing, incoming);
                    }
                }
                existing => {
                    if matches!(existing, TypeHint::Unknown) && matches!(incoming, TypeHint::Table(_)) {
                        *existing = incoming;
                    }
                }
            },
        }
    }
}

impl<'n> From<&'n Node> for Step<'n> {
    fn from(node: &'n Node) -> Self { Step::Node(node) }
}

impl<'n> From<&'n AnyNode> for Step<'n> {
    fn from(node: &'n AnyNode) -> Self { Step::Node(node.node()) }
}

impl<'n> From<&'n Identifier> for Step<'n> {
    fn from(identifier: &'n Identifier) -> Self { Step::Name(&identifier.name) }
}

impl<'n> From<&'n str> for Step<'n> {
    fn from(name: &'n str) -> Self { Step::Name(name) }
}

impl<'a> TypeContext<'a> {
    pub fn root(hints: &'a TypeHints, records: &'a RefCell<TypeRecords>) -> Self {
        Self { path: Vec::new(), hints, records }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Human-readable path for comments, e.g. `BinarySearch.js, search, lo`.
    pub fn path_text(&self) -> String {
        self.path.join(", ")
    }

    /// Extend the path by a name, or by the identifier a node carries.
    /// Nodes that name nothing leave the path as it is.
    pub fn descend<'n>(&self, by: impl Into<Step<'n>>) -> Self {
        let name = match by.into() {
            Step::Name(name) => name,
            Step::Node(node) => match node.identifier_name() {
                Some(name) => name,
                None => return self.clone(),
            },
        };
        let mut path = self.path.clone();
        path.push(name.to_string());
        Self { path, hints: self.hints, records: self.records }
    }

    /// Look the current path up in the hints and note the outcome in the records.
    pub fn resolve(&self) -> Option<String> {
        if self.path.is_empty() {
            return None;
        }
        let found = self.hints.lookup(&self.path);
        let recorded = found.cloned().unwrap_or(TypeHint::Unknown);
        if self.records.borrow_mut().record(&self.path, recorded) {
            log::debug!("resolved [{}] to {found:?}", self.path_text());
        }
        found.and_then(TypeHint::leaf_text)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hints(value: serde_json::Value) -> TypeHints {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn nested_paths_resolve_through_tables() {
        let hints = hints(json!({"f": {"x": "Int", "@return": "String"}}));
        let records = RefCell::new(TypeRecords::new());
        let f = TypeContext::root(&hints, &records).descend("f");
        assert_eq!(f.descend("x").resolve().as_deref(), Some("Int"));
        assert_eq!(f.descend(RETURN_SEGMENT).resolve().as_deref(), Some("String"));
        assert_eq!(f.descend("y").resolve(), None);
    }

    #[test]
    fn leaves_answer_for_longer_paths_and_flags_render_as_text() {
        let hints = hints(json!({"f": "Double", "g": {"@prefix": true}}));
        let records = RefCell::new(TypeRecords::new());
        let root = TypeContext::root(&hints, &records);
        assert_eq!(root.descend("f").descend("x").resolve().as_deref(), Some("Double"));
        assert_eq!(root.descend("g").descend(PREFIX_SEGMENT).resolve().as_deref(), Some("true"));
        let records = records.into_inner();
        assert_eq!(records.table()["g"], TypeHint::Table(BTreeMap::from([(
            String::from("@prefix"),
            TypeHint::Flag(true),
        )])));
    }

    #[test]
    fn empty_paths_never_resolve_or_record() {
        let hints = hints(json!({"": "Int"}));
        let records = RefCell::new(TypeRecords::new());
        assert_eq!(TypeContext::root(&hints, &records).resolve(), None);
        assert!(records.borrow().table().is_empty());
    }

    #[test]
    fn non_identifier_nodes_do_not_extend_the_path() {
        let hints = TypeHints::default();
        let records = RefCell::new(TypeRecords::new());
        let root = TypeContext::root(&hints, &records).descend("f");
        let this = crate::decode::decode_node(&json!({"type": "ThisExpression"})).unwrap();
        let id = crate::decode::decode_node(&json!({"type": "Identifier", "name": "x"})).unwrap();
        assert_eq!(root.descend(&this).path(), ["f"]);
        assert_eq!(root.descend(&id).path(), ["f", "x"]);
        assert_eq!(root.path(), ["f"]);
    }

    #[test]
    fn repeated_resolution_records_once() {
        let hints = hints(json!({"f": {"x": "Int"}}));
        let records = RefCell::new(TypeRecords::new());
        let x = TypeContext::root(&hints, &records).descend("f").descend("x");

        let first = x.resolve();
        let after_first = records.borrow().clone();
        let second = x.resolve();

        assert_eq!(first, second);
        assert_eq!(*records.borrow(), after_first);
        assert_eq!(
            serde_json::to_value(&*records.borrow()).unwrap(),
            json!({"f": {"x": "Int"}})
        );
    }

    #[test]
    fn first_write_wins_over_later_answers() {
        let mut records = TypeRecords::new();
        let path = [String::from("f"), String::from("x")];
        assert!(records.record(&path, TypeHint::Name("Int".into())));
        assert!(!records.record(&path, TypeHint::Name("String".into())));
        assert!(!records.record(&path, TypeHint::Unknown));
        assert_eq!(serde_json::to_value(&records).unwrap(), json!({"f": {"x": "Int"}}));
    }

    #[test]
    fn misses_are_recorded_as_null_and_can_grow_into_tables() {
        let mut records = TypeRecords::new();
        records.record(&[String::from("f")], TypeHint::Unknown);
        assert_eq!(serde_json::to_value(&records).unwrap(), json!({"f": null}));

        records.record(&[String::from("f"), String::from("x")], TypeHint::Unknown);
        assert_eq!(serde_json::to_value(&records).unwrap(), json!({"f": {"x": null}}));

        // a leaf stays a leaf
        records.record(&[String::from("g")], TypeHint::Name("Int".into()));
        assert!(!records.record(&[String::from("g"), String::from("y")], TypeHint::Unknown));
        assert_eq!(serde_json::to_value(&records).unwrap(), json!({"f": {"x": null}, "g": "Int"}));
    }

    #[test]
    fn merging_keeps_existing_entries() {
        let mut left: TypeRecords = serde_json::from_value(json!({"a.js": {"f": {"x": "Int"}}, "shared": null})).unwrap();
        let right: TypeRecords = serde_json::from_value(json!({
            "a.js": {"f": {"x": "String", "y": "Bool"}},
            "b.js": {"g": null},
            "shared": {"z": "Int"},
        }))
        .unwrap();
        left.merge(right);
        assert_eq!(
            serde_json::to_value(&left).unwrap(),
            json!({
                "a.js": {"f": {"x": "Int", "y": "Bool"}},
                "b.js": {"g": null},
                "shared": {"z": "Int"},
            })
        );
    }

    #[test]
    fn malformed_hint_entries_fail_to_load() {
        assert!(serde_json::from_value::<TypeHints>(json!({"f": 3})).is_err());
        assert!(serde_json::from_value::<TypeHints>(json!({"f": ["Int"]})).is_err());
        assert!(serde_json::from_value::<TypeHints>(json!({"f": {"x": null}})).is_ok());
    }
}
