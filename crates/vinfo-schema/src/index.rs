//! # Schema Index
//!
//! Resolves a name or key to the best-matching [`VehicleDataItem`] in a
//! schema tree.
//!
//! ## Resolution Rule
//!
//! The same name or key may legitimately appear several times, once per
//! schema revision that (re)defined it. All matches are collected, then:
//!
//! 1. the item with the numerically largest `since` wins;
//! 2. items without a numeric `since` rank below every item with one;
//! 3. remaining ties go to the first match in depth-first discovery order.
//!
//! Absence is a normal outcome ("unknown signal"), never an error.

use vinfo_core::VehicleDataItem;

/// How far a lookup descends into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMethod {
    /// Only the indexed items themselves.
    NonRecursive,
    /// The indexed items and every struct's `params`, at any depth.
    Recursive,
}

/// Read-only lookup over a slice of schema items.
///
/// The index borrows its items, so the same type serves both the root list
/// of a schema generation and the `params` of a single struct.
#[derive(Debug, Clone, Copy)]
pub struct SchemaIndex<'a> {
    items: &'a [VehicleDataItem],
}

impl<'a> SchemaIndex<'a> {
    /// Index the given items.
    pub fn new(items: &'a [VehicleDataItem]) -> Self {
        Self { items }
    }

    /// The indexed items.
    pub fn items(&self) -> &'a [VehicleDataItem] {
        self.items
    }

    /// Resolve an app-facing name.
    pub fn find_by_name(&self, name: &str, method: SearchMethod) -> Option<&'a VehicleDataItem> {
        let found = self.find(method, |item| item.name == name);
        tracing::trace!(name, ?method, found = found.is_some(), "schema lookup by name");
        found
    }

    /// Resolve a head-unit-facing key.
    pub fn find_by_key(&self, key: &str, method: SearchMethod) -> Option<&'a VehicleDataItem> {
        let found = self.find(method, |item| item.key == key);
        tracing::trace!(key, ?method, found = found.is_some(), "schema lookup by key");
        found
    }

    /// Resolve the best item matching `predicate`.
    pub fn find<F>(&self, method: SearchMethod, predicate: F) -> Option<&'a VehicleDataItem>
    where
        F: Fn(&VehicleDataItem) -> bool,
    {
        select_latest(self.matches(method, predicate))
    }

    /// All items matching `predicate`, in depth-first discovery order.
    pub fn matches<F>(&self, method: SearchMethod, predicate: F) -> Vec<&'a VehicleDataItem>
    where
        F: Fn(&VehicleDataItem) -> bool,
    {
        let mut found = Vec::new();
        collect(self.items, method, &predicate, &mut found);
        found
    }
}

fn collect<'a, F>(
    items: &'a [VehicleDataItem],
    method: SearchMethod,
    predicate: &F,
    out: &mut Vec<&'a VehicleDataItem>,
) where
    F: Fn(&VehicleDataItem) -> bool,
{
    for item in items {
        if predicate(item) {
            out.push(item);
        }
        if method == SearchMethod::Recursive && item.is_struct() {
            collect(&item.params, method, predicate, out);
        }
    }
}

/// Pick the match with the highest `since`; the first one wins a tie.
fn select_latest<'a>(matches: Vec<&'a VehicleDataItem>) -> Option<&'a VehicleDataItem> {
    let mut best: Option<(&'a VehicleDataItem, Option<f64>)> = None;
    for candidate in matches {
        let version = candidate.since_version();
        best = match best {
            Some((current, current_version)) if !outranks(version, current_version) => {
                Some((current, current_version))
            }
            _ => Some((candidate, version)),
        };
    }
    best.map(|(item, _)| item)
}

fn outranks(candidate: Option<f64>, current: Option<f64>) -> bool {
    match (candidate, current) {
        (Some(c), Some(b)) => c > b,
        (Some(_), None) => true,
        (None, _) => false,
    }
}
