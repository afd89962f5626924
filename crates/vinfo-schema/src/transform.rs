//! # Parameter Transformation
//!
//! Reshapes vehicle data parameters between the two sides of the link:
//!
//! - the **app-facing** (canonical) form, keyed by item `name`;
//! - the **head-unit-facing** form, keyed by item `key`.
//!
//! The schema is used purely as a renaming and nesting guide. Nothing is
//! re-validated here and nothing fails: unknown identifiers are dropped or
//! skipped, and an unknown type query echoes the name back.
//!
//! Base-spec vehicle data (`speed`, `gps`, …) uses the same identifier on
//! both sides and passes through untouched. Only OEM custom items are
//! renamed. Inside a struct, lookups are scoped to that struct's `params`,
//! since names and keys are only unique among siblings.

use serde_json::{Map, Value};

use vinfo_core::{BaseSpecNames, VehicleDataItem};

use crate::index::{SchemaIndex, SearchMethod};

/// Which side a renaming pass produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Head-unit keys to app names.
    ToMobile,
    /// App names to head-unit keys.
    ToHeadUnit,
}

impl Direction {
    fn lookup<'a>(
        self,
        scope: &SchemaIndex<'a>,
        ident: &str,
        method: SearchMethod,
    ) -> Option<&'a VehicleDataItem> {
        match self {
            Self::ToMobile => scope.find_by_key(ident, method),
            Self::ToHeadUnit => scope.find_by_name(ident, method),
        }
    }

    fn target(self, item: &VehicleDataItem) -> &str {
        match self {
            Self::ToMobile => &item.name,
            Self::ToHeadUnit => &item.key,
        }
    }

    fn is_base_spec<N: BaseSpecNames + ?Sized>(self, base_spec: &N, ident: &str) -> bool {
        match self {
            Self::ToMobile => base_spec.contains_key(ident),
            Self::ToHeadUnit => base_spec.contains_name(ident),
        }
    }
}

/// Converts parameter maps between app-facing and head-unit-facing form.
pub struct Transformer<'a, N: ?Sized> {
    index: SchemaIndex<'a>,
    base_spec: &'a N,
}

impl<N: ?Sized> Clone for Transformer<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: ?Sized> Copy for Transformer<'_, N> {}

impl<'a, N: BaseSpecNames + ?Sized> Transformer<'a, N> {
    /// Create a transformer over the root items of a schema generation.
    pub fn new(items: &'a [VehicleDataItem], base_spec: &'a N) -> Self {
        Self {
            index: SchemaIndex::new(items),
            base_spec,
        }
    }

    /// Convert head-unit parameters to the app-facing form.
    ///
    /// Base-spec keys are copied unchanged. Custom keys are resolved by
    /// key and re-emitted under the item name, recursing into structs.
    /// Custom keys without a schema are dropped.
    pub fn canonicalize(&self, message: &Map<String, Value>) -> Map<String, Value> {
        self.convert(message, Direction::ToMobile)
    }

    /// Convert app-facing parameters to the head-unit form.
    ///
    /// The inverse of [`canonicalize`](Self::canonicalize): custom names
    /// are re-emitted under the item key.
    pub fn to_head_unit(&self, message: &Map<String, Value>) -> Map<String, Value> {
        self.convert(message, Direction::ToHeadUnit)
    }

    /// Build the head-unit presence map for the requested item names.
    ///
    /// A leaf item contributes `{key: true}`; a struct contributes
    /// `{key: {child_key: ...}}` covering every child. Unknown names are
    /// skipped.
    pub fn build_presence_map<I, S>(&self, item_names: I) -> Map<String, Value>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Map::new();
        for name in item_names {
            let name = name.as_ref();
            match self.index.find_by_name(name, SearchMethod::NonRecursive) {
                Some(schema) => {
                    out.insert(schema.key.clone(), presence_of(schema));
                }
                None => tracing::debug!(name, "no schema for requested item, skipping"),
            }
        }
        out
    }

    /// Type of the named item, or the name itself if unknown.
    pub fn item_type(&self, name: &str) -> String {
        self.index
            .find_by_name(name, SearchMethod::NonRecursive)
            .map(|schema| schema.item_type.to_string())
            .unwrap_or_else(|| name.to_string())
    }

    /// Returns `true` for a base-spec name or a known custom item name.
    pub fn is_known_name(&self, name: &str) -> bool {
        self.base_spec.contains_name(name)
            || self.index.find_by_name(name, SearchMethod::NonRecursive).is_some()
    }

    /// Returns `true` for a known custom item key.
    pub fn is_known_key(&self, key: &str) -> bool {
        self.index.find_by_key(key, SearchMethod::NonRecursive).is_some()
    }

    fn convert(&self, message: &Map<String, Value>, direction: Direction) -> Map<String, Value> {
        let mut out = Map::new();
        let mut custom = Vec::new();
        for (ident, value) in message {
            if direction.is_base_spec(self.base_spec, ident) {
                out.insert(ident.clone(), value.clone());
            } else {
                custom.push((ident, value));
            }
        }

        let renamed = rename(custom, self.index, SearchMethod::NonRecursive, direction);
        out.extend(renamed);
        out
    }
}

/// Rename every entry found in `scope`; entries without a schema are dropped.
fn rename<'v, I>(
    entries: I,
    scope: SchemaIndex<'_>,
    method: SearchMethod,
    direction: Direction,
) -> Map<String, Value>
where
    I: IntoIterator<Item = (&'v String, &'v Value)>,
{
    let mut out = Map::new();
    for (ident, value) in entries {
        let Some(schema) = direction.lookup(&scope, ident, method) else {
            tracing::debug!(ident = %ident, ?direction, "schema cannot be found, dropping");
            continue;
        };
        let converted = if schema.is_struct() {
            rename_struct_value(value, schema, direction)
        } else {
            value.clone()
        };
        out.insert(direction.target(schema).to_string(), converted);
    }
    out
}

/// Rename the members of a struct value, or of each struct in an array.
///
/// A map whose renaming comes out empty is kept as-is, as is any value
/// that is not a map.
fn rename_struct_value(value: &Value, schema: &VehicleDataItem, direction: Direction) -> Value {
    let scope = SchemaIndex::new(&schema.params);
    let rename_members = |raw: &Value, members: &Map<String, Value>| {
        let renamed = rename(members, scope, SearchMethod::Recursive, direction);
        if renamed.is_empty() {
            raw.clone()
        } else {
            Value::Object(renamed)
        }
    };

    match value {
        Value::Object(members) => rename_members(value, members),
        Value::Array(elements) if schema.is_array() => Value::Array(
            elements
                .iter()
                .map(|element| match element {
                    Value::Object(members) => rename_members(element, members),
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Presence entry for one item: `true` for a leaf, nested map for a struct.
fn presence_of(item: &VehicleDataItem) -> Value {
    if !item.is_struct() {
        return Value::Bool(true);
    }
    let nested: Map<String, Value> = item
        .params
        .iter()
        .map(|child| (child.key.clone(), presence_of(child)))
        .collect();
    Value::Object(nested)
}
