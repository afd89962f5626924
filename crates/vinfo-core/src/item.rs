//! # Vehicle Data Item Schema
//!
//! Defines [`VehicleDataItem`], one node of the OEM vehicle-data schema
//! tree delivered through policy data, and [`ItemType`], its closed type
//! taxonomy.
//!
//! ## Invariants
//!
//! - A node is either a leaf (primitive or enum reference) or a struct
//!   with non-empty `params`.
//! - `name` and `key` are never both empty.
//! - Bounds only apply to their matching type: sizes to arrays, lengths to
//!   strings, values to numbers.
//!
//! [`VehicleDataItem::check`] enforces these at load time. The tree is
//! immutable afterwards; a policy reload replaces it wholesale.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::SchemaError;

/// Type of a vehicle data item.
///
/// The policy format carries the type as a string. The five primitive and
/// struct spellings map to dedicated variants; any other string names an
/// enum defined by the base RPC specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemType {
    /// UTF-8 string with optional length bounds.
    String,
    /// Signed 64-bit integer with optional value bounds.
    Integer,
    /// Double with optional value bounds.
    Float,
    /// Boolean.
    Boolean,
    /// Nested structure described by `params`.
    Struct,
    /// Reference to a base-spec enum type, by name.
    Enum(String),
}

impl ItemType {
    /// Returns the policy spelling of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::Struct => "Struct",
            Self::Enum(name) => name,
        }
    }

    /// Returns `true` for `String`, `Integer`, `Float`, and `Boolean`.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::String | Self::Integer | Self::Float | Self::Boolean
        )
    }

    /// Returns `true` for the numeric primitives.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl From<String> for ItemType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "String" => Self::String,
            "Integer" => Self::Integer,
            "Float" => Self::Float,
            "Boolean" => Self::Boolean,
            "Struct" => Self::Struct,
            _ => Self::Enum(s),
        }
    }
}

impl From<&str> for ItemType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ItemType> for String {
    fn from(t: ItemType) -> Self {
        match t {
            ItemType::Enum(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the vehicle data schema tree.
///
/// Field names follow the policy table's `vehicle_data.schema_items`
/// representation so a policy document deserializes directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDataItem {
    /// App-facing identifier.
    #[serde(default)]
    pub name: String,
    /// Head-unit-facing identifier.
    #[serde(default)]
    pub key: String,
    /// Item type.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Whether the item must be present in a validated value.
    #[serde(default)]
    pub mandatory: bool,
    /// When `Some(true)`, the value is a sequence of elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array: Option<bool>,
    /// Child items of a struct, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<VehicleDataItem>,
    /// Revision that introduced this definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// Revision that retired this definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Lower numeric bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minvalue: Option<Number>,
    /// Upper numeric bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxvalue: Option<Number>,
    /// Minimum array length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minsize: Option<usize>,
    /// Maximum array length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxsize: Option<usize>,
    /// Minimum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minlength: Option<usize>,
    /// Maximum string length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxlength: Option<usize>,
}

impl VehicleDataItem {
    /// Create an item with no bounds, not mandatory, not an array.
    pub fn new(name: impl Into<String>, key: impl Into<String>, item_type: impl Into<ItemType>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            item_type: item_type.into(),
            mandatory: false,
            array: None,
            params: Vec::new(),
            since: None,
            until: None,
            removed: None,
            deprecated: None,
            minvalue: None,
            maxvalue: None,
            minsize: None,
            maxsize: None,
            minlength: None,
            maxlength: None,
        }
    }

    /// Create a struct item with the given children.
    pub fn new_struct(
        name: impl Into<String>,
        key: impl Into<String>,
        params: Vec<VehicleDataItem>,
    ) -> Self {
        Self {
            params,
            ..Self::new(name, key, ItemType::Struct)
        }
    }

    /// Builder: mark the item mandatory.
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Builder: mark the item as an array with optional size bounds.
    pub fn array_of(mut self, minsize: Option<usize>, maxsize: Option<usize>) -> Self {
        self.array = Some(true);
        self.minsize = minsize;
        self.maxsize = maxsize;
        self
    }

    /// Builder: set the `since` tag.
    pub fn since(mut self, since: impl Into<String>) -> Self {
        self.since = Some(since.into());
        self
    }

    /// Builder: set numeric value bounds.
    pub fn value_range(mut self, min: Option<Number>, max: Option<Number>) -> Self {
        self.minvalue = min;
        self.maxvalue = max;
        self
    }

    /// Builder: set string length bounds.
    pub fn length_range(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.minlength = min;
        self.maxlength = max;
        self
    }

    /// Returns `true` when the value must be a sequence.
    pub fn is_array(&self) -> bool {
        self.array == Some(true)
    }

    /// Returns `true` for struct items.
    pub fn is_struct(&self) -> bool {
        self.item_type == ItemType::Struct
    }

    /// Parses the `since` tag as a version number.
    ///
    /// Returns `None` when the tag is absent or not numeric; such items
    /// rank below every item with a numeric tag during resolution.
    pub fn since_version(&self) -> Option<f64> {
        self.since
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// Identifier used in diagnostics: the name, or the key if the name
    /// is empty.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.key
        } else {
            &self.name
        }
    }

    /// Verify the structural invariants of this item and all descendants.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found in depth-first order.
    pub fn check(&self) -> Result<(), SchemaError> {
        self.check_at("")
    }

    fn check_at(&self, parent: &str) -> Result<(), SchemaError> {
        let path = if parent.is_empty() {
            self.label().to_string()
        } else {
            format!("{parent}.{}", self.label())
        };

        if self.name.is_empty() && self.key.is_empty() {
            return Err(SchemaError::EmptyIdentity { path });
        }
        if let Some(since) = &self.since {
            if self.since_version().is_none() {
                return Err(SchemaError::InvalidSince {
                    path,
                    since: since.clone(),
                });
            }
        }

        match &self.item_type {
            ItemType::Struct if self.params.is_empty() => {
                return Err(SchemaError::EmptyStruct { path });
            }
            ItemType::Struct => {}
            other if !self.params.is_empty() => {
                return Err(SchemaError::ParamsOnLeaf {
                    path,
                    item_type: other.to_string(),
                });
            }
            _ => {}
        }

        let misplaced = |bound: &'static str| SchemaError::MisplacedBound {
            path: path.clone(),
            bound,
            item_type: self.item_type.to_string(),
        };
        if !self.is_array() {
            if self.minsize.is_some() {
                return Err(misplaced("minsize"));
            }
            if self.maxsize.is_some() {
                return Err(misplaced("maxsize"));
            }
        }
        if self.item_type != ItemType::String {
            if self.minlength.is_some() {
                return Err(misplaced("minlength"));
            }
            if self.maxlength.is_some() {
                return Err(misplaced("maxlength"));
            }
        }
        if !self.item_type.is_numeric() {
            if self.minvalue.is_some() {
                return Err(misplaced("minvalue"));
            }
            if self.maxvalue.is_some() {
                return Err(misplaced("maxvalue"));
            }
        }

        for child in &self.params {
            child.check_at(&path)?;
        }
        Ok(())
    }
}
