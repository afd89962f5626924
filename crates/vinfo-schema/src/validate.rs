//! # Vehicle Data Validation
//!
//! Checks inbound custom vehicle data parameters against the schema tree
//! of the current policy generation.
//!
//! ## Security Invariant
//!
//! Validation is a trust boundary. Message parameters arrive from mobile
//! applications and are untrusted. Anything the schema does not describe
//! is rejected: unknown top-level parameters, undeclared struct members,
//! wrong value variants, and out-of-range values all fail closed with a
//! structured [`ValidationError`] naming the offending parameter path.
//!
//! ## Dispatch
//!
//! For a value and its schema item:
//!
//! 1. mandatory + null → `MissingMandatory`;
//! 2. array item → size bounds, then every element against the item with
//!    the array flag cleared;
//! 3. `Struct` → undeclared members, then each declared child;
//! 4. primitive → variant and bounds;
//! 5. otherwise the type names an enum, checked through the registry.
//!
//! Recursion follows the schema, not the value, so its depth is bounded
//! by the policy tree regardless of how deeply a payload nests.

use serde_json::{Map, Value};

use vinfo_core::{
    BoundValue, Bounds, EnumRegistry, ItemType, ParamPath, RangeSubject, ValidationError, ValueKind,
    VehicleDataItem,
};

use crate::index::{SchemaIndex, SearchMethod};

/// Validates message parameters against a schema generation.
///
/// `Validator` is a pure function of its inputs: it holds shared
/// references only and never mutates the schema or the value.
pub struct Validator<'a, E: ?Sized> {
    index: SchemaIndex<'a>,
    enums: &'a E,
}

impl<E: ?Sized> Clone for Validator<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: ?Sized> Copy for Validator<'_, E> {}

impl<'a, E: EnumRegistry + ?Sized> Validator<'a, E> {
    /// Create a validator over the root items of a schema generation.
    pub fn new(items: &'a [VehicleDataItem], enums: &'a E) -> Self {
        Self {
            index: SchemaIndex::new(items),
            enums,
        }
    }

    /// Validate every parameter of a message.
    ///
    /// Each top-level key is resolved by non-recursive name lookup and
    /// validated independently; key order does not affect the result.
    ///
    /// # Errors
    ///
    /// Returns `SchemaNotFound` for a key without a schema, `TypeMismatch`
    /// if `message` is not a map, or the first failure of an item.
    pub fn validate_message(&self, message: &Value) -> Result<(), ValidationError> {
        let Value::Object(params) = message else {
            return reject(ValidationError::TypeMismatch {
                path: ParamPath::root(),
                expected: "map".to_string(),
                actual: ValueKind::of(message),
            });
        };

        for (name, param) in params {
            let path = ParamPath::root().field(name);
            let Some(schema) = self.index.find_by_name(name, SearchMethod::NonRecursive) else {
                tracing::error!(param = %name, "unable to find schema for param");
                return Err(ValidationError::SchemaNotFound { path });
            };
            if let Err(e) = self.validate_at(param, schema, &path) {
                tracing::debug!(param = %name, "item validation failed");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Boolean form of [`validate_message`](Self::validate_message).
    pub fn is_valid_message(&self, message: &Value) -> bool {
        self.validate_message(message).is_ok()
    }

    /// Validate a single value against a resolved schema item.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate_item(
        &self,
        value: &Value,
        schema: &VehicleDataItem,
    ) -> Result<(), ValidationError> {
        self.validate_at(value, schema, &ParamPath::root().field(schema.label()))
    }

    /// Boolean form of [`validate_item`](Self::validate_item).
    pub fn is_valid_item(&self, value: &Value, schema: &VehicleDataItem) -> bool {
        self.validate_item(value, schema).is_ok()
    }

    fn validate_at(
        &self,
        value: &Value,
        schema: &VehicleDataItem,
        path: &ParamPath,
    ) -> Result<(), ValidationError> {
        if schema.mandatory && value.is_null() {
            return reject(ValidationError::MissingMandatory { path: path.clone() });
        }
        if schema.is_array() {
            return self.validate_array(value, schema, path);
        }
        self.validate_single(value, schema, path)
    }

    /// Validate `value` as one instance of `schema`, ignoring its array flag.
    fn validate_single(
        &self,
        value: &Value,
        schema: &VehicleDataItem,
        path: &ParamPath,
    ) -> Result<(), ValidationError> {
        match &schema.item_type {
            ItemType::Struct => self.validate_struct(value, schema, path),
            ItemType::String | ItemType::Integer | ItemType::Float | ItemType::Boolean => {
                validate_pod(value, schema, path)
            }
            ItemType::Enum(type_name) => self.validate_enum(value, type_name, path),
        }
    }

    fn validate_array(
        &self,
        value: &Value,
        schema: &VehicleDataItem,
        path: &ParamPath,
    ) -> Result<(), ValidationError> {
        // Loose wire encodings deliver some arrays as index-keyed maps.
        let elements: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            Value::Object(map) => map.values().collect(),
            other => {
                return reject(ValidationError::TypeMismatch {
                    path: path.clone(),
                    expected: format!("array of {}", schema.item_type),
                    actual: ValueKind::of(other),
                });
            }
        };

        let bounds = Bounds::<usize>::resolve(schema.minsize, schema.maxsize);
        if !bounds.contains(elements.len()) {
            return reject(ValidationError::RangeViolation {
                path: path.clone(),
                subject: RangeSubject::ArraySize,
                actual: elements.len().to_string(),
                bounds: bounds.to_string(),
            });
        }

        for (i, element) in elements.into_iter().enumerate() {
            let element_path = path.index(i);
            if schema.mandatory && element.is_null() {
                return reject(ValidationError::MissingMandatory { path: element_path });
            }
            self.validate_single(element, schema, &element_path)?;
        }
        Ok(())
    }

    fn validate_struct(
        &self,
        value: &Value,
        schema: &VehicleDataItem,
        path: &ParamPath,
    ) -> Result<(), ValidationError> {
        let Value::Object(members) = value else {
            return reject(ValidationError::TypeMismatch {
                path: path.clone(),
                expected: ItemType::Struct.to_string(),
                actual: ValueKind::of(value),
            });
        };

        check_redundant_params(members, schema, path)?;

        for child in &schema.params {
            match members.get(&child.name) {
                Some(member) => self.validate_at(member, child, &path.field(&child.name))?,
                None if child.mandatory => {
                    return reject(ValidationError::MissingMandatory {
                        path: path.field(&child.name),
                    });
                }
                None => {}
            }
        }
        Ok(())
    }

    fn validate_enum(
        &self,
        value: &Value,
        type_name: &str,
        path: &ParamPath,
    ) -> Result<(), ValidationError> {
        let Some(definition) = self.enums.lookup(type_name) else {
            return reject(ValidationError::EnumResolutionFailed {
                path: path.clone(),
                type_name: type_name.to_string(),
            });
        };

        let Some(normalized) = definition.normalize(value) else {
            return reject(ValidationError::EnumValidationFailed {
                path: path.clone(),
                type_name: type_name.to_string(),
                reason: format!("schema application failed for {value}"),
            });
        };

        definition.validate(&normalized).or_else(|reason| {
            reject(ValidationError::EnumValidationFailed {
                path: path.clone(),
                type_name: type_name.to_string(),
                reason,
            })
        })
    }
}

/// Every member of a struct value must be declared by the struct schema.
fn check_redundant_params(
    members: &Map<String, Value>,
    schema: &VehicleDataItem,
    path: &ParamPath,
) -> Result<(), ValidationError> {
    let scope = SchemaIndex::new(&schema.params);
    for param in members.keys() {
        let declared = scope
            .find_by_name(param, SearchMethod::NonRecursive)
            .or_else(|| scope.find_by_name(param, SearchMethod::Recursive));
        if declared.is_none() {
            return reject(ValidationError::UnknownParameter {
                path: path.clone(),
                param: param.clone(),
            });
        }
    }
    Ok(())
}

fn validate_pod(
    value: &Value,
    schema: &VehicleDataItem,
    path: &ParamPath,
) -> Result<(), ValidationError> {
    let kind = ValueKind::of(value);
    let mismatch = || {
        reject(ValidationError::TypeMismatch {
            path: path.clone(),
            expected: schema.item_type.to_string(),
            actual: kind,
        })
    };

    match &schema.item_type {
        ItemType::String => {
            let Value::String(s) = value else {
                return mismatch();
            };
            let length = s.chars().count();
            let bounds = Bounds::<usize>::resolve(schema.minlength, schema.maxlength);
            check_range(bounds, length, RangeSubject::StringLength, path)
        }
        ItemType::Integer => {
            if !kind.is_integral() {
                return mismatch();
            }
            let bounds =
                Bounds::<i64>::from_numbers(schema.minvalue.as_ref(), schema.maxvalue.as_ref());
            match value.as_i64() {
                Some(v) => check_range(bounds, v, RangeSubject::IntegerValue, path),
                // Unsigned beyond i64::MAX: above any representable maximum.
                None => reject(ValidationError::RangeViolation {
                    path: path.clone(),
                    subject: RangeSubject::IntegerValue,
                    actual: value.to_string(),
                    bounds: bounds.to_string(),
                }),
            }
        }
        ItemType::Float => {
            let Some(v) = value.as_f64() else {
                return mismatch();
            };
            let bounds =
                Bounds::<f64>::from_numbers(schema.minvalue.as_ref(), schema.maxvalue.as_ref());
            check_range(bounds, v, RangeSubject::FloatValue, path)
        }
        ItemType::Boolean => {
            if value.is_boolean() {
                Ok(())
            } else {
                mismatch()
            }
        }
        ItemType::Struct | ItemType::Enum(_) => mismatch(),
    }
}

fn check_range<T: BoundValue>(
    bounds: Bounds<T>,
    actual: T,
    subject: RangeSubject,
    path: &ParamPath,
) -> Result<(), ValidationError> {
    if bounds.contains(actual) {
        return Ok(());
    }
    reject(ValidationError::RangeViolation {
        path: path.clone(),
        subject,
        actual: actual.to_string(),
        bounds: bounds.to_string(),
    })
}

/// Log a validation failure at its origin and return it.
fn reject(error: ValidationError) -> Result<(), ValidationError> {
    tracing::warn!(path = %error.path(), kind = ?error.kind(), "{error}");
    Err(error)
}
