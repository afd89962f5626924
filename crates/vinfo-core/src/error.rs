//! # Error Types - Structured Error Hierarchy
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - [`ValidationError`] describes why a message was rejected. It always
//!   carries the parameter path of the offending value and, where
//!   relevant, expected vs actual. Validation failures are outcomes, not
//!   faults: the caller rejects the RPC and carries on.
//! - [`SchemaError`] describes a malformed schema tree found while loading
//!   policy data.
//! - [`VinfoError`] is the top-level error for I/O-facing operations.

use std::fmt;

use thiserror::Error;

use crate::path::ParamPath;
use crate::value::ValueKind;

/// Top-level error type for vinfo.
#[derive(Error, Debug)]
pub enum VinfoError {
    /// The schema tree violates a structural invariant.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A policy or message document could not be loaded.
    #[error("policy load error for '{path}': {reason}")]
    PolicyLoad {
        /// Path of the document.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A structural defect in a vehicle data schema tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Neither `name` nor `key` is set.
    #[error("schema item at '{path}' has neither a name nor a key")]
    EmptyIdentity {
        /// Dotted path of the item.
        path: String,
    },

    /// A `Struct` item without `params`.
    #[error("struct item '{path}' has no params")]
    EmptyStruct {
        /// Dotted path of the item.
        path: String,
    },

    /// A leaf item that declares `params`.
    #[error("item '{path}' of type {item_type} declares params")]
    ParamsOnLeaf {
        /// Dotted path of the item.
        path: String,
        /// Declared type.
        item_type: String,
    },

    /// A bound that does not apply to the item's type.
    #[error("item '{path}' of type {item_type} declares '{bound}', which does not apply to it")]
    MisplacedBound {
        /// Dotted path of the item.
        path: String,
        /// Policy field name of the bound.
        bound: &'static str,
        /// Declared type.
        item_type: String,
    },

    /// A `since` tag that is not a version number.
    #[error("item '{path}' has since tag '{since}', which is not a version number")]
    InvalidSince {
        /// Dotted path of the item.
        path: String,
        /// The offending tag.
        since: String,
    },
}

/// What a [`ValidationError::RangeViolation`] measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSubject {
    ArraySize,
    StringLength,
    IntegerValue,
    FloatValue,
}

impl fmt::Display for RangeSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ArraySize => "array size",
            Self::StringLength => "string length",
            Self::IntegerValue => "integer value",
            Self::FloatValue => "float value",
        })
    }
}

/// Why a message or parameter failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A top-level parameter names no known vehicle data item.
    #[error("no schema found for parameter '{path}'")]
    SchemaNotFound {
        /// Offending parameter.
        path: ParamPath,
    },

    /// A mandatory item is null or absent.
    #[error("mandatory parameter '{path}' is missing")]
    MissingMandatory {
        /// Offending parameter.
        path: ParamPath,
    },

    /// The value variant does not match the schema type.
    #[error("type mismatch at '{path}': expected {expected}, actual {actual}")]
    TypeMismatch {
        /// Offending parameter.
        path: ParamPath,
        /// Expected type, as spelled in the schema.
        expected: String,
        /// Actual value variant.
        actual: ValueKind,
    },

    /// A size, length, or numeric value outside the schema bounds.
    #[error("{subject} {actual} at '{path}' does not fit into boundaries {bounds}")]
    RangeViolation {
        /// Offending parameter.
        path: ParamPath,
        /// What was measured.
        subject: RangeSubject,
        /// Measured value.
        actual: String,
        /// Resolved inclusive bounds, as `[min, max]`.
        bounds: String,
    },

    /// A struct value contains a parameter its schema does not declare.
    #[error("unknown parameter '{param}' in struct '{path}'")]
    UnknownParameter {
        /// Path of the struct.
        path: ParamPath,
        /// The undeclared parameter.
        param: String,
    },

    /// The enum type named by the schema is not in the registry.
    #[error("enum type '{type_name}' for '{path}' is not registered")]
    EnumResolutionFailed {
        /// Offending parameter.
        path: ParamPath,
        /// Enum type name from the schema.
        type_name: String,
    },

    /// The enum registry rejected the value.
    #[error("enum '{type_name}' rejected value at '{path}': {reason}")]
    EnumValidationFailed {
        /// Offending parameter.
        path: ParamPath,
        /// Enum type name from the schema.
        type_name: String,
        /// Registry diagnostic.
        reason: String,
    },
}

/// Fieldless classification of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SchemaNotFound,
    MissingMandatory,
    TypeMismatch,
    RangeViolation,
    UnknownParameter,
    EnumResolutionFailed,
    EnumValidationFailed,
}

impl ValidationError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SchemaNotFound { .. } => ErrorKind::SchemaNotFound,
            Self::MissingMandatory { .. } => ErrorKind::MissingMandatory,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::RangeViolation { .. } => ErrorKind::RangeViolation,
            Self::UnknownParameter { .. } => ErrorKind::UnknownParameter,
            Self::EnumResolutionFailed { .. } => ErrorKind::EnumResolutionFailed,
            Self::EnumValidationFailed { .. } => ErrorKind::EnumValidationFailed,
        }
    }

    /// Path of the offending parameter.
    pub fn path(&self) -> &ParamPath {
        match self {
            Self::SchemaNotFound { path }
            | Self::MissingMandatory { path }
            | Self::TypeMismatch { path, .. }
            | Self::RangeViolation { path, .. }
            | Self::UnknownParameter { path, .. }
            | Self::EnumResolutionFailed { path, .. }
            | Self::EnumValidationFailed { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_violation_display() {
        let err = ValidationError::RangeViolation {
            path: ParamPath::root().field("climateData").field("fanSpeed"),
            subject: RangeSubject::IntegerValue,
            actual: "150".to_string(),
            bounds: "[0, 100]".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("integer value 150"));
        assert!(display.contains("climateData.fanSpeed"));
        assert!(display.contains("[0, 100]"));
        assert_eq!(err.kind(), ErrorKind::RangeViolation);
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = ValidationError::TypeMismatch {
            path: ParamPath::root().field("speed"),
            expected: "Float".to_string(),
            actual: ValueKind::String,
        };
        assert_eq!(
            err.to_string(),
            "type mismatch at 'speed': expected Float, actual string"
        );
    }

    #[test]
    fn test_path_accessor() {
        let path = ParamPath::root().field("a").index(2);
        let err = ValidationError::MissingMandatory { path: path.clone() };
        assert_eq!(err.path(), &path);
        assert_eq!(err.kind(), ErrorKind::MissingMandatory);
    }

    #[test]
    fn test_schema_error_converts_to_top_level() {
        let err: VinfoError = SchemaError::EmptyStruct {
            path: "climateData".to_string(),
        }
        .into();
        assert!(err.to_string().contains("struct item 'climateData' has no params"));
    }
}
