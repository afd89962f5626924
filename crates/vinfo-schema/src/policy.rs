//! # Policy Loading
//!
//! Reads the custom vehicle data section of a policy document and turns
//! it into a checked list of root schema items.
//!
//! Documents are JSON (`.json`) or YAML (`.yaml`, `.yml`); any other
//! extension is tried as JSON. The vehicle data section may appear in any
//! of these shapes:
//!
//! ```text
//! [ {item}, ... ]
//! { "schema_items": [ ... ] }
//! { "vehicle_data": { "schema_version": "...", "schema_items": [ ... ] } }
//! { "policy_table": { "vehicle_data": { ... } } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vinfo_core::{EnumCatalog, VehicleDataItem, VinfoError};

/// The `vehicle_data` section of a policy table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyVehicleData {
    /// Version tag of the custom vehicle data schema, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Root items, in declaration order.
    pub schema_items: Vec<VehicleDataItem>,
}

impl PolicyVehicleData {
    /// Extract and check the vehicle data section of a parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`VinfoError::Serialization`] if no supported shape matches
    /// or the items do not deserialize, and [`VinfoError::Schema`] if an
    /// item is structurally invalid.
    pub fn from_document(document: Value) -> Result<Self, VinfoError> {
        let section = match document {
            Value::Array(_) => {
                let schema_items = serde_json::from_value(document)?;
                Self {
                    schema_version: None,
                    schema_items,
                }
            }
            Value::Object(mut root) => {
                if let Some(Value::Object(mut table)) = root.remove("policy_table") {
                    let vehicle_data = table.remove("vehicle_data").unwrap_or(Value::Null);
                    serde_json::from_value(vehicle_data)?
                } else if let Some(vehicle_data) = root.remove("vehicle_data") {
                    serde_json::from_value(vehicle_data)?
                } else {
                    serde_json::from_value(Value::Object(root))?
                }
            }
            other => serde_json::from_value(other)?,
        };

        for item in &section.schema_items {
            item.check()?;
        }
        tracing::debug!(
            schema_version = section.schema_version.as_deref().unwrap_or("-"),
            items = section.schema_items.len(),
            "parsed vehicle data section"
        );
        Ok(section)
    }
}

/// Load the vehicle data section from a policy file.
///
/// # Errors
///
/// Returns [`VinfoError::PolicyLoad`] if the file cannot be read or
/// parsed, and the errors of [`PolicyVehicleData::from_document`] for a
/// parsed document without a valid vehicle data section.
pub fn load_policy_file(path: &Path) -> Result<PolicyVehicleData, VinfoError> {
    let document = load_document(path)?;
    PolicyVehicleData::from_document(document).map_err(|e| match e {
        VinfoError::Serialization(e) => VinfoError::PolicyLoad {
            path: path.display().to_string(),
            reason: format!("no vehicle data section: {e}"),
        },
        other => other,
    })
}

/// Load a message parameter document.
///
/// # Errors
///
/// Returns [`VinfoError::PolicyLoad`] if the file cannot be read or
/// parsed.
pub fn load_message_file(path: &Path) -> Result<Value, VinfoError> {
    load_document(path)
}

/// Load an enum catalog of the form `{"TypeName": ["SYM_A", "SYM_B"]}`.
///
/// # Errors
///
/// Returns [`VinfoError::PolicyLoad`] if the file cannot be read, parsed,
/// or is not a catalog.
pub fn load_enum_catalog(path: &Path) -> Result<EnumCatalog, VinfoError> {
    let document = load_document(path)?;
    serde_json::from_value(document).map_err(|e| VinfoError::PolicyLoad {
        path: path.display().to_string(),
        reason: format!("not an enum catalog: {e}"),
    })
}

/// Read a JSON or YAML document, chosen by file extension.
///
/// # Errors
///
/// Returns [`VinfoError::PolicyLoad`] on read or parse failure.
pub fn load_document(path: &Path) -> Result<Value, VinfoError> {
    let load_error = |reason: String| VinfoError::PolicyLoad {
        path: path.display().to_string(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| load_error(format!("YAML parse error: {e}")))
    } else {
        serde_json::from_str(&content).map_err(|e| load_error(format!("JSON parse error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vinfo_core::{ItemType, SchemaError};

    fn climate_items() -> Value {
        json!([
            {
                "name": "climateData",
                "key": "OEM_REF_CLIMATE",
                "type": "Struct",
                "since": "6.0",
                "params": [
                    {"name": "fanSpeed", "key": "OEM_REF_FAN", "type": "Integer",
                     "mandatory": true, "minvalue": 0, "maxvalue": 100}
                ]
            },
            {"name": "washerFluid", "key": "OEM_REF_WASHER", "type": "Integer"}
        ])
    }

    #[test]
    fn test_bare_array() {
        let section = PolicyVehicleData::from_document(climate_items()).unwrap();
        assert_eq!(section.schema_version, None);
        assert_eq!(section.schema_items.len(), 2);
        assert_eq!(section.schema_items[0].item_type, ItemType::Struct);
    }

    #[test]
    fn test_schema_items_object() {
        let section =
            PolicyVehicleData::from_document(json!({"schema_items": climate_items()})).unwrap();
        assert_eq!(section.schema_items.len(), 2);
    }

    #[test]
    fn test_vehicle_data_section() {
        let section = PolicyVehicleData::from_document(json!({
            "vehicle_data": {"schema_version": "00.00.01", "schema_items": climate_items()}
        }))
        .unwrap();
        assert_eq!(section.schema_version.as_deref(), Some("00.00.01"));
        assert_eq!(section.schema_items[1].key, "OEM_REF_WASHER");
    }

    #[test]
    fn test_full_policy_table() {
        let section = PolicyVehicleData::from_document(json!({
            "policy_table": {
                "module_config": {"preloaded_pt": true},
                "vehicle_data": {"schema_version": "1.2", "schema_items": climate_items()}
            }
        }))
        .unwrap();
        assert_eq!(section.schema_version.as_deref(), Some("1.2"));
        assert_eq!(section.schema_items.len(), 2);
    }

    #[test]
    fn test_structural_defect_is_rejected() {
        let err = PolicyVehicleData::from_document(json!([
            {"name": "empty", "key": "EMPTY", "type": "Struct"}
        ]))
        .unwrap_err();
        assert!(matches!(err, VinfoError::Schema(SchemaError::EmptyStruct { .. })));
    }

    #[test]
    fn test_unrecognized_shape_is_rejected() {
        assert!(matches!(
            PolicyVehicleData::from_document(json!({"something": 1})),
            Err(VinfoError::Serialization(_))
        ));
        assert!(PolicyVehicleData::from_document(json!("items")).is_err());
    }

    #[test]
    fn test_load_json_and_yaml_files() {
        let tmp = tempfile::tempdir().unwrap();

        let json_path = tmp.path().join("policy.json");
        std::fs::write(&json_path, climate_items().to_string()).unwrap();
        assert_eq!(load_policy_file(&json_path).unwrap().schema_items.len(), 2);

        let yaml_path = tmp.path().join("policy.yaml");
        std::fs::write(
            &yaml_path,
            "vehicle_data:\n  schema_version: \"2.0\"\n  schema_items:\n    - name: washerFluid\n      key: OEM_REF_WASHER\n      type: Integer\n      maxvalue: 10\n",
        )
        .unwrap();
        let section = load_policy_file(&yaml_path).unwrap();
        assert_eq!(section.schema_version.as_deref(), Some("2.0"));
        assert_eq!(
            section.schema_items[0].maxvalue.as_ref().and_then(|n| n.as_i64()),
            Some(10)
        );
    }

    #[test]
    fn test_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_policy_file(&tmp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, VinfoError::PolicyLoad { .. }));
    }

    #[test]
    fn test_invalid_yaml_reports_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("policy.yml");
        std::fs::write(&path, "{{invalid yaml: [unbalanced").unwrap();
        match load_policy_file(&path).unwrap_err() {
            VinfoError::PolicyLoad { reason, .. } => assert!(reason.contains("YAML")),
            other => panic!("expected PolicyLoad, got: {other}"),
        }
    }

    #[test]
    fn test_document_without_section_reports_policy_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("policy.json");
        std::fs::write(&path, r#"{"policy_table": {}}"#).unwrap();
        assert!(matches!(
            load_policy_file(&path),
            Err(VinfoError::PolicyLoad { .. })
        ));
    }

    #[test]
    fn test_load_enum_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("enums.json");
        std::fs::write(&path, r#"{"SeatPosition": ["FRONT", "REAR"]}"#).unwrap();
        let catalog = load_enum_catalog(&path).unwrap();
        assert_eq!(catalog.get("SeatPosition").and_then(|e| e.ordinal("REAR")), Some(1));

        std::fs::write(&path, r#"{"SeatPosition": 3}"#).unwrap();
        assert!(matches!(
            load_enum_catalog(&path),
            Err(VinfoError::PolicyLoad { .. })
        ));
    }

    #[test]
    fn test_load_message_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("message.json");
        std::fs::write(&path, r#"{"climateData": {"fanSpeed": 10}}"#).unwrap();
        assert_eq!(
            load_message_file(&path).unwrap(),
            json!({"climateData": {"fanSpeed": 10}})
        );
    }
}
