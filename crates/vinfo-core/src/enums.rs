//! # Enum Registry
//!
//! Vehicle data items may be typed by an enum from the base RPC
//! specification (`"type": "VehicleDataStatus"`). The schema engine does
//! not know these enums; it resolves the type name through an
//! [`EnumRegistry`] and delegates normalization and validity checks to the
//! returned [`EnumSchema`].
//!
//! [`EnumCatalog`] is the provided registry: a map from type name to an
//! ordered symbol list ([`SymbolEnum`]). A string symbol normalizes to its
//! ordinal, an integer is taken as an ordinal, and validation checks the
//! ordinal range.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalization and validity check for one enum type.
pub trait EnumSchema: Send + Sync {
    /// Coerce a raw value into canonical enum form.
    ///
    /// Returns `None` if the value cannot represent a member of this enum.
    fn normalize(&self, value: &Value) -> Option<Value>;

    /// Check a normalized value against the enum definition.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason on failure.
    fn validate(&self, value: &Value) -> Result<(), String>;
}

/// Lookup of enum schemas by type name.
pub trait EnumRegistry: Send + Sync {
    /// Resolve an enum type name.
    fn lookup(&self, type_name: &str) -> Option<&dyn EnumSchema>;
}

/// An enum defined by its ordered symbol list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolEnum {
    symbols: Vec<String>,
}

impl SymbolEnum {
    /// Create an enum from symbols in ordinal order.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Ordinal of a symbol, if defined.
    pub fn ordinal(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }
}

impl EnumSchema for SymbolEnum {
    fn normalize(&self, value: &Value) -> Option<Value> {
        match value {
            Value::String(s) => self.ordinal(s).map(Value::from),
            Value::Number(n) => n.as_i64().map(Value::from),
            _ => None,
        }
    }

    fn validate(&self, value: &Value) -> Result<(), String> {
        let ordinal = value
            .as_i64()
            .ok_or_else(|| format!("expected an enum ordinal, got {value}"))?;
        match usize::try_from(ordinal) {
            Ok(i) if i < self.symbols.len() => Ok(()),
            _ => Err(format!(
                "ordinal {ordinal} is outside 0..{}",
                self.symbols.len()
            )),
        }
    }
}

/// A registry of [`SymbolEnum`]s keyed by type name.
///
/// Deserializes from `{"TypeName": ["SYMBOL_A", "SYMBOL_B"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumCatalog {
    enums: BTreeMap<String, SymbolEnum>,
}

impl EnumCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the base RPC specification enums that vehicle
    /// data items commonly reference.
    pub fn rpc_spec() -> Self {
        let mut catalog = Self::new();
        catalog.insert(
            "VehicleDataStatus",
            SymbolEnum::new(["NO_DATA_EXISTS", "OFF", "ON"]),
        );
        catalog.insert(
            "ComponentVolumeStatus",
            SymbolEnum::new(["UNKNOWN", "NORMAL", "LOW", "FAULT", "ALERT", "NOT_SUPPORTED"]),
        );
        catalog.insert(
            "PRNDL",
            SymbolEnum::new([
                "PARK", "REVERSE", "NEUTRAL", "DRIVE", "SPORT", "LOWGEAR", "FIRST", "SECOND",
                "THIRD", "FOURTH", "FIFTH", "SIXTH", "SEVENTH", "EIGHTH", "NINTH", "TENTH",
                "UNKNOWN", "FAULT",
            ]),
        );
        catalog.insert(
            "WiperStatus",
            SymbolEnum::new([
                "OFF",
                "AUTO_OFF",
                "OFF_MOVING",
                "MAN_INT_OFF",
                "MAN_INT_ON",
                "MAN_LOW",
                "MAN_HIGH",
                "MAN_FLICK",
                "WASH",
                "AUTO_LOW",
                "AUTO_HIGH",
                "COURTESYWIPE",
                "AUTO_ADJUST",
                "STALLED",
                "NO_DATA_EXISTS",
            ]),
        );
        catalog.insert(
            "VehicleDataEventStatus",
            SymbolEnum::new(["NO_EVENT", "NO", "YES", "NOT_SUPPORTED", "FAULT"]),
        );
        catalog.insert(
            "IgnitionStableStatus",
            SymbolEnum::new([
                "IGNITION_SWITCH_NOT_STABLE",
                "IGNITION_SWITCH_STABLE",
                "MISSING_FROM_TRANSMITTER",
            ]),
        );
        catalog.insert(
            "IgnitionStatus",
            SymbolEnum::new(["UNKNOWN", "OFF", "ACCESSORY", "RUN", "START", "INVALID"]),
        );
        catalog.insert("TurnSignal", SymbolEnum::new(["OFF", "LEFT", "RIGHT", "BOTH"]));
        catalog.insert(
            "ElectronicParkBrakeStatus",
            SymbolEnum::new(["CLOSED", "TRANSITION", "OPEN", "DRIVE_ACTIVE", "FAULT"]),
        );
        catalog.insert(
            "FuelType",
            SymbolEnum::new(["GASOLINE", "DIESEL", "CNG", "LPG", "HYDROGEN", "BATTERY"]),
        );
        catalog
    }

    /// Register or replace an enum definition.
    pub fn insert(&mut self, type_name: impl Into<String>, definition: SymbolEnum) {
        self.enums.insert(type_name.into(), definition);
    }

    /// Add every definition from `other`, replacing same-named entries.
    pub fn merge(&mut self, other: EnumCatalog) {
        self.enums.extend(other.enums);
    }

    pub fn get(&self, type_name: &str) -> Option<&SymbolEnum> {
        self.enums.get(type_name)
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

impl EnumRegistry for EnumCatalog {
    fn lookup(&self, type_name: &str) -> Option<&dyn EnumSchema> {
        self.enums.get(type_name).map(|e| e as &dyn EnumSchema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_symbol_normalizes_to_ordinal() {
        let status = SymbolEnum::new(["NO_DATA_EXISTS", "OFF", "ON"]);
        assert_eq!(status.normalize(&json!("ON")), Some(json!(2)));
        assert_eq!(status.normalize(&json!("on")), None);
        assert_eq!(status.normalize(&json!(true)), None);
        assert_eq!(status.normalize(&json!(1.5)), None);
    }

    #[test]
    fn test_ordinal_range_validation() {
        let status = SymbolEnum::new(["NO_DATA_EXISTS", "OFF", "ON"]);
        assert!(status.validate(&json!(0)).is_ok());
        assert!(status.validate(&json!(2)).is_ok());
        assert!(status.validate(&json!(3)).is_err());
        assert!(status.validate(&json!(-1)).is_err());
        assert!(status.validate(&json!("ON")).is_err());
    }

    #[test]
    fn test_rpc_spec_catalog() {
        let catalog = EnumCatalog::rpc_spec();
        assert!(catalog.lookup("VehicleDataStatus").is_some());
        assert!(catalog.lookup("PRNDL").is_some());
        assert!(catalog.lookup("NoSuchEnum").is_none());
        assert_eq!(catalog.get("TurnSignal").map(|e| e.symbols().len()), Some(4));
    }

    #[test]
    fn test_catalog_deserializes_and_merges() {
        let extra: EnumCatalog = serde_json::from_value(json!({
            "SeatPosition": ["FRONT", "REAR"],
            "TurnSignal": ["OFF", "LEFT", "RIGHT", "BOTH", "HAZARD"]
        }))
        .unwrap();
        let mut catalog = EnumCatalog::rpc_spec();
        let before = catalog.len();
        catalog.merge(extra);
        assert_eq!(catalog.len(), before + 1);
        assert_eq!(catalog.get("TurnSignal").map(|e| e.symbols().len()), Some(5));
        assert_eq!(catalog.get("SeatPosition").and_then(|e| e.ordinal("REAR")), Some(1));
    }
}
