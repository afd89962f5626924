//! # Base-Spec Vehicle Data
//!
//! Vehicle data items fixed by the core RPC specification, as opposed to
//! OEM custom items delivered through policy data. The transformer leaves
//! base-spec parameters untouched and only remaps custom ones.

use std::collections::{BTreeSet, HashSet};

/// Names of the vehicle data items defined by the base RPC specification.
///
/// The head unit uses the same identifiers for these items, so the name
/// view and the key view coincide.
pub const RPC_SPEC_VEHICLE_DATA: &[&str] = &[
    "gps",
    "speed",
    "rpm",
    "fuelLevel",
    "fuelLevel_State",
    "instantFuelConsumption",
    "fuelRange",
    "externalTemperature",
    "vin",
    "prndl",
    "tirePressure",
    "odometer",
    "beltStatus",
    "bodyInformation",
    "deviceStatus",
    "driverBraking",
    "wiperStatus",
    "headLampStatus",
    "engineTorque",
    "accPedalPosition",
    "steeringWheelAngle",
    "engineOilLife",
    "eCallInfo",
    "airbagStatus",
    "emergencyEvent",
    "clusterModeStatus",
    "myKey",
    "turnSignal",
    "electronicParkBrakeStatus",
    "cloudAppVehicleID",
];

/// Membership test for base-spec vehicle data.
pub trait BaseSpecNames: Send + Sync {
    /// Returns `true` if `name` is an app-facing base-spec item name.
    fn contains_name(&self, name: &str) -> bool;

    /// Returns `true` if `key` is a head-unit-facing base-spec item key.
    fn contains_key(&self, key: &str) -> bool;
}

/// The static base-spec set from [`RPC_SPEC_VEHICLE_DATA`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RpcSpecVehicleData;

impl BaseSpecNames for RpcSpecVehicleData {
    fn contains_name(&self, name: &str) -> bool {
        RPC_SPEC_VEHICLE_DATA.contains(&name)
    }

    fn contains_key(&self, key: &str) -> bool {
        RPC_SPEC_VEHICLE_DATA.contains(&key)
    }
}

impl BaseSpecNames for BTreeSet<String> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains(name)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

impl BaseSpecNames for HashSet<String> {
    fn contains_name(&self, name: &str) -> bool {
        self.contains(name)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_spec_membership() {
        let names = RpcSpecVehicleData;
        assert!(names.contains_name("speed"));
        assert!(names.contains_name("fuelLevel_State"));
        assert!(names.contains_key("gps"));
        assert!(names.contains_name("turnSignal"));
        assert!(names.contains_key("electronicParkBrakeStatus"));
        assert!(names.contains_name("cloudAppVehicleID"));
        assert!(!names.contains_name("climateData"));
        // Case-sensitive.
        assert!(!names.contains_name("Speed"));
    }

    #[test]
    fn test_rpc_spec_names_unique() {
        let mut seen = HashSet::new();
        for name in RPC_SPEC_VEHICLE_DATA {
            assert!(seen.insert(name), "Duplicate base-spec name: {name}");
        }
    }

    #[test]
    fn test_set_impls() {
        let set: BTreeSet<String> = ["speed".to_string()].into_iter().collect();
        assert!(set.contains_name("speed"));
        assert!(!set.contains_key("rpm"));
    }
}
