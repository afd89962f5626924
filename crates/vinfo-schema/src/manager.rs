//! # Vehicle Data Manager
//!
//! Entry point for the RPC layer. Binds a schema provider, an enum
//! registry and the base-spec name set, and exposes the operations the
//! message handlers call.
//!
//! Every operation takes exactly one snapshot from the provider and runs
//! against it, so a concurrent schema reload is observed either entirely
//! or not at all.

use serde_json::{Map, Value};

use vinfo_core::{BaseSpecNames, EnumRegistry, ValidationError, VehicleDataItem};

use crate::index::{SchemaIndex, SearchMethod};
use crate::store::SchemaProvider;
use crate::transform::Transformer;
use crate::validate::Validator;

/// Facade over validation and transformation of custom vehicle data.
#[derive(Debug, Clone)]
pub struct VehicleDataManager<P, E, N> {
    provider: P,
    enums: E,
    base_spec: N,
}

impl<P, E, N> VehicleDataManager<P, E, N>
where
    P: SchemaProvider,
    E: EnumRegistry,
    N: BaseSpecNames,
{
    pub fn new(provider: P, enums: E, base_spec: N) -> Self {
        Self {
            provider,
            enums,
            base_spec,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Validate the parameters of an inbound request.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found. See
    /// [`Validator::validate_message`].
    pub fn validate_vehicle_data_items(&self, message: &Value) -> Result<(), ValidationError> {
        let items = self.provider.snapshot();
        Validator::new(&items, &self.enums).validate_message(message)
    }

    /// Presence map sent to the head unit for a subscription or read
    /// request naming `item_names`.
    pub fn create_hmi_message_params<I, S>(&self, item_names: I) -> Map<String, Value>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = self.provider.snapshot();
        Transformer::new(&items, &self.base_spec).build_presence_map(item_names)
    }

    /// Head-unit response parameters in app-facing form.
    pub fn create_mobile_message_params(&self, params: &Map<String, Value>) -> Map<String, Value> {
        let items = self.provider.snapshot();
        Transformer::new(&items, &self.base_spec).canonicalize(params)
    }

    /// App request parameters in head-unit-facing form.
    pub fn create_hmi_data_params(&self, params: &Map<String, Value>) -> Map<String, Value> {
        let items = self.provider.snapshot();
        Transformer::new(&items, &self.base_spec).to_head_unit(params)
    }

    /// Type string of a custom item, or `name` if unknown.
    pub fn vehicle_data_item_type(&self, name: &str) -> String {
        let items = self.provider.snapshot();
        Transformer::new(&items, &self.base_spec).item_type(name)
    }

    pub fn is_vehicle_data_name(&self, name: &str) -> bool {
        let items = self.provider.snapshot();
        Transformer::new(&items, &self.base_spec).is_known_name(name)
    }

    pub fn is_vehicle_data_key(&self, key: &str) -> bool {
        let items = self.provider.snapshot();
        Transformer::new(&items, &self.base_spec).is_known_key(key)
    }

    /// Resolve an item by name (or by key when `by_key` is set) and return
    /// an owned copy.
    pub fn find_item(&self, ident: &str, by_key: bool, method: SearchMethod) -> Option<VehicleDataItem> {
        let items = self.provider.snapshot();
        let index = SchemaIndex::new(&items);
        let found = if by_key {
            index.find_by_key(ident, method)
        } else {
            index.find_by_name(ident, method)
        };
        found.cloned()
    }
}
