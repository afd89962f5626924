//! # vinfo-schema - Custom Vehicle Data Schema Engine
//!
//! Validates and reshapes OEM custom vehicle data against a schema tree
//! delivered at runtime through policy data.
//!
//! ## Resolution (`index`)
//!
//! [`SchemaIndex`] resolves a name or key to a schema item, either among
//! the root items or at any depth. Duplicate definitions are resolved by
//! the highest numeric `since` tag.
//!
//! ## Validation (`validate`)
//!
//! [`Validator::validate_message`] checks an inbound parameter map item by
//! item: mandatory presence, value variant, numeric ranges, string
//! lengths, array sizes, undeclared struct members and enum membership.
//!
//! ## Transformation (`transform`)
//!
//! [`Transformer`] renames parameters between the app-facing form (item
//! names) and the head-unit-facing form (item keys), and builds the
//! presence maps sent with subscription requests.
//!
//! ## Loading and Reload (`policy`, `store`)
//!
//! [`load_policy_file`] reads the vehicle data section of a JSON or YAML
//! policy document. [`SchemaStore`] holds the current generation and hands
//! out immutable snapshots. [`VehicleDataManager`] ties the pieces
//! together behind one snapshot per call.
//!
//! ## Crate Policy
//!
//! - Depends only on `vinfo-core` internally.
//! - Validation is a trust boundary: anything the schema does not
//!   describe is rejected with a structured error naming the parameter
//!   path.
//! - Transformation never fails; unmappable input is dropped and logged at
//!   `debug`.

pub mod index;
pub mod manager;
pub mod policy;
pub mod store;
pub mod transform;
pub mod validate;

pub use index::{SchemaIndex, SearchMethod};
pub use manager::VehicleDataManager;
pub use policy::{
    load_document, load_enum_catalog, load_message_file, load_policy_file, PolicyVehicleData,
};
pub use store::{SchemaProvider, SchemaStore};
pub use transform::Transformer;
pub use validate::Validator;
