//! # vinfo-core - Foundational Types for Custom Vehicle Data
//!
//! This crate defines the data model shared by the schema engine and its
//! callers. It depends on nothing internal; `vinfo-schema` and `vinfo-cli`
//! build on it.
//!
//! ## Key Design Principles
//!
//! 1. **Closed item types.** `ItemType` is an enum with an `Enum(String)`
//!    payload for enum-type references. Type dispatch is an exhaustive
//!    `match`, never a string comparison.
//!
//! 2. **One bound helper.** Array sizes, string lengths, and numeric
//!    ranges all resolve their optional policy bounds through
//!    [`Bounds<T>`], with the unbounded default supplied by
//!    [`BoundValue`].
//!
//! 3. **Structured failures.** Validation failures are values
//!    ([`ValidationError`]) carrying the offending parameter path. They are
//!    never fatal; the caller decides whether to reject the RPC.
//!
//! 4. **Collaborators are traits.** The base-spec vehicle-data name set
//!    ([`BaseSpecNames`]) and the enum registry ([`EnumRegistry`]) are
//!    injected. Static implementations seeded from the base RPC
//!    specification are provided.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vinfo-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod base_spec;
pub mod bounds;
pub mod enums;
pub mod error;
pub mod item;
pub mod path;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use base_spec::{BaseSpecNames, RpcSpecVehicleData, RPC_SPEC_VEHICLE_DATA};
pub use bounds::{BoundValue, Bounds};
pub use enums::{EnumCatalog, EnumRegistry, EnumSchema, SymbolEnum};
pub use error::{ErrorKind, RangeSubject, SchemaError, ValidationError, VinfoError};
pub use item::{ItemType, VehicleDataItem};
pub use path::ParamPath;
pub use value::ValueKind;
