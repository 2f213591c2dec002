//! Application core: request semantics, zero wire-format knowledge.
//!
//! This module contains the bridge's business rules: what an operation or
//! query does against the appliance and which outcome it produces. All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without a real appliance.

pub mod commands;
pub mod events;
pub mod ports;
pub mod response;
pub mod service;
