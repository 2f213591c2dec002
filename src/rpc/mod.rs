//! Wire-facing request handling.
//!
//! Protobuf messages compatible with `coffee.proto` (proto3), built with
//! `prost` derives.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  datagram ──▶ messages::CoffeeCommand ──▶ classify           │
//! │                                              │               │
//! │                                              ▼               │
//! │  datagram ◀── messages::Response ◀── engine ◀── BridgeService│
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod classify;
pub mod engine;
pub mod messages;
