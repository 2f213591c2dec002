//! Protobuf messages exchanged with network clients.
//!
//! Hand-written `prost` derives mirroring `coffee.proto`:
//!
//! ```text
//! message CoffeeCommand {
//!   enum CommandType { OPERATION = 0; QUERY = 1; }
//!   CommandType type = 1;
//!   bytes command = 2;
//! }
//! message Response {
//!   enum ResponseType { OK = 0; RESULT = 1; OPERATION_ERR = 2; FORMAT_ERR = 3; }
//!   message ResultTable { bool POWER = 1; bool WATER = 2; bool BEANS = 3; bool TRAY = 4; }
//!   ResponseType type = 1;
//!   string description = 2;
//!   ResultTable results = 3;
//! }
//! ```

use crate::app::response::ResponseOutcome;
use crate::machine::status::{Capability, StatusBitmask};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum CommandType {
    Operation = 0,
    Query = 1,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CoffeeCommand {
    #[prost(enumeration = "CommandType", tag = "1")]
    pub r#type: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub command: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ResponseType {
    Ok = 0,
    Result = 1,
    OperationErr = 2,
    FormatErr = 3,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct ResultTable {
    #[prost(bool, tag = "1")]
    pub power: bool,
    #[prost(bool, tag = "2")]
    pub water: bool,
    #[prost(bool, tag = "3")]
    pub beans: bool,
    #[prost(bool, tag = "4")]
    pub tray: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Response {
    #[prost(enumeration = "ResponseType", tag = "1")]
    pub r#type: i32,
    #[prost(string, tag = "2")]
    pub description: String,
    #[prost(message, optional, tag = "3")]
    pub results: Option<ResultTable>,
}

impl From<StatusBitmask> for ResultTable {
    fn from(s: StatusBitmask) -> Self {
        Self {
            power: s.contains(Capability::Power),
            water: s.contains(Capability::Water),
            beans: s.contains(Capability::Beans),
            tray: s.contains(Capability::Tray),
        }
    }
}

impl From<&ResponseOutcome> for Response {
    fn from(outcome: &ResponseOutcome) -> Self {
        let kind = match outcome {
            ResponseOutcome::Ok => ResponseType::Ok,
            ResponseOutcome::StatusResult(_) => ResponseType::Result,
            ResponseOutcome::OperationError(_) => ResponseType::OperationErr,
            ResponseOutcome::FormatError => ResponseType::FormatErr,
        };
        Self {
            r#type: kind as i32,
            description: outcome.description().into(),
            results: outcome.status().map(ResultTable::from),
        }
    }
}
