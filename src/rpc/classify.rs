//! Request classifier.
//!
//! Pure function from a decoded [`CoffeeCommand`] to a [`ParsedRequest`].
//! Anything that does not decode cleanly becomes `Unknown`.

use prost::Message;

use crate::app::commands::ParsedRequest;
use crate::error::FormatError;
use crate::machine::SemanticCommand;

use super::messages::{CoffeeCommand, CommandType};

/// Classify a decoded command envelope.
pub fn classify(cmd: &CoffeeCommand) -> ParsedRequest {
    match CommandType::try_from(cmd.r#type) {
        Ok(CommandType::Operation) => match SemanticCommand::new(&cmd.command) {
            Ok(payload) => ParsedRequest::Operation(payload),
            Err(reason) => ParsedRequest::Unknown(reason),
        },
        Ok(CommandType::Query) => ParsedRequest::Query,
        Err(_) => ParsedRequest::Unknown(FormatError::UnknownTag(cmd.r#type)),
    }
}

/// Decode a raw datagram and classify it.
pub fn parse_request(raw: &[u8]) -> ParsedRequest {
    match CoffeeCommand::decode(raw) {
        Ok(cmd) => classify(&cmd),
        Err(_) => ParsedRequest::Unknown(FormatError::Undecodable),
    }
}
