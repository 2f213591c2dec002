//! Fuzz target: datagram → `RpcEngine::handle_request`
//!
//! Drives arbitrary datagrams through the full request path against a silent
//! appliance and asserts that every input gets a decodable answer.
//!
//! cargo fuzz run fuzz_request_parser

#![no_main]

use coffeebridge::app::events::AppEvent;
use coffeebridge::app::ports::{EventSink, MachinePort};
use coffeebridge::app::service::BridgeService;
use coffeebridge::config::BridgeConfig;
use coffeebridge::error::SerialError;
use coffeebridge::machine::Reply;
use coffeebridge::rpc::engine::RpcEngine;
use coffeebridge::rpc::messages::Response;
use libfuzzer_sys::fuzz_target;
use prost::Message;

struct Silent;

impl MachinePort for Silent {
    fn transact(&mut self, _command: &[u8]) -> Result<Reply, SerialError> {
        Ok(Reply::new())
    }

    fn settle(&mut self, _ms: u32) {}
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut engine = RpcEngine::new();
    let mut app = BridgeService::new(&BridgeConfig::default());

    let out = engine.handle_request(data, &mut app, &mut Silent, &mut Discard);
    assert!(
        Response::decode(out.as_slice()).is_ok(),
        "answer must decode"
    );
    assert_eq!(engine.stats().handled, 1);
});
