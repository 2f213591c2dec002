//! End-to-end: raw request bytes → RpcEngine → BridgeService → TimedLink →
//! scripted appliance, and back.

use coffeebridge::app::events::AppEvent;
use coffeebridge::app::service::BridgeService;
use coffeebridge::config::BridgeConfig;
use coffeebridge::error::{Error, FormatError, SerialError};
use coffeebridge::machine::BIN_CODE_LEN;
use coffeebridge::machine::commands::{FLUSH, STATUS_QUERY, TURN_OFF, TURN_ON};
use coffeebridge::rpc::engine::RpcEngine;
use coffeebridge::rpc::messages::{CoffeeCommand, CommandType, Response, ResponseType, ResultTable};
use prost::Message;

use crate::mock_hw::{MockLink, RecordingSink, command, link, status_reply};

struct Bench {
    engine: RpcEngine,
    app: BridgeService,
    machine: MockLink,
    sink: RecordingSink,
}

impl Bench {
    fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    fn with_config(config: BridgeConfig) -> Self {
        Self {
            engine: RpcEngine::new(),
            app: BridgeService::new(&config),
            machine: link(&config),
            sink: RecordingSink::new(),
        }
    }

    fn send(&mut self, request: &CoffeeCommand) -> Response {
        self.send_raw(&request.encode_to_vec())
    }

    fn send_raw(&mut self, raw: &[u8]) -> Response {
        let out = self
            .engine
            .handle_request(raw, &mut self.app, &mut self.machine, &mut self.sink);
        Response::decode(out.as_slice()).unwrap()
    }
}

fn operation(text: &[u8]) -> CoffeeCommand {
    CoffeeCommand {
        r#type: CommandType::Operation as i32,
        command: command(text).as_bytes().to_vec(),
    }
}

fn query() -> CoffeeCommand {
    CoffeeCommand {
        r#type: CommandType::Query as i32,
        command: Vec::new(),
    }
}

#[test]
fn answered_operation_is_ok() {
    let mut b = Bench::new();
    b.machine.port_mut().reply(FLUSH);

    let resp = b.send(&operation(FLUSH));
    assert_eq!(resp.r#type, ResponseType::Ok as i32);
    assert_eq!(resp.description, "Operation SUCCEED");
    assert_eq!(resp.results, None);

    // Only the operation went out; no status refresh on success.
    assert_eq!(b.machine.port().commands.len(), 1);
    assert_eq!(b.machine.port().commands[0].len(), BIN_CODE_LEN);
}

#[test]
fn unanswered_operation_reports_refreshed_status() {
    let mut b = Bench::new();
    b.machine.port_mut().silence();
    for _ in 0..3 {
        b.machine.port_mut().reply(&status_reply(b'1'));
    }

    let resp = b.send(&operation(FLUSH));
    assert_eq!(resp.r#type, ResponseType::OperationErr as i32);
    assert_eq!(resp.description, "Operation FAILED");
    assert_eq!(
        resp.results,
        Some(ResultTable {
            power: false,
            water: true,
            beans: true,
            tray: true,
        })
    );
    assert_eq!(b.machine.port().count(STATUS_QUERY), 3);
    assert_eq!(
        b.sink.count(|e| matches!(
            e,
            AppEvent::OperationCompleted {
                succeeded: false,
                reason: Some(Error::EmptyResponse),
            }
        )),
        1
    );
}

#[test]
fn failure_without_refresh_reports_last_known_status() {
    let config = BridgeConfig {
        refresh_status_on_failure: false,
        ..BridgeConfig::default()
    };
    let mut b = Bench::with_config(config);
    b.machine.port_mut().silence();

    let resp = b.send(&operation(FLUSH));
    assert_eq!(resp.r#type, ResponseType::OperationErr as i32);
    assert_eq!(resp.results, Some(ResultTable::default()));
    assert_eq!(b.machine.port().count(STATUS_QUERY), 0);
}

#[test]
fn power_on_then_query_reports_power() {
    let mut b = Bench::new();
    b.machine.port_mut().reply(b"AN:01");
    let resp = b.send(&operation(TURN_ON));
    assert_eq!(resp.r#type, ResponseType::Ok as i32);
    assert!(b.app.state().power());

    for r in [b'0', b'1', b'0'] {
        b.machine.port_mut().reply(&status_reply(r));
    }
    let resp = b.send(&query());
    assert_eq!(resp.r#type, ResponseType::Result as i32);
    assert_eq!(resp.description, "");
    assert_eq!(
        resp.results,
        Some(ResultTable {
            power: true,
            water: true,
            beans: true,
            tray: true,
        })
    );
}

#[test]
fn power_off_clears_sticky_flag() {
    let mut b = Bench::new();
    b.machine.port_mut().reply(b"AN:01").reply(b"AN:02");
    b.send(&operation(TURN_ON));
    b.send(&operation(TURN_OFF));
    assert!(!b.app.state().power());
}

#[test]
fn failed_power_on_leaves_flag_alone() {
    let mut b = Bench::new();
    b.machine.port_mut().silence();
    b.send(&operation(TURN_ON));
    assert!(!b.app.state().power());
    assert_eq!(b.sink.count(|e| matches!(e, AppEvent::PowerFlagSet(_))), 0);
}

#[test]
fn query_with_water_and_no_tray() {
    let mut b = Bench::new();
    b.app.set_power(true, &mut b.sink);
    for _ in 0..3 {
        b.machine.port_mut().reply(&status_reply(b'0'));
    }

    let resp = b.send(&query());
    assert_eq!(
        resp.results,
        Some(ResultTable {
            power: true,
            water: true,
            beans: true,
            tray: false,
        })
    );
}

#[test]
fn unknown_tag_is_format_error_and_never_touches_appliance() {
    let mut b = Bench::new();
    let req = CoffeeCommand {
        r#type: 7,
        command: vec![b'#'; BIN_CODE_LEN],
    };

    let resp = b.send(&req);
    assert_eq!(resp.r#type, ResponseType::FormatErr as i32);
    assert_eq!(resp.description, "Request format UNKNOWN");
    assert_eq!(resp.results, None);
    assert!(b.machine.port().tx.is_empty());
    assert_eq!(
        b.sink.count(|e| matches!(e, AppEvent::RequestRejected(FormatError::UnknownTag(7)))),
        1
    );
}

#[test]
fn undecodable_datagram_is_format_error() {
    let mut b = Bench::new();
    let resp = b.send_raw(&[0x0A, 0x40, 0x01]);
    assert_eq!(resp.r#type, ResponseType::FormatErr as i32);
    assert!(b.machine.port().tx.is_empty());
}

#[test]
fn short_operation_payload_is_format_error() {
    let mut b = Bench::new();
    let req = CoffeeCommand {
        r#type: CommandType::Operation as i32,
        command: TURN_ON.to_vec(),
    };
    let resp = b.send(&req);
    assert_eq!(resp.r#type, ResponseType::FormatErr as i32);
    assert!(b.machine.port().tx.is_empty());
}

#[test]
fn engine_counts_outcomes() {
    let mut b = Bench::new();
    b.machine.port_mut().reply(b"ok");
    b.send(&operation(FLUSH));
    b.send_raw(&[0xFF]);
    b.machine.port_mut().silence();
    b.send(&operation(FLUSH));

    let stats = b.engine.stats();
    assert_eq!(stats.handled, 3);
    assert_eq!(stats.format_errors, 1);
    assert_eq!(stats.operation_errors, 1);
}

#[test]
fn uart_fault_during_operation_is_operation_error() {
    let mut b = Bench::new();
    b.machine.port_mut().reply(FLUSH).fail_read(2);
    for _ in 0..3 {
        b.machine.port_mut().reply(&status_reply(b'1'));
    }

    let resp = b.send(&operation(FLUSH));
    assert_eq!(resp.r#type, ResponseType::OperationErr as i32);
    assert_eq!(
        b.sink.count(|e| matches!(
            e,
            AppEvent::OperationCompleted {
                succeeded: false,
                reason: Some(Error::Serial(SerialError::ReadFailed)),
            }
        )),
        1
    );
    // The status refresh that follows reads clean samples.
    assert_eq!(
        resp.results,
        Some(ResultTable {
            power: false,
            water: true,
            beans: true,
            tray: true,
        })
    );
}
