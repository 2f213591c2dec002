//! UDP adapter over localhost: one datagram in, one answer back to the
//! sender.

use std::net::UdpSocket;
use std::time::Duration;

use coffeebridge::adapters::udp::UdpServer;
use coffeebridge::app::service::BridgeService;
use coffeebridge::config::BridgeConfig;
use coffeebridge::rpc::messages::{CoffeeCommand, CommandType, Response, ResponseType, ResultTable};
use prost::Message;

use crate::mock_hw::{RecordingSink, link, status_reply};

fn loopback() -> (UdpServer, UdpSocket) {
    let server = UdpServer::from_socket(UdpSocket::bind("127.0.0.1:0").unwrap());
    let client = UdpSocket::bind("127.0.0.1:0").unwrap();
    client
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    client.connect(server.local_addr().unwrap()).unwrap();
    (server, client)
}

#[test]
fn query_roundtrip_over_udp() {
    let (mut server, client) = loopback();
    let config = BridgeConfig::default();
    let mut app = BridgeService::new(&config);
    let mut machine = link(&config);
    let mut sink = RecordingSink::new();
    for _ in 0..3 {
        machine.port_mut().reply(&status_reply(b'1'));
    }

    let req = CoffeeCommand {
        r#type: CommandType::Query as i32,
        command: Vec::new(),
    };
    client.send(&req.encode_to_vec()).unwrap();

    let peer = server.serve_once(&mut app, &mut machine, &mut sink).unwrap();
    assert_eq!(peer, client.local_addr().unwrap());

    let mut buf = [0u8; 256];
    let n = client.recv(&mut buf).unwrap();
    let resp = Response::decode(&buf[..n]).unwrap();
    assert_eq!(resp.r#type, ResponseType::Result as i32);
    assert_eq!(
        resp.results,
        Some(ResultTable {
            power: false,
            water: true,
            beans: true,
            tray: true,
        })
    );
    assert_eq!(server.engine().stats().handled, 1);
}

#[test]
fn garbage_datagram_still_gets_an_answer() {
    let (mut server, client) = loopback();
    let config = BridgeConfig::default();
    let mut app = BridgeService::new(&config);
    let mut machine = link(&config);
    let mut sink = RecordingSink::new();

    client.send(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap();
    server.serve_once(&mut app, &mut machine, &mut sink).unwrap();

    let mut buf = [0u8; 256];
    let n = client.recv(&mut buf).unwrap();
    let resp = Response::decode(&buf[..n]).unwrap();
    assert_eq!(resp.r#type, ResponseType::FormatErr as i32);
    assert!(machine.port().tx.is_empty());
}
