//! End-to-end tests of the `/ws` request/response protocol.

#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;

use probe_console::domain::OutputMessage;
use probe_console::service::REQUIRED_FIELDS_ERROR;
use probe_console::ws::ServerEvent;

use common::{
    assert_silent, connect, next_event, send_input, send_text, spawn_server,
    spawn_server_with_dispatch,
};

#[tokio::test]
async fn input_changed_yields_one_update() {
    let addr = spawn_server().await;
    let mut ws = connect(addr).await;

    send_input(&mut ws, "a.txt", "hello").await;

    assert_eq!(
        next_event(&mut ws).await,
        ServerEvent::UpdateOutputs(OutputMessage {
            output: "Received filename: a.txt and input: hello".to_string(),
            probe_a: "Probe A: a.txt".to_string(),
            probe_b: "Probe B: hello".to_string(),
            probe_c: "Probe C: a.txt".to_string(),
            errors: String::new(),
        })
    );
    assert_silent(&mut ws).await;
}

#[tokio::test]
async fn empty_fields_report_required() {
    let addr = spawn_server().await;
    let mut ws = connect(addr).await;

    send_input(&mut ws, "", "").await;

    assert_eq!(
        next_event(&mut ws).await,
        ServerEvent::UpdateOutputs(OutputMessage {
            output: "Received filename:  and input: ".to_string(),
            probe_a: "Probe A: ".to_string(),
            probe_b: "Probe B: ".to_string(),
            probe_c: "Probe C: ".to_string(),
            errors: REQUIRED_FIELDS_ERROR.to_string(),
        })
    );
}

#[tokio::test]
async fn missing_fields_read_as_empty() {
    let addr = spawn_server().await;
    let mut ws = connect(addr).await;

    send_text(&mut ws, r#"{"event":"input_changed","data":{"filename":"a.txt"}}"#).await;

    let ServerEvent::UpdateOutputs(out) = next_event(&mut ws).await else {
        panic!("expected update_outputs");
    };
    assert_eq!(out.probe_b, "Probe B: ");
    assert_eq!(out.errors, REQUIRED_FIELDS_ERROR);
}

#[tokio::test]
async fn sessions_are_isolated() {
    let addr = spawn_server().await;
    let mut first = connect(addr).await;
    let mut second = connect(addr).await;

    send_input(&mut first, "one.txt", "first").await;
    send_input(&mut second, "two.txt", "second").await;

    let ServerEvent::UpdateOutputs(out_first) = next_event(&mut first).await else {
        panic!("first session expected update_outputs");
    };
    let ServerEvent::UpdateOutputs(out_second) = next_event(&mut second).await else {
        panic!("second session expected update_outputs");
    };
    assert_eq!(out_first.probe_a, "Probe A: one.txt");
    assert_eq!(out_first.probe_b, "Probe B: first");
    assert_eq!(out_second.probe_a, "Probe A: two.txt");
    assert_eq!(out_second.probe_b, "Probe B: second");

    assert_silent(&mut first).await;
    assert_silent(&mut second).await;
}

#[tokio::test]
async fn malformed_frame_gets_error_and_session_continues() {
    let addr = spawn_server().await;
    let mut ws = connect(addr).await;

    send_text(&mut ws, "this is not json").await;
    let ServerEvent::Error(body) = next_event(&mut ws).await else {
        panic!("expected error event");
    };
    assert_eq!(body.code, 1001);

    send_input(&mut ws, "still.txt", "alive").await;
    let ServerEvent::UpdateOutputs(out) = next_event(&mut ws).await else {
        panic!("session should keep working after an error");
    };
    assert!(out.errors.is_empty());
}

#[tokio::test]
async fn unknown_event_gets_error() {
    let addr = spawn_server().await;
    let mut ws = connect(addr).await;

    send_text(&mut ws, r#"{"event":"go_button","data":{}}"#).await;

    let ServerEvent::Error(body) = next_event(&mut ws).await else {
        panic!("expected error event");
    };
    assert_eq!(body.code, 1003);
    assert!(body.message.contains("go_button"));
}

#[tokio::test]
async fn replies_arrive_in_request_order() {
    let addr = spawn_server().await;
    let mut ws = connect(addr).await;

    for n in 0..10 {
        send_input(&mut ws, &format!("file{n}"), "x").await;
    }
    for n in 0..10 {
        let ServerEvent::UpdateOutputs(out) = next_event(&mut ws).await else {
            panic!("expected update_outputs");
        };
        assert_eq!(out.probe_c, format!("Probe C: file{n}"));
    }
}

#[tokio::test]
async fn binary_frames_are_ignored() {
    let addr = spawn_server().await;
    let mut ws = connect(addr).await;

    if ws.send(Message::binary(vec![1u8, 2, 3])).await.is_err() {
        panic!("ws send failed");
    }
    send_input(&mut ws, "a", "b").await;

    let ServerEvent::UpdateOutputs(out) = next_event(&mut ws).await else {
        panic!("expected update_outputs after a binary frame");
    };
    assert_eq!(out.output, "Received filename: a and input: b");
    assert_silent(&mut ws).await;
}

#[tokio::test]
async fn dispatcher_shutdown_closes_open_sockets() {
    let (addr, dispatch, dispatcher) = spawn_server_with_dispatch().await;
    let mut ws = connect(addr).await;

    send_input(&mut ws, "a", "b").await;
    assert!(matches!(next_event(&mut ws).await, ServerEvent::UpdateOutputs(_)));

    assert!(dispatch.shutdown().is_ok());
    let Ok(manager) = dispatcher.await else {
        panic!("dispatcher task panicked");
    };
    drop(manager);

    let Ok(frame) = tokio::time::timeout(Duration::from_secs(2), ws.next()).await else {
        panic!("socket stayed open after shutdown");
    };
    assert!(
        matches!(frame, Some(Ok(Message::Close(_)))),
        "expected a close frame, got {frame:?}"
    );
}
