//! JSON-lines replay of client events.

use std::sync::Arc;

use realtime_session::{
    config::SessionDefaults, replay::replay, EventPublisher, EventRouter, SessionContext,
};
use serde_json::Value;
use tokio::io::BufReader;

async fn run_replay(input: &str) -> Vec<Value> {
    let router = Arc::new(EventRouter::realtime().unwrap());
    let (publisher, outbound) = EventPublisher::channel();
    let ctx = SessionContext::new(SessionDefaults::default().new_session(), publisher);

    let mut output = Vec::new();
    replay(
        router,
        ctx,
        outbound,
        BufReader::new(input.as_bytes()),
        &mut output,
    )
    .await
    .unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn event_types(events: &[Value]) -> Vec<&str> {
    events
        .iter()
        .map(|event| event["type"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_each_line_is_one_server_event() {
    let input = concat!(
        r#"{"type":"session.update","session":{"voice":"echo"}}"#,
        "\n",
        r#"{"type":"session.update","session":{"instructions":"Be brief."}}"#,
        "\n",
    );
    let events = run_replay(input).await;

    assert_eq!(
        event_types(&events),
        vec!["session.updated", "session.updated"]
    );
    assert_eq!(events[0]["session"]["voice"], "echo");
    assert_eq!(events[1]["session"]["voice"], "echo");
    assert_eq!(events[1]["session"]["instructions"], "Be brief.");
}

#[tokio::test]
async fn test_malformed_line_reported_in_input_order() {
    let input = concat!(
        r#"{"type":"session.update","event_id":"evt_1","session":{"voice":"echo"}}"#,
        "\n",
        "not json\n",
        r#"{"type":"session.update","session":{"voice":"sage"}}"#,
        "\n",
    );

    // Ordering must not depend on task scheduling.
    for _ in 0..5 {
        let events = run_replay(input).await;
        assert_eq!(
            event_types(&events),
            vec!["session.updated", "error", "session.updated"]
        );
        assert_eq!(events[1]["error"]["type"], "invalid_request_error");
        assert_eq!(events[1]["error"]["code"], "invalid_json");
        assert_eq!(events[2]["session"]["voice"], "sage");
    }
}

#[tokio::test]
async fn test_blank_lines_are_skipped() {
    let input = concat!(
        "\n",
        "   \n",
        r#"{"type":"session.update","session":{"voice":"echo"}}"#,
        "\n\n",
    );
    let events = run_replay(input).await;
    assert_eq!(event_types(&events), vec!["session.updated"]);
}

#[tokio::test]
async fn test_rejected_fields_precede_session_updated() {
    let input = concat!(
        r#"{"type":"session.update","#,
        r#""session":{"input_audio_format":"g711_ulaw","voice":"echo"}}"#,
        "\n",
    );
    let events = run_replay(input).await;

    assert_eq!(event_types(&events), vec!["error", "session.updated"]);
    assert_eq!(events[0]["error"]["param"], "session.input_audio_format");
    assert_eq!(events[1]["session"]["input_audio_format"], "pcm16");
    assert_eq!(events[1]["session"]["voice"], "echo");
}
