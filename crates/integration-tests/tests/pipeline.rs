//! End-to-end tests from raw transport bytes to rebuilt tool calls

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use futures_util::{StreamExt, stream};
use serde_json::json;
use toolstream_config::{Config, ParserConfig, ProviderFamily};
use toolstream_llm::{Framing, StreamError, ToolCallAccumulator, UnifiedEvent, event_pipeline};

fn byte_chunks(parts: Vec<String>) -> impl futures_util::Stream<Item = Result<Bytes, String>> + Send + 'static {
    stream::iter(parts.into_iter().map(|p| Ok(Bytes::from(p))))
}

async fn run(parts: Vec<String>, family: ProviderFamily, framing: Framing) -> Vec<Result<UnifiedEvent, StreamError>> {
    event_pipeline(byte_chunks(parts), family, framing, ParserConfig::default())
        .collect()
        .await
}

fn sse(events: &[serde_json::Value]) -> String {
    events
        .iter()
        .map(|e| format!("event: {}\ndata: {e}\n\n", e["type"].as_str().unwrap_or("message")))
        .collect()
}

// -- Invoke stream over SSE --

#[tokio::test]
async fn invoke_sse_text_then_tool_call() {
    let body = sse(&[
        json!({"type": "message_start", "message": {"id": "msg_1", "role": "assistant"}}),
        json!({"type": "content_block_start", "index": 0, "content_block": {"type": "text", "text": ""}}),
        json!({"type": "content_block_delta", "index": 0, "delta": {"type": "text_delta", "text": "Checking"}}),
        json!({"type": "content_block_stop", "index": 0}),
        json!({"type": "content_block_start", "index": 1, "content_block": {"type": "tool_use", "id": "toolu_1", "name": "weather", "input": {}}}),
        json!({"type": "ping"}),
        json!({"type": "content_block_delta", "index": 1, "delta": {"type": "input_json_delta", "partial_json": "{\"city\":"}}),
        json!({"type": "content_block_delta", "index": 1, "delta": {"type": "input_json_delta", "partial_json": "\"Oslo\"}"}}),
        json!({"type": "content_block_stop", "index": 1}),
        json!({"type": "message_delta", "delta": {"stop_reason": "tool_use"}, "usage": {"output_tokens": 12}}),
        json!({"type": "message_stop"}),
    ]);

    // Split at awkward offsets to exercise SSE reassembly
    let split: Vec<String> = body
        .as_bytes()
        .chunks(37)
        .map(|c| String::from_utf8(c.to_vec()).unwrap())
        .collect();

    let events: Vec<UnifiedEvent> = run(split, ProviderFamily::InvokeStream, Framing::Sse)
        .await
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(events.first(), Some(&UnifiedEvent::text("")));

    let result = events.into_iter().collect::<ToolCallAccumulator>().finish();
    assert_eq!(result.text, "Checking");
    assert_eq!(result.tool_calls.len(), 1);
    assert_eq!(result.tool_calls[0].id, "toolu_1");
    assert_eq!(result.tool_calls[0].name, "weather");
    assert_eq!(result.tool_calls[0].parse_arguments().unwrap(), json!({"city": "Oslo"}));
}

#[tokio::test]
async fn invoke_base64_chunk_envelopes() {
    let inner = [
        json!({"type": "content_block_start", "index": 0, "content_block": {"type": "tool_use", "id": "tu", "name": "lookup"}}),
        json!({"type": "content_block_delta", "index": 0, "delta": {"type": "input_json_delta", "partial_json": "{\"k\":1}"}}),
        json!({"type": "content_block_stop", "index": 0}),
    ];
    let lines: Vec<String> = inner
        .iter()
        .map(|e| format!("{}\n", json!({"chunk": {"bytes": STANDARD.encode(e.to_string())}})))
        .collect();

    let events = run(lines, ProviderFamily::InvokeStream, Framing::Ndjson).await;

    assert_eq!(events, vec![Ok(UnifiedEvent::tool_call("tu", "lookup", "{\"k\":1}"))]);
}

// -- Converse stream over NDJSON --

#[tokio::test]
async fn converse_ndjson_split_mid_line() {
    let body = [
        json!({"messageStart": {"role": "assistant"}}),
        json!({"contentBlockDelta": {"delta": {"text": "Searching"}, "contentBlockIndex": 0}}),
        json!({"contentBlockStop": {"contentBlockIndex": 0}}),
        json!({"contentBlockStart": {"start": {"toolUse": {"toolUseId": "t1", "name": "search"}}, "contentBlockIndex": 1}}),
        json!({"contentBlockDelta": {"delta": {"toolUse": {"input": "{\"q\":\"ru"}}, "contentBlockIndex": 1}}),
        json!({"contentBlockDelta": {"delta": {"toolUse": {"input": "st\"}"}}, "contentBlockIndex": 1}}),
        json!({"contentBlockStop": {"contentBlockIndex": 1}}),
        json!({"messageStop": {"stopReason": "tool_use"}}),
        json!({"metadata": {"usage": {"inputTokens": 3}}}),
    ]
    .iter()
    .map(|e| format!("{e}\n"))
    .collect::<String>();

    let (head, tail) = body.split_at(body.len() / 2);
    let events = run(vec![head.to_owned(), tail.to_owned()], ProviderFamily::ConverseStream, Framing::Ndjson).await;

    assert_eq!(
        events,
        vec![
            Ok(UnifiedEvent::text("Searching")),
            Ok(UnifiedEvent::tool_call("t1", "search", "{\"q\":\"ru")),
            Ok(UnifiedEvent::tool_call("t1", "search", "st\"}")),
        ]
    );
}

#[tokio::test]
async fn converse_sequential_tool_calls_do_not_leak() {
    let body = [
        json!({"contentBlockStart": {"start": {"toolUse": {"toolUseId": "a", "name": "first"}}}}),
        json!({"contentBlockDelta": {"delta": {"toolUse": {"input": "{}"}}}}),
        json!({"contentBlockStop": {}}),
        json!({"contentBlockDelta": {"delta": {"toolUse": {"input": "orphan"}}}}),
        json!({"contentBlockStart": {"start": {"toolUse": {"toolUseId": "b", "name": "second"}}}}),
        json!({"contentBlockDelta": {"delta": {"toolUse": {"input": "{\"x\":2}"}}}}),
    ]
    .iter()
    .map(|e| format!("{e}\n"))
    .collect::<String>();

    let result = run(vec![body], ProviderFamily::ConverseStream, Framing::Ndjson)
        .await
        .into_iter()
        .map(Result::unwrap)
        .collect::<ToolCallAccumulator>()
        .finish();

    assert_eq!(result.tool_calls.len(), 2);
    assert_eq!(result.tool_calls[0].arguments, "{}");
    assert_eq!(result.tool_calls[1].id, "b");
    assert_eq!(result.tool_calls[1].arguments, "{\"x\":2}");
}

#[tokio::test]
async fn transport_errors_surface_after_earlier_events() {
    let parts: Vec<Result<Bytes, String>> = vec![
        Ok(Bytes::from_static(b"{\"contentBlockDelta\":{\"delta\":{\"text\":\"hi\"}}}\n")),
        Err("connection closed".to_owned()),
    ];

    let events: Vec<_> = event_pipeline(
        stream::iter(parts),
        ProviderFamily::ConverseStream,
        Framing::Ndjson,
        ParserConfig::default(),
    )
    .collect()
    .await;

    assert_eq!(events[0], Ok(UnifiedEvent::text("hi")));
    assert!(events[1].as_ref().unwrap_err().is_transport());
}

// -- Family selection from configuration --

#[tokio::test]
async fn configured_family_drives_the_pipeline() {
    let config = Config::from_toml(
        r#"
        [families]
        default = "invoke_stream"
        converse_stream = ["^amazon\\.nova"]
        "#,
    )
    .unwrap();
    let selector = config.families.selector().unwrap();

    assert_eq!(selector.resolve("amazon.nova-pro-v1:0"), ProviderFamily::ConverseStream);

    let family = selector.resolve("anthropic.claude-3-haiku");
    assert_eq!(family, ProviderFamily::InvokeStream);

    let body = sse(&[json!({"type": "content_block_delta", "delta": {"type": "text_delta", "text": "ok"}})]);
    let events = run(vec![body], family, Framing::Sse).await;
    assert_eq!(events, vec![Ok(UnifiedEvent::text("ok"))]);
}
