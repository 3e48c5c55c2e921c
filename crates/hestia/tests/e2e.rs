// SPDX-FileCopyrightText: 2026 Hestia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests through the HTTP surface with a scripted provider.

use hestia_core::types::Role;
use hestia_graph::ThreadStore;
use hestia_router::{Category, Persona};
use hestia_test_utils::{HttpReply, MockReply, TestHarness};
use serde_json::{Value, json};

fn content(reply: &HttpReply) -> String {
    reply.json()["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

async fn issue_type(harness: &TestHarness, thread_id: &str) -> Option<Category> {
    harness
        .store
        .load(thread_id)
        .await
        .unwrap()
        .and_then(|state| state.issue_type)
}

// --- Scenarios ---

#[tokio::test]
async fn boiler_question_routes_to_heating() {
    let harness = TestHarness::builder()
        .with_replies([
            MockReply::text("heating"),
            MockReply::text("Check the pressure gauge on your boiler."),
        ])
        .build();

    let reply = harness
        .chat(&["My boiler keeps cutting out"], Some("scenario-a"), false)
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert!(!content(&reply).is_empty());
    assert_eq!(issue_type(&harness, "scenario-a").await, Some(Category::Heating));

    let requests = harness.provider.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[1].messages[0].content,
        Persona::builtin(Category::Heating).system_prompt
    );
}

#[tokio::test]
async fn mould_question_routes_to_damp() {
    let harness = TestHarness::builder()
        .with_replies([
            MockReply::text("damp"),
            MockReply::text("Improve ventilation and treat the mould."),
        ])
        .build();

    let reply = harness
        .chat(&["There's black mould on my bathroom ceiling"], Some("scenario-b"), false)
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(issue_type(&harness, "scenario-b").await, Some(Category::Damp));
}

#[tokio::test]
async fn unparseable_classification_falls_back_to_general() {
    let harness = TestHarness::builder()
        .with_replies([
            MockReply::text("I am not sure what this is about"),
            MockReply::text("Could you tell me more about the problem?"),
        ])
        .build();

    let reply = harness
        .chat(&["qwerty asdf"], Some("scenario-c"), false)
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(issue_type(&harness, "scenario-c").await, Some(Category::General));
    assert_eq!(
        harness.provider.requests()[1].messages[0].content,
        Persona::builtin(Category::General).system_prompt
    );
}

#[tokio::test]
async fn unknown_model_is_not_found() {
    let harness = TestHarness::builder().build();

    let body = json!({
        "model": "nonexistent-graph",
        "messages": [{"role": "user", "content": "hello"}]
    });
    let reply = harness
        .post_json("/v1/chat/completions", &body, None)
        .await
        .unwrap();

    assert_eq!(reply.status, 404);
    assert!(
        reply.json()["detail"]
            .as_str()
            .unwrap()
            .contains("nonexistent-graph")
    );
    assert_eq!(harness.provider.request_count(), 0);
}

#[tokio::test]
async fn shared_thread_accumulates_history() {
    let harness = TestHarness::builder()
        .with_replies([
            MockReply::text("heating"),
            MockReply::text("Is the pilot light on?"),
            MockReply::text("heating"),
            MockReply::text("Then call an engineer."),
        ])
        .build();

    let first = harness
        .chat(&["My boiler keeps cutting out"], Some("scenario-e"), false)
        .await
        .unwrap();
    assert_eq!(first.status, 200);

    let second = harness
        .chat(&["Yes, the pilot light is on"], Some("scenario-e"), false)
        .await
        .unwrap();
    assert_eq!(second.status, 200);
    assert_eq!(content(&second), "Then call an engineer.");

    let requests = harness.provider.requests();
    assert_eq!(requests.len(), 4);
    let seen: Vec<&str> = requests[3]
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert!(seen.contains(&"My boiler keeps cutting out"));
    assert!(seen.contains(&"Is the pilot light on?"));
    assert!(seen.contains(&"Yes, the pilot light is on"));

    let state = harness.store.load("scenario-e").await.unwrap().unwrap();
    assert_eq!(state.messages.len(), 4);
}

#[tokio::test]
async fn separate_threads_do_not_share_history() {
    let harness = TestHarness::builder().build();

    harness.chat(&["first"], Some("thread-one"), false).await.unwrap();
    harness.chat(&["second"], Some("thread-two"), false).await.unwrap();

    assert_eq!(harness.store.len(), 2);
    let last = harness.provider.requests().pop().unwrap();
    assert!(last.messages.iter().all(|m| m.content != "first"));
}

#[tokio::test]
async fn requests_without_thread_id_are_not_stored() {
    let harness = TestHarness::builder().build();

    for _ in 0..5 {
        let reply = harness.chat(&["hello"], None, false).await.unwrap();
        assert_eq!(reply.status, 200);
    }
    let streamed = harness.chat(&["hello"], None, true).await.unwrap();
    assert_eq!(streamed.sse_data().last().map(String::as_str), Some("[DONE]"));

    assert!(harness.store.is_empty());
}

// --- Response shapes ---

#[tokio::test]
async fn blocking_completion_has_one_stop_choice() {
    let harness = TestHarness::builder()
        .with_replies([MockReply::text("repairs"), MockReply::text("Turn off the water.")])
        .build();

    let reply = harness.chat(&["My tap is leaking"], None, false).await.unwrap();
    let json = reply.json();

    assert_eq!(reply.status, 200);
    assert_eq!(json["object"], "chat.completion");
    assert_eq!(json["model"], "uk_housing");
    assert!(json["id"].as_str().unwrap().starts_with("chatcmpl-"));
    let choices = json["choices"].as_array().unwrap();
    assert_eq!(choices.len(), 1);
    assert_eq!(choices[0]["finish_reason"], "stop");
    assert_eq!(choices[0]["message"]["role"], "assistant");

    let usage = &json["usage"];
    assert_eq!(usage["prompt_tokens"], "My tap is leaking".len());
    assert_eq!(usage["completion_tokens"], "Turn off the water.".len());
    assert_eq!(
        usage["total_tokens"],
        "My tap is leaking".len() + "Turn off the water.".len()
    );
}

#[tokio::test]
async fn streaming_emits_deltas_then_stop_then_done() {
    let harness = TestHarness::builder()
        .with_replies([
            MockReply::text("heating"),
            MockReply::text("Try resetting the boiler"),
        ])
        .build();

    let reply = harness.chat(&["No hot water"], None, true).await.unwrap();

    assert_eq!(reply.status, 200);
    let content_type = reply.headers["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));
    assert_eq!(reply.headers["cache-control"], "no-cache");
    assert_eq!(reply.headers["x-accel-buffering"], "no");

    let frames = reply.sse_data();
    assert_eq!(frames.last().map(String::as_str), Some("[DONE]"));

    let chunks: Vec<Value> = frames[..frames.len() - 1]
        .iter()
        .map(|f| serde_json::from_str(f).unwrap())
        .collect();
    let (stop, deltas) = chunks.split_last().unwrap();

    assert_eq!(stop["choices"][0]["finish_reason"], "stop");
    assert!(deltas.iter().all(|c| c["choices"][0]["finish_reason"].is_null()));
    assert!(chunks.iter().all(|c| c["object"] == "chat.completion.chunk"));
    assert!(chunks.iter().all(|c| c["id"] == chunks[0]["id"]));

    let text: String = deltas
        .iter()
        .map(|c| c["choices"][0]["delta"]["content"].as_str().unwrap())
        .collect();
    assert_eq!(text, "Try resetting the boiler");
}

#[tokio::test]
async fn streaming_failure_emits_error_frame_and_stops() {
    let harness = TestHarness::builder()
        .with_replies([
            MockReply::text("damp"),
            MockReply::StreamFailure {
                partial: "Open a".into(),
                message: "upstream connection reset".into(),
            },
        ])
        .build();

    let reply = harness.chat(&["Condensation everywhere"], Some("broken"), true).await.unwrap();

    assert_eq!(reply.status, 200);
    let frames = reply.sse_data();
    assert!(!frames.iter().any(|f| f == "[DONE]"));
    let last: Value = serde_json::from_str(frames.last().unwrap()).unwrap();
    assert!(
        last["error"]["message"]
            .as_str()
            .unwrap()
            .contains("upstream connection reset")
    );
    assert!(harness.store.load("broken").await.unwrap().is_none());
}

#[tokio::test]
async fn upstream_failure_is_server_error() {
    let harness = TestHarness::builder()
        .with_replies([MockReply::text("heating"), MockReply::Failure("API returned 502".into())])
        .build();

    let reply = harness.chat(&["Radiator cold"], None, false).await.unwrap();

    assert_eq!(reply.status, 500);
    let detail = reply.json()["detail"].as_str().unwrap().to_string();
    assert!(detail.starts_with("Error processing request"));
    assert!(detail.contains("API returned 502"));
}

#[tokio::test]
async fn specialist_tool_calls_feed_back_into_reply() {
    let harness = TestHarness::builder()
        .with_replies([
            MockReply::text("repairs"),
            MockReply::tool_call(
                "schedule_engineer",
                r#"{"issue_type": "leaking pipe", "urgency": "high"}"#,
            ),
            MockReply::text("An engineer is booked."),
        ])
        .build();

    let reply = harness.chat(&["Water is pouring from a pipe"], Some("tools"), false).await.unwrap();

    assert_eq!(content(&reply), "An engineer is booked.");
    let requests = harness.provider.requests();
    assert_eq!(requests.len(), 3);
    let tool_result = requests[2]
        .messages
        .iter()
        .find(|m| m.role == Role::Tool)
        .unwrap();
    assert_eq!(
        tool_result.content,
        "Engineer scheduled for leaking pipe (urgency: high)"
    );
}

// --- Validation, discovery, auth ---

#[tokio::test]
async fn malformed_body_is_unprocessable() {
    let harness = TestHarness::builder().build();

    let body = json!({"model": "uk_housing", "messages": "not a list"});
    let reply = harness
        .post_json("/v1/chat/completions", &body, None)
        .await
        .unwrap();

    assert_eq!(reply.status, 422);
    assert!(reply.json()["detail"].is_string());
}

#[tokio::test]
async fn out_of_range_sampling_is_unprocessable() {
    let harness = TestHarness::builder().build();

    let body = json!({
        "model": "uk_housing",
        "messages": [{"role": "user", "content": "hi"}],
        "temperature": 3.0
    });
    let reply = harness
        .post_json("/v1/chat/completions", &body, None)
        .await
        .unwrap();

    assert_eq!(reply.status, 422);
    assert!(reply.json()["detail"].as_str().unwrap().contains("temperature"));
    assert_eq!(harness.provider.request_count(), 0);
}

#[tokio::test]
async fn unknown_roles_are_ignored() {
    let harness = TestHarness::builder()
        .with_replies([MockReply::text("general"), MockReply::text("Hello!")])
        .build();

    let body = json!({
        "model": "uk_housing",
        "messages": [
            {"role": "function", "content": "ignored"},
            {"role": "user", "content": "hi"}
        ]
    });
    let reply = harness
        .post_json("/v1/chat/completions", &body, None)
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    let classifier_request = &harness.provider.requests()[0];
    assert!(classifier_request.messages.iter().all(|m| m.content != "ignored"));
}

#[tokio::test]
async fn models_lists_the_routing_graph() {
    let harness = TestHarness::builder().build();

    let list = harness.get("/v1/models", None).await.unwrap();
    assert_eq!(list.status, 200);
    assert_eq!(list.json()["object"], "list");
    assert_eq!(list.json()["data"][0]["id"], "uk_housing");
    assert_eq!(list.json()["data"][0]["object"], "model");

    let one = harness.get("/v1/models/uk_housing", None).await.unwrap();
    assert_eq!(one.status, 200);
    assert_eq!(one.json()["id"], "uk_housing");

    let missing = harness.get("/v1/models/nope", None).await.unwrap();
    assert_eq!(missing.status, 404);
}

#[tokio::test]
async fn health_reports_service() {
    let harness = TestHarness::builder().build();
    let reply = harness.get("/v1/health", None).await.unwrap();
    assert_eq!(reply.status, 200);
    assert_eq!(reply.json(), json!({"status": "ok", "service": "hestia-openai-compat"}));
}

#[tokio::test]
async fn bearer_token_guards_v1_routes() {
    let harness = TestHarness::builder().with_bearer_token("s3cret").build();

    let denied = harness.get("/v1/models", None).await.unwrap();
    assert_eq!(denied.status, 401);

    let wrong = harness.get("/v1/models", Some("guess")).await.unwrap();
    assert_eq!(wrong.status, 401);

    let allowed = harness.get("/v1/models", Some("s3cret")).await.unwrap();
    assert_eq!(allowed.status, 200);

    let public = harness.get("/health", None).await.unwrap();
    assert_eq!(public.status, 200);
}
