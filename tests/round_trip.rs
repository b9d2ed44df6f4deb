//! End-to-end round trip against mock model and stats servers.

use serde_json::json;
use statline::agent::run_conversation;
use statline::config::{StatlineConfig, DEFAULT_FOLLOWUP, DEFAULT_QUESTION};
use statline::inference::InferenceClient;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(message: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gemini-2.0-flash",
        "choices": [{ "index": 0, "message": message, "finish_reason": "stop" }],
        "usage": { "prompt_tokens": 40, "completion_tokens": 12, "total_tokens": 52 }
    })
}

fn tool_call_message() -> serde_json::Value {
    json!({
        "role": "assistant",
        "content": null,
        "tool_calls": [{
            "id": "call_curry",
            "type": "function",
            "function": {
                "name": "get_player_stats",
                "arguments": "{\"player_name\":\"Stephen Curry\",\"season\":2016}"
            }
        }]
    })
}

/// Serve `first` to the first chat request and `second` to any later one.
async fn mount_model(server: &MockServer, first: serde_json::Value, second: serde_json::Value) {
    let counter = Arc::new(AtomicUsize::new(0));
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer model-key"))
        .respond_with(move |_req: &wiremock::Request| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(200).set_body_json(completion(first.clone()))
            } else {
                ResponseTemplate::new(200).set_body_json(completion(second.clone()))
            }
        })
        .mount(server)
        .await;
}

async fn mount_stats(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 115,
                "first_name": "Stephen",
                "last_name": "Curry",
                "position": "G",
                "team": { "full_name": "Golden State Warriors" }
            }]
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/season_averages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "pts": 25.3, "reb": 4.5, "ast": 6.6, "stl": 1.8, "blk": 0.22, "min": "33:22" }]
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn config_for(model: &MockServer, stats: &MockServer) -> StatlineConfig {
    StatlineConfig {
        inference_base_url: model.uri(),
        inference_api_key: "model-key".into(),
        stats_base_url: stats.uri(),
        stats_api_key: "stats-key".into(),
        ..StatlineConfig::default()
    }
}

fn client_for(cfg: &StatlineConfig) -> InferenceClient {
    InferenceClient::new(&cfg.inference_base_url, &cfg.inference_api_key, &cfg.model)
}

async fn chat_bodies(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.body_json::<serde_json::Value>().unwrap())
        .collect()
}

#[tokio::test]
async fn curry_question_round_trips_through_tool() {
    let model_server = MockServer::start().await;
    let stats_server = MockServer::start().await;
    mount_model(
        &model_server,
        tool_call_message(),
        json!({
            "role": "assistant",
            "content": "In 2016 Stephen Curry averaged 25.3 points, 4.5 rebounds and 6.6 assists."
        }),
    )
    .await;
    mount_stats(&stats_server).await;

    let cfg = config_for(&model_server, &stats_server);
    let registry = statline::default_registry(&cfg);
    let outcome = run_conversation(&client_for(&cfg), &registry, DEFAULT_QUESTION, DEFAULT_FOLLOWUP)
        .await
        .unwrap();

    assert!(outcome.answer.contains("25.3"));
    let result = outcome.tool_result.expect("tool should have run");
    assert!(result.success);
    let record: serde_json::Value = serde_json::from_str(&result.output).unwrap();
    assert_eq!(record["name"], "Stephen Curry");
    assert_eq!(record["season"], 2016);

    let bodies = chat_bodies(&model_server).await;
    assert_eq!(bodies.len(), 2);

    // First call: one user message, tool bound, deterministic sampling.
    assert_eq!(bodies[0]["temperature"], 0.0);
    assert_eq!(bodies[0]["messages"].as_array().unwrap().len(), 1);
    assert_eq!(bodies[0]["tools"][0]["function"]["name"], "get_player_stats");

    // Second call: user, assistant (with its tool call), tool result.
    let messages = bodies[1]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], DEFAULT_FOLLOWUP);
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["tool_calls"][0]["id"], "call_curry");
    assert_eq!(messages[2]["role"], "tool");
    assert_eq!(messages[2]["tool_call_id"], "call_curry");
    assert!(bodies[1].get("tools").is_none());
    assert_eq!(bodies[1]["temperature"], 0.0);
}

#[tokio::test]
async fn direct_answer_makes_one_call_and_no_lookup() {
    let model_server = MockServer::start().await;
    let stats_server = MockServer::start().await;
    mount_model(
        &model_server,
        json!({ "role": "assistant", "content": "Curry was the 2016 MVP." }),
        json!({ "role": "assistant", "content": "unreachable" }),
    )
    .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&stats_server)
        .await;

    let cfg = config_for(&model_server, &stats_server);
    let registry = statline::default_registry(&cfg);
    let outcome = run_conversation(&client_for(&cfg), &registry, "Who won MVP in 2016?", "x")
        .await
        .unwrap();

    assert_eq!(outcome.answer, "Curry was the 2016 MVP.");
    assert!(!outcome.used_tool());
    assert_eq!(chat_bodies(&model_server).await.len(), 1);
}

#[tokio::test]
async fn stats_outage_is_relayed_to_model_as_error() {
    let model_server = MockServer::start().await;
    let stats_server = MockServer::start().await;
    mount_model(
        &model_server,
        tool_call_message(),
        json!({ "role": "assistant", "content": "The stats service is unavailable." }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/players"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&stats_server)
        .await;

    let cfg = config_for(&model_server, &stats_server);
    let registry = statline::default_registry(&cfg);
    let outcome = run_conversation(&client_for(&cfg), &registry, DEFAULT_QUESTION, DEFAULT_FOLLOWUP)
        .await
        .unwrap();

    assert_eq!(outcome.answer, "The stats service is unavailable.");
    let bodies = chat_bodies(&model_server).await;
    assert_eq!(bodies[1]["messages"][2]["content"], "Error");
}

#[tokio::test]
async fn model_http_failure_is_fatal() {
    let model_server = MockServer::start().await;
    let stats_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
        .mount(&model_server)
        .await;

    let cfg = config_for(&model_server, &stats_server);
    let registry = statline::default_registry(&cfg);
    let err = run_conversation(&client_for(&cfg), &registry, DEFAULT_QUESTION, DEFAULT_FOLLOWUP)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("400"));
}
