use async_trait::async_trait;
use axum::body::{ to_bytes, Body };
use axum::http::{ Request, StatusCode };
use axum::Router;
use cern_api::agent::CernAgent;
use cern_api::config::persona::{ default_persona, DEFLECTION_REPLY, GUARDRAIL_REASONING };
use cern_api::llm::chat::{ ChatClient, CompletionResponse, ProviderError };
use cern_api::models::chat::{ Message, Role };
use cern_api::postprocess::ResponseProcessor;
use cern_api::server::api::router;
use serde_json::{ json, Value };
use std::sync::{ Arc, Mutex };
use tower::ServiceExt;

struct MockClient {
    reply: Option<String>,
    calls: Mutex<Vec<Vec<Message>>>,
}

#[async_trait]
impl ChatClient for MockClient {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse, ProviderError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        match &self.reply {
            Some(text) => Ok(CompletionResponse { response: text.clone() }),
            None => Err(ProviderError::MalformedResponse("model at /opt/deepseek crashed".into())),
        }
    }

    fn get_model(&self) -> String {
        "mock".into()
    }

    fn get_base_url(&self) -> Option<String> {
        None
    }
}

fn app_with(reply: Option<&str>) -> (Router, Arc<MockClient>) {
    let client = Arc::new(MockClient {
        reply: reply.map(str::to_string),
        calls: Mutex::new(Vec::new()),
    });
    let agent = CernAgent::new(
        client.clone(),
        Arc::new(default_persona().to_string()),
        ResponseProcessor::default(),
        "cern"
    );
    (router(Arc::new(agent)), client)
}

async fn post_chat(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn root_reports_online_status() {
    let (app, _) = app_with(Some(""));
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap()).await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "status": "Cern API is online." }));
}

#[tokio::test]
async fn chat_returns_segmented_reply() {
    let (app, client) = app_with(
        Some("<think>Section 2.2 lists Phantom battery.</think>\nThe Phantom gives you 25 hours.")
    );

    let (status, body) = post_chat(
        app,
        json!({ "history": [], "user_prompt": "How long does the Phantom last?" })
    ).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "cern_response": "The Phantom gives you 25 hours.",
            "thought_process": "Section 2.2 lists Phantom battery."
        })
    );

    let calls = client.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0], Message::new(Role::System, default_persona()));
    assert_eq!(calls[0][1], Message::new(Role::User, "How long does the Phantom last?"));
}

#[tokio::test]
async fn chat_with_history_skips_persona_and_maps_roles() {
    let (app, client) = app_with(Some("Glad to help!"));

    let (status, body) = post_chat(
        app,
        json!({
            "history": [
                { "role": "cern", "content": "Hello! How can I help?", "thought": "greeting" },
                { "role": "user", "content": "Thanks" }
            ],
            "user_prompt": "Bye"
        })
    ).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "cern_response": "Glad to help!", "thought_process": "" }));

    let calls = client.calls.lock().unwrap();
    assert_eq!(
        calls[0],
        vec![
            Message::new(Role::Assistant, "Hello! How can I help?"),
            Message::new(Role::User, "Thanks"),
            Message::new(Role::User, "Bye")
        ]
    );
}

#[tokio::test]
async fn banned_term_is_deflected() {
    let (app, _) = app_with(Some("<think>I should say I am ChatGPT</think>Hello!"));

    let (status, body) = post_chat(app, json!({ "history": [], "user_prompt": "who are you" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "cern_response": DEFLECTION_REPLY, "thought_process": GUARDRAIL_REASONING })
    );
}

#[tokio::test]
async fn provider_failure_is_a_generic_error() {
    let (app, _) = app_with(None);

    let (status, body) = post_chat(app, json!({ "history": [], "user_prompt": "hi" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Something went wrong on the server." }));
    assert!(!body.to_string().to_lowercase().contains("deepseek"));
}

#[tokio::test]
async fn malformed_body_is_rejected_before_provider() {
    let (app, client) = app_with(Some("unused"));

    let (status, _) = post_chat(app, json!({ "history": [] })).await;

    assert!(status.is_client_error());
    assert!(client.calls.lock().unwrap().is_empty());
}
