//! Mock Telegram API Server for testing
//!
//! A wiremock server standing in for the Bot API. Responses can be scripted
//! per target chat so a single broadcast can hit successes and failures.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

pub const TEST_TOKEN: &str = "12345:test_token";
pub const BOT_ID: u64 = 12345;

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    pub async fn new() -> Self {
        Self { server: MockServer::start().await }
    }

    /// A bot whose requests go to this server
    pub fn bot(&self) -> Bot {
        let url = url::Url::parse(&self.server.uri()).expect("mock server uri");
        Bot::new(TEST_TOKEN).set_api_url(url)
    }

    fn endpoint(api_method: &str) -> String {
        // teloxide requests methods in PascalCase (e.g. `CopyMessage`)
        let mut chars = api_method.chars();
        let method = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("/bot{}/{}", TEST_TOKEN, method)
    }

    /// Respond to every call of `api_method` with `result`
    pub async fn mock_ok(&self, api_method: &str, result: Value) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint(api_method)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": result })))
            .mount(&self.server)
            .await;
    }

    /// Fail every call of `api_method` with an API error
    pub async fn mock_error(&self, api_method: &str, code: u16, description: &str) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint(api_method)))
            .respond_with(ResponseTemplate::new(code).set_body_json(json!({
                "ok": false,
                "error_code": code,
                "description": description,
            })))
            .mount(&self.server)
            .await;
    }

    /// Respond to calls of `api_method` addressed to `chat_id` with an API error
    pub async fn mock_error_for_chat(&self, api_method: &str, chat_id: i64, code: u16, description: &str) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint(api_method)))
            .and(body_partial_json(json!({ "chat_id": chat_id })))
            .respond_with(ResponseTemplate::new(code).set_body_json(json!({
                "ok": false,
                "error_code": code,
                "description": description,
            })))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Answer `api_method` for `chat_id` the way Telegram does for a group
    /// that was upgraded to the supergroup `new_chat_id`
    pub async fn mock_migrated_for_chat(&self, api_method: &str, chat_id: i64, new_chat_id: i64) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint(api_method)))
            .and(body_partial_json(json!({ "chat_id": chat_id })))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: group chat was upgraded to a supergroup chat",
                "parameters": { "migrate_to_chat_id": new_chat_id },
            })))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Respond to calls of `api_method` addressed to `chat_id` with `result`
    pub async fn mock_ok_for_chat(&self, api_method: &str, chat_id: i64, result: Value) {
        Mock::given(method("POST"))
            .and(path(Self::endpoint(api_method)))
            .and(body_partial_json(json!({ "chat_id": chat_id })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": result })))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Mocks every call a broadcast makes, all succeeding
    pub async fn setup_broadcast_mocks(&self) {
        self.mock_ok("sendMessage", message_json(500, 1, "status")).await;
        self.mock_ok("editMessageText", message_json(500, 1, "status")).await;
        self.mock_ok("copyMessage", json!({ "message_id": 777 })).await;
        self.mock_ok("forwardMessage", message_json(778, 1, "forwarded")).await;
    }

    /// Requests received for one Bot API method, oldest first
    pub async fn requests_for(&self, api_method: &str) -> Vec<Request> {
        let endpoint = Self::endpoint(api_method);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.url.path() == endpoint)
            .collect()
    }

    /// Raw bodies, for multipart requests such as `sendPhoto`
    pub async fn raw_bodies_for(&self, api_method: &str) -> Vec<String> {
        self.requests_for(api_method)
            .await
            .iter()
            .map(|req| String::from_utf8_lossy(&req.body).into_owned())
            .collect()
    }

    /// JSON bodies of the requests received for one Bot API method
    pub async fn bodies_for(&self, api_method: &str) -> Vec<Value> {
        self.requests_for(api_method)
            .await
            .iter()
            .map(|req| serde_json::from_slice(&req.body).expect("json request body"))
            .collect()
    }

    /// Target chat ids of the requests received for one Bot API method
    pub async fn chat_ids_for(&self, api_method: &str) -> Vec<i64> {
        self.bodies_for(api_method)
            .await
            .iter()
            .filter_map(|body| body["chat_id"].as_i64())
            .collect()
    }
}

/// A plain text message from a private chat, as the Bot API returns it
pub fn message_json(message_id: i32, chat_id: i64, text: &str) -> Value {
    json!({
        "message_id": message_id,
        "date": 1_700_000_000,
        "chat": { "id": chat_id, "type": "private", "first_name": "Owner" },
        "text": text,
    })
}

/// A `getChatMember` result with the given status for the bot itself
pub fn chat_member_json(status: &str) -> Value {
    let mut member = json!({
        "user": { "id": BOT_ID, "is_bot": true, "first_name": "Herald", "username": "herald_bot" },
        "status": status,
    });
    if status == "creator" {
        member["is_anonymous"] = json!(false);
    }
    member
}
