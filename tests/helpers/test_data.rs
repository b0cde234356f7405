//! Test data builders
//!
//! Telegram objects are built from Bot API JSON so the tests do not depend on
//! the exact field layout of teloxide's types.

use serde_json::{json, Value};
use teloxide::types::{CallbackQuery, Message};
use herald::database::{ChatStore, MemoryStore};
use herald::models::{ChatType, NewChat};

pub fn user_json(user_id: i64, first_name: &str) -> Value {
    json!({ "id": user_id, "is_bot": false, "first_name": first_name, "language_code": "en" })
}

/// A text message sent by `user_id` in a private chat or, for negative ids, a group
pub fn create_test_message(message_id: i32, chat_id: i64, user_id: i64, text: &str) -> Message {
    let chat = if chat_id > 0 {
        json!({ "id": chat_id, "type": "private", "first_name": "Tester" })
    } else {
        json!({ "id": chat_id, "type": "supergroup", "title": "Test Group" })
    };

    serde_json::from_value(json!({
        "message_id": message_id,
        "date": 1_700_000_000,
        "chat": chat,
        "from": user_json(user_id, "Tester"),
        "text": text,
    }))
    .expect("valid message json")
}

/// A message that was forwarded from another user
pub fn create_forwarded_message(message_id: i32, chat_id: i64, user_id: i64) -> Message {
    serde_json::from_value(json!({
        "message_id": message_id,
        "date": 1_700_000_000,
        "chat": { "id": chat_id, "type": "private", "first_name": "Tester" },
        "from": user_json(user_id, "Tester"),
        "forward_origin": {
            "type": "user",
            "date": 1_690_000_000,
            "sender_user": user_json(4242, "Original Author"),
        },
        "text": "forwarded announcement",
    }))
    .expect("valid forwarded message json")
}

/// A button press on a message the bot sent in a private chat
pub fn create_callback_query(data: &str, chat_id: i64, message_id: i32) -> CallbackQuery {
    serde_json::from_value(json!({
        "id": "cbq-1",
        "from": user_json(chat_id, "Tester"),
        "chat_instance": "instance-1",
        "data": data,
        "message": {
            "message_id": message_id,
            "date": 1_700_000_000,
            "chat": { "id": chat_id, "type": "private", "first_name": "Tester" },
            "text": "greeting",
        },
    }))
    .expect("valid callback query json")
}

/// Fill a memory store with chats, in order
pub async fn seed_store(chats: &[(i64, ChatType)]) -> MemoryStore {
    let store = MemoryStore::new();
    for (chat_id, chat_type) in chats {
        store
            .record_chat(&NewChat { chat_id: *chat_id, title: None, chat_type: *chat_type })
            .await
            .expect("memory store insert");
    }
    store
}
