//! Chat registration and logger chat posts against a mocked Bot API

mod helpers;

use helpers::*;
use herald::config::I18nConfig;
use herald::database::ChatStore;
use herald::i18n::I18n;
use herald::models::ChatType;
use herald::services::{registry, ChatLogger};
use serial_test::serial;

const LOGGER_CHAT: i64 = -999;

#[tokio::test]
#[serial]
async fn test_first_private_message_posts_new_user() {
    let mock = TelegramMockServer::new().await;
    mock.mock_ok("sendMessage", message_json(1, LOGGER_CHAT, "logged")).await;

    let store = seed_store(&[]).await;
    let logger = ChatLogger::new(mock.bot(), Some(LOGGER_CHAT));
    let i18n = I18n::new(&I18nConfig::default()).unwrap();

    let msg = create_test_message(10, 77, 77, "hello");
    let first = registry::register_message(&store, &msg).await.unwrap();
    assert!(first.is_new_private_chat());
    logger.new_user(&i18n, msg.from.as_ref().unwrap()).await.unwrap();

    let again = registry::register_message(&store, &create_test_message(11, 77, 77, "again")).await.unwrap();
    assert!(!again.is_new_private_chat());

    let posts = mock.bodies_for("sendMessage").await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["chat_id"], LOGGER_CHAT);
    assert_eq!(posts[0]["parse_mode"], "HTML");
    let text = posts[0]["text"].as_str().unwrap();
    assert!(text.starts_with("#NewUser"));
    assert!(text.contains("<code>77</code>"));

    assert_eq!(store.count_chats(ChatType::Private).await.unwrap(), 1);
    assert_eq!(store.count_users().await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn test_group_message_records_group_and_sender() {
    let store = seed_store(&[]).await;

    let outcome = registry::register_message(&store, &create_test_message(1, -500, 8, "hi all")).await.unwrap();

    assert!(outcome.new_chat);
    assert!(outcome.new_user);
    assert!(!outcome.is_new_private_chat());
    let chats = store.list_chats().await.unwrap();
    assert_eq!(chats[0].chat_type, ChatType::Group);
    assert_eq!(chats[0].title.as_deref(), Some("Test Group"));
}

#[tokio::test]
#[serial]
async fn test_group_join_and_leave_lines() {
    let mock = TelegramMockServer::new().await;
    mock.mock_ok("sendMessage", message_json(1, LOGGER_CHAT, "logged")).await;

    let logger = ChatLogger::new(mock.bot(), Some(LOGGER_CHAT));
    let i18n = I18n::new(&I18nConfig::default()).unwrap();
    let admin: teloxide::types::User = serde_json::from_value(user_json(5, "Alice")).unwrap();

    logger.new_group(&i18n, -100, Some("Night <Owls>"), &admin).await.unwrap();
    logger.left_group(&i18n, -100, Some("Night <Owls>"), &admin).await.unwrap();

    let posts = mock.bodies_for("sendMessage").await;
    assert_eq!(posts.len(), 2);
    let joined = posts[0]["text"].as_str().unwrap();
    assert!(joined.starts_with("#NewGroup"));
    assert!(joined.contains("Night &lt;Owls&gt;"));
    assert!(joined.contains("Alice"));
    assert!(posts[1]["text"].as_str().unwrap().starts_with("#LeftGroup"));
}

#[tokio::test]
#[serial]
async fn test_logger_failure_is_reported() {
    let mock = TelegramMockServer::new().await;
    mock.mock_error_for_chat("sendMessage", LOGGER_CHAT, 400, "Bad Request: chat not found").await;

    let logger = ChatLogger::new(mock.bot(), Some(LOGGER_CHAT));
    let i18n = I18n::new(&I18nConfig::default()).unwrap();
    let user: teloxide::types::User = serde_json::from_value(user_json(5, "Alice")).unwrap();

    assert!(logger.new_user(&i18n, &user).await.is_err());
}
