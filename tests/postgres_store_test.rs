//! PostgreSQL store tests
//!
//! Run only when `TEST_DATABASE_URL` points at a disposable database; the
//! tables are truncated before each test.

use herald::config::DatabaseConfig;
use herald::database::{create_pool, run_migrations, ChatStore, DatabaseService};
use herald::models::{ChatType, NewChat};
use serial_test::serial;

async fn setup() -> Option<DatabaseService> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set, skipping PostgreSQL test");
            return None;
        }
    };

    let config = DatabaseConfig { url, max_connections: 2, ..Default::default() };
    let pool = create_pool(&config).await.expect("connect to test database");
    run_migrations(&pool).await.expect("run migrations");
    sqlx::query("TRUNCATE chats, users, blocked")
        .execute(&pool)
        .await
        .expect("truncate tables");

    Some(DatabaseService::new(pool))
}

fn chat(chat_id: i64, chat_type: ChatType, title: Option<&str>) -> NewChat {
    NewChat { chat_id, title: title.map(str::to_string), chat_type }
}

#[tokio::test]
#[serial]
async fn test_record_chat_once() {
    let Some(db) = setup().await else { return };

    assert!(db.record_chat(&chat(-100, ChatType::Group, Some("Crew"))).await.unwrap());
    assert!(!db.record_chat(&chat(-100, ChatType::Group, Some("Renamed"))).await.unwrap());

    let stored = db.chats.find(-100).await.unwrap().unwrap();
    assert_eq!(stored.title.as_deref(), Some("Crew"));
    assert_eq!(stored.chat_type, ChatType::Group);
}

#[tokio::test]
#[serial]
async fn test_list_remove_and_counts() {
    let Some(db) = setup().await else { return };

    db.record_chat(&chat(1, ChatType::Private, None)).await.unwrap();
    db.record_chat(&chat(-2, ChatType::Group, Some("G"))).await.unwrap();
    db.record_chat(&chat(3, ChatType::Private, None)).await.unwrap();
    db.record_user(1).await.unwrap();
    db.record_user(1).await.unwrap();

    let ids: Vec<i64> = db.list_chats().await.unwrap().iter().map(|c| c.chat_id).collect();
    assert_eq!(ids, vec![1, -2, 3]);

    assert_eq!(db.count_chats(ChatType::Private).await.unwrap(), 2);
    assert_eq!(db.count_chats(ChatType::Group).await.unwrap(), 1);
    assert_eq!(db.count_users().await.unwrap(), 1);
    assert!(db.users.find(1).await.unwrap().is_some());

    assert!(db.remove_chat(-2).await.unwrap());
    assert!(!db.remove_chat(-2).await.unwrap());
    assert_eq!(db.count_chats(ChatType::Group).await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn test_mark_blocked_upserts() {
    let Some(db) = setup().await else { return };

    db.mark_blocked(5, "Forbidden: bot was blocked by the user").await.unwrap();
    db.mark_blocked(5, "Forbidden: user is deactivated").await.unwrap();

    assert_eq!(db.count_blocked().await.unwrap(), 1);
    let record = db.blocked.find(5).await.unwrap().unwrap();
    assert_eq!(record.reason.as_deref(), Some("Forbidden: user is deactivated"));
    db.health_check().await.unwrap();
}
