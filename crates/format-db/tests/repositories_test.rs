//! Integration tests against a live PostgreSQL instance.
//!
//! Run with `cargo test -p format-db -- --ignored` after pointing
//! `DATABASE_URL` at a disposable database.

use format_db::test_fixtures::{connect_test_database, unique_user_id};
use format_db::{
    HistoryRepository, KnowledgeRepository, NewKnowledgeEntry, NewQuestionHistory,
    NewSearchHistory, SearchCategory, SearchResult, TrainingCategory, TrainingRepository,
};

fn init_env() {
    dotenvy::dotenv().ok();
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_knowledge_insert_feedback_and_weight() {
    init_env();
    let db = connect_test_database().await.expect("connect");

    let id = db
        .knowledge
        .insert(NewKnowledgeEntry::new(
            "test",
            &format!("integration-{}", uuid::Uuid::new_v4()),
            "integration response",
            4,
        ))
        .await
        .expect("insert");

    db.knowledge.increment_usage(id).await.expect("usage");
    db.knowledge.adjust_feedback(id, -1).await.expect("feedback");
    db.knowledge.set_weight(id, 2).await.expect("weight");

    let entry = db.knowledge.get(id).await.expect("get").expect("exists");
    assert_eq!(entry.usage_count, 1);
    assert_eq!(entry.feedback, -1);
    assert_eq!(entry.weight, 2);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_adjust_feedback_missing_entry() {
    init_env();
    let db = connect_test_database().await.expect("connect");

    let err = db
        .knowledge
        .adjust_feedback(uuid::Uuid::new_v4(), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, format_db::Error::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_training_record_processed_once() {
    init_env();
    let db = connect_test_database().await.expect("connect");

    let id = db
        .training
        .insert("integration unknown query", TrainingCategory::Unknown, None)
        .await
        .expect("insert");

    assert!(db.training.mark_processed(id).await.expect("first"));
    assert!(!db.training.mark_processed(id).await.expect("second"));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_history_round_trip_newest_first() {
    init_env();
    let db = connect_test_database().await.expect("connect");
    let user = unique_user_id("it");

    for q in ["first", "second"] {
        db.history
            .insert_search(NewSearchHistory {
                user_id: user.clone(),
                query: q.to_string(),
                summary: format!("Searched: \"{}\"", q),
                results: vec![SearchResult {
                    title: "Rust".into(),
                    url: "https://www.rust-lang.org".into(),
                    description: "A language".into(),
                    category: SearchCategory::Web,
                }],
            })
            .await
            .expect("insert search");
    }

    let searches = db
        .history
        .list_search_for_user(&user, 5)
        .await
        .expect("list");
    assert_eq!(searches.len(), 2);
    assert_eq!(searches[0].query, "second");
    assert_eq!(searches[0].results[0].title, "Rust");

    db.history
        .insert_question(NewQuestionHistory {
            user_id: user.clone(),
            question: "what is rust?".into(),
            summary: "Q: what is rust?...".into(),
            answer: "A language".into(),
        })
        .await
        .expect("insert question");

    let questions = db
        .history
        .list_questions_for_user(&user, 5)
        .await
        .expect("list questions");
    assert_eq!(questions.len(), 1);
}
