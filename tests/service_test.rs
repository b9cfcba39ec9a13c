//! End-to-end service flow against the in-memory backend: signup, login,
//! feedback lifecycle, catalog stability.

use std::sync::Arc;

use cinepulse::auth::CredentialService;
use cinepulse::catalog::CATALOG_LEN;
use cinepulse::error::ApiError;
use cinepulse::feedback::FeedbackService;
use cinepulse::model::{FeedbackRequest, FeedbackUpdate, LoginRequest, SignupRequest};
use cinepulse::notify::NoopNotifier;
use cinepulse::session::SessionStore;
use cinepulse::storage::{MemoryBackend, StorageBackend};

const TEST_COST: u32 = 4; // bcrypt minimum

struct Services {
    auth: CredentialService,
    feedback: FeedbackService,
    sessions: SessionStore,
    storage: Arc<MemoryBackend>,
}

fn services() -> Services {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .try_init();

    let storage = Arc::new(MemoryBackend::new());
    Services {
        auth: CredentialService::new(storage.clone() as Arc<dyn StorageBackend>)
            .with_cost(TEST_COST),
        feedback: FeedbackService::new(
            storage.clone() as Arc<dyn StorageBackend>,
            Arc::new(NoopNotifier),
            false,
        ),
        sessions: SessionStore::new(),
        storage,
    }
}

fn signup(email: &str) -> SignupRequest {
    SignupRequest {
        id: None,
        name: "Alice".to_string(),
        email: email.to_string(),
        password: "hunter2".to_string(),
        role: "user".to_string(),
    }
}

fn feedback(id: &str, user_id: &str, created_at: &str) -> FeedbackRequest {
    FeedbackRequest {
        id: Some(id.to_string()),
        movie_id: "t1".to_string(),
        user_id: user_id.to_string(),
        user_name: "Alice".to_string(),
        rating: 4,
        text: "loved it".to_string(),
        created_at: created_at.to_string(),
        sentiment: "Positive".to_string(),
    }
}

#[tokio::test]
async fn test_signup_login_session_flow() {
    let services = services();

    services.auth.signup(signup("alice@example.com")).await.unwrap();

    // Duplicate signup fails with the contract error.
    let err = services
        .auth
        .signup(signup("alice@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::DuplicateEmail));

    // Login succeeds and establishes a session resolving to the user.
    let user = services
        .auth
        .login(LoginRequest {
            email: "alice@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();
    let token = services.sessions.create(&user.id).await;
    assert_eq!(services.sessions.get(&token).await, Some(user.id.clone()));

    // The serialized user carries no credential.
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn test_feedback_lifecycle() {
    let services = services();

    for (id, date) in [
        ("f1", "2024-01-01"),
        ("f2", "2024-03-01"),
        ("f3", "2024-02-01"),
    ] {
        services.feedback.create(feedback(id, "u1", date)).await.unwrap();
    }

    // Newest first.
    let records = services.feedback.list().await.unwrap();
    let dates: Vec<&str> = records.iter().map(|f| f.created_at.as_str()).collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);

    // Update touches exactly the three mutable fields.
    let update = FeedbackUpdate {
        rating: 5,
        text: "great".to_string(),
        sentiment: "Positive".to_string(),
    };
    services.feedback.update("f1", &update, None).await.unwrap();
    let record = services.storage.get_feedback("f1").await.unwrap().unwrap();
    assert_eq!(record.rating, 5);
    assert_eq!(record.text, "great");
    assert_eq!(record.movie_id, "t1");
    assert_eq!(record.user_name, "Alice");
    assert_eq!(record.created_at, "2024-01-01");

    // Delete removes the id; deleting again succeeds.
    services.feedback.delete("f1", None).await.unwrap();
    let records = services.feedback.list().await.unwrap();
    assert!(records.iter().all(|f| f.id != "f1"));
    services.feedback.delete("f1", None).await.unwrap();
}

#[tokio::test]
async fn test_catalog_unaffected_by_state() {
    let services = services();

    let before = services.storage.list_movies().await.unwrap();
    assert_eq!(before.len(), CATALOG_LEN);

    services.auth.signup(signup("alice@example.com")).await.unwrap();
    services
        .feedback
        .create(feedback("f1", "u1", "2024-01-01"))
        .await
        .unwrap();

    let after = services.storage.list_movies().await.unwrap();
    assert_eq!(after.len(), CATALOG_LEN);
    let ids_before: Vec<&str> = before.iter().map(|m| m.id.as_str()).collect();
    let ids_after: Vec<&str> = after.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids_before, ids_after);
}
