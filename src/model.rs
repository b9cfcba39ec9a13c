//! Domain records and per-endpoint request schemas.
//!
//! Persisted records serialize with snake_case field names (the shape the
//! storage layer returns). Request bodies mirror the JS client's camelCase
//! payloads. Absent-field errors are caught by the typed schemas at the
//! extractor layer rather than surfacing as faults deep in a handler.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// User
// =============================================================================

/// A registered user.
///
/// The password hash never leaves the process: it is skipped on
/// serialization, so the login response is the full record minus the
/// credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (UUID v4 unless the client supplied one)
    pub id: String,
    /// Display name
    pub name: String,
    /// Unique email, case-sensitive as stored
    pub email: String,
    /// Bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Free-form role tag (user/producer/analyst/admin observed)
    pub role: String,
    /// Optional profile photo URL
    pub photo: Option<String>,
    /// Whether the user opted into notifications (defaults true on signup)
    pub notifications_enabled: bool,
}

// =============================================================================
// Movie
// =============================================================================

/// A catalog entry. Read-only after seeding; no endpoint mutates movies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub poster: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub category: Option<String>,
    pub cast: Option<String>,
    pub director: Option<String>,
    pub hero: Option<String>,
    pub heroine: Option<String>,
    pub vibe: Option<String>,
    pub release_type: Option<String>,
    pub rating: f64,
}

// =============================================================================
// Feedback
// =============================================================================

/// A rating + comment + sentiment tag submitted against a movie.
///
/// `movie_id` and `user_id` are references by convention only; existence is
/// not enforced. `user_name` is a denormalized snapshot taken at submission
/// time. `created_at` is a caller-supplied string whose lexicographic order
/// is the listing order. `sentiment` is stored verbatim, never computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub movie_id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: i64,
    pub text: String,
    pub created_at: String,
    pub sentiment: String,
}

// =============================================================================
// Request Schemas
// =============================================================================

/// POST /api/signup body.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    /// Client may supply an id; one is generated otherwise.
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// POST /api/login body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/feedback body (camelCase on the wire, as the client sends it).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub id: Option<String>,
    pub movie_id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: i64,
    pub text: String,
    pub created_at: String,
    pub sentiment: String,
}

impl FeedbackRequest {
    /// Convert into a persistable record, generating an id when absent.
    #[must_use]
    pub fn into_feedback(self) -> Feedback {
        Feedback {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            movie_id: self.movie_id,
            user_id: self.user_id,
            user_name: self.user_name,
            rating: self.rating,
            text: self.text,
            created_at: self.created_at,
            sentiment: self.sentiment,
        }
    }
}

/// PUT /api/feedback/{id} body: exactly the three mutable fields.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackUpdate {
    pub rating: i64,
    pub text: String,
    pub sentiment: String,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization_strips_password_hash() {
        let user = User {
            id: "u1".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            role: "user".to_string(),
            photo: None,
            notifications_enabled: true,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "alice@example.com");
        assert_eq!(json["notifications_enabled"], true);
    }

    #[test]
    fn test_feedback_request_camel_case() {
        let body = serde_json::json!({
            "movieId": "t1",
            "userId": "u1",
            "userName": "Alice",
            "rating": 5,
            "text": "great",
            "createdAt": "2024-03-01",
            "sentiment": "Positive"
        });

        let request: FeedbackRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.movie_id, "t1");
        assert_eq!(request.user_name, "Alice");

        let feedback = request.into_feedback();
        assert!(!feedback.id.is_empty(), "id must be generated when absent");
        assert_eq!(feedback.created_at, "2024-03-01");
    }

    #[test]
    fn test_feedback_request_missing_field_rejected() {
        let body = serde_json::json!({
            "movieId": "t1",
            "rating": 5
        });
        let result: Result<FeedbackRequest, _> = serde_json::from_value(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_feedback_serializes_snake_case() {
        let feedback = Feedback {
            id: "f1".to_string(),
            movie_id: "t1".to_string(),
            user_id: "u1".to_string(),
            user_name: "Alice".to_string(),
            rating: 4,
            text: "solid".to_string(),
            created_at: "2024-01-01".to_string(),
            sentiment: "Neutral".to_string(),
        };

        let json = serde_json::to_value(&feedback).unwrap();
        assert_eq!(json["movie_id"], "t1");
        assert_eq!(json["user_name"], "Alice");
        assert_eq!(json["created_at"], "2024-01-01");
    }
}
