use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use trustgate::Trustgate;
use trustgate_core::{AccountId, LoginAttempt, LoginHistoryRepository};

use crate::{
    error::Result,
    types::{HealthResponse, ScoreAttemptRequest, TrustScoreResponse},
};

/// Shared state for the trustgate routes.
pub struct ApiState<R: LoginHistoryRepository> {
    pub trustgate: Arc<Trustgate<R>>,
}

impl<R: LoginHistoryRepository> Clone for ApiState<R> {
    fn clone(&self) -> Self {
        Self {
            trustgate: Arc::clone(&self.trustgate),
        }
    }
}

/// Build the router exposing the scoring service.
///
/// Routes:
/// - `GET /health`
/// - `POST /accounts/{account_id}/trust-score` — score one login attempt
///   from the capturing agent's metadata record
pub fn create_router<R>(trustgate: Arc<Trustgate<R>>) -> Router
where
    R: LoginHistoryRepository + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/accounts/{account_id}/trust-score",
            post(score_handler::<R>),
        )
        .with_state(ApiState { trustgate })
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn score_handler<R>(
    State(state): State<ApiState<R>>,
    Path(account_id): Path<String>,
    Json(request): Json<ScoreAttemptRequest>,
) -> Result<Json<TrustScoreResponse>>
where
    R: LoginHistoryRepository,
{
    let account = AccountId::new(&account_id);
    let attempt: LoginAttempt = request.into();

    let outcome = state.trustgate.score_attempt(&account, &attempt).await?;

    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use tower::ServiceExt;
    use trustgate_storage_memory::MemoryHistoryRepository;

    async fn test_router() -> (Router, Arc<Trustgate<MemoryHistoryRepository>>) {
        let trustgate = Arc::new(
            Trustgate::builder(Arc::new(MemoryHistoryRepository::default()))
                .build()
                .unwrap(),
        );
        (create_router(Arc::clone(&trustgate)), trustgate)
    }

    fn score_request(account: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/accounts/{account}/trust-score"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _) = test_router().await;
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_score_clean_attempt() {
        let (router, trustgate) = test_router().await;
        trustgate
            .register_account(&AccountId::new("emp_1"))
            .await
            .unwrap();

        let body = r#"{"timestamp": "2024-06-12T14:00:00Z", "userAgent": "Mozilla/5.0"}"#;
        let response = router.oneshot(score_request("emp_1", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["trust_score"], 100);
        assert_eq!(json["is_suspicious"], false);
        assert_eq!(json["require_email_verification"], false);
        assert_eq!(json["reason"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_score_impossible_travel() {
        let (router, trustgate) = test_router().await;
        trustgate
            .register_account(&AccountId::new("emp_2"))
            .await
            .unwrap();

        let new_york = r#"{
            "timestamp": "2024-06-12T14:00:00Z",
            "latitude": 40.7128, "longitude": -74.0060,
            "city": "New York", "country": "US"
        }"#;
        let response = router
            .clone()
            .oneshot(score_request("emp_2", new_york))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let tokyo = r#"{
            "timestamp": "2024-06-12T14:10:00Z",
            "latitude": 35.6762, "longitude": 139.6503,
            "city": "Tokyo", "country": "JP"
        }"#;
        let response = router.oneshot(score_request("emp_2", tokyo)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["is_suspicious"], true);
        assert_eq!(json["reason"], "impossible travel velocity");
    }

    #[tokio::test]
    async fn test_blocked_low_score_reported_suspicious() {
        let trustgate = Arc::new(
            Trustgate::builder(Arc::new(MemoryHistoryRepository::default()))
                .thresholds(50, 60, 70)
                .build()
                .unwrap(),
        );
        let router = create_router(Arc::clone(&trustgate));
        trustgate
            .register_account(&AccountId::new("emp_9"))
            .await
            .unwrap();

        let london = r#"{
            "timestamp": "2024-06-12T01:00:00Z",
            "latitude": 51.5074, "longitude": -0.1278,
            "city": "London", "country": "GB"
        }"#;
        let response = router
            .clone()
            .oneshot(score_request("emp_9", london))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Paris an hour later at deep night: fast-but-plausible travel plus
        // first-time location plus deep night lands at 55, below the block
        // boundary with no suspicious trigger. The wire flags must still say
        // "refuse".
        let paris = r#"{
            "timestamp": "2024-06-12T02:00:00Z",
            "latitude": 48.8566, "longitude": 2.3522,
            "city": "Paris", "country": "FR"
        }"#;
        let response = router.oneshot(score_request("emp_9", paris)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["trust_score"], 55);
        assert_eq!(json["is_suspicious"], true);
        assert_eq!(json["require_email_verification"], false);
    }

    #[tokio::test]
    async fn test_unknown_account_is_404() {
        let (router, _) = test_router().await;

        let body = r#"{"timestamp": "2024-06-12T14:00:00Z"}"#;
        let response = router.oneshot(score_request("nobody", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = response_json(response).await;
        assert_eq!(json["error"], "Unknown account");
    }

    #[tokio::test]
    async fn test_missing_timestamp_is_client_error() {
        let (router, trustgate) = test_router().await;
        trustgate
            .register_account(&AccountId::new("emp_3"))
            .await
            .unwrap();

        let response = router
            .clone()
            .oneshot(score_request("emp_3", r#"{"userAgent": "Mozilla/5.0"}"#))
            .await
            .unwrap();
        assert!(response.status().is_client_error());

        let response = router
            .oneshot(score_request("emp_3", r#"{"timestamp": "yesterday-ish"}"#))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }
}
