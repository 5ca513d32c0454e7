pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::generation::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Single-shot generation
        .route("/api/v1/generate/summary", post(handlers::handle_summary))
        .route("/api/v1/generate/bullets", post(handlers::handle_bullets))
        .route(
            "/api/v1/generate/cover-letter",
            post(handlers::handle_cover_letter),
        )
        .route("/api/v1/generate/portfolio", post(handlers::handle_portfolio))
        // Multi-call compositions
        .route(
            "/api/v1/generate/resume",
            post(handlers::handle_resume_sections),
        )
        .route(
            "/api/v1/generate/full-document",
            post(handlers::handle_full_document),
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::generation::client::tests::ScriptedGenerator;
    use crate::generation::client::{GenerationClient, RetryPolicy, RATE_LIMIT_EXCEEDED_MESSAGE};

    fn app(generator: Arc<ScriptedGenerator>) -> Router {
        build_router(AppState {
            generator: GenerationClient::new(generator, RetryPolicy::default()),
            document_call_delay: Duration::ZERO,
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn alice() -> Value {
        json!({
            "name": "Alice",
            "education": "MSc Data Science",
            "skills": ["Python", "SQL"],
            "experience": ["Intern at Acme"],
            "projects": ["Sentiment Analysis", "Recommender"]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::new(ScriptedGenerator::echo()))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_summary_sends_assembled_prompt() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Ok("A strong summary.")]));
        let (status, body) = post_json(
            app(generator.clone()),
            "/api/v1/generate/summary",
            json!({ "profile": alice() }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "A strong summary.");
        assert_eq!(body["warnings"], json!([]));

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].starts_with("Student Name: Alice\nEducation: MSc Data Science"));
    }

    #[tokio::test]
    async fn test_form_profile_is_parsed() {
        let generator = Arc::new(ScriptedGenerator::echo());
        let (status, body) = post_json(
            app(generator),
            "/api/v1/generate/cover-letter",
            json!({
                "profile": {
                    "name": "Alice",
                    "education": "MSc",
                    "skills": "Python\n\n  SQL  \n",
                    "experience": "",
                    "projects": ""
                },
                "job_description": "ML engineer"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let text = body["text"].as_str().unwrap();
        assert!(text.contains("Skills:\n- Python\n- SQL\n\nGenerate a professional cover letter"));
        assert!(text.ends_with("Tailor to this job: ML engineer"));
    }

    #[tokio::test]
    async fn test_blank_item_is_rejected() {
        let generator = Arc::new(ScriptedGenerator::echo());
        let (status, body) = post_json(
            app(generator.clone()),
            "/api/v1/generate/bullets",
            json!({ "profile": alice(), "item": "   " }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_item_is_substituted_verbatim() {
        let generator = Arc::new(ScriptedGenerator::echo());
        let (status, body) = post_json(
            app(generator.clone()),
            "/api/v1/generate/bullets",
            json!({ "profile": alice(), "item": "  Intern at Acme  " }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["text"]
            .as_str()
            .unwrap()
            .ends_with("accomplishment-driven bullet points: '  Intern at Acme  '"));

        let (_, body) = post_json(
            app(generator),
            "/api/v1/generate/portfolio",
            json!({ "profile": alice(), "item": "\tRecommender " }),
        )
        .await;
        assert!(body["text"]
            .as_str()
            .unwrap()
            .ends_with("portfolio description for: '\tRecommender '"));
    }

    #[tokio::test]
    async fn test_portfolio_quotes_item() {
        let generator = Arc::new(ScriptedGenerator::echo());
        let (status, body) = post_json(
            app(generator),
            "/api/v1/generate/portfolio",
            json!({ "profile": alice(), "item": "Recommender" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["text"]
            .as_str()
            .unwrap()
            .ends_with("Generate detailed portfolio description for: 'Recommender'"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_degrades_to_message_not_error_status() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Err((429, "Too Many Requests"))]));
        let (status, body) = post_json(
            app(generator.clone()),
            "/api/v1/generate/bullets",
            json!({ "profile": alice(), "item": "Intern at Acme" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], RATE_LIMIT_EXCEEDED_MESSAGE);
        assert_eq!(body["warnings"].as_array().unwrap().len(), 2);
        assert_eq!(generator.calls(), 3);
    }

    #[tokio::test]
    async fn test_resume_sections() {
        let generator = Arc::new(ScriptedGenerator::echo());
        let (status, body) = post_json(
            app(generator.clone()),
            "/api/v1/generate/resume",
            json!({ "profile": alice() }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], "Python, SQL");
        assert_eq!(body["enhanced_experience"]["item"], "Intern at Acme");
        assert_eq!(body["enhanced_project"]["item"], "Sentiment Analysis");
        assert_eq!(generator.calls(), 3);
    }

    #[tokio::test]
    async fn test_full_document() {
        let generator = Arc::new(ScriptedGenerator::echo());
        let (status, body) = post_json(
            app(generator.clone()),
            "/api/v1/generate/full-document",
            json!({ "profile": alice() }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        // summary + 1 experience + 2 projects + cover letter
        assert_eq!(generator.calls(), 5);
        assert_eq!(body["document"]["projects"].as_array().unwrap().len(), 2);
        let markdown = body["markdown"].as_str().unwrap();
        assert!(markdown.starts_with("# Alice\n\n---\n\n## Professional Summary"));
        assert!(markdown.contains("**Recommender**"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = post_json(
            app(Arc::new(ScriptedGenerator::echo())),
            "/api/v1/nope",
            json!({}),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
