use crate::auth::AuthConfig;
use crate::opt::Auth;
use crate::routes;
use axum::{Extension, Router};
use http::{HeaderValue, Method, header};
use sea_orm::DatabaseConnection;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub(crate) fn create_app(auth: Auth, pool: DatabaseConnection) -> anyhow::Result<Router> {
    let origins = auth
        .origins
        .iter()
        .map(|origin| origin.parse())
        .collect::<Result<Vec<HeaderValue>, _>>()?;

    let api_cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ORIGIN,
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .max_age(Duration::from_secs(3600));

    let app = Router::new()
        .merge(routes::swagger::create_router())
        .nest(
            "/api/v0",
            Router::new()
                .nest("/status", routes::api::v0::status::create_router())
                .nest("/dreams", routes::api::v0::dreams::create_router())
                .layer(api_cors),
        )
        .layer(
            // Router layers are called bottom to top
            // ServiceBuilder layers are called top to bottom
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(AuthConfig::from_secret(&auth.jwt_secret)))
                .layer(Extension(pool)),
        )
        .with_state(());
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::UserToken;
    use crate::opt::Auth;
    use axum::body::Body;
    use axum::response::Response;
    use chrono::{Days, Utc};
    use http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use sea_orm::{ConnectOptions, Database};
    use serde_json::{Value, json};
    use somnia_migration::{Migrator, MigratorTrait};
    use test_log::test;
    use tower::ServiceExt;

    const SECRET: &str = "test-secret";

    async fn test_app() -> Router {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1);
        let pool = Database::connect(options).await.unwrap();
        Migrator::up(&pool, None).await.unwrap();
        create_app(
            Auth {
                jwt_secret: SECRET.to_owned(),
                origins: Vec::new(),
            },
            pool,
        )
        .unwrap()
    }

    fn bearer(sub: &str) -> String {
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &UserToken {
                sub: sub.to_owned(),
                exp: Utc::now().timestamp() + 3600,
                iat: None,
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        format!("Bearer {token}")
    }

    fn request(sub: &str, method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, bearer(sub));
        match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn entry(submit_date: &str) -> Value {
        json!({
            "submitDate": submit_date,
            "keywords": ["river"],
            "mood": ["calm"],
            "nightmare": false,
            "lifeEvents": "exam week",
            "content": "floating down a river",
        })
    }

    #[test(tokio::test)]
    async fn rejects_requests_without_a_token() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v0/dreams")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test(tokio::test)]
    async fn create_returns_the_read_shape() {
        let app = test_app().await;
        let response = app
            .oneshot(request("alice", "POST", "/api/v0/dreams", Some(entry("2024-01-01"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            json_body(response).await,
            json!({
                "submitDate": "2024-01-01",
                "keywords": ["river"],
                "mood": ["calm"],
                "content": "floating down a river",
            })
        );
    }

    #[test(tokio::test)]
    async fn second_entry_for_the_same_day_is_rejected() {
        let app = test_app().await;
        let response = app
            .clone()
            .oneshot(request("alice", "POST", "/api/v0/dreams", Some(entry("2024-01-01"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(request("alice", "POST", "/api/v0/dreams", Some(entry("2024-01-01"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["reason"], "ValidationError");
    }

    #[test(tokio::test)]
    async fn missing_field_reports_its_wire_name() {
        let app = test_app().await;
        let response = app
            .oneshot(request(
                "alice",
                "POST",
                "/api/v0/dreams",
                Some(json!({"keywords": [], "content": "x"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(response).await,
            json!({
                "code": 422,
                "reason": "ValidationError",
                "message": "Missing field",
                "location": "submitDate",
            })
        );
    }

    #[test(tokio::test)]
    async fn listing_covers_the_last_thirty_days() {
        let app = test_app().await;
        let today = Utc::now().date_naive();
        let yesterday = (today - Days::new(1)).format("%Y-%m-%d").to_string();
        let stale = (today - Days::new(31)).format("%Y-%m-%d").to_string();
        let today = today.format("%Y-%m-%d").to_string();

        for date in [&yesterday, &stale, &today] {
            let response = app
                .clone()
                .oneshot(request("alice", "POST", "/api/v0/dreams", Some(entry(date))))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .oneshot(request("alice", "GET", "/api/v0/dreams", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["submitDate"], yesterday);
    }

    #[test(tokio::test)]
    async fn users_only_see_their_own_entries() {
        let app = test_app().await;
        let date = (Utc::now().date_naive() - Days::new(1)).format("%Y-%m-%d").to_string();
        let response = app
            .clone()
            .oneshot(request("alice", "POST", "/api/v0/dreams", Some(entry(&date))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(request("bob", "GET", "/api/v0/dreams", None))
            .await
            .unwrap();
        assert_eq!(json_body(response).await, json!([]));
    }

    #[test(tokio::test)]
    async fn search_matches_literal_terms_and_echoes_the_query() {
        let app = test_app().await;
        let mut calm = entry("2024-01-01");
        calm["mood"] = json!(["calm"]);
        let mut tense = entry("2024-01-02");
        tense["mood"] = json!(["tense"]);
        tense["content"] = json!("being chased");
        for body in [calm, tense] {
            let response = app
                .clone()
                .oneshot(request("alice", "POST", "/api/v0/dreams", Some(body)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .clone()
            .oneshot(request(
                "alice",
                "POST",
                "/api/v0/dreams/dream-log",
                Some(json!({"search": "calm"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["query"], "calm");
        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["mood"], json!(["calm"]));
        assert_eq!(entries[0]["lifeEvents"], "exam week");
        assert!(entries[0]["user"].is_string());

        let response = app
            .oneshot(request(
                "alice",
                "POST",
                "/api/v0/dreams/dream-log",
                Some(json!({"search": "calm, chased"})),
            ))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["query"], json!(["calm", "chased"]));
        assert_eq!(body["entries"].as_array().unwrap().len(), 2);
    }

    #[test(tokio::test)]
    async fn update_requires_matching_ids_then_patches_in_place() {
        let app = test_app().await;
        let response = app
            .clone()
            .oneshot(request("alice", "POST", "/api/v0/dreams", Some(entry("2024-01-01"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(request(
                "alice",
                "POST",
                "/api/v0/dreams/dream-log",
                Some(json!({"search": "river"})),
            ))
            .await
            .unwrap();
        let body = json_body(response).await;
        let id = body["entries"][0]["id"].as_str().unwrap().to_owned();

        let other = uuid::Uuid::new_v4();
        let response = app
            .clone()
            .oneshot(request(
                "alice",
                "PUT",
                &format!("/api/v0/dreams/{other}"),
                Some(json!({"id": id, "content": "rewritten"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(request(
                "alice",
                "PUT",
                &format!("/api/v0/dreams/{id}"),
                Some(json!({"id": id, "content": "rewritten"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(request("alice", "GET", &format!("/api/v0/dreams/{id}"), None))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["content"], "rewritten");
        assert_eq!(body["mood"], json!(["calm"]));
    }

    #[test(tokio::test)]
    async fn delete_succeeds_even_when_nothing_matches() {
        let app = test_app().await;
        let id = uuid::Uuid::new_v4();
        let response = app
            .clone()
            .oneshot(request("alice", "DELETE", &format!("/api/v0/dreams/{id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(request("alice", "GET", &format!("/api/v0/dreams/{id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
