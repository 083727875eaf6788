use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use models::Movie;
use serde_json::{json, Value};
use service::storage::MovieStore;
use tower::Service;

use server::routes::{self, ServerState};

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn seeded_movies() -> Vec<Movie> {
    [
        (2, "Titanic", "drama", "1997"),
        (3, "Alien", "horror", "1979"),
        (4, "300", "action", "2006"),
        (5, "Dictator", "comedy", "2012"),
        (6, "Amelie", "romance", "2001"),
        (7, "Heat", "crime", "1995"),
    ]
    .into_iter()
    .map(|(id, title, genre, year)| Movie {
        id,
        title: title.into(),
        genre: genre.into(),
        description: format!("{title}, the movie"),
        release_year: year.into(),
    })
    .collect()
}

fn build_app() -> Router {
    let state = ServerState::new(MovieStore::with_movies(seeded_movies()).expect("valid seed"));
    routes::build_router(state, cors())
}

fn pipi(id: i64) -> Value {
    json!({
        "id": id,
        "title": "Pipi duga čarapa",
        "genre": "dječji",
        "description": "Pipi i prijatelji",
        "releaseYear": "1972"
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, axum::http::HeaderMap, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&b)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Ok((status, headers, value))
}

fn ids(v: &Value) -> Vec<i64> {
    v.as_array().map(|a| a.iter().filter_map(|m| m["id"].as_i64()).collect()).unwrap_or_default()
}

#[tokio::test]
async fn get_all_movies_returns_seeded_count() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, body) = send(&app, "GET", "/movies", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![2, 3, 4, 5, 6, 7]);
    assert_eq!(body[0]["releaseYear"], "1997");
    Ok(())
}

#[tokio::test]
async fn empty_store_lists_an_empty_array() -> anyhow::Result<()> {
    let app = routes::build_router(ServerState::new(MovieStore::in_memory()), cors());
    let (status, _, body) = send(&app, "GET", "/movies", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn get_movie_by_id_found() -> anyhow::Result<()> {
    let app = build_app();
    for (id, title) in [(4, "300"), (5, "Dictator")] {
        let (status, _, body) = send(&app, "GET", &format!("/movies/{id}"), None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id);
        assert_eq!(body["title"], title);
    }
    Ok(())
}

#[tokio::test]
async fn get_movie_by_id_not_found_uses_error_body() -> anyhow::Result<()> {
    let app = build_app();
    for id in [67, 1] {
        let (status, _, body) = send(&app, "GET", &format!("/movies/{id}"), None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not Found");
        assert!(body["message"].as_str().unwrap_or_default().contains(&id.to_string()));
    }
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, body) = send(&app, "GET", "/movies/abc", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    Ok(())
}

#[tokio::test]
async fn create_valid_movie_returns_created_with_location() -> anyhow::Result<()> {
    let app = build_app();
    let alien = json!({"id": 0, "title": "Alien", "genre": "horror", "description": "A horror movie", "releaseYear": "1979"});
    let (status, headers, body) = send(&app, "POST", "/movies", Some(alien)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 8);
    assert_eq!(body["title"], "Alien");
    assert_eq!(headers.get("location").and_then(|v| v.to_str().ok()), Some("/movies/8"));

    let (status, _, fetched) = send(&app, "GET", "/movies/8", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
    Ok(())
}

#[tokio::test]
async fn create_invalid_movie_lists_failing_fields() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, body) = send(&app, "POST", "/movies", Some(json!({"title": "Titanic"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
    let fields: Vec<&str> = body["fields"].as_array().unwrap().iter().filter_map(|f| f["field"].as_str()).collect();
    assert_eq!(fields, vec!["genre", "description", "releaseYear"]);

    let (_, _, all) = send(&app, "GET", "/movies", None).await?;
    assert_eq!(ids(&all).len(), 6);
    Ok(())
}

#[tokio::test]
async fn create_with_unparseable_body_is_bad_request() -> anyhow::Result<()> {
    let app = build_app();
    let req = Request::builder()
        .method("POST")
        .uri("/movies")
        .header("content-type", "application/json")
        .body(Body::from("{\"title\": "))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn create_with_mistyped_field_is_bad_request() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, body) = send(&app, "POST", "/movies", Some(json!({"title": 5}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    Ok(())
}

#[tokio::test]
async fn create_without_json_content_type_keeps_415() -> anyhow::Result<()> {
    let app = build_app();
    let req = Request::builder()
        .method("POST")
        .uri("/movies")
        .body(Body::from(serde_json::to_vec(&pipi(0))?))?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["error"], "Unsupported Media Type");
    assert!(body["message"].is_string());

    let (_, _, listed) = send(&app, "GET", "/movies", None).await?;
    assert_eq!(ids(&listed).len(), 6);
    Ok(())
}

#[tokio::test]
async fn oversized_body_keeps_413() -> anyhow::Result<()> {
    let app = build_app();
    // axum's default body limit is 2 MiB
    let huge = json!({ "title": "x".repeat(3 * 1024 * 1024) });
    let (status, _, body) = send(&app, "POST", "/movies", Some(huge)).await?;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "Payload Too Large");
    Ok(())
}

#[tokio::test]
async fn update_last_inserted_returns_ok() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, body) = send(&app, "PUT", "/movies/7", Some(pipi(7))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, pipi(7));

    let (_, _, fetched) = send(&app, "GET", "/movies/7", None).await?;
    assert_eq!(fetched, pipi(7));
    Ok(())
}

#[tokio::test]
async fn update_id_mismatch_is_bad_request_and_changes_nothing() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, body) = send(&app, "PUT", "/movies/4", Some(pipi(5))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Id Mismatch");

    let (_, _, movie) = send(&app, "GET", "/movies/4", None).await?;
    assert_eq!(movie["title"], "300");
    Ok(())
}

#[tokio::test]
async fn update_missing_movie_is_not_found() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, body) = send(&app, "PUT", "/movies/666", Some(pipi(666))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");

    let (_, _, all) = send(&app, "GET", "/movies", None).await?;
    assert_eq!(ids(&all), vec![2, 3, 4, 5, 6, 7]);
    Ok(())
}

#[tokio::test]
async fn delete_last_inserted_then_not_found() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, body) = send(&app, "DELETE", "/movies/7", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Heat");

    let (status, _, _) = send(&app, "GET", "/movies/7", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, body) = send(&app, "DELETE", "/movies/7", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    Ok(())
}

#[tokio::test]
async fn delete_non_existing_is_not_found() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, body) = send(&app, "DELETE", "/movies/666", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn search_filters_orders_and_pages() -> anyhow::Result<()> {
    let app = build_app();

    let (status, _, body) = send(&app, "GET", "/movies/search?searchString=300", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![4]);

    let (status, _, body) = send(&app, "GET", "/movies/search?searchString=nothing-like-this", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (_, _, body) = send(&app, "GET", "/movies/search?searchString=&orderBy=&per_page=0&page=1", None).await?;
    assert_eq!(ids(&body), vec![2, 3, 4, 5, 6, 7]);

    let (_, _, body) = send(&app, "GET", "/movies/search?orderBy=releaseYear", None).await?;
    assert_eq!(ids(&body), vec![3, 7, 2, 6, 4, 5]);

    let (_, _, body) = send(&app, "GET", "/movies/search?orderBy=title&per_page=2&page=2", None).await?;
    // 300, Alien | Amelie, Dictator | Heat, Titanic
    assert_eq!(ids(&body), vec![6, 5]);

    let (status, _, body) = send(&app, "GET", "/movies/search?per_page=2&page=50", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn search_with_malformed_numbers_is_bad_request() -> anyhow::Result<()> {
    let app = build_app();
    for uri in ["/movies/search?per_page=ten", "/movies/search?page=1.5"] {
        let (status, _, body) = send(&app, "GET", uri, None).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "Bad Request");
    }
    Ok(())
}

#[tokio::test]
async fn health_metrics_and_docs_are_served() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let _ = send(&app, "GET", "/movies/4", None).await?;
    let req = Request::builder().uri("/metrics").body(Body::empty())?;
    let resp = app.clone().call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(axum::body::to_bytes(resp.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("movies_requests_total"));

    let (status, _, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/movies/{id}"].is_object());
    assert!(doc["paths"]["/movies/search"].is_object());
    Ok(())
}

#[tokio::test]
async fn unknown_route_uses_error_body() -> anyhow::Result<()> {
    let app = build_app();
    let (status, _, body) = send(&app, "GET", "/films", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    Ok(())
}
