use axum::Json;
use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieDoc {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub description: String,
    pub release_year: String,
}

/// Create/update body. All content fields are required and non-empty; `id`
/// is ignored on create and must match the path on update.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieInputDoc {
    pub id: Option<i64>,
    pub title: String,
    pub genre: String,
    pub description: String,
    pub release_year: String,
}

#[derive(ToSchema)]
pub struct FieldErrorDoc { pub field: String, pub message: String }

#[derive(ToSchema)]
pub struct ApiErrorDoc {
    pub error: String,
    pub message: Option<String>,
    pub fields: Option<Vec<FieldErrorDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::movies::list_movies,
        crate::routes::movies::search_movies,
        crate::routes::movies::get_movie,
        crate::routes::movies::create_movie,
        crate::routes::movies::update_movie,
        crate::routes::movies::delete_movie,
    ),
    components(
        schemas(
            HealthResponse,
            MovieDoc,
            MovieInputDoc,
            FieldErrorDoc,
            ApiErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "movies")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
