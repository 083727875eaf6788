use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use models::{Movie, MovieInput};
use serde::Deserialize;
use service::movie::MovieQuery;
use utoipa::IntoParams;

use crate::errors::JsonApiError;
use crate::openapi::{ApiErrorDoc, MovieDoc, MovieInputDoc};
use crate::routes::ServerState;

/// Query string of `GET /movies/search`. Numbers arrive as text so a
/// malformed value can be reported as a 400 naming the parameter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// case-insensitive title substring
    #[serde(rename = "searchString")]
    pub search_string: Option<String>,
    /// `title`, `releaseYear`, `genre` or `id`
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    /// page size; 0 or less returns every match
    pub per_page: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
}

impl SearchParams {
    pub fn to_query(&self) -> Result<MovieQuery, JsonApiError> {
        Ok(MovieQuery::from_params(
            self.search_string.as_deref(),
            self.order_by.as_deref(),
            self.per_page.as_deref(),
            self.page.as_deref(),
        )?)
    }
}

#[utoipa::path(
    get, path = "/movies", tag = "movies",
    responses((status = 200, description = "All movies in insertion order", body = [MovieDoc]))
)]
pub async fn list_movies(State(state): State<ServerState>) -> Result<Json<Vec<Movie>>, JsonApiError> {
    Ok(Json(state.movies.list().await?))
}

#[utoipa::path(
    get, path = "/movies/search", tag = "movies",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching movies, possibly empty", body = [MovieDoc]),
        (status = 400, description = "Malformed per_page or page", body = ApiErrorDoc),
    )
)]
pub async fn search_movies(
    State(state): State<ServerState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Movie>>, JsonApiError> {
    let Query(params) = params?;
    let query = params.to_query()?;
    Ok(Json(state.movies.search(&query).await?))
}

#[utoipa::path(
    get, path = "/movies/{id}", tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "The movie", body = MovieDoc),
        (status = 404, description = "No movie with this id", body = ApiErrorDoc),
    )
)]
pub async fn get_movie(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Movie>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.movies.get(id).await?))
}

#[utoipa::path(
    post, path = "/movies", tag = "movies",
    request_body = MovieInputDoc,
    responses(
        (status = 201, description = "Created; Location points at the new movie", body = MovieDoc),
        (status = 400, description = "Missing or empty fields", body = ApiErrorDoc),
    )
)]
pub async fn create_movie(
    State(state): State<ServerState>,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Movie>), JsonApiError> {
    let Json(input) = payload?;
    let created = state.movies.create(input).await?;
    let location = format!("/movies/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    put, path = "/movies/{id}", tag = "movies",
    params(("id" = i64, Path, description = "Movie id; must equal the body id")),
    request_body = MovieInputDoc,
    responses(
        (status = 200, description = "Updated movie", body = MovieDoc),
        (status = 400, description = "Missing fields or id mismatch", body = ApiErrorDoc),
        (status = 404, description = "No movie with this id", body = ApiErrorDoc),
    )
)]
pub async fn update_movie(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<MovieInput>, JsonRejection>,
) -> Result<Json<Movie>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(Json(state.movies.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/movies/{id}", tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "The removed movie", body = MovieDoc),
        (status = 404, description = "No movie with this id", body = ApiErrorDoc),
    )
)]
pub async fn delete_movie(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Movie>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.movies.delete(id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_build_query() {
        let params = SearchParams {
            search_string: Some("alien".into()),
            order_by: Some("releaseYear".into()),
            per_page: Some("5".into()),
            page: None,
        };
        let q = params.to_query().unwrap();
        assert_eq!(q.search.as_deref(), Some("alien"));
        assert_eq!(q.pagination.per_page, 5);
        assert_eq!(q.pagination.page, 1);
    }

    #[test]
    fn malformed_numbers_are_bad_requests() {
        let params = SearchParams { page: Some("two".into()), ..Default::default() };
        let err = params.to_query().unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
