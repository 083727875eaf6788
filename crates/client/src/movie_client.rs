use std::time::Duration;

use configs::ClientConfig;
use models::{Movie, MovieInput};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

use crate::errors::ClientError;

/// Query of `GET /movies/search`; unset fields are left out of the URL.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct SearchParams {
    #[serde(rename = "searchString", skip_serializing_if = "Option::is_none")]
    pub search_string: Option<String>,
    #[serde(rename = "orderBy", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

/// Result of submitting a create/update/delete form.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The server accepted the submission.
    Completed(Movie),
    /// The submission failed; `input` is what the caller submitted, ready to
    /// be shown again.
    Resubmit { input: MovieInput, error: ClientError },
}

impl SubmitOutcome {
    fn from_result(input: MovieInput, result: Result<Movie, ClientError>) -> Self {
        match result {
            Ok(movie) => Self::Completed(movie),
            Err(error) => {
                warn!(%error, "submission failed; returning input for resubmission");
                Self::Resubmit { input, error }
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn into_result(self) -> Result<Movie, ClientError> {
        match self {
            Self::Completed(movie) => Ok(movie),
            Self::Resubmit { error, .. } => Err(error),
        }
    }
}

/// Client for the movie API. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct MovieClient {
    http: Client,
    base_url: String,
}

impl MovieClient {
    /// Wrap an existing `reqwest::Client` so it can be shared with other callers.
    pub fn new(http: Client, base_url: &str) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string() }
    }

    /// Build the pooled client once from configuration.
    pub fn from_config(cfg: &ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self::new(http, &cfg.base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status();
        debug!(%status, url = %response.url(), "movie api response");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| ClientError::Transport(e.to_string()))?;
            return Err(ClientError::from_body(status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// `GET /movies`
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Movie>, ClientError> {
        self.execute(self.http.get(self.url("/movies"))).await
    }

    /// `GET /movies/search`
    #[instrument(skip(self))]
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Movie>, ClientError> {
        self.execute(self.http.get(self.url("/movies/search")).query(params)).await
    }

    /// `GET /movies/{id}`
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Movie, ClientError> {
        self.execute(self.http.get(self.url(&format!("/movies/{id}")))).await
    }

    /// `POST /movies`
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: MovieInput) -> SubmitOutcome {
        let result = self.execute(self.http.post(self.url("/movies")).json(&input)).await;
        SubmitOutcome::from_result(input, result)
    }

    /// `PUT /movies/{id}`
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: MovieInput) -> SubmitOutcome {
        let result = self
            .execute(self.http.put(self.url(&format!("/movies/{id}"))).json(&input))
            .await;
        SubmitOutcome::from_result(input, result)
    }

    /// `DELETE /movies/{id}`. `shown` is the record the caller displayed
    /// while asking for confirmation; it comes back on failure.
    #[instrument(skip(self, shown))]
    pub async fn delete(&self, id: i64, shown: MovieInput) -> SubmitOutcome {
        let result = self.execute(self.http.delete(self.url(&format!("/movies/{id}")))).await;
        SubmitOutcome::from_result(shown, result)
    }
}
