//! Thin HTTP client for the PantryPilot REST API.
//!
//! Every call maps transport failures, non-2xx statuses and undecodable
//! bodies onto [`ApiError`]; nothing is retried.

use crate::config::api_base;
use crate::error::ApiError;
use crate::models::{
    AuthResponse, Credentials, MatchRequest, PantryItem, Recipe, RecipeId, RecipePage,
};
use crate::session::Session;
use gloo_net::http::{Request, RequestBuilder, Response};
use log::{debug, error};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiClient {
    base: String,
    token: Option<String>,
}

fn transport(endpoint: &str, err: gloo_net::Error) -> ApiError {
    error!("{} failed: {}", endpoint, err);
    ApiError::Transport {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    }
}

/// Reject non-2xx responses.
fn expect_ok(endpoint: &str, response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        Ok(response)
    } else {
        error!("{} returned HTTP {}", endpoint, response.status());
        Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: response.status(),
        })
    }
}

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
    let body = response.text().await.map_err(|e| transport(endpoint, e))?;
    serde_json::from_str(&body).map_err(|e| {
        error!("{} sent an unexpected body: {}", endpoint, e);
        ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        }
    })
}

/// Escape an opaque value for use as a single path segment.
fn path_segment(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

impl ApiClient {
    /// Client against the build-time configured base URL.
    pub fn new(session: Option<&Session>) -> Self {
        Self::with_base(api_base(), session)
    }

    pub fn with_base(base: &str, session: Option<&Session>) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            token: session.map(|s| s.token.clone()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn bearer(&self) -> Result<String, ApiError> {
        self.token
            .as_ref()
            .map(|t| format!("Bearer {}", t))
            .ok_or(ApiError::Unauthenticated)
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        Ok(builder.header("Authorization", &self.bearer()?))
    }

    fn maybe_authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.bearer() {
            Ok(value) => builder.header("Authorization", &value),
            Err(_) => builder,
        }
    }

    async fn send(&self, endpoint: &str, builder: RequestBuilder) -> Result<Response, ApiError> {
        debug!("-> {}", endpoint);
        let response = builder.send().await.map_err(|e| transport(endpoint, e))?;
        expect_ok(endpoint, response)
    }

    async fn send_json<B: serde::Serialize>(
        &self,
        endpoint: &str,
        builder: RequestBuilder,
        body: &B,
    ) -> Result<Response, ApiError> {
        debug!("-> {}", endpoint);
        let request: Request = builder.json(body).map_err(|e| transport(endpoint, e))?;
        let response = request.send().await.map_err(|e| transport(endpoint, e))?;
        expect_ok(endpoint, response)
    }

    // --- pantry ---

    pub async fn pantry_items(&self) -> Result<Vec<PantryItem>, ApiError> {
        let endpoint = "/api/pantry";
        let response = self
            .send(endpoint, self.maybe_authorized(Request::get(&self.url(endpoint))))
            .await?;
        decode(endpoint, response).await
    }

    pub async fn add_pantry_item(&self, item: &PantryItem) -> Result<PantryItem, ApiError> {
        let endpoint = "/api/pantry";
        let builder = self.maybe_authorized(Request::post(&self.url(endpoint)));
        let response = self.send_json(endpoint, builder, item).await?;
        decode(endpoint, response).await
    }

    // --- matching ---

    pub async fn match_recipes(&self, request: &MatchRequest) -> Result<RecipePage, ApiError> {
        let endpoint = "/api/matching-recipes";
        let builder = self.authorized(Request::post(&self.url(endpoint)))?;
        let response = self.send_json(endpoint, builder, request).await?;
        decode(endpoint, response).await
    }

    pub async fn next_recipes(&self, token: &str) -> Result<RecipePage, ApiError> {
        let endpoint = format!("/api/matching-recipes/{}", path_segment(token));
        let builder = self.maybe_authorized(Request::get(&self.url(&endpoint)));
        let response = self.send(&endpoint, builder).await?;
        decode(&endpoint, response).await
    }

    // --- likes ---

    pub async fn liked_recipes(&self) -> Result<Vec<Recipe>, ApiError> {
        let endpoint = "/api/likes";
        let builder = self.authorized(Request::get(&self.url(endpoint)))?;
        let response = self.send(endpoint, builder).await?;
        decode(endpoint, response).await
    }

    pub async fn like(&self, id: RecipeId) -> Result<(), ApiError> {
        let endpoint = format!("/api/likes/{}", id);
        let builder = self.authorized(Request::post(&self.url(&endpoint)))?;
        self.send(&endpoint, builder).await.map(|_| ())
    }

    pub async fn unlike(&self, id: RecipeId) -> Result<(), ApiError> {
        let endpoint = format!("/api/likes/{}", id);
        let builder = self.authorized(Request::delete(&self.url(&endpoint)))?;
        self.send(&endpoint, builder).await.map(|_| ())
    }

    // --- recipes ---

    pub async fn recipe(&self, id: RecipeId) -> Result<Recipe, ApiError> {
        let endpoint = format!("/api/recipes/{}", id);
        let builder = self.maybe_authorized(Request::get(&self.url(&endpoint)));
        let response = self.send(&endpoint, builder).await?;
        decode(&endpoint, response).await
    }

    // --- users ---

    /// Post credentials. Rejections with an `{error}` body are returned as a
    /// response so the server's message can be shown.
    async fn authenticate(&self, endpoint: &str, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        debug!("-> {}", endpoint);
        let request = Request::post(&self.url(endpoint))
            .json(credentials)
            .map_err(|e| transport(endpoint, e))?;
        let response = request.send().await.map_err(|e| transport(endpoint, e))?;
        let ok = response.ok();
        let status = response.status();
        match response.json::<AuthResponse>().await {
            Ok(body) if ok || body.error.is_some() => Ok(body),
            Err(_) if ok => Ok(AuthResponse::default()),
            _ => Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status,
            }),
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.authenticate("/api/users/login", credentials).await
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.authenticate("/api/users/register", credentials).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalised() {
        let client = ApiClient::with_base("http://localhost:8080/", None);
        assert_eq!(client.url("/api/likes"), "http://localhost:8080/api/likes");
        assert_eq!(client.token, None);
    }

    #[test]
    fn protected_calls_need_a_token() {
        let anonymous = ApiClient::with_base("", None);
        assert_eq!(anonymous.bearer(), Err(ApiError::Unauthenticated));

        let session = Session { token: "t0k".into(), username: "sam".into() };
        let client = ApiClient::with_base("", Some(&session));
        assert_eq!(client.bearer().as_deref(), Ok("Bearer t0k"));
    }
}
