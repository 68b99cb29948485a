//! REST helpers for the recipe backend: users, chat, favorites, settings,
//! pantry, and recipe generation.
//!
//! Browser build (`csr`): real HTTP calls via `gloo-net`.
//! Native build (tests): stubs returning [`ApiError::Unavailable`].
//!
//! ERROR HANDLING
//! ==============
//! Callers get a typed [`ApiError`] instead of panics. Only
//! [`ApiError::Unauthorized`] touches session state: callers hand it to the
//! guard's `reject()`. Everything else is shown as a transient message.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(any(test, feature = "csr"))]
use super::types::{ChatMode, ErrorBody};
use super::types::{
    ChangePasswordRequest, ChatRequest, ChatResponse, CookRequest, CookResponse, LoginResponse,
    NewPantryItem, PantryItem, Recipe, RegisterRequest, Settings, UserProfile,
};

/// Failure of a backend call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("could not reach the server: {0}")]
    Network(String),
    /// Non-success status; `detail` is the backend message or a fallback.
    #[error("{detail}")]
    Http { status: u16, detail: String },
    /// An authenticated call was answered with 401.
    #[error("your session is no longer valid")]
    Unauthorized,
    /// Called outside the browser build.
    #[error("not available outside the browser")]
    Unavailable,
}

#[cfg(any(test, feature = "csr"))]
const UNAUTHORIZED: u16 = 401;

#[cfg(any(test, feature = "csr"))]
fn endpoint(path: &str) -> String {
    crate::config::join_url(crate::config::api_base_url(), path)
}

#[cfg(any(test, feature = "csr"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Map a non-success response to [`ApiError::Http`], preferring the backend detail.
#[cfg(any(test, feature = "csr"))]
fn http_error(status: u16, body: &str) -> ApiError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message())
        .unwrap_or_else(|| format!("request failed: {status}"));
    ApiError::Http { status, detail }
}

/// Like [`http_error`], but a 401 on an authenticated call means the token was refused.
#[cfg(any(test, feature = "csr"))]
fn authed_error(status: u16, body: &str) -> ApiError {
    if status == UNAUTHORIZED {
        ApiError::Unauthorized
    } else {
        http_error(status, body)
    }
}

#[cfg(feature = "csr")]
fn network(e: impl std::fmt::Display) -> ApiError {
    ApiError::Network(e.to_string())
}

#[cfg(feature = "csr")]
async fn failure(resp: gloo_net::http::Response, authenticated: bool) -> ApiError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    log::warn!("api: {} answered {status}", resp.url());
    if authenticated {
        authed_error(status, &body)
    } else {
        http_error(status, &body)
    }
}

/// Path of one chat backend.
#[cfg(any(test, feature = "csr"))]
fn chat_path(mode: ChatMode) -> String {
    format!("/chat/{}", mode.as_str())
}

#[cfg(any(test, feature = "csr"))]
fn favorite_path(id: i64) -> String {
    format!("/favorites/{id}")
}

#[cfg(any(test, feature = "csr"))]
fn pantry_item_path(id: i64) -> String {
    format!("/pantry/{id}")
}

/// Send an authenticated request and check the status.
#[cfg(feature = "csr")]
async fn send_authed(request: gloo_net::http::Request) -> Result<gloo_net::http::Response, ApiError> {
    let resp = request.send().await.map_err(network)?;
    if resp.ok() {
        Ok(resp)
    } else {
        Err(failure(resp, true).await)
    }
}

#[cfg(feature = "csr")]
async fn get_authed<T: serde::de::DeserializeOwned>(path: &str, token: &str) -> Result<T, ApiError> {
    let request = gloo_net::http::Request::get(&endpoint(path))
        .header("Authorization", &bearer(token))
        .build()
        .map_err(network)?;
    send_authed(request).await?.json::<T>().await.map_err(network)
}

#[cfg(feature = "csr")]
fn json_authed<B: serde::Serialize>(
    builder: gloo_net::http::RequestBuilder,
    token: &str,
    body: &B,
) -> Result<gloo_net::http::Request, ApiError> {
    builder.header("Authorization", &bearer(token)).json(body).map_err(network)
}

/// Exchange credentials for a bearer token via `POST /users/login`.
///
/// # Errors
///
/// Returns [`ApiError::Http`] with the backend detail on rejected credentials.
pub async fn login(username: &str, password: &str) -> Result<LoginResponse, ApiError> {
    #[cfg(feature = "csr")]
    {
        let form = web_sys::UrlSearchParams::new().map_err(|_| ApiError::Network("form encoding".to_owned()))?;
        form.append("username", username);
        form.append("password", password);
        let resp = gloo_net::http::Request::post(&endpoint("/users/login"))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(form)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        if !resp.ok() {
            return Err(failure(resp, false).await);
        }
        resp.json::<LoginResponse>().await.map_err(network)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (username, password);
        Err(ApiError::Unavailable)
    }
}

/// Create an account via `POST /users/register`.
///
/// # Errors
///
/// Returns [`ApiError::Http`] when the username or email is taken or invalid.
pub async fn register(request: &RegisterRequest) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        let resp = gloo_net::http::Request::post(&endpoint("/users/register"))
            .json(request)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        if !resp.ok() {
            return Err(failure(resp, false).await);
        }
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = request;
        Err(ApiError::Unavailable)
    }
}

/// Fetch the authoritative profile via `GET /users/me`.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the backend refuses `token`.
pub async fn fetch_me(token: &str) -> Result<UserProfile, ApiError> {
    #[cfg(feature = "csr")]
    {
        get_authed("/users/me", token).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = token;
        Err(ApiError::Unavailable)
    }
}

/// Change the password via `PUT /users/change-password`.
///
/// # Errors
///
/// Returns [`ApiError::Http`] when the old password is wrong and
/// [`ApiError::Unauthorized`] when the backend refuses `token`.
pub async fn change_password(token: &str, request: &ChangePasswordRequest) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        let builder = gloo_net::http::Request::put(&endpoint("/users/change-password"));
        send_authed(json_authed(builder, token, request)?).await.map(|_| ())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (token, request);
        Err(ApiError::Unavailable)
    }
}

/// Ask the recipe assistant via `POST /chat/{mode}`.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the backend refuses `token`.
pub async fn send_chat(token: &str, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
    #[cfg(feature = "csr")]
    {
        let builder = gloo_net::http::Request::post(&endpoint(&chat_path(request.mode)));
        send_authed(json_authed(builder, token, request)?)
            .await?
            .json::<ChatResponse>()
            .await
            .map_err(network)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (token, request);
        Err(ApiError::Unavailable)
    }
}

/// List saved recipes via `GET /favorites/`.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the backend refuses `token`.
pub async fn fetch_favorites(token: &str) -> Result<Vec<Recipe>, ApiError> {
    #[cfg(feature = "csr")]
    {
        get_authed("/favorites/", token).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = token;
        Err(ApiError::Unavailable)
    }
}

/// Remove a saved recipe via `DELETE /favorites/{id}`.
///
/// # Errors
///
/// Returns [`ApiError::Http`] (404) when the recipe is already gone.
pub async fn delete_favorite(token: &str, id: i64) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        let request = gloo_net::http::Request::delete(&endpoint(&favorite_path(id)))
            .header("Authorization", &bearer(token))
            .build()
            .map_err(network)?;
        send_authed(request).await.map(|_| ())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (token, id);
        Err(ApiError::Unavailable)
    }
}

/// Load dietary settings via `GET /settings/`.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the backend refuses `token`.
pub async fn fetch_settings(token: &str) -> Result<Settings, ApiError> {
    #[cfg(feature = "csr")]
    {
        get_authed("/settings/", token).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = token;
        Err(ApiError::Unavailable)
    }
}

/// Replace dietary settings via `PUT /settings/`.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the backend refuses `token`.
pub async fn save_settings(token: &str, settings: &Settings) -> Result<Settings, ApiError> {
    #[cfg(feature = "csr")]
    {
        let builder = gloo_net::http::Request::put(&endpoint("/settings/"));
        send_authed(json_authed(builder, token, settings)?)
            .await?
            .json::<Settings>()
            .await
            .map_err(network)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (token, settings);
        Err(ApiError::Unavailable)
    }
}

/// List pantry entries via `GET /pantry/`.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when the backend refuses `token`.
pub async fn fetch_pantry(token: &str) -> Result<Vec<PantryItem>, ApiError> {
    #[cfg(feature = "csr")]
    {
        get_authed("/pantry/", token).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = token;
        Err(ApiError::Unavailable)
    }
}

/// Store a pantry entry via `POST /pantry/`.
///
/// # Errors
///
/// Returns [`ApiError::Http`] (400) when the name already exists.
pub async fn add_pantry_item(token: &str, item: &NewPantryItem) -> Result<PantryItem, ApiError> {
    #[cfg(feature = "csr")]
    {
        let builder = gloo_net::http::Request::post(&endpoint("/pantry/"));
        send_authed(json_authed(builder, token, item)?)
            .await?
            .json::<PantryItem>()
            .await
            .map_err(network)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (token, item);
        Err(ApiError::Unavailable)
    }
}

/// Remove a pantry entry via `DELETE /pantry/{id}`.
///
/// # Errors
///
/// Returns [`ApiError::Http`] (404) when the entry is already gone.
pub async fn delete_pantry_item(token: &str, id: i64) -> Result<(), ApiError> {
    #[cfg(feature = "csr")]
    {
        let request = gloo_net::http::Request::delete(&endpoint(&pantry_item_path(id)))
            .header("Authorization", &bearer(token))
            .build()
            .map_err(network)?;
        send_authed(request).await.map(|_| ())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (token, id);
        Err(ApiError::Unavailable)
    }
}

/// Generate a recipe from the pantry wizard via `POST /cook/rag`.
///
/// # Errors
///
/// Returns [`ApiError::Http`] (503) when the generator is offline.
pub async fn cook(token: &str, request: &CookRequest) -> Result<CookResponse, ApiError> {
    #[cfg(feature = "csr")]
    {
        let builder = gloo_net::http::Request::post(&endpoint("/cook/rag"));
        send_authed(json_authed(builder, token, request)?)
            .await?
            .json::<CookResponse>()
            .await
            .map_err(network)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (token, request);
        Err(ApiError::Unavailable)
    }
}
