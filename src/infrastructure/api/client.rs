//! Chat API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::ErrorResponse;
use crate::domain::entities::{ClanId, FriendState, Session};
use crate::domain::errors::ApiError;
use crate::domain::ports::{
    ApiChannelDescList, ApiClanUserList, ApiFriendList, ChatApiPort, FriendTargets,
};

const USER_AGENT: &str = concat!("clanchat/", env!("CARGO_PKG_VERSION"));
const DEFAULT_RETRY_AFTER_MS: u64 = 5000;

/// Chat API client authenticating every call with the session bearer token.
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    client: Client,
    base_url: String,
}

impl HttpChatClient {
    /// Creates client with custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder, session: &Session) -> Result<String, ApiError> {
        let response = request
            .bearer_auth(session.token.as_str())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach chat API");
                if e.is_timeout() {
                    ApiError::network("request timed out")
                } else if e.is_connect() {
                    ApiError::network("failed to connect to chat API")
                } else {
                    ApiError::network(e.to_string())
                }
            })?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("failed to read response: {e}")))?;

        if status.is_success() {
            Ok(body)
        } else {
            let error = error_from_status(status, &body, retry_after);
            warn!(status = %status, error = %error, "Chat API returned an error");
            Err(error)
        }
    }

    async fn get_json<T: DeserializeOwned + Default>(
        &self,
        request: RequestBuilder,
        session: &Session,
    ) -> Result<T, ApiError> {
        let body = self.send(request, session).await?;
        decode(&body)
    }

    async fn mutate(&self, request: RequestBuilder, session: &Session) -> Result<bool, ApiError> {
        let body = self.send(request, session).await?;
        Ok(accepted(&body))
    }
}

/// Maps a non-success response to an error, keeping the server's message.
fn error_from_status(status: StatusCode, body: &str, retry_after_secs: Option<u64>) -> ApiError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.message)
        .unwrap_or_default();

    match status {
        StatusCode::UNAUTHORIZED => ApiError::session(if message.is_empty() {
            "invalid or expired token".to_string()
        } else {
            message
        }),
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
            retry_after_ms: retry_after_secs.map_or(DEFAULT_RETRY_AFTER_MS, |s| s * 1000),
        },
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            ApiError::network("chat API is temporarily unavailable")
        }
        s if s.is_server_error() => {
            ApiError::unexpected(format!("unexpected response: {s} - {message}"))
        }
        _ => ApiError::rejected(message),
    }
}

/// Decodes a listing. An empty body, `null` or any non-object JSON value
/// means an empty listing. Only text that is not JSON at all is an error.
fn decode<T: DeserializeOwned + Default>(body: &str) -> Result<T, ApiError> {
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Failed to parse chat API response");
        ApiError::decode(e.to_string())
    })?;
    if !value.is_object() {
        debug!("Chat API returned a non-object listing, treating as empty");
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "Failed to decode chat API response");
        ApiError::decode(e.to_string())
    })
}

/// A successful mutation is refused only when the body is literally `false`.
fn accepted(body: &str) -> bool {
    body.trim() != "false"
}

fn target_query(targets: &FriendTargets) -> Vec<(&'static str, String)> {
    targets
        .ids
        .iter()
        .map(|id| ("ids", id.to_string()))
        .chain(targets.usernames.iter().map(|name| ("usernames", name.clone())))
        .collect()
}

fn friend_list_query(
    state: Option<FriendState>,
    limit: u32,
    cursor: &str,
) -> Vec<(&'static str, String)> {
    let mut query = vec![("limit", limit.to_string())];
    if let Some(state) = state {
        query.push(("state", state.code().to_string()));
    }
    if !cursor.is_empty() {
        query.push(("cursor", cursor.to_string()));
    }
    query
}

#[async_trait]
impl ChatApiPort for HttpChatClient {
    async fn list_channels_by_user(
        &self,
        session: &Session,
    ) -> Result<ApiChannelDescList, ApiError> {
        debug!(username = %session.username, "Listing channels");
        let request = self.client.get(self.url("/v2/channeldesc/user"));
        self.get_json(request, session).await
    }

    async fn list_clan_users(
        &self,
        session: &Session,
        clan_id: &ClanId,
    ) -> Result<ApiClanUserList, ApiError> {
        debug!(clan_id = %clan_id, "Listing clan users");
        let request = self
            .client
            .get(self.url(&format!("/v2/clandesc/{clan_id}/user")));
        self.get_json(request, session).await
    }

    async fn list_friends(
        &self,
        session: &Session,
        state: Option<FriendState>,
        limit: u32,
        cursor: &str,
    ) -> Result<ApiFriendList, ApiError> {
        debug!(limit, ?state, "Listing friends");
        let request = self
            .client
            .get(self.url("/v2/friend"))
            .query(&friend_list_query(state, limit, cursor));
        self.get_json(request, session).await
    }

    async fn add_friends(
        &self,
        session: &Session,
        targets: &FriendTargets,
    ) -> Result<bool, ApiError> {
        let request = self
            .client
            .post(self.url("/v2/friend"))
            .query(&target_query(targets));
        self.mutate(request, session).await
    }

    async fn delete_friends(
        &self,
        session: &Session,
        targets: &FriendTargets,
    ) -> Result<bool, ApiError> {
        let request = self
            .client
            .delete(self.url("/v2/friend"))
            .query(&target_query(targets));
        self.mutate(request, session).await
    }

    async fn block_friends(
        &self,
        session: &Session,
        targets: &FriendTargets,
    ) -> Result<bool, ApiError> {
        let request = self
            .client
            .post(self.url("/v2/friend/block"))
            .query(&target_query(targets));
        self.mutate(request, session).await
    }
}
