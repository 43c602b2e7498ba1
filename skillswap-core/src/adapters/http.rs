//! SkillSwap backend HTTP client
//!
//! Talks JSON to the REST API under `<base_url>` (e.g. `http://localhost:5000/api`).
//! Authenticated calls carry `Authorization: Bearer <token>`.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::result::{Error, Result};
use crate::domain::{
    Availability, AuthResponse, LoginRequest, NewSkill, ProfileUpdate, RegisterRequest, Skill,
    SkillKind, User,
};
use crate::ports::RemoteApi;

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Response envelopes
// =============================================================================

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
struct UsersEnvelope {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct SkillEnvelope {
    skill: Skill,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: Option<String>,
    /// flask-jwt-extended reports token problems under `msg`
    #[serde(default)]
    msg: Option<String>,
}

// =============================================================================
// Client
// =============================================================================

/// SkillSwap REST client
#[derive(Debug)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(Error::Config("API base URL cannot be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().map_err(map_request_error)?;
        check_response_status(response)
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request)?;
        response
            .json::<T>()
            .map_err(|e| Error::Transport(format!("Failed to parse response: {}", e)))
    }

    fn expect_user(&self, request: RequestBuilder) -> Result<User> {
        let envelope: UserEnvelope = self.send_json(request)?;
        envelope
            .user
            .ok_or_else(|| Error::not_found("response did not include a user"))
    }
}

/// Map transport-level failures (no HTTP status available)
fn map_request_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Transport("Request timed out. Please try again.".to_string())
    } else if e.is_connect() {
        Error::Transport(format!("Could not connect to the SkillSwap server: {}", e))
    } else {
        Error::Transport(e.to_string())
    }
}

/// Turn non-success statuses into structured errors
fn check_response_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|e| e.message.or(e.msg))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    Err(match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Error::Validation(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized(message),
        StatusCode::NOT_FOUND => Error::NotFound(message),
        _ => Error::Remote {
            status: status.as_u16(),
            message,
        },
    })
}

impl RemoteApi for HttpApiClient {
    fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.send_json(self.client.post(self.url("auth/register")).json(request))
    }

    fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.send_json(self.client.post(self.url("auth/login")).json(request))
    }

    fn current_user(&self, token: &str) -> Result<User> {
        self.expect_user(self.client.get(self.url("auth/me")).bearer_auth(token))
    }

    fn public_users(&self, token: &str) -> Result<Vec<User>> {
        let envelope: UsersEnvelope =
            self.send_json(self.client.get(self.url("users")).bearer_auth(token))?;
        Ok(envelope.users)
    }

    fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<User> {
        self.expect_user(
            self.client
                .put(self.url("users/profile"))
                .bearer_auth(token)
                .json(update),
        )
    }

    fn update_availability(&self, token: &str, availability: &[Availability]) -> Result<User> {
        self.expect_user(
            self.client
                .put(self.url("users/availability"))
                .bearer_auth(token)
                .json(&serde_json::json!({ "availability": availability })),
        )
    }

    fn toggle_public(&self, token: &str) -> Result<User> {
        self.expect_user(
            self.client
                .put(self.url("users/toggle-public"))
                .bearer_auth(token),
        )
    }

    fn add_skill(&self, token: &str, kind: SkillKind, skill: &NewSkill) -> Result<Skill> {
        let mut body = serde_json::json!({
            "name": skill.name,
            "description": skill.description,
        });
        if let Some(category) = &skill.category {
            body["category"] = serde_json::Value::from(category.as_str());
        }
        if let Some(level) = &skill.level {
            let key = match kind {
                SkillKind::Offered => "level",
                SkillKind::Wanted => "levelNeeded",
            };
            body[key] = serde_json::Value::from(level.as_str());
        }

        let envelope: SkillEnvelope = self.send_json(
            self.client
                .post(self.url(&format!("skills/{}", kind.as_str())))
                .bearer_auth(token)
                .json(&body),
        )?;
        Ok(envelope.skill)
    }

    fn remove_skill(&self, token: &str, kind: SkillKind, skill_id: &str) -> Result<()> {
        self.send(
            self.client
                .delete(self.url(&format!("skills/{}/{}", kind.as_str(), skill_id)))
                .bearer_auth(token),
        )?;
        Ok(())
    }
}
