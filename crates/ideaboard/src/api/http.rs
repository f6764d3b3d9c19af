//! reqwest-backed implementation of [`IdeaApi`]

use super::envelope::{unwrap_idea, unwrap_list};
use super::types::{
  ApproveReceipt, AuthGrant, Credentials, ErrorBody, Leaderboard, ProfileResponse, Registration,
  RejectRequest, SdmSummary, SdmsResponse, SimilarityMatch, SubmitIdeaRequest, SubmitReceipt,
};
use super::IdeaApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::idea::RawIdea;
use crate::session::{Session, User};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Whether a request carries the session's bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
  Required,
  None,
}

pub struct HttpIdeaApi {
  client: Client,
  base_url: Url,
  session: Option<Session>,
}

impl HttpIdeaApi {
  pub fn new(config: &ClientConfig, session: Option<Session>) -> Result<Self> {
    let base_url = Url::parse(&config.base_url)
      .map_err(|e| ClientError::Config(format!("invalid API URL '{}': {e}", config.base_url)))?;
    if base_url.cannot_be_a_base() {
      return Err(ClientError::Config(format!("API URL '{}' cannot hold paths", config.base_url)));
    }

    let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

    Ok(Self { client, base_url, session })
  }

  pub fn session(&self) -> Option<&Session> {
    self.session.as_ref()
  }

  /// Same connection pool, different session
  pub fn with_session(&self, session: Option<Session>) -> Self {
    Self { client: self.client.clone(), base_url: self.base_url.clone(), session }
  }

  /// Build a URL below the API root, escaping each segment
  fn url(&self, segments: &[&str]) -> Result<Url> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| ClientError::Config("API URL cannot hold paths".to_string()))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  fn request(&self, method: Method, url: Url, auth: Auth) -> Result<RequestBuilder> {
    let builder = self.client.request(method, url);
    match auth {
      Auth::None => Ok(builder),
      Auth::Required => {
        let session = self.session.as_ref().ok_or(ClientError::NotAuthenticated)?;
        Ok(builder.bearer_auth(&session.token))
      }
    }
  }

  async fn get(&self, segments: &[&str], auth: Auth, fallback: &str) -> Result<Value> {
    let url = self.url(segments)?;
    let path = url.path().to_string();
    let response = self.request(Method::GET, url, auth)?.send().await?;
    read_body(response, &path, fallback).await
  }

  async fn post<B: Serialize + ?Sized>(
    &self,
    segments: &[&str],
    body: Option<&B>,
    auth: Auth,
    fallback: &str,
  ) -> Result<Value> {
    let url = self.url(segments)?;
    let path = url.path().to_string();
    let mut builder = self.request(Method::POST, url, auth)?;
    if let Some(body) = body {
      builder = builder.json(body);
    }

    let response = builder.send().await?;
    read_body(response, &path, fallback).await
  }
}

/// Turn a response into JSON, or into an HTTP error carrying the server's
/// `error` text (or `fallback` when it has none)
async fn read_body(response: Response, path: &str, fallback: &str) -> Result<Value> {
  let status = response.status();
  let text = response.text().await?;
  tracing::debug!(path, status = status.as_u16(), bytes = text.len(), "api response");

  if !status.is_success() {
    let message = serde_json::from_str::<ErrorBody>(&text)
      .ok()
      .and_then(|body| body.error)
      .filter(|message| !message.trim().is_empty())
      .unwrap_or_else(|| fallback.to_string());
    return Err(ClientError::http(status.as_u16(), message));
  }

  if text.trim().is_empty() {
    return Ok(Value::Object(Default::default()));
  }

  serde_json::from_str(&text).map_err(|e| ClientError::decode(path, e))
}

fn decode<T: DeserializeOwned>(value: Value, path: &str) -> Result<T> {
  serde_json::from_value(value).map_err(|e| ClientError::decode(path, e))
}

#[async_trait]
impl IdeaApi for HttpIdeaApi {
  async fn idea_detail(&self, id: &str) -> Result<RawIdea> {
    let body = self.get(&["ideas", id], Auth::Required, "Failed to load idea").await?;
    unwrap_idea(body).ok_or_else(|| ClientError::decode(format!("/ideas/{id}"), "no idea object in response"))
  }

  async fn my_ideas(&self) -> Result<Vec<RawIdea>> {
    let body = self.get(&["ideas", "my-ideas"], Auth::Required, "Failed to load ideas").await?;
    Ok(unwrap_list(body, "ideas"))
  }

  async fn worklist(&self) -> Result<Vec<RawIdea>> {
    let body = self.get(&["ideas", "worklist"], Auth::Required, "Failed to load worklist").await?;
    Ok(unwrap_list(body, "ideas"))
  }

  async fn approved_ideas(&self) -> Result<Vec<RawIdea>> {
    let body =
      self.get(&["ideas", "approved", "all"], Auth::Required, "Failed to load approved ideas").await?;
    Ok(unwrap_list(body, "ideas"))
  }

  async fn submit_idea(&self, request: &SubmitIdeaRequest) -> Result<SubmitReceipt> {
    let body = self
      .post(&["ideas", "submit"], Some(request), Auth::Required, "Failed to submit idea")
      .await?;
    Ok(serde_json::from_value(body).unwrap_or_default())
  }

  async fn approve(&self, id: &str) -> Result<ApproveReceipt> {
    let body = self
      .post::<Value>(&["ideas", id, "approve"], None, Auth::Required, "Failed to approve idea")
      .await?;
    Ok(serde_json::from_value(body).unwrap_or_default())
  }

  async fn reject(&self, id: &str, reason: &str) -> Result<()> {
    let request = RejectRequest { rejection_reason: reason };
    self.post(&["ideas", id, "reject"], Some(&request), Auth::Required, "Failed to reject idea").await?;
    Ok(())
  }

  async fn similar_ideas(&self, id: &str) -> Result<Vec<SimilarityMatch>> {
    let body =
      self.get(&["ideas", id, "similarity"], Auth::Required, "Failed to check similarity").await?;
    Ok(unwrap_list(body, "similar_ideas").iter().map(SimilarityMatch::from_raw).collect())
  }

  async fn leaderboard(&self) -> Result<Leaderboard> {
    let body = self.get(&["leaderboard", ""], Auth::None, "Failed to load leaderboard").await?;
    decode(body, "/leaderboard/")
  }

  async fn sdms(&self) -> Result<Vec<SdmSummary>> {
    let body = self.get(&["users", "sdms"], Auth::Required, "Failed to load SDMs").await?;
    decode::<SdmsResponse>(body, "/users/sdms").map(|response| response.sdms)
  }

  async fn login(&self, credentials: &Credentials) -> Result<AuthGrant> {
    let body = self.post(&["auth", "login"], Some(credentials), Auth::None, "Login failed").await?;
    decode(body, "/auth/login")
  }

  async fn register(&self, registration: &Registration) -> Result<AuthGrant> {
    let body =
      self.post(&["auth", "register"], Some(registration), Auth::None, "Registration failed").await?;
    decode(body, "/auth/register")
  }

  async fn profile(&self) -> Result<User> {
    let body = self.get(&["auth", "profile"], Auth::Required, "Failed to load profile").await?;
    decode::<ProfileResponse>(body, "/auth/profile").map(|response| response.user)
  }
}
