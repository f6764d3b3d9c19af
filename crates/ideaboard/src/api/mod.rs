use crate::error::Result;
use crate::idea::RawIdea;
use crate::session::User;
use async_trait::async_trait;

pub mod envelope;
pub mod http;
pub mod types;

pub use http::HttpIdeaApi;
pub use types::{
  Activity, ApproveReceipt, AuthGrant, Credentials, Leaderboard, LeaderboardEntry, Registration,
  SdmSummary, SimilarityMatch, SubmitIdeaRequest, SubmitReceipt,
};

/// The review server's REST surface
///
/// Every call either yields decoded data or a [`crate::ClientError`]; list
/// endpoints return raw records so they can be enriched before being turned
/// into [`crate::idea::Idea`] values.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdeaApi: Send + Sync {
  /// Full record for one idea, already unwrapped from its envelope
  async fn idea_detail(&self, id: &str) -> Result<RawIdea>;

  /// Ideas submitted by the logged-in engineer
  async fn my_ideas(&self) -> Result<Vec<RawIdea>>;

  /// Pending ideas assigned to the logged-in SDM
  async fn worklist(&self) -> Result<Vec<RawIdea>>;

  /// Every approved idea
  async fn approved_ideas(&self) -> Result<Vec<RawIdea>>;

  async fn submit_idea(&self, request: &SubmitIdeaRequest) -> Result<SubmitReceipt>;

  async fn approve(&self, id: &str) -> Result<ApproveReceipt>;

  async fn reject(&self, id: &str, reason: &str) -> Result<()>;

  /// Previously submitted ideas ranked by resemblance to `id`
  async fn similar_ideas(&self, id: &str) -> Result<Vec<SimilarityMatch>>;

  /// Public standings; needs no session
  async fn leaderboard(&self) -> Result<Leaderboard>;

  async fn sdms(&self) -> Result<Vec<SdmSummary>>;

  async fn login(&self, credentials: &Credentials) -> Result<AuthGrant>;

  async fn register(&self, registration: &Registration) -> Result<AuthGrant>;

  /// The user behind the current token
  async fn profile(&self) -> Result<User>;
}
