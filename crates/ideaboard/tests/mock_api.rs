#![allow(dead_code)]

use async_trait::async_trait;
use ideaboard::api::{
  ApproveReceipt, AuthGrant, Credentials, IdeaApi, Leaderboard, Registration, SdmSummary,
  SimilarityMatch, SubmitIdeaRequest, SubmitReceipt,
};
use ideaboard::notify::{NotificationLevel, Notifier};
use ideaboard::session::{Role, User};
use ideaboard::{ClientError, RawIdea, Result};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// One request the client made, with its payload
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
  Detail(String),
  MyIdeas,
  Worklist,
  Approved,
  Submit(SubmitIdeaRequest),
  Approve(String),
  Reject(String, String),
  Similar(String),
  Leaderboard,
  Sdms,
  Login(String),
  Register(String),
  Profile,
}

pub fn raw(value: Value) -> RawIdea {
  value.as_object().cloned().expect("test records are objects")
}

pub fn user(role: Role) -> User {
  User {
    id: "user-1".to_string(),
    display_name: "Test User".to_string(),
    role,
    username: Some("testuser".to_string()),
    email: Some("test@example.com".to_string()),
    avatar_data: None,
  }
}

/// In-memory review server
///
/// Approve and reject move ideas between the worklist and approved lists, so
/// a reload after a decision sees the new state.
pub struct MockApi {
  pub details: HashMap<String, RawIdea>,
  pub failing_details: HashSet<String>,
  pub detail_delays: HashMap<String, u64>,
  pub my_ideas: Mutex<Option<Vec<RawIdea>>>,
  pub worklist: Mutex<Option<Vec<RawIdea>>>,
  pub approved: Mutex<Option<Vec<RawIdea>>>,
  pub similar: Vec<SimilarityMatch>,
  pub board: Leaderboard,
  pub sdm_list: Vec<SdmSummary>,
  pub user: Option<User>,
  pub should_fail_reviews: bool,
  pub points_awarded: i64,
  calls: Mutex<Vec<Call>>,
  in_flight: AtomicUsize,
  max_in_flight: AtomicUsize,
}

impl Default for MockApi {
  fn default() -> Self {
    Self::new()
  }
}

impl MockApi {
  pub fn new() -> Self {
    Self {
      details: HashMap::new(),
      failing_details: HashSet::new(),
      detail_delays: HashMap::new(),
      my_ideas: Mutex::new(Some(Vec::new())),
      worklist: Mutex::new(Some(Vec::new())),
      approved: Mutex::new(Some(Vec::new())),
      similar: Vec::new(),
      board: Leaderboard::default(),
      sdm_list: Vec::new(),
      user: None,
      should_fail_reviews: false,
      points_awarded: 25,
      calls: Mutex::new(Vec::new()),
      in_flight: AtomicUsize::new(0),
      max_in_flight: AtomicUsize::new(0),
    }
  }

  /// An SDM with two pending ideas and one approved idea lacking a description
  pub fn with_review_data() -> Self {
    let mut mock = Self::new();
    *mock.worklist.get_mut().unwrap() = Some(vec![
      raw(json!({"id": "w1", "title": "Cache DNS", "status": "pending", "category": "Automation",
        "automation_opportunity": "Manual DNS flush", "automation_solution": "Cron job"})),
      raw(json!({"id": "w2", "title": "Rotate keys", "status": "pending", "category": "Security",
        "description": "Keys never rotate"})),
    ]);
    *mock.approved.get_mut().unwrap() =
      Some(vec![raw(json!({"id": "a1", "title": "Blue/green deploys", "status": "approved", "points": 40}))]);
    mock.details.insert(
      "a1".to_string(),
      raw(json!({"id": "a1", "title": "Blue/green deploys", "status": "approved", "points": 40,
        "category": "Innovation", "innovative_idea": "Two identical fleets"})),
    );
    mock
  }

  pub fn with_detail(mut self, id: &str, detail: Value) -> Self {
    self.details.insert(id.to_string(), raw(detail));
    self
  }

  pub fn with_failing_detail(mut self, id: &str) -> Self {
    self.failing_details.insert(id.to_string());
    self
  }

  pub fn with_delay(mut self, id: &str, millis: u64) -> Self {
    self.detail_delays.insert(id.to_string(), millis);
    self
  }

  pub fn with_my_ideas(self, ideas: Vec<RawIdea>) -> Self {
    *self.my_ideas.lock().unwrap() = Some(ideas);
    self
  }

  pub fn with_lists(self, worklist: Vec<RawIdea>, approved: Vec<RawIdea>) -> Self {
    *self.worklist.lock().unwrap() = Some(worklist);
    *self.approved.lock().unwrap() = Some(approved);
    self
  }

  /// `None` makes the list endpoint fail
  pub fn failing_worklist(self) -> Self {
    *self.worklist.lock().unwrap() = None;
    self
  }

  pub fn calls(&self) -> Vec<Call> {
    self.calls.lock().unwrap().clone()
  }

  pub fn count(&self, wanted: impl Fn(&Call) -> bool) -> usize {
    self.calls.lock().unwrap().iter().filter(|call| wanted(call)).count()
  }

  pub fn max_concurrent_details(&self) -> usize {
    self.max_in_flight.load(Ordering::SeqCst)
  }

  fn record(&self, call: Call) {
    self.calls.lock().unwrap().push(call);
  }

  fn list(&self, list: &Mutex<Option<Vec<RawIdea>>>, message: &str) -> Result<Vec<RawIdea>> {
    list.lock().unwrap().clone().ok_or_else(|| ClientError::http(500, message))
  }

  fn take_pending(&self, id: &str) -> Option<RawIdea> {
    let mut worklist = self.worklist.lock().unwrap();
    let ideas = worklist.as_mut()?;
    let index = ideas.iter().position(|idea| idea.get("id").and_then(Value::as_str) == Some(id))?;
    Some(ideas.remove(index))
  }

  fn authenticated_user(&self) -> Result<User> {
    self.user.clone().ok_or(ClientError::NotAuthenticated)
  }
}

#[async_trait]
impl IdeaApi for MockApi {
  async fn idea_detail(&self, id: &str) -> Result<RawIdea> {
    self.record(Call::Detail(id.to_string()));

    let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    self.max_in_flight.fetch_max(now, Ordering::SeqCst);
    let millis = self.detail_delays.get(id).copied().unwrap_or(5);
    tokio::time::sleep(Duration::from_millis(millis)).await;
    self.in_flight.fetch_sub(1, Ordering::SeqCst);

    if self.failing_details.contains(id) {
      return Err(ClientError::http(500, "Failed to load idea"));
    }
    self.details.get(id).cloned().ok_or_else(|| ClientError::http(404, "Idea not found"))
  }

  async fn my_ideas(&self) -> Result<Vec<RawIdea>> {
    self.record(Call::MyIdeas);
    self.list(&self.my_ideas, "Failed to load ideas")
  }

  async fn worklist(&self) -> Result<Vec<RawIdea>> {
    self.record(Call::Worklist);
    self.list(&self.worklist, "Failed to load worklist")
  }

  async fn approved_ideas(&self) -> Result<Vec<RawIdea>> {
    self.record(Call::Approved);
    self.list(&self.approved, "Failed to load approved ideas")
  }

  async fn submit_idea(&self, request: &SubmitIdeaRequest) -> Result<SubmitReceipt> {
    self.record(Call::Submit(request.clone()));
    Ok(SubmitReceipt {
      message: Some("Idea submitted successfully".to_string()),
      idea: Some(raw(json!({"id": "new-1", "title": request.title}))),
    })
  }

  async fn approve(&self, id: &str) -> Result<ApproveReceipt> {
    self.record(Call::Approve(id.to_string()));
    if self.should_fail_reviews {
      return Err(ClientError::http(500, ""));
    }

    let mut idea = self.take_pending(id).ok_or_else(|| ClientError::http(404, "Idea not found"))?;
    idea.insert("status".to_string(), json!("approved"));
    idea.insert("points".to_string(), json!(self.points_awarded));
    if let Some(approved) = self.approved.lock().unwrap().as_mut() {
      approved.push(idea);
    }

    Ok(ApproveReceipt {
      message: Some("Idea approved successfully".to_string()),
      points_awarded: Some(self.points_awarded),
    })
  }

  async fn reject(&self, id: &str, reason: &str) -> Result<()> {
    self.record(Call::Reject(id.to_string(), reason.to_string()));
    if self.should_fail_reviews {
      return Err(ClientError::http(500, "Failed to reject idea"));
    }

    self.take_pending(id).ok_or_else(|| ClientError::http(404, "Idea not found"))?;
    Ok(())
  }

  async fn similar_ideas(&self, id: &str) -> Result<Vec<SimilarityMatch>> {
    self.record(Call::Similar(id.to_string()));
    Ok(self.similar.clone())
  }

  async fn leaderboard(&self) -> Result<Leaderboard> {
    self.record(Call::Leaderboard);
    Ok(self.board.clone())
  }

  async fn sdms(&self) -> Result<Vec<SdmSummary>> {
    self.record(Call::Sdms);
    Ok(self.sdm_list.clone())
  }

  async fn login(&self, credentials: &Credentials) -> Result<AuthGrant> {
    self.record(Call::Login(credentials.username.clone()));
    let user = self.user.clone().ok_or_else(|| ClientError::http(401, "Invalid credentials"))?;
    Ok(AuthGrant { token: "token-123".to_string(), user })
  }

  async fn register(&self, registration: &Registration) -> Result<AuthGrant> {
    self.record(Call::Register(registration.username.clone()));
    let user = User {
      id: "user-new".to_string(),
      display_name: registration.display_name.clone(),
      role: registration.role,
      username: Some(registration.username.clone()),
      email: Some(registration.email.clone()),
      avatar_data: None,
    };
    Ok(AuthGrant { token: "token-new".to_string(), user })
  }

  async fn profile(&self) -> Result<User> {
    self.record(Call::Profile);
    self.authenticated_user()
  }
}

/// Notifier that keeps everything it is told
#[derive(Default)]
pub struct RecordingNotifier {
  pub messages: Mutex<Vec<(NotificationLevel, String)>>,
}

impl RecordingNotifier {
  pub fn all(&self) -> Vec<(NotificationLevel, String)> {
    self.messages.lock().unwrap().clone()
  }

  pub fn last(&self) -> Option<(NotificationLevel, String)> {
    self.messages.lock().unwrap().last().cloned()
  }
}

impl Notifier for RecordingNotifier {
  fn notify(&self, level: NotificationLevel, message: &str) {
    self.messages.lock().unwrap().push((level, message.to_string()));
  }
}
