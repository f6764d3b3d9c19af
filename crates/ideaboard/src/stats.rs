//! Summary figures shown above each dashboard
//!
//! All of these are total over empty input: no division by zero, no NaN.

use crate::api::{Leaderboard, LeaderboardEntry};
use crate::idea::{Idea, IdeaStatus};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineerStats {
  pub total: usize,
  pub approved: usize,
  pub pending: usize,
  pub rejected: usize,
  pub total_points: i64,
}

impl EngineerStats {
  pub fn from_ideas(ideas: &[Idea]) -> Self {
    ideas.iter().fold(Self::default(), |mut stats, idea| {
      stats.total += 1;
      match idea.status() {
        IdeaStatus::Approved => stats.approved += 1,
        IdeaStatus::Pending => stats.pending += 1,
        IdeaStatus::Rejected => stats.rejected += 1,
      }
      stats.total_points += idea.points().unwrap_or(0);
      stats
    })
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SdmStats {
  pub pending_count: usize,
  pub approved_count: usize,
  pub total_points: i64,
  pub avg_points: i64,
}

impl SdmStats {
  pub fn from_lists(worklist: &[Idea], approved: &[Idea]) -> Self {
    let total_points: i64 = approved.iter().map(|idea| idea.points().unwrap_or(0)).sum();
    let approved_count = approved.len();

    Self {
      pending_count: worklist.len(),
      approved_count,
      total_points,
      avg_points: rounded_average(total_points, approved_count),
    }
  }
}

/// Figures for the public landing view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HomeStats {
  pub total_ideas: i64,
  pub total_points: i64,
  pub active_users: usize,
}

impl HomeStats {
  pub fn from_leaderboard(board: &Leaderboard) -> Self {
    Self {
      total_ideas: board.leaderboard.iter().map(|entry| entry.total_ideas.unwrap_or(0)).sum(),
      total_points: board.leaderboard.iter().map(|entry| entry.total_points.unwrap_or(0)).sum(),
      active_users: board.leaderboard.len(),
    }
  }
}

/// Top entries of the leaderboard by points, highest first
pub fn podium(board: &Leaderboard, places: usize) -> Vec<&LeaderboardEntry> {
  let mut entries: Vec<&LeaderboardEntry> = board.leaderboard.iter().collect();
  entries.sort_by_key(|entry| std::cmp::Reverse(entry.total_points.unwrap_or(0)));
  entries.truncate(places);
  entries
}

/// Average rounded half up; zero when there is nothing to average
fn rounded_average(total: i64, count: usize) -> i64 {
  if count == 0 {
    return 0;
  }
  (total as f64 / count as f64 + 0.5).floor() as i64
}
