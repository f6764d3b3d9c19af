use crate::api::{Leaderboard, SdmSummary};
use crate::dashboard::Dashboard;
use crate::idea::{Idea, IdeaStatus};
use crate::session::User;
use crate::stats::{podium, EngineerStats, HomeStats, SdmStats};
use crate::workflow::SimilarityReport;
use colored::*;

const WIDTH: usize = 80;
const SNIPPET_CHARS: usize = 100;

/// First `max` characters of `text`, with `...` appended when cut
pub fn truncate(text: &str, max: usize) -> String {
  if text.chars().count() <= max {
    return text.to_string();
  }
  let cut: String = text.chars().take(max).collect();
  format!("{cut}...")
}

pub fn benefit_text(idea: &Idea) -> String {
  idea.benefit_level.map(|level| level.label().to_string()).unwrap_or_else(|| "Unrated".to_string())
}

fn status_badge(status: IdeaStatus) -> ColoredString {
  match status {
    IdeaStatus::Approved => "Approved".green().bold(),
    IdeaStatus::Pending => "Pending Review".yellow().bold(),
    IdeaStatus::Rejected => "Rejected".red().bold(),
  }
}

fn points_line(idea: &Idea) -> ColoredString {
  match idea.status() {
    IdeaStatus::Approved => format!("+{} pts", idea.points().unwrap_or(0)).green().bold(),
    other => status_badge(other),
  }
}

pub fn display_dashboard(dashboard: &Dashboard, user: &User) {
  bentley::as_banner(
    |msg| println!("{}", msg),
    &format!("Welcome {}! ({})", user.display_name, user.role),
    Some(WIDTH),
    Some('='),
  );

  match dashboard {
    Dashboard::Engineer { ideas, stats } => {
      display_engineer_stats(stats);
      println!();
      println!("{}", "My Ideas".bold().underline());
      if ideas.is_empty() {
        println!("  No ideas submitted yet. Use 'ideaboard submit' to share one.");
      }
      for idea in ideas {
        display_idea_card(idea);
      }
    }
    Dashboard::Sdm { worklist, approved, stats } => {
      display_sdm_stats(stats);
      println!();
      println!("{}", "Worklist".bold().underline());
      if worklist.is_empty() {
        println!("  No ideas waiting for review.");
      }
      for idea in worklist {
        display_idea_card(idea);
      }
      println!();
      println!("{}", "Approved Ideas".bold().underline());
      if approved.is_empty() {
        println!("  No approved ideas yet.");
      }
      for idea in approved {
        display_idea_card(idea);
      }
    }
  }
}

pub fn display_engineer_stats(stats: &EngineerStats) {
  println!(
    "{} {}   {} {}   {} {}   {} {}   {} {}",
    "Total Ideas:".dimmed(),
    stats.total.to_string().bold(),
    "Approved:".dimmed(),
    stats.approved.to_string().green().bold(),
    "Pending:".dimmed(),
    stats.pending.to_string().yellow().bold(),
    "Rejected:".dimmed(),
    stats.rejected.to_string().red().bold(),
    "Total Points:".dimmed(),
    stats.total_points.to_string().cyan().bold(),
  );
}

pub fn display_sdm_stats(stats: &SdmStats) {
  println!(
    "{} {}   {} {}   {} {}   {} {}",
    "Pending Review:".dimmed(),
    stats.pending_count.to_string().yellow().bold(),
    "Approved:".dimmed(),
    stats.approved_count.to_string().green().bold(),
    "Points Awarded:".dimmed(),
    stats.total_points.to_string().cyan().bold(),
    "Avg Points:".dimmed(),
    stats.avg_points.to_string().cyan().bold(),
  );
}

pub fn display_idea_card(idea: &Idea) {
  println!();
  println!("  {}  {}", idea.title.bold(), points_line(idea));
  println!(
    "    [{}] [{}]  id: {}",
    idea.category.to_string().blue(),
    benefit_text(idea).magenta(),
    idea.id.as_deref().unwrap_or("-").dimmed()
  );

  let mut meta = Vec::new();
  if let Some(engineer) = &idea.engineer_name {
    meta.push(format!("by {engineer}"));
  }
  if let Some(sdm) = &idea.assigned_sdm_name {
    meta.push(format!("reviewer {sdm}"));
  }
  if let Some(area) = &idea.service_area {
    meta.push(area.clone());
  }
  if let Some(date) = &idea.submission_date {
    meta.push(date.clone());
  }
  if !meta.is_empty() {
    println!("    {}", meta.join(" | ").dimmed());
  }

  println!("    {}", truncate(&idea.description.replace('\n', " "), SNIPPET_CHARS));
}

pub fn display_idea_details(idea: &Idea) {
  bentley::as_banner(|msg| println!("{}", msg), &idea.title, Some(WIDTH), Some('-'));
  println!(
    "{} {}   {} {}   {} {}",
    "Category:".dimmed(),
    idea.category,
    "Benefit:".dimmed(),
    benefit_text(idea),
    "Status:".dimmed(),
    points_line(idea)
  );
  if let Some(area) = &idea.service_area {
    println!("{} {}", "Service Area:".dimmed(), area);
  }
  if let Some(engineer) = &idea.engineer_name {
    println!("{} {}", "Submitted by:".dimmed(), engineer);
  }
  if let Some(sdm) = &idea.assigned_sdm_name {
    println!("{} {}", "Assigned SDM:".dimmed(), sdm);
  }
  if let Some(date) = &idea.submission_date {
    println!("{} {}", "Submitted:".dimmed(), date);
  }
  println!("{} {}", "Implemented:".dimmed(), if idea.implemented { "Yes" } else { "No" });
  println!();
  println!("{}", idea.description);
  if let Some(reason) = idea.rejection_reason() {
    println!();
    println!("{} {}", "Rejection reason:".red().bold(), reason);
  }
  println!("{}", bentley::banner_line(WIDTH, '-'));
}

pub fn display_similarity(report: &SimilarityReport) {
  if report.matches.is_empty() {
    bentley::info(&format!("No similar ideas found for \"{}\".", report.title));
    return;
  }

  println!("{}", format!("Similar ideas to \"{}\"", report.title).bold());
  for m in &report.matches {
    let badge = match m.idea.status() {
      IdeaStatus::Approved => "Approved".green(),
      _ => "Pending".yellow(),
    };
    println!();
    println!("  {}  {}", m.idea.title.bold(), format!("{}% match", m.score).cyan().bold());
    println!("    [{}] {}", m.idea.category.to_string().blue(), badge);
    println!("    {}", truncate(&m.idea.description, SNIPPET_CHARS));
  }
}

pub fn display_leaderboard(board: &Leaderboard) {
  let stats = HomeStats::from_leaderboard(board);
  println!(
    "{} {}   {} {}   {} {}",
    "Ideas:".dimmed(),
    stats.total_ideas.to_string().bold(),
    "Points:".dimmed(),
    stats.total_points.to_string().cyan().bold(),
    "Contributors:".dimmed(),
    stats.active_users.to_string().bold(),
  );

  println!();
  println!("{}", "Leaderboard".bold().underline());
  if board.leaderboard.is_empty() {
    println!("  No approved ideas yet. Be the first!");
  }
  for (rank, entry) in podium(board, board.leaderboard.len()).iter().enumerate() {
    let name = entry.display_name.as_deref().or(entry.username.as_deref()).unwrap_or("Unknown");
    let medal = match rank {
      0 => "🥇",
      1 => "🥈",
      2 => "🥉",
      _ => "  ",
    };
    println!(
      "  {medal} {:>2}. {:<30} {:>6} pts  ({} ideas)",
      rank + 1,
      name,
      entry.total_points.unwrap_or(0),
      entry.total_ideas.unwrap_or(0)
    );
  }

  println!();
  println!("{}", "Recent Activity".bold().underline());
  if board.recent_activities.is_empty() {
    println!("  No recent activity.");
  }
  for activity in &board.recent_activities {
    println!(
      "  {} - {}  {}",
      activity.engineer_name.as_deref().unwrap_or("Someone"),
      activity.category.as_deref().unwrap_or("Idea"),
      format!("+{} pts", activity.points.unwrap_or(0)).green()
    );
  }
}

pub fn display_sdms(sdms: &[SdmSummary]) {
  if sdms.is_empty() {
    bentley::warn("No SDMs are registered yet");
    return;
  }
  for sdm in sdms {
    println!("  {:<38} {}", sdm.id.dimmed(), sdm.display_name);
  }
}
