use super::{reported, AppContext};
use crate::display;
use crate::idea::{BenefitLevel, Category};
use crate::session::Role;
use crate::submission::{submit_idea, IdeaSubmission};
use anyhow::{anyhow, Result};

pub struct SubmitArgs {
  pub title: String,
  pub category: String,
  pub service_area: String,
  pub benefit: String,
  pub sdm: String,
  pub implemented: bool,
  pub security_gap: Option<String>,
  pub possible_solution: Option<String>,
  pub automation_opportunity: Option<String>,
  pub automation_solution: Option<String>,
  pub innovative_idea: Option<String>,
}

pub async fn handle(ctx: &AppContext, args: SubmitArgs) -> Result<()> {
  let (session, api) = ctx.require_role(Role::ServiceEngineer).await?;

  let benefit_level = BenefitLevel::from_label(&args.benefit).ok_or_else(|| {
    anyhow!("Unknown benefit level '{}'. Use 1-5 or one of: {}", args.benefit, BenefitLevel::LABELS.join(", "))
  })?;

  let submission = IdeaSubmission {
    title: args.title,
    category: Category::parse(&args.category),
    service_area: args.service_area,
    benefit_level,
    assigned_sdm_id: args.sdm,
    implemented: args.implemented,
    security_gap: args.security_gap,
    possible_solution: args.possible_solution,
    automation_opportunity: args.automation_opportunity,
    automation_solution: args.automation_solution,
    innovative_idea: args.innovative_idea,
  };

  let receipt =
    submit_idea(api.as_ref(), ctx.notifier.as_ref(), &submission).await.map_err(reported)?;
  if let Some(id) = receipt.idea_id() {
    bentley::info(&format!("Idea id: {id}"));
  }

  let dashboard = ctx.loader(api, session.role()).load().await;
  display::display_dashboard(&dashboard, &session.user);
  Ok(())
}
