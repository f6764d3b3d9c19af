use crate::api::{IdeaApi, SubmitIdeaRequest, SubmitReceipt};
use crate::error::{ClientError, Result};
use crate::idea::normalize::compose;
use crate::idea::{BenefitLevel, Category};
use crate::notify::Notifier;

/// A new idea as entered by a service engineer
#[derive(Debug, Clone, PartialEq)]
pub struct IdeaSubmission {
  pub title: String,
  pub category: Category,
  pub service_area: String,
  pub benefit_level: BenefitLevel,
  pub assigned_sdm_id: String,
  pub implemented: bool,
  pub security_gap: Option<String>,
  pub possible_solution: Option<String>,
  pub automation_opportunity: Option<String>,
  pub automation_solution: Option<String>,
  pub innovative_idea: Option<String>,
}

impl IdeaSubmission {
  fn field(&self, name: &str) -> Option<&str> {
    let value = match name {
      "security_gap" => &self.security_gap,
      "possible_solution" => &self.possible_solution,
      "automation_opportunity" => &self.automation_opportunity,
      "automation_solution" => &self.automation_solution,
      "innovative_idea" => &self.innovative_idea,
      _ => return None,
    };
    value.as_deref().map(str::trim).filter(|text| !text.is_empty())
  }

  /// Check the form and build the request body
  ///
  /// The description is composed from the category-specific fields the same
  /// way records without one are described when displayed.
  pub fn to_request(&self) -> Result<SubmitIdeaRequest> {
    require(&self.title, "Title is required")?;
    require(&self.service_area, "Service area is required")?;
    require(&self.assigned_sdm_id, "Please select an SDM to review this idea")?;

    let primary = match self.category {
      Category::Security => Some(("security_gap", "Please describe the security gap")),
      Category::Automation => {
        Some(("automation_opportunity", "Please describe the automation opportunity"))
      }
      Category::Innovation => Some(("innovative_idea", "Please describe the innovative idea")),
      Category::Other => None,
    };
    if let Some((field, message)) = primary {
      if self.field(field).is_none() {
        return Err(ClientError::validation(message));
      }
    }

    let text = |name: &str| self.field(name).unwrap_or_default().to_string();

    Ok(SubmitIdeaRequest {
      title: self.title.trim().to_string(),
      category: self.category.as_str().to_string(),
      description: compose(self.category, |name| self.field(name)).unwrap_or_default(),
      service_area: self.service_area.trim().to_string(),
      benefit_level: self.benefit_level.level(),
      assigned_sdm_id: self.assigned_sdm_id.trim().to_string(),
      implemented: self.implemented,
      security_gap: text("security_gap"),
      possible_solution: text("possible_solution"),
      automation_opportunity: text("automation_opportunity"),
      automation_solution: text("automation_solution"),
      innovative_idea: text("innovative_idea"),
    })
  }
}

fn require(value: &str, message: &str) -> Result<()> {
  if value.trim().is_empty() {
    Err(ClientError::validation(message))
  } else {
    Ok(())
  }
}

/// Validate and send a submission, reporting the result through `notifier`
pub async fn submit_idea<A>(api: &A, notifier: &dyn Notifier, submission: &IdeaSubmission) -> Result<SubmitReceipt>
where
  A: IdeaApi + ?Sized,
{
  let request = submission.to_request().inspect_err(|err| notifier.error(&err.to_string()))?;

  match api.submit_idea(&request).await {
    Ok(receipt) => {
      notifier.success("Idea submitted successfully!");
      Ok(receipt)
    }
    Err(err) => {
      tracing::warn!(error = %err, "idea submission failed");
      notifier.error(&err.user_message("Network error. Please try again."));
      Err(err)
    }
  }
}
