//! Hydrating partial idea records with their full detail
//!
//! List endpoints return trimmed-down records (the approved list, for one,
//! often has no description). Enrichment fetches the detail record where it
//! is needed and merges it over the list entry. Failures are logged and the
//! original record is kept; they never reach the caller.

use crate::api::IdeaApi;
use crate::idea::{raw_id, raw_status, IdeaStatus, RawIdea};
use futures::stream::{self, StreamExt};
use serde_json::Value;

/// Whether a record should be hydrated before display
///
/// Approved ideas always are. Anything else only when its `description`
/// field is missing or blank. Records without an id never are.
pub fn needs_detail(idea: &RawIdea) -> bool {
  if raw_id(idea).is_none() {
    return false;
  }

  if raw_status(idea) == Some(IdeaStatus::Approved) {
    return true;
  }

  !idea.get("description").and_then(Value::as_str).is_some_and(|text| !text.trim().is_empty())
}

/// Hydrate one record
///
/// For an approved idea a non-success answer gets exactly one more attempt;
/// transport failures are not retried. Fetched fields win over the
/// record's own fields when both are present.
pub async fn enrich_idea<A>(api: &A, idea: RawIdea) -> RawIdea
where
  A: IdeaApi + ?Sized,
{
  if !needs_detail(&idea) {
    return idea;
  }
  let Some(id) = raw_id(&idea) else {
    return idea;
  };

  let mut fetched = api.idea_detail(&id).await;
  if raw_status(&idea) == Some(IdeaStatus::Approved) {
    if let Err(err) = &fetched {
      if err.is_http() {
        tracing::debug!(idea_id = %id, error = %err, "retrying detail fetch for approved idea");
        fetched = api.idea_detail(&id).await;
      }
    }
  }

  match fetched {
    Ok(detail) => merge(idea, detail),
    Err(err) => {
      tracing::warn!(idea_id = %id, error = %err, "failed to enrich idea details");
      idea
    }
  }
}

/// Hydrate a whole list, at most `limit` fetches in flight at once
///
/// The output has the same length as the input and entry `i` of the output
/// always corresponds to entry `i` of the input, whatever order the fetches
/// finish in.
pub async fn enrich_all<A>(api: &A, ideas: Vec<RawIdea>, limit: usize) -> Vec<RawIdea>
where
  A: IdeaApi + ?Sized,
{
  stream::iter(ideas.into_iter().map(|idea| enrich_idea(api, idea)))
    .buffered(limit.max(1))
    .collect()
    .await
}

/// Shallow merge; `detail` wins for keys present in both
pub fn merge(mut original: RawIdea, detail: RawIdea) -> RawIdea {
  for (key, value) in detail {
    original.insert(key, value);
  }
  original
}
