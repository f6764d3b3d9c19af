//! Description derivation for idea records
//!
//! Different endpoints return different subsets of an idea's fields, and
//! older records only carry the category-specific inputs. Everything that
//! displays a description goes through [`describe`] so the rest of the crate
//! never has to know which variant it was handed.

use super::{Category, RawIdea};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub const NO_DESCRIPTION: &str = "No description";

/// Fields checked first, in priority order
const DESCRIPTION_FIELDS: [&str; 6] =
  ["description", "idea_description", "detailed_description", "full_description", "details", "summary"];

static DESCRIPTION_KEY: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?i)description|summary|details").expect("static pattern"));

/// Canonical description for any JSON value. Never fails and never returns
/// an empty string.
pub fn describe(value: &Value) -> String {
  match value {
    Value::Object(raw) => describe_raw(raw),
    _ => NO_DESCRIPTION.to_string(),
  }
}

pub fn describe_raw(raw: &RawIdea) -> String {
  if let Some(text) = DESCRIPTION_FIELDS.iter().find_map(|field| non_blank(raw.get(*field))) {
    return text.to_string();
  }

  // Any other descriptive-looking key, in the order the server sent them
  if let Some(text) = raw
    .iter()
    .filter(|(key, _)| DESCRIPTION_KEY.is_match(key))
    .find_map(|(_, value)| non_blank(Some(value)))
  {
    return text.to_string();
  }

  let category = raw.get("category").and_then(Value::as_str).map(Category::parse);
  category
    .and_then(|category| compose(category, |field| raw.get(field).and_then(Value::as_str)))
    .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

/// Build a description out of the category-specific inputs
///
/// Security and Automation join their labelled parts with a blank line;
/// Innovation uses its single field verbatim. Returns `None` when nothing
/// usable is present.
pub fn compose<'a, F>(category: Category, field: F) -> Option<String>
where
  F: Fn(&str) -> Option<&'a str>,
{
  match category {
    Category::Security => join_labelled(&[
      ("Security Gap", field("security_gap")),
      ("Possible Solution", field("possible_solution")),
    ]),
    Category::Automation => join_labelled(&[
      ("Automation Opportunity", field("automation_opportunity")),
      ("Automation Solution", field("automation_solution")),
    ]),
    Category::Innovation => {
      field("innovative_idea").filter(|text| !text.is_empty()).map(str::to_string)
    }
    Category::Other => None,
  }
}

fn join_labelled(parts: &[(&str, Option<&str>)]) -> Option<String> {
  let segments: Vec<String> = parts
    .iter()
    .filter_map(|(label, text)| text.filter(|t| !t.is_empty()).map(|t| format!("{label}: {t}")))
    .collect();

  if segments.is_empty() {
    None
  } else {
    Some(segments.join("\n\n"))
  }
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
  value.and_then(Value::as_str).map(str::trim).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_non_objects_have_no_description() {
    for value in [json!(null), json!(42), json!("text"), json!([1, 2]), json!(true)] {
      assert_eq!(describe(&value), NO_DESCRIPTION);
    }
  }

  #[test]
  fn test_primary_field_is_trimmed() {
    let idea = json!({"description": "  Rotate keys nightly  ", "summary": "ignored"});
    assert_eq!(describe(&idea), "Rotate keys nightly");
  }

  #[test]
  fn test_blank_primary_field_falls_through_to_next() {
    let idea = json!({"description": "   ", "idea_description": "Use a queue"});
    assert_eq!(describe(&idea), "Use a queue");
  }

  #[test]
  fn test_priority_order_beats_key_order() {
    let idea = json!({"summary": "short", "full_description": "long form"});
    assert_eq!(describe(&idea), "long form");
  }

  #[test]
  fn test_pattern_matched_key_is_used() {
    let idea = json!({"title": "x", "ProblemSummaryText": " Pager fatigue "});
    assert_eq!(describe(&idea), "Pager fatigue");
  }

  #[test]
  fn test_pattern_match_skips_non_strings() {
    let idea = json!({"description_len": 12, "extra_details": "Real text"});
    assert_eq!(describe(&idea), "Real text");
  }

  #[test]
  fn test_security_composition() {
    let idea = json!({
      "category": "Security",
      "security_gap": "Open port 8080",
      "possible_solution": "Close port"
    });
    assert_eq!(describe(&idea), "Security Gap: Open port 8080\n\nPossible Solution: Close port");
  }

  #[test]
  fn test_security_composition_with_single_part() {
    let idea = json!({"category": "Security", "possible_solution": "Close port"});
    assert_eq!(describe(&idea), "Possible Solution: Close port");
  }

  #[test]
  fn test_automation_composition() {
    let idea = json!({
      "category": "Automation",
      "automation_opportunity": "Manual triage",
      "automation_solution": "Rule engine"
    });
    assert_eq!(
      describe(&idea),
      "Automation Opportunity: Manual triage\n\nAutomation Solution: Rule engine"
    );
  }

  #[test]
  fn test_innovation_is_verbatim() {
    let idea = json!({"category": "Innovation", "innovative_idea": " Chat-ops bot "});
    assert_eq!(describe(&idea), " Chat-ops bot ");
  }

  #[test]
  fn test_category_fields_ignored_for_other_category() {
    let idea = json!({"category": "Other", "security_gap": "Open port"});
    assert_eq!(describe(&idea), NO_DESCRIPTION);
  }

  #[test]
  fn test_empty_category_fields_fall_back() {
    let idea = json!({"category": "Automation", "automation_opportunity": "", "automation_solution": ""});
    assert_eq!(describe(&idea), NO_DESCRIPTION);
  }
}
