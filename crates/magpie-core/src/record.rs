use crate::Result;
use serde::Serialize;

/// A single scraped profile.
///
/// Every field is either the text (or attribute value) extracted from the
/// rendered page, or `None` when the page did not contain the targeted node.
/// A record is populated once per run and never mutated after printing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    #[serde(rename = "profile_name")]
    pub name: Option<String>,

    #[serde(rename = "profile_handle")]
    pub handle: Option<String>,

    #[serde(rename = "profile_bio")]
    pub bio: Option<String>,

    #[serde(rename = "profile_category")]
    pub category: Option<String>,

    #[serde(rename = "profile_website")]
    pub website: Option<String>,

    #[serde(rename = "profile_joining_date")]
    pub joining_date: Option<String>,

    #[serde(rename = "profile_following")]
    pub following: Option<String>,

    #[serde(rename = "profile_followers")]
    pub followers: Option<String>,
}

impl ProfileRecord {
    /// Names of the fields that came back absent, in output order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.name.is_none() {
            missing.push("profile_name");
        }
        if self.handle.is_none() {
            missing.push("profile_handle");
        }
        if self.bio.is_none() {
            missing.push("profile_bio");
        }
        if self.category.is_none() {
            missing.push("profile_category");
        }
        if self.website.is_none() {
            missing.push("profile_website");
        }
        if self.joining_date.is_none() {
            missing.push("profile_joining_date");
        }
        if self.following.is_none() {
            missing.push("profile_following");
        }
        if self.followers.is_none() {
            missing.push("profile_followers");
        }

        missing
    }

    /// True when no field was extracted at all.
    pub fn is_empty(&self) -> bool {
        self.missing_fields().len() == 8
    }
}

/// Serialize a record list as pretty-printed JSON.
///
/// The output is always a list; a normal run produces exactly one record.
pub fn to_json(records: &[ProfileRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_empty() {
        let record = ProfileRecord::default();

        assert!(record.is_empty());
        assert_eq!(record.missing_fields().len(), 8);
    }

    #[test]
    fn test_missing_fields_reports_only_absent() {
        let record = ProfileRecord {
            name: Some("Jane Doe".to_string()),
            followers: Some("500 Followers".to_string()),
            ..Default::default()
        };

        let missing = record.missing_fields();
        assert_eq!(missing.len(), 6);
        assert!(!missing.contains(&"profile_name"));
        assert!(!missing.contains(&"profile_followers"));
        assert!(missing.contains(&"profile_bio"));
    }

    #[test]
    fn test_json_output_uses_profile_field_names() {
        let record = ProfileRecord {
            name: Some("Jane Doe".to_string()),
            ..Default::default()
        };

        let json = to_json(&[record]).unwrap();

        assert!(json.starts_with('['));
        assert!(json.contains("\"profile_name\": \"Jane Doe\""));
        assert!(json.contains("\"profile_bio\": null"));
    }

    #[test]
    fn test_json_output_is_a_single_element_list() {
        let json = to_json(&[ProfileRecord::default()]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.as_array().map(|a| a.len()), Some(1));
    }
}
