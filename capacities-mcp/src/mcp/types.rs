//! Request types for Capacities tools
//!
//! Field names follow the Capacities API (camelCase) so the tool schema, the
//! incoming arguments and the outgoing request body all agree.

use super::validation::{
    validate_max_items, validate_max_length, validate_url, validate_uuid, validate_uuid_list,
    MAX_MD_TEXT_LENGTH, MAX_OVERWRITE_LENGTH, MAX_TAGS,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Request to list all personal spaces
#[derive(Debug, Default, Deserialize)]
pub struct ListSpacesRequest {}

/// Request for details about one space
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSpaceInfoRequest {
    /// UUID of the space
    pub space_id: String,
}

impl GetSpaceInfoRequest {
    /// Check argument constraints
    pub fn validate(&self) -> Result<()> {
        validate_uuid("spaceId", &self.space_id)
    }
}

/// Which part of an object a search matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchMode {
    /// Titles and bodies
    FullText,
    /// Titles only
    Title,
}

impl SearchMode {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::FullText => "fullText",
            SearchMode::Title => "title",
        }
    }
}

/// Request to search across spaces
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Text to look for
    pub search_term: String,
    /// UUIDs of the spaces to search in
    pub space_ids: Vec<String>,
    /// Search mode; the API treats a missing mode as `title`
    #[serde(default)]
    pub mode: Option<SearchMode>,
    /// Restrict results to these structure UUIDs
    #[serde(default)]
    pub filter_structure_ids: Option<Vec<String>>,
}

impl SearchRequest {
    /// Check argument constraints
    pub fn validate(&self) -> Result<()> {
        validate_uuid_list("spaceIds", &self.space_ids)?;
        if let Some(ids) = &self.filter_structure_ids {
            validate_uuid_list("filterStructureIds", ids)?;
        }
        Ok(())
    }
}

/// Request to save a weblink
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWeblinkRequest {
    /// UUID of the target space
    pub space_id: String,
    /// The link to save
    pub url: String,
    /// Custom title instead of the page title
    #[serde(default)]
    pub title_overwrite: Option<String>,
    /// Custom description instead of the page description
    #[serde(default)]
    pub description_overwrite: Option<String>,
    /// Tag names; unknown tags are created
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Markdown added to the notes section
    #[serde(default)]
    pub md_text: Option<String>,
}

impl SaveWeblinkRequest {
    /// Check argument constraints
    pub fn validate(&self) -> Result<()> {
        validate_uuid("spaceId", &self.space_id)?;
        validate_url("url", &self.url)?;
        if let Some(title) = &self.title_overwrite {
            validate_max_length("titleOverwrite", title, MAX_OVERWRITE_LENGTH)?;
        }
        if let Some(description) = &self.description_overwrite {
            validate_max_length("descriptionOverwrite", description, MAX_OVERWRITE_LENGTH)?;
        }
        if let Some(tags) = &self.tags {
            validate_max_items("tags", tags, MAX_TAGS)?;
        }
        if let Some(md_text) = &self.md_text {
            validate_max_length("mdText", md_text, MAX_MD_TEXT_LENGTH)?;
        }
        Ok(())
    }
}

/// Where daily-note content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DailyNoteOrigin {
    /// The Capacities command palette
    CommandPalette,
}

impl DailyNoteOrigin {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            DailyNoteOrigin::CommandPalette => "commandPalette",
        }
    }
}

/// Request to append markdown to today's daily note
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveToDailyNoteRequest {
    /// UUID of the target space
    pub space_id: String,
    /// Markdown to append
    pub md_text: String,
    /// Origin label
    #[serde(default)]
    pub origin: Option<DailyNoteOrigin>,
    /// Suppress the time stamp Capacities adds to the entry
    #[serde(default)]
    pub no_timestamp: Option<bool>,
}

impl SaveToDailyNoteRequest {
    /// Check argument constraints
    pub fn validate(&self) -> Result<()> {
        validate_uuid("spaceId", &self.space_id)?;
        validate_max_length("mdText", &self.md_text, MAX_MD_TEXT_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SPACE_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[test]
    fn test_search_request_optional_fields_default_to_none() {
        let request: SearchRequest = serde_json::from_value(json!({
            "searchTerm": "test query",
            "spaceIds": [SPACE_ID]
        }))
        .unwrap();
        assert_eq!(request.search_term, "test query");
        assert!(request.mode.is_none());
        assert!(request.filter_structure_ids.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_search_mode_values() {
        let request: SearchRequest = serde_json::from_value(json!({
            "searchTerm": "x",
            "spaceIds": [],
            "mode": "fullText"
        }))
        .unwrap();
        assert_eq!(request.mode, Some(SearchMode::FullText));
        assert_eq!(SearchMode::Title.as_str(), "title");

        let invalid = serde_json::from_value::<SearchRequest>(json!({
            "searchTerm": "x",
            "spaceIds": [],
            "mode": "fuzzy"
        }));
        assert!(invalid.is_err());
    }

    #[test]
    fn test_search_request_rejects_bad_filter_ids() {
        let request: SearchRequest = serde_json::from_value(json!({
            "searchTerm": "x",
            "spaceIds": [SPACE_ID],
            "filterStructureIds": ["struct-456"]
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_weblink_request_validation() {
        let request: SaveWeblinkRequest = serde_json::from_value(json!({
            "spaceId": SPACE_ID,
            "url": "https://example.com",
            "tags": (0..31).map(|i| format!("t{i}")).collect::<Vec<_>>()
        }))
        .unwrap();
        assert!(request.validate().unwrap_err().to_string().contains("tags"));

        let request: SaveWeblinkRequest = serde_json::from_value(json!({
            "spaceId": SPACE_ID,
            "url": "https://example.com",
            "titleOverwrite": "t".repeat(501)
        }))
        .unwrap();
        assert!(request
            .validate()
            .unwrap_err()
            .to_string()
            .contains("titleOverwrite"));

        let request: SaveWeblinkRequest = serde_json::from_value(json!({
            "spaceId": SPACE_ID,
            "url": "not a url"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_daily_note_request_fields() {
        let request: SaveToDailyNoteRequest = serde_json::from_value(json!({
            "spaceId": SPACE_ID,
            "mdText": "Note",
            "origin": "commandPalette",
            "noTimestamp": false
        }))
        .unwrap();
        assert_eq!(request.origin, Some(DailyNoteOrigin::CommandPalette));
        assert_eq!(request.no_timestamp, Some(false));
        assert!(request.validate().is_ok());

        let invalid = serde_json::from_value::<SaveToDailyNoteRequest>(json!({
            "spaceId": SPACE_ID,
            "mdText": "Note",
            "origin": "api"
        }));
        assert!(invalid.is_err());
    }

    #[test]
    fn test_daily_note_requires_md_text() {
        let missing = serde_json::from_value::<SaveToDailyNoteRequest>(json!({
            "spaceId": SPACE_ID
        }));
        assert!(missing.is_err());
    }

    #[test]
    fn test_list_spaces_accepts_empty_arguments() {
        let request: std::result::Result<ListSpacesRequest, _> =
            serde_json::from_value(json!({}));
        assert!(request.is_ok());
    }
}
