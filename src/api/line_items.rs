//
//  samplify
//  api/line_items.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Line item endpoints and data structures.
//!
//! A line item is one audience inside a project: a country and language,
//! a required number of completes, and an optional quota plan that targets
//! and splits respondents by attribute.
//!
//! # Quota Plans
//!
//! ```text
//! QuotaPlan
//! ├── filters: every respondent must match (attribute + allowed options)
//! └── quotaGroups
//!     └── quotaCells: share of completes (perc) per combination of nodes
//! ```
//!
//! # Example
//!
//! ```rust
//! use samplify::api::line_items::{QuotaCell, QuotaFilter, QuotaGroup, QuotaNode, QuotaPlan};
//!
//! let plan = QuotaPlan {
//!     filters: vec![QuotaFilter::new("4091", ["3", "4"])],
//!     quota_groups: vec![QuotaGroup {
//!         name: "Gender distribution".to_string(),
//!         quota_cells: vec![
//!             QuotaCell::new(vec![QuotaNode::new("11", ["1"])], 30),
//!             QuotaCell::new(vec![QuotaNode::new("11", ["2"])], 70),
//!         ],
//!     }],
//! };
//!
//! assert_eq!(plan.quota_groups[0].total_perc(), 100);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::client::SamplifyClient;
use super::common::{ApiResponse, SamplifyError};
use super::projects::project_path;
use super::query::{self, QueryOptions};

/// Lifecycle state of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineItemState {
    Provisioned,
    AwaitingApproval,
    Launched,
    Paused,
    Closed,
    Completed,
    Invoiced,
    Rejected,
}

impl LineItemState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provisioned => "PROVISIONED",
            Self::AwaitingApproval => "AWAITING_APPROVAL",
            Self::Launched => "LAUNCHED",
            Self::Paused => "PAUSED",
            Self::Closed => "CLOSED",
            Self::Completed => "COMPLETED",
            Self::Invoiced => "INVOICED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for LineItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State change requested through [`SamplifyClient::update_line_item_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineItemAction {
    Launch,
    Pause,
    Close,
}

impl LineItemAction {
    /// Returns the path segment for the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Launch => "launch",
            Self::Pause => "pause",
            Self::Close => "close",
        }
    }

    /// The state a line item is expected to reach after the action.
    pub fn target_state(&self) -> LineItemState {
        match self {
            Self::Launch => LineItemState::Launched,
            Self::Pause => LineItemState::Paused,
            Self::Close => LineItemState::Closed,
        }
    }
}

impl fmt::Display for LineItemAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineItemAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "launch" => Ok(Self::Launch),
            "pause" => Ok(Self::Pause),
            "close" => Ok(Self::Close),
            other => Err(format!("unknown line item action '{}'", other)),
        }
    }
}

/// Targeting and distribution rules of a line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaPlan {
    #[serde(default)]
    pub filters: Vec<QuotaFilter>,
    #[serde(default)]
    pub quota_groups: Vec<QuotaGroup>,
}

/// Restricts respondents to the listed options of one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaFilter {
    pub attribute_id: String,
    pub options: Vec<String>,
}

impl QuotaFilter {
    pub fn new<I, S>(attribute_id: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attribute_id: attribute_id.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaGroup {
    pub name: String,
    pub quota_cells: Vec<QuotaCell>,
}

impl QuotaGroup {
    /// Sum of the cell percentages; a complete group adds up to 100.
    pub fn total_perc(&self) -> u32 {
        self.quota_cells.iter().map(|cell| cell.perc).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaCell {
    pub quota_nodes: Vec<QuotaNode>,
    pub perc: u32,
}

impl QuotaCell {
    pub fn new(quota_nodes: Vec<QuotaNode>, perc: u32) -> Self {
        Self { quota_nodes, perc }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaNode {
    pub attribute_id: String,
    pub option_ids: Vec<String>,
}

impl QuotaNode {
    pub fn new<I, S>(attribute_id: impl Into<String>, option_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attribute_id: attribute_id.into(),
            option_ids: option_ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Payload for [`SamplifyClient::add_line_item`], also embedded in project creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLineItemCriteria {
    pub ext_line_item_id: String,
    pub title: String,
    #[serde(rename = "countryISOCode")]
    pub country_iso_code: String,
    #[serde(rename = "languageISOCode")]
    pub language_iso_code: String,
    #[serde(rename = "surveyURL", default, skip_serializing_if = "Option::is_none")]
    pub survey_url: Option<String>,
    #[serde(rename = "surveyTestURL", default, skip_serializing_if = "Option::is_none")]
    pub survey_test_url: Option<String>,
    /// Expected share of respondents who qualify, in percent.
    pub indicative_incidence: f64,
    pub days_in_field: u32,
    /// Expected survey length in minutes.
    pub length_of_interview: u32,
    pub required_completes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_plan: Option<QuotaPlan>,
}

/// Payload for [`SamplifyClient::update_line_item`]. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLineItemCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "countryISOCode", default, skip_serializing_if = "Option::is_none")]
    pub country_iso_code: Option<String>,
    #[serde(rename = "languageISOCode", default, skip_serializing_if = "Option::is_none")]
    pub language_iso_code: Option<String>,
    #[serde(rename = "surveyURL", default, skip_serializing_if = "Option::is_none")]
    pub survey_url: Option<String>,
    #[serde(rename = "surveyTestURL", default, skip_serializing_if = "Option::is_none")]
    pub survey_test_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicative_incidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_in_field: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_of_interview: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_completes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_plan: Option<QuotaPlan>,
}

/// A line item as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub ext_line_item_id: String,
    pub title: String,
    pub state: LineItemState,
    #[serde(default)]
    pub state_reason: Option<String>,
    #[serde(rename = "countryISOCode")]
    pub country_iso_code: String,
    #[serde(rename = "languageISOCode")]
    pub language_iso_code: String,
    #[serde(rename = "surveyURL", default)]
    pub survey_url: Option<String>,
    #[serde(rename = "surveyTestURL", default)]
    pub survey_test_url: Option<String>,
    #[serde(default)]
    pub indicative_incidence: f64,
    #[serde(default)]
    pub days_in_field: u32,
    #[serde(default)]
    pub length_of_interview: u32,
    #[serde(default)]
    pub required_completes: u32,
    #[serde(default)]
    pub quota_plan: Option<QuotaPlan>,
    #[serde(default)]
    pub launched_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub state_last_updated_at: Option<String>,
}

/// Result of a launch, pause or close request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemStateChange {
    pub ext_line_item_id: String,
    pub state: LineItemState,
    #[serde(default)]
    pub state_reason: Option<String>,
}

/// Whether the panel can deliver a line item, and at what price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeasibilityStatus {
    Ready,
    Processing,
    Failed,
}

impl fmt::Display for FeasibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ready => "READY",
            Self::Processing => "PROCESSING",
            Self::Failed => "FAILED",
        })
    }
}

/// Feasibility estimate of one line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemFeasibility {
    pub ext_line_item_id: String,
    pub feasibility: Feasibility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feasibility {
    pub status: FeasibilityStatus,
    #[serde(default)]
    pub cost_per_interview: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    /// Number of completes the panel expects to deliver.
    #[serde(default)]
    pub feasibility_count: Option<u64>,
    #[serde(default)]
    pub expiry: Option<String>,
}

fn line_items_path(project_id: &str) -> String {
    format!("{}/lineItems", project_path(project_id))
}

fn line_item_path(project_id: &str, line_item_id: &str) -> String {
    format!("{}/{}", line_items_path(project_id), line_item_id)
}

impl SamplifyClient {
    /// Adds a line item to an existing project.
    pub async fn add_line_item(
        &self,
        project_id: &str,
        criteria: &CreateLineItemCriteria,
    ) -> Result<ApiResponse<LineItem>, SamplifyError> {
        self.post(&line_items_path(project_id), Some(criteria)).await
    }

    pub async fn update_line_item(
        &self,
        project_id: &str,
        line_item_id: &str,
        criteria: &UpdateLineItemCriteria,
    ) -> Result<ApiResponse<LineItem>, SamplifyError> {
        self.put(&line_item_path(project_id, line_item_id), criteria)
            .await
    }

    /// Launches, pauses or closes a line item.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use samplify::api::line_items::LineItemAction;
    /// # async fn example(client: &samplify::SamplifyClient) -> Result<(), samplify::SamplifyError> {
    /// let change = client
    ///     .update_line_item_state("project001", "lineItem001", LineItemAction::Pause)
    ///     .await?;
    /// println!("now {}", change.data.state);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update_line_item_state(
        &self,
        project_id: &str,
        line_item_id: &str,
        action: LineItemAction,
    ) -> Result<ApiResponse<LineItemStateChange>, SamplifyError> {
        let path = format!("{}/{}", line_item_path(project_id, line_item_id), action.as_str());
        self.post::<_, ()>(&path, None).await
    }

    pub async fn get_all_line_items(
        &self,
        project_id: &str,
        options: Option<&QueryOptions>,
    ) -> Result<ApiResponse<Vec<LineItem>>, SamplifyError> {
        self.get(&line_items_path(project_id), &query::render(options))
            .await
    }

    pub async fn get_line_item_by(
        &self,
        project_id: &str,
        line_item_id: &str,
    ) -> Result<ApiResponse<LineItem>, SamplifyError> {
        self.get(&line_item_path(project_id, line_item_id), "").await
    }

    /// Returns the feasibility estimate of every line item in a project.
    pub async fn get_feasibility(
        &self,
        project_id: &str,
        options: Option<&QueryOptions>,
    ) -> Result<ApiResponse<Vec<LineItemFeasibility>>, SamplifyError> {
        self.get(
            &format!("{}/feasibility", project_path(project_id)),
            &query::render(options),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(line_items_path("test"), "/projects/test/lineItems");
        assert_eq!(
            line_item_path("test-prj-id", "test-lineitem-id"),
            "/projects/test-prj-id/lineItems/test-lineitem-id"
        );
    }

    #[test]
    fn test_action_segments() {
        assert_eq!(LineItemAction::Pause.as_str(), "pause");
        assert_eq!("LAUNCH".parse::<LineItemAction>().unwrap(), LineItemAction::Launch);
        assert_eq!(LineItemAction::Close.target_state(), LineItemState::Closed);
        assert!("resume".parse::<LineItemAction>().is_err());
    }

    #[test]
    fn test_create_criteria_wire_keys() {
        let criteria = CreateLineItemCriteria {
            ext_line_item_id: "lineItem001".to_string(),
            title: "US College".to_string(),
            country_iso_code: "US".to_string(),
            language_iso_code: "en".to_string(),
            survey_url: Some("www.mysurvey.com/live/survey".to_string()),
            survey_test_url: None,
            indicative_incidence: 20.0,
            days_in_field: 20,
            length_of_interview: 10,
            required_completes: 200,
            quota_plan: Some(QuotaPlan {
                filters: vec![QuotaFilter::new("4091", ["3", "4"])],
                quota_groups: Vec::new(),
            }),
        };

        let json = serde_json::to_value(&criteria).unwrap();
        assert_eq!(json["extLineItemId"], "lineItem001");
        assert_eq!(json["countryISOCode"], "US");
        assert_eq!(json["languageISOCode"], "en");
        assert_eq!(json["surveyURL"], "www.mysurvey.com/live/survey");
        assert!(json.get("surveyTestURL").is_none());
        assert_eq!(json["quotaPlan"]["filters"][0]["attributeId"], "4091");
        assert_eq!(json["quotaPlan"]["filters"][0]["options"][1], "4");
    }

    #[test]
    fn test_empty_update_serializes_to_empty_object() {
        let json = serde_json::to_string(&UpdateLineItemCriteria::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_feasibility_decodes() {
        let json = r#"{"extLineItemId": "l1", "feasibility": {"status": "READY", "costPerInterview": 2.5, "currency": "USD", "feasibilityCount": 340}}"#;
        let item: LineItemFeasibility = serde_json::from_str(json).unwrap();
        assert_eq!(item.feasibility.status, FeasibilityStatus::Ready);
        assert_eq!(item.feasibility.feasibility_count, Some(340));
    }
}
