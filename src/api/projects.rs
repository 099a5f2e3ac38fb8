//
//  samplify
//  api/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project endpoints and data structures.
//!
//! A project groups one or more line items (audiences) that are fielded
//! together. Its lifecycle:
//!
//! ```text
//! PROVISIONED ──buy──▶ AWAITING_APPROVAL ──▶ LAUNCHED ◀──▶ PAUSED
//!                                               │
//!                                             close
//!                                               ▼
//!                                 CLOSED ──▶ COMPLETED ──▶ INVOICED
//! ```
//!
//! # Endpoints
//!
//! | Method | Verb | Path |
//! |--------|------|------|
//! | [`create_project`](SamplifyClient::create_project) | POST | `/projects` |
//! | [`update_project`](SamplifyClient::update_project) | PUT | `/projects/{extProjectId}` |
//! | [`buy_project`](SamplifyClient::buy_project) | POST | `/projects/{id}/buy` |
//! | [`close_project`](SamplifyClient::close_project) | POST | `/projects/{id}/close` |
//! | [`get_all_projects`](SamplifyClient::get_all_projects) | GET | `/projects` |
//! | [`get_project_by`](SamplifyClient::get_project_by) | GET | `/projects/{id}` |
//! | [`get_project_report`](SamplifyClient::get_project_report) | GET | `/projects/{id}/report` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::client::SamplifyClient;
use super::common::{ApiResponse, SamplifyError};
use super::line_items::{CreateLineItemCriteria, LineItem, LineItemState};
use super::query::{self, QueryOptions};

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectState {
    Provisioned,
    AwaitingApproval,
    Launched,
    Paused,
    Closed,
    Completed,
    Invoiced,
    Rejected,
}

impl ProjectState {
    pub const ALL: [ProjectState; 8] = [
        ProjectState::Provisioned,
        ProjectState::AwaitingApproval,
        ProjectState::Launched,
        ProjectState::Paused,
        ProjectState::Closed,
        ProjectState::Completed,
        ProjectState::Invoiced,
        ProjectState::Rejected,
    ];

    /// Returns the wire name, e.g. `AWAITING_APPROVAL`.
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

impl fmt::Display for ProjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown project state '{}'", s))
    }
}

/// Device a respondent may take the survey on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Desktop,
    Tablet,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
        })
    }
}

/// Survey topics a project is filed under.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub survey_topic: Vec<String>,
}

/// Payload for [`SamplifyClient::create_project`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectCriteria {
    /// Caller-chosen identifier, unique per account.
    pub ext_project_id: String,
    pub title: String,
    #[serde(default)]
    pub notification_emails: Vec<String>,
    #[serde(default)]
    pub devices: Vec<DeviceType>,
    pub category: Category,
    #[serde(default)]
    pub line_items: Vec<CreateLineItemCriteria>,
}

/// Payload for [`SamplifyClient::update_project`].
///
/// Only the fields that are set are sent. `ext_project_id` selects the
/// project and is also part of the request path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectCriteria {
    pub ext_project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_emails: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<DeviceType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<CreateLineItemCriteria>>,
}

/// One entry of the [`SamplifyClient::buy_project`] payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyProjectCriteria {
    pub ext_line_item_id: String,
    #[serde(rename = "surveyURL")]
    pub survey_url: String,
    #[serde(rename = "surveyTestURL")]
    pub survey_test_url: String,
}

/// Per line item outcome of a purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyProjectResult {
    pub ext_line_item_id: String,
    pub state: LineItemState,
}

/// A project as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub ext_project_id: String,
    pub title: String,
    pub state: ProjectState,
    #[serde(default)]
    pub state_reason: Option<String>,
    #[serde(default)]
    pub job_number: Option<String>,
    #[serde(default)]
    pub notification_emails: Vec<String>,
    #[serde(default)]
    pub devices: Vec<DeviceType>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub state_last_updated_at: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
}

/// Fielding statistics for a project and each of its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub ext_project_id: String,
    pub state: ProjectState,
    #[serde(flatten)]
    pub stats: FieldingStats,
    #[serde(default)]
    pub line_items: Vec<LineItemReport>,
}

/// Fielding statistics of one line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemReport {
    pub ext_line_item_id: String,
    pub state: LineItemState,
    #[serde(flatten)]
    pub stats: FieldingStats,
}

/// Counters shared by project and line item reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldingStats {
    pub attempts: u64,
    pub completes: u64,
    pub screenouts: u64,
    pub overquotas: u64,
    pub starts: u64,
    pub conversion: f64,
    pub remaining_completes: u64,
    #[serde(rename = "actualMedianLOI")]
    pub actual_median_loi: u64,
    pub incurred_cost: f64,
    pub estimated_cost: f64,
    pub currency: Option<String>,
}

pub(crate) fn project_path(project_id: &str) -> String {
    format!("/projects/{}", project_id)
}

impl SamplifyClient {
    /// Creates a project, optionally with its line items.
    pub async fn create_project(
        &self,
        criteria: &CreateProjectCriteria,
    ) -> Result<ApiResponse<Project>, SamplifyError> {
        self.post("/projects", Some(criteria)).await
    }

    /// Updates the project named by `criteria.ext_project_id`.
    pub async fn update_project(
        &self,
        criteria: &UpdateProjectCriteria,
    ) -> Result<ApiResponse<Project>, SamplifyError> {
        self.put(&project_path(&criteria.ext_project_id), criteria).await
    }

    /// Buys a provisioned project, supplying the live and test survey URLs
    /// for each line item.
    pub async fn buy_project(
        &self,
        project_id: &str,
        criteria: &[BuyProjectCriteria],
    ) -> Result<ApiResponse<Vec<BuyProjectResult>>, SamplifyError> {
        self.post(&format!("{}/buy", project_path(project_id)), Some(criteria))
            .await
    }

    /// Closes a project and every line item in it.
    pub async fn close_project(&self, project_id: &str) -> Result<ApiResponse<Project>, SamplifyError> {
        self.post::<_, ()>(&format!("{}/close", project_path(project_id)), None)
            .await
    }

    /// Lists projects, optionally filtered and sorted.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use samplify::api::projects::ProjectState;
    /// use samplify::api::query::{QueryField, QueryOptions, SortDirection};
    /// # async fn example(client: &samplify::SamplifyClient) -> Result<(), samplify::SamplifyError> {
    /// let options = QueryOptions::new()
    ///     .filter(QueryField::State, ProjectState::Launched)
    ///     .sort(QueryField::CreatedAt, SortDirection::Desc);
    ///
    /// let projects = client.get_all_projects(Some(&options)).await?;
    /// println!("{} launched projects", projects.data.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_all_projects(
        &self,
        options: Option<&QueryOptions>,
    ) -> Result<ApiResponse<Vec<Project>>, SamplifyError> {
        self.get("/projects", &query::render(options)).await
    }

    pub async fn get_project_by(&self, project_id: &str) -> Result<ApiResponse<Project>, SamplifyError> {
        self.get(&project_path(project_id), "").await
    }

    pub async fn get_project_report(
        &self,
        project_id: &str,
    ) -> Result<ApiResponse<ProjectReport>, SamplifyError> {
        self.get(&format!("{}/report", project_path(project_id)), "")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_wire_names() {
        assert_eq!(
            serde_json::to_string(&ProjectState::AwaitingApproval).unwrap(),
            "\"AWAITING_APPROVAL\""
        );
        for state in ProjectState::ALL {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state));
            assert_eq!(state.as_str().parse::<ProjectState>().unwrap(), state);
        }
        assert!("SHIPPED".parse::<ProjectState>().is_err());
    }

    #[test]
    fn test_create_criteria_wire_shape() {
        let criteria = CreateProjectCriteria {
            ext_project_id: "project001".to_string(),
            title: "Test Survey".to_string(),
            notification_emails: vec!["api-test@researchnow.com".to_string()],
            devices: vec![DeviceType::Mobile, DeviceType::Desktop],
            category: Category {
                survey_topic: vec!["AUTOMOTIVE".to_string(), "BUSINESS".to_string()],
            },
            line_items: Vec::new(),
        };

        let json = serde_json::to_value(&criteria).unwrap();
        assert_eq!(json["extProjectId"], "project001");
        assert_eq!(json["devices"], serde_json::json!(["mobile", "desktop"]));
        assert_eq!(json["category"]["surveyTopic"][1], "BUSINESS");
    }

    #[test]
    fn test_update_criteria_omits_unset_fields() {
        let criteria = UpdateProjectCriteria {
            ext_project_id: "update-test".to_string(),
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&criteria).unwrap();
        assert_eq!(json, serde_json::json!({"extProjectId": "update-test", "title": "Renamed"}));
    }

    #[test]
    fn test_buy_criteria_uses_upper_case_url_keys() {
        let criteria = BuyProjectCriteria {
            ext_line_item_id: "lineItem001".to_string(),
            survey_url: "www.mysurvey.com/live".to_string(),
            survey_test_url: "www.mysurvey.com/test".to_string(),
        };
        let json = serde_json::to_value(&criteria).unwrap();
        assert_eq!(json["surveyURL"], "www.mysurvey.com/live");
        assert_eq!(json["surveyTestURL"], "www.mysurvey.com/test");
    }

    #[test]
    fn test_report_decodes_flattened_stats() {
        let json = r#"{
            "extProjectId": "p1",
            "state": "LAUNCHED",
            "attempts": 10,
            "completes": 4,
            "actualMedianLOI": 12,
            "lineItems": [{"extLineItemId": "l1", "state": "LAUNCHED", "completes": 4}]
        }"#;
        let report: ProjectReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.stats.attempts, 10);
        assert_eq!(report.stats.actual_median_loi, 12);
        assert_eq!(report.line_items[0].stats.completes, 4);
    }

    #[test]
    fn test_project_path() {
        assert_eq!(project_path("test-prj-id"), "/projects/test-prj-id");
    }
}
