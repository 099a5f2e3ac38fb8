//
//  samplify
//  api/reference.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Reference data: supported countries, targeting attributes and survey topics.
//!
//! These endpoints are read-only and accept the same filter and sort options
//! as the project list.

use serde::{Deserialize, Serialize};

use super::client::SamplifyClient;
use super::common::{ApiResponse, SamplifyError};
use super::query::{self, QueryOptions};

/// A country the panel can field in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: String,
    pub iso_code: String,
    #[serde(alias = "countryName")]
    pub name: String,
    #[serde(default)]
    pub supported_languages: Vec<Language>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: String,
    pub iso_code: String,
    #[serde(alias = "languageName")]
    pub name: String,
}

/// A targeting attribute usable in quota plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub is_allowed_in_filters: bool,
    #[serde(default)]
    pub is_allowed_in_quotas: bool,
    #[serde(default)]
    pub options: Vec<AttributeOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeOption {
    pub id: String,
    pub text: String,
}

/// A category a project can be filed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyTopic {
    pub topic: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl SamplifyClient {
    pub async fn get_countries(
        &self,
        options: Option<&QueryOptions>,
    ) -> Result<ApiResponse<Vec<Country>>, SamplifyError> {
        self.get("/countries", &query::render(options)).await
    }

    /// Lists the attributes available for a country and language,
    /// e.g. `("GB", "en")`.
    pub async fn get_attributes(
        &self,
        country_code: &str,
        language_code: &str,
        options: Option<&QueryOptions>,
    ) -> Result<ApiResponse<Vec<Attribute>>, SamplifyError> {
        self.get(
            &format!("/attributes/{}/{}", country_code, language_code),
            &query::render(options),
        )
        .await
    }

    pub async fn get_survey_topics(
        &self,
        options: Option<&QueryOptions>,
    ) -> Result<ApiResponse<Vec<SurveyTopic>>, SamplifyError> {
        self.get("/categories/surveyTopics", &query::render(options))
            .await
    }
}
