//
//  samplify
//  cli/reference.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Reference data commands: `countries`, `attributes`, `topics`

use anyhow::Result;
use clap::Args;

use crate::api::reference::{Attribute, Country, SurveyTopic};
use crate::output::{format_bool, truncate, TableRow};

use super::{GlobalOptions, QueryArgs};

#[derive(Args, Debug)]
pub struct CountriesCommand {
    #[command(flatten)]
    pub query: QueryArgs,
}

#[derive(Args, Debug)]
pub struct AttributesCommand {
    /// Country ISO code, e.g. GB
    pub country: String,

    /// Language ISO code, e.g. en
    pub language: String,

    #[command(flatten)]
    pub query: QueryArgs,
}

#[derive(Args, Debug)]
pub struct TopicsCommand {
    #[command(flatten)]
    pub query: QueryArgs,
}

impl CountriesCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let response = client.get_countries(self.query.to_options().as_ref()).await?;
        global.writer().write_list(&response.data, "No countries found")
    }
}

impl AttributesCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let response = client
            .get_attributes(&self.country, &self.language, self.query.to_options().as_ref())
            .await?;
        global.writer().write_list(&response.data, "No attributes found")
    }
}

impl TopicsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let response = client.get_survey_topics(self.query.to_options().as_ref()).await?;
        global.writer().write_list(&response.data, "No survey topics found")
    }
}

impl TableRow for Country {
    fn headers() -> &'static [&'static str] {
        &["ISO", "NAME", "LANGUAGES"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        let languages: Vec<&str> = self.supported_languages.iter().map(|l| l.iso_code.as_str()).collect();
        vec![self.iso_code.clone(), self.name.clone(), languages.join(", ")]
    }
}

impl TableRow for Attribute {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "TYPE", "FILTER", "QUOTA", "OPTIONS"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let options: Vec<String> = self
            .options
            .iter()
            .map(|option| format!("{}:{}", option.id, option.text))
            .collect();
        vec![
            self.id.clone(),
            self.name.clone(),
            self.kind.clone().unwrap_or_else(|| "-".to_string()),
            format_bool(self.is_allowed_in_filters, color),
            format_bool(self.is_allowed_in_quotas, color),
            truncate(&options.join(", "), 60),
        ]
    }
}

impl TableRow for SurveyTopic {
    fn headers() -> &'static [&'static str] {
        &["TOPIC", "DESCRIPTION"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.topic.clone(),
            self.description.clone().unwrap_or_default(),
        ]
    }
}
