//
//  samplify
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project commands

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::line_items::{LineItem, LineItemFeasibility};
use crate::api::projects::{
    BuyProjectCriteria, BuyProjectResult, CreateProjectCriteria, FieldingStats, Project, ProjectReport,
    UpdateProjectCriteria,
};
use crate::output::{format_state, print_field, print_header, print_optional_field, TableBuilder, TableOutput, TableRow};

use super::{read_payload, GlobalOptions, PayloadArgs, QueryArgs};

#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// List projects
    #[command(visible_alias = "ls")]
    List(QueryArgs),

    /// Show a project and its line items
    View(ProjectIdArgs),

    /// Create a project from a JSON file
    Create(PayloadArgs),

    /// Update a project from a JSON file (extProjectId selects the project)
    Update(PayloadArgs),

    /// Buy a project; the file holds a JSON array of survey URLs per line item
    Buy(BuyArgs),

    /// Close a project and all its line items
    Close(ProjectIdArgs),

    /// Show fielding statistics
    Report(ProjectIdArgs),

    /// Show feasibility and pricing per line item
    Feasibility(FeasibilityArgs),
}

#[derive(Args, Debug)]
pub struct ProjectIdArgs {
    /// External project ID
    pub project_id: String,
}

#[derive(Args, Debug)]
pub struct BuyArgs {
    /// External project ID
    pub project_id: String,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args, Debug)]
pub struct FeasibilityArgs {
    /// External project ID
    pub project_id: String,

    #[command(flatten)]
    pub query: QueryArgs,
}

impl ProjectCommand {
    /// Returns the filter/sort flags of list-style subcommands.
    pub fn query_args(&self) -> Option<&QueryArgs> {
        match &self.command {
            ProjectSubcommand::List(query) => Some(query),
            ProjectSubcommand::Feasibility(args) => Some(&args.query),
            _ => None,
        }
    }

    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let writer = global.writer();
        let client = global.client()?;

        match &self.command {
            ProjectSubcommand::List(query) => {
                let response = client.get_all_projects(query.to_options().as_ref()).await?;
                writer.write_list(&response.data, "No projects found")?;
            }
            ProjectSubcommand::View(args) => {
                let response = client.get_project_by(&args.project_id).await?;
                writer.write(&response.data)?;
            }
            ProjectSubcommand::Create(args) => {
                let criteria: CreateProjectCriteria = read_payload(&args.file)?;
                let response = client.create_project(&criteria).await?;
                writer.write_success(&format!("Created project {}", response.data.ext_project_id));
                writer.write(&response.data)?;
            }
            ProjectSubcommand::Update(args) => {
                let criteria: UpdateProjectCriteria = read_payload(&args.file)?;
                let response = client.update_project(&criteria).await?;
                writer.write_success(&format!("Updated project {}", response.data.ext_project_id));
                writer.write(&response.data)?;
            }
            ProjectSubcommand::Buy(args) => {
                let criteria: Vec<BuyProjectCriteria> = read_payload(&args.payload.file)?;
                let response = client.buy_project(&args.project_id, &criteria).await?;
                writer.write_success(&format!("Bought project {}", args.project_id));
                writer.write_list(&response.data, "No line items were bought")?;
            }
            ProjectSubcommand::Close(args) => {
                let response = client.close_project(&args.project_id).await?;
                writer.write_success(&format!("Closed project {}", args.project_id));
                writer.write(&response.data)?;
            }
            ProjectSubcommand::Report(args) => {
                let response = client.get_project_report(&args.project_id).await?;
                writer.write(&response.data)?;
            }
            ProjectSubcommand::Feasibility(args) => {
                let response = client
                    .get_feasibility(&args.project_id, args.query.to_options().as_ref())
                    .await?;
                writer.write_list(&response.data, "No line items to estimate")?;
            }
        }

        Ok(())
    }
}

impl TableRow for Project {
    fn headers() -> &'static [&'static str] {
        &["ID", "TITLE", "STATE", "LINE ITEMS", "CREATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.ext_project_id.clone(),
            self.title.clone(),
            format_state(self.state.as_str(), color),
            self.line_items.len().to_string(),
            self.created_at.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl TableOutput for Project {
    fn print_table(&self, color: bool) {
        let title = if color {
            style(&self.title).bold().to_string()
        } else {
            self.title.clone()
        };
        println!("{}", title);
        println!();

        print_field("ID", &self.ext_project_id, color);
        print_field("State", &format_state(self.state.as_str(), color), color);
        print_optional_field("Reason", self.state_reason.as_deref(), color);
        print_optional_field("Job number", self.job_number.as_deref(), color);
        if !self.devices.is_empty() {
            let devices: Vec<String> = self.devices.iter().map(ToString::to_string).collect();
            print_field("Devices", &devices.join(", "), color);
        }
        if let Some(category) = &self.category {
            print_field("Topics", &category.survey_topic.join(", "), color);
        }
        if !self.notification_emails.is_empty() {
            print_field("Notify", &self.notification_emails.join(", "), color);
        }
        print_optional_field("Created", self.created_at.as_deref(), color);
        print_optional_field("Updated", self.updated_at.as_deref(), color);

        if !self.line_items.is_empty() {
            println!();
            print_header("Line items");
            self.line_items
                .iter()
                .fold(
                    TableBuilder::new().color(color).headers(LineItem::headers().iter().copied()),
                    |table, item| table.row(item.row(color)),
                )
                .print();
        }
    }
}

impl TableRow for BuyProjectResult {
    fn headers() -> &'static [&'static str] {
        &["LINE ITEM", "STATE"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![self.ext_line_item_id.clone(), format_state(self.state.as_str(), color)]
    }
}

fn stats_row(label: &str, state: &str, stats: &FieldingStats, color: bool) -> Vec<String> {
    vec![
        label.to_string(),
        format_state(state, color),
        stats.completes.to_string(),
        stats.remaining_completes.to_string(),
        stats.starts.to_string(),
        stats.screenouts.to_string(),
        stats.overquotas.to_string(),
        format!("{:.1}%", stats.conversion),
        stats.actual_median_loi.to_string(),
        format!("{:.2}", stats.incurred_cost),
    ]
}

impl TableOutput for ProjectReport {
    fn print_table(&self, color: bool) {
        print_header(&format!("Report for {}", self.ext_project_id));
        if let Some(currency) = &self.stats.currency {
            print_field("Currency", currency, color);
        }

        let table = TableBuilder::new().color(color).headers([
            "", "STATE", "COMPLETES", "REMAINING", "STARTS", "SCREENOUTS", "OVERQUOTAS", "CONVERSION", "MEDIAN LOI",
            "COST",
        ]);
        let table = table.row(stats_row("Project", self.state.as_str(), &self.stats, color));
        self.line_items
            .iter()
            .fold(table, |table, item| {
                table.row(stats_row(&item.ext_line_item_id, item.state.as_str(), &item.stats, color))
            })
            .print();
    }
}

impl TableRow for LineItemFeasibility {
    fn headers() -> &'static [&'static str] {
        &["LINE ITEM", "STATUS", "COUNT", "CPI", "CURRENCY"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let feasibility = &self.feasibility;
        vec![
            self.ext_line_item_id.clone(),
            format_state(&feasibility.status.to_string(), color),
            feasibility
                .feasibility_count
                .map(|count| count.to_string())
                .unwrap_or_else(|| "-".to_string()),
            feasibility
                .cost_per_interview
                .map(|cpi| format!("{:.2}", cpi))
                .unwrap_or_else(|| "-".to_string()),
            feasibility.currency.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }
}
