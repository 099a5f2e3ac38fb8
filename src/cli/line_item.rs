//
//  samplify
//  cli/line_item.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Line item commands

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::line_items::{
    CreateLineItemCriteria, LineItem, LineItemAction, LineItemStateChange, UpdateLineItemCriteria,
};
use crate::output::{format_state, print_field, print_header, print_optional_field, TableBuilder, TableOutput, TableRow};

use super::{read_payload, GlobalOptions, PayloadArgs, QueryArgs};

#[derive(Args, Debug)]
pub struct LineItemCommand {
    #[command(subcommand)]
    pub command: LineItemSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum LineItemSubcommand {
    /// List the line items of a project
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show a line item and its quota plan
    View(LineItemIdArgs),

    /// Add a line item from a JSON file
    Add(AddArgs),

    /// Update a line item from a JSON file
    Update(UpdateArgs),

    /// Start fielding a line item
    Launch(LineItemIdArgs),

    /// Pause fielding
    Pause(LineItemIdArgs),

    /// Stop fielding for good
    Close(LineItemIdArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// External project ID
    pub project_id: String,

    #[command(flatten)]
    pub query: QueryArgs,
}

#[derive(Args, Debug)]
pub struct LineItemIdArgs {
    /// External project ID
    pub project_id: String,

    /// External line item ID
    pub line_item_id: String,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// External project ID
    pub project_id: String,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// External project ID
    pub project_id: String,

    /// External line item ID
    pub line_item_id: String,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

impl LineItemCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let writer = global.writer();
        let client = global.client()?;

        match &self.command {
            LineItemSubcommand::List(args) => {
                let response = client
                    .get_all_line_items(&args.project_id, args.query.to_options().as_ref())
                    .await?;
                writer.write_list(&response.data, "No line items found")?;
            }
            LineItemSubcommand::View(args) => {
                let response = client.get_line_item_by(&args.project_id, &args.line_item_id).await?;
                writer.write(&response.data)?;
            }
            LineItemSubcommand::Add(args) => {
                let criteria: CreateLineItemCriteria = read_payload(&args.payload.file)?;
                let response = client.add_line_item(&args.project_id, &criteria).await?;
                writer.write_success(&format!(
                    "Added line item {} to {}",
                    response.data.ext_line_item_id, args.project_id
                ));
                writer.write(&response.data)?;
            }
            LineItemSubcommand::Update(args) => {
                let criteria: UpdateLineItemCriteria = read_payload(&args.payload.file)?;
                let response = client
                    .update_line_item(&args.project_id, &args.line_item_id, &criteria)
                    .await?;
                writer.write_success(&format!("Updated line item {}", args.line_item_id));
                writer.write(&response.data)?;
            }
            LineItemSubcommand::Launch(args) => change_state(global, args, LineItemAction::Launch, &client).await?,
            LineItemSubcommand::Pause(args) => change_state(global, args, LineItemAction::Pause, &client).await?,
            LineItemSubcommand::Close(args) => change_state(global, args, LineItemAction::Close, &client).await?,
        }

        Ok(())
    }
}

async fn change_state(
    global: &GlobalOptions,
    args: &LineItemIdArgs,
    action: LineItemAction,
    client: &crate::api::SamplifyClient,
) -> Result<()> {
    let writer = global.writer();
    let response = client
        .update_line_item_state(&args.project_id, &args.line_item_id, action)
        .await?;

    if response.data.state != action.target_state() {
        writer.write_warning(&format!(
            "Requested {} but line item {} is {}",
            action, args.line_item_id, response.data.state
        ));
    } else {
        writer.write_success(&format!("Line item {} is now {}", args.line_item_id, response.data.state));
    }
    writer.write(&response.data)
}

impl TableRow for LineItem {
    fn headers() -> &'static [&'static str] {
        &["ID", "TITLE", "STATE", "COUNTRY", "LANG", "COMPLETES", "LOI", "IR"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.ext_line_item_id.clone(),
            self.title.clone(),
            format_state(self.state.as_str(), color),
            self.country_iso_code.clone(),
            self.language_iso_code.clone(),
            self.required_completes.to_string(),
            self.length_of_interview.to_string(),
            format!("{}%", self.indicative_incidence),
        ]
    }
}

impl TableOutput for LineItem {
    fn print_table(&self, color: bool) {
        let title = if color {
            style(&self.title).bold().to_string()
        } else {
            self.title.clone()
        };
        println!("{}", title);
        println!();

        print_field("ID", &self.ext_line_item_id, color);
        print_field("State", &format_state(self.state.as_str(), color), color);
        print_optional_field("Reason", self.state_reason.as_deref(), color);
        print_field(
            "Audience",
            &format!("{} / {}", self.country_iso_code, self.language_iso_code),
            color,
        );
        print_field("Completes", &self.required_completes.to_string(), color);
        print_field("Incidence", &format!("{}%", self.indicative_incidence), color);
        print_field("Length", &format!("{} min", self.length_of_interview), color);
        print_field("Days in field", &self.days_in_field.to_string(), color);
        print_optional_field("Survey URL", self.survey_url.as_deref(), color);
        print_optional_field("Test URL", self.survey_test_url.as_deref(), color);
        print_optional_field("Launched", self.launched_at.as_deref(), color);

        let Some(plan) = &self.quota_plan else {
            return;
        };

        if !plan.filters.is_empty() {
            println!();
            print_header("Filters");
            plan.filters
                .iter()
                .fold(TableBuilder::new().color(color).headers(["ATTRIBUTE", "OPTIONS"]), |table, filter| {
                    table.row([filter.attribute_id.clone(), filter.options.join(", ")])
                })
                .print();
        }

        for group in &plan.quota_groups {
            println!();
            print_header(&format!("Quota: {}", group.name));
            group
                .quota_cells
                .iter()
                .fold(TableBuilder::new().color(color).headers(["NODES", "PERC"]), |table, cell| {
                    let nodes: Vec<String> = cell
                        .quota_nodes
                        .iter()
                        .map(|node| format!("{}={}", node.attribute_id, node.option_ids.join("|")))
                        .collect();
                    table.row([nodes.join(" & "), format!("{}%", cell.perc)])
                })
                .print();
        }
    }
}

impl TableOutput for LineItemStateChange {
    fn print_table(&self, color: bool) {
        print_field("Line item", &self.ext_line_item_id, color);
        print_field("State", &format_state(self.state.as_str(), color), color);
        print_optional_field("Reason", self.state_reason.as_deref(), color);
    }
}
