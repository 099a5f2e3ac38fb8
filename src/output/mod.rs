//
//  samplify
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting Module
//!
//! Renders command results either as human-readable tables or as JSON for
//! scripting (`--json`).
//!
//! ## Traits
//!
//! - [`TableOutput`]: detail view of a single value (`project view`)
//! - [`TableRow`]: one row of a list table (`project list`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use samplify::output::{OutputFormat, OutputWriter, TableOutput};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Topic {
//!     topic: String,
//! }
//!
//! impl TableOutput for Topic {
//!     fn print_table(&self, _color: bool) {
//!         println!("{}", self.topic);
//!     }
//! }
//!
//! let writer = OutputWriter::new(OutputFormat::Table);
//! writer.write(&Topic { topic: "AUTOMOTIVE".to_string() })?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use serde::Serialize;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Writes values in the selected [`OutputFormat`].
///
/// Errors and status messages always go to stderr so that stdout stays
/// parseable in JSON mode.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Picks JSON when `json` is set, tables otherwise.
    pub fn from_flag(json: bool) -> Self {
        Self::new(if json { OutputFormat::Json } else { OutputFormat::Table })
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Writes a single value as a detail view or a JSON document.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value)?,
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes a list as one table, or as a JSON array.
    ///
    /// An empty list prints `empty_message` in table mode and `[]` in JSON mode.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T], empty_message: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(values)?,
            OutputFormat::Table if values.is_empty() => println!("{}", empty_message),
            OutputFormat::Table => {
                values
                    .iter()
                    .fold(
                        TableBuilder::new().color(self.color).headers(T::headers().iter().copied()),
                        |table, value| table.row(value.row(self.color)),
                    )
                    .print();
            }
        }
        Ok(())
    }

    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    /// Prints a success line. Suppressed in JSON mode.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.is_json() {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Detail view of a single value.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// A value that is shown as one row of a list table.
pub trait TableRow {
    /// Column headers, shared by every row.
    fn headers() -> &'static [&'static str];

    /// Cell values, in header order.
    fn row(&self, color: bool) -> Vec<String>;
}

/// Prints a bold section header with an underline.
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a `key: value` line, dimming the key when color is on.
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

/// Prints a field only when it has a value.
pub fn print_optional_field(key: &str, value: Option<&str>, color: bool) {
    if let Some(value) = value {
        print_field(key, value, color);
    }
}
