//
//  samplify
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Table rendering helpers built on `comfy-table`.
//!
//! # Example
//!
//! ```rust
//! use samplify::output::TableBuilder;
//!
//! let table = TableBuilder::new()
//!     .color(false)
//!     .headers(["ISO", "NAME"])
//!     .row(["GB", "United Kingdom"])
//!     .row(["US", "United States"])
//!     .build();
//!
//! assert!(table.to_string().contains("United Kingdom"));
//! ```

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Creates an empty table with the standard preset and dynamic width.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Fluent builder over a [`Table`].
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    /// Enables or disables colored headers.
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            let cells: Vec<Cell> = headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)).collect();
            self.table.set_header(cells);
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.table.add_row(row);
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors a project or line item state for terminal display.
///
/// | Color | States |
/// |-------|--------|
/// | green | `LAUNCHED` |
/// | yellow | `PROVISIONED`, `AWAITING_APPROVAL`, `PAUSED` |
/// | blue | `CLOSED`, `COMPLETED`, `INVOICED` |
/// | red | `REJECTED`, `FAILED` |
pub fn format_state(state: &str, color: bool) -> String {
    if !color {
        return state.to_string();
    }

    use console::style;
    match state {
        "LAUNCHED" | "READY" => style(state).green().to_string(),
        "PROVISIONED" | "AWAITING_APPROVAL" | "PAUSED" | "PROCESSING" => style(state).yellow().to_string(),
        "CLOSED" | "COMPLETED" | "INVOICED" => style(state).blue().to_string(),
        "REJECTED" | "FAILED" => style(state).red().to_string(),
        _ => state.to_string(),
    }
}

pub fn format_bool(value: bool, color: bool) -> String {
    use console::style;
    match (value, color) {
        (true, true) => style("Yes").green().to_string(),
        (false, true) => style("No").dim().to_string(),
        (true, false) => "Yes".to_string(),
        (false, false) => "No".to_string(),
    }
}

/// Shortens `s` to at most `max_len` characters, ending with `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Gender distribution", 10), "Gender ...");
        assert_eq!(truncate("Überprüfung", 5), "Üb...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_format_state_without_color() {
        assert_eq!(format_state("LAUNCHED", false), "LAUNCHED");
        assert_eq!(format_bool(true, false), "Yes");
    }
}
