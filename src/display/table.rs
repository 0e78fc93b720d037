use crate::core::services::types::{Explore, ExploreOutcome, ValidationReport};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use std::io::IsTerminal;

/// Formatter for validation reports and explore listings
pub struct TableDisplay {
    use_colors: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    /// Colors only when stdout is a terminal
    pub fn new() -> Self {
        Self {
            use_colors: std::io::stdout().is_terminal(),
        }
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn new_table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);

        let header: Vec<Cell> = headers
            .iter()
            .map(|h| {
                let cell = Cell::new(h).add_attribute(Attribute::Bold);
                if self.use_colors {
                    cell.fg(Color::Cyan)
                } else {
                    cell
                }
            })
            .collect();
        table.set_header(header);
        table
    }

    fn colored(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).fg(color)
        } else {
            Cell::new(text)
        }
    }

    /// One row per explore with its validation status
    pub fn render_validation_report(&self, report: &ValidationReport) -> String {
        if report.results.is_empty() {
            return "No explores found for this project.".to_string();
        }

        let mut table = self.new_table(&["Model", "Explore", "Dimensions", "Status"]);
        for result in &report.results {
            let status = match &result.outcome {
                ExploreOutcome::Passed => self.colored("passed", Color::Green),
                ExploreOutcome::Failed(_) => self.colored("failed", Color::Red),
                ExploreOutcome::Skipped => self.colored("skipped", Color::DarkGrey),
            };
            table.add_row(vec![
                Cell::new(&result.explore.model),
                Cell::new(&result.explore.name),
                Cell::new(result.explore.dimensions.len()),
                status,
            ]);
        }

        table.to_string()
    }

    /// The full SQL error message of every failed explore, wrapped to the terminal
    pub fn render_failures(&self, report: &ValidationReport) -> String {
        let errors = report.errors();
        if errors.is_empty() {
            return String::new();
        }

        let mut table = self.new_table(&["Explore", "Query", "Error"]);
        for error in errors {
            table.add_row(vec![
                Cell::new(format!("{}/{}", error.model, error.explore)),
                Cell::new(&error.query_id),
                self.colored(&error.message, Color::Red),
            ]);
        }

        table.to_string()
    }

    pub fn render_summary(&self, report: &ValidationReport) -> String {
        format!(
            "{} explores: {} passed, {} failed, {} skipped",
            report.total(),
            report.passed_count(),
            report.errors().len(),
            report.skipped_count()
        )
    }

    pub fn render_explore_list(&self, explores: &[Explore]) -> String {
        if explores.is_empty() {
            return "No explores found for this project.".to_string();
        }

        let mut table = self.new_table(&["Model", "Explore", "Dimensions"]);
        for explore in explores {
            table.add_row(vec![
                Cell::new(&explore.model),
                Cell::new(&explore.name),
                Cell::new(explore.dimensions.len()),
            ]);
        }
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SqlError;

    fn report() -> ValidationReport {
        let mut report = ValidationReport::default();
        let mut orders = Explore::new("ecommerce", "orders");
        orders.dimensions = vec!["orders.id".to_string(), "orders.status".to_string()];
        report.push(orders, ExploreOutcome::Passed);
        report.push(
            Explore::new("ecommerce", "users"),
            ExploreOutcome::Failed(SqlError {
                model: "ecommerce".to_string(),
                explore: "users".to_string(),
                query_id: "17".to_string(),
                message: "column users.foo does not exist".to_string(),
            }),
        );
        report.push(Explore::new("ecommerce", "empty"), ExploreOutcome::Skipped);
        report
    }

    #[test]
    fn test_render_validation_report() {
        let display = TableDisplay::new().with_colors(false);
        let output = display.render_validation_report(&report());

        assert!(output.contains("Explore"));
        assert!(output.contains("orders"));
        assert!(output.contains("passed"));
        assert!(output.contains("failed"));
        assert!(output.contains("skipped"));
    }

    #[test]
    fn test_render_failures_lists_messages() {
        let display = TableDisplay::new().with_colors(false);
        let output = display.render_failures(&report());

        assert!(output.contains("ecommerce/users"));
        assert!(output.contains("17"));
        assert!(output.contains("users.foo"));
    }

    #[test]
    fn test_render_failures_empty_when_clean() {
        let display = TableDisplay::new().with_colors(false);
        assert!(display.render_failures(&ValidationReport::default()).is_empty());
    }

    #[test]
    fn test_render_summary() {
        let display = TableDisplay::new().with_colors(false);
        assert_eq!(
            display.render_summary(&report()),
            "3 explores: 1 passed, 1 failed, 1 skipped"
        );
    }

    #[test]
    fn test_render_empty_inputs() {
        let display = TableDisplay::new().with_colors(false);
        assert_eq!(
            display.render_validation_report(&ValidationReport::default()),
            "No explores found for this project."
        );
        assert_eq!(
            display.render_explore_list(&[]),
            "No explores found for this project."
        );
    }

    #[test]
    fn test_render_failures_keeps_long_messages_whole() {
        let message = format!(
            "Database Error: {} at end of statement",
            "SELECT orders.id, ".repeat(20)
        );
        let mut report = ValidationReport::default();
        report.push(
            Explore::new("ecommerce", "orders"),
            ExploreOutcome::Failed(SqlError {
                model: "ecommerce".to_string(),
                explore: "orders".to_string(),
                query_id: "3".to_string(),
                message,
            }),
        );

        let output = TableDisplay::new()
            .with_colors(false)
            .render_failures(&report);
        // Wrapping may split lines, but every word must survive
        assert_eq!(output.matches("SELECT").count(), 20);
        assert!(output.contains("statement"));
        assert!(!output.contains("..."));
    }
}
