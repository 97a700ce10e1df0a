//! Output formatting for the CLI.

use crate::error::Result;
use colored::*;
use setlist_domain::Rule;
use setlist_engine::ScoredItem;
use setlist_store::{RuleRecord, RuleStore};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format ranked recommendations.
    pub fn format_recommendations(&self, items: &[ScoredItem]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
            OutputFormat::Quiet => Ok(items
                .iter()
                .map(|scored| scored.item.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if items.is_empty() {
                    return Ok(self.colorize("No recommendations.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Rank", "Item", "Confidence"]);
                for (rank, scored) in items.iter().enumerate() {
                    builder.push_record([
                        (rank + 1).to_string(),
                        scored.item.clone(),
                        format!("{:.3}", scored.confidence),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format rules.
    pub fn format_rules(&self, rules: &[Rule]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let records: Vec<RuleRecord> = rules.iter().map(RuleRecord::from).collect();
                Ok(serde_json::to_string_pretty(&records)?)
            }
            OutputFormat::Quiet => Ok(rules
                .iter()
                .map(Rule::to_string)
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if rules.is_empty() {
                    return Ok(self.colorize("No rules found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Antecedent", "Consequent", "Confidence", "Support", "Lift"]);
                for rule in rules {
                    builder.push_record([
                        rule.antecedent().to_string(),
                        rule.consequent().to_string(),
                        format!("{:.3}", rule.confidence().value()),
                        format_optional(rule.support()),
                        format_optional(rule.lift()),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format corpus statistics followed by a rule sample.
    pub fn format_summary(&self, store: &RuleStore, sample: &[Rule]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let records: Vec<RuleRecord> = sample.iter().map(RuleRecord::from).collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "rules_count": store.len(),
                    "antecedent_items": store.antecedent_item_count(),
                    "sample_rules": records,
                }))?)
            }
            OutputFormat::Quiet => Ok(store.len().to_string()),
            OutputFormat::Table => Ok(format!(
                "{}\n{}",
                self.info(&format!(
                    "{} rules over {} antecedent items",
                    store.len(),
                    store.antecedent_item_count()
                )),
                self.format_rules(sample)?
            )),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use setlist_domain::Confidence;

    fn create_test_rule() -> Rule {
        Rule::new(
            ["Toxic"].into_iter().collect(),
            ["Crazy In Love"].into_iter().collect(),
            Confidence::new(0.9).unwrap(),
        )
        .unwrap()
        .with_stats(Some(0.02), None)
    }

    fn scored() -> Vec<ScoredItem> {
        vec![
            ScoredItem { item: "D".into(), confidence: 0.9 },
            ScoredItem { item: "B".into(), confidence: 0.8 },
        ]
    }

    #[test]
    fn test_recommendations_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_recommendations(&scored()).unwrap();
        assert!(output.contains("Rank"));
        assert!(output.contains("0.900"));
    }

    #[test]
    fn test_recommendations_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.format_recommendations(&scored()).unwrap(), "D\nB");
    }

    #[test]
    fn test_recommendations_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_recommendations(&scored()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["item"], "D");
    }

    #[test]
    fn test_empty_recommendations() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_recommendations(&[]).unwrap();
        assert!(output.contains("No recommendations"));
    }

    #[test]
    fn test_rules_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_rules(&[create_test_rule()]).unwrap();
        assert!(output.contains("Antecedent"));
        assert!(output.contains("{Toxic}"));
        assert!(output.contains("0.020"));
    }

    #[test]
    fn test_rules_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_rules(&[create_test_rule()]).unwrap();
        assert!(output.contains("antecedents"));
        assert!(!output.contains("lift"));
    }

    #[test]
    fn test_summary_table() {
        let rules = vec![create_test_rule()];
        let store = RuleStore::from_rules(rules.clone());
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_summary(&store, &rules).unwrap();
        assert!(output.starts_with("ℹ 1 rules over 1 antecedent items"));
        assert!(output.contains("Crazy In Love"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
