//! Corpus loaders
//!
//! A corpus is a sequence of records with the logical schema
//! `{ antecedents: [item], consequents: [item], confidence: f64 }`, plus the
//! optional `support` and `lift` statistics the mining step reports. Three
//! physical forms are understood, selected by file extension:
//!
//! | Extension                      | Form                                  |
//! |--------------------------------|---------------------------------------|
//! | `.json`                        | one JSON array of records             |
//! | `.jsonl`, `.ndjson`            | one JSON record per line              |
//! | `.db`, `.sqlite`, `.sqlite3`   | SQLite `rules` table (see schema.sql) |
//!
//! Any record that fails validation rejects the whole corpus.

use crate::StoreError;
use rusqlite::{params, Connection, ErrorCode, OpenFlags};
use serde::{Deserialize, Serialize};
use setlist_domain::{Confidence, ItemSet, Rule, RuleError};
use std::fs;
use std::io;
use std::path::Path;

type SqliteRow = (Option<String>, Option<String>, Option<f64>, Option<f64>, Option<f64>);

/// Physical corpus encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusFormat {
    /// JSON array of records
    Json,
    /// Newline-delimited JSON records
    JsonLines,
    /// SQLite database with a `rules` table
    Sqlite,
}

impl CorpusFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(CorpusFormat::Json),
            "jsonl" | "ndjson" => Ok(CorpusFormat::JsonLines),
            "db" | "sqlite" | "sqlite3" => Ok(CorpusFormat::Sqlite),
            _ => Err(StoreError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Serialized form of one rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// Trigger items
    pub antecedents: Vec<String>,

    /// Recommended items
    pub consequents: Vec<String>,

    /// Mined confidence in (0, 1]
    pub confidence: f64,

    /// Support of the full itemset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<f64>,

    /// Lift of the rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lift: Option<f64>,
}

impl RuleRecord {
    /// Validate the record into a domain rule
    pub fn into_rule(self) -> Result<Rule, RuleError> {
        let confidence = Confidence::new(self.confidence)?;
        let antecedent: ItemSet = self.antecedents.into_iter().collect();
        let consequent: ItemSet = self.consequents.into_iter().collect();

        Ok(Rule::new(antecedent, consequent, confidence)?.with_stats(self.support, self.lift))
    }
}

impl From<&Rule> for RuleRecord {
    fn from(rule: &Rule) -> Self {
        Self {
            antecedents: rule.antecedent().to_vec(),
            consequents: rule.consequent().to_vec(),
            confidence: rule.confidence().value(),
            support: rule.support(),
            lift: rule.lift(),
        }
    }
}

/// Read and validate every rule in the corpus at `path`
pub fn read_corpus(path: &Path) -> Result<Vec<Rule>, StoreError> {
    if !path.exists() {
        return Err(StoreError::ModelNotFound(path.display().to_string()));
    }

    match CorpusFormat::from_path(path)? {
        CorpusFormat::Json => parse_json(&read_text(path)?),
        CorpusFormat::JsonLines => parse_json_lines(&read_text(path)?),
        CorpusFormat::Sqlite => read_sqlite(path),
    }
}

fn read_text(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StoreError::ModelNotFound(path.display().to_string()),
        io::ErrorKind::InvalidData => StoreError::CorruptCorpus(format!("not valid UTF-8 text: {}", e)),
        _ => StoreError::Io(e),
    })
}

/// Parse a JSON array of rule records
pub fn parse_json(text: &str) -> Result<Vec<Rule>, StoreError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(text)
        .map_err(|e| StoreError::CorruptCorpus(format!("expected a JSON array of rules: {}", e)))?;

    values
        .into_iter()
        .enumerate()
        .map(|(record, value)| decode_value(record, value))
        .collect()
}

/// Parse newline-delimited rule records, skipping blank lines
pub fn parse_json_lines(text: &str) -> Result<Vec<Rule>, StoreError> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(record, line)| {
            let value = serde_json::from_str(line).map_err(|e| StoreError::CorruptModel {
                record,
                reason: e.to_string(),
            })?;
            decode_value(record, value)
        })
        .collect()
}

fn decode_value(record: usize, value: serde_json::Value) -> Result<Rule, StoreError> {
    let parsed: RuleRecord = serde_json::from_value(value).map_err(|e| StoreError::CorruptModel {
        record,
        reason: e.to_string(),
    })?;
    to_rule(record, parsed)
}

fn to_rule(record: usize, parsed: RuleRecord) -> Result<Rule, StoreError> {
    parsed.into_rule().map_err(|e| StoreError::CorruptModel {
        record,
        reason: e.to_string(),
    })
}

/// Read the `rules` table of a SQLite corpus in row order
pub fn read_sqlite(path: &Path) -> Result<Vec<Rule>, StoreError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(classify_sqlite_error)?;
    let rows = query_rules(&conn).map_err(classify_sqlite_error)?;

    rows.into_iter()
        .enumerate()
        .map(|(record, (antecedents, consequents, confidence, support, lift))| {
            let parsed = RuleRecord {
                antecedents: decode_items(record, "antecedents", antecedents)?,
                consequents: decode_items(record, "consequents", consequents)?,
                confidence: confidence.ok_or_else(|| StoreError::CorruptModel {
                    record,
                    reason: "missing field `confidence`".to_string(),
                })?,
                support,
                lift,
            };
            to_rule(record, parsed)
        })
        .collect()
}

fn query_rules(conn: &Connection) -> rusqlite::Result<Vec<SqliteRow>> {
    let mut stmt = conn.prepare(
        "SELECT antecedents, consequents, confidence, support, lift FROM rules ORDER BY id",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, Option<String>>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, Option<f64>>(3)?,
                row.get::<_, Option<f64>>(4)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Separate a file that is not a rule corpus from a database that failed
fn classify_sqlite_error(e: rusqlite::Error) -> StoreError {
    let reason = match &e {
        rusqlite::Error::SqliteFailure(failure, message) => match failure.code {
            ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt => Some("not a SQLite rule corpus"),
            ErrorCode::Unknown
                if message.as_deref().is_some_and(|m| {
                    m.starts_with("no such table") || m.starts_with("no such column")
                }) =>
            {
                Some("missing `rules` schema")
            }
            _ => None,
        },
        rusqlite::Error::InvalidColumnType(..) | rusqlite::Error::FromSqlConversionFailure(..) => {
            Some("unexpected column type")
        }
        _ => None,
    };

    match reason {
        Some(reason) => StoreError::CorruptCorpus(format!("{}: {}", reason, e)),
        None => StoreError::Database(e),
    }
}

fn decode_items(record: usize, column: &str, raw: Option<String>) -> Result<Vec<String>, StoreError> {
    let raw = raw.ok_or_else(|| StoreError::CorruptModel {
        record,
        reason: format!("missing field `{}`", column),
    })?;
    serde_json::from_str(&raw).map_err(|e| StoreError::CorruptModel {
        record,
        reason: format!("`{}` is not a JSON array of strings: {}", column, e),
    })
}

/// Write `rules` to a SQLite corpus at `path`, replacing any existing rows
pub fn write_sqlite(path: &Path, rules: &[Rule]) -> Result<(), StoreError> {
    let mut conn = Connection::open(path)?;
    conn.execute_batch(include_str!("schema.sql"))?;

    let tx = conn.transaction()?;
    tx.execute("DELETE FROM rules", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO rules (antecedents, consequents, confidence, support, lift)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for rule in rules {
            let antecedents = serde_json::to_string(&rule.antecedent().to_vec())?;
            let consequents = serde_json::to_string(&rule.consequent().to_vec())?;
            stmt.execute(params![
                antecedents,
                consequents,
                rule.confidence().value(),
                rule.support(),
                rule.lift(),
            ])?;
        }
    }
    tx.commit()?;

    Ok(())
}

/// Write `rules` as a pretty-printed JSON array
pub fn write_json(path: &Path, rules: &[Rule]) -> Result<(), StoreError> {
    let records: Vec<RuleRecord> = rules.iter().map(RuleRecord::from).collect();
    fs::write(path, serde_json::to_string_pretty(&records)?)?;
    Ok(())
}

/// Write `rules` as JSON Lines
pub fn write_json_lines(path: &Path, rules: &[Rule]) -> Result<(), StoreError> {
    let mut out = String::new();
    for rule in rules {
        out.push_str(&serde_json::to_string(&RuleRecord::from(rule))?);
        out.push('\n');
    }
    fs::write(path, out)?;
    Ok(())
}
