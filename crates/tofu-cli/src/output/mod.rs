//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

impl OutputFormat {
    /// Render a single value for the machine-readable formats.
    ///
    /// Returns `None` for [`OutputFormat::Pretty`], which each command prints
    /// itself.
    pub fn render_one<T: Serialize>(self, row: &T) -> Result<Option<String>> {
        self.render(row, std::slice::from_ref(row))
    }

    /// Render a list for the machine-readable formats.
    pub fn render_many<T: Serialize>(self, rows: &[T]) -> Result<Option<String>> {
        self.render(&rows, rows)
    }

    fn render<V, T>(self, value: &V, rows: &[T]) -> Result<Option<String>>
    where
        V: Serialize + ?Sized,
        T: Serialize,
    {
        let rendered = match self {
            Self::Pretty => return Ok(None),
            Self::Json => {
                let mut out = serde_json::to_string_pretty(value)?;
                out.push('\n');
                out
            }
            Self::Yaml => serde_yaml::to_string(value)?,
            Self::Csv => {
                let mut writer = csv::Writer::from_writer(Vec::new());
                for row in rows {
                    writer.serialize(row)?;
                }
                String::from_utf8(writer.into_inner()?)?
            }
        };
        Ok(Some(rendered))
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, csv, yaml",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}
