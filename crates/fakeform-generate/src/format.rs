//! Rendering of sampled records.
//!
//! A `FormatProcessor` evaluates its expressions once per record and
//! renders the resulting rows in one of the supported formats. Format
//! parameters arrive as a `Params` map; each format validates the keys
//! it understands and rejects the rest.

use std::str::FromStr;

use rand::RngCore;
use serde_json::{Map, Value};

use crate::errors::GenerateError;
use crate::expression::Expression;
use crate::params::Params;
use crate::providers::ProviderRegistry;

const CSV_PARAMS: &[&str] = &["header", "separator", "quote"];
const SQL_PARAMS: &[&str] = &["batch", "table_name"];
const XML_PARAMS: &[&str] = &["pretty", "root_tag"];

const DEFAULT_SQL_TABLE: &str = "FAKEFORM_TABLE";
const DEFAULT_SQL_BATCH: i64 = 5;
const DEFAULT_XML_ROOT: &str = "root";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Txt,
    Csv,
    Tsv,
    Json,
    Sql,
    Xml,
    Yaml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 7] = [
        OutputFormat::Txt,
        OutputFormat::Csv,
        OutputFormat::Tsv,
        OutputFormat::Json,
        OutputFormat::Sql,
        OutputFormat::Xml,
        OutputFormat::Yaml,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
            OutputFormat::Sql => "sql",
            OutputFormat::Xml => "xml",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| GenerateError::InvalidParams(format!("unknown format '{s}'")))
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluates expressions against the registry and renders the records.
pub struct FormatProcessor<'a> {
    registry: &'a ProviderRegistry,
    expressions: Vec<Expression>,
    count: usize,
}

impl<'a> FormatProcessor<'a> {
    pub fn new(registry: &'a ProviderRegistry, expressions: Vec<Expression>, count: usize) -> Self {
        Self {
            registry,
            expressions,
            count,
        }
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.expressions
            .iter()
            .map(Expression::field_name)
            .collect()
    }

    /// Generate `count` records and render them.
    pub fn render(
        &self,
        format: OutputFormat,
        params: &Params,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerateError> {
        let rows = self.rows(rng)?;
        match format {
            OutputFormat::Txt => self.render_txt(&rows, params),
            OutputFormat::Csv => self.render_delimited(&rows, params, ',', "format csv"),
            OutputFormat::Tsv => self.render_delimited(&rows, params, '\t', "format tsv"),
            OutputFormat::Json => self.render_json(&rows, params),
            OutputFormat::Sql => self.render_sql(&rows, params),
            OutputFormat::Xml => self.render_xml(&rows, params),
            OutputFormat::Yaml => self.render_yaml(&rows, params),
        }
    }

    fn rows(&self, rng: &mut dyn RngCore) -> Result<Vec<Vec<String>>, GenerateError> {
        let mut rows = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            let mut row = Vec::with_capacity(self.expressions.len());
            for expression in &self.expressions {
                row.push(self.registry.generate(
                    expression.provider(),
                    expression.operation(),
                    expression.params(),
                    rng,
                )?);
            }
            rows.push(row);
        }
        Ok(rows)
    }

    fn render_txt(&self, rows: &[Vec<String>], params: &Params) -> Result<String, GenerateError> {
        params.ensure_known("format txt", &[])?;
        let names = self.field_names();
        let mut out = String::new();
        for row in rows {
            for (name, value) in names.iter().zip(row) {
                out.push_str(&format!("{name}: {value}\n"));
            }
        }
        Ok(out)
    }

    fn render_delimited(
        &self,
        rows: &[Vec<String>],
        params: &Params,
        default_separator: char,
        ctx: &str,
    ) -> Result<String, GenerateError> {
        params.ensure_known(ctx, CSV_PARAMS)?;
        let header = params.get_bool("header")?.unwrap_or(true);
        let separator = params.get_char("separator")?.unwrap_or(default_separator);
        let quote = params.get_char("quote")?.unwrap_or('"');
        let separator = u8::try_from(separator).map_err(|_| {
            GenerateError::InvalidParams(format!("{ctx}: separator must be a single byte"))
        })?;
        let quote = u8::try_from(quote).map_err(|_| {
            GenerateError::InvalidParams(format!("{ctx}: quote must be a single byte"))
        })?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(separator)
            .quote(quote)
            .has_headers(false)
            .from_writer(Vec::new());
        if header {
            writer.write_record(self.field_names())?;
        }
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(GenerateError::Io)?;
        let bytes = writer.into_inner().map_err(|err| err.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn render_json(&self, rows: &[Vec<String>], params: &Params) -> Result<String, GenerateError> {
        params.ensure_known("format json", &[])?;
        let names = self.field_names();
        let records: Vec<Value> = rows
            .iter()
            .map(|row| {
                let mut object = Map::new();
                for (name, value) in names.iter().zip(row) {
                    object.insert(name.to_string(), Value::String(value.clone()));
                }
                Value::Object(object)
            })
            .collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }

    fn render_sql(&self, rows: &[Vec<String>], params: &Params) -> Result<String, GenerateError> {
        params.ensure_known("format sql", SQL_PARAMS)?;
        let batch = params.get_i64("batch")?.unwrap_or(DEFAULT_SQL_BATCH);
        if batch < 1 {
            return Err(GenerateError::InvalidParams(
                "format sql: batch must be >= 1".to_string(),
            ));
        }
        let table = params.get("table_name").unwrap_or(DEFAULT_SQL_TABLE);
        let columns = self.field_names().join(", ");

        let mut out = String::new();
        for chunk in rows.chunks(batch as usize) {
            out.push_str(&format!("INSERT INTO {table} ({columns}) VALUES\n"));
            let tuples: Vec<String> = chunk
                .iter()
                .map(|row| {
                    let values: Vec<String> = row
                        .iter()
                        .map(|value| format!("'{}'", value.replace('\'', "''")))
                        .collect();
                    format!("({})", values.join(", "))
                })
                .collect();
            out.push_str(&tuples.join(",\n"));
            out.push_str(";\n");
        }
        Ok(out)
    }

    fn render_xml(&self, rows: &[Vec<String>], params: &Params) -> Result<String, GenerateError> {
        params.ensure_known("format xml", XML_PARAMS)?;
        let pretty = params.get_bool("pretty")?.unwrap_or(true);
        let root = params.get("root_tag").unwrap_or(DEFAULT_XML_ROOT);
        let names = self.field_names();

        let mut out = String::new();
        out.push_str(&format!("<{root}>"));
        for row in rows {
            if pretty {
                out.push_str("\n  ");
            }
            out.push_str("<record>");
            for (name, value) in names.iter().zip(row) {
                if pretty {
                    out.push_str("\n    ");
                }
                out.push_str(&format!("<{name}>{}</{name}>", xml_escape(value)));
            }
            if pretty {
                out.push_str("\n  ");
            }
            out.push_str("</record>");
        }
        if pretty {
            out.push('\n');
        }
        out.push_str(&format!("</{root}>\n"));
        Ok(out)
    }

    fn render_yaml(&self, rows: &[Vec<String>], params: &Params) -> Result<String, GenerateError> {
        params.ensure_known("format yaml", &[])?;
        let names = self.field_names();
        let mut out = String::new();
        for row in rows {
            for (index, (name, value)) in names.iter().zip(row).enumerate() {
                let prefix = if index == 0 { "- " } else { "  " };
                out.push_str(&format!("{prefix}{name}: {}\n", yaml_scalar(value)));
            }
        }
        Ok(out)
    }
}

fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn yaml_scalar(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value != value.trim()
        || value
            .chars()
            .any(|ch| matches!(ch, ':' | '#' | '"' | '\'' | '\n' | '{' | '}' | '[' | ']'));
    if needs_quotes {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escaped.replace('\n', "\\n"))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_escape_covers_markup_characters() {
        assert_eq!(xml_escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
    }

    #[test]
    fn yaml_scalar_quotes_special_values() {
        assert_eq!(yaml_scalar("plain"), "plain");
        assert_eq!(yaml_scalar("with: colon"), "\"with: colon\"");
        assert_eq!(yaml_scalar(""), "\"\"");
        assert_eq!(yaml_scalar("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn format_names_round_trip() {
        for format in OutputFormat::ALL {
            let parsed: OutputFormat = format.as_str().parse().expect("known name");
            assert_eq!(parsed, format);
        }
        assert!("html".parse::<OutputFormat>().is_err());
    }
}
