use std::path::PathBuf;

use clap::Args;
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use serde::Serialize;

use extradata::{ExtraData, ExtraValue};

use super::input::read_input;
use super::{Command, CommandError, Context};

#[derive(Args, Debug)]
pub struct InspectCommand {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Read the column value from FILE (default: stdin)"
    )]
    file: Option<PathBuf>,
    #[arg(long, help = "Print the key summary as JSON")]
    json: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct KeySummary {
    key: String,
    kind: &'static str,
    depth: usize,
    preview: String,
}

impl KeySummary {
    fn new(key: &str, value: &ExtraValue, width: usize) -> Self {
        Self {
            key: key.to_string(),
            kind: value.kind(),
            depth: value.depth(),
            preview: preview(value, width),
        }
    }
}

/// Compact JSON cut to `width` characters, ending with `…` when cut.
fn preview(value: &ExtraValue, width: usize) -> String {
    let text = value.to_string();
    if text.chars().count() <= width {
        return text;
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn summarize(data: &ExtraData, width: usize) -> Vec<KeySummary> {
    data.iter()
        .map(|(key, value)| KeySummary::new(key, value, width))
        .collect()
}

fn render_table(summaries: &[KeySummary]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Key", "Kind", "Depth", "Preview"]);

    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.key),
            Cell::new(summary.kind),
            Cell::new(summary.depth),
            Cell::new(&summary.preview),
        ]);
    }

    table.to_string()
}

impl InspectCommand {
    fn render(&self, ctx: &Context, column: &str) -> Result<String, CommandError> {
        let data = ctx.codec.decode(Some(column))?;
        let summaries = summarize(&data, ctx.config.output.preview_width);
        if self.json {
            Ok(serde_json::to_string_pretty(&summaries)?)
        } else if summaries.is_empty() {
            Ok("No extra data".to_string())
        } else {
            Ok(render_table(&summaries))
        }
    }
}

impl Command for InspectCommand {
    fn execute(&self, ctx: &Context) -> Result<(), CommandError> {
        let column = read_input(self.file.as_deref())?;
        println!("{}", self.render(ctx, &column)?);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::Config;
    use extradata::ExtraDataCodec;

    const COLUMN: &str = r#"{"name":"Jane","roles":["admin","mod"],"profile":{"age":31}}"#;

    fn context() -> Context {
        Context::new(ExtraDataCodec::new(), Config::default())
    }

    #[test]
    fn test_preview_short_value() {
        assert_eq!(preview(&ExtraValue::from("hi"), 10), "\"hi\"");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let value = ExtraValue::from("ééééééééééé");
        let cut = preview(&value, 8);
        assert_eq!(cut.chars().count(), 8);
        assert!(cut.ends_with('…'));
        assert!(cut.starts_with("\"éééééé"));
    }

    #[test]
    fn test_summarize_sorted_keys() {
        let data = ExtraDataCodec::new().decode(Some(COLUMN)).unwrap();
        let summaries = summarize(&data, 48);
        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].key, "name");
        assert_eq!(summaries[0].kind, "string");
        assert_eq!(summaries[1].key, "profile");
        assert_eq!(summaries[1].kind, "object");
        assert_eq!(summaries[1].depth, 1);
        assert_eq!(summaries[1].preview, r#"{"age":31}"#);
        assert_eq!(summaries[2].key, "roles");
        assert_eq!(summaries[2].kind, "array");
    }

    #[test]
    fn test_inspect_table() {
        let cmd = InspectCommand {
            file: None,
            json: false,
        };
        let output = cmd.render(&context(), COLUMN).unwrap();
        assert!(output.contains("Key"));
        assert!(output.contains("profile"));
        assert!(output.contains("array"));
    }

    #[test]
    fn test_inspect_json() {
        let cmd = InspectCommand {
            file: None,
            json: true,
        };
        let output = cmd.render(&context(), COLUMN).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["key"], "name");
        assert_eq!(parsed[2]["kind"], "array");
    }

    #[test]
    fn test_inspect_empty_and_malformed() {
        let cmd = InspectCommand {
            file: None,
            json: false,
        };
        assert_eq!(cmd.render(&context(), "{}").unwrap(), "No extra data");
        assert!(cmd.render(&context(), "{\"a\":").is_err());
    }
}
