use std::fmt;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use extradata::{CodecError, ExtraDataCodec};

use super::input::read_input;
use super::{Command, CommandError, Context};

#[derive(Args, Debug)]
pub struct CheckCommand {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Read the column value from FILE (default: stdin)"
    )]
    file: Option<PathBuf>,
    #[arg(long, help = "Print the report as JSON")]
    json: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CheckReport {
    pub keys: usize,
    pub depth: usize,
    pub bytes: usize,
    pub canonical_bytes: usize,
    /// The stored text is byte-for-byte what `encode` would write.
    pub canonical: bool,
    pub roundtrip: bool,
}

impl CheckReport {
    /// Fails only when the column cannot be decoded or re-encoded.
    pub fn from_column(codec: &ExtraDataCodec, column: &str) -> Result<Self, CodecError> {
        let data = codec.decode(Some(column))?;
        let canonical = codec.encode(&data)?;
        let reread = codec.decode(Some(&canonical))?;

        Ok(Self {
            keys: data.len(),
            depth: data.depth(),
            bytes: column.len(),
            canonical_bytes: canonical.len(),
            canonical: canonical == column,
            roundtrip: reread == data,
        })
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Keys: {}", self.keys)?;
        writeln!(f, "Depth: {}", self.depth)?;
        writeln!(f, "Size: {} bytes ({} canonical)", self.bytes, self.canonical_bytes)?;
        writeln!(f, "Canonical: {}", if self.canonical { "yes" } else { "no" })?;
        write!(f, "Round-trip: {}", if self.roundtrip { "ok" } else { "FAILED" })
    }
}

impl CheckCommand {
    fn render(&self, ctx: &Context, column: &str) -> Result<String, CommandError> {
        let report = CheckReport::from_column(&ctx.codec, column)?;
        if report.roundtrip {
            info!(keys = report.keys, "Extra data round-trips");
        } else {
            warn!(keys = report.keys, "Extra data does not round-trip");
        }
        if self.json {
            Ok(serde_json::to_string_pretty(&report)?)
        } else {
            Ok(report.to_string())
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ctx: &Context) -> Result<(), CommandError> {
        let column = read_input(self.file.as_deref())?;
        println!("{}", self.render(ctx, &column)?);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Config;

    const CODEC: ExtraDataCodec = ExtraDataCodec::new();

    #[test]
    fn test_check_canonical_column() {
        let report = CheckReport::from_column(&CODEC, r#"{"a":{"b":[1,"two",true,null]}}"#).unwrap();
        assert_eq!(
            report,
            CheckReport {
                keys: 1,
                depth: 3,
                bytes: 31,
                canonical_bytes: 31,
                canonical: true,
                roundtrip: true,
            }
        );
    }

    #[test]
    fn test_check_non_canonical_column() {
        let report = CheckReport::from_column(&CODEC, r#"{ "b": 1, "a": 2 }"#).unwrap();
        assert!(!report.canonical);
        assert!(report.roundtrip);
        assert_eq!(report.canonical_bytes, r#"{"a":2,"b":1}"#.len());
    }

    #[test]
    fn test_check_malformed_column() {
        let err = CheckReport::from_column(&CODEC, "[1,2,3]").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_check_report_display() {
        let report = CheckReport::from_column(&CODEC, "{}").unwrap();
        assert_eq!(
            report.to_string(),
            "Keys: 0\nDepth: 1\nSize: 2 bytes (2 canonical)\nCanonical: yes\nRound-trip: ok"
        );
    }

    #[test]
    fn test_check_command_json() {
        let ctx = Context::new(CODEC, Config::default());
        let cmd = CheckCommand {
            file: None,
            json: true,
        };
        let output = cmd.render(&ctx, r#"{"k":"v"}"#).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["canonical"], true);
        assert_eq!(parsed["keys"], 1);
    }
}
