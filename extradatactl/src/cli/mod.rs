use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use extradata::{CodecError, ExtraDataCodec};

use crate::VERSION;
use crate::config::{Config, ConfigError};

mod check;
mod decode;
mod encode;
mod input;
mod inspect;
mod record;

#[derive(Parser, Debug)]
#[command(name = "extradatactl")]
#[command(about = "Inspect and verify stored chat extra data", long_about = None)]
#[command(version = VERSION)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[arg(long, hide = true)]
    pub markdown_help: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Generic error: {0}")]
    Generic(String),
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Decode a stored extra-data column")]
    Decode(decode::DecodeCommand),
    #[command(about = "Build an extra-data column from KEY=VALUE pairs")]
    Encode(encode::EncodeCommand),
    #[command(about = "List the top-level keys of a stored column")]
    Inspect(inspect::InspectCommand),
    #[command(about = "Verify that a stored column decodes and round-trips")]
    Check(check::CheckCommand),
    #[command(about = "Decode the extra data of a stored entity record")]
    Record(record::RecordCommand),
}

/// What every command needs: the codec and the loaded configuration.
#[derive(Debug, Clone)]
pub struct Context {
    pub codec: ExtraDataCodec,
    pub config: Config,
}

impl Context {
    #[must_use]
    pub const fn new(codec: ExtraDataCodec, config: Config) -> Self {
        Self { codec, config }
    }
}

pub fn execute(ctx: &Context, command: &Commands) -> Result<(), CommandError> {
    match command {
        Commands::Decode(cmd) => cmd.execute(ctx),
        Commands::Encode(cmd) => cmd.execute(ctx),
        Commands::Inspect(cmd) => cmd.execute(ctx),
        Commands::Check(cmd) => cmd.execute(ctx),
        Commands::Record(cmd) => cmd.execute(ctx),
    }
}

pub trait Command {
    fn execute(&self, ctx: &Context) -> Result<(), CommandError>;
}
