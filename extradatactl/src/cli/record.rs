use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use extradata::EntityRecord;

use super::input::read_input;
use super::{Command, CommandError, Context};

#[derive(Args, Debug)]
pub struct RecordCommand {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Read the record JSON from FILE (default: stdin)"
    )]
    file: Option<PathBuf>,
    #[arg(long, help = "Show empty extra data instead of failing on a corrupt column")]
    lenient: bool,
}

impl RecordCommand {
    fn render(&self, ctx: &Context, input: &str) -> Result<String, CommandError> {
        let record: EntityRecord = serde_json::from_str(input)?;
        record.validate()?;
        debug!(kind = %record.kind, id = %record.id, "Loaded entity record");

        let data = if self.lenient {
            ctx.codec.decode_or_default(record.extra_data.as_deref())
        } else {
            record.extra_data(&ctx.codec)?
        };

        let body = if ctx.config.output.pretty {
            ctx.codec.encode_pretty(&data)?
        } else {
            ctx.codec.encode(&data)?
        };
        Ok(format!("{} {}\n{body}", record.kind, record.id))
    }
}

impl Command for RecordCommand {
    fn execute(&self, ctx: &Context) -> Result<(), CommandError> {
        let input = read_input(self.file.as_deref())?;
        println!("{}", self.render(ctx, &input)?);
        Ok(())
    }
}
