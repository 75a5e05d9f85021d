use std::path::PathBuf;

use clap::Args;

use extradata::ExtraData;

use super::input::read_input;
use super::{Command, CommandError, Context};

#[derive(Args, Debug)]
pub struct DecodeCommand {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Read the column value from FILE (default: stdin)"
    )]
    file: Option<PathBuf>,
    #[arg(
        long,
        conflicts_with = "file",
        help = "Treat the column as NULL instead of reading input"
    )]
    absent: bool,
    #[arg(long, help = "Print compact JSON regardless of configuration")]
    compact: bool,
}

impl DecodeCommand {
    fn render(&self, ctx: &Context, column: Option<&str>) -> Result<String, CommandError> {
        let data = ctx.codec.decode(column)?;
        Ok(self.format(ctx, &data)?)
    }

    fn format(&self, ctx: &Context, data: &ExtraData) -> Result<String, extradata::CodecError> {
        if self.compact || !ctx.config.output.pretty {
            ctx.codec.encode(data)
        } else {
            ctx.codec.encode_pretty(data)
        }
    }
}

impl Command for DecodeCommand {
    fn execute(&self, ctx: &Context) -> Result<(), CommandError> {
        let output = if self.absent {
            self.render(ctx, None)?
        } else {
            let column = read_input(self.file.as_deref())?;
            self.render(ctx, Some(&column))?
        };
        println!("{output}");
        Ok(())
    }
}
