use clap::{CommandFactory, Parser};
use tracing::{debug, error};

use extradata::ExtraDataCodec;
use extradatactl::cli::{self, CommandError, Context};
use extradatactl::config::Config;

fn main() -> Result<(), CommandError> {
    let cli = cli::Cli::parse();

    if cli.markdown_help {
        clap_markdown::print_help_markdown::<cli::Cli>();
        std::process::exit(0);
    }

    let config = Config::resolve(cli.config.as_deref())?;
    let guard = config.init_logger()?;
    debug!(?config, "Configuration loaded");

    let ctx = Context::new(ExtraDataCodec::new(), config);

    if let Some(command) = &cli.command {
        let result = cli::execute(&ctx, command);
        if let Err(e) = result {
            error!("Command failed: {e}");
            eprintln!("Error executing command: {e}");
            drop(guard);
            std::process::exit(1);
        }
        Ok(())
    } else {
        cli::Cli::command().print_help().map_err(CommandError::Io)?;
        drop(guard);
        std::process::exit(0);
    }
}
