use std::io::{Error, ErrorKind, Result};
use std::path::{Path, PathBuf};
use std::{env, fs};

use clap::{Command, CommandFactory, Parser};
use clap_mangen::Man;
use extradatactl::cli::Cli;

/// Writes one man page per extradatactl command.
#[derive(Parser, Debug)]
#[command(name = "extradatactl-mangen")]
struct Args {
    /// Output directory (default: $OUT_DIR)
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
}

fn out_dir(out: Option<PathBuf>) -> Result<PathBuf> {
    match out {
        Some(dir) => Ok(dir),
        None => env::var_os("OUT_DIR").map(PathBuf::from).ok_or_else(|| {
            Error::new(ErrorKind::NotFound, "pass --out DIR or set OUT_DIR")
        }),
    }
}

fn main() -> Result<()> {
    let out_dir = out_dir(Args::parse().out)?;
    fs::create_dir_all(&out_dir)?;
    let written = generate_manpages(&Cli::command(), &out_dir, &[])?;
    println!("{written} man pages written to {}", out_dir.display());
    Ok(())
}

/// Renders `cmd` and its subcommands as `extradatactl-<sub>.1`, returning the
/// number of pages written.
fn generate_manpages(cmd: &Command, out_dir: &Path, parent_cmds: &[String]) -> Result<usize> {
    if cmd.is_hide_set() {
        return Ok(0);
    }

    let mut cmd_path = parent_cmds.to_owned();
    cmd_path.push(cmd.get_name().to_string());
    let out_path = out_dir.join(format!("{}.1", cmd_path.join("-")));

    let mut buffer = Vec::<u8>::new();
    Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(&out_path, buffer)?;

    cmd.get_subcommands()
        .try_fold(1_usize, |written, sub| {
            Ok(written.saturating_add(generate_manpages(sub, out_dir, &cmd_path)?))
        })
}
