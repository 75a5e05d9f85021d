use std::fs;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;

/// Reads a whole column value from `file`, or from stdin when no file (or
/// `-`) is given. A single trailing newline, as left by most editors and
/// shells, is not part of the value.
pub fn read_input(file: Option<&Path>) -> io::Result<String> {
    let mut content = match file {
        Some(path) if path != Path::new("-") => {
            debug!("Reading input from {}", path.display());
            fs::read_to_string(path)?
        }
        Some(_) | None => {
            debug!("Reading input from stdin");
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    strip_trailing_newline(&mut content);
    Ok(content)
}

fn strip_trailing_newline(content: &mut String) {
    if content.ends_with('\n') {
        content.pop();
        if content.ends_with('\r') {
            content.pop();
        }
    }
}
