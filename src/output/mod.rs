mod response;
mod text;

pub use response::*;
pub use text::*;

use std::io::{self, Write};

/// Write a line to stdout, treating a closed pipe as success.
pub(crate) fn write_stdout_line(line: &str) -> mflix::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", line) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(mflix::Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}
