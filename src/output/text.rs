//! Plain-text rendering for the default output mode.

use mflix::{Error, Result};

/// Print one report section. Sections after the first get a blank line
/// in front.
pub fn print_section(text: &str, first: bool) -> Result<()> {
    if !first {
        super::write_stdout_line("")?;
    }
    super::write_stdout_line(text)
}

pub fn format_error(err: &Error) -> String {
    let mut out = format!("Error [{}]: {}", err.code.as_str(), err.message);
    for hint in &err.hints {
        out.push_str("\n  hint: ");
        out.push_str(&hint.message);
    }
    out
}

pub fn print_error(err: &Error) {
    eprintln!("{}", format_error(err));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_lists_hints_after_message() {
        let err = Error::store_empty_result("movies").with_hint("Is the dataset loaded?");

        assert_eq!(
            format_error(&err),
            "Error [store.empty_result]: Aggregation on 'movies' returned no documents\n  hint: Is the dataset loaded?"
        );
    }
}
