//! Log lines in the runner's workflow-command syntax.

use console::style;

/// Escapes data so it survives as a single workflow-command line
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escapes a command property value (`name=...`)
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Formats a `::command::message` line
pub fn format_command(command: &str, message: &str) -> String {
    format!("::{}::{}", command, escape_data(message))
}

pub fn info(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

pub fn success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn debug(message: &str) {
    println!("{}", format_command("debug", message));
}

pub fn notice(message: &str) {
    println!("{}", format_command("notice", message));
}

pub fn warning(message: &str) {
    println!("{}", format_command("warning", message));
}

pub fn error(message: &str) {
    println!("{}", format_command("error", message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("100% done\r\nnext"), "100%25 done%0D%0Anext");
    }

    #[test]
    fn test_escape_property() {
        assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
    }

    #[test]
    fn test_format_command() {
        assert_eq!(
            format_command("warning", "User bob cannot perform deployments"),
            "::warning::User bob cannot perform deployments"
        );
        assert_eq!(format_command("error", "line1\nline2"), "::error::line1%0Aline2");
    }
}
