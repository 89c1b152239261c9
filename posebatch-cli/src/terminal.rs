// ============================================================================
// posebatch-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: UI Components and Styling
//
// Sections, status lines and success/error markers for the CLI. Everything
// goes through the `log` macros so it also lands in the run's log file.
// Colors are only applied when stdout supports them.

use log::{debug, error, info};
use owo_colors::{OwoColorize, Stream::Stdout};

/// Styling constants for terminal output
pub mod styling {
    pub const SUCCESS_SYMBOL: &str = "✓";
    pub const PROCESSING_SYMBOL: &str = "»";
    pub const ERROR_SYMBOL: &str = "✗";

    pub const SECTION_PREFIX: &str = "===== ";
    pub const SECTION_SUFFIX: &str = " =====";

    pub const STATUS_INDENT: &str = "  ";

    /// Width labels are padded to in status lines
    pub const STATUS_LABEL_WIDTH: usize = 15;
}

/// Print a section header for major workflow phases
pub fn print_section(title: &str) {
    info!("");
    info!(
        "{}{}{}",
        styling::SECTION_PREFIX,
        title
            .to_uppercase()
            .if_supports_color(Stdout, |t| t.cyan().bold().to_string()),
        styling::SECTION_SUFFIX
    );
}

/// Print a status line (key-value pair)
pub fn print_status(label: &str, value: &str, highlight: bool) {
    let padding = styling::STATUS_LABEL_WIDTH.saturating_sub(label.len()).max(1);
    let value = if highlight {
        value.if_supports_color(Stdout, |v| v.bold()).to_string()
    } else {
        value.to_string()
    };
    info!(
        "{}{}:{}{}",
        styling::STATUS_INDENT,
        label,
        " ".repeat(padding),
        value
    );
}

/// Print a processing step message
pub fn print_processing(message: &str) {
    info!(
        "{}{} {}",
        styling::STATUS_INDENT,
        styling::PROCESSING_SYMBOL,
        message.if_supports_color(Stdout, |m| m.bold())
    );
}

/// Print a success message
pub fn print_success(message: &str) {
    info!(
        "{}{} {}",
        styling::STATUS_INDENT,
        styling::SUCCESS_SYMBOL.if_supports_color(Stdout, |s| s.green()),
        message
    );
}

/// Print an error; its chain of causes is logged at debug level
pub fn print_error(err: &(dyn std::error::Error + 'static)) {
    error!(
        "{} {}",
        styling::ERROR_SYMBOL,
        err.to_string().if_supports_color(Stdout, |e| e.red().bold().to_string())
    );
    let mut source = err.source();
    while let Some(cause) = source {
        debug!("{}caused by: {}", styling::STATUS_INDENT, cause);
        source = cause.source();
    }
}
