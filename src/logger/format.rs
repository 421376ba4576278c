//! Log formatting and output
//!
//! Console lines go to stderr so command output on stdout (tables, JSON) stays clean.

use super::config::LoggerConfig;
use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stderr, ErrorKind, Write};

const TAG_WIDTH: usize = 10;
const LEVEL_WIDTH: usize = 7;

/// Maximum line length before wrapping
const MAX_LINE_LENGTH: usize = 145;

pub fn format_and_log(config: &LoggerConfig, tag: &LogTag, level: LogLevel, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string();

    let tag_label = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    let level_label = format!("{:<width$}", level.as_str(), width = LEVEL_WIDTH);

    let base_line = if config.colored {
        format!(
            "{} [{}] [{}] ",
            time.dimmed(),
            tag.colorize(tag_label),
            colorize_level(level, level_label)
        )
    } else {
        format!("{} [{}] [{}] ", time, tag_label, level_label)
    };

    let prefix_width = strip_ansi_codes(&base_line).chars().count();
    let available = MAX_LINE_LENGTH.saturating_sub(prefix_width).max(50);
    let chunks = wrap_text(message, available);

    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let continuation = " ".repeat(prefix_width);

    for (i, chunk) in chunks.iter().enumerate() {
        if i == 0 {
            print_stderr_safe(&format!("{}{}", base_line, chunk));
        } else {
            print_stderr_safe(&format!("{}{}", continuation, chunk));
        }
        write_to_file(&format!(
            "{} [{}] [{}] {}",
            timestamp,
            tag.to_plain_string(),
            level.as_str(),
            chunk
        ));
    }
}

fn colorize_level(level: LogLevel, padded: String) -> ColoredString {
    match level {
        LogLevel::Error => padded.bright_red().bold(),
        LogLevel::Warning => padded.bright_yellow().bold(),
        LogLevel::Info => padded.white().bold(),
        LogLevel::Debug | LogLevel::Verbose => padded.dimmed(),
    }
}

/// Print to stderr but ignore broken pipe errors
fn print_stderr_safe(message: &str) {
    let mut handle = stderr();
    if let Err(e) = writeln!(handle, "{}", message) {
        if e.kind() == ErrorKind::BrokenPipe {
            return;
        }
    }
    let _ = handle.flush();
}

/// Remove ANSI color codes from text
pub(crate) fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::new();
    let mut in_escape = false;

    for ch in text.chars() {
        if ch == '\x1b' {
            in_escape = true;
        } else if in_escape && ch == 'm' {
            in_escape = false;
        } else if !in_escape {
            result.push(ch);
        }
    }
    result
}

/// Wrap text at word boundaries, respecting existing newlines
///
/// Words longer than `max_width` (URLs, addresses) are hard-split.
pub(crate) fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for line in text.split('\n') {
        if line.chars().count() <= max_width {
            result.push(line.to_string());
            continue;
        }

        let mut current = String::new();
        for word in line.split_whitespace() {
            let word_len = word.chars().count();
            let current_len = current.chars().count();

            if word_len > max_width {
                if !current.is_empty() {
                    result.push(std::mem::take(&mut current));
                }
                let chars: Vec<char> = word.chars().collect();
                for piece in chars.chunks(max_width) {
                    result.push(piece.iter().collect());
                }
            } else if current.is_empty() {
                current = word.to_string();
            } else if current_len + word_len + 1 <= max_width {
                current.push(' ');
                current.push_str(word);
            } else {
                result.push(std::mem::replace(&mut current, word.to_string()));
            }
        }

        if !current.is_empty() {
            result.push(current);
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }

    result
}
