//! Offline clean-up of raw reference lines.
//!
//! Raw tag dumps use spaces and hyphens and leave parentheses bare, which the
//! prompt parser downstream would treat as emphasis groups. Each line is
//! trimmed, spaces and hyphens become underscores, and every parenthesis not
//! already escaped gets a backslash. A parenthesis is escaped when an odd
//! number of backslashes directly precede it.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Normalize a single line.
pub fn normalize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 4);
    let mut backslashes = 0usize;
    for ch in line.trim().chars() {
        match ch {
            ' ' | '-' => out.push('_'),
            '(' | ')' => {
                if backslashes % 2 == 0 {
                    out.push('\\');
                }
                out.push(ch);
            }
            _ => out.push(ch),
        }
        backslashes = if ch == '\\' { backslashes + 1 } else { 0 };
    }
    out
}

/// Split on every line boundary: `\n`, `\r\n`, a lone `\r`, and the
/// Unicode separators. A trailing boundary does not open an empty last line.
fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = content.char_indices().peekable();
    while let Some((i, ch)) = chars.next() {
        if !matches!(
            ch,
            '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
        ) {
            continue;
        }
        lines.push(&content[start..i]);
        start = i + ch.len_utf8();
        if ch == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
            chars.next();
            start += 1;
        }
    }
    if start < content.len() {
        lines.push(&content[start..]);
    }
    lines
}

/// Normalize every line of `content`, joining with `\n` and no trailing
/// newline.
pub fn normalize_text(content: &str) -> String {
    split_lines(content)
        .into_iter()
        .map(normalize_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize a file, writing to `output` or back over `input`.
///
/// Returns the number of lines written.
pub fn normalize_file(input: &Path, output: Option<&Path>) -> Result<usize, NormalizeError> {
    let content = std::fs::read_to_string(input).map_err(|source| NormalizeError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let normalized = normalize_text(&content);
    let target = output.unwrap_or(input);
    std::fs::write(target, &normalized).map_err(|source| NormalizeError::Write {
        path: target.to_path_buf(),
        source,
    })?;

    let lines = split_lines(&content).len();
    info!(input = %input.display(), output = %target.display(), lines, "normalized reference list");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_and_hyphens_become_underscores() {
        assert_eq!(normalize_line("  ke-ta and friends "), "ke_ta_and_friends");
    }

    #[test]
    fn bare_parentheses_are_escaped() {
        assert_eq!(normalize_line("a (b)"), "a_\\(b\\)");
    }

    #[test]
    fn escaped_parentheses_are_left_alone() {
        assert_eq!(normalize_line("a\\(b\\)"), "a\\(b\\)");
    }

    #[test]
    fn even_backslashes_mean_unescaped() {
        // `\\(` is a literal backslash followed by a bare parenthesis
        assert_eq!(normalize_line("a\\\\(b"), "a\\\\\\(b");
    }

    #[test]
    fn idempotent() {
        let once = normalize_line("yd (orange maru)");
        assert_eq!(normalize_line(&once), once);
    }

    #[test]
    fn text_has_no_trailing_newline() {
        assert_eq!(normalize_text("a b\nc-d\n"), "a_b\nc_d");
    }

    #[test]
    fn every_line_ending_splits() {
        assert_eq!(normalize_text("a b\rc-d"), "a_b\nc_d");
        assert_eq!(normalize_text("a b\r\nc-d\r\n"), "a_b\nc_d");
        assert_eq!(normalize_text("a\r\rb\u{2028}c"), "a\n\nb\nc");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn old_mac_file_counts_every_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artists.csv");
        std::fs::write(&path, "mika pikazo\ryd (orange maru)\r").unwrap();

        assert_eq!(normalize_file(&path, None).unwrap(), 2);
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "mika_pikazo\nyd_\\(orange_maru\\)");
    }

    #[test]
    fn rewrites_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artists.csv");
        std::fs::write(&path, "mika pikazo\nyd (orange maru)\n").unwrap();

        let lines = normalize_file(&path, None).unwrap();
        assert_eq!(lines, 2);
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "mika_pikazo\nyd_\\(orange_maru\\)");
    }

    #[test]
    fn writes_to_separate_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("raw.csv");
        let output = dir.path().join("clean.csv");
        std::fs::write(&input, "a-b").unwrap();

        normalize_file(&input, Some(&output)).unwrap();
        assert_eq!(std::fs::read_to_string(&input).unwrap(), "a-b");
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "a_b");
    }
}
