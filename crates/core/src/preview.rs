//! Bordered content previews of files about to be migrated

use std::fmt::Write as _;
use std::path::Path;

use color_eyre::Result;

/// Default number of lines shown per preview
pub const DEFAULT_PREVIEW_LINES: usize = 50;

const BORDER_WIDTH: usize = 80;

/// Render a bordered preview of the first `max_lines` lines of a file.
///
/// The report shows the file path, the total line count, each shown line
/// prefixed with a 1-based line number, and a trailer with the number of
/// hidden lines when truncated.
///
/// The read is lenient: invalid UTF-8 is replaced rather than failing.
///
/// # Errors
/// Returns an error only if the file cannot be read at all. Preview is a
/// diagnostic aid, so callers report the error and carry on.
pub fn render_preview(path: &Path, max_lines: usize) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let lines: Vec<&str> = text.lines().collect();
    let total = lines.len();

    let border = "=".repeat(BORDER_WIDTH);
    let mut out = String::new();
    writeln!(out, "{border}")?;
    writeln!(out, "File: {}", path.display())?;
    writeln!(out, "Lines: {total}")?;
    writeln!(out, "{border}")?;

    for (index, line) in lines.iter().take(max_lines).enumerate() {
        writeln!(out, "{:4} | {}", index + 1, line.trim_end())?;
    }
    if total > max_lines {
        writeln!(out, "... ({} more lines hidden)", total - max_lines)?;
    }
    writeln!(out, "{border}")?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_preview_numbers_lines_from_one() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("short.txt");
        fs::write(&path, "first\nsecond\n").unwrap();

        let out = render_preview(&path, DEFAULT_PREVIEW_LINES).unwrap();

        assert!(out.contains("Lines: 2"), "got:\n{out}");
        assert!(out.contains("   1 | first"), "got:\n{out}");
        assert!(out.contains("   2 | second"), "got:\n{out}");
        assert!(!out.contains("more lines hidden"));
    }

    #[test]
    fn test_preview_truncates_and_counts_hidden_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("long.txt");
        let body: String = (1..=10).map(|n| format!("line {n}\n")).collect();
        fs::write(&path, body).unwrap();

        let out = render_preview(&path, 3).unwrap();

        assert!(out.contains("   3 | line 3"), "got:\n{out}");
        assert!(!out.contains("line 4"), "got:\n{out}");
        assert!(out.contains("... (7 more lines hidden)"), "got:\n{out}");
    }

    #[test]
    fn test_preview_tolerates_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binaryish");
        fs::write(&path, [0xff, 0xfe, b'h', b'i', b'\n']).unwrap();

        let out = render_preview(&path, DEFAULT_PREVIEW_LINES).unwrap();

        assert!(out.contains("Lines: 1"), "got:\n{out}");
        assert!(out.contains("hi"), "got:\n{out}");
    }

    #[test]
    fn test_preview_of_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(render_preview(&dir.path().join("gone.txt"), 50).is_err());
    }

    #[test]
    fn test_preview_strips_trailing_whitespace_per_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trailing.txt");
        fs::write(&path, "padded   \n").unwrap();

        let out = render_preview(&path, DEFAULT_PREVIEW_LINES).unwrap();

        assert!(out.contains("   1 | padded\n"), "got:\n{out}");
    }
}
