//! Cargo-style status output for porter
//!
//! Displays migration feedback in the familiar cargo format:
//! ```text
//!    Migrating /home/me/proj -> /home/me/work/temp
//!       Copied src/main.py -> temp/proj/src/main.py
//!       Failed src/gone.py: file not found
//!     Finished 3 succeeded, 1 failed in 12ms
//! ```

use std::io::Write as _;
use std::path::Path;
use std::time::Instant;

/// Status verbs (right-aligned to 12 chars)
struct Status;

impl Status {
    const MIGRATING: &str = "Migrating";
    const COPIED: &str = "Copied";
    const FAILED: &str = "Failed";
    const FINISHED: &str = "Finished";
}

/// Print a cargo-style status line
fn print_status(status: &str, message: &str) {
    let mut term = console::Term::stdout();
    let style = console::Style::new().green().bold();
    let _ = writeln!(term, "{:>12} {}", style.apply_to(status), message);
}

/// Announce the source and staging roots for this run
pub fn migrating(source: &Path, staging: &Path) {
    print_status(
        Status::MIGRATING,
        &format!("{} -> {}", source.display(), staging.display()),
    );
}

/// Report one successful copy
pub fn copied(source: &Path, dest: &Path) {
    print_status(
        Status::COPIED,
        &format!("{} -> {}", source.display(), dest.display()),
    );
}

/// Report one failed operation
pub fn failed(path: &Path, reason: &str) {
    let mut term = console::Term::stdout();
    let style = console::Style::new().red().bold();
    let _ = writeln!(
        term,
        "{:>12} {}: {}",
        style.apply_to(Status::FAILED),
        path.display(),
        reason
    );
}

/// Tracks elapsed time for the final summary line
pub struct RunTimer {
    start: Instant,
}

impl RunTimer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Print the closing summary
    pub fn finish(&self, succeeded: usize, failed: usize) {
        let elapsed = self.start.elapsed();
        let elapsed_str = if elapsed.as_secs() >= 1 {
            format!("{:.2}s", elapsed.as_secs_f64())
        } else {
            format!("{}ms", elapsed.as_millis())
        };

        let style = if failed == 0 {
            console::Style::new().green().bold()
        } else {
            console::Style::new().yellow().bold()
        };
        let mut term = console::Term::stdout();
        let _ = writeln!(
            term,
            "{:>12} {succeeded} succeeded, {failed} failed in {elapsed_str}",
            style.apply_to(Status::FINISHED)
        );
    }
}

impl Default for RunTimer {
    fn default() -> Self {
        Self::new()
    }
}
