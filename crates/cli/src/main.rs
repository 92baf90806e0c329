//! porter: Copy project files into a staging directory
//!
//! A developer convenience for manual code porting: copies files or
//! directory trees from another project into `<staging>/<project>/...`,
//! preserving relative paths and optionally previewing file contents
//! before each copy.

mod status;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::builder::styling::{AnsiColor, Effects};
use clap::{CommandFactory, Parser, builder::Styles};
use color_eyre::Result;
use tracing::error;

use porter_core::config::DEFAULT_STAGING_DIR;
use porter_core::{Migrator, PorterConfig, WalkFilter, preview};

/// During a directory migration, only the first few copied files are
/// previewed, and at a shorter length than explicit files.
const DIR_PREVIEW_FILES: usize = 5;
const DIR_PREVIEW_LINES: usize = 20;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::Red.on_default());

#[derive(Parser)]
#[command(name = "porter")]
#[command(version)]
#[command(styles = STYLES)]
#[command(about = "Copy project files into a staging directory")]
#[command(long_about = r#"
porter copies files or directory trees from another project into a
staging subdirectory, preserving their relative paths. Useful when
porting code by hand and you want the interesting files collected in
one place, with a quick look at their contents on the way.

Examples:
  porter src/main.py                   Migrate one file
  porter src/main.py src/util.py       Migrate several files
  porter --dir src                     Migrate a whole directory
  porter --dir src --ext .py .js       Only certain extensions
  porter src/main.py --no-content      Skip the content preview
"#)]
struct Cli {
    /// Files to migrate (relative to the source root, or absolute paths
    /// inside it)
    files: Vec<PathBuf>,

    /// Directory to migrate recursively
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Source project root (default: `source` in .porter.toml)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Staging root receiving migrated files
    #[arg(short = 't', long = "temp", alias = "staging")]
    staging: Option<PathBuf>,

    /// Suppress content previews
    #[arg(long)]
    no_content: bool,

    /// Only migrate files with these extensions (directory migration)
    #[arg(long, num_args = 1..)]
    ext: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    Ok(ExitCode::from(run(cli)?))
}

/// Returns the process exit code: 1 when the source root is missing or
/// unconfigured, 0 otherwise.
fn run(cli: Cli) -> Result<u8> {
    let config = PorterConfig::load(Path::new("."))?;

    // A usable source root is the one thing nothing can proceed without.
    let Some(source) = cli.source.clone().or_else(|| config.source.clone()) else {
        error!("no source project configured (use --source or `source` in .porter.toml)");
        return Ok(1);
    };
    if !source.exists() {
        error!("source project path does not exist: {}", source.display());
        return Ok(1);
    }

    let staging = cli
        .staging
        .clone()
        .or_else(|| config.staging.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STAGING_DIR));
    let staging = std::path::absolute(&staging)?;
    std::fs::create_dir_all(&staging)?;

    let mut migrator = Migrator::new(&source, &staging);
    if let Some(project) = &config.project {
        migrator = migrator.with_project(project.clone());
    }

    if cli.dir.is_none() && cli.files.is_empty() {
        Cli::command().print_help()?;
        return Ok(0);
    }

    status::migrating(&source, &staging);

    let timer = status::RunTimer::new();
    let (succeeded, failed) = migrate(&cli, &migrator, &config);
    timer.finish(succeeded, failed);

    // Per-file and per-directory failures are reported above but never
    // change the exit code.
    Ok(0)
}

/// Dispatch the directory migration and the explicit file migrations,
/// returning accumulated (succeeded, failed) counts.
fn migrate(cli: &Cli, migrator: &Migrator, config: &PorterConfig) -> (usize, usize) {
    let mut succeeded = 0usize;
    let mut failed = 0usize;

    if let Some(dir) = &cli.dir {
        let mut filter = WalkFilter::default();
        if !cli.ext.is_empty() {
            filter = filter.with_extensions(cli.ext.iter().map(|ext| normalize_ext(ext)));
        }
        for name in &config.exclude {
            filter = filter.exclude(name.clone());
        }

        match migrator.copy_dir(dir, &filter) {
            Ok(report) => {
                for (index, relative) in report.copied.iter().enumerate() {
                    status::copied(relative, &migrator.staging_dir().join(relative));
                    if !cli.no_content && index < DIR_PREVIEW_FILES {
                        if let Ok(path) = migrator.resolve(relative) {
                            preview_file(&path, DIR_PREVIEW_LINES);
                        }
                    }
                }
                for (path, reason) in &report.failed {
                    status::failed(path, reason);
                }
                succeeded += report.copied_count();
                failed += report.failed_count();
            }
            Err(err) => {
                status::failed(dir, &err.to_string());
                failed += 1;
            }
        }
    }

    for file in &cli.files {
        if !cli.no_content {
            if let Ok(path) = migrator.resolve(file) {
                if path.is_file() {
                    preview_file(&path, preview::DEFAULT_PREVIEW_LINES);
                }
            }
        }

        match migrator.copy_file(file) {
            Ok(dest) => {
                status::copied(file, &dest);
                succeeded += 1;
            }
            Err(err) => {
                status::failed(file, &err.to_string());
                failed += 1;
            }
        }
    }

    (succeeded, failed)
}

/// Print a preview, reporting (but swallowing) read failures
fn preview_file(path: &Path, max_lines: usize) {
    match preview::render_preview(path, max_lines) {
        Ok(text) => print!("{text}"),
        Err(err) => status::failed(path, &format!("preview failed: {err}")),
    }
}

/// `--ext py` and `--ext .py` are both accepted
fn normalize_ext(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_files_and_overrides() {
        let cli = Cli::try_parse_from([
            "porter",
            "a.py",
            "b.py",
            "--no-content",
            "-s",
            "/src",
            "-t",
            "stage",
        ])
        .unwrap();

        assert_eq!(cli.files, vec![PathBuf::from("a.py"), PathBuf::from("b.py")]);
        assert!(cli.no_content);
        assert_eq!(cli.source.as_deref(), Some(Path::new("/src")));
        assert_eq!(cli.staging.as_deref(), Some(Path::new("stage")));
    }

    #[test]
    fn test_parse_dir_with_extensions() {
        let cli = Cli::try_parse_from(["porter", "--dir", "src", "--ext", ".py", ".js"]).unwrap();

        assert_eq!(cli.dir.as_deref(), Some(Path::new("src")));
        assert_eq!(cli.ext, vec![".py", ".js"]);
    }

    #[test]
    fn test_parse_temp_long_flag() {
        let cli = Cli::try_parse_from(["porter", "a.py", "--temp", "elsewhere"]).unwrap();
        assert_eq!(cli.staging.as_deref(), Some(Path::new("elsewhere")));
    }

    #[test]
    fn test_normalize_ext_accepts_both_spellings() {
        assert_eq!(normalize_ext("py"), ".py");
        assert_eq!(normalize_ext(".py"), ".py");
    }

    fn cli_for(source: PathBuf, staging: PathBuf, files: Vec<PathBuf>) -> Cli {
        Cli {
            files,
            dir: None,
            source: Some(source),
            staging: Some(staging),
            no_content: true,
            ext: vec![],
            verbose: false,
        }
    }

    #[test]
    fn test_missing_source_root_exits_one_and_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let staging = tmp.path().join("stage");
        let cli = cli_for(
            tmp.path().join("gone"),
            staging.clone(),
            vec![PathBuf::from("a.py")],
        );

        let code = run(cli).unwrap();

        assert_eq!(code, 1);
        assert!(!staging.exists(), "staging must not be created");
    }

    #[test]
    fn test_per_file_failures_still_exit_zero() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("proj");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("a.py"), "a").unwrap();

        let staging = tmp.path().join("stage");
        let cli = cli_for(
            source,
            staging.clone(),
            vec![PathBuf::from("a.py"), PathBuf::from("missing.py")],
        );

        let code = run(cli).unwrap();

        assert_eq!(code, 0);
        assert!(staging.join("proj/a.py").is_file());
        assert!(!staging.join("proj/missing.py").exists());
    }

    #[test]
    fn test_explicit_files_count_successes_and_failures() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("proj");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("a.py"), "a").unwrap();
        fs::write(source.join("b.py"), "b").unwrap();

        let staging = tmp.path().join("stage");
        let cli = cli_for(
            source.clone(),
            staging.clone(),
            vec![
                PathBuf::from("a.py"),
                PathBuf::from("b.py"),
                PathBuf::from("missing.py"),
            ],
        );
        let migrator = Migrator::new(&source, &staging);

        let (succeeded, failed) = migrate(&cli, &migrator, &PorterConfig::default());

        assert_eq!(succeeded, 2);
        assert_eq!(failed, 1);
        assert!(staging.join("proj/a.py").is_file());
        assert!(!staging.join("proj/missing.py").exists());
    }

    #[test]
    fn test_run_copies_through_staging_root() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("proj");
        fs::create_dir_all(source.join("src")).unwrap();
        fs::write(source.join("src/lib.rs"), "pub fn f() {}\n").unwrap();

        let staging = tmp.path().join("stage");
        let cli = cli_for(
            source,
            staging.clone(),
            vec![PathBuf::from("src/lib.rs")],
        );

        let code = run(cli).unwrap();

        assert_eq!(code, 0);
        assert_eq!(
            fs::read(staging.join("proj/src/lib.rs")).unwrap(),
            b"pub fn f() {}\n"
        );
    }

    #[test]
    fn test_directory_failure_counts_once() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("proj");
        fs::create_dir_all(&source).unwrap();

        let staging = tmp.path().join("stage");
        let mut cli = cli_for(source.clone(), staging.clone(), vec![]);
        cli.dir = Some(PathBuf::from("nope"));
        let migrator = Migrator::new(&source, &staging);

        let (succeeded, failed) = migrate(&cli, &migrator, &PorterConfig::default());

        assert_eq!(succeeded, 0);
        assert_eq!(failed, 1);
    }
}
