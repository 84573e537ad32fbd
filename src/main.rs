//! CLI entry point for heft

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use heft::{
    OutputConfig, ScanConfig, ScanSummary, TreeBuilder, TreeFormatter, print_json, print_summary,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

/// Diagnostics verbosity on stderr
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "heft")]
#[command(about = "Show how big a directory is and what it contains")]
#[command(version)]
struct Args {
    /// Directory to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Print the directory tree with per-directory totals
    #[arg(short, long)]
    tree: bool,

    /// Include files in the tree (implies --tree)
    #[arg(short, long)]
    files: bool,

    /// Display only N levels of the tree (totals still cover everything)
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Skip entries whose name matches the glob (can be used multiple times)
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Diagnostics written to stderr
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

fn setup_tracing(level: LogLevel) {
    if let Some(level) = level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .init();
    }
}

fn main() {
    let args = Args::parse();
    setup_tracing(args.log_level);

    let scan_config = ScanConfig {
        exclude_patterns: args.exclude.clone(),
        ..Default::default()
    };

    let started = Instant::now();
    let tree = match TreeBuilder::new(scan_config).build(&args.path) {
        Ok(Some(tree)) => tree,
        Ok(None) => {
            eprintln!("heft: cannot access '{}'", args.path.display());
            process::exit(1);
        }
        Err(e) => {
            eprintln!("heft: {}", e);
            process::exit(1);
        }
    };
    let summary = ScanSummary::new(&tree, started.elapsed());

    let show_tree = args.tree || args.files;
    let output_config = OutputConfig {
        use_color: should_use_color(args.color),
        max_depth: args.level,
        show_files: args.files,
    };

    let result = if args.json {
        print_json(&summary, show_tree.then_some(&tree), &output_config)
    } else {
        print_summary(&summary, output_config.use_color).and_then(|()| {
            if show_tree {
                println!();
                TreeFormatter::new(output_config).print(&tree)
            } else {
                Ok(())
            }
        })
    };

    if let Err(e) = result {
        eprintln!("heft: output error: {}", e);
        process::exit(1);
    }
}
