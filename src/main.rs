use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser};
use exo_patch::commands::patch_apply::{self, ApplyOptions};
use exo_patch::patch::{CopyReport, PatchError};
use exo_patch::utils::layout::Layout;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "exo-patch")]
#[command(about = "Copy prebuilt patch files into an ExoPlayer demo project")]
#[command(version)]
struct Cli {
    /// Directory the layout's relative paths are resolved against
    #[arg(short = 'C', long, default_value = ".")]
    root: PathBuf,

    /// JSON layout file overriding the default source and destination paths
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Check every copy against its source by SHA-256
    #[arg(long)]
    verify: bool,

    /// Print the effective layout, resolved against --root, as JSON and exit
    #[arg(long)]
    print_layout: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_layout(config: Option<&Path>) -> Result<Layout, PatchError> {
    match config {
        Some(path) => Layout::load(path).map_err(|e| PatchError::LayoutError {
            reason: format!("failed to load '{}': {}", path.display(), e),
        }),
        None => Ok(Layout::default()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let layout = match load_layout(cli.config.as_deref()) {
        Ok(layout) => layout.resolve(&cli.root),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    if cli.print_layout {
        match layout.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(2);
            }
        }
        return;
    }

    let options = ApplyOptions { verify: cli.verify };
    let result = patch_apply::run(
        &layout,
        options,
        Some(|r: &CopyReport| println!("{}", patch_apply::format_confirmation(r))),
    );
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(2);
    }
}
