use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redshape::assets::AssetLoader;
use redshape::console::{self, Outcome};
use redshape::document::DocumentBridge;
use redshape::models::{AppConfig, ConfigOverrides};
use redshape::plan::{self, EditPlan};
use redshape::report;
use redshape::session::EditSession;

#[derive(Parser)]
#[command(name = "redshape")]
#[command(about = "Recolor marked regions of images embedded in Word documents")]
struct Cli {
    /// Config file (YAML); the embedded default is used when absent
    #[arg(long, global = true, env = "REDSHAPE_CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    colors: ColorArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ColorArgs {
    /// Target color (#RRGGBB, #RGB or R,G,B); repeat for several, replaces the configured list
    #[arg(long = "target", global = true)]
    targets: Vec<String>,

    /// Replacement color
    #[arg(long, global = true)]
    replacement: Option<String>,

    /// Hue tolerance (0-179)
    #[arg(long, global = true)]
    tolerance: Option<u8>,

    /// Minimum saturation (0-255)
    #[arg(long, global = true)]
    saturation: Option<u8>,

    /// Minimum value/brightness (0-255)
    #[arg(long, global = true)]
    value: Option<u8>,

    /// Do not recompute the preview after every edit
    #[arg(long, global = true)]
    no_auto_preview: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit a document interactively
    Edit {
        /// Word document to process
        docx: PathBuf,
    },
    /// Process a document with a YAML edit plan
    Apply {
        docx: PathBuf,

        /// Plan file mapping document positions to regions
        #[arg(short, long)]
        plan: PathBuf,
    },
    /// List the images of a document and their target pixel counts
    Scan {
        docx: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the embedded default config to disk
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

impl ColorArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            target_colors: self.targets.clone(),
            replacement_color: self.replacement.clone(),
            color_tolerance: self.tolerance,
            saturation_threshold: self.saturation,
            value_threshold: self.value,
            auto_preview: self.no_auto_preview.then_some(false),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redshape=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    let loader = AssetLoader::new(cli.config.clone());

    match cli.command {
        Some(Commands::Edit { ref docx }) => run_edit_command(&loader, &cli.colors, docx),
        Some(Commands::Apply { ref docx, ref plan }) => {
            run_apply_command(&loader, &cli.colors, docx, plan)
        }
        Some(Commands::Scan { ref docx, json }) => {
            run_scan_command(&loader, &cli.colors, docx, json)
        }
        Some(Commands::Init { force }) => run_init_command(&loader, force),
        None => {
            run_status_command(&loader, &cli.colors);
            Ok(())
        }
    }
}

fn load_config(loader: &AssetLoader, colors: &ColorArgs) -> AppConfig {
    let mut config = AppConfig::load_from_assets(loader);
    config.apply_overrides(&colors.overrides());
    config
}

/// Interactive console session
fn run_edit_command(loader: &AssetLoader, colors: &ColorArgs, docx: &Path) -> anyhow::Result<()> {
    let config = load_config(loader, colors);
    let mut session = EditSession::open(docx, config)
        .with_context(|| format!("Cannot start editing {}", docx.display()))?;

    if io::stdin().is_terminal() {
        println!("Type 'help' for a list of commands.");
    }
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match console::run(&mut session, stdin.lock(), &mut stdout)? {
        Outcome::Finished(_) => {}
        Outcome::Quit => tracing::info!("Quit without saving"),
        Outcome::EndOfInput => tracing::warn!("Input ended before the document was finished"),
    }
    Ok(())
}

/// Apply a plan file without interaction
fn run_apply_command(
    loader: &AssetLoader,
    colors: &ColorArgs,
    docx: &Path,
    plan_path: &Path,
) -> anyhow::Result<()> {
    let config = load_config(loader, colors);
    let edit_plan = EditPlan::load(plan_path)?;
    let mut session = EditSession::open(docx, config)
        .with_context(|| format!("Cannot open {}", docx.display()))?;

    let report = plan::run_plan(&mut session, &edit_plan)?;
    println!("{report}");
    Ok(())
}

/// Relevance scan, nothing is written
fn run_scan_command(
    loader: &AssetLoader,
    colors: &ColorArgs,
    docx: &Path,
    json: bool,
) -> anyhow::Result<()> {
    let config = load_config(loader, colors);
    let recolorer = config.recolorer().context("Invalid color in config")?;
    let bridge = DocumentBridge::open_docx(docx)?;

    let scan = report::scan(&bridge, &recolorer);
    if json {
        println!("{}", serde_json::to_string_pretty(&scan)?);
    } else {
        print!("{scan}");
    }
    Ok(())
}

fn run_init_command(loader: &AssetLoader, force: bool) -> anyhow::Result<()> {
    let report = loader.init(force)?;

    for f in &report.written {
        println!("Wrote {f}");
    }
    for f in &report.skipped {
        println!("Skipped existing {f} (use --force to overwrite)");
    }
    Ok(())
}

/// Display version and effective configuration
fn run_status_command(loader: &AssetLoader, colors: &ColorArgs) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Redshape v{VERSION}");
    println!("Recolor marked regions of images embedded in Word documents\n");

    let source = match loader.config_file() {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("Config:        {source}");

    let config = load_config(loader, colors);
    println!("Targets:       {}", config.target_colors.join(", "));
    println!("Replacement:   {}", config.replacement_color);
    println!(
        "Thresholds:    tolerance {}, saturation {}, value {}",
        config.color_tolerance, config.saturation_threshold, config.value_threshold
    );
    if let Err(e) = config.recolorer() {
        println!("               (invalid color: {e})");
    }

    println!("\nCommands:");
    println!("  redshape edit <DOCX>               Edit a document interactively");
    println!("  redshape apply <DOCX> --plan FILE  Process a document with an edit plan");
    println!("  redshape scan <DOCX>               List images containing target colors");
    println!("  redshape init                      Write the default config");
    println!("\nRun 'redshape --help' for more details.");
}
