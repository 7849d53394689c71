// festival-pdf: Generate dish cards, menu and signs for a community food festival

use std::path::PathBuf;

use clap::Parser;
use festival_pdf::{
    generate_all, load_dishes, AppError, Assets, DocumentKind, FestivalContext, SanitizeMode,
    Sanitizer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Data Structures
// ============================================================================

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate dish cards, menu and signs for a food festival")]
struct Args {
    /// Form export with one row per dish (CSV)
    #[arg(default_value = "hf25_responses3.csv")]
    input: PathBuf,

    /// Directory the PDFs are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Logo image, skipped if the file does not exist
    #[arg(long, default_value = "heritage_fest.png")]
    logo: PathBuf,

    /// QR code image for the signs, skipped if the file does not exist
    #[arg(long, default_value = "menu_qr.png")]
    qr: PathBuf,

    /// Generate the sign QR code from this URL when the QR image is missing
    #[arg(long)]
    menu_url: Option<String>,

    /// Only generate these documents (repeatable, defaults to all)
    #[arg(long, value_enum)]
    only: Vec<DocumentKind>,

    /// Replace dietary symbols with text labels instead of removing them
    #[arg(long)]
    dietary_labels: bool,

    /// Log debug details
    #[arg(short, long)]
    verbose: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "festival_pdf=debug" } else { "festival_pdf=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let dishes = load_dishes(&args.input)?;
    let assets = Assets::load(&args.logo, &args.qr, args.menu_url.as_deref())?;

    let mode = if args.dietary_labels {
        SanitizeMode::Label
    } else {
        SanitizeMode::Delete
    };
    let ctx = FestivalContext::new(dishes, assets, args.output_dir)
        .with_sanitizer(Sanitizer::new(mode));

    let kinds = if args.only.is_empty() {
        DocumentKind::ALL.to_vec()
    } else {
        args.only
    };

    info!(dishes = ctx.dishes.len(), logo = ctx.assets.logo.is_some(), qr = ctx.assets.qr.is_some(), "starting");
    let written = generate_all(&ctx, &kinds)?;

    println!("✓ Generated {} file(s) in {}", written.len(), ctx.output_dir.display());
    for path in &written {
        println!("  {}", path.display());
    }

    Ok(())
}
