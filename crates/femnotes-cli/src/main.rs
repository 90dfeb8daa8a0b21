use std::{path::PathBuf, time::Duration};

use anyhow::{Result, bail};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use femnotes_core::{
    ApiClient, ApiConfig, DiskCache, MarkdownProjector, MarkdownTemplates, OutputDirectory,
    TemplateOverrides, format_course_summary, load_course,
};

#[derive(Parser)]
#[command(name = "femnotes")]
#[command(about = "Turn a Frontend Masters course into a tree of linked markdown notes")]
struct Cli {
    /// Slug of the course
    #[arg(short, long)]
    course_slug: String,

    /// Output directory of the course
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Comma-separated list of tags
    #[arg(short, long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Custom template for course or lesson notes (allowed filenames: course.tmpl and lesson.tmpl)
    #[arg(long = "custom-template")]
    custom_templates: Vec<PathBuf>,

    /// Show debug logs
    #[arg(short, long)]
    verbose: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn default_log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.tags.iter().any(|tag| tag.is_empty()) {
        bail!("tags cannot contain empty values");
    }

    // Validate templates before touching the network
    let overrides = TemplateOverrides::from_paths(&cli.custom_templates)?;
    let templates = MarkdownTemplates::load(&overrides).await?;

    println!(
        "\n{}  {}\n",
        style("femnotes").cyan().bold(),
        style("Course Notes").dim()
    );

    // Step 1: Load course (cache, then API)
    let cache = DiskCache::user();
    let client = ApiClient::new(ApiConfig::from_env());
    let spinner = create_spinner(&format!("Loading {}...", cli.course_slug));
    let course = match load_course(&cli.course_slug, &cache, &client).await {
        Ok(course) => course,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };
    spinner.finish_with_message(format!(
        "{} Loaded: {}",
        style("✓").green().bold(),
        style(&course.title).dim()
    ));
    println!("{}", format_course_summary(&course));

    // Step 2: Generate notes
    let output = OutputDirectory::new(&cli.output_dir).await?;
    let spinner = create_spinner("Generating notes...");
    let written = match MarkdownProjector::new(&course, &output, &templates, &cli.tags)
        .generate()
        .await
    {
        Ok(written) => written,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };
    spinner.finish_with_message(format!(
        "{} Generated {} notes",
        style("✓").green().bold(),
        written.len()
    ));

    println!(
        "\n{} {}\n",
        style("Saved:").dim(),
        style(output.path().display()).cyan()
    );

    Ok(())
}
