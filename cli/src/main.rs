//! critiq CLI - artwork critique rendering tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use critiq::app::{AppState, Event, View};
use critiq::fetch::{encode_image, FeedbackClient, FetchConfig};
use critiq::{
    parse, render_blocks, to_json, Critiq, ExportOptions, Feedback, JsonFormat, PageGeometry,
};

#[derive(Parser)]
#[command(name = "critiq")]
#[command(version)]
#[command(about = "Render artwork critique feedback to screen blocks and PDF", long_about = None)]
struct Cli {
    /// Input feedback text file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render feedback text to a paginated PDF
    Pdf {
        /// Input feedback text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to the input name with .pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Artwork image to embed on the first page
        #[arg(long, value_name = "IMAGE")]
        image: Option<PathBuf>,

        /// Document title
        #[arg(long, default_value = "Artwork Critique")]
        title: String,

        /// Page size
        #[arg(long, value_enum, default_value = "a4")]
        paper: Paper,
    },

    /// Render feedback text to screen blocks as JSON
    Blocks {
        /// Input feedback text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show feedback structure information
    Info {
        /// Input feedback text file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Request a critique for an artwork image and export it
    ///
    /// Requires CRITIQ_API_KEY in the environment.
    Critique {
        /// Artwork image file (JPEG, PNG, or WebP)
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Output PDF file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also save the raw feedback text
        #[arg(long, value_name = "FILE")]
        text_out: Option<PathBuf>,

        /// Document title
        #[arg(long, default_value = "Artwork Critique")]
        title: String,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Paper {
    /// ISO A4 (210 x 297 mm)
    A4,
    /// US Letter (8.5 x 11 in)
    Letter,
}

impl From<Paper> for PageGeometry {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::A4 => PageGeometry::a4(),
            Paper::Letter => PageGeometry::letter(),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Pdf {
            input,
            output,
            image,
            title,
            paper,
        }) => cmd_pdf(&input, output.as_deref(), image.as_deref(), &title, paper),
        Some(Commands::Blocks {
            input,
            output,
            compact,
        }) => cmd_blocks(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Critique {
            image,
            output,
            text_out,
            title,
        }) => cmd_critique(&image, output.as_deref(), text_out.as_deref(), &title),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_pdf(
                    &input,
                    cli.output.as_deref(),
                    None,
                    "Artwork Critique",
                    Paper::A4,
                )
            } else {
                println!("{}", "Usage: critiq <FILE> [OUTPUT]".yellow());
                println!("       critiq --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_pdf(
    input: &Path,
    output: Option<&Path>,
    image: Option<&Path>,
    title: &str,
    paper: Paper,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;

    let mut builder = Critiq::new()
        .with_title(title)
        .with_geometry(paper.into());
    if let Some(image) = image {
        builder = builder.with_artwork(fs::read(image)?);
    }

    let pdf = builder.feedback(text).to_pdf()?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("pdf"));
    fs::write(&output, pdf)?;

    println!(
        "{} {}",
        "Wrote".green().bold(),
        output.display().to_string().cyan()
    );
    Ok(())
}

fn cmd_blocks(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let blocks = render_blocks(&Feedback::success(text));
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&blocks, format)?;

    match output {
        Some(path) => {
            fs::write(path, json)?;
            println!(
                "{} {}",
                "Wrote".green().bold(),
                path.display().to_string().cyan()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let sections = parse(&text);

    if sections.is_empty() {
        println!("{}", "No sections found.".yellow());
        return Ok(());
    }

    println!("{}", "Feedback structure".bold());
    for section in &sections {
        println!(
            "  {} ({} line{})",
            section.title.cyan(),
            section.line_count(),
            if section.line_count() == 1 { "" } else { "s" }
        );
        for sub in &section.subsections {
            println!("    {} ({} items)", sub.title, sub.lines.len());
        }
    }
    println!(
        "{} section(s), {} line(s) total",
        sections.len(),
        sections.iter().map(|s| s.line_count()).sum::<usize>()
    );
    Ok(())
}

fn cmd_critique(
    image: &Path,
    output: Option<&Path>,
    text_out: Option<&Path>,
    title: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(image)?;

    let mut state = AppState::new();
    state.apply(Event::ImageSelected(bytes.clone()));
    if state.apply(Event::AnalyzeRequested) != View::Analyzing {
        return Err("no artwork staged for analysis".into());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message("Requesting critique...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));

    let config = FetchConfig::from_env()?;
    let client = FeedbackClient::new(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let feedback = runtime.block_on(client.fetch(&encode_image(&bytes)));

    spinner.finish_and_clear();
    state.apply(Event::FeedbackResolved(feedback.clone()));

    match &feedback {
        Feedback::Success(text) => {
            println!("{}", "Critique received.".green().bold());
            if let Some(path) = text_out {
                fs::write(path, text)?;
                println!(
                    "{} {}",
                    "Wrote".green().bold(),
                    path.display().to_string().cyan()
                );
            }
        }
        Feedback::Failure(message) => {
            // The failure still renders: the exported document carries the
            // message in the placeholder slot, like the screen view would.
            eprintln!("{}: {}", "Critique failed".yellow().bold(), message);
        }
    }

    let ticket = state
        .export_lock()
        .try_begin()
        .expect("no concurrent export in the CLI");

    let options = ExportOptions::new()
        .with_title(title)
        .with_artwork(bytes);
    let pdf = critiq::export_pdf(&feedback, &options)?;
    drop(ticket);

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| image.with_extension("pdf"));
    fs::write(&output, pdf)?;

    println!(
        "{} {}",
        "Wrote".green().bold(),
        output.display().to_string().cyan()
    );
    Ok(())
}

fn cmd_version() {
    println!("critiq {}", env!("CARGO_PKG_VERSION"));
}
