//! pdfexcerpt CLI - reading-order excerpts with linked footnotes

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfexcerpt::annotate::annotate_markers_with_progress;
use pdfexcerpt::parser::{
    DEFAULT_FOOTER_RATIO, DEFAULT_ISOLATED_NUMBER_MAX_WIDTH, DEFAULT_LINE_THRESHOLD,
};
use pdfexcerpt::{
    detect_input, render, AnnotateOptions, AnnotationReport, FileLoader, JsonFormat, MapsData,
    PageSelection, ReconstructOptions, Reconstruction,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pdfexcerpt")]
#[command(version)]
#[command(about = "Reconstruct PDF text with linked footnotes as HTML", long_about = None)]
struct Cli {
    #[command(flatten)]
    tuning: Tuning,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Reconstruction settings shared by all commands.
#[derive(Args)]
struct Tuning {
    /// Fraction of the page height, from the bottom, read as footer
    #[arg(
        long,
        global = true,
        env = "PDFEXCERPT_FOOTER_RATIO",
        default_value_t = DEFAULT_FOOTER_RATIO
    )]
    footer_ratio: f32,

    /// Maximum vertical gap between lines of one paragraph
    #[arg(
        long,
        global = true,
        env = "PDFEXCERPT_LINE_THRESHOLD",
        default_value_t = DEFAULT_LINE_THRESHOLD
    )]
    line_threshold: f32,

    /// Width below which a lone 1-2 digit run is a stranded reference
    #[arg(
        long,
        global = true,
        env = "PDFEXCERPT_NUMBER_WIDTH",
        default_value_t = DEFAULT_ISOLATED_NUMBER_MAX_WIDTH
    )]
    number_width: f32,

    /// Skip unreadable pages instead of failing
    #[arg(long, global = true, env = "PDFEXCERPT_LENIENT")]
    lenient: bool,
}

impl Tuning {
    fn options(&self, pages: Option<&str>) -> Result<ReconstructOptions, pdfexcerpt::Error> {
        let mut options = ReconstructOptions::new()
            .with_footer_ratio(self.footer_ratio)
            .with_line_threshold(self.line_threshold)
            .with_isolated_number_width(self.number_width);
        if self.lenient {
            options = options.lenient();
        }
        if let Some(p) = pages {
            options = options.with_pages(PageSelection::parse(p)?);
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct a document and print it as HTML
    Excerpt {
        /// Input PDF or runs JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit the reconstruction as JSON instead of HTML
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// List reconstructed footnotes
    Footnotes {
        /// Input PDF or runs JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Annotate the markers of a region data file with document excerpts
    Annotate {
        /// Region data JSON file
        #[arg(value_name = "DATA")]
        data: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Directory document locations are resolved against
        /// (defaults to the data file's directory)
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,

        /// Prefix removed from document locations before resolving
        #[arg(long, value_name = "PREFIX")]
        strip_prefix: Option<String>,

        /// Only annotate the region with this id
        #[arg(long, value_name = "ID")]
        region: Option<u32>,
    },

    /// Show document information
    Info {
        /// Input PDF or runs JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let tuning = &cli.tuning;

    let result = match cli.command {
        Some(Commands::Excerpt {
            input,
            output,
            json,
            compact,
            pages,
        }) => cmd_excerpt(tuning, &input, output.as_deref(), json, compact, pages.as_deref()),
        Some(Commands::Footnotes { input, pages }) => {
            cmd_footnotes(tuning, &input, pages.as_deref())
        }
        Some(Commands::Annotate {
            data,
            output,
            base_dir,
            strip_prefix,
            region,
        }) => cmd_annotate(
            tuning,
            &data,
            output.as_deref(),
            base_dir,
            strip_prefix,
            region,
        ),
        Some(Commands::Info { input }) => cmd_info(tuning, &input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: pdfexcerpt <COMMAND> <FILE>".yellow());
            println!("       pdfexcerpt --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn reconstruct(
    tuning: &Tuning,
    input: &Path,
    pages: Option<&str>,
) -> Result<Reconstruction, pdfexcerpt::Error> {
    let options = tuning.options(pages)?;
    pdfexcerpt::reconstruct_file_with_options(input, &options)
}

fn write_output(output: Option<&Path>, content: &str) -> CliResult {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!("{} {}", "Saved to".green(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn cmd_excerpt(
    tuning: &Tuning,
    input: &Path,
    output: Option<&Path>,
    json: bool,
    compact: bool,
    pages: Option<&str>,
) -> CliResult {
    let doc = reconstruct(tuning, input, pages)?;

    let content = if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        render::to_json(&doc, format)?
    } else {
        render::render_document(&doc).to_html()
    };

    write_output(output, &content)
}

fn cmd_footnotes(tuning: &Tuning, input: &Path, pages: Option<&str>) -> CliResult {
    let doc = reconstruct(tuning, input, pages)?;

    if doc.footnotes.is_empty() {
        println!("{}", "No footnotes found".yellow());
        return Ok(());
    }

    for (number, text) in doc.footnotes.sorted() {
        println!("{} {}", format!("[{}]", number).cyan().bold(), text);
    }
    println!(
        "\n{} {} footnotes ({} split, {} dropped footer paragraphs)",
        "Done!".green().bold(),
        doc.stats.footnote_count,
        doc.stats.split_footnote_count,
        doc.stats.dropped_footer_count
    );

    Ok(())
}

fn cmd_annotate(
    tuning: &Tuning,
    data_path: &Path,
    output: Option<&Path>,
    base_dir: Option<PathBuf>,
    strip_prefix: Option<String>,
    region: Option<u32>,
) -> CliResult {
    let raw = fs::read_to_string(data_path)?;
    let mut data: MapsData = serde_json::from_str(&raw)
        .map_err(|e| format!("Invalid region data {}: {}", data_path.display(), e))?;

    if let Some(id) = region {
        if data.region(id).is_none() {
            return Err(format!("No region with id {}", id).into());
        }
    }

    let base_dir = base_dir.unwrap_or_else(|| {
        data_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });
    log::debug!("resolving document locations under {}", base_dir.display());
    let mut loader = FileLoader::new(base_dir);
    if let Some(prefix) = strip_prefix {
        loader = loader.with_strip_prefix(prefix);
    }
    let options = AnnotateOptions::new().with_reconstruct(tuning.options(None)?);

    let selected = |id: u32| region.map_or(true, |r| r == id);
    let total: usize = data
        .maps
        .iter()
        .filter(|r| selected(r.id))
        .map(|r| r.markers.len())
        .sum();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut report = AnnotationReport::new();
    for map in data.maps.iter_mut().filter(|r| selected(r.id)) {
        let region_report =
            annotate_markers_with_progress(&mut map.markers, &loader, &options, |_, _, marker| {
                pb.set_message(marker.title.clone());
                pb.inc(1);
            });
        report.merge(region_report);
    }
    pb.finish_with_message("Done!");

    let json = render::to_json(&data, JsonFormat::Pretty)?;
    write_output(output, &json)?;

    eprintln!(
        "\n{} {} annotated, {} without document, {} failed",
        "Markers:".green().bold(),
        report.annotated,
        report.skipped,
        report.failed
    );
    for failure in &report.failures {
        log::warn!(
            "marker #{} {:?} has no excerpt: {}",
            failure.index,
            failure.title,
            failure.message
        );
        eprintln!(
            "  {} {} ({})",
            "✗".red(),
            failure.title,
            failure.message.dimmed()
        );
    }

    Ok(())
}

fn cmd_info(tuning: &Tuning, input: &Path) -> CliResult {
    let bytes = fs::read(input)?;
    let kind = detect_input(&bytes, Some(input))?;

    let options = tuning.options(None)?.lenient();
    let doc = pdfexcerpt::reconstruct_bytes(&bytes, &options)?;
    let stats = &doc.stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), kind);
    println!("{}: {}", "Pages".bold(), stats.page_count);
    if stats.skipped_page_count > 0 {
        println!("{}: {}", "Unreadable pages".bold(), stats.skipped_page_count);
    }
    if let Some(heading) = doc.heading() {
        println!("{}: {}", "Heading".bold(), heading.text);
    }

    println!();
    println!("{}", "Reconstruction".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Text runs".bold(), stats.run_count);
    println!("{}: {}", "Merged reference digits".bold(), stats.merged_number_count);
    println!("{}: {}", "Body paragraphs".bold(), stats.main_paragraph_count);
    println!("{}: {}", "Footer paragraphs".bold(), stats.footer_paragraph_count);
    println!("{}: {}", "Footnotes".bold(), stats.footnote_count);

    let linked = render::render_document(&doc).stats.linked_reference_count;
    println!("{}: {}", "Linked references".bold(), linked);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfexcerpt".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF excerpt and footnote reconstruction tool");
    println!();
    println!("License: MIT");
}
