//! thesisdoc CLI - render thesis JSON to HTML

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use thesisdoc::{
    audit_citations, Credit, ImagePolicy, JsonFormat, Loader, RenderOptions, Rendered,
    ThesisDocument,
};

#[derive(Parser)]
#[command(name = "thesisdoc")]
#[command(version)]
#[command(about = "Render thesis JSON documents to styled HTML", long_about = None)]
struct Cli {
    /// Thesis JSON path or URL
    #[arg(value_name = "SOURCE")]
    source: Option<String>,

    /// Output HTML file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct RenderArgs {
    /// How image items resolve to a source
    #[arg(long, value_enum, default_value = "sequential")]
    images: ImageMode,

    /// Host for placeholder images
    #[arg(long, value_name = "HOST")]
    placeholder_host: Option<String>,

    /// Escape document text instead of treating it as markup
    #[arg(long)]
    escape: bool,

    /// Emit only the container element
    #[arg(long)]
    fragment: bool,

    /// External stylesheet href
    #[arg(long, value_name = "HREF", env = "THESISDOC_STYLESHEET")]
    stylesheet: Option<String>,

    /// Directory to check local image files against
    #[arg(long, value_name = "DIR")]
    asset_root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a thesis document to HTML
    Render {
        /// Thesis JSON path or URL
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show document information
    Info {
        /// Thesis JSON path or URL
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Print the information as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check citation markers against the bibliography
    Check {
        /// Thesis JSON path or URL
        #[arg(value_name = "SOURCE")]
        source: String,
    },

    /// Dump the normalized document as JSON
    Json {
        /// Thesis JSON path or URL
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ImageMode {
    /// Numbered files (1.jpg, 2.jpg, ...) in document order
    Sequential,
    /// The file named by each image item
    File,
    /// Placeholder service image built from each item's query
    Placeholder,
}

impl ImageMode {
    fn policy(self, placeholder_host: Option<&str>) -> ImagePolicy {
        match self {
            ImageMode::Sequential => ImagePolicy::Sequential,
            ImageMode::File => ImagePolicy::ExplicitFile,
            ImageMode::Placeholder => match placeholder_host {
                Some(host) => ImagePolicy::Placeholder {
                    host: host.to_string(),
                },
                None => ImagePolicy::placeholder(),
            },
        }
    }
}

impl RenderArgs {
    fn to_options(&self) -> Result<RenderOptions, Box<dyn std::error::Error>> {
        let policy = self.images.policy(self.placeholder_host.as_deref());

        let mut options = RenderOptions::new()
            .with_image_policy(policy)
            .with_escape(self.escape)
            .with_fragment(self.fragment);

        if let Some(ref href) = self.stylesheet {
            options = if href.is_empty() {
                options.without_stylesheet()
            } else {
                options.with_stylesheet(href.clone())
            };
        }
        if let Some(ref dir) = self.asset_root {
            options = options.with_asset_root(dir.clone());
        }

        options.validate()?;
        Ok(options)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            source,
            output,
            render,
        }) => cmd_render(&source, output.as_deref(), &render),
        Some(Commands::Info { source, json }) => cmd_info(&source, json),
        Some(Commands::Check { source }) => cmd_check(&source),
        Some(Commands::Json {
            source,
            output,
            compact,
        }) => cmd_json(&source, output.as_deref(), compact),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(source) = cli.source {
                cmd_render(&source, cli.output.as_deref(), &cli.render)
            } else {
                println!("{}", "Usage: thesisdoc <SOURCE> [OUTPUT]".yellow());
                println!("       thesisdoc --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_output(output: Option<&Path>, content: &str) -> std::io::Result<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_render(
    source: &str,
    output: Option<&Path>,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.to_options()?;
    let loader = Loader::with_defaults();

    match thesisdoc::render::render_location(&loader, source, &options)? {
        Rendered::Document(result) => {
            write_output(output, &result.content)?;

            let stats = &result.stats;
            if stats.missing_image_count > 0 {
                eprintln!(
                    "{} {} image file(s) not found",
                    "Warning:".yellow().bold(),
                    stats.missing_image_count
                );
            }
            if stats.skipped_count > 0 {
                eprintln!(
                    "{} {} unknown block(s) skipped",
                    "Note:".dimmed(),
                    stats.skipped_count
                );
            }
            Ok(())
        }
        Rendered::Failed { content, error } => {
            // The error page is still the page's content.
            write_output(output, &content)?;
            Err(error.into())
        }
    }
}

fn credit_labels(credits: &[Credit]) -> String {
    credits
        .iter()
        .map(|c| c.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn cmd_info(source: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = thesisdoc::load(source)?;

    if json {
        let info = serde_json::json!({
            "source": source,
            "title": doc.meta.title,
            "date": doc.meta.date,
            "authors": doc.meta.authors,
            "fields": doc.meta.fields,
            "sections": doc.section_count(),
            "images": doc.image_count(),
            "bibliography_entries": doc.bibliography_ids().len(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Source".bold(), source);
    println!("{}: {}", "Title".bold(), doc.meta.title);
    if !doc.meta.authors.is_empty() {
        println!("{}: {}", "Authors".bold(), credit_labels(&doc.meta.authors));
    }
    if !doc.meta.fields.is_empty() {
        println!("{}: {}", "Fields".bold(), credit_labels(&doc.meta.fields));
    }
    if !doc.meta.date.is_empty() {
        println!("{}: {}", "Date".bold(), doc.meta.date);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    print_counts(&doc);

    Ok(())
}

fn print_counts(doc: &ThesisDocument) {
    let paragraphs = doc
        .items()
        .filter(|item| matches!(item, thesisdoc::ContentItem::Paragraph { .. }))
        .count();

    println!("{}: {}", "Sections".bold(), doc.section_count());
    println!("{}: {}", "Paragraphs".bold(), paragraphs);
    println!("{}: {}", "Images".bold(), doc.image_count());
    println!(
        "{}: {}",
        "References".bold(),
        doc.bibliography_ids().len()
    );
    println!(
        "{}: {}",
        "Theme".bold(),
        if doc.theme().is_some() { "Yes" } else { "No" }
    );
}

fn cmd_check(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let doc = thesisdoc::load(source)?;
    let report = audit_citations(&doc);

    println!(
        "{} {} citation marker(s)",
        "Checked".cyan(),
        report.marker_count
    );

    for id in &report.unresolved {
        println!("  {} [{}] has no bibliography entry", "✗".red(), id);
    }
    for id in &report.duplicates {
        println!("  {} reference {} is listed more than once", "✗".red(), id);
    }
    for id in &report.unused {
        println!("  {} reference {} is never cited", "•".yellow(), id);
    }

    if report.is_clean() {
        println!("{}", "All citations resolve".green().bold());
        Ok(())
    } else {
        Err(format!(
            "{} unresolved, {} duplicate",
            report.unresolved.len(),
            report.duplicates.len()
        )
        .into())
    }
}

fn cmd_json(
    source: &str,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = thesisdoc::load(source)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = thesisdoc::render::to_json(&doc, format)?;
    write_output(output, &json)?;

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "thesisdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Thesis JSON to HTML renderer");
}
