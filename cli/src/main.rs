//! ipcdoc CLI - Indian Penal Code PDF extraction tool

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use ipcdoc::convert::ConversionStatus;
use ipcdoc::render::DICT_INDENT;
use ipcdoc::{
    extract_sections, extract_with_options, ExportFormat, ExtractOptions, ItemLabel, JsonFormat,
    PageSelection, ParseOptions, PdfParser, RenderOptions, DEFAULT_INPUT,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "ipcdoc")]
#[command(version)]
#[command(about = "Extract the Indian Penal Code PDF to JSON, Markdown and text", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    json: JsonStyle,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the document mapping as indented JSON (default)
    Dict {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        json: JsonStyle,
    },

    /// Write the full conversion result as JSON
    Json {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        json: JsonStyle,
    },

    /// Write the document as Markdown
    #[command(alias = "md")]
    Markdown {
        #[command(flatten)]
        common: CommonArgs,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Keep running headers and page numbers
        #[arg(long)]
        furniture: bool,
    },

    /// Write the document body as plain text
    Text {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Write one JSON record per numbered section
    Sections {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        json: JsonStyle,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE", env = "IPCDOC_INPUT")]
        input: Option<PathBuf>,

        /// Print the resolved input path and whether it exists
        #[arg(long)]
        show_path: bool,
    },
}

#[derive(Args, Clone)]
struct CommonArgs {
    /// Input PDF file [default: ipc.pdf]
    #[arg(value_name = "FILE", env = "IPCDOC_INPUT")]
    input: Option<PathBuf>,

    /// Output file (default depends on the format)
    #[arg(short, long, value_name = "FILE", env = "IPCDOC_OUTPUT")]
    output: Option<PathBuf>,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Record unreadable pages instead of failing
    #[arg(long)]
    lenient: bool,

    /// Document password
    #[arg(long, env = "IPCDOC_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Print the resolved input path and whether it exists
    #[arg(long)]
    show_path: bool,
}

#[derive(Args, Clone, Copy)]
struct JsonStyle {
    /// Output single-line JSON
    #[arg(long, conflicts_with = "pretty")]
    compact: bool,

    /// Output indented JSON
    #[arg(long)]
    pretty: bool,
}

impl JsonStyle {
    fn format(self) -> Option<JsonFormat> {
        if self.compact {
            Some(JsonFormat::Compact)
        } else if self.pretty {
            Some(JsonFormat::Indented(DICT_INDENT))
        } else {
            None
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let quiet = cli.quiet;

    let result = match cli.command {
        Some(Commands::Dict { common, json }) => cmd_extract(
            &common,
            ExportFormat::Dict,
            RenderOptions::new(),
            json.format(),
            quiet,
        ),
        Some(Commands::Json { common, json }) => cmd_extract(
            &common,
            ExportFormat::Json,
            RenderOptions::new(),
            json.format(),
            quiet,
        ),
        Some(Commands::Markdown {
            common,
            frontmatter,
            furniture,
        }) => cmd_extract(
            &common,
            ExportFormat::Markdown,
            RenderOptions::new()
                .with_frontmatter(frontmatter)
                .with_furniture(furniture),
            None,
            quiet,
        ),
        Some(Commands::Text { common }) => cmd_extract(
            &common,
            ExportFormat::Text,
            RenderOptions::new(),
            None,
            quiet,
        ),
        Some(Commands::Sections { common, json }) => cmd_extract(
            &common,
            ExportFormat::Sections,
            RenderOptions::new(),
            json.format(),
            quiet,
        ),
        Some(Commands::Info { input, show_path }) => cmd_info(input.as_deref(), show_path),
        None => cmd_extract(
            &cli.common,
            ExportFormat::Dict,
            RenderOptions::new(),
            cli.json.format(),
            quiet,
        ),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn cmd_extract(
    args: &CommonArgs,
    format: ExportFormat,
    render_options: RenderOptions,
    json: Option<JsonFormat>,
    quiet: bool,
) -> CliResult {
    let input = resolve_input(args.input.as_deref(), args.show_path)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format.default_output()));
    log::debug!("{} -> {} ({})", input.display(), output.display(), format);

    let pages = parse_pages(args.pages.as_deref())?;
    let mut parse_options = ParseOptions::new().with_pages(pages.clone());
    if args.lenient {
        parse_options = parse_options.lenient();
    }
    if let Some(ref password) = args.password {
        parse_options = parse_options.with_password(password.clone());
    }

    let mut options = ExtractOptions::new()
        .with_parse_options(parse_options)
        .with_render_options(render_options.with_pages(pages));
    if let Some(json) = json {
        options = options.with_json_format(json);
    }

    let spinner = spinner(quiet, format!("Converting {}...", input.display()));
    let result = extract_with_options(&input, &output, format, &options);
    spinner.finish_and_clear();
    let report = result?;

    if quiet {
        return Ok(());
    }

    if report.status == ConversionStatus::PartialSuccess {
        eprintln!(
            "{}: some pages could not be read (see the errors in the JSON export)",
            "Warning".yellow().bold()
        );
    }
    println!(
        "✅ Extracted data saved to {}",
        report.output.display().to_string().green()
    );
    if let Some(count) = report.section_count {
        println!("   {} sections, {} pages", count, report.page_count);
    }

    Ok(())
}

fn cmd_info(input: Option<&Path>, show_path: bool) -> CliResult {
    let input = resolve_input(input, show_path)?;

    // Lenient so metadata still shows when some pages fail
    let parser = PdfParser::open_with_options(&input, ParseOptions::new().lenient())?;
    let report = parser.parse_with_report()?;
    let doc = &report.document;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), doc.metadata.pdf_version);
    println!("{}: {}", "Pages".bold(), doc.metadata.page_count);
    println!("{}: {} bytes", "Size".bold(), parser.byte_len());
    println!("{}: {}", "SHA-256".bold(), doc.origin.binary_hash);
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if doc.metadata.encrypted { "Yes" } else { "No" }
    );

    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = doc.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref producer) = doc.metadata.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }
    if let Some(ref created) = doc.metadata.created {
        println!("{}: {}", "Created".bold(), created.to_rfc3339());
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for label in [
        ItemLabel::Title,
        ItemLabel::ChapterHeader,
        ItemLabel::Heading,
        ItemLabel::SectionHeader,
        ItemLabel::Text,
        ItemLabel::ListItem,
        ItemLabel::PageHeader,
        ItemLabel::PageFooter,
    ] {
        println!("{}: {}", label.as_str().bold(), doc.count_label(label));
    }
    println!("{}: {}", "sections".bold(), extract_sections(doc).len());

    if !report.errors.is_empty() {
        println!();
        println!("{}", "Unreadable Pages".yellow().bold());
        for error in &report.errors {
            println!("  {} {}: {}", "-".dimmed(), error.page_no, error.message);
        }
    }

    Ok(())
}

fn resolve_input(input: Option<&Path>, show_path: bool) -> Result<PathBuf, std::io::Error> {
    let input = input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));

    if show_path {
        let absolute = if input.is_absolute() {
            input.clone()
        } else {
            std::env::current_dir()?.join(&input)
        };
        println!("{}: {}", "Input".bold(), absolute.display());
        println!("{}: {}", "Exists".bold(), absolute.exists());
    }

    Ok(input)
}

fn parse_pages(pages: Option<&str>) -> Result<PageSelection, ipcdoc::Error> {
    match pages {
        Some(p) => PageSelection::parse(p),
        None => Ok(PageSelection::All),
    }
}

fn spinner(quiet: bool, message: String) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
