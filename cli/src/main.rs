//! borme CLI - bulletin summaries, entries and incorporation fields

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use borme::render::{self, EntryReport, JsonFormat, RenderOptions};
use borme::{
    Borme, BormeClient, ClientConfig, ExtractOptions, LopdfTextSource, PageSelection,
    PageTextSource, ReconstructOptions, SummaryNode,
};

#[derive(Parser)]
#[command(name = "borme")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Read BORME bulletins: daily summaries, entries and incorporations", long_about = None)]
struct Cli {
    /// Input PDF file or URL
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Open-data API root
    #[arg(long, env = "BORME_API_BASE", global = true)]
    api_base: Option<String>,

    /// Base URL replacing https://www.boe.es/ in PDF links
    #[arg(long, env = "BORME_PDF_BASE", global = true)]
    pdf_base: Option<String>,

    /// Request timeout in seconds (0 = none)
    #[arg(long, default_value = "60", global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the entries of a bulletin PDF
    Entries {
        /// Input PDF file or URL
        #[arg(value_name = "INPUT")]
        input: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        args: EntryArgs,
    },

    /// Show the summary of a day
    Sumario {
        /// Publication date (YYYY-MM-DD)
        #[arg(value_name = "DATE")]
        date: NaiveDate,

        /// Only list documents of this section (e.g. "A")
        #[arg(long)]
        section: Option<String>,

        /// Output the summary tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch every section PDF of a day and rebuild their entries
    Day {
        /// Publication date (YYYY-MM-DD)
        #[arg(value_name = "DATE")]
        date: NaiveDate,

        /// Section to fetch
        #[arg(long, default_value = "A")]
        section: String,

        /// Output directory (one file per PDF); stdout if not specified
        #[arg(long = "output-dir", value_name = "DIR")]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        args: EntryArgs,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args, Clone)]
struct EntryArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputKind,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Segment every page on its own
    #[arg(long)]
    per_page: bool,

    /// Skip pages whose text cannot be extracted
    #[arg(long)]
    lenient: bool,

    /// Characters of raw text shown per entry (0 = all)
    #[arg(long, default_value = "120")]
    width: usize,

    /// Print raw text under incorporation fields
    #[arg(long)]
    raw: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputKind {
    /// Labeled plain text
    Text,
    /// JSON array of entries
    Json,
}

impl EntryArgs {
    fn extract_options(&self) -> Result<ExtractOptions, Box<dyn std::error::Error>> {
        let mut options = ExtractOptions::new();
        if let Some(p) = &self.pages {
            options = options.with_pages(PageSelection::parse(p)?);
        }
        if self.lenient {
            options = options.lenient();
        }
        Ok(options)
    }

    fn reconstruct_options(&self) -> ReconstructOptions {
        if self.per_page {
            ReconstructOptions::new().per_page()
        } else {
            ReconstructOptions::new()
        }
    }

    fn render(&self, report: &EntryReport) -> Result<String, Box<dyn std::error::Error>> {
        match self.format {
            OutputKind::Json => {
                let format = if self.compact {
                    JsonFormat::Compact
                } else {
                    JsonFormat::Pretty
                };
                Ok(render::to_json(&report.entries, format)?)
            }
            OutputKind::Text => {
                let options = RenderOptions::new()
                    .with_summary_width(self.width)
                    .with_raw_text(self.raw);
                Ok(render::to_text(&report.entries, &options))
            }
        }
    }

    fn extension(&self) -> &'static str {
        match self.format {
            OutputKind::Json => "json",
            OutputKind::Text => "txt",
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = client_config(&cli);

    let result = match cli.command {
        Some(Commands::Entries {
            input,
            output,
            args,
        }) => cmd_entries(&input, output.as_deref(), &args, config),
        Some(Commands::Sumario {
            date,
            section,
            json,
        }) => cmd_sumario(date, section.as_deref(), json, config),
        Some(Commands::Day {
            date,
            section,
            output_dir,
            args,
        }) => cmd_day(date, &section, output_dir.as_deref(), &args, config),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: rebuild entries if input is provided
            if let Some(input) = cli.input {
                let args = EntryArgs {
                    format: OutputKind::Text,
                    compact: false,
                    pages: None,
                    per_page: false,
                    lenient: false,
                    width: 120,
                    raw: false,
                };
                cmd_entries(&input, None, &args, config)
            } else {
                println!("{}", "Usage: borme <FILE|URL>".yellow());
                println!("       borme --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn client_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::new().with_timeout(
        (cli.timeout > 0).then(|| std::time::Duration::from_secs(cli.timeout)),
    );
    if let Some(base) = &cli.api_base {
        config = config.with_api_base(base);
    }
    if let Some(base) = &cli.pdf_base {
        config = config.with_pdf_base(base);
    }
    config
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn cmd_entries(
    input: &str,
    output: Option<&Path>,
    args: &EntryArgs,
    config: ClientConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let extract = args.extract_options()?;
    let reconstruct = args.reconstruct_options();

    let report = if is_url(input) {
        let client = BormeClient::new(config)?;
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(client.fetch_entries(input, &extract, &reconstruct))?
    } else {
        Borme::new()
            .with_extract_options(extract)
            .with_reconstruct_options(reconstruct)
            .parse_file(input)?
    };

    log::info!(
        "{} entries ({} incorporations) from {} pages",
        report.stats.entry_count,
        report.stats.incorporation_count,
        report.stats.page_count
    );

    emit(output, &args.render(&report)?)
}

fn cmd_sumario(
    date: NaiveDate,
    section: Option<&str>,
    json: bool,
    config: ClientConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = BormeClient::new(config)?;
    let rt = tokio::runtime::Runtime::new()?;
    let sumario = rt.block_on(client.fetch_sumario(date))?;

    let nodes: Vec<SummaryNode> = sumario
        .nodes()
        .into_iter()
        .scan(true, |in_section, node| {
            if let SummaryNode::Section { codigo, .. } = &node {
                *in_section = section.map_or(true, |s| codigo.eq_ignore_ascii_case(s));
            }
            let keep = matches!(node, SummaryNode::Field { .. }) || *in_section;
            Some(keep.then_some(node))
        })
        .flatten()
        .collect();

    if json {
        println!("{}", render::to_json(&nodes, JsonFormat::Pretty)?);
        return Ok(());
    }

    println!("{} {}", "Sumario BORME".cyan().bold(), date);
    println!("{}", "─".repeat(40).dimmed());
    for node in &nodes {
        match node {
            SummaryNode::Field { label, value } => println!("{}: {}", label.bold(), value),
            SummaryNode::Section { codigo, nombre } => {
                println!();
                println!("{}", format!("Sección {} – {}", codigo, nombre).cyan().bold());
            }
            SummaryNode::Entry {
                identificador,
                titulo,
                url_pdf,
            } => {
                println!("  {} {}", identificador.dimmed(), titulo);
                if let Some(url) = url_pdf {
                    println!("    {}", url.dimmed());
                }
            }
        }
    }

    Ok(())
}

fn cmd_day(
    date: NaiveDate,
    section: &str,
    output: Option<&Path>,
    args: &EntryArgs,
    config: ClientConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let extract = args.extract_options()?;
    let reconstruct = args.reconstruct_options();
    let client = BormeClient::new(config)?;
    let rt = tokio::runtime::Runtime::new()?;

    let sumario = rt.block_on(client.fetch_sumario(date))?;
    let urls = sumario.pdf_urls(Some(section));
    if urls.is_empty() {
        println!("{} {}", "No documents in section".yellow(), section);
        return Ok(());
    }

    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }

    let pb = ProgressBar::new(urls.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut failures = 0;
    let mut total_entries = 0;
    for url in urls {
        let name = url
            .rsplit('/')
            .next()
            .unwrap_or(url)
            .trim_end_matches(".pdf")
            .to_string();
        pb.set_message(name.clone());

        match rt.block_on(client.fetch_entries(url, &extract, &reconstruct)) {
            Ok(report) => {
                total_entries += report.stats.entry_count;
                let content = args.render(&report)?;
                match output {
                    Some(dir) => {
                        fs::write(dir.join(format!("{}.{}", name, args.extension())), &content)?
                    }
                    None => pb.suspend(|| {
                        println!("{}", format!("# {}", name).cyan().bold());
                        println!("{}\n", content);
                    }),
                }
            }
            Err(e) => {
                failures += 1;
                pb.suspend(|| eprintln!("{} {}: {}", "Failed".red(), name, e));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");
    println!(
        "\n{} {} entries, {} failed documents",
        "Done!".green().bold(),
        total_entries,
        failures
    );

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = LopdfTextSource::open_with_options(input, ExtractOptions::new().lenient())?;
    let pages = source.page_texts()?;
    let report = Borme::new().parse_pages(&pages);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), source.version());
    println!("{}: {}", "Pages".bold(), source.page_count());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let words: usize = pages.iter().map(|p| p.word_count()).sum();
    let blank = pages.iter().filter(|p| p.is_blank()).count();

    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Blank pages".bold(), blank);
    println!("{}: {}", "Entries".bold(), report.stats.entry_count);
    println!(
        "{}: {}",
        "Incorporations".bold(),
        report.stats.incorporation_count
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "borme".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("BORME bulletin reader");
    println!();
    println!("License: MIT");
}

fn emit(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://www.boe.es/borme/a.pdf"));
        assert!(is_url("http://localhost/a.pdf"));
        assert!(!is_url("BORME-A-2024-2-02.pdf"));
    }

    #[test]
    fn test_emit_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        emit(Some(&path), "1 - Acme SL.").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1 - Acme SL.");
    }

    #[test]
    fn test_cli_parses_entries_command() {
        let cli = Cli::try_parse_from([
            "borme",
            "entries",
            "doc.pdf",
            "--format",
            "json",
            "--pages",
            "1-3",
            "--per-page",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Entries {
                input,
                output,
                args,
            }) => {
                assert_eq!(input, "doc.pdf");
                assert!(output.is_none());
                assert!(args.format == OutputKind::Json);
                assert!(args.per_page);
                assert_eq!(
                    args.extract_options().unwrap().pages,
                    PageSelection::Range(1..=3)
                );
            }
            _ => panic!("Expected entries command"),
        }
    }

    #[test]
    fn test_output_flags() {
        let cli = Cli::try_parse_from(["borme", "entries", "doc.pdf", "--output", "out.json"])
            .unwrap();
        match cli.command {
            Some(Commands::Entries { output, .. }) => {
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("Expected entries command"),
        }

        let cli =
            Cli::try_parse_from(["borme", "day", "2024-01-03", "--output-dir", "dia"]).unwrap();
        match cli.command {
            Some(Commands::Day { output_dir, .. }) => {
                assert_eq!(output_dir, Some(PathBuf::from("dia")));
            }
            _ => panic!("Expected day command"),
        }

        assert!(Cli::try_parse_from(["borme", "day", "2024-01-03", "--output", "x.txt"]).is_err());
        assert!(Cli::try_parse_from(["borme", "entries", "doc.pdf", "--out", "x.txt"]).is_err());
    }

    #[test]
    fn test_cli_parses_date() {
        let cli = Cli::try_parse_from(["borme", "sumario", "2024-01-03", "--section", "A"]).unwrap();
        match cli.command {
            Some(Commands::Sumario { date, section, .. }) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
                assert_eq!(section.as_deref(), Some("A"));
            }
            _ => panic!("Expected sumario command"),
        }
    }
}
