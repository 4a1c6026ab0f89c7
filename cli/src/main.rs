//! docsift CLI - Word and PDF structure extraction tool

use std::path::{Path, PathBuf};
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use colored::Colorize;

use docsift::{ConvertOptions, ConverterRegistry, Error, OutputMode, ParseOptions, RenderOptions};

/// Bad usage: missing or extra arguments, unknown mode, dash-prefixed file name.
const EXIT_USAGE: i32 = 1;
/// Unsupported file type or failed conversion.
const EXIT_FAILURE: i32 = 2;

#[derive(Parser)]
#[command(name = "docsift")]
#[command(version)]
#[command(
    about = "Convert Word and PDF documents to plain text or HTML",
    long_about = "Reads a .docx or .pdf file, infers headings, lists and tables from its \
                  font sizes and numbering, and writes <FILENAME>.txt or <FILENAME>.html \
                  next to the input."
)]
struct Cli {
    /// Output mode
    #[arg(value_enum, value_name = "MODE")]
    mode: Mode,

    /// Input .docx or .pdf file
    #[arg(value_name = "FILENAME")]
    filename: PathBuf,

    /// Skip undecodable PDF pages instead of failing
    #[arg(long)]
    lenient: bool,

    /// Body font size assumed when the document declares none
    #[arg(long, value_name = "POINTS", env = "DOCSIFT_FALLBACK_FONT_SIZE")]
    fallback_font_size: Option<u32>,

    /// Write title, author and timestamps ahead of the body
    #[arg(long)]
    metadata: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Plain text (<FILENAME>.txt)
    Text,
    /// Minimal HTML (<FILENAME>.html)
    Html,
}

impl From<Mode> for OutputMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Text => OutputMode::Text,
            Mode::Html => OutputMode::Html,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_USAGE,
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    if cli.filename.to_string_lossy().starts_with('-') {
        eprintln!(
            "{}: file name must not start with '-': {}",
            "Error".red().bold(),
            cli.filename.display()
        );
        eprintln!("{}", "Usage: docsift <text|html> <FILENAME>".yellow());
        process::exit(EXIT_USAGE);
    }

    match cmd_convert(&cli) {
        Ok(output) => {
            println!("{} {}", "Wrote".green().bold(), output.display());
        }
        Err(e) => {
            if matches!(e.downcast_ref::<Error>(), Some(Error::UnsupportedFormat(_))) {
                eprintln!(
                    "{}: only .docx and .pdf files are supported",
                    "Unsupported file type".red().bold()
                );
            }
            eprintln!("{}: {}", "Error".red().bold(), e);
            process::exit(EXIT_FAILURE);
        }
    }
}

fn cmd_convert(cli: &Cli) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut parse_options = ParseOptions::new();
    if cli.lenient {
        parse_options = parse_options.lenient();
    }
    if let Some(size) = cli.fallback_font_size {
        parse_options = parse_options.with_fallback_font_size(size);
    }

    let options = ConvertOptions::new()
        .with_parse_options(parse_options)
        .with_render_options(RenderOptions::new().with_metadata(cli.metadata))
        .with_mode(cli.mode.into());

    let registry = ConverterRegistry::with_defaults();
    let result = registry.convert_file(Path::new(&cli.filename), &options)?;
    log::debug!(
        "{} bytes of {} from {:?}",
        result.content_len(),
        result.mime_type(),
        result.metadata.name
    );

    Ok(result
        .output_path
        .unwrap_or_else(|| docsift::convert::output_path(&cli.filename, options.mode)))
}
