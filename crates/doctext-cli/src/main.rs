use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use doctext_backend::{BackendOptions, DocumentConverter, FallbackPolicy};
use doctext_cli::config::{parse_file_size, Config, ConvertConfig};
use doctext_cli::{default_output_path, is_same_file};
use doctext_core::{InputFormat, DEFAULT_PREVIEW_CHARS};
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Width of the rule closing the preview block
const PREVIEW_RULE_WIDTH: usize = 50;

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with extra details
    Verbose,
}

impl Verbosity {
    /// Create from CLI flags
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if output should be shown (not quiet)
    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if verbose output is requested
    const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Log filter used when `RUST_LOG` is not set
    const fn default_log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "doctext",
    about = "Convert office documents and archives to plain text",
    long_about = "Convert office documents and archives to plain text.\n\
                  \n\
                  Supports DOCX, XLSX, PPTX, HTML and ZIP. Archives are converted\n\
                  recursively, one section per entry.",
    version
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Read settings from this file instead of ~/.doctext.toml and ./.doctext.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a document or archive to text
    #[command(long_about = "Convert a document or archive to text.\n\
                      \n\
                      Prints a preview of the text and saves the full text next to the\n\
                      input (report.docx → report.txt).\n\
                      \n\
                      Defaults can be set via .doctext.toml configuration file.")]
    Convert {
        /// Input file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file path (default: input name with a .txt extension)
        #[arg(short, long, value_name = "OUTPUT", conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Number of characters to preview (default: 1000, or from config)
        #[arg(long, value_name = "N")]
        preview_chars: Option<usize>,

        /// Do not print a preview
        #[arg(long)]
        no_preview: bool,

        /// Write the full text to stdout instead of a file
        #[arg(long)]
        stdout: bool,

        /// Overwrite existing output files
        #[arg(long)]
        force: bool,

        /// Return files with unknown extensions verbatim when they are valid UTF-8
        #[arg(long)]
        decode_unknown: bool,

        /// Deepest archive nesting that is still opened (default: 10, or from config)
        #[arg(long, value_name = "N", conflicts_with = "no_depth_limit")]
        max_depth: Option<usize>,

        /// Open nested archives at any depth
        #[arg(long)]
        no_depth_limit: bool,

        /// Largest archive entry to convert, e.g. 500K, 20M (default: 100M, or from config)
        #[arg(long, value_name = "SIZE", value_parser = parse_file_size)]
        max_entry_size: Option<u64>,
    },

    /// List supported input formats
    Formats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Settings of one `convert` run after merging flags, config and defaults
#[derive(Debug, Clone, PartialEq, Eq)]
struct ConvertSettings {
    options: BackendOptions,
    preview_chars: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Extract global verbosity settings
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity.default_log_filter()),
    )
    .target(env_logger::Target::Stderr)
    .init();

    match args.command {
        Commands::Convert {
            input,
            output,
            preview_chars,
            no_preview,
            stdout,
            force,
            decode_unknown,
            max_depth,
            no_depth_limit,
            max_entry_size,
        } => {
            let config = Config::load(args.config.as_deref())?;
            let defaults = config.convert();

            let mut options = defaults.backend_options()?;
            if decode_unknown {
                options = options.with_fallback(FallbackPolicy::DecodeText);
            }
            if no_depth_limit {
                options = options.with_max_nesting_depth(None);
            } else if let Some(depth) = max_depth {
                options = options.with_max_nesting_depth(Some(depth));
            }
            if let Some(size) = max_entry_size {
                options = options.with_max_entry_size(size);
            }

            let settings = ConvertSettings {
                options,
                preview_chars: resolve_preview_chars(no_preview, preview_chars, &defaults),
            };

            convert_command(&input, output, stdout, force, &settings, verbosity)
        }
        Commands::Formats { json } => formats_command(json),
    }
}

/// Preview length from flags, then config, then the default; `None` disables it
fn resolve_preview_chars(
    no_preview: bool,
    cli_value: Option<usize>,
    config: &ConvertConfig,
) -> Option<usize> {
    if no_preview {
        return None;
    }
    Some(
        cli_value
            .or(config.preview_chars)
            .unwrap_or(DEFAULT_PREVIEW_CHARS),
    )
}

/// Convert one file and save or print its text
fn convert_command(
    input: &Path,
    output: Option<PathBuf>,
    to_stdout: bool,
    force: bool,
    settings: &ConvertSettings,
    verbosity: Verbosity,
) -> Result<()> {
    if !input.is_file() {
        eprintln!(
            "{} Input file not found: {}",
            "Error:".red().bold(),
            input.display()
        );
        std::process::exit(1);
    }

    let output_path = if to_stdout {
        None
    } else {
        Some(output.unwrap_or_else(|| default_output_path(input)))
    };

    if let Some(ref path) = output_path {
        if is_same_file(input, path) {
            eprintln!(
                "{} Output file would replace the input: {}",
                "Error:".red().bold(),
                path.display()
            );
            eprintln!("{} Use -o to choose another output file", "Help:".cyan().bold());
            std::process::exit(1);
        }
        // Check before converting so a refused run does no work
        if path.exists() && !force {
            eprintln!(
                "{} Output file already exists: {}",
                "Error:".red().bold(),
                path.display()
            );
            eprintln!(
                "{} Use --force to overwrite existing files",
                "Help:".cyan().bold()
            );
            std::process::exit(1);
        }
    }

    info!(
        "Converting {} (fallback: {}, max depth: {}, max entry size: {} bytes)",
        input.display(),
        settings.options.fallback,
        settings
            .options
            .max_nesting_depth
            .map_or_else(|| "unlimited".to_string(), |d| d.to_string()),
        settings.options.max_entry_size
    );

    let converter = DocumentConverter::with_options(settings.options);
    let result = converter
        .convert_file(input)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    if verbosity.is_verbose() {
        let format = result
            .format
            .map_or_else(|| "unsupported".to_string(), |f| f.to_string());
        eprintln!(
            "{} {} ({format}) converted in {:.2?}, {} characters",
            "Info:".blue().bold(),
            result.name,
            result.latency,
            result.num_characters()
        );
    }

    let Some(path) = output_path else {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(result.text.as_bytes())
            .and_then(|()| stdout.flush())
            .context("Failed to write to stdout")?;
        return Ok(());
    };

    if verbosity.should_show_output() {
        if let Some(chars) = settings.preview_chars {
            println!("--- Conversion Preview (First {chars} characters) ---");
            println!("{}", result.preview(chars));
            println!("{}", "-".repeat(PREVIEW_RULE_WIDTH));
        }
    }

    result
        .save_text(&path)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    debug!("Wrote {} bytes to {}", result.text.len(), path.display());

    if verbosity.should_show_output() {
        eprintln!(
            "{} Full text saved to: {}",
            "✓".green().bold(),
            path.display().to_string().bright_white()
        );
    }

    Ok(())
}

/// List supported input formats
#[allow(
    clippy::unnecessary_wraps,
    reason = "consistent return type for CLI commands"
)]
fn formats_command(json_output: bool) -> Result<()> {
    if json_output {
        let json_formats: Vec<serde_json::Value> = InputFormat::ALL
            .iter()
            .map(|format| {
                serde_json::json!({
                    "id": format.to_string().to_lowercase(),
                    "name": format.to_string(),
                    "extensions": format.extensions(),
                    "archive": format.is_archive(),
                    "description": format.description()
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json_formats).unwrap_or_default()
        );
    } else {
        println!(
            "\n{} {} supported input formats:\n",
            "doctext".cyan().bold(),
            InputFormat::ALL.len()
        );

        for format in InputFormat::ALL {
            let ext_str = format
                .extensions()
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "    {} {:6} {:16} {}",
                "✓".green(),
                format.to_string().cyan(),
                format!("[{ext_str}]").bright_black(),
                format.description()
            );
        }
        println!();
        println!(
            "  Other files are reported as unsupported, or returned as text with {}.",
            "--decode-unknown".bright_white()
        );
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert!(!Verbosity::Quiet.should_show_output());
        assert!(Verbosity::Verbose.is_verbose());
    }

    #[test]
    fn test_default_log_filter() {
        assert_eq!(Verbosity::Quiet.default_log_filter(), "error");
        assert_eq!(Verbosity::Normal.default_log_filter(), "warn");
        assert_eq!(Verbosity::Verbose.default_log_filter(), "info");
    }

    #[test]
    fn test_resolve_preview_chars() {
        let config = ConvertConfig {
            preview_chars: Some(250),
            ..ConvertConfig::default()
        };
        assert_eq!(resolve_preview_chars(false, Some(10), &config), Some(10));
        assert_eq!(resolve_preview_chars(false, None, &config), Some(250));
        assert_eq!(
            resolve_preview_chars(false, None, &ConvertConfig::default()),
            Some(DEFAULT_PREVIEW_CHARS)
        );
        assert_eq!(resolve_preview_chars(true, Some(10), &config), None);
    }

    #[test]
    fn test_args_parse_convert() {
        let args = Args::try_parse_from([
            "doctext",
            "-v",
            "convert",
            "bundle.zip",
            "--max-depth",
            "2",
            "--max-entry-size",
            "1K",
        ])
        .expect("valid args");
        assert!(args.verbose);
        match args.command {
            Commands::Convert {
                input,
                max_depth,
                max_entry_size,
                ..
            } => {
                assert_eq!(input, PathBuf::from("bundle.zip"));
                assert_eq!(max_depth, Some(2));
                assert_eq!(max_entry_size, Some(1024));
            }
            Commands::Formats { .. } => panic!("expected convert"),
        }
    }

    #[test]
    fn test_args_conflicts() {
        assert!(Args::try_parse_from(["doctext", "-q", "-v", "formats"]).is_err());
        assert!(Args::try_parse_from([
            "doctext", "convert", "a.zip", "--max-depth", "1", "--no-depth-limit"
        ])
        .is_err());
        assert!(
            Args::try_parse_from(["doctext", "convert", "a.zip", "--stdout", "-o", "x.txt"])
                .is_err()
        );
        assert!(
            Args::try_parse_from(["doctext", "convert", "a.zip", "--max-entry-size", "big"])
                .is_err()
        );
    }
}
