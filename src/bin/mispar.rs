use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use mispar_core::errors::ErrorCode;
use mispar_core::persistence::OutputFormat;
use mispar_core::tracing_setup::init_tracing;
use mispar_core::{MisparConfig, Pipeline};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "mispar",
    version,
    about = "Groups Strong's Hebrew lexicon words by the numeral values of their letters"
)]
struct Cli {
    /// TOML file with defaults for any of the options below.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Words mod this number. Defaults to |days of the week|.
    #[arg(short = 'm', long = "mod", allow_negative_numbers = true)]
    modulus: Option<i64>,
    /// Numbering scheme to compute (repeatable). Defaults to all of them.
    #[arg(short, long = "scheme")]
    schemes: Vec<String>,
    /// Output format: json, js or bincode (repeatable).
    #[arg(short, long = "format")]
    formats: Vec<OutputFormat>,
    /// Path to the Strong's dictionary JSON file.
    #[arg(long = "vocab_input_file")]
    vocab_input_file: Option<PathBuf>,
    /// Directory for the output documents. Existing documents are replaced.
    #[arg(long = "output_path")]
    output_path: Option<PathBuf>,
    /// Log at debug level unless MISPAR_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> MisparConfig {
        MisparConfig {
            base: self.modulus,
            schemes: (!self.schemes.is_empty()).then(|| self.schemes.clone()),
            formats: (!self.formats.is_empty()).then(|| self.formats.clone()),
            input: self.vocab_input_file.clone(),
            output_dir: self.output_path.clone(),
            ..Default::default()
        }
    }

    fn load_config(&self) -> Result<MisparConfig> {
        let file = match &self.config {
            Some(path) => MisparConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => MisparConfig::default(),
        };
        Ok(file.merge(self.overrides()))
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    let pipeline = Pipeline::from_config(&config).map_err(|e| anyhow::anyhow!(e.coded_string()))?;
    let resolved = pipeline.config();
    let input = resolved.input.clone();

    let summary = pipeline
        .run()
        .map_err(|e| anyhow::anyhow!(e.coded_string()))
        .with_context(|| format!("processing {}", input.display()))?;

    println!(
        "{} {} entries -> {} words (mod {})",
        "done:".green().bold(),
        summary.entries,
        summary.words,
        resolved.modulus
    );
    for file in &summary.files {
        println!("  {}", file.display().to_string().dim());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "mispar_core=debug" } else { "mispar_core=info" });

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
