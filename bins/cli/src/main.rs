//! DKM report command-line front end
//!
//! Reads a JSON object of form fields and writes the report document.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dkm_core::normalizer::{FormFields, Normalizer};
use dkm_core::reports::{ReportResult, ReportService};
use dkm_render::DocumentFormat;
use dkm_shared::AppConfig;
use dkm_shared::types::ParseMode;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Fmt {
    Docx,
    Wordml,
    Text,
}

impl From<Fmt> for DocumentFormat {
    fn from(fmt: Fmt) -> Self {
        match fmt {
            Fmt::Docx => Self::Docx,
            Fmt::Wordml => Self::WordMl,
            Fmt::Text => Self::Text,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dkm-report", version, about = "Build the monthly DKM financial report")]
struct Cli {
    /// JSON file with the form fields (stdin when omitted)
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Output file; `-` for stdout. Defaults to the suggested name in the current directory
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value_t = Fmt::Docx)]
    format: Fmt,

    /// Reject unparsable numbers instead of counting them as zero
    #[arg(long = "strict")]
    strict: bool,
}

/// A rendered report, ready to be written.
struct Generated {
    filename: String,
    result: ReportResult,
    bytes: Vec<u8>,
}

fn generate(
    config: &AppConfig,
    normalizer: &Normalizer,
    fields: &FormFields,
    format: DocumentFormat,
) -> anyhow::Result<Generated> {
    let request = normalizer.normalize(&config.template, fields)?;
    let report = ReportService::compile(&config.template, &request);
    let bytes = format.render(&report.blocks)?;

    Ok(Generated {
        filename: ReportService::suggested_filename(&request.period_label, format.extension()),
        result: report.result,
        bytes,
    })
}

fn read_fields(input: Option<&PathBuf>) -> anyhow::Result<FormFields> {
    let reader: Box<dyn Read> = match input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        ),
        None => Box::new(io::stdin()),
    };
    serde_json::from_reader(BufReader::new(reader)).context("input is not a JSON object of strings")
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so `--output -` can stream the document.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dkm_report=info,dkm_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    let mut form = config.form.clone();
    if cli.strict {
        form.parse_mode = ParseMode::Strict;
    }
    let normalizer = Normalizer::from_config(&form);

    let fields = read_fields(cli.input.as_ref())?;
    let generated = generate(&config, &normalizer, &fields, cli.format.into())?;

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&generated.filename));
    if output.as_os_str() == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&generated.bytes)?;
        stdout.flush()?;
    } else {
        std::fs::write(&output, &generated.bytes)
            .with_context(|| format!("cannot write {}", output.display()))?;
    }

    info!(
        output = %output.display(),
        total_income = %generated.result.total_income,
        gross_balance = %generated.result.gross_balance,
        total_expense = %generated.result.total_expense,
        closing_balance = %generated.result.closing_balance,
        "Report written"
    );
    Ok(())
}
