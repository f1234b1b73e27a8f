use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use stmtgen_core::{RealDeposit, StatementRequest, build_statement, suggest_period};
use stmtgen_ingest::load_real_deposits;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod output;
mod state;

use output::{OutputFormat, render_catalog, render_statement};

#[derive(Parser, Debug)]
#[command(name = "stmtgen", version, about = "Synthetic bank statement generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a statement: synthetic transactions, paystub deposits, running balances
    Generate(GenerateArgs),

    /// List the transaction catalog with weights and selection shares
    Catalog {
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Suggest a statement period covering a set of paystubs
    SuggestPeriod {
        #[arg(long)]
        paystubs: PathBuf,

        /// Days added before the first and after the last paystub
        #[arg(long)]
        padding: Option<i64>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// JSON statement request; flags below override its fields
    #[arg(long)]
    request: Option<PathBuf>,

    /// First statement day (YYYY-MM-DD); derived from paystubs when omitted
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last statement day (YYYY-MM-DD); derived from paystubs when omitted
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Number of synthetic transactions
    #[arg(long, allow_negative_numbers = true)]
    count: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    opening_balance: Option<Decimal>,

    /// Paystub file (.csv or .json) supplying real payroll deposits
    #[arg(long)]
    paystubs: Option<PathBuf>,

    /// Load paystubs but keep them out of the ledger
    #[arg(long)]
    no_real_deposits: bool,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Write to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stmtgen=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => generate(args)?,

        Command::Catalog { format } => {
            let cfg = config::load_config()?;
            let catalog = cfg.catalog()?;
            print!("{}", render_catalog(catalog.get(), format.unwrap_or(OutputFormat::Table))?);
        }

        Command::SuggestPeriod { paystubs, padding } => {
            let cfg = config::load_config()?;
            let deposits = load_real_deposits(&paystubs)?;
            let padding = padding.unwrap_or(cfg.generator.period_padding_days);
            match suggest_period(&deposits, padding) {
                Some((start, end)) => println!("{start} {end}"),
                None => bail!("no paystubs in {}", paystubs.display()),
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn generate(args: GenerateArgs) -> Result<()> {
    let cfg = config::load_config()?;
    let catalog = cfg.catalog()?;

    let base = match &args.request {
        Some(path) => Some(read_request(path)?),
        None => None,
    };

    let real_deposits: Vec<RealDeposit> = match &args.paystubs {
        Some(path) => load_real_deposits(path)?,
        None => base.as_ref().map(|r| r.real_deposits.clone()).unwrap_or_default(),
    };

    let (start_date, end_date) = resolve_period(&args, base.as_ref(), &real_deposits, cfg.generator.period_padding_days)?;

    let include_real_deposits = if args.no_real_deposits {
        false
    } else if args.paystubs.is_some() {
        true
    } else {
        base.as_ref().map(|r| r.include_real_deposits).unwrap_or(false)
    };

    let requested_count = args.count.or(base.as_ref().map(|r| r.synthetic_count));
    let request = StatementRequest {
        start_date,
        end_date,
        synthetic_count: cfg.effective_count(requested_count)?,
        opening_balance: args
            .opening_balance
            .or(base.as_ref().map(|r| r.opening_balance))
            .unwrap_or(Decimal::ZERO),
        include_real_deposits,
        real_deposits,
        seed: args.seed.or(base.as_ref().and_then(|r| r.seed)).or(cfg.generator.seed),
    };
    debug!(?request, "resolved statement request");

    let statement = build_statement(catalog.get(), &request).context("statement generation failed")?;
    let rendered = render_statement(&statement, args.format.unwrap_or(cfg.output.default_format))?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "wrote statement");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn read_request(path: &Path) -> Result<StatementRequest> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse statement request {}", path.display()))
}

fn resolve_period(
    args: &GenerateArgs,
    base: Option<&StatementRequest>,
    real_deposits: &[RealDeposit],
    padding: i64,
) -> Result<(NaiveDate, NaiveDate)> {
    let suggested = suggest_period(real_deposits, padding);
    let start = args
        .start
        .or(base.map(|r| r.start_date))
        .or(suggested.map(|(s, _)| s));
    let end = args.end.or(base.map(|r| r.end_date)).or(suggested.map(|(_, e)| e));

    match (start, end) {
        (Some(s), Some(e)) => Ok((s, e)),
        _ => bail!("statement period unknown: pass --start and --end, or --paystubs to derive it"),
    }
}
