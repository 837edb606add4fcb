//! Tax and employment cost CLI.
//!
//! `tax-cost calc` prints the breakdown for one set of parameters as text or
//! JSON; `tax-cost serve` exposes the same calculation over HTTP.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tax_cost_engine::api::{
    self, ApiEnvelope, ApiErrorResponse, AppState, DEFAULT_ANNUAL_MONTHS, DEFAULT_HOUSING_FUND_BASE,
    DEFAULT_MONTHLY_SALARY, DEFAULT_SOCIAL_INSURANCE_BASE,
};
use tax_cost_engine::calculation::calculate_tax_and_cost;
use tax_cost_engine::config::{ConfigLoader, PolicyConfig};
use tax_cost_engine::models::CompensationInput;
use tax_cost_engine::report::render_text;

#[derive(Parser, Debug)]
#[command(
    name = "tax-cost",
    version,
    about = "Annual after-tax income and employer cost calculator"
)]
struct Cli {
    /// Policy YAML file (defaults to the built-in Hangzhou policy)
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate and print a breakdown
    Calc(CalcArgs),

    /// Serve the calculation API over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:5001")]
        bind: SocketAddr,
    },
}

#[derive(Args, Debug)]
struct CalcArgs {
    /// Gross monthly salary
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_MONTHLY_SALARY)]
    monthly_salary: Decimal,

    /// Number of salary payments per year
    #[arg(long, default_value_t = DEFAULT_ANNUAL_MONTHS as u32)]
    annual_months: u32,

    /// Social insurance contribution base
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_SOCIAL_INSURANCE_BASE)]
    social_insurance_base: Decimal,

    /// Housing fund contribution base
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_HOUSING_FUND_BASE)]
    housing_fund_base: Decimal,

    /// Annual special additional deduction
    #[arg(long, allow_negative_numbers = true, default_value_t = Decimal::ZERO)]
    special_deduction: Decimal,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn load_policy(path: Option<&Path>) -> Result<ConfigLoader> {
    match path {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("failed to load policy from {}", path.display())),
        None => Ok(ConfigLoader::builtin()),
    }
}

fn run_calc(args: CalcArgs, policy: &PolicyConfig) -> Result<()> {
    let input = CompensationInput::new(
        args.monthly_salary,
        args.annual_months,
        args.social_insurance_base,
        args.housing_fund_base,
        args.special_deduction,
    );

    match (calculate_tax_and_cost(&input, policy), args.format) {
        (Ok(breakdown), OutputFormat::Text) => {
            println!("{}", render_text(&breakdown));
            Ok(())
        }
        (Ok(breakdown), OutputFormat::Json) => {
            let envelope = ApiEnvelope::success(breakdown);
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(())
        }
        (Err(err), OutputFormat::Json) => {
            let message = err.to_string();
            let envelope = ApiEnvelope::<()>::failure(ApiErrorResponse::from(err).error);
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            anyhow::bail!(message)
        }
        (Err(err), OutputFormat::Text) => Err(err.into()),
    }
}

async fn run_server(bind: SocketAddr, loader: ConfigLoader) -> Result<()> {
    info!(policy = %loader.policy().name, "Using policy");
    let router = api::create_router(AppState::new(loader));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;
    info!(address = %bind, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let loader = load_policy(cli.policy.as_deref())?;

    match cli.command {
        Commands::Calc(args) => run_calc(args, loader.policy()),
        Commands::Serve { bind } => run_server(bind, loader).await,
    }
}
