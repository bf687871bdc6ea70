//! Command Line Interface for the risk simulator.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use prettytable::{Table, row};
use risk_sim_api::models::SimulationResponse;
use risk_sim_api::openapi::openapi_pretty_json;
use risk_sim_api::{ApiServer, ServerConfig};
use risk_sim_domain::{SimulationParameters, SimulationResult};
use risk_sim_simulation::{EngineConfig, MonteCarloEngine, SamplerKind};
use tracing::info;

#[derive(Parser)]
#[command(name = "risk-sim")]
#[command(about = "Monte Carlo price-risk simulator (GBM)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and print the risk summary
    Simulate {
        /// Current asset price
        #[arg(short, long)]
        price: f64,

        /// Annualized volatility in percent (20 = 20%)
        #[arg(short, long, default_value_t = 20.0)]
        volatility: f64,

        /// Trading days to project
        #[arg(short, long, default_value_t = 30)]
        days: u32,

        /// Number of Monte Carlo trials
        #[arg(short = 'n', long, default_value_t = 1000)]
        simulations: u32,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Gaussian sampler (box-muller, box-muller-cached, ziggurat)
        #[arg(long, default_value_t = SamplerKind::BoxMuller)]
        sampler: SamplerKind,

        /// Override the path matrix budget (cells)
        #[arg(long)]
        max_cells: Option<u64>,

        /// Print the full result as JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Start the HTTP API
    Serve {
        /// Address to bind (defaults to RISK_SIM_HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to RISK_SIM_PORT or 8000)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the OpenAPI document
    Openapi,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            price,
            volatility,
            days,
            simulations,
            seed,
            sampler,
            max_cells,
            json,
        } => {
            let mut config = ServerConfig::from_env().engine.with_sampler(sampler);
            if let Some(cells) = max_cells {
                config = config.with_max_matrix_cells(cells);
            }
            let params = SimulationParameters::new(price, volatility, days, simulations);
            let result = run_simulation(config, &params, seed)?;

            if json {
                let body = SimulationResponse::from(result);
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print_summary(&params, &result);
            }
        }
        Commands::Serve { host, port } => {
            let mut config = ServerConfig::from_env();
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            ApiServer::new(config)
                .run()
                .await
                .context("API server stopped with an error")?;
        }
        Commands::Openapi => {
            println!("{}", openapi_pretty_json());
        }
    }

    Ok(())
}

fn run_simulation(
    config: EngineConfig,
    params: &SimulationParameters,
    seed: Option<u64>,
) -> Result<SimulationResult> {
    let engine = MonteCarloEngine::new(config);
    info!(sampler = %config.sampler, ?seed, "Starting simulation");

    let result = match seed {
        Some(seed) => engine.simulate_seeded(params, seed),
        None => engine.simulate(params),
    };
    result.context("simulation failed")
}

fn print_summary(params: &SimulationParameters, result: &SimulationResult) {
    let stats = &result.statistics;

    println!(
        "\n📊 Risk Summary ({} trials, {} days, {:.2}% vol)",
        params.num_simulations, params.days, params.volatility_pct
    );
    let mut summary = Table::new();
    summary.add_row(row!["Metric", "Value"]);
    summary.add_row(row!["Initial price", format!("${:.2}", stats.initial_price)]);
    summary.add_row(row!["Mean final price", format!("${:.2}", stats.mean_final_price)]);
    summary.add_row(row!["Std deviation", format!("${:.2}", stats.std_dev)]);
    summary.add_row(row!["Min final price", format!("${:.2}", stats.min_price)]);
    summary.add_row(row!["Max final price", format!("${:.2}", stats.max_price)]);
    summary.add_row(row!["VaR 95% price", format!("${:.2}", stats.var_95_price)]);
    summary.add_row(row!["VaR 95% loss", format!("${:.2}", stats.var_95_loss)]);
    summary.add_row(row!["VaR 95% loss %", format!("{:.2}%", stats.var_95_pct)]);
    summary.add_row(row!["Expected return", format!("{:.2}%", stats.expected_return_pct)]);
    summary.printstd();

    println!("\n📈 Price Bands");
    let mut bands = Table::new();
    bands.add_row(row!["Day", "P5", "Mean", "P95"]);
    for day in checkpoint_days(result.days(), 10) {
        bands.add_row(row![
            day,
            format!("{:.2}", result.percentile_5_path[day]),
            format!("{:.2}", result.mean_path[day]),
            format!("{:.2}", result.percentile_95_path[day])
        ]);
    }
    bands.printstd();
}

/// Evenly spaced days in `0..=days`, at most `max_rows + 1` of them,
/// always including the last day.
fn checkpoint_days(days: usize, max_rows: usize) -> Vec<usize> {
    let stride = days.div_ceil(max_rows.max(1)).max(1);
    let mut out: Vec<usize> = (0..=days).step_by(stride).collect();
    if out.last() != Some(&days) {
        out.push(days);
    }
    out
}
