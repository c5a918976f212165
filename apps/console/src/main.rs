//! # megapc
//!
//! Operator console for the MegaPC retail back office.
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (stderr, `RUST_LOG` or `-v`)
//! 3. Load `ConsoleConfig` (file, then `MEGAPC_*` environment)
//! 4. Build the `HttpApi` the pages share
//! 5. Load the requested page and print it as text or JSON
//!
//! ## Exit Status
//! ```text
//! 0  page shown
//! 1  internal error
//! 2  rejected parameter
//! 3  page failed to load
//! 4  unusable configuration
//! ```

#![forbid(unsafe_code)]

use clap::{ArgAction, Parser, Subcommand};
use megapc_client::{ConsoleApi, ConsoleConfig, HttpApi};
use megapc_console::error::{ConsoleError, ConsoleResult, ErrorCode};
use megapc_console::output;
use megapc_console::pages::analytics::{AnalyticsOptions, Segment};
use megapc_console::pages::catalogue::CatalogueOptions;
use megapc_console::pages::products::ProductsOptions;
use megapc_console::pages::sales::SalesOptions;
use megapc_console::pages::settings::SettingsUpdate;
use megapc_console::pages::{self, settle};
use megapc_core::{FacetFilter, FilterCriteria, SortKey};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "megapc")]
#[command(about = "MegaPC retail console")]
#[command(
    after_help = "Environment:\n  MEGAPC_API_URL              Backend base URL\n  MEGAPC_API_TIMEOUT_SECS     Request timeout\n  MEGAPC_LOW_STOCK_THRESHOLD  Low stock badge threshold\n  RUST_LOG                    Log filter"
)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print the page as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Headline totals, trends and best sellers
    Dashboard,
    /// Monthly, weekly and hourly charts with insights
    Analytics {
        /// Also show the daily trend; N defaults to the configured window
        #[arg(long, num_args = 0..=1, value_name = "N")]
        daily_days: Option<Option<u32>>,
        #[arg(long, value_enum)]
        segment: Option<Segment>,
    },
    /// Filter and sort the product catalogue
    Catalogue {
        #[arg(long, default_value = "")]
        search: String,
        /// Exact brand, or "all"
        #[arg(long)]
        brand: Option<String>,
        /// Exact GPU, or "all"
        #[arg(long)]
        gpu: Option<String>,
        /// name, price-asc, price-desc, stock or margin
        #[arg(long)]
        sort: Option<String>,
    },
    /// Inventory table
    Products {
        /// Server-side search; blank lists everything
        #[arg(long)]
        search: Option<String>,
        /// Only products at or under the low stock threshold
        #[arg(long, default_value_t = false)]
        low_stock: bool,
    },
    /// Today's figures and recent transactions
    Sales {
        /// Recent transactions window in days
        #[arg(long)]
        days: Option<u32>,
        /// Show the latest N sales instead of a day window
        #[arg(long)]
        limit: Option<u32>,
        /// Include all-time totals
        #[arg(long, default_value_t = false)]
        summary: bool,
        /// Include the best sellers; N defaults to the configured limit
        #[arg(long, num_args = 0..=1, value_name = "N")]
        top: Option<Option<u32>>,
    },
    /// Show or change company and notification settings
    Settings {
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
        low_stock_alerts: Option<bool>,
        #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
        daily_reports: Option<bool>,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug,hyper=info,reqwest=info",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(text) => {
            println!("{}", text.trim_end());
            ExitCode::SUCCESS
        }
        Err(err) => {
            if cli.json {
                match serde_json::to_string_pretty(&err) {
                    Ok(json) => println!("{}", json),
                    Err(_) => eprintln!("{}", err.message),
                }
            } else {
                eprintln!("Error: {}", err.message);
            }
            ExitCode::from(err.code.exit_code() as u8)
        }
    }
}

async fn run(cli: &Cli) -> ConsoleResult<String> {
    let config = ConsoleConfig::load(cli.config.clone())?;
    debug!(api_url = %config.api.base_url, "Configuration loaded");

    if let Command::Settings {
        company,
        email,
        currency,
        low_stock_alerts,
        daily_reports,
    } = &cli.command
    {
        let update = SettingsUpdate {
            company: company.clone(),
            email: email.clone(),
            currency: currency.clone(),
            low_stock_alerts: *low_stock_alerts,
            daily_reports: *daily_reports,
        };
        let view = pages::settings::run(&config, cli.config.as_deref(), &update)?;
        return output(&view, cli.json);
    }

    let api = HttpApi::new(&config.api)?;
    info!(api_url = %api.base_url(), "Console ready");
    show(&api, &config, cli).await
}

/// A bare `--daily-days` uses the configured daily window.
fn analytics_options(
    config: &ConsoleConfig,
    daily_days: Option<Option<u32>>,
    segment: Option<Segment>,
) -> AnalyticsOptions {
    AnalyticsOptions {
        daily_days: daily_days.map(|n| n.unwrap_or(config.dashboard.daily_days)),
        segment,
    }
}

async fn show(api: &dyn ConsoleApi, config: &ConsoleConfig, cli: &Cli) -> ConsoleResult<String> {
    let threshold = config.catalogue.low_stock_threshold;

    match &cli.command {
        Command::Dashboard => {
            let view = settle(pages::dashboard::load(api).await, pages::dashboard::FAILURE)?;
            output(&view, cli.json)
        }
        Command::Analytics { daily_days, segment } => {
            let opts = analytics_options(config, *daily_days, *segment);
            let view = settle(pages::analytics::load(api, &opts).await, pages::analytics::FAILURE)?;
            output(&view, cli.json)
        }
        Command::Catalogue {
            search,
            brand,
            gpu,
            sort,
        } => {
            let opts = CatalogueOptions {
                criteria: FilterCriteria {
                    search: search.clone(),
                    brand: FacetFilter::from(brand.clone()),
                    gpu: FacetFilter::from(gpu.clone()),
                    sort: sort
                        .clone()
                        .map(SortKey::from)
                        .unwrap_or_else(|| config.catalogue.default_sort.clone()),
                },
                low_stock_threshold: threshold,
            };
            let view = settle(pages::catalogue::load(api, &opts).await, pages::catalogue::FAILURE)?;
            output(&view, cli.json)
        }
        Command::Products { search, low_stock } => {
            let opts = ProductsOptions {
                search: search.clone(),
                low_stock: *low_stock,
                low_stock_threshold: threshold,
            };
            let view = settle(pages::products::load(api, &opts).await, pages::products::FAILURE)?;
            output(&view, cli.json)
        }
        Command::Sales {
            days,
            limit,
            summary,
            top,
        } => {
            let opts = SalesOptions {
                days: days.unwrap_or(config.dashboard.recent_sales_days),
                limit: *limit,
                summary: *summary,
                top: top.map(|n| n.unwrap_or(config.dashboard.top_products_limit)),
            };
            let view = settle(pages::sales::load(api, &opts).await, pages::sales::FAILURE)?;
            output(&view, cli.json)
        }
        Command::Settings { .. } => Err(ConsoleError::new(
            ErrorCode::Internal,
            "settings is handled before connecting",
        )),
    }
}
