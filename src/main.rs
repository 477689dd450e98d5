use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use octowage::core::log::init_logging;
use octowage::core::salary::{CareerSort, Category};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for octowage::AppCommand {
    fn from(cmd: Commands) -> octowage::AppCommand {
        match cmd {
            Commands::Rates => octowage::AppCommand::Rates,
            Commands::Convert { amount, currency } => {
                octowage::AppCommand::Convert { amount, currency }
            }
            Commands::Compare => octowage::AppCommand::Compare,
            Commands::Careers { sort, category } => {
                octowage::AppCommand::Careers { sort, category }
            }
            Commands::Career { id } => octowage::AppCommand::Career { id },
            Commands::CompareCareers { first, second } => {
                octowage::AppCommand::CompareCareers { first, second }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display current exchange rates
    Rates,
    /// Convert a foreign amount into the base currency
    Convert {
        /// Amount in the foreign currency
        amount: Decimal,
        /// Currency code, e.g. USD
        currency: String,
    },
    /// Compare judge and teacher pay across countries
    Compare,
    /// Display public careers and the cost of pay above the ceiling
    Careers {
        /// Order of the listing
        #[arg(short, long, value_enum, default_value_t = CareerSort::Salary)]
        sort: CareerSort,
        /// Only show careers in this category
        #[arg(long, value_enum)]
        category: Option<Category>,
    },
    /// Show the pay breakdown of one career, e.g. juiz_tjsp
    Career {
        /// Career id
        id: String,
    },
    /// Compare two careers side by side
    CompareCareers {
        first: String,
        second: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => octowage::cli::setup::setup(),
        Some(cmd) => octowage::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
