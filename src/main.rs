use clap::{Parser, Subcommand};
use kiosk::application::converter::CurrencyConverter;
use kiosk::domain::account::Account;
use kiosk::domain::game::GameRules;
use kiosk::domain::grade;
use kiosk::domain::ports::RateSourceBox;
use kiosk::infrastructure::in_memory::InMemoryRateSource;
use kiosk::infrastructure::open_er_api::{DEFAULT_BASE_URL, OpenErApiSource};
use kiosk::interfaces::console::{Console, atm, converter, grades, guess};
use kiosk::interfaces::csv::marks_reader::MarksReader;
use miette::{IntoDiagnostic, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check balance, deposit and withdraw on a single account
    Atm {
        /// Opening balance; negative values open the account at zero
        #[arg(long, default_value_t = Account::DEFAULT_OPENING_BALANCE, allow_negative_numbers = true)]
        initial_balance: Decimal,
    },
    /// Convert amounts between currencies using live exchange rates
    Convert {
        /// Endpoint the base currency code is appended to
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        api_base_url: String,

        /// Connect and read timeout for the rate request
        #[arg(long, default_value_t = 5)]
        timeout_secs: u64,

        /// Serve rates from a JSON file instead of the network
        #[arg(long)]
        rates_file: Option<PathBuf>,
    },
    /// Average subject marks and assign a letter grade
    Grades {
        /// Read `subject,mark` rows from a CSV file instead of prompting
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Guess a number between 1 and 100 in seven attempts
    Guess {
        /// Seed the number generator for reproducible rounds
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "kiosk=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    match cli.command {
        Command::Atm { initial_balance } => {
            let mut account = Account::open(initial_balance);
            atm::run(&mut console, &mut account).into_diagnostic()?;
        }
        Command::Convert {
            api_base_url,
            timeout_secs,
            rates_file,
        } => {
            let source: RateSourceBox = if let Some(path) = rates_file {
                let file = File::open(path).into_diagnostic()?;
                Box::new(InMemoryRateSource::from_json(file).into_diagnostic()?)
            } else {
                let timeout = Duration::from_secs(timeout_secs);
                Box::new(OpenErApiSource::with_config(api_base_url, timeout).into_diagnostic()?)
            };

            let mut currency_converter = CurrencyConverter::new(source);
            converter::run(&mut console, &mut currency_converter)
                .await
                .into_diagnostic()?;
        }
        Command::Grades { file: Some(path) } => {
            let file = File::open(path).into_diagnostic()?;
            let (marks, errors) = MarksReader::new(file).marks();
            for e in errors {
                eprintln!("Error reading mark: {}", e);
            }

            let report = grade::calculate(&marks).into_diagnostic()?;
            grades::print_report(&mut console, &report).into_diagnostic()?;
        }
        Command::Grades { file: None } => {
            grades::run(&mut console).into_diagnostic()?;
        }
        Command::Guess { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            guess::run(&mut console, &mut rng, GameRules::default()).into_diagnostic()?;
        }
    }

    Ok(())
}
