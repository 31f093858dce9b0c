//! CLI tool for card number validation.
//!
//! # Usage
//!
//! ```bash
//! # Validate a card number
//! cardcheck validate 4111111111111111
//!
//! # With security code and expiration, as JSON
//! cardcheck validate 5500000000000004 --security-code 123 --expires 2028-04 --output json
//!
//! # Show which classification rules match
//! cardcheck classify 6759000000000000
//!
//! # Generate test card numbers
//! cardcheck generate --type maestro --count 5
//! ```

use std::process::ExitCode;

use cardcheck::{expiration, generate, network, passes_luhn, CardError, CardNumber, CardType};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "cardcheck")]
#[command(author, version, about = "Payment card number validation tool")]
struct Cli {
    /// Log validation steps (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a card number (digits only, no separators)
    Validate {
        /// Card number to validate
        card_number: String,

        /// Security code to carry along (not validated)
        #[arg(short, long)]
        security_code: Option<String>,

        /// Expiration month, as YYYY-MM or MM/YYYY
        #[arg(short, long, value_parser = expiration::parse_year_month)]
        expires: Option<(i32, u32)>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,

        /// Print the full number and security code in JSON output
        #[arg(long)]
        reveal: bool,
    },

    /// Check the format and Luhn checksum only
    Luhn {
        /// Card number to check
        card_number: String,
    },

    /// List the classification rules a number matches
    Classify {
        /// Card number to classify
        card_number: String,
    },

    /// Generate test card numbers (for testing only)
    Generate {
        /// Card network to generate
        #[arg(short = 't', long = "type", default_value = "visa")]
        card_type: TypeArg,

        /// Number of cards to generate
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Total length (defaults to the network's usual length)
        #[arg(short, long)]
        length: Option<usize>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum TypeArg {
    Visa,
    Mastercard,
    Amex,
    Maestro,
}

impl From<TypeArg> for CardType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Visa => CardType::Visa,
            TypeArg::Mastercard => CardType::Mastercard,
            TypeArg::Amex => CardType::Amex,
            TypeArg::Maestro => CardType::Maestro,
        }
    }
}

fn init_logger(verbose: bool) {
    let default = if verbose { "cardcheck=debug" } else { "cardcheck=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Validate {
            card_number,
            security_code,
            expires,
            output,
            reveal,
        } => cmd_validate(
            &card_number,
            security_code.as_deref(),
            expires,
            output,
            reveal,
        ),
        Commands::Luhn { card_number } => cmd_luhn(&card_number),
        Commands::Classify { card_number } => cmd_classify(&card_number),
        Commands::Generate {
            card_type,
            count,
            length,
        } => cmd_generate(card_type.into(), count, length),
    }
}

fn build_card(
    card_number: &str,
    security_code: Option<&str>,
    expires: Option<(i32, u32)>,
) -> Result<CardNumber, CardError> {
    let mut card = CardNumber::new(card_number, security_code)?;
    if let Some((year, month)) = expires {
        card.set_expiration(year, month)?;
    }
    Ok(card)
}

fn cmd_validate(
    card_number: &str,
    security_code: Option<&str>,
    expires: Option<(i32, u32)>,
    output: OutputFormat,
    reveal: bool,
) -> ExitCode {
    match build_card(card_number, security_code, expires) {
        Ok(card) => {
            match output {
                OutputFormat::Text => {
                    println!("Valid: yes");
                    println!("Type: {}", card.card_type().name());
                    println!("Masked: {}", card.masked());
                    if let Some(expiration) = card.expiration() {
                        println!("Expires: {}", expiration);
                    }
                }
                OutputFormat::Json if reveal => {
                    print_json(&card.to_record());
                }
                OutputFormat::Json => {
                    print_json(&serde_json::json!({
                        "valid": true,
                        "type": card.card_type(),
                        "masked": card.masked(),
                        "expiration": card.expiration(),
                    }));
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            match output {
                OutputFormat::Text => {
                    println!("Valid: no");
                    println!("Error: {}", e);
                }
                OutputFormat::Json => {
                    print_json(&serde_json::json!({
                        "valid": false,
                        "error": e.kind(),
                        "message": e.to_string(),
                    }));
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: cannot render JSON: {}", e),
    }
}

fn cmd_luhn(card_number: &str) -> ExitCode {
    if passes_luhn(card_number) {
        println!("Luhn check: PASS");
        ExitCode::SUCCESS
    } else {
        println!("Luhn check: FAIL");
        ExitCode::FAILURE
    }
}

fn cmd_classify(card_number: &str) -> ExitCode {
    let digits = match cardcheck::format::parse_digits(card_number) {
        Ok(digits) => digits,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut matched = false;
    for rule in network::matching_rules(&digits) {
        matched = true;
        let lengths = rule.lengths();
        println!(
            "Matches: {} (lengths {}-{})",
            rule.network(),
            lengths.start(),
            lengths.end()
        );
    }

    match network::classify(&digits) {
        Some(card_type) if matched => {
            println!("Type: {}", card_type.name());
            ExitCode::SUCCESS
        }
        _ => {
            println!("Type: unclassified");
            ExitCode::FAILURE
        }
    }
}

fn cmd_generate(card_type: CardType, count: usize, length: Option<usize>) -> ExitCode {
    let prefix = generate::prefix_for(card_type);
    let length = length.unwrap_or_else(|| generate::default_length(card_type));

    for _ in 0..count {
        match generate::generate_random_with_prefix(prefix, length) {
            Some(number) => println!("{}", number),
            None => {
                eprintln!(
                    "Error: length {} leaves no room after prefix {}",
                    length, prefix
                );
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
