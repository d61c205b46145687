//! CLI tool for test card generation.
//!
//! # Usage
//!
//! ```bash
//! # Generate cards from a pattern
//! ccgen generate "434769805926XXXX|10|2029|XXX" --count 5
//!
//! # Export as CSV with a fixed seed
//! ccgen generate 37XXXX -c 3 -o csv --seed 42
//!
//! # Check a number with the Luhn algorithm
//! ccgen luhn 4111111111111111
//!
//! # Detect card brand
//! ccgen detect 378282246310005
//!
//! # Show how a pattern is split into fields
//! ccgen parse "4532********/12/26/123"
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

use cc_generator::batch::partition;
use cc_generator::generate::{brand_for_bin, target_length};
use cc_generator::{
    classify, export_batch, is_valid_luhn, luhn, parse_pattern, BatchGenerator, CardGenerator,
    ExportFormat,
};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ccgen")]
#[command(author, version, about = "Test payment card generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate test cards from a pattern (for testing only)
    Generate {
        /// Pattern such as 4111XXXX|12|28|XXX
        pattern: String,

        /// Number of cards to generate
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Output format
        #[arg(short, long, default_value = "pipe")]
        output: OutputFormat,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Keep a month or year given without the other
        #[arg(long)]
        honor_partial_expiry: bool,

        /// Replace literal CVVs whose length does not fit the brand
        #[arg(long)]
        strict_cvv: bool,
    },

    /// Check if a number passes the Luhn algorithm
    Luhn {
        /// Card number to check
        card_number: String,
    },

    /// Detect card brand from number
    Detect {
        /// Card number (or partial number)
        card_number: String,
    },

    /// Show the fields of a pattern
    Parse {
        /// Pattern to parse
        pattern: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Pipe,
    Json,
    Csv,
    Formatted,
}

impl From<OutputFormat> for ExportFormat {
    fn from(arg: OutputFormat) -> Self {
        match arg {
            OutputFormat::Pipe => ExportFormat::Pipe,
            OutputFormat::Json => ExportFormat::Json,
            OutputFormat::Csv => ExportFormat::Csv,
            OutputFormat::Formatted => ExportFormat::Formatted,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            pattern,
            count,
            output,
            seed,
            honor_partial_expiry,
            strict_cvv,
        } => {
            let generator = CardGenerator::new()
                .honor_partial_expiry(honor_partial_expiry)
                .validate_literal_cvv(strict_cvv);
            cmd_generate(generator, &pattern, count, output.into(), seed);
        }
        Commands::Luhn { card_number } => {
            cmd_luhn(&card_number);
        }
        Commands::Detect { card_number } => {
            cmd_detect(&card_number);
        }
        Commands::Parse { pattern } => {
            cmd_parse(&pattern);
        }
    }
}

fn cmd_generate(
    generator: CardGenerator,
    pattern: &str,
    count: usize,
    format: ExportFormat,
    seed: Option<u64>,
) {
    // Fail fast on a bad pattern instead of reporting it once per record
    if let Err(e) = parse_pattern(pattern) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let batch = BatchGenerator::new(generator);
    let (records, failed) = partition(batch.generate_all(pattern, count, &mut rng));
    for (index, error) in &failed {
        tracing::warn!(index, %error, "skipping card record that failed to generate");
    }

    if records.is_empty() {
        eprintln!("Error: no cards generated");
        std::process::exit(1);
    }

    match export_batch(&records, format) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_luhn(card_number: &str) {
    if is_valid_luhn(card_number) {
        println!("Luhn check: PASS");
        std::process::exit(0);
    } else {
        let digits = luhn::digits_of(card_number);
        if let Some((_, payload)) = digits.split_last() {
            println!("Luhn check: FAIL");
            println!(
                "Expected check digit: {}",
                luhn::generate_check_digit(payload)
            );
        } else {
            eprintln!("Error: No digits provided");
        }
        std::process::exit(1);
    }
}

fn cmd_detect(card_number: &str) {
    let digits = luhn::digits_to_string(&luhn::digits_of(card_number));

    if digits.is_empty() {
        eprintln!("Error: No digits provided");
        std::process::exit(1);
    }

    let brand = classify(&digits);
    println!("Detected Brand: {}", brand.name());
    if brand.is_known() {
        println!("CVV Length: {}", brand.cvv_length());
    }
}

fn cmd_parse(pattern: &str) {
    match parse_pattern(pattern) {
        Ok(parsed) => {
            println!("BIN: {}", parsed.bin());
            println!("Month: {}", parsed.month().unwrap_or("(random)"));
            println!("Year: {}", parsed.year().unwrap_or("(random)"));
            println!("CVV: {}", parsed.cvv().unwrap_or("(random)"));

            let brand = brand_for_bin(parsed.bin());
            if brand.is_known() {
                println!("Brand: {}", brand.name());
                println!("Length: {}", target_length(parsed.bin()));
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
