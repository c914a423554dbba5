//! Stay Booking - command-line client
//!
//! Drives the reservation workflow against the marketplace backend.
//!
//! ```sh
//! # Price a stay without touching the backend
//! stay-cli quote --rate 2000 --check-in 2025-06-01 --check-out 2025-06-04
//!
//! # Book a property (uses ~/.config/stay-booking/config.toml)
//! stay-cli book --property 66a1 --check-in 2025-06-01 --check-out 2025-06-04 \
//!     --guests 2 --payment upi
//!
//! # Validate config and print resolved values
//! stay-cli --config ./config.toml check
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use stay_booking::application::{
    open_booking_session, AuthContext, RedirectPolicy, ReservationWorkflow, SubmitOutcome,
};
use stay_booking::config::AppConfig;
use stay_booking::domain::{format_amount, PaymentMethod, PriceBreakdown, StayWindow};
use stay_booking::infrastructure::{FileSessionStore, HttpBackend};
use stay_booking::notifications::{create_event_bus, WorkflowEvent};
use stay_booking::shared::{init_tracing, SystemClock};

#[derive(Parser, Debug)]
#[command(
    name = "stay-cli",
    version,
    about = "Book stays on the rental marketplace from the terminal"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "STAY_BOOKING_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print nights and the price breakdown for a stay.
    Quote {
        /// Nightly rate in whole currency units.
        #[arg(long)]
        rate: i64,
        #[arg(long)]
        check_in: NaiveDate,
        #[arg(long)]
        check_out: NaiveDate,
    },
    /// Validate and submit a booking.
    Book {
        #[arg(long)]
        property: String,
        #[arg(long)]
        check_in: Option<NaiveDate>,
        #[arg(long)]
        check_out: Option<NaiveDate>,
        #[arg(long, default_value_t = 1)]
        guests: i64,
        /// credit, debit or upi
        #[arg(long)]
        payment: Option<String>,
    },
    /// Validate the configuration file and print the resolved values.
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(stay_booking::default_config_path);

    let (config, load_error) = AppConfig::load_or_default(&config_path);

    // ── Apply CLI overrides ────────────────────────────────────
    let config = config.with_log_level(cli.log_level);
    init_tracing(&config);

    match load_error {
        Some(e) if matches!(cli.command, Command::Check) => {
            error!("Invalid configuration in {}: {}", config_path.display(), e);
            return Err(e.into());
        }
        Some(e) => {
            warn!("Failed to load config from {}: {}", config_path.display(), e);
            warn!("Using default configuration.");
        }
        None => info!("Configuration loaded from {}", config_path.display()),
    }

    if matches!(cli.command, Command::Check) {
        println!("Configuration is valid");
        println!("   Config file   : {}", config_path.display());
        println!("   API base URL  : {}", config.api.base_url);
        println!("   Session file  : {}", config.session_path().display());
        println!("   Redirect      : {} after {} ms", config.booking.redirect_path, config.booking.redirect_delay_ms);
        println!("   Currency      : {}", config.display.currency_symbol);
        println!("   Log level     : {}", config.logging.level);
        return Ok(());
    }

    run(cli.command, config).await;
    Ok(())
}

async fn run(command: Command, config: AppConfig) {
    match command {
        Command::Quote {
            rate,
            check_in,
            check_out,
        } => quote(&config, rate, check_in, check_out),
        Command::Book {
            property,
            check_in,
            check_out,
            guests,
            payment,
        } => {
            if let Err(e) = book(&config, &property, check_in, check_out, guests, payment).await {
                error!("Booking failed: {}", e);
                eprintln!("{e}");
            }
        }
        Command::Check => {}
    }
}

fn quote(config: &AppConfig, rate: i64, check_in: NaiveDate, check_out: NaiveDate) {
    let symbol = &config.display.currency_symbol;
    let mut window = StayWindow::new();
    window.set_check_in(check_in);
    window.set_check_out(check_out);

    let nights = window.nights();
    let price = PriceBreakdown::calculate(rate, nights);
    print_breakdown(symbol, rate, nights, &price);
}

fn print_breakdown(symbol: &str, rate: i64, nights: u32, price: &PriceBreakdown) {
    let rate = format_amount(u64::try_from(rate).unwrap_or(0), symbol);
    println!("{rate} x {nights} night(s)");
    println!("   Base price   : {}", format_amount(price.base_price, symbol));
    println!("   Service fee  : {}", format_amount(price.service_fee, symbol));
    println!("   Taxes        : {}", format_amount(price.taxes, symbol));
    println!("   Total        : {}", format_amount(price.total, symbol));
}

async fn book(
    config: &AppConfig,
    property_id: &str,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    guests: i64,
    payment: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let auth = AuthContext::new(Arc::new(FileSessionStore::new(config.session_path())));
    if auth.init().await.is_none() {
        info!("No saved session; booking anonymously");
    }

    let backend = Arc::new(HttpBackend::new(config.api.base_url.clone()).with_auth(auth));
    let property = open_booking_session(backend.as_ref(), property_id).await?;

    let events = create_event_bus();
    let mut subscriber = events.subscribe_property(property.id.clone());
    let redirect = RedirectPolicy::from(&config.booking);
    let workflow = ReservationWorkflow::new(
        &property,
        backend,
        Arc::new(SystemClock),
        events,
        redirect.clone(),
    );

    if let Some(date) = check_in {
        workflow.set_check_in(date).await;
    }
    if let Some(date) = check_out {
        workflow.set_check_out(date).await;
    }
    workflow.set_guests(guests).await;
    workflow
        .set_payment_method(payment.as_deref().and_then(PaymentMethod::parse))
        .await;

    let snapshot = workflow.snapshot().await;
    println!("{} ({} guest(s))", property.title, snapshot.guests);
    print_breakdown(
        &config.display.currency_symbol,
        property.nightly_rate,
        snapshot.nights,
        &snapshot.price,
    );

    match workflow.submit().await {
        SubmitOutcome::Confirmed(record) => {
            println!("Booking confirmed: {}", record.id);
            let wait = redirect.delay + Duration::from_secs(1);
            let redirected = tokio::time::timeout(wait, async {
                while let Some(msg) = subscriber.recv().await {
                    if let WorkflowEvent::RedirectRequested(e) = msg.event {
                        return Some(e.path);
                    }
                }
                None
            })
            .await;
            if let Ok(Some(path)) = redirected {
                println!("Next: {path}");
            }
        }
        SubmitOutcome::Rejected(errors) => {
            for (field, message) in errors.iter() {
                println!("   {field}: {message}");
            }
        }
        SubmitOutcome::Failed(message) => println!("{message}"),
        SubmitOutcome::Ignored => {}
    }
    Ok(())
}
