use anyhow::Context;
use clap::{Parser, Subcommand};
use ordercast::{App, AppConfig, CustomerId, LocationNumber, Prediction, Query, VendorId, CANNOT_PREDICT_MESSAGE};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

/// Order-likelihood predictions from reference tables and a tree model
#[derive(Parser, Debug)]
#[command(name = "ordercast")]
#[command(about = "Predict whether a customer will order from a vendor", long_about = None)]
struct Args {
    /// Directory holding the reference CSV files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Model artifact (JSON, or bincode for .bin files)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// JSON config file; flags given here take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List customer ids
    Customers,
    /// List the location numbers on file for a customer
    Locations { customer: String },
    /// List vendor ids
    Vendors,
    /// Score one customer, location and vendor combination
    Predict {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        vendor: String,
        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,
        /// Also print the assembled feature row
        #[arg(long)]
        show_features: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(model) = args.model {
        config.model_path = Some(model);
    }
    debug!(?config, "configuration resolved");

    let app = App::start(config).context("startup failed")?;

    match args.command {
        Command::Customers => {
            for id in app.customer_ids()? {
                println!("{id}");
            }
        }
        Command::Locations { customer } => {
            for number in app.location_numbers(&CustomerId::new(customer))? {
                println!("{number}");
            }
        }
        Command::Vendors => {
            for id in app.vendor_ids()? {
                println!("{id}");
            }
        }
        Command::Predict {
            customer,
            location,
            vendor,
            json,
            show_features,
        } => {
            let request = PredictRequest {
                customer,
                location,
                vendor,
                json,
                show_features,
            };
            let outcome = run_predict(&app, &request, &mut io::stdout().lock())?;
            return Ok(outcome.into());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Arguments of the `predict` subcommand
#[derive(Debug, Clone)]
struct PredictRequest {
    customer: String,
    location: String,
    vendor: String,
    json: bool,
    show_features: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Predicted,
    CannotPredict,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Predicted => ExitCode::SUCCESS,
            Outcome::CannotPredict => ExitCode::FAILURE,
        }
    }
}

/// Recoverable failures, including an unparseable location number, print the
/// unified message instead of a prediction.
fn run_predict<W: Write>(app: &App, request: &PredictRequest, out: &mut W) -> anyhow::Result<Outcome> {
    let Ok(number) = request.location.parse::<LocationNumber>() else {
        writeln!(out, "{CANNOT_PREDICT_MESSAGE}")?;
        return Ok(Outcome::CannotPredict);
    };
    let query = Query::new(
        CustomerId::new(request.customer.as_str()),
        number,
        VendorId::new(request.vendor.as_str()),
    );
    match app.predict(&query) {
        Ok(prediction) => {
            render(&prediction, request.json, request.show_features, out)?;
            Ok(Outcome::Predicted)
        }
        Err(e) if e.is_recoverable() => {
            writeln!(out, "{}", e.user_message())?;
            Ok(Outcome::CannotPredict)
        }
        Err(e) => Err(e.into()),
    }
}

fn render<W: Write>(prediction: &Prediction, json: bool, show_features: bool, out: &mut W) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(prediction)?)?;
        return Ok(());
    }

    writeln!(out, "{prediction}")?;
    if show_features {
        let row = &prediction.features;
        writeln!(out)?;
        writeln!(out, "{:<18} {}", "customer_id", row.query.customer_id)?;
        writeln!(out, "{:<18} {}", "location_number", row.query.location_number)?;
        writeln!(out, "{:<18} {}", "vendor_id", row.query.vendor_id)?;
        for (name, value) in row.columns() {
            match value {
                Some(v) => writeln!(out, "{name:<18} {v}")?,
                None => writeln!(out, "{name:<18} undefined")?,
            }
        }
    }
    Ok(())
}
