/// Interactive dashboard for the Indianapolis daily-temperature dataset.
///
/// Synchronous, request-per-interaction: the dataset is loaded once, then
/// every menu selection triggers one full recomputation of the requested
/// aggregation or prediction. Access is gated behind the credential store;
/// rejected dates and failed logins land in the invalid-entries log.

use std::env;
use std::io::{self, Write};
use std::str::FromStr;

use wxdash_service::analysis::{aggregate, regression};
use wxdash_service::auth::{AccessGate, PgCredentialStore};
use wxdash_service::config::Config;
use wxdash_service::dates;
use wxdash_service::ingest::csv;
use wxdash_service::logging::{self, Component};
use wxdash_service::model::PredictionError;
use wxdash_service::render;
use wxdash_service::store::RecordStore;
use wxdash_service::db;

fn main() {
    if let Err(e) = run() {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config_path = env::args().nth(1).unwrap_or_else(|| "wxdash.toml".to_string());
    let config = Config::load(&config_path)?;
    logging::init_logger(config.min_log_level(), config.log_file.as_deref(), false);

    let source = config.dataset_source();
    let rows = csv::load_dataset(&source)?;
    let store = RecordStore::from_rows(rows)?;
    let (first_year, last_year) = store.year_range();
    logging::info(
        Component::Store,
        None,
        &format!(
            "loaded {} observations ({} with readings) covering {}-{}",
            store.len(),
            store.present_readings(),
            first_year,
            last_year
        ),
    );

    let gate = PgCredentialStore::new(db::connect()?);
    gate.ensure_schema()?;

    println!("Indianapolis Weather Data");
    loop {
        println!();
        println!("Menu: [1] Login  [2] Sign Up  [3] Quit");
        match prompt("> ")?.as_str() {
            "1" => {
                let username = prompt("User Name: ")?;
                let password = prompt("Password: ")?;
                if gate.authorize(&username, &password)? {
                    println!("Logged in as {}", username);
                    task_loop(&store, &config)?;
                } else {
                    println!("Incorrect Username/Password");
                    logging::log_failed_login(&username);
                }
            }
            "2" => {
                let username = prompt("Username: ")?;
                let password = prompt("Password: ")?;
                if gate.add_user(&username, &password)? {
                    println!("Account Successfully Created");
                    println!("Navigate to the login menu to proceed");
                } else {
                    println!("That username is already taken");
                }
            }
            "3" | "q" | "quit" => return Ok(()),
            other => println!("Unknown selection '{}'", other),
        }
    }
}

/// Authenticated menu: each selection recomputes from the store.
fn task_loop(store: &RecordStore, config: &Config) -> io::Result<()> {
    loop {
        println!();
        println!(
            "Weather Data: [1] Seasonal  [2] Monthly  [3] Yearly  [4] Prediction  [5] Export JSON  [6] Log Out"
        );
        match prompt("> ")?.as_str() {
            "1" => {
                if let Some(year) = prompt_number::<i32>("Year: ")? {
                    let (first, last) = store.year_range();
                    if year < first || year > last {
                        println!("Note: {} is outside the dataset range {}-{}", year, first, last);
                    }
                    let means = aggregate::seasonal_means(store, year);
                    print!("{}", render::seasonal_table(&means));
                }
            }
            "2" => {
                let table = aggregate::monthly_day_means(store);
                print!("{}", render::monthly_table(&table));
            }
            "3" => {
                let means = aggregate::yearly_means(store);
                print!("{}", render::yearly_table(&means));
            }
            "4" => run_prediction(store, config)?,
            "5" => {
                let (first, last) = store.year_range();
                let export = serde_json::json!({
                    "seasonal": (first..=last)
                        .map(|year| aggregate::seasonal_means(store, year))
                        .collect::<Vec<_>>(),
                    "monthly_by_day": aggregate::monthly_day_means(store),
                    "yearly": aggregate::yearly_means(store),
                });
                match render::to_json(&export) {
                    Ok(json) => println!("{}", json),
                    Err(e) => println!("Export failed: {}", e),
                }
            }
            "6" => return Ok(()),
            other => println!("Unknown selection '{}'", other),
        }
    }
}

/// Prediction flow: validate the date first, then fit. Validation and fit
/// failures are structured rejections, reported and logged, never panics.
fn run_prediction(store: &RecordStore, config: &Config) -> io::Result<()> {
    let Some(day) = prompt_number::<u32>("Day (1-31): ")? else { return Ok(()) };
    let Some(month) = prompt_number::<u32>("Month (1-12): ")? else { return Ok(()) };
    let Some(year) = prompt_number::<i32>(&format!(
        "Year ({}-{}): ",
        config.prediction_years.min, config.prediction_years.max
    ))?
    else {
        return Ok(());
    };

    if let Err(err) = dates::validate(day, month, year, &config.prediction_years) {
        println!("Invalid date: {}", err);
        logging::log_rejected_date(day, month, year, &err);
        return Ok(());
    }

    match regression::predict(store, day, month, year) {
        Ok(result) => print!("{}", render::prediction_summary(&result)),
        Err(err @ PredictionError::InsufficientData { .. }) => {
            println!("Cannot predict: {}", err);
            let samples = regression::collect_samples(store, day, month);
            if !samples.is_empty() {
                println!("Historical readings for {} {}:", render::month_name(month), day);
                for (sample_year, temp) in samples {
                    println!("  {}  {:.1} °F", sample_year, temp);
                }
            }
        }
        Err(err) => {
            println!("Cannot predict: {}", err);
            logging::warn(
                Component::Analysis,
                Some(&format!("{}-{}-{}", year, month, day)),
                &err.to_string(),
            );
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Console input helpers
// ---------------------------------------------------------------------------

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Prompts for a number; a blank or unparseable entry is reported and
/// yields `None` so the caller can return to the menu.
fn prompt_number<T: FromStr>(label: &str) -> io::Result<Option<T>> {
    let entry = prompt(label)?;
    match entry.parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            println!("'{}' is not a number", entry);
            Ok(None)
        }
    }
}
