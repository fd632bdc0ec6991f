//! Book Catalog CLI
//!
//! Loads a JSON file of book records, validates them and prints them.

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use book_catalog::{
    display, exit_code, load_records, project, CatalogConfig, ErrorPolicy, FieldSelection, RawRecord,
    RecordValidator, ValidationConfig, ValidationReport,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "book-catalog")]
#[command(about = "Validate and inspect JSON book records")]
struct Cli {
    /// JSON file with the records (overrides input.path from the config)
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Config file to load on top of the defaults
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every record and print the results
    Validate {
        /// Keep going after an invalid record and report all of them
        #[arg(long)]
        collect: bool,
        /// Lower-case all text fields before validating
        #[arg(long)]
        lowercase: bool,
    },

    /// List record titles
    Titles,

    /// List every key and value of every record
    Show,

    /// Print a subset of one validated record's fields as JSON
    Project {
        /// Record position in the input (zero-based)
        #[arg(short = 'n', long, default_value_t = 0)]
        index: usize,
        /// Fields to keep (comma separated)
        #[arg(long, value_delimiter = ',', conflicts_with = "exclude")]
        include: Vec<String>,
        /// Fields to drop (comma separated)
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
    },

    /// Validate everything and write a JSON report
    Report {
        /// Output file (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// View or create the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file
    Init {
        /// Output path
        #[arg(short, long, default_value = "catalog.toml")]
        output: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = CatalogConfig::load_from(cli.config.as_deref())?;
    let input = match cli.input.clone() {
        Some(path) => path,
        None => cfg.input_path()?,
    };
    let load = || -> Result<Vec<RawRecord>, Box<dyn std::error::Error>> {
        Ok(load_records(&input)?)
    };

    match cli.command {
        Commands::Validate { collect, lowercase } => {
            let mut validation = cfg.validation.clone();
            if collect {
                validation.error_policy = ErrorPolicy::Collect;
            }
            if lowercase {
                validation.normalize_case = true;
            }

            let records = load()?;
            let run = RecordValidator::new(validation).run(&records);
            let code = exit_code(&run);
            let outcomes = run?;

            for outcome in &outcomes {
                match &outcome.result {
                    Ok(book) => println!("✅ {}: {}", outcome.index, book),
                    Err(e) => println!("❌ {}: {}", outcome.index, e),
                }
            }

            println!();
            if code == 0 {
                println!("✅ {} record(s) valid", outcomes.len());
            } else {
                let invalid = outcomes.iter().filter(|o| !o.is_valid()).count();
                println!("❌ {} of {} record(s) invalid", invalid, outcomes.len());
                std::process::exit(code);
            }
            Ok(())
        }

        Commands::Titles => {
            let records = load()?;
            display::list_titles(&records, &mut std::io::stdout().lock())?;
            Ok(())
        }

        Commands::Show => {
            let records = load()?;
            display::list_keys_values(&records, &mut std::io::stdout().lock())?;
            Ok(())
        }

        Commands::Project { index, include, exclude } => {
            let records = load()?;
            let book = RecordValidator::new(cfg.validation.clone()).validate_at(&records, index)?;

            let selection = if !include.is_empty() {
                FieldSelection::include(include)
            } else if !exclude.is_empty() {
                FieldSelection::exclude(exclude)
            } else {
                FieldSelection::All
            };

            let projected = project(&book, &selection);
            println!("{}", cfg.output.format.to_json(&projected)?);
            Ok(())
        }

        Commands::Report { output } => {
            let records = load()?;
            let validator = RecordValidator::new(ValidationConfig {
                error_policy: ErrorPolicy::Collect,
                ..cfg.validation.clone()
            });
            let outcomes = validator.validate_each(&records);
            let report = ValidationReport::new(input.display().to_string(), &outcomes);
            let report_json = cfg.output.format.to_json(&report)?;

            if let Some(path) = output {
                std::fs::write(&path, &report_json)?;
                println!("✅ Report written to {:?}", path);
            } else {
                println!("{}", report_json);
            }

            if !report.is_clean() {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Config { action } => {
            match action {
                ConfigAction::Show { json } => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&cfg)?);
                    } else {
                        println!("{}", toml::to_string_pretty(&cfg)?);
                    }
                }
                ConfigAction::Init { output } => {
                    CatalogConfig::default().save(&output)?;
                    println!("✅ Created config file: {}", output);
                }
            }
            Ok(())
        }
    }
}
