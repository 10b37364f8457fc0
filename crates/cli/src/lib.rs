pub mod commands;
pub mod seed;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use edulearn_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};
use edulearn_core::EligibilityMode;

use crate::commands::quote::ItemSpec;

#[derive(Debug, Parser)]
#[command(
    name = "edulearn",
    about = "EduLearn course pricing CLI",
    long_about = "Browse the EduLearn catalog and price carts of modules, courses and lessons with add-ons and checkout discounts.",
    after_help = "Examples:\n  edulearn catalog\n  edulearn show 2\n  edulearn quote --item 1:both --item 3 --student --developing-country\n  edulearn config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to an edulearn.toml configuration file")]
    config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        value_parser = parse_eligibility,
        help = "Discount eligibility mode: generic or cart_only"
    )]
    eligibility: Option<EligibilityMode>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List the top-level modules available for purchase")]
    Catalog {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Show the full course and lesson tree of one module")]
    Show {
        #[arg(help = "1-based module number from `edulearn catalog`")]
        module: usize,
    },
    #[command(about = "Build a cart, apply add-ons and price it through checkout")]
    Quote(QuoteArgs),
    #[command(about = "Inspect effective pricing and logging configuration")]
    Config,
}

#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    #[arg(
        long = "item",
        required = true,
        help = "Item path `module[.course[.lesson]]` with optional `:none|practice|mentor|both` add-ons"
    )]
    pub items: Vec<ItemSpec>,
    #[arg(long, default_value = "Guest", help = "Customer name")]
    pub name: String,
    #[arg(long, help = "Customer is a student")]
    pub student: bool,
    #[arg(long, help = "Customer is from a developing country")]
    pub developing_country: bool,
    #[arg(long, help = "Emit machine-readable JSON output")]
    pub json: bool,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let options = LoadOptions {
        require_file: cli.config.is_some(),
        config_path: cli.config.clone(),
        overrides: ConfigOverrides { eligibility: cli.eligibility, ..ConfigOverrides::default() },
    };
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            let result = commands::CommandResult::failure(
                command_name(&cli.command),
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
            println!("{}", result.output);
            return ExitCode::from(result.exit_code);
        }
    };
    init_logging(&config);

    let catalog = seed::default_catalog();
    let result = match cli.command {
        Command::Catalog { json } => commands::catalog::run(&catalog, json),
        Command::Show { module } => commands::show::run(&catalog, module),
        Command::Quote(args) => commands::quote::run(&config, &catalog, &args),
        Command::Config => {
            commands::CommandResult::rendered(commands::config::run(&config, cli.config.as_deref()))
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::WARN);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Catalog { .. } => "catalog",
        Command::Show { .. } => "show",
        Command::Quote(_) => "quote",
        Command::Config => "config",
    }
}

fn parse_eligibility(value: &str) -> Result<EligibilityMode, String> {
    value.parse::<EligibilityMode>().map_err(|error| error.to_string())
}
