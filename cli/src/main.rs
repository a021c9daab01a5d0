mod cli;
mod commands;
mod output;

use clap::Parser;
use log::{debug, LevelFilter};
use peywand::error::Result;
use peywand::{config, db, plugin};
use std::process::ExitCode;

fn init_logger(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn run(args: cli::Cli) -> Result<()> {
    let Some(command) = args.command.into_command() else {
        println!("{}", commands::misc::version_string());
        return Ok(());
    };

    // An explicit --config must load; the default location falls back silently
    let cfg = if let Some(config_path) = &args.config {
        config::Config::load_from_path(config_path)?
    } else {
        config::Config::load()
    };

    let db_path = cfg.resolve_db_path(args.db.as_deref());
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    debug!("Using database {}", db_path.display());

    let db = db::PeywandDb::init(&db_path)?;
    let registry = plugin::PluginRegistry::with_builtin_formats()?;

    let ctx = commands::AppContext {
        db: &db,
        config: &cfg,
        registry: &registry,
        color: cfg.color && !args.nc,
    };
    command.execute(&ctx)
}

fn main() -> ExitCode {
    let args = cli::Cli::parse();
    init_logger(args.debug);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_user_error() {
                ExitCode::from(1)
            } else {
                ExitCode::from(2)
            }
        }
    }
}
