use clap::Parser;
use jcard::application::{init, ExportService, MigrateService};
use jcard::cli::{ensure_writable, journal_selector, write_output, Cli, Commands};
use jcard::error::JcardError;
use jcard::infrastructure::{Config, ConfigOverride};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "jcard=debug" } else { "jcard=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(JcardError::UserAbort(_)) => {
            info!("Cancelled by user");
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), JcardError> {
    let config_path = match cli.config_file {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let overrides = ConfigOverride::from_pairs(&cli.config_override)?;

    match cli.command {
        Commands::Init { path, journal } => {
            let registered = init(&config_path, &journal, &path)?;
            println!(
                "Registered journal '{}' at {} in {}",
                journal,
                registered.display(),
                config_path.display()
            );
            Ok(())
        }
        Commands::Export {
            journal,
            file,
            output,
            force,
        } => {
            let config = Config::load(&config_path)?;
            let service = ExportService::new(config, overrides);
            let rendered = service.execute(&journal_selector(journal, file))?;

            if let Some(path) = output.as_deref() {
                ensure_writable(path, force)?;
            }
            write_output(&rendered, output.as_deref())
        }
        Commands::Migrate {
            journal,
            file,
            to,
            force,
        } => {
            let config = Config::load(&config_path)?;
            ensure_writable(&to, force)?;

            let service = MigrateService::new(config, overrides);
            let count = service.execute(&journal_selector(journal, file), &to)?;
            println!("Migrated {} entries to {}", count, to.display());
            Ok(())
        }
    }
}
