//! Bookvault CLI application entry point
//!
//! Command-line front end for the Vault: build a search from trope, heat and
//! safety tags, page through results, and print a shareable link or caption.
//!
//! # Usage
//!
//! ```bash
//! # Start a search and refine it step by step
//! bookvault search -i enemies_to_lovers -s guaranteed_hea
//! bookvault search "https://bookshook.com/vault?include=..." -e cheating --sort heat
//!
//! # Browse the taxonomy
//! bookvault tags
//! bookvault tags -c trope
//!
//! # Presets and sharing
//! bookvault preset comfort-read
//! bookvault share "https://bookshook.com/vault?include=..." --hashtags --copy
//!
//! # Member views (needs `session_cookie` in the config)
//! bookvault library -f tbr
//! bookvault heart <book-id>
//!
//! # Quiet mode (only output results)
//! bookvault -q search -i slow_burn
//! ```
//!
//! # Configuration
//!
//! Settings live in the user's config directory
//! (`~/.config/bookvault/config.toml` on Linux) and can be overridden with
//! `BOOKVAULT_*` environment variables.

use bookvault::{
    VaultError,
    api::VaultClient,
    cli::{Cli, Commands},
    commands::{self, Context, member, presets},
    config::VaultConfig,
    output::{OutputWriter, TerminalWriter},
    search::ResultsView,
};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

type Result<T> = std::result::Result<T, VaultError>;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("bookvault=debug")
    } else {
        EnvFilter::from_default_env()
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the parsed command; `Ok(false)` means the command printed a failure
fn run(cli: &Cli, out: &dyn OutputWriter) -> Result<bool> {
    let path = VaultConfig::config_path()?;
    let config = VaultConfig::load_from(&path)?;
    debug!(path = %path.display(), "loaded config");

    let quiet = cli.quiet || config.quiet;

    if let Commands::Config { command } = &cli.command {
        commands::config(command, config, &path, out, quiet)?;
        return Ok(true);
    }

    let client = VaultClient::from_config(&config)?;
    let ctx = Context {
        config: &config,
        out,
        quiet,
    };

    if let Some((kind, args)) = cli.command.interaction() {
        member::interact(&client, kind, args, &ctx)?;
        return Ok(true);
    }

    let view = match &cli.command {
        Commands::Search(args) => commands::search(&client, args, &ctx)?,
        Commands::Preset { id, url } => presets::apply(&client, id, url.as_deref(), &ctx)?,
        Commands::Tags { category } => {
            commands::tags(&client, category.as_deref(), &ctx)?;
            return Ok(true);
        }
        Commands::Presets { url } => {
            presets::list(&client, url.as_deref(), &ctx)?;
            return Ok(true);
        }
        Commands::Share {
            url,
            hashtags,
            copy,
        } => {
            commands::share(&client, url.as_deref(), *hashtags, *copy, &ctx)?;
            return Ok(true);
        }
        Commands::Book { slug } => {
            commands::book(&client, slug, &ctx)?;
            return Ok(true);
        }
        Commands::Library { filter, page } => {
            member::library(&client, *filter, *page, &ctx)?;
            return Ok(true);
        }
        Commands::Recommendations => {
            member::recommendations(&client, &ctx)?;
            return Ok(true);
        }
        Commands::Heart(_) | Commands::Save(_) | Commands::Tbr(_) | Commands::Config { .. } => {
            unreachable!()
        }
    };

    Ok(!matches!(view, ResultsView::Error { .. }))
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    let out = TerminalWriter::new();
    match run(&cli, &out) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            out.error(&e.to_string());
            if let VaultError::ApiError(api) = &e
                && api.is_unauthorized()
            {
                out.info("Sign in on the site and set your cookie: bookvault config set session_cookie '<cookie>'");
            }
            ExitCode::FAILURE
        }
    }
}
