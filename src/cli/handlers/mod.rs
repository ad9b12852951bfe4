mod shell;
pub use shell::{ShellError, ShellOutcome, execute_line, run_shell, split_line};

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use tracing::info;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{config_io, seed};
use crate::logging;
use crate::model::config::Config;
use crate::model::view::SortMode;
use crate::session::Session;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config_io::config_path(cli.config.as_deref());
    let config = config_io::read_config(&config_path)?;
    if cli.command.is_some() || logging::tui_logging_requested() {
        logging::init_logging(&config.log.level);
    }

    match cli.command {
        None => {
            let session = open_session(&cli, &config)?;
            crate::tui::run(session)
        }
        Some(ref cmd) => match cmd {
            Commands::View(args) => cmd_view(&cli, &config, args),
            Commands::Shell => cmd_shell(&cli, &config),
            Commands::Config(args) => cmd_config(config_path, &config, args, cli.json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the session every front end starts from: config defaults, the
/// optional seed, and the optional `--today` override.
pub fn open_session(cli: &Cli, config: &Config) -> Result<Session, Box<dyn std::error::Error>> {
    let store = seed::load_store(cli.seed.as_deref())?;
    let mut session = Session::new(store, config);
    session.today_override = cli.today;
    info!(tasks = session.tasks().len(), sort = %session.sort, "session started");
    Ok(session)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_view(cli: &Cli, config: &Config, args: &ViewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(cli, config)?;
    if let Some(sort) = &args.sort {
        let mode: SortMode = sort.parse()?;
        session.set_sort(mode);
    }
    if let Some(query) = &args.search {
        session.set_query(query.as_str());
    }

    let groups = session.groups();
    if cli.json {
        let json = view_to_json(&groups, session.sort, &session.query);
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        for line in format_view(
            &groups,
            session.sort,
            &session.settings,
            session.tasks().len(),
        ) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_shell(cli: &Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = open_session(cli, config)?;
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut stdout = io::stdout();
    run_shell(&mut session, stdin.lock(), &mut stdout, prompt, cli.json)?;
    Ok(())
}

fn cmd_config(
    path: PathBuf,
    config: &Config,
    args: &ConfigCmd,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match &args.action {
        None | Some(ConfigAction::Show) => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("# {}", path.display());
                for line in format_settings(&config.ui) {
                    println!("{}", line);
                }
                println!("sort: {}", config.view.sort);
                println!("log-level: {}", config.log.level);
            }
            Ok(())
        }
        Some(ConfigAction::Set { key, value }) => {
            let mut doc = config_io::read_config_doc(&path)?;
            config_io::set_config_value(&mut doc, key, value)?;
            config_io::write_config_doc(&path, &doc)?;
            info!(key = %key, value = %value, "config updated");
            println!("{} = {}", key, value);
            Ok(())
        }
    }
}
