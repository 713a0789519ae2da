pub mod cli;
pub mod config;
pub mod dataset;
pub mod query;
pub mod trace;

use anyhow::Result;
use cli::{AppState, BOT_LABEL, CliArgs, Turn, WELCOME, handle_line, run_repl};
use config::AppConfig;
use dataset::load_listings;
use std::time::{SystemTime, UNIX_EPOCH};
use trace::SessionTrace;

pub const LOADED_MESSAGE: &str = "Dataset loaded successfully.";

/// Loads the dataset and either answers `--query` once or runs the
/// interactive prompt. A dataset that fails to load is returned as the
/// error before any query is read.
pub fn run(args: CliArgs) -> Result<()> {
    let config = AppConfig::load_with_path(args.config.as_deref())?
        .with_dataset_override(args.dataset.clone());

    let session_id = generate_session_id();
    let trace = if args.no_trace {
        SessionTrace::disabled()
    } else {
        SessionTrace::create(&session_id)?
    };
    trace.log_session(&format!("session {session_id} started"));

    let interactive = args.query.is_none();
    if interactive {
        println!("{WELCOME}");
    }

    let table = load_listings(&config.dataset_path).inspect_err(|err| {
        trace.log_load_error(&err.to_string());
    })?;
    trace.log_load_ok(&config.dataset_path, table.len());

    let state = AppState { table, trace };
    match args.query.as_deref() {
        Some(query) => {
            answer_once(&state, query);
            Ok(())
        }
        None => {
            println!("{LOADED_MESSAGE}");
            run_repl(&state)
        }
    }
}

fn answer_once(state: &AppState, query: &str) {
    if let Turn::Reply(reply) = handle_line(state, query) {
        println!("{BOT_LABEL}{}", reply.trim_end_matches('\n'));
    }
}

fn generate_session_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis());
    format!("{millis:x}-{:x}", std::process::id())
}
