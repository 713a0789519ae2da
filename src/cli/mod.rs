mod args;
mod repl;

pub use args::CliArgs;
pub use repl::{
    AppState, BOT_LABEL, FAREWELL, LineSource, PROMPT, ReadOutcome, Turn, WELCOME, handle_line,
    run_repl, run_session,
};
