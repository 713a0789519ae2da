use crate::dataset::ListingTable;
use crate::query::respond;
use crate::trace::SessionTrace;
use anyhow::Result;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use std::io::{self, Write};

pub const WELCOME: &str = "Welcome to the property assistant! Type 'exit' to quit.";
pub const PROMPT: &str = "You: ";
pub const BOT_LABEL: &str = "Bot: ";
pub const FAREWELL: &str = "Goodbye!";

const EXIT_SENTINEL: &str = "exit";

pub struct AppState {
    pub table: ListingTable,
    pub trace: SessionTrace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Exit,
    Reply(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    Interrupted,
    Eof,
}

/// Where the session reads its input from. The interactive prompt uses a
/// line editor; tests feed scripted lines.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

struct EditorSource {
    editor: Editor<(), DefaultHistory>,
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(err.into()),
        }
    }
}

pub fn run_repl(state: &AppState) -> Result<()> {
    let mut source = EditorSource {
        editor: Editor::<(), DefaultHistory>::new()?,
    };
    let mut stdout = io::stdout();
    run_session(state, &mut source, &mut stdout)
}

pub fn run_session<S: LineSource, W: Write>(
    state: &AppState,
    source: &mut S,
    out: &mut W,
) -> Result<()> {
    loop {
        match source.read_line(PROMPT)? {
            ReadOutcome::Line(line) => match handle_line(state, &line) {
                Turn::Exit => break,
                Turn::Reply(reply) => {
                    writeln!(out, "{BOT_LABEL}{}", reply.trim_end_matches('\n'))?;
                    out.flush()?;
                }
            },
            // Ctrl-C drops the current line only.
            ReadOutcome::Interrupted => continue,
            ReadOutcome::Eof => break,
        }
    }

    writeln!(out, "{FAREWELL}")?;
    out.flush()?;
    state.trace.log_session("session ended");
    Ok(())
}

/// Runs one line through the query pipeline.
pub fn handle_line(state: &AppState, line: &str) -> Turn {
    reply_to(&state.trace, line, |utterance| {
        Ok(respond(&state.table, utterance))
    })
}

// A failed answer becomes the reply so the session keeps going.
fn reply_to<F>(trace: &SessionTrace, line: &str, answer: F) -> Turn
where
    F: FnOnce(&str) -> Result<String>,
{
    trace.log_user_input(line);

    if is_exit(line) {
        return Turn::Exit;
    }

    match answer(line) {
        Ok(reply) => {
            trace.log_reply(&reply);
            Turn::Reply(reply)
        }
        Err(err) => {
            let message = format!("An error occurred: {err}");
            trace.log_query_error(&message);
            Turn::Reply(message)
        }
    }
}

fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(EXIT_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::{
        AppState, LineSource, ReadOutcome, Turn, handle_line, is_exit, reply_to, run_session,
    };
    use crate::dataset::{Listing, ListingTable, Price};
    use crate::query::{HELP_MESSAGE, NO_MATCH_MESSAGE};
    use crate::trace::SessionTrace;
    use anyhow::{Result, anyhow};
    use std::collections::VecDeque;
    use std::fs;

    struct ScriptedSource {
        outcomes: VecDeque<ReadOutcome>,
        prompts: Vec<String>,
    }

    impl ScriptedSource {
        fn lines(lines: &[&str]) -> Self {
            Self::outcomes(
                lines
                    .iter()
                    .map(|line| ReadOutcome::Line((*line).to_string()))
                    .collect(),
            )
        }

        fn outcomes(outcomes: Vec<ReadOutcome>) -> Self {
            Self {
                outcomes: outcomes.into(),
                prompts: Vec::new(),
            }
        }
    }

    impl LineSource for ScriptedSource {
        fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
            self.prompts.push(prompt.to_string());
            Ok(self.outcomes.pop_front().unwrap_or(ReadOutcome::Eof))
        }
    }

    fn state() -> AppState {
        let listing = |location: &str, price: f64, description: &str| {
            Listing::new(location, Price::new(price).expect("price"), description)
        };
        AppState {
            table: ListingTable::new(vec![
                listing("Paris", 150.0, "Studio"),
                listing("Paris", 300.0, "Loft"),
            ]),
            trace: SessionTrace::disabled(),
        }
    }

    fn transcript(state: &AppState, source: &mut ScriptedSource) -> String {
        let mut out = Vec::new();
        run_session(state, source, &mut out).expect("session runs");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn exit_sentinel_is_case_insensitive() {
        assert!(is_exit("exit"));
        assert!(is_exit("EXIT"));
        assert!(is_exit("  Exit \n"));
        assert!(!is_exit("exit now"));
        assert!(!is_exit("quit"));
    }

    #[test]
    fn exit_stops_before_the_pipeline_runs() {
        let state = state();
        assert_eq!(handle_line(&state, "ExIt"), Turn::Exit);

        let mut source = ScriptedSource::lines(&["eXiT", "find a property"]);
        let output = transcript(&state, &mut source);
        assert_eq!(output, "Goodbye!\n");
        assert_eq!(source.outcomes.len(), 1, "line after exit must not be read");
    }

    #[test]
    fn session_prints_labelled_replies_until_exit() {
        let state = state();
        let mut source = ScriptedSource::lines(&[
            "hello",
            "Find a property in paris under 200",
            "find a property under 10",
            "exit",
        ]);

        let output = transcript(&state, &mut source);
        assert_eq!(
            output,
            format!(
                "Bot: {HELP_MESSAGE}\n\
                 Bot: Here are some available properties:\n\
                 - Studio in Paris for $150\n\
                 Bot: {NO_MATCH_MESSAGE}\n\
                 Goodbye!\n"
            )
        );
        assert!(source.prompts.iter().all(|prompt| prompt == "You: "));
        assert_eq!(source.prompts.len(), 4);
    }

    #[test]
    fn failed_answers_become_the_reply() {
        let dir = tempfile::tempdir().expect("tempdir");
        let trace = SessionTrace::create_in_dir("test", dir.path()).expect("trace");

        let turn = reply_to(&trace, "find a property", |_| {
            Err(anyhow!("listing index unavailable"))
        });
        assert_eq!(
            turn,
            Turn::Reply("An error occurred: listing index unavailable".to_string())
        );

        let turn = reply_to(&trace, "exit", |_| Err(anyhow!("never asked")));
        assert_eq!(turn, Turn::Exit);

        let content = fs::read_to_string(trace.file_path().expect("enabled trace")).expect("read");
        assert!(content.contains("[bot.err    ] An error occurred: listing index unavailable"));
        assert!(!content.contains("never asked"));
    }

    #[test]
    fn huge_price_bounds_are_answered_normally() {
        let state = state();
        let mut source = ScriptedSource::lines(&[
            "find 99999999999999999999999",
            "find a property under 200",
        ]);

        let output = transcript(&state, &mut source);
        assert!(output.starts_with(
            "Bot: Here are some available properties:\n\
             - Studio in Paris for $150\n\
             - Loft in Paris for $300\n"
        ));
        assert!(!output.contains("An error occurred"));
        assert!(output.ends_with("- Studio in Paris for $150\nGoodbye!\n"));
    }

    #[test]
    fn interrupt_keeps_the_session_and_eof_ends_it() {
        let state = state();
        let mut source = ScriptedSource::outcomes(vec![
            ReadOutcome::Interrupted,
            ReadOutcome::Line("hello".to_string()),
            ReadOutcome::Eof,
            ReadOutcome::Line("never read".to_string()),
        ]);

        let output = transcript(&state, &mut source);
        assert_eq!(output, format!("Bot: {HELP_MESSAGE}\nGoodbye!\n"));
    }

    #[test]
    fn session_is_recorded_in_trace() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut state = state();
        state.trace = SessionTrace::create_in_dir("test", dir.path()).expect("trace");
        let mut source = ScriptedSource::lines(&["find a property in paris", "exit"]);

        transcript(&state, &mut source);

        let content =
            fs::read_to_string(state.trace.file_path().expect("enabled trace")).expect("read");
        assert!(content.contains("[user.in    ] find a property in paris"));
        assert!(content.contains("[bot.out    ] - Loft in Paris for $300"));
        assert!(content.contains("[user.in    ] exit"));
        assert!(content.contains("[session    ] session ended"));
    }
}
