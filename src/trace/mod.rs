use anyhow::{Result, anyhow, bail};
use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use time::OffsetDateTime;

const TRACE_DIR_NAME: &str = "staybot/traces";

/// Append-only log of one session: load outcome, user input and replies.
/// A disabled trace accepts every call and writes nothing.
pub struct SessionTrace {
    inner: Option<TraceInner>,
}

struct TraceInner {
    writer: RefCell<BufWriter<File>>,
    file_path: PathBuf,
    write_failed: Cell<bool>,
}

impl SessionTrace {
    pub fn create(session_id: &str) -> Result<Self> {
        let trace_dir = resolve_trace_dir_from_env()?;
        Self::create_in_dir(session_id, &trace_dir)
    }

    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn create_in_dir(session_id: &str, trace_dir: &Path) -> Result<Self> {
        fs::create_dir_all(trace_dir).map_err(|err| {
            anyhow!(
                "Failed to create trace directory {}: {err}",
                trace_dir.display()
            )
        })?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_secs());
        let file_name = format!("session-{session_id}-{timestamp}.log");
        let file_path = trace_dir.join(&file_name);
        let file = create_trace_file(&file_path)
            .map_err(|err| anyhow!("Failed to create trace file {}: {err}", file_path.display()))?;

        Ok(Self {
            inner: Some(TraceInner {
                writer: RefCell::new(BufWriter::new(file)),
                file_path,
                write_failed: Cell::new(false),
            }),
        })
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.inner.as_ref().map(|inner| inner.file_path.as_path())
    }

    pub fn log_session(&self, text: &str) {
        self.log_lines("session", text);
    }

    pub fn log_load_ok(&self, dataset: &Path, listings: usize) {
        self.log_single(
            "load.ok",
            &format!("{} ({listings} listings)", dataset.display()),
        );
    }

    pub fn log_load_error(&self, message: &str) {
        self.log_lines("load.err", message);
    }

    pub fn log_user_input(&self, text: &str) {
        self.log_lines("user.in", text);
    }

    pub fn log_reply(&self, text: &str) {
        self.log_lines("bot.out", text);
    }

    pub fn log_query_error(&self, message: &str) {
        self.log_lines("bot.err", message);
    }

    fn log_lines(&self, kind: &str, text: &str) {
        if text.is_empty() {
            self.log_single(kind, "<empty>");
            return;
        }

        for line in text.lines() {
            self.log_single(kind, line);
        }
    }

    fn log_single(&self, kind: &str, text: &str) {
        let Some(inner) = self.inner.as_ref() else {
            return;
        };

        let line = format!("[{}] [{:<11}] {text}\n", current_timestamp(), kind);
        let mut writer = inner.writer.borrow_mut();
        if writer.write_all(line.as_bytes()).is_err() || writer.flush().is_err() {
            inner.report_write_failure("failed to write to trace file");
        }
    }
}

impl TraceInner {
    // Only the first failure is reported; later lines are dropped quietly.
    fn report_write_failure(&self, message: &str) {
        if !self.write_failed.replace(true) {
            eprintln!("staybot trace warning: {message}");
        }
    }
}

#[cfg(unix)]
fn create_trace_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_trace_file(path: &Path) -> std::io::Result<File> {
    File::create(path)
}

fn current_timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
        now.millisecond()
    )
}

pub fn resolve_trace_dir_from_env() -> Result<PathBuf> {
    let xdg_state = env::var("XDG_STATE_HOME").ok();
    let home = dirs::home_dir();
    resolve_trace_dir(xdg_state.as_deref(), home.as_deref())
}

fn resolve_trace_dir(xdg_state_home: Option<&str>, home_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(xdg) = xdg_state_home {
        let trimmed = xdg.trim();
        if trimmed.is_empty() {
            bail!("Failed to resolve trace path: XDG_STATE_HOME is set but empty");
        }
        return Ok(PathBuf::from(trimmed).join(TRACE_DIR_NAME));
    }

    let home = home_dir
        .ok_or_else(|| anyhow!("Failed to resolve trace path: HOME directory is unavailable"))?;
    Ok(home.join(".local/state").join(TRACE_DIR_NAME))
}
