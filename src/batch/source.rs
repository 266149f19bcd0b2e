//! Batch input sources
//!
//! Three ways a batch of log lines arrives: a local file, a remote log
//! fetched over HTTP(S), or a paste into the terminal. All of them converge
//! on a buffered line reader so the processor sees a single interface.

use std::fmt;
use std::fmt::Display;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, Cursor, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Content type a remote log server must declare.
const EXPECTED_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a batch of lines comes from
#[derive(Debug, Clone)]
pub enum Source {
    /// Local file, read line by line as UTF-8
    File(PathBuf),
    /// Remote log served over HTTP(S) as UTF-8 plaintext
    Url(String),
    /// Lines pasted into the terminal, terminated by an empty line
    Paste,
}

/// Source-level failures
///
/// Any of these aborts the whole run; they are never tolerated per line.
/// Each HTTP cause maps to its own process exit code.
#[derive(Debug)]
pub enum SourceError {
    /// Local I/O failed (file missing, unreadable, ...)
    Io(io::Error),
    /// Remote server answered with a non-success status
    Status(u16),
    /// Remote server declared a content type other than UTF-8 plaintext
    ContentType(String),
    /// Transport-level HTTP failure (DNS, TLS, connect, ...)
    Transport(Box<ureq::Error>),
}

impl SourceError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            SourceError::ContentType(_) => 2,
            _ => 1,
        }
    }
}

impl std::error::Error for SourceError {}

impl Display for SourceError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SourceError::Io(e) => e.fmt(fmt),
            SourceError::Status(code) => {
                write!(fmt, "failed to fetch logs, status code returned: {}", code)
            }
            SourceError::ContentType(found) => write!(
                fmt,
                "fetched file isn't utf-8 plaintext, content-type: {}",
                found
            ),
            SourceError::Transport(e) => e.fmt(fmt),
        }
    }
}

impl From<io::Error> for SourceError {
    fn from(e: io::Error) -> Self {
        SourceError::Io(e)
    }
}

impl Source {
    /// Opens the source, returning a buffered line reader.
    ///
    /// For URLs the status and content-type gates run here, once, before
    /// any line is handed out; the body is then consumed as a stream rather
    /// than buffered wholesale.
    pub fn open(&self) -> Result<Box<dyn BufRead>, SourceError> {
        match self {
            Source::File(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
            Source::Url(url) => fetch(url),
            Source::Paste => read_paste(),
        }
    }
}

fn fetch(url: &str) -> Result<Box<dyn BufRead>, SourceError> {
    let response = match ureq::get(url).timeout(FETCH_TIMEOUT).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(code, _)) => return Err(SourceError::Status(code)),
        Err(e) => return Err(SourceError::Transport(Box::new(e))),
    };

    let content_type = response.header("content-type").unwrap_or_default();
    if content_type != EXPECTED_CONTENT_TYPE {
        return Err(SourceError::ContentType(content_type.to_string()));
    }

    Ok(Box::new(BufReader::new(response.into_reader())))
}

fn read_paste() -> Result<Box<dyn BufRead>, SourceError> {
    println!("Paste your multiline cipher text here:");
    io::stdout().flush()?;

    let mut pasted = String::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.is_empty() {
            break;
        }
        pasted.push_str(&line);
        pasted.push('\n');
    }

    Ok(Box::new(Cursor::new(pasted)))
}
