//! Output sinks
//!
//! Transformed lines go to the console or get appended to a file. A file
//! that already exists forces a one-time conflict decision (overwrite,
//! append or abort), settled before the first line is processed, never per
//! line.

use std::fmt;
use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// What to do when the output file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Truncate the file, then append from empty
    Overwrite,
    /// Keep the existing content and append after it
    Append,
    /// Exit without writing anything
    Abort,
}

impl OverwritePolicy {
    /// Parses an interactive choice: y(es) = overwrite, n(o) = abort,
    /// a(ppend) = append.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim().to_lowercase().as_str() {
            "y" => Some(OverwritePolicy::Overwrite),
            "n" => Some(OverwritePolicy::Abort),
            "a" => Some(OverwritePolicy::Append),
            _ => None,
        }
    }
}

/// Failures while setting up or writing the destination
#[derive(Debug)]
pub enum OutputError {
    /// Output path is a directory
    IsDirectory,
    /// User chose to leave the existing file alone
    Aborted,
    Io(io::Error),
}

impl std::error::Error for OutputError {}

impl Display for OutputError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputError::IsDirectory => "output path is a directory".fmt(fmt),
            OutputError::Aborted => "aborted, output file left untouched".fmt(fmt),
            OutputError::Io(e) => e.fmt(fmt),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

/// Where transformed lines are delivered
pub enum OutputSink {
    /// Print each line to stdout
    Console,
    /// Append each line to an open file
    File(File),
}

impl OutputSink {
    pub fn console() -> Self {
        OutputSink::Console
    }

    /// Opens `path` for appending, resolving an existing-file conflict once.
    ///
    /// `policy` comes from the command line or the config file when given;
    /// otherwise the user is prompted interactively. A missing file needs no
    /// resolution and is simply created.
    pub fn file(path: &Path, policy: Option<OverwritePolicy>) -> Result<OutputSink, OutputError> {
        if path.is_dir() {
            return Err(OutputError::IsDirectory);
        }

        if path.exists() {
            let policy = match policy {
                Some(policy) => policy,
                None => prompt_for_policy()?,
            };
            match policy {
                OverwritePolicy::Abort => return Err(OutputError::Aborted),
                OverwritePolicy::Overwrite => {
                    File::create(path)?;
                }
                OverwritePolicy::Append => {}
            }
        }

        let file = OpenOptions::new().append(true).create(true).open(path)?;
        Ok(OutputSink::File(file))
    }

    /// Emits one output line.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            OutputSink::Console => {
                println!("{}", line);
                Ok(())
            }
            OutputSink::File(file) => writeln!(file, "{}", line),
        }
    }
}

fn prompt_for_policy() -> Result<OverwritePolicy, OutputError> {
    let mut heading = "The file you output to already exists. Would you like to overwrite:";
    loop {
        println!("{}", heading);
        println!("    [Y/y]es: Overwrite file");
        println!("    [N/n]o: Don't overwrite and exit");
        println!("    [A/a]ppend: Append to file");

        let mut choice = String::new();
        if io::stdin().read_line(&mut choice)? == 0 {
            return Err(OutputError::Aborted);
        }
        if let Some(policy) = OverwritePolicy::from_choice(&choice) {
            return Ok(policy);
        }
        heading = "Invalid input. Options are:";
    }
}
