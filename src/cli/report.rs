//! Output of command results.

use std::{fmt, io};
use std::str::FromStr;
use serde::{Serialize, Serializer};


//------------ ReportFormat --------------------------------------------------

/// The format to use when printing the result of a command.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ReportFormat {
    /// Don't print anything. Only the exit code tells what happened.
    None,

    /// Human readable text.
    #[default]
    Text,

    Json,
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, ReportError> {
        match s {
            "none" => Ok(ReportFormat::None),
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(ReportError::UnrecognisedFormat(s.to_string())),
        }
    }
}


//------------ ReportError ---------------------------------------------------

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReportError {
    UnrecognisedFormat(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReportError::UnrecognisedFormat(s) => {
                write!(f, "This report format is not recognised: {}", s)
            }
        }
    }
}

impl std::error::Error for ReportError { }


//------------ Reportable ----------------------------------------------------

/// Something that can be printed as the result of a command.
pub trait Reportable {
    fn text(&self) -> String;
    fn json(&self) -> Result<String, serde_json::Error>;
}

impl<T: fmt::Display + Serialize> Reportable for T {
    fn text(&self) -> String {
        self.to_string()
    }

    fn json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}


//------------ Report --------------------------------------------------------

/// The outcome of a command, ready to be printed.
pub struct Report {
    content: Result<Box<dyn Reportable>, String>,
}

impl Report {
    pub fn new(content: impl Reportable + 'static) -> Self {
        Report { content: Ok(Box::new(content)) }
    }

    pub fn error(err: impl fmt::Display) -> Self {
        Report { content: Err(err.to_string()) }
    }

    pub fn is_err(&self) -> bool {
        self.content.is_err()
    }

    /// Prints the report and returns the exit code for the process.
    ///
    /// Results go to stdout, errors to stderr.
    pub fn report(&self, format: ReportFormat) -> i32 {
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.write(format, &mut stdout.lock(), &mut stderr.lock())
    }

    pub fn write(
        &self,
        format: ReportFormat,
        out: &mut impl io::Write,
        err: &mut impl io::Write,
    ) -> i32 {
        let content = match &self.content {
            Ok(content) => content,
            Err(msg) => {
                let _ = writeln!(err, "Error: {}", msg);
                return 1
            }
        };
        let res = match format {
            ReportFormat::None => return 0,
            ReportFormat::Text => writeln!(out, "{}", content.text()),
            ReportFormat::Json => match content.json() {
                Ok(json) => writeln!(out, "{}", json),
                Err(e) => {
                    let _ = writeln!(err, "Error: cannot format report: {}", e);
                    return 1
                }
            },
        };
        match res {
            Ok(()) => 0,
            Err(_) => 1,
        }
    }
}

impl<T, E> From<Result<T, E>> for Report
where
    T: Reportable + 'static,
    E: fmt::Display,
{
    fn from(res: Result<T, E>) -> Self {
        match res {
            Ok(content) => Report::new(content),
            Err(err) => Report::error(err),
        }
    }
}


//------------ RecordList ----------------------------------------------------

/// A list of records printed one per line.
pub struct RecordList<T> {
    title: &'static str,
    items: Vec<T>,
}

impl<T> RecordList<T> {
    pub fn new(title: &'static str, items: Vec<T>) -> Self {
        RecordList { title, items }
    }
}

impl<T: fmt::Display> fmt::Display for RecordList<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.items.is_empty() {
            return write!(f, "{}: <ninguno>", self.title)
        }
        write!(f, "{}:", self.title)?;
        for item in &self.items {
            write!(f, "\n  {}", item)?;
        }
        Ok(())
    }
}

impl<T: Serialize> Serialize for RecordList<T> {
    fn serialize<S: Serializer>(
        &self, serializer: S
    ) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}


//============ Tests =========================================================
