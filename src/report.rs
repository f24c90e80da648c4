use std::path::PathBuf;

/// How one file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Stamped { output: PathBuf, date: String },
    Failed { reason: String },
}

/// Receives status events while a batch runs.
pub trait Reporter {
    fn info(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn error(&mut self, message: &str);
    fn file_done(&mut self, file_name: &str, status: &FileStatus);
}

/// Prints glyph-prefixed lines for a person watching the terminal.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&mut self, message: &str) {
        println!("ℹ {}", message);
    }

    fn warn(&mut self, message: &str) {
        println!("  ⚠ {}", message);
    }

    fn error(&mut self, message: &str) {
        eprintln!("✗ {}", message);
    }

    fn file_done(&mut self, file_name: &str, status: &FileStatus) {
        match status {
            FileStatus::Stamped { date, .. } => println!("  ✓ {} [{}]", file_name, date),
            FileStatus::Failed { reason } => eprintln!("  ✗ {}: {}", file_name, reason),
        }
    }
}

/// Event captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Info(String),
    Warn(String),
    Error(String),
    FileDone(String, FileStatus),
}

/// Keeps every event in memory; used to inspect a run without a terminal.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<Event>,
}

impl RecordingReporter {
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|event| match event {
            Event::Warn(message) => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn finished(&self) -> impl Iterator<Item = (&str, &FileStatus)> {
        self.events.iter().filter_map(|event| match event {
            Event::FileDone(name, status) => Some((name.as_str(), status)),
            _ => None,
        })
    }
}

impl Reporter for RecordingReporter {
    fn info(&mut self, message: &str) {
        self.events.push(Event::Info(message.to_string()));
    }

    fn warn(&mut self, message: &str) {
        self.events.push(Event::Warn(message.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.events.push(Event::Error(message.to_string()));
    }

    fn file_done(&mut self, file_name: &str, status: &FileStatus) {
        self.events
            .push(Event::FileDone(file_name.to_string(), status.clone()));
    }
}
