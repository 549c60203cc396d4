//! Console message log
//!
//! Bounded log of user-facing messages shown in the application's console
//! panel. Every entry is mirrored to `tracing` so it also lands in the
//! structured log.

use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::fmt;

/// Console message level, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConsoleLevel {
    /// Informational message
    Info,
    /// Something the user should look at
    Warning,
    /// An operation failed
    Error,
}

impl fmt::Display for ConsoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A single console entry.
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl ConsoleMessage {
    pub fn new(level: ConsoleLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    /// `[HH:MM:SS] [LEVEL] text`
    pub fn formatted(&self) -> String {
        format!(
            "[{}] [{}] {}",
            self.timestamp.format("%H:%M:%S"),
            self.level,
            self.text
        )
    }
}

/// Ring buffer of console messages.
#[derive(Debug)]
pub struct ConsoleLog {
    messages: VecDeque<ConsoleMessage>,
    capacity: usize,
}

impl ConsoleLog {
    pub const DEFAULT_CAPACITY: usize = 500;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Appends a message, dropping the oldest one when full.
    pub fn push(&mut self, level: ConsoleLevel, text: impl Into<String>) -> &ConsoleMessage {
        let msg = ConsoleMessage::new(level, text);
        match level {
            ConsoleLevel::Info => tracing::info!(target: "regenesis::console", "{}", msg.text),
            ConsoleLevel::Warning => tracing::warn!(target: "regenesis::console", "{}", msg.text),
            ConsoleLevel::Error => tracing::error!(target: "regenesis::console", "{}", msg.text),
        }

        self.messages.push_back(msg);
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
        // Just pushed, so the deque is non-empty.
        &self.messages[self.messages.len() - 1]
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(ConsoleLevel::Info, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(ConsoleLevel::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(ConsoleLevel::Error, text);
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &ConsoleMessage> {
        self.messages.iter()
    }

    /// Messages at or above `min_level`, oldest first.
    pub fn filtered(&self, min_level: ConsoleLevel) -> Vec<&ConsoleMessage> {
        self.messages
            .iter()
            .filter(|m| m.level >= min_level)
            .collect()
    }

    pub fn last(&self) -> Option<&ConsoleMessage> {
        self.messages.back()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConsoleLog {
    fn default() -> Self {
        Self::new()
    }
}
