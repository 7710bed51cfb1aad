//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical record rendered by list views.
//! - Provide the completion toggle, the only supported mutation.
//!
//! # Invariants
//! - `text` is trimmed and non-empty for every constructed record.
//! - `text`, `priority` and `due_date` are fixed at creation.
//! - A fresh record always starts with `completed == false`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Wire format for due dates (`YYYY-MM-DD`).
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation error for record construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Text is empty after trimming.
    EmptyText,
    /// Priority string is neither `high` nor `low`.
    UnknownPriority(String),
    /// Due date does not match `YYYY-MM-DD`.
    InvalidDueDate(String),
    /// Filter name is not `all`, `completed` or `active`.
    UnknownFilter(String),
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "todo text cannot be empty"),
            Self::UnknownPriority(value) => {
                write!(f, "unknown priority `{value}`; expected high|low")
            }
            Self::InvalidDueDate(value) => {
                write!(f, "invalid due date `{value}`; expected YYYY-MM-DD")
            }
            Self::UnknownFilter(value) => {
                write!(f, "unknown filter `{value}`; expected all|completed|active")
            }
        }
    }
}

impl Error for TodoValidationError {}

/// Record priority. Serialized as lowercase strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Low,
}

impl Priority {
    /// Returns the stable wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TodoValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            _ => Err(TodoValidationError::UnknownPriority(trimmed.to_string())),
        }
    }
}

/// Positional reference to a record.
///
/// The collection is append-only, so an index handed out once keeps
/// pointing at the same record for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TodoIndex(pub usize);

impl Display for TodoIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordFields")]
pub struct TodoRecord {
    text: String,
    priority: Priority,
    #[serde(rename = "dueDate")]
    due_date: Option<NaiveDate>,
    completed: bool,
}

impl TodoRecord {
    /// Creates an active record.
    ///
    /// # Errors
    /// - Returns `EmptyText` when `text` is blank after trimming.
    pub fn new(
        text: impl AsRef<str>,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Result<Self, TodoValidationError> {
        Self::restore(text, priority, due_date, false)
    }

    /// Rebuilds a record from persisted fields, keeping its completion state.
    ///
    /// # Errors
    /// - Returns `EmptyText` when `text` is blank after trimming.
    pub fn restore(
        text: impl AsRef<str>,
        priority: Priority,
        due_date: Option<NaiveDate>,
        completed: bool,
    ) -> Result<Self, TodoValidationError> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(TodoValidationError::EmptyText);
        }

        Ok(Self {
            text: text.to_string(),
            priority,
            due_date,
            completed,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }

    /// Flips the completion flag. Applying it twice is a no-op.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

#[derive(Deserialize)]
struct RecordFields {
    text: String,
    priority: Priority,
    #[serde(default, rename = "dueDate")]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    completed: bool,
}

impl TryFrom<RecordFields> for TodoRecord {
    type Error = TodoValidationError;

    fn try_from(fields: RecordFields) -> Result<Self, Self::Error> {
        Self::restore(fields.text, fields.priority, fields.due_date, fields.completed)
    }
}

/// Completion-state predicate for derived list views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TodoFilter {
    #[default]
    All,
    Completed,
    /// Records with `completed == false`.
    Active,
}

impl TodoFilter {
    pub fn matches(self, record: &TodoRecord) -> bool {
        match self {
            Self::All => true,
            Self::Completed => record.is_completed(),
            Self::Active => record.is_active(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Active => "active",
        }
    }
}

impl Display for TodoFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoFilter {
    type Err = TodoValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "active" | "incomplete" => Ok(Self::Active),
            _ => Err(TodoValidationError::UnknownFilter(trimmed.to_string())),
        }
    }
}

/// Parses a `YYYY-MM-DD` due date. Blank input means no due date.
///
/// # Errors
/// - Returns `InvalidDueDate` for non-blank input that is not a calendar date.
pub fn parse_due_date(value: &str) -> Result<Option<NaiveDate>, TodoValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT)
        .map(Some)
        .map_err(|_| TodoValidationError::InvalidDueDate(trimmed.to_string()))
}
