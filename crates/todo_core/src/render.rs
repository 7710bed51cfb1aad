//! Pure projection from records to render instructions.
//!
//! The rendering collaborator owns the visual output; this module only decides
//! what each list item shows and which style classes it carries.

use crate::model::todo::{Priority, TodoIndex, TodoRecord};
use chrono::NaiveDate;

pub const COMPLETED_CLASS: &str = "completed";

/// One list item to draw. `index` is what a click handler passes back to
/// `TodoStore::toggle_completed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderItem {
    pub index: TodoIndex,
    pub text: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub classes: Vec<&'static str>,
}

pub fn render<'a>(
    records: impl IntoIterator<Item = (TodoIndex, &'a TodoRecord)>,
) -> Vec<RenderItem> {
    records
        .into_iter()
        .map(|(index, record)| RenderItem {
            index,
            text: record.text().to_string(),
            priority: record.priority(),
            due_date: record.due_date(),
            completed: record.is_completed(),
            classes: classes_for(record),
        })
        .collect()
}

fn classes_for(record: &TodoRecord) -> Vec<&'static str> {
    let mut classes = Vec::with_capacity(2);
    if record.is_completed() {
        classes.push(COMPLETED_CLASS);
    }
    classes.push(match record.priority() {
        Priority::High => "priority-high",
        Priority::Low => "priority-low",
    });
    classes
}

/// Plain-text line for terminal output, e.g. `[x]  0 ! Buy milk (due 2026-11-02)`.
pub fn render_line(item: &RenderItem) -> String {
    let check = if item.completed { "[x]" } else { "[ ]" };
    let marker = match item.priority {
        Priority::High => '!',
        Priority::Low => ' ',
    };
    let mut line = format!("{check} {:>2} {marker} {}", item.index.0, item.text);
    if let Some(due) = item.due_date {
        line.push_str(&format!(" (due {due})"));
    }
    line
}
