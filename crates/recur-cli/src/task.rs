//! Source and destination task records for `recur migrate`.

use std::fmt;

use anyhow::{Context, Result};
use recur_engine::{
    parse_due, parse_due_date, parse_entry_date, parse_priority, quote_whitespace, DueRecord,
    Priority, RecurError, Recurrence, Renames,
};
use serde::{Deserialize, Serialize};

/// Source store task id; older exports use integers, newer ones strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Int(u64),
    Str(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Int(id) => write!(f, "{id}"),
            TaskId::Str(id) => f.write_str(id),
        }
    }
}

/// One task as exported from the source store, one JSON object per line.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceTask {
    pub id: TaskId,
    pub content: String,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub date_added: Option<String>,
    /// Project path, parents joined with `.`.
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub project_id: Option<TaskId>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub due: Option<DueRecord>,
}

fn default_priority() -> u8 {
    1
}

/// Restricts `migrate` to one task and/or one project, matched on the id's
/// printed form so `42` and `"42"` are the same id.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub task_id: Option<String>,
    pub project_id: Option<String>,
}

impl TaskFilter {
    pub fn is_active(&self) -> bool {
        self.task_id.is_some() || self.project_id.is_some()
    }

    pub fn matches(&self, task: &SourceTask) -> bool {
        let task_matches = self
            .task_id
            .as_deref()
            .is_none_or(|id| task.id.to_string() == id);
        let project_matches = self.project_id.as_deref().is_none_or(|id| {
            task.project_id
                .as_ref()
                .is_some_and(|project| project.to_string() == id)
        });
        task_matches && project_matches
    }
}

/// One task ready for the destination store.
#[derive(Debug, Clone, Serialize)]
pub struct MigratedTask {
    pub source_id: TaskId,
    pub description: String,
    pub project: Option<String>,
    pub tags: Vec<String>,
    pub priority: Option<Priority>,
    pub entry: Option<String>,
    pub due: Option<String>,
    pub recur: Option<Recurrence>,
}

/// Field-by-field conversion of a source task.
///
/// Returns the converted task and, separately, the recurrence outcome so the
/// caller can apply its own policy to an unsupported phrase.
pub fn convert(
    task: &SourceTask,
    projects: &Renames,
    tags: &Renames,
) -> Result<(MigratedTask, Result<Option<Recurrence>, RecurError>)> {
    let project = task
        .project
        .as_deref()
        .filter(|p| !p.is_empty())
        .and_then(|p| projects.apply(p))
        .map(|p| quote_whitespace(p).into_owned());

    let tags = task
        .labels
        .iter()
        .filter_map(|label| tags.apply(label))
        .map(str::to_string)
        .collect();

    let priority = parse_priority(task.priority).context("priority")?;
    let entry = match task.date_added.as_deref() {
        Some(date) => parse_entry_date(date).context("date_added")?,
        None => None,
    };
    let due = parse_due_date(task.due.as_ref()).context("due date")?;

    let migrated = MigratedTask {
        source_id: task.id.clone(),
        description: task.content.trim().to_string(),
        project,
        tags,
        priority,
        entry,
        due,
        recur: None,
    };
    Ok((migrated, parse_due(task.due.as_ref())))
}
