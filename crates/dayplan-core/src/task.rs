//! Task types supplied by the external task source.
//!
//! The planner treats tasks as read-only input: it filters out completed
//! ones and never writes back. Field names follow the task source's JSON
//! shape (camelCase `dueDate`).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority as supplied by the task source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

/// Optional task difficulty rating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// A task offered for allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Task title
    pub title: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Completed tasks are never offered for allocation.
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            priority: Priority::default(),
            difficulty: None,
            completed: false,
            due_date: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }
}

/// Filter a task list down to allocatable tasks, preserving source order.
pub fn pending(tasks: &[Task]) -> impl Iterator<Item = &Task> {
    tasks.iter().filter(|t| !t.completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_filters_completed_and_keeps_order() {
        let mut done = Task::new("b", "Done already");
        done.completed = true;
        let tasks = vec![Task::new("a", "First"), done, Task::new("c", "Second")];

        let ids: Vec<_> = pending(&tasks).map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn deserializes_task_source_shape() {
        let json = r#"{
            "id": "t1",
            "title": "Write report",
            "priority": "high",
            "difficulty": "hard",
            "completed": false,
            "dueDate": "2026-01-15T00:00:00Z"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.difficulty, Some(Difficulty::Hard));
        assert!(task.due_date.is_some());
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let task: Task = serde_json::from_str(r#"{"id":"t1","title":"Bare"}"#).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.difficulty.is_none());
        assert!(!task.completed);
        assert!(task.due_date.is_none());
    }
}
