use serde::{Deserialize, Serialize};

/// Task progress state
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    /// Fixed-width label shown between the brackets, e.g. `[completed]`
    pub fn label(self, display: StatusDisplay) -> &'static str {
        match display {
            StatusDisplay::Icons => match self {
                TaskStatus::Todo => " ",
                TaskStatus::InProgress => "/",
                TaskStatus::Completed => "x",
                TaskStatus::Cancelled => "-",
            },
            StatusDisplay::Text => match self {
                TaskStatus::Todo => "  todo   ",
                TaskStatus::InProgress => " progress",
                TaskStatus::Completed => "completed",
                TaskStatus::Cancelled => "cancelled",
            },
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Glyph drawn before the title, if this priority has one
    pub fn icon(self) -> Option<&'static str> {
        match self {
            Priority::High => Some("▲"),
            Priority::Low => Some("▼"),
            Priority::Medium => None,
        }
    }
}

/// How task status is rendered inside the brackets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatusDisplay {
    #[default]
    Text,
    Icons,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            id: id.into(),
            title: title.into(),
            status: TaskStatus::Todo,
            priority: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }
}

/// The document being laid out: a project with ordered categories of ordered tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Project {
            id: String::new(),
            name: name.into(),
            description: None,
            categories: Vec::new(),
        }
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn task(&self, category: usize, task: usize) -> Option<&Task> {
        self.categories.get(category)?.tasks.get(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_labels_share_one_width() {
        for status in TaskStatus::ALL {
            assert_eq!(status.label(StatusDisplay::Text).len(), 9, "{status:?}");
            assert_eq!(status.label(StatusDisplay::Icons).len(), 1, "{status:?}");
        }
    }

    #[test]
    fn deserialize_with_defaults() {
        let json = r#"{
            "name": "Roadmap",
            "categories": [
                {"id": "c1", "name": "Feature", "tasks": [
                    {"id": "t1", "title": "Ship it", "status": "in_progress", "priority": "high"},
                    {"id": "t2", "title": "Write docs"}
                ]},
                {"id": "c2", "name": "Fix"}
            ]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.name, "Roadmap");
        assert_eq!(project.categories.len(), 2);
        let t1 = project.task(0, 0).unwrap();
        assert_eq!(t1.status, TaskStatus::InProgress);
        assert_eq!(t1.priority, Some(Priority::High));
        let t2 = project.task(0, 1).unwrap();
        assert_eq!(t2.status, TaskStatus::Todo);
        assert_eq!(t2.priority, None);
        assert!(project.categories[1].tasks.is_empty());
        assert!(project.task(1, 0).is_none());
    }

    #[test]
    fn priority_icons() {
        assert_eq!(Priority::High.icon(), Some("▲"));
        assert_eq!(Priority::Low.icon(), Some("▼"));
        assert_eq!(Priority::Medium.icon(), None);
    }
}
