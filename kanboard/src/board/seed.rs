//! Demo projects loaded at startup.

use chrono::NaiveDate;
use kanboard_model::{ColumnId, Label, Project, Task, TaskId};

struct SeedTask {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    assignee: &'static str,
    due: (i32, u32, u32),
    status: &'static str,
    label: Label,
    subtasks: &'static [&'static str],
}

impl SeedTask {
    fn build(&self) -> Task {
        let (y, m, d) = self.due;
        Task {
            id: TaskId::new(self.id),
            title: self.title.to_string(),
            description: self.description.to_string(),
            assignee: self.assignee.to_string(),
            due: NaiveDate::from_ymd_opt(y, m, d),
            status: ColumnId::new(self.status),
            label: self.label,
            subtasks: self.subtasks.iter().map(|s| (*s).to_string()).collect(),
            subtasks_completed: 0,
            comments: Vec::new(),
        }
    }
}

const DASHBOARD: [SeedTask; 4] = [
    SeedTask {
        id: "1",
        title: "Set up authentication UI",
        description: "Create login + register + forgot password screens.",
        assignee: "You",
        due: (2025, 11, 29),
        status: "inprogress",
        label: Label::Medium,
        subtasks: &["Layout", "Input fields", "Validation"],
    },
    SeedTask {
        id: "2",
        title: "Project list screen",
        description: "Show projects and filters",
        assignee: "Dev A",
        due: (2025, 11, 30),
        status: "todo",
        label: Label::Feature,
        subtasks: &[],
    },
    SeedTask {
        id: "3",
        title: "Task comments section",
        description: "Threaded comments feature",
        assignee: "Dev B",
        due: (2025, 11, 25),
        status: "review",
        label: Label::Bug,
        subtasks: &["UI", "API"],
    },
    SeedTask {
        id: "4",
        title: "Deploy build",
        description: "Deploy to Vercel",
        assignee: "You",
        due: (2025, 11, 24),
        status: "done",
        label: Label::Low,
        subtasks: &["Build", "Test", "Deploy"],
    },
];

const STUDENT_PORTAL: [SeedTask; 2] = [
    SeedTask {
        id: "5",
        title: "User interviews",
        description: "Interview 5 students",
        assignee: "UX",
        due: (2025, 12, 1),
        status: "todo",
        label: Label::High,
        subtasks: &["Prepare doc"],
    },
    SeedTask {
        id: "6",
        title: "Wireframes",
        description: "Make Figma mockups",
        assignee: "UX",
        due: (2025, 11, 28),
        status: "inprogress",
        label: Label::Medium,
        subtasks: &[],
    },
];

/// Returns the two demo projects with their sample tasks.
#[must_use]
pub fn demo_projects() -> Vec<Project> {
    let mut dashboard = Project::new("quantum-dashboard", "QuantumBoard · Dashboard");
    dashboard.tasks = DASHBOARD.iter().map(SeedTask::build).collect();

    let mut portal = Project::new("student-portal", "Student Portal Revamp");
    portal.tasks = STUDENT_PORTAL.iter().map(SeedTask::build).collect();

    vec![dashboard, portal]
}

/// Returns a single empty project for starting from a blank board.
#[must_use]
pub fn blank_project() -> Project {
    Project::new("my-board", "My Board")
}
