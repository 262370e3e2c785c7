use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Session,
    Student,
    Teacher,
    Module,
    Progress,
    QuizSubmission,
    Assignment,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Session => "session",
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Module => "module",
            Self::Progress => "progress",
            Self::QuizSubmission => "quiz submission",
            Self::Assignment => "assignment",
        };
        f.write_str(name)
    }
}

pub trait ResourceTyped {
    fn get_resource_type() -> ResourceType;
}

pub trait Identified {
    fn id(&self) -> &str;
}

/// A reference the API returns either as a bare id or as the populated document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(String),
    Populated(Box<T>),
}

impl<T: Identified> Ref<T> {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Populated(item) => item.id(),
        }
    }

    pub fn populated(&self) -> Option<&T> {
        match self {
            Self::Id(_) => None,
            Self::Populated(item) => Some(item),
        }
    }
}
