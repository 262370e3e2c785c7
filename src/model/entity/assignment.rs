use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    Identified, Ref, ResourceType, ResourceTyped,
    entity::{Module, Student},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub module: Ref<Module>,
    #[serde(default)]
    pub students: Vec<Ref<Student>>,
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ResourceTyped for Assignment {
    fn get_resource_type() -> ResourceType {
        ResourceType::Assignment
    }
}

impl Identified for Assignment {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Assignment {
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_some_and(|due| due < now)
    }

    pub fn module_title(&self) -> Option<&str> {
        self.module.populated().map(|m| m.title.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentCreate {
    pub module_id: String,
    pub student_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
