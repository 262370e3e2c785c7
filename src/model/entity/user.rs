use serde::{Deserialize, Serialize};

use crate::model::{Identified, ResourceType, ResourceTyped};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Student,
    Teacher,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Teacher => write!(f, "teacher"),
        }
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            other => Err(format!("unknown user type `{other}`")),
        }
    }
}

/// Reading preferences. Keys the client does not know about are kept as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_overlay: Option<String>,
    #[serde(default)]
    pub text_to_speech: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_speed: Option<f32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub grade: Option<u8>,
    /// Only present when a teacher looks at their students.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_code: Option<String>,
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default)]
    pub settings: UserSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub settings: UserSettings,
}

impl Identified for Student {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Teacher {
    fn id(&self) -> &str {
        &self.id
    }
}

impl ResourceTyped for Student {
    fn get_resource_type() -> ResourceType {
        ResourceType::Student
    }
}

impl ResourceTyped for Teacher {
    fn get_resource_type() -> ResourceType {
        ResourceType::Teacher
    }
}

/// The signed in user as cached next to the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "userType", rename_all = "lowercase")]
pub enum SessionUser {
    Student(Student),
    Teacher(Teacher),
}

impl SessionUser {
    pub fn user_type(&self) -> UserType {
        match self {
            Self::Student(_) => UserType::Student,
            Self::Teacher(_) => UserType::Teacher,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Student(s) => &s.name,
            Self::Teacher(t) => &t.name,
        }
    }

    pub fn as_student(&self) -> Option<&Student> {
        match self {
            Self::Student(s) => Some(s),
            Self::Teacher(_) => None,
        }
    }
}

impl Identified for SessionUser {
    fn id(&self) -> &str {
        match self {
            Self::Student(s) => &s.id,
            Self::Teacher(t) => &t.id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherRegister {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<u8>,
}
