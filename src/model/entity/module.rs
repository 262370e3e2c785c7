use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    Identified, ResourceType, ResourceTyped,
    entity::Question,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("unknown difficulty `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub comprehension_questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContent {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub title: String,
    pub url: String,
    /// Length in seconds, when the server knows it.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub comprehension_questions: Vec<Question>,
}

impl VideoContent {
    /// Id used for the local progress keys; the url stands in when the item has no id.
    pub fn video_id(&self) -> &str {
        if self.id.is_empty() { &self.url } else { &self.id }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizContent {
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// One ordered step of a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    Text(TextContent),
    Video(VideoContent),
    Quiz(QuizContent),
}

impl ContentItem {
    pub fn title(&self) -> &str {
        match self {
            Self::Text(c) => &c.title,
            Self::Video(c) => &c.title,
            Self::Quiz(c) => &c.title,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Video(_) => "video",
            Self::Quiz(_) => "quiz",
        }
    }

    /// Quiz questions or the comprehension questions attached to the step.
    pub fn questions(&self) -> &[Question] {
        match self {
            Self::Text(c) => &c.comprehension_questions,
            Self::Video(c) => &c.comprehension_questions,
            Self::Quiz(c) => &c.questions,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    pub filename: String,
    pub url: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub grade_level: Option<u8>,
    #[serde(default)]
    pub content: Vec<ContentItem>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub media_files: Vec<MediaFile>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ResourceTyped for Module {
    fn get_resource_type() -> ResourceType {
        ResourceType::Module
    }
}

impl Identified for Module {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Module {
    pub fn total_steps(&self) -> usize {
        self.content.len()
    }

    pub fn step(&self, index: usize) -> Option<&ContentItem> {
        self.content.get(index)
    }

    /// Questions of every quiz step, in order.
    pub fn quiz_questions(&self) -> Vec<&Question> {
        self.content
            .iter()
            .filter_map(|item| match item {
                ContentItem::Quiz(quiz) => Some(quiz.questions.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn videos(&self) -> impl Iterator<Item = &VideoContent> {
        self.content.iter().filter_map(|item| match item {
            ContentItem::Video(video) => Some(video),
            _ => None,
        })
    }

    pub fn find_video(&self, video_id: &str) -> Option<&VideoContent> {
        self.videos().find(|v| v.video_id() == video_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleCreate {
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<u8>,
    #[serde(default)]
    pub content: Vec<ContentItem>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub is_published: bool,
}

impl From<&Module> for ModuleCreate {
    fn from(module: &Module) -> Self {
        Self {
            title: module.title.clone(),
            description: module.description.clone(),
            category: module.category.clone(),
            difficulty: module.difficulty,
            grade_level: module.grade_level,
            content: module.content.clone(),
            exercises: module.exercises.clone(),
            is_published: module.is_published,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModuleFilter {
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub grade_level: Option<u8>,
}

impl ModuleFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(difficulty) = self.difficulty {
            pairs.push(("difficulty", difficulty.to_string()));
        }
        if let Some(grade) = self.grade_level {
            pairs.push(("gradeLevel", grade.to_string()));
        }
        pairs
    }
}
