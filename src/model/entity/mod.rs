mod user;
pub use user::{
    ProfileUpdate, SessionUser, Student, StudentCreate, Teacher, TeacherRegister, UserSettings,
    UserType,
};

mod module;
pub use module::{
    ContentItem, Difficulty, Exercise, MediaFile, Module, ModuleCreate, ModuleFilter,
    QuizContent, TextContent, VideoContent,
};

mod question;
pub use question::{AnswerValue, Question, QuestionKind};

mod progress;
pub use progress::{Progress, ProgressStart, ProgressStatus, ProgressUpdate, VideoProgressUpdate};

mod quiz_submission;
pub use quiz_submission::{QuizSubmission, QuizSubmissionCreate, SubmittedAnswer};

mod assignment;
pub use assignment::{Assignment, AssignmentCreate};
