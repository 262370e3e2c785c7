use clap::{Parser, Subcommand};
use lexilearn::auth::Session;
use lexilearn::error::{AppError, AppResult, run_with_error_handler};
use lexilearn::model::Identified;
use lexilearn::model::entity::{
    AnswerValue, ContentItem, Difficulty, ModuleFilter, Progress, SessionUser, UserType,
};
use lexilearn::quiz::{DEFAULT_PASS_THRESHOLD, QuizAttempt};
use lexilearn::video::{ModuleProgressSink, TrackedVideo, VideoProgressTracker};

#[derive(Parser, Debug)]
#[command(about = "Command line client for the LexiLearn reading platform", long_about = None)]
pub struct Cli {
    /// Read `./config.toml` instead of the per-user config
    #[arg(long, global = true, default_value_t = false)]
    pub local: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in
    Login {
        #[command(subcommand)]
        action: LoginCommands,
    },

    /// Forget the saved session
    Logout,

    /// Show the signed in user
    Whoami,

    /// Browse modules
    Modules {
        #[command(subcommand)]
        action: ModuleCommands,
    },

    /// Show and update progress
    Progress {
        #[command(subcommand)]
        action: ProgressCommands,
    },

    /// Take quizzes and look at past results
    Quiz {
        #[command(subcommand)]
        action: QuizCommands,
    },

    /// Watch a module video
    Video {
        #[command(subcommand)]
        action: VideoCommands,
    },

    /// Show assignments
    Assignments {
        #[command(subcommand)]
        action: AssignmentCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum LoginCommands {
    Student {
        /// Secret code handed out by the teacher
        #[arg(long)]
        code: String,
    },
    Teacher {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ModuleCommands {
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        grade: Option<u8>,
    },
    Show {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProgressCommands {
    List {
        /// Student to look at (teachers only), defaults to the signed in student
        #[arg(long)]
        student: Option<String>,
    },
    /// Move to a step of a module (zero based)
    Step {
        #[arg(long)]
        module: String,
        #[arg(long)]
        step: usize,
        /// Seconds spent since the last update
        #[arg(long, default_value_t = 0)]
        time: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum QuizCommands {
    Take {
        #[arg(long)]
        module: String,
        /// Answers in question order, comma separated: zero based option indexes (0 is the first
        /// option) or answer text
        #[arg(long, value_delimiter = ',')]
        answers: Vec<String>,
    },
    History,
}

#[derive(Subcommand, Debug)]
pub enum VideoCommands {
    /// Simulate playback of a video, reporting progress like the player does
    Watch {
        #[arg(long)]
        module: String,
        #[arg(long)]
        video: String,
        /// Video length in seconds, taken from the module when omitted
        #[arg(long)]
        duration: Option<f64>,
        /// Seconds of playback between two progress events
        #[arg(long, default_value_t = 0.25)]
        tick: f64,
    },
}

#[derive(Subcommand, Debug)]
pub enum AssignmentCommands {
    List,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    lexilearn::setup_trace();
    let args = Cli::parse();

    run_with_error_handler(async move || run(args).await).await;
}

async fn run(args: Cli) -> AppResult<()> {
    let client = lexilearn::connect(args.local).await?;

    match args.command {
        Commands::Login { action } => match action {
            LoginCommands::Student { code } => {
                let student = client.auth().student_login(&code).await?;
                println!("Welcome, {}!", student.name);
            }
            LoginCommands::Teacher { email, password } => {
                let teacher = client.auth().teacher_login(&email, &password).await?;
                println!("Welcome, {}!", teacher.name);
            }
        },

        Commands::Logout => {
            client.auth().logout()?;
            println!("Signed out.");
        }

        Commands::Whoami => {
            client.session().require(None)?;
            let user = client.users().profile().await?;
            match &user {
                SessionUser::Student(s) => {
                    println!("{} (student, grade {})", s.name, display_opt(s.grade))
                }
                SessionUser::Teacher(t) => println!("{} <{}> (teacher)", t.name, t.email),
            }
        }

        Commands::Modules { action } => match action {
            ModuleCommands::List { category, difficulty, grade } => {
                client.session().require(None)?;
                let filter = ModuleFilter {
                    category,
                    difficulty,
                    grade_level: grade,
                };
                let modules = client.modules().list(&filter).await?;
                if modules.is_empty() {
                    println!("No modules found.");
                }
                for module in modules {
                    println!(
                        "{}  {} [{} / {} / grade {}] {} steps",
                        module.id,
                        module.title,
                        module.category,
                        module.difficulty,
                        display_opt(module.grade_level),
                        module.total_steps()
                    );
                }
            }
            ModuleCommands::Show { id } => {
                client.session().require(None)?;
                let module = client.modules().get(&id).await?;
                println!("{}\n{}\n", module.title, module.description);
                for (i, item) in module.content.iter().enumerate() {
                    let extra = match item {
                        ContentItem::Video(v) => format!(" (video id {})", v.video_id()),
                        _ => String::new(),
                    };
                    println!("{:>3}. [{}] {}{}", i, item.kind(), item.title(), extra);
                }
                for media in &module.media_files {
                    println!("     media: {} {}", media.filename, media.url);
                }
            }
        },

        Commands::Progress { action } => match action {
            ProgressCommands::List { student } => {
                let session = client.session().require(None)?;
                let student_id = student_for(&session, student)?;
                let records = client.progress().for_student(&student_id).await?;
                if records.is_empty() {
                    println!("No progress yet.");
                }
                for record in records {
                    print_progress(&record);
                }
            }
            ProgressCommands::Step { module, step, time } => {
                let session = client.session().require(Some(UserType::Student))?;
                let student_id = session.user().id().to_string();

                let (module, progress) = tokio::try_join!(
                    client.modules().get(&module),
                    client.progress().get_or_start(&student_id, &module),
                )?;

                let mut progress = progress;
                progress.advance_to(step, module.total_steps());
                progress.add_time(time);
                let saved = client.progress().update(&progress.to_update()).await?;
                print_progress(&saved);
            }
        },

        Commands::Quiz { action } => match action {
            QuizCommands::Take { module, answers } => {
                client.session().require(Some(UserType::Student))?;
                let module = client.modules().get(&module).await?;
                let questions = module.quiz_questions().into_iter().cloned().collect();
                let mut attempt = QuizAttempt::start(&module.id, questions);

                for (position, raw) in answers.iter().enumerate() {
                    let raw = raw.trim();
                    let answer = match raw.parse::<usize>() {
                        Ok(index) => AnswerValue::Index(index),
                        Err(_) => AnswerValue::Text(raw.to_string()),
                    };
                    if !attempt.answer(position, answer) {
                        tracing::warn!("ignoring answer {} beyond the last question", position);
                    }
                }

                let (result, submission) = attempt.finish();
                client.quiz().submit(&submission).await?;
                println!(
                    "{} of {} correct, {}%{}",
                    result.correct,
                    result.total,
                    result.percentage,
                    if result.passed(DEFAULT_PASS_THRESHOLD) { ", passed!" } else { "" }
                );
            }
            QuizCommands::History => {
                let session = client.session().require(Some(UserType::Student))?;
                let submissions = client.quiz().for_student(session.user().id()).await?;
                for s in submissions {
                    println!(
                        "{}  {}%  {}/{}  {}",
                        s.module.populated().map(|m| m.title.as_str()).unwrap_or(s.module.id()),
                        s.percentage,
                        s.correct_answers,
                        s.total_questions,
                        s.submitted_at.map(|t| t.to_rfc3339()).unwrap_or_default()
                    );
                }
            }
        },

        Commands::Video { action } => match action {
            VideoCommands::Watch { module, video, duration, tick } => {
                let session = client.session().require(Some(UserType::Student))?;
                let module = client.modules().get(&module).await?;
                let duration = duration
                    .or_else(|| module.find_video(&video).and_then(|v| v.duration))
                    .unwrap_or(60.0);
                let duration = positive_seconds("duration", duration)?;
                let tick = positive_seconds("tick", tick)?.max(0.01);

                let tracker = VideoProgressTracker::new(
                    &video,
                    session.user().id(),
                    client.session().storage().clone(),
                )?
                .with_on_complete(|| println!("Video complete!"));
                let sink = ModuleProgressSink::new(client.clone(), &module.id);
                let mut player = TrackedVideo::new(tracker, sink);

                let mut position = duration * player.tracker().progress() / 100.0;
                while position < duration {
                    position = (position + tick).min(duration);
                    let update = player.report_playback(position, duration).await?;
                    if let Some(sync) = update.sync {
                        println!("{:>3}% watched", sync.bucket as u32 * 10);
                    }
                }
            }
        },

        Commands::Assignments { action } => match action {
            AssignmentCommands::List => {
                let session = client.session().require(None)?;
                let assignments = match session.user_type() {
                    UserType::Teacher => client.assignments().list().await?,
                    UserType::Student => {
                        client.assignments().for_student(session.user().id()).await?
                    }
                };
                let now = chrono::Utc::now();
                for a in assignments {
                    println!(
                        "{}  {}  due {}{}",
                        a.id,
                        a.module_title().unwrap_or(a.module.id()),
                        a.due_date.map(|d| d.to_rfc3339()).unwrap_or_else(|| "-".into()),
                        if a.is_overdue(now) { " (overdue)" } else { "" }
                    );
                }
            }
        },
    }

    Ok(())
}

/// The student to look at: teachers have to name one, students only see themselves.
fn student_for(session: &Session, requested: Option<String>) -> AppResult<String> {
    match (session.user_type(), requested) {
        (UserType::Student, _) => Ok(session.user().id().to_string()),
        (UserType::Teacher, Some(id)) => Ok(id),
        (UserType::Teacher, None) => Err(AppError::InvalidInput(
            "teachers have to pass --student".to_string(),
        )),
    }
}

/// Playback lengths have to be finite and positive, anything else never reaches the end.
fn positive_seconds(name: &str, value: f64) -> AppResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AppError::InvalidInput(format!(
            "--{name} has to be a positive number of seconds, got {value}"
        )))
    }
}

fn print_progress(progress: &Progress) {
    let title = progress
        .module
        .populated()
        .map(|m| m.title.as_str())
        .unwrap_or(progress.module.id());
    println!(
        "{}  {}  step {}  {:.0}%  {} min",
        title,
        progress.status,
        progress.current_step,
        progress.completion_percentage,
        progress.time_spent / 60
    );
}

fn display_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}
