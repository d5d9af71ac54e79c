use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use quizbridge::config::Config;
use quizbridge::pipeline::record::{self, QuizAttempt};
use quizbridge::topics::resolve::{resolve, QuizLabels};
use quizbridge::topics::subjects::SubjectMapper;
use quizbridge::topics::traits::TopicClassifier;

/// Quizbridge: topic classification for quiz attempts.
///
/// Maps free-text quiz, course and question-category names to canonical
/// exam topics and keeps per-user performance counters for each topic.
#[derive(Parser)]
#[command(name = "quizbridge", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// The labels of one quiz, as command-line flags.
#[derive(Args)]
struct LabelArgs {
    /// Quiz name
    #[arg(long)]
    quiz: String,

    /// Course name, tried when the quiz name matches nothing
    #[arg(long)]
    course: Option<String>,

    /// Question category name, tried last (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,
}

impl From<LabelArgs> for QuizLabels {
    fn from(args: LabelArgs) -> Self {
        QuizLabels {
            quiz_name: args.quiz,
            course_name: args.course,
            category_names: args.categories,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Classify one or more labels against the topic catalog
    Classify {
        /// Labels to classify
        #[arg(required = true)]
        labels: Vec<String>,

        /// Also try the fuzzy word match when nothing matches verbatim
        #[arg(long)]
        fuzzy: bool,
    },

    /// Map a quiz name to its broad subject area
    Subject {
        /// The quiz name
        quiz_name: String,
    },

    /// Resolve a quiz's topic from its quiz, course and category names
    Resolve {
        #[command(flatten)]
        labels: LabelArgs,

        #[arg(long)]
        fuzzy: bool,
    },

    /// Record a finished quiz session for a user
    Record {
        /// User identifier on the bot side
        #[arg(long)]
        user: String,

        #[command(flatten)]
        labels: LabelArgs,

        /// Questions answered in the session
        #[arg(long)]
        total: u32,

        /// Questions answered correctly
        #[arg(long)]
        correct: u32,

        #[arg(long)]
        fuzzy: bool,
    },

    /// Re-record a batch of attempts from a JSON file
    Replay {
        /// JSON array of attempts
        file: std::path::PathBuf,

        #[arg(long)]
        fuzzy: bool,
    },

    /// Show a user's per-topic performance
    Report {
        #[arg(long)]
        user: String,
    },

    /// Delete all performance rows for a user
    Reset {
        #[arg(long)]
        user: String,
    },

    /// List the topic catalog in match order
    Catalog {
        /// Print the catalog as JSON (the QUIZBRIDGE_CATALOG file format)
        #[arg(long)]
        json: bool,
    },

    /// List labels that matched no topic
    Unmatched {
        #[arg(long, default_value = "25")]
        limit: u32,
    },

    /// Show system status (DB stats, catalog, unmatched labels)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizbridge=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing quizbridge database...");
            let db = quizbridge::db::initialize_sqlite(&config.db_path)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
        }

        Commands::Classify { labels, fuzzy } => {
            let matcher = config.matcher(fuzzy)?;
            println!();
            let mut detected = 0;
            for label in &labels {
                let found = matcher.classify(label);
                if found.is_some() {
                    detected += 1;
                }
                quizbridge::output::terminal::display_classification(label, found.as_ref());
            }
            println!("\n  Detected: {detected}/{}", labels.len());
        }

        Commands::Subject { quiz_name } => {
            let subject = SubjectMapper::default().subject_for(&quiz_name);
            println!("{}", subject.bold());
        }

        Commands::Resolve { labels, fuzzy } => {
            let matcher = config.matcher(fuzzy)?;
            let labels: QuizLabels = labels.into();
            let resolution = resolve(&matcher, &labels);
            println!();
            quizbridge::output::terminal::display_resolution(resolution.as_ref());
        }

        Commands::Record {
            user,
            labels,
            total,
            correct,
            fuzzy,
        } => {
            let matcher = config.matcher(fuzzy)?;
            let db = quizbridge::db::open_sqlite(&config.db_path)?;

            let attempt = QuizAttempt {
                user_id: user,
                labels: labels.into(),
                total_questions: total,
                correct_answers: correct,
            };

            match record::record_attempt(db.as_ref(), &matcher, &attempt).await? {
                Some(outcome) => {
                    println!("\n{}", "Session recorded.".bold());
                    quizbridge::output::terminal::display_resolution(Some(&outcome.resolution));
                    let p = &outcome.performance;
                    println!(
                        "  Totals:  {}/{} correct ({:.2}%)",
                        p.correct_answers, p.total_questions, p.accuracy
                    );
                }
                None => {
                    println!(
                        "\n{}",
                        "No topic detected; session not recorded.".yellow()
                    );
                    println!(
                        "{}",
                        "The quiz name was added to `quizbridge unmatched`.".dimmed()
                    );
                }
            }
        }

        Commands::Replay { file, fuzzy } => {
            let matcher = config.matcher(fuzzy)?;
            let db = quizbridge::db::open_sqlite(&config.db_path)?;

            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read attempts from {}", file.display()))?;
            let attempts = record::parse_attempts(&json)
                .with_context(|| format!("Invalid attempts file {}", file.display()))?;

            println!("Replaying {} attempts...", attempts.len());
            let summary = record::replay(db.as_ref(), &matcher, &attempts).await?;

            println!("\n{}", "Replay complete.".bold());
            println!("  Recorded:  {}", summary.recorded);
            println!("  Unmatched: {}", summary.unmatched);
            if summary.failed > 0 {
                println!("  {} {}", "Failed:".red(), summary.failed);
            }
            for (topic, count) in &summary.per_topic {
                println!("    {count:>5}  {topic}");
            }
        }

        Commands::Report { user } => {
            let db = quizbridge::db::open_sqlite(&config.db_path)?;
            let rows = db.get_user_performance(&user).await?;
            quizbridge::output::terminal::display_performance(&user, &rows);
        }

        Commands::Reset { user } => {
            let db = quizbridge::db::open_sqlite(&config.db_path)?;
            let removed = db.reset_user(&user).await?;
            println!("Removed {removed} performance rows for {user}.");
        }

        Commands::Catalog { json } => {
            let catalog = config.load_catalog()?;
            if json {
                println!("{}", catalog.to_json()?);
            } else {
                quizbridge::output::terminal::display_catalog(&catalog);
            }
        }

        Commands::Unmatched { limit } => {
            let db = quizbridge::db::open_sqlite(&config.db_path)?;
            let labels = db.get_unmatched(limit).await?;
            quizbridge::output::terminal::display_unmatched(&labels);
        }

        Commands::Status => {
            if !std::path::Path::new(&config.db_path).exists() {
                println!("Database: not initialized");
                println!("\nRun `quizbridge init` to set up the database.");
                return Ok(());
            }
            let db = quizbridge::db::open_sqlite(&config.db_path)?;
            let catalog = config.load_catalog()?;
            let source = match &config.catalog_path {
                Some(path) => path.display().to_string(),
                None => "built-in table".to_string(),
            };
            quizbridge::status::show(&db, &config.db_path, &catalog, &source, config.fuzzy).await?;
        }
    }

    Ok(())
}
