//! Courtside - handball clip analysis CLI
//!
//! The `courtside` command runs the analysis pipeline, or one of its stages
//! on its own, against a local clip and exercise corpus.
//!
//! ## Commands
//!
//! - `analyze`: Analyze a clip and print feedback plus recommended exercises
//! - `exercises`: Run the exercise selector alone
//! - `sanitize`: Sanitize a recorded classifier response

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn, Level};

use courtside_core::config::DEFAULT_DELAY_MS;
use courtside_core::sanitize::try_sanitize_response;
use courtside_core::{
    select_exercises, AnalysisResult, AnalyzeOptions, Analyzer, AnalyzerConfig, ClassifierConfig,
    DisabledClassifier, ExerciseCorpus, ExerciseRef, Frame, GeminiClassifier, SanitizeOptions,
    ScoredExercise, SelectionRequest, SkillLevel, StaticClassifier, VideoClassifier, METRICS,
};

#[derive(Parser)]
#[command(name = "courtside")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Handball clip analysis and training recommendations", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a clip and recommend exercises
    Analyze {
        /// Path to the video clip
        video: PathBuf,

        /// Still frame extracted from the clip (repeatable, at most 3 are sent)
        #[arg(long = "frame")]
        frames: Vec<PathBuf>,

        /// Fallback skill level when neither the classifier nor the file name gives one
        #[arg(long)]
        level: Option<SkillLevel>,

        /// Exercise corpus JSON file (default: built-in sample corpus)
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Replay a recorded classifier response instead of calling the API
        #[arg(long)]
        response: Option<PathBuf>,

        /// Minimum pacing delay in milliseconds
        #[arg(long, default_value_t = DEFAULT_DELAY_MS.0)]
        min_delay_ms: u64,

        /// Maximum pacing delay in milliseconds
        #[arg(long, default_value_t = DEFAULT_DELAY_MS.1)]
        max_delay_ms: u64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Select exercises for a set of tags
    Exercises {
        /// Comma-separated skill tags, highest priority first
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Desired skill level
        #[arg(long)]
        level: Option<SkillLevel>,

        /// Focus area label, e.g. "Passing"
        #[arg(long)]
        focus: Option<String>,

        /// Number of exercises to return (at most 3)
        #[arg(long, default_value_t = 3)]
        count: usize,

        /// Exercise corpus JSON file (default: built-in sample corpus)
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Print the selection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sanitize a recorded classifier response
    Sanitize {
        /// File containing the raw response text
        file: PathBuf,

        /// Sentences kept per feedback list (default: COURTSIDE_MAX_SENTENCES or 3)
        #[arg(long)]
        max_sentences: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    courtside_core::init_tracing(cli.log_json, level);

    let result = match cli.command {
        Commands::Analyze {
            video,
            frames,
            level,
            corpus,
            response,
            min_delay_ms,
            max_delay_ms,
            json,
        } => {
            let options = AnalyzeOptions::default()
                .with_level(level)
                .with_delay(min_delay_ms, max_delay_ms);
            cmd_analyze(
                &video,
                &frames,
                corpus.as_deref(),
                response.as_deref(),
                &options,
                json,
            )
            .await
        }
        Commands::Exercises {
            tags,
            level,
            focus,
            count,
            corpus,
            json,
        } => {
            let request = SelectionRequest::new(normalize_tags(&tags))
                .with_level(level)
                .with_focus_area(focus)
                .with_count(count);
            cmd_exercises(&request, corpus.as_deref(), json)
        }
        Commands::Sanitize {
            file,
            max_sentences,
        } => cmd_sanitize(&file, max_sentences),
    };

    METRICS.flush();
    result
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn load_corpus(path: Option<&Path>) -> Result<ExerciseCorpus> {
    match path {
        Some(path) => ExerciseCorpus::from_path(path)
            .with_context(|| format!("Failed to load exercise corpus from {:?}", path)),
        None => ExerciseCorpus::builtin().context("Built-in exercise corpus is invalid"),
    }
}

fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Pick the classifier for this run.
///
/// A recorded response always wins and turns external analysis on. Otherwise
/// the HTTP classifier is used when enabled; a missing API key degrades to no
/// AI signal instead of failing the run.
fn build_classifier(
    response: Option<&Path>,
    config: AnalyzerConfig,
) -> Result<(Arc<dyn VideoClassifier>, AnalyzerConfig)> {
    if let Some(path) = response {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read classifier response from {:?}", path))?;
        let classifier: Arc<dyn VideoClassifier> = Arc::new(StaticClassifier::new(text));
        return Ok((classifier, config.with_external_analysis(true)));
    }

    let classifier: Arc<dyn VideoClassifier> = if !config.external_analysis_enabled {
        Arc::new(DisabledClassifier)
    } else {
        match GeminiClassifier::new(ClassifierConfig::from_env()) {
            Ok(classifier) => Arc::new(classifier),
            Err(e) => {
                warn!(error = %e, "classifier unavailable, continuing without AI signal");
                Arc::new(DisabledClassifier)
            }
        }
    };
    Ok((classifier, config))
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct AnalysisReport<'a> {
    video: String,
    analyzed_at: String,
    corpus_digest: &'a str,
    #[serde(flatten)]
    result: &'a AnalysisResult,
}

async fn cmd_analyze(
    video: &Path,
    frame_paths: &[PathBuf],
    corpus: Option<&Path>,
    response: Option<&Path>,
    options: &AnalyzeOptions,
    json: bool,
) -> Result<()> {
    let corpus = Arc::new(load_corpus(corpus)?);
    let (classifier, config) = build_classifier(response, AnalyzerConfig::from_env())?;

    let frames = frame_paths
        .iter()
        .map(|path| Frame::from_path(path))
        .collect::<courtside_core::Result<Vec<_>>>()
        .context("Failed to read frame image")?;

    info!(
        video = %video.display(),
        classifier = classifier.name(),
        frames = frames.len(),
        corpus = %corpus.short_digest(),
        "analyzing clip"
    );

    let analyzer = Analyzer::new(classifier, Arc::clone(&corpus), config);
    let result = analyzer
        .analyze_path(video, frames, options)
        .await
        .with_context(|| format!("Failed to analyze {:?}", video))?;

    if json {
        let report = AnalysisReport {
            video: video.display().to_string(),
            analyzed_at: chrono::Utc::now().to_rfc3339(),
            corpus_digest: corpus.digest(),
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_analysis(&result));
    }
    Ok(())
}

fn render_analysis(result: &AnalysisResult) -> String {
    match result {
        AnalysisResult::Rejected { message } => message.clone(),
        AnalysisResult::Accepted {
            markdown,
            exercises,
            ..
        } => {
            let mut out = markdown.clone();
            if !exercises.is_empty() {
                out.push_str("\n\n### Recommended Exercises\n");
                let lines: Vec<String> = exercises.iter().map(render_exercise_ref).collect();
                out.push_str(&lines.join("\n"));
            }
            out
        }
    }
}

fn render_exercise_ref(exercise: &ExerciseRef) -> String {
    let mut line = format!("- [{}]({})", exercise.title, exercise.url);
    if let Some(minutes) = exercise.duration_minutes {
        line.push_str(&format!(" ({} min)", minutes));
    }
    if let Some(rationale) = &exercise.rationale {
        line.push_str(&format!(": {}", rationale));
    }
    line
}

// ---------------------------------------------------------------------------
// exercises
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SelectionEntry<'a> {
    id: &'a str,
    title: &'a str,
    url: &'a str,
    score: u32,
    matched_tags: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    rationale: Option<String>,
}

impl<'a> From<&'a ScoredExercise<'a>> for SelectionEntry<'a> {
    fn from(s: &'a ScoredExercise<'a>) -> Self {
        Self {
            id: &s.exercise.id,
            title: &s.exercise.title,
            url: &s.exercise.url,
            score: s.score,
            matched_tags: &s.matched_tags,
            rationale: s.rationale(),
        }
    }
}

fn cmd_exercises(request: &SelectionRequest, corpus: Option<&Path>, json: bool) -> Result<()> {
    let corpus = load_corpus(corpus)?;
    let selected = select_exercises(corpus.exercises(), request);

    if json {
        let entries: Vec<SelectionEntry<'_>> = selected.iter().map(SelectionEntry::from).collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if selected.is_empty() {
        println!("No exercises available.");
        return Ok(());
    }
    for s in &selected {
        println!("{:>3}  {:<24} {}", s.score, s.exercise.id, s.exercise.title);
        if let Some(rationale) = s.rationale() {
            println!("     {}", rationale);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// sanitize
// ---------------------------------------------------------------------------

fn cmd_sanitize(file: &Path, max_sentences: Option<usize>) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read classifier response from {:?}", file))?;
    let defaults = AnalyzerConfig::from_env().sanitize;
    let options = SanitizeOptions {
        max_sentences: max_sentences.unwrap_or(defaults.max_sentences),
    };

    match try_sanitize_response(&text, &options) {
        Ok(classification) => {
            println!("{}", serde_json::to_string_pretty(&classification)?);
            Ok(())
        }
        Err(reason) => bail!("Classifier response is unusable: {}", reason),
    }
}
