//! CLI binary for pdf2study.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `StudyConfig`, drives the generation session, and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use pdf2study::{
    export_plain_text, export_text, generate, load_document, markdown, quiz_as_text, ArtifactKind,
    ArtifactView, GeminiClient, GenerateOptions, QuestionType, QuizQuestion, Session,
    StudyConfig, SummaryLength,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summary of a local PDF (plain text to stdout)
  pdf2study paper.pdf

  # Detailed summary
  pdf2study --length detailed paper.pdf

  # 4-week strategy plan
  pdf2study --artifact strategy paper.pdf

  # Generate everything and export {summary,strategy,quiz}.txt
  pdf2study --artifact all -o ./out paper.pdf

  # Take the quiz interactively in the terminal
  pdf2study --artifact quiz --take-quiz paper.pdf

  # Rendered HTML fragments instead of plain text
  pdf2study --html paper.pdf

  # From a URL
  pdf2study https://arxiv.org/pdf/1706.03762 --artifact summary

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY   Required. API key for the Generative Language API.
  GEMINI_MODEL     Override the model ID (default: gemini-2.5-flash).

SETUP:
  1. Set API key:   export GEMINI_API_KEY=AIza...
  2. Analyze:       pdf2study document.pdf
"#;

/// Generate summaries, study plans, and quizzes from PDF documents.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2study",
    version,
    about = "Generate summaries, 4-week study plans, and quizzes from PDF documents",
    long_about = "Upload a PDF (local file or URL) and derive three study artifacts via the \
Gemini API: a summary at a chosen verbosity, a 4-week learning/action plan, and a short \
mixed-format quiz you can take in the terminal.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path or HTTP/HTTPS URL.
    input: String,

    /// Which artifact to generate: summary, strategy, quiz, or all.
    #[arg(short, long, env = "PDF2STUDY_ARTIFACT", value_enum, default_value = "summary")]
    artifact: ArtifactArg,

    /// Summary verbosity: short, medium, detailed.
    #[arg(short, long, env = "PDF2STUDY_LENGTH", default_value = "medium")]
    length: String,

    /// Gemini model ID.
    #[arg(long, env = "GEMINI_MODEL")]
    model: Option<String>,

    /// Directory to export plain-text artifacts ({kind}.txt) into.
    #[arg(short, long, env = "PDF2STUDY_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Print rendered HTML fragments instead of plain text.
    #[arg(long, env = "PDF2STUDY_HTML")]
    html: bool,

    /// Print raw structured output (markdown / quiz JSON).
    #[arg(long, env = "PDF2STUDY_JSON")]
    json: bool,

    /// Answer the generated quiz interactively and get a score.
    #[arg(long)]
    take_quiz: bool,

    /// Sampling temperature (0.0–2.0).
    #[arg(long, env = "PDF2STUDY_TEMPERATURE")]
    temperature: Option<f32>,

    /// Disable the progress spinner.
    #[arg(long, env = "PDF2STUDY_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2STUDY_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and results.
    #[arg(short, long, env = "PDF2STUDY_QUIET")]
    quiet: bool,

    /// HTTP download timeout in seconds (URL inputs).
    #[arg(long, env = "PDF2STUDY_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ArtifactArg {
    Summary,
    Strategy,
    Quiz,
    All,
}

impl ArtifactArg {
    fn kinds(self) -> Vec<ArtifactKind> {
        match self {
            ArtifactArg::Summary => vec![ArtifactKind::Summary],
            ArtifactArg::Strategy => vec![ArtifactKind::Strategy],
            ArtifactArg::Quiz => vec![ArtifactKind::Quiz],
            ArtifactArg::All => ArtifactKind::ALL.to_vec(),
        }
    }
}

fn spinner(message: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(std::time::Duration::from_millis(80));
    bar
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config & client (missing credential fails fast here) ───────
    let mut builder = StudyConfig::builder().download_timeout_secs(cli.download_timeout);
    if let Some(ref model) = cli.model {
        builder = builder.model(model.clone());
    }
    if let Some(t) = cli.temperature {
        builder = builder.temperature(t);
    }
    let config = builder.build().context("Invalid configuration")?;
    let client = GeminiClient::from_config(&config).context("Provider not configured")?;

    let show_progress = !cli.quiet && !cli.no_progress;

    // ── Load & extract the document ──────────────────────────────────────
    let mut session = Session::new();
    session.begin_parsing();

    let bar = spinner("Parsing PDF document…", show_progress);
    let document = match load_document(&cli.input, &config).await {
        Ok(doc) => {
            bar.finish_and_clear();
            session.finish_parsing(doc.clone());
            doc
        }
        Err(e) => {
            bar.finish_and_clear();
            session.fail_parsing(e.to_string());
            return Err(e).context("Failed to load document");
        }
    };

    if !cli.quiet {
        eprintln!(
            "{} {}  {}",
            green("✔"),
            bold(&document.name),
            dim(&format!(
                "{} bytes, {} chars extracted",
                document.byte_size,
                document.extracted_text.len()
            )),
        );
    }

    // ── Generate the requested artifacts concurrently ────────────────────
    // Results are applied to the session in completion order; a failure for
    // one kind never disturbs the others.
    let kinds = cli.artifact.kinds();
    // Unrecognised --length values fall back to medium.
    let summary_length: SummaryLength = cli.length.parse().unwrap_or_default();
    let options = GenerateOptions { summary_length };

    let bar = spinner(
        &format!(
            "Generating {}…",
            kinds
                .iter()
                .map(|k| k.name())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        show_progress,
    );

    let mut in_flight: FuturesUnordered<_> = kinds
        .iter()
        .map(|&kind| {
            session.begin_generation(kind);
            let client = &client;
            let text = document.extracted_text.as_str();
            let options = options;
            async move { (kind, generate(client, text, kind, &options).await) }
        })
        .collect();

    while let Some((kind, outcome)) = in_flight.next().await {
        match outcome {
            Ok(artifact) => {
                bar.println(format!("  {} {kind}", green("✓")));
                session.record_success(artifact);
            }
            Err(e) => {
                bar.println(format!("  {} {kind}  {}", red("✗"), dim(&e.to_string())));
                session.record_failure(kind, e.user_message(kind));
            }
        }
    }
    drop(in_flight);
    bar.finish_and_clear();

    // ── Present / export ─────────────────────────────────────────────────
    let mut any_failed = false;
    for kind in &kinds {
        match kind {
            ArtifactKind::Summary | ArtifactKind::Strategy => {
                let state = if *kind == ArtifactKind::Summary {
                    session.summary()
                } else {
                    session.strategy()
                };
                match state.view() {
                    ArtifactView::Ready(content) => {
                        print_prose(*kind, content, &cli)?;
                        if let Some(ref dir) = cli.output_dir {
                            let path = export_plain_text(dir, *kind, content)
                                .await
                                .with_context(|| format!("Failed to export {kind}"))?;
                            if !cli.quiet {
                                eprintln!("{} wrote {}", green("✔"), bold(&path.display().to_string()));
                            }
                        }
                    }
                    ArtifactView::Failed(msg) => {
                        eprintln!("{} {msg}", red("✘"));
                        any_failed = true;
                    }
                    _ => {}
                }
            }
            ArtifactKind::Quiz => {
                if let Some(msg) = session.quiz().last_error().map(str::to_string) {
                    eprintln!("{} {msg}", red("✘"));
                    any_failed = true;
                } else if let Some(questions) = session.quiz().content().cloned() {
                    present_quiz(&questions, &mut session, &cli)?;
                    if let Some(ref dir) = cli.output_dir {
                        let text = quiz_as_text(&questions);
                        let path = export_text(dir, ArtifactKind::Quiz, &text)
                            .await
                            .context("Failed to export quiz")?;
                        if !cli.quiet {
                            eprintln!("{} wrote {}", green("✔"), bold(&path.display().to_string()));
                        }
                    }
                }
            }
        }
    }

    if any_failed {
        anyhow::bail!("one or more artifacts failed to generate");
    }
    Ok(())
}

/// Print a summary/strategy artifact in the requested representation.
fn print_prose(kind: ArtifactKind, content: &str, cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !cli.quiet {
        eprintln!("{}", cyan(&format!("── {kind} ──")));
    }
    let rendered = if cli.html {
        markdown::render_html(content)
    } else if cli.json {
        content.to_string()
    } else {
        markdown::to_plain_text(content)
    };
    writeln!(out, "{rendered}").context("Failed to write to stdout")?;
    Ok(())
}

/// Print the quiz, and run the interactive answer/grade loop when asked.
fn present_quiz(questions: &[QuizQuestion], session: &mut Session, cli: &Cli) -> Result<()> {
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(questions).context("Failed to serialise quiz")?
        );
        return Ok(());
    }

    if !cli.take_quiz {
        print!("{}", quiz_as_text(questions));
        return Ok(());
    }

    // ── Interactive mode ─────────────────────────────────────────────────
    let stdin = io::stdin();
    loop {
        for (i, q) in questions.iter().enumerate() {
            println!("\n{} {}", bold(&format!("{}.", i + 1)), q.question);
            if let Some(options) = &q.options {
                for (n, option) in options.iter().enumerate() {
                    println!("   {}) {option}", n + 1);
                }
            }
            let answer = prompt_answer(&stdin, q)?;
            session.quiz_session_mut().select_answer(i, answer);
        }

        // Every question now has a recorded answer, so submission is enabled.
        debug_assert!(session.quiz_session().all_answered(questions.len()));
        let report = session.quiz_session_mut().submit(questions);

        println!(
            "\n{} Your score: {}",
            if report.score == questions.len() {
                green("★")
            } else {
                cyan("◆")
            },
            bold(&format!("{} / {}", report.score, questions.len())),
        );
        for (i, correct) in report.per_question.iter().enumerate() {
            if *correct {
                println!("  {} {}.", green("✓"), i + 1);
            } else {
                println!(
                    "  {} {}.  correct answer: {}",
                    red("✗"),
                    i + 1,
                    questions[i].answer
                );
            }
        }

        print!("\nTry again with the same questions? [y/N] ");
        io::stdout().flush().ok();
        let mut line = String::new();
        stdin.lock().read_line(&mut line).ok();
        if line.trim().eq_ignore_ascii_case("y") {
            session.quiz_session_mut().try_again();
            continue;
        }
        break;
    }
    Ok(())
}

/// Read one answer from stdin. Numeric input selects an option by position;
/// anything else is taken verbatim.
fn prompt_answer(stdin: &io::Stdin, question: &QuizQuestion) -> Result<String> {
    let hint = match question.question_type {
        QuestionType::ShortAnswer => "your answer",
        _ => "option number or text",
    };
    print!("   {} ", dim(&format!("({hint})>")));
    io::stdout().flush().ok();

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("Failed to read answer")?;
    let trimmed = line.trim();

    if let (Ok(n), Some(options)) = (trimmed.parse::<usize>(), &question.options) {
        if n >= 1 && n <= options.len() {
            return Ok(options[n - 1].clone());
        }
    }
    Ok(trimmed.to_string())
}
