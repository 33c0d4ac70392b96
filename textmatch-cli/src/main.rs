use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use textmatch_core::config::Config;
use textmatch_core::intent::{Intent, IntentRouter};
use textmatch_core::matcher::{MatchReport, MatchResult};
use textmatch_core::sentiment::{Sentiment, Tone};
use textmatch_core::wellbeing::Screening;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "textmatch")]
#[command(about = "Match, score and route short chat messages", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    #[arg(long, global = true, help = "Print results as JSON")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Show current configuration")]
    Show,

    #[command(about = "Find the FAQ question closest to a query")]
    Match {
        #[arg(short, long, help = "Override the configured threshold")]
        threshold: Option<f64>,

        #[arg(long, help = "Print the score of every FAQ question")]
        all: bool,

        #[arg(required = true, help = "Query text")]
        query: Vec<String>,
    },

    #[command(about = "Score the sentiment of a message")]
    Sentiment {
        #[arg(required = true, help = "Message text")]
        text: Vec<String>,
    },

    #[command(about = "Run crisis, theme and mood checks on a message")]
    Screen {
        #[arg(required = true, help = "Message text")]
        text: Vec<String>,
    },

    #[command(about = "Classify a customer-service message")]
    Classify {
        #[arg(required = true, help = "Message text")]
        message: Vec<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Show => show_config(&config, cli.json),
        Commands::Match {
            threshold,
            all,
            query,
        } => match_query(&config, &query.join(" "), threshold, all, cli.json),
        Commands::Sentiment { text } => score_sentiment(&config, &text.join(" "), cli.json),
        Commands::Screen { text } => screen_message(&config, &text.join(" "), cli.json),
        Commands::Classify { message } => classify_message(&config, &message.join(" "), cli.json),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        warn!(path = %config_path.display(), "Config file not found, using defaults");
        return Ok(Config::default());
    }

    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    debug!(path = %config_path.display(), faq = config.faq.len(), "Config loaded");
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}

fn show_config(config: &Config, json: bool) -> Result<()> {
    if json {
        return print_json(config);
    }

    println!("{}", "Current Configuration:".bold().green());
    println!();
    println!("{}", "Matcher:".bold());
    println!("  Threshold:      {}", config.matcher.threshold);
    println!("  FAQ entries:    {}", config.faq.len());
    println!();
    println!("{}", "Sentiment:".bold());
    println!("  Positive words: {}", config.sentiment.positive.len());
    println!("  Negative words: {}", config.sentiment.negative.len());
    println!(
        "  Tone bands:     <= {} negative, >= {} positive",
        config.sentiment.negative_band, config.sentiment.positive_band
    );
    println!("  Strong negative: <= {}", config.sentiment.strong_negative_band);
    println!();
    println!("{}", "Wellbeing:".bold());
    println!("  Crisis phrases: {}", config.wellbeing.crisis_phrases.len());
    let themes: Vec<&str> = config
        .wellbeing
        .themes
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    println!("  Themes:         {}", themes.join(", ").cyan());

    Ok(())
}

#[derive(Serialize)]
struct MatchOutput<'a> {
    query: &'a str,
    threshold: f64,
    #[serde(flatten)]
    report: MatchReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    scores: Vec<f64>,
}

fn match_query(
    config: &Config,
    query: &str,
    threshold: Option<f64>,
    all: bool,
    json: bool,
) -> Result<()> {
    let threshold = threshold.unwrap_or(config.matcher.threshold);
    if !(0.0..=1.0).contains(&threshold) {
        anyhow::bail!("Threshold must be within [0, 1], got {}", threshold);
    }

    let catalog = config.faq_catalog();
    let report = catalog.evaluate(query, threshold);
    let entry = report.result.index().and_then(|i| config.faq.get(i));
    let scores = if all { catalog.scores(query) } else { Vec::new() };

    if json {
        return print_json(&MatchOutput {
            query,
            threshold,
            report,
            question: entry.map(|e| e.question.as_str()),
            answer: entry.map(|e| e.answer.as_str()),
            scores,
        });
    }

    match (report.result, entry) {
        (MatchResult::Match { score, .. }, Some(entry)) => {
            println!(
                "{} {} {}",
                "✓".green().bold(),
                entry.question.bold(),
                format!("(confidence {:.2})", score).dimmed()
            );
            println!("  {}", entry.answer);
        }
        _ => {
            println!(
                "{} No FAQ entry reached {:.2} (best {:.2})",
                "✗".yellow().bold(),
                threshold,
                report.best_score
            );
        }
    }

    for (entry, score) in config.faq.iter().zip(&scores) {
        println!("  {:.3}  {}", score, entry.question);
    }

    Ok(())
}

fn tone_label(tone: Tone) -> String {
    match tone {
        Tone::Negative => "negative".red().to_string(),
        Tone::Neutral => "neutral".normal().to_string(),
        Tone::Positive => "positive".green().to_string(),
    }
}

fn print_sentiment(sentiment: &Sentiment) {
    println!(
        "{}: {:.3} ({})",
        "Sentiment".bold(),
        sentiment.score,
        tone_label(sentiment.tone)
    );
    if sentiment.strong_negative {
        println!("  {}", "strongly negative".red().bold());
    }
    println!(
        "  {} positive, {} negative, {} tokens",
        sentiment.positive, sentiment.negative, sentiment.tokens
    );
}

fn score_sentiment(config: &Config, text: &str, json: bool) -> Result<()> {
    let sentiment = config.sentiment_scorer().analyze(text);
    if json {
        return print_json(&sentiment);
    }
    print_sentiment(&sentiment);
    Ok(())
}

fn print_screening(screening: &Screening) {
    if screening.crisis {
        println!(
            "{} {}",
            "!".red().bold(),
            "Crisis language detected. Point the person to local emergency services.".red()
        );
    }
    print_sentiment(&screening.sentiment);
    println!("{}: {}/10", "Mood".bold(), screening.mood);
    if !screening.themes.is_empty() {
        println!("{}: {}", "Themes".bold(), screening.themes.join(", ").cyan());
    }
}

fn screen_message(config: &Config, text: &str, json: bool) -> Result<()> {
    let screening = config.screener().screen(text);
    if json {
        return print_json(&screening);
    }
    print_screening(&screening);
    Ok(())
}

fn describe_intent(intent: &Intent, config: &Config) -> String {
    match intent {
        Intent::Greeting => "greeting".to_string(),
        Intent::Farewell => "farewell".to_string(),
        Intent::TrackOrder { order: Some(order) } => format!("track order #{}", order),
        Intent::TrackOrder { order: None } => "track order (no order number)".to_string(),
        Intent::Return { order: Some(order) } => format!("return for order #{}", order),
        Intent::Return { order: None } => "return (no order number)".to_string(),
        Intent::Account { reset: true } => "account: password reset".to_string(),
        Intent::Account { reset: false } => "account".to_string(),
        Intent::Pricing => "pricing".to_string(),
        Intent::Troubleshoot { app: true } => "troubleshooting: app".to_string(),
        Intent::Troubleshoot { app: false } => "troubleshooting".to_string(),
        Intent::Billing => "billing".to_string(),
        Intent::HumanAgent => "human agent".to_string(),
        Intent::Faq { index, score } => match config.faq.get(*index) {
            Some(entry) => format!("faq: {} (confidence {:.2})", entry.question, score),
            None => format!("faq #{} (confidence {:.2})", index, score),
        },
        Intent::Unknown { best_score } => format!("unknown (best faq score {:.2})", best_score),
    }
}

fn classify_message(config: &Config, message: &str, json: bool) -> Result<()> {
    let router = IntentRouter::from_config(config).context("Failed to build intent router")?;
    let intent = router.classify(message);

    if json {
        return print_json(&intent);
    }

    println!("{}: {}", "Intent".bold(), describe_intent(&intent, config).cyan());
    if let Intent::Faq { index, .. } = intent {
        if let Some(entry) = config.faq.get(index) {
            println!("  {}", entry.answer);
        }
    }

    Ok(())
}
