use crate::infra::{answer_set, build_services, load_engine, parse_answer, AnswerArg};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use std::sync::Arc;
use weaver_core::config::AppConfig;
use weaver_core::error::AppError;
use weaver_core::journal::{
    Activity, EntrySubmission, InMemoryJournal, JournalAnswers, JournalService, Period,
    PeriodDigest, StyleMode,
};
use weaver_core::preference::{AnswerSet, BuiltinModel, PreferenceEngine, Recommendation};
use weaver_core::sampling::{DailyPick, DailyPicker, HistoryPolicy, InMemoryHistoryStore};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Answer as question=choice; separate multi-select choices with commas
    #[arg(long = "answer", value_parser = parse_answer)]
    pub(crate) answers: Vec<AnswerArg>,
    /// Date used for the title of the day (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Pick a title of the day per primary genre and record it in the history file
    #[arg(long)]
    pub(crate) pick: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PromptArgs {
    /// Date of the question (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DigestArgs {
    /// week, month, or year. Prints every period when omitted.
    #[arg(long, value_parser = crate::infra::parse_period)]
    pub(crate) period: Option<Period>,
}

pub(crate) fn run_quiz_questions() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = load_engine(config.models.quiz.as_deref(), BuiltinModel::MovieQuiz)?;

    println!("{} questions", engine.model().name());
    for question in engine.model().catalog().questions() {
        let kind = if question.multiple { " (multiple)" } else { "" };
        println!("- {}{}: {}", question.id, kind, question.prompt);
        for choice in &question.choices {
            println!("    * {}", choice);
        }
    }
    Ok(())
}

pub(crate) fn run_quiz_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        answers,
        date,
        pick,
    } = args;

    let config = AppConfig::load()?;
    let answers = answer_set(&answers);

    if pick {
        let services = build_services(&config)?;
        let recommendation = services.quiz.engine.evaluate(&answers);
        render_recommendation(&recommendation);

        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let picks =
            services
                .quiz
                .engine
                .daily_picks(&recommendation.ranking, date, &services.quiz.picker);
        render_picks(&picks);
    } else {
        let engine = load_engine(config.models.quiz.as_deref(), BuiltinModel::MovieQuiz)?;
        render_recommendation(&engine.evaluate(&answers));
    }

    Ok(())
}

pub(crate) fn run_journal_prompt(args: PromptArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let services = build_services(&config)?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    match services.journal.question_of_the_day(date) {
        Some(pick) => println!("{} | {}", pick.date, pick.item),
        None => println!("No special questions configured"),
    }
    Ok(())
}

pub(crate) fn run_journal_digest(args: DigestArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let services = build_services(&config)?;

    let digests = match args.period {
        Some(period) => services.journal.digest(period)?.into_iter().collect(),
        None => services.journal.digests()?,
    };

    if digests.is_empty() {
        println!("No journal entries recorded yet");
    }
    for digest in &digests {
        render_digest(digest);
    }
    Ok(())
}

/// End-to-end walkthrough on in-memory storage so nothing touches the data directory.
pub(crate) fn run_demo() -> Result<(), AppError> {
    let today = Local::now().date_naive();
    let picker = Arc::new(DailyPicker::new(
        Arc::new(InMemoryHistoryStore::default()),
        HistoryPolicy::default(),
    ));
    let quiz = PreferenceEngine::builtin(BuiltinModel::MovieQuiz)?;

    println!("Daily Weaver demo");
    let scenarios = [
        (
            "Quiet night in",
            AnswerSet::new()
                .select("q1", "집에서 휴식")
                .select("q2", "혼자 있기"),
        ),
        (
            "Date with friends",
            AnswerSet::new()
                .select("q1", "친구와 외출")
                .select("q2", "연인과 함께"),
        ),
        (
            "Big spectacle",
            AnswerSet::new()
                .select("q1", "새로운 곳 여행")
                .select_many("q3", ["화려한 볼거리", "상상력"]),
        ),
    ];
    for (label, answers) in &scenarios {
        println!("\n{label}");
        let recommendation = quiz.evaluate(answers);
        render_recommendation(&recommendation);
        render_picks(&quiz.daily_picks(&recommendation.ranking, today, &picker));
    }

    println!("\nDrama titles for the coming week (no repeats within the window)");
    let (_, quiet_night) = &scenarios[0];
    let ranking = quiz.rank(&quiz.score(quiet_night));
    for offset in 1..=7 {
        let date = today + Duration::days(offset);
        for pick in quiz.daily_picks(&ranking, date, &picker) {
            let marker = if pick.fallback { " (pool exhausted)" } else { "" };
            println!("  - {} {}{}", pick.date, pick.item, marker);
        }
    }

    println!("\nJournal entry");
    let journal = JournalService::new(
        Arc::new(InMemoryJournal::default()),
        picker,
        PreferenceEngine::builtin(BuiltinModel::DailyMood)?,
    );
    let entry = journal.submit(
        EntrySubmission {
            style_mode: StyleMode::CloseFriend,
            answers: JournalAnswers {
                emoji: Some("평온".to_string()),
                activities: vec![Activity::Rest, Activity::Creating],
                one_word: "여유".to_string(),
                moment: "창밖으로 본 노을".to_string(),
                growth: "천천히 해도 괜찮다".to_string(),
                special: "따뜻한 차".to_string(),
            },
        },
        Local::now().naive_local(),
    )?;
    if let Some(question) = &entry.special_question {
        println!("- Special question: {question}");
    }
    if let Some(mood) = &entry.mood {
        println!("- Mood: {}", mood.rationale);
        if let Some(song) = &mood.song {
            println!("- Song of the day: {song}");
        }
    }
    for digest in journal.digests()? {
        render_digest(&digest);
    }

    Ok(())
}

fn render_recommendation(recommendation: &Recommendation) {
    let ranking = &recommendation.ranking;
    println!("- Model: {}", recommendation.model);
    println!("- Rationale: {}", recommendation.rationale);
    if ranking.blended {
        println!("- Blend of the top two categories");
    }
    println!("- Scores:");
    for entry in ranking.ordered.iter().filter(|entry| entry.score > 0.0) {
        println!("    {}: {:.2}", entry.category, entry.score);
    }
    if !recommendation.catalog_keys.is_empty() {
        println!("- Catalog keys: {}", recommendation.catalog_keys.join(","));
    }
}

fn render_picks(picks: &[DailyPick]) {
    for pick in picks {
        let marker = if pick.fallback { " (pool exhausted)" } else { "" };
        println!("- Pick for {} on {}: {}{}", pick.key, pick.date, pick.item, marker);
    }
}

fn render_digest(digest: &PeriodDigest) {
    println!(
        "- {} digest {} ({} entries)",
        digest.period_label, digest.key, digest.entry_count
    );
    if !digest.top_activities.is_empty() {
        println!("    activities: {}", digest.top_activities.join(", "));
    }
    if !digest.top_keywords.is_empty() {
        println!("    keywords: {}", digest.top_keywords.join(", "));
    }
}
