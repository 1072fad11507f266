use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use weaver_core::config::AppConfig;
use weaver_core::error::AppError;
use weaver_core::journal::{FileJournal, JournalService, Period};
use weaver_core::preference::{AnswerSet, BuiltinModel, PreferenceEngine, ScoringModel};
use weaver_core::sampling::{DailyPicker, JsonFileHistoryStore};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Quiz engine plus the picker that hands out its titles of the day.
#[derive(Debug, Clone)]
pub(crate) struct QuizState {
    pub(crate) engine: Arc<PreferenceEngine>,
    pub(crate) picker: Arc<DailyPicker>,
}

/// Everything the CLI and HTTP surfaces share, wired from configuration.
pub(crate) struct Services {
    pub(crate) quiz: QuizState,
    pub(crate) journal: Arc<JournalService<FileJournal>>,
}

pub(crate) fn load_engine(
    path: Option<&Path>,
    builtin: BuiltinModel,
) -> Result<PreferenceEngine, AppError> {
    let model = match path {
        Some(path) => {
            info!(path = %path.display(), "loading scoring model from file");
            ScoringModel::from_path(path)?
        }
        None => ScoringModel::builtin(builtin)?,
    };
    Ok(PreferenceEngine::new(model))
}

pub(crate) fn build_services(config: &AppConfig) -> Result<Services, AppError> {
    let quiz_engine = load_engine(config.models.quiz.as_deref(), BuiltinModel::MovieQuiz)?;
    let mood_engine = load_engine(config.models.mood.as_deref(), BuiltinModel::DailyMood)?;

    let history = Arc::new(JsonFileHistoryStore::new(config.storage.history_path()));
    let picker = Arc::new(DailyPicker::new(history, config.history));
    let repository = Arc::new(FileJournal::new(
        config.storage.profile_path(),
        config.storage.entries_path(),
    ));

    Ok(Services {
        quiz: QuizState {
            engine: Arc::new(quiz_engine),
            picker: picker.clone(),
        },
        journal: Arc::new(JournalService::new(repository, picker, mood_engine)),
    })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_period(raw: &str) -> Result<Period, String> {
    Period::parse(raw).ok_or_else(|| format!("unknown period '{raw}' (expected week, month, or year)"))
}

/// One `question=choice[,choice]` flag from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AnswerArg {
    pub(crate) question: String,
    pub(crate) choices: Vec<String>,
}

pub(crate) fn parse_answer(raw: &str) -> Result<AnswerArg, String> {
    let (question, choices) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected question=choice[,choice] but got '{raw}'"))?;

    let question = question.trim();
    let choices: Vec<String> = choices
        .split(',')
        .map(str::trim)
        .filter(|choice| !choice.is_empty())
        .map(str::to_string)
        .collect();

    if question.is_empty() || choices.is_empty() {
        return Err(format!("expected question=choice[,choice] but got '{raw}'"));
    }

    Ok(AnswerArg {
        question: question.to_string(),
        choices,
    })
}

pub(crate) fn answer_set(args: &[AnswerArg]) -> AnswerSet {
    args.iter().fold(AnswerSet::new(), |answers, arg| match arg.choices.as_slice() {
        [single] => answers.select(arg.question.as_str(), single.as_str()),
        many => answers.select_many(arg.question.as_str(), many.iter().map(String::as_str)),
    })
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
