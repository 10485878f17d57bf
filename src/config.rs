use crate::error::{Error, Result};
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "WORD_QUIZ_DATA_DIR";
pub const DB_PATH_ENV: &str = "WORD_QUIZ_DB";
pub const OPTIONS_ENV: &str = "WORD_QUIZ_OPTIONS";

pub const DEFAULT_OPTION_COUNT: usize = 4;
pub const MIN_OPTION_COUNT: usize = 2;
/// Answers are picked with the digit keys 1-9.
pub const MAX_OPTION_COUNT: usize = 9;

const DB_FILE_NAME: &str = "word-quiz.db";
const LOG_FILE_NAME: &str = "word-quiz.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    /// Answer options shown per question, the correct one included.
    pub option_count: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source so tests don't
    /// have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir(),
        };

        let db_path = match lookup(DB_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => data_dir.join(DB_FILE_NAME),
        };

        let option_count = match lookup(OPTIONS_ENV) {
            Some(raw) => parse_option_count(&raw)?,
            None => DEFAULT_OPTION_COUNT,
        };

        Ok(Self {
            data_dir,
            db_path,
            option_count,
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }

    pub fn distractor_count(&self) -> usize {
        self.option_count - 1
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("word-quiz")
}

fn parse_option_count(raw: &str) -> Result<usize> {
    let value: usize = raw
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} must be a number, got '{}'", OPTIONS_ENV, raw)))?;

    if !(MIN_OPTION_COUNT..=MAX_OPTION_COUNT).contains(&value) {
        return Err(Error::Config(format!(
            "{} must be between {} and {}, got {}",
            OPTIONS_ENV, MIN_OPTION_COUNT, MAX_OPTION_COUNT, value
        )));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.option_count, DEFAULT_OPTION_COUNT);
        assert_eq!(config.distractor_count(), 3);
        assert!(config.db_path.ends_with(DB_FILE_NAME));
        assert!(config.data_dir.ends_with("word-quiz"));
    }

    #[test]
    fn test_data_dir_override_moves_db_and_log() {
        let config = Config::from_lookup(lookup_from(&[(DATA_DIR_ENV, "/tmp/wq")])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/wq/word-quiz.db"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/wq/word-quiz.log"));
    }

    #[test]
    fn test_db_path_override() {
        let config = Config::from_lookup(lookup_from(&[
            (DATA_DIR_ENV, "/tmp/wq"),
            (DB_PATH_ENV, "/tmp/other.db"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/wq"));
    }

    #[test]
    fn test_option_count_parsing() {
        let config = Config::from_lookup(lookup_from(&[(OPTIONS_ENV, " 6 ")])).unwrap();
        assert_eq!(config.option_count, 6);
        assert_eq!(config.distractor_count(), 5);

        let too_small = Config::from_lookup(lookup_from(&[(OPTIONS_ENV, "1")]));
        assert!(matches!(too_small, Err(Error::Config(_))));

        let most = Config::from_lookup(lookup_from(&[(OPTIONS_ENV, "9")])).unwrap();
        assert_eq!(most.option_count, MAX_OPTION_COUNT);

        let too_many = Config::from_lookup(lookup_from(&[(OPTIONS_ENV, "12")]));
        assert!(matches!(too_many, Err(Error::Config(_))));

        let garbage = Config::from_lookup(lookup_from(&[(OPTIONS_ENV, "four")]));
        assert!(matches!(garbage, Err(Error::Config(_))));
    }
}
