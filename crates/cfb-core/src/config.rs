use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api.pullpush.io/reddit/submission/search";

pub const DEFAULT_TOPICS: &[&str] = &[
    "aww",
    "cuteanimals",
    "cats",
    "dogs",
    "puppies",
    "kittens",
    "babyanimals",
    "rarepuppers",
    "animalsbeingderps",
    "AnimalsBeingBros",
    "AnimalPhotography",
    "corgi",
    "hedgehog",
    "tuckedinkitties",
    "rabbits",
    "guineapigs",
    "otters",
    "babybeasts",
    "foxes",
    "cute",
    "smallanimals",
    "squirrels",
    "hamsters",
    "chickens",
    "parrots",
    "ferrets",
    "wildlife",
    "bunnies",
    "seal",
    "penguins",
];

const DEFAULT_MAX_POSTS: usize = 50;
const MAX_POSTS_CEILING: usize = 100;
const DEFAULT_REFRESH_SECS: u64 = 15 * 60;
// Total per-request budget (connect + body).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Typed configuration for the bot.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,

    // Feed
    pub topics: Vec<String>,
    pub max_posts_per_topic: usize,
    pub refresh_interval: Duration,
    pub feed_endpoint: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the process env in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = lookup("BOT_TOKEN")
            .and_then(non_empty)
            .or_else(|| lookup("TELEGRAM_BOT_TOKEN").and_then(non_empty))
            .ok_or_else(|| {
                Error::Config("BOT_TOKEN environment variable is required".to_string())
            })?;

        let topics = parse_csv_topics(lookup("FEED_TOPICS"))
            .unwrap_or_else(|| DEFAULT_TOPICS.iter().map(|s| s.to_string()).collect());

        let max_posts_per_topic = parse_num::<usize>(lookup("FEED_MAX_POSTS"))
            .unwrap_or(DEFAULT_MAX_POSTS)
            .clamp(1, MAX_POSTS_CEILING);

        let refresh_interval = Duration::from_secs(
            parse_num::<u64>(lookup("FEED_REFRESH_INTERVAL_SECS"))
                .filter(|&secs| secs > 0)
                .unwrap_or(DEFAULT_REFRESH_SECS),
        );

        let feed_endpoint = lookup("FEED_ENDPOINT")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let request_timeout = Duration::from_secs(
            parse_num::<u64>(lookup("FEED_REQUEST_TIMEOUT_SECS"))
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );

        Ok(Self {
            telegram_bot_token,
            topics,
            max_posts_per_topic,
            refresh_interval,
            feed_endpoint,
            request_timeout,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn parse_num<T: std::str::FromStr>(v: Option<String>) -> Option<T> {
    v.and_then(|s| s.trim().parse::<T>().ok())
}

fn parse_csv_topics(v: Option<String>) -> Option<Vec<String>> {
    let v = v?;
    let out = v
        .split(',')
        .map(|s| s.trim().trim_start_matches("r/"))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.trim().to_string())
    }
}
