use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use radial::{ClockLabels, LabelText, LayoutConfig};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    #[strum(to_string = "Sunday", serialize = "sun", serialize = "0")]
    Sunday,
    #[strum(to_string = "Monday", serialize = "mon", serialize = "1")]
    Monday,
    #[strum(to_string = "Tuesday", serialize = "tue", serialize = "2")]
    Tuesday,
    #[strum(to_string = "Wednesday", serialize = "wed", serialize = "3")]
    Wednesday,
    #[strum(to_string = "Thursday", serialize = "thu", serialize = "4")]
    Thursday,
    #[strum(to_string = "Friday", serialize = "fri", serialize = "5")]
    Friday,
    #[strum(to_string = "Saturday", serialize = "sat", serialize = "6")]
    Saturday,
}

impl Weekday {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    /// The seven days in clock order, starting with `self`.
    pub fn week_from(self) -> impl Iterator<Item = Weekday> {
        Self::iter().cycle().skip(self.as_index()).take(7)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LabelConfig {
    pub week_start: Weekday,
    /// Replaces the day names verbatim, in clock order.
    pub names: Option<Vec<String>>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sunday,
            names: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub duration_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { duration_ms: 800 }
    }
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl Config {
    pub fn clock_labels(&self) -> ClockLabels {
        match &self.labels.names {
            Some(names) => ClockLabels::new(names.iter().map(|n| LabelText::new(n.as_str()))),
            None => ClockLabels::new(
                self.labels
                    .week_start
                    .week_from()
                    .map(|day| LabelText::new(day.to_string())),
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "heptaweek", "heptaweek")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

/// `WEEKCLOCK_<SECTION>__<KEY>`, e.g. `WEEKCLOCK_LAYOUT__SIZE=800`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("WEEKCLOCK")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using the default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }
    log::info!("Watching {} for changes", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
