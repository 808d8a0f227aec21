use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use minicard_core::storage::FileStorage;
use minicard_core::store::STATE_KEY;
use minicard_core::view::Scene;
use minicard_core::{Config, Point, Session, StateStore};
use tracing::debug;

use crate::editor::draft_card_text;
use crate::error::CliError;

pub const DATA_DIR_ENV: &str = "MINICARD_DATA_DIR";
const CONFIG_FILE_NAME: &str = "config.json";

pub type CliSession = Session<FileStorage, Scene>;

/// Resolved locations and settings shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub data_dir: PathBuf,
    pub config: Config,
}

impl CommandContext {
    pub fn resolve(
        cli_data_dir: Option<PathBuf>,
        cli_config_path: Option<&Path>,
    ) -> Result<Self, CliError> {
        let config = load_config(cli_config_path)?;
        let data_dir = resolve_data_dir(
            cli_data_dir,
            env::var_os(DATA_DIR_ENV).map(PathBuf::from),
            &config,
        )?;
        debug!(data_dir = %data_dir.display(), "Resolved data directory");
        Ok(Self { data_dir, config })
    }

    pub fn open_session(&self) -> Result<CliSession, CliError> {
        let storage = FileStorage::open(&self.data_dir)?.with_keys([STATE_KEY])?;
        let store = StateStore::load(storage);
        let scene = Scene::new(self.config.stage_width);
        Ok(Session::new(store, scene, self.config.clone()))
    }
}

pub fn load_config(cli_config_path: Option<&Path>) -> Result<Config, CliError> {
    let path = match cli_config_path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };
    Ok(Config::load_from_path(&path)?)
}

pub fn default_config_path() -> Result<PathBuf, CliError> {
    dirs::config_dir()
        .map(|dir| dir.join("minicard").join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("failed to resolve config directory".into()))
}

/// Flag, then environment, then config file, then the platform data dir
pub fn resolve_data_dir(
    cli_data_dir: Option<PathBuf>,
    env_data_dir: Option<PathBuf>,
    config: &Config,
) -> Result<PathBuf, CliError> {
    if let Some(dir) = cli_data_dir
        .or(env_data_dir)
        .or_else(|| config.data_dir.clone())
    {
        return Ok(dir);
    }
    default_data_dir()
}

fn default_data_dir() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|dir| dir.join("minicard"))
        .ok_or_else(|| CliError::Config("failed to resolve data directory".into()))
}

pub fn print_stage(session: &CliSession) {
    for line in session.surface().render_lines() {
        println!("{line}");
    }
}

/// Print queued notifications to stderr, or fold them into a failed result
pub fn finish<T>(
    session: &mut CliSession,
    result: minicard_core::Result<T>,
) -> Result<T, CliError> {
    let notifications = session.drain_notifications();
    match result {
        Ok(value) => {
            for message in notifications {
                eprintln!("{message}");
            }
            Ok(value)
        }
        Err(error) if notifications.is_empty() => Err(error.into()),
        Err(_) => Err(CliError::Reported(notifications.join("\n"))),
    }
}

/// Parse a pointer position written as `X,Y`
pub fn parse_point(value: &str) -> Result<Point, String> {
    let Some((x, y)) = value.split_once(',') else {
        return Err(format!("expected X,Y but got `{value}`"));
    };
    let x = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid x coordinate `{}`", x.trim()))?;
    let y = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid y coordinate `{}`", y.trim()))?;
    Ok(Point::new(x, y))
}

pub fn resolve_card_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    if let Some(content) = draft_card_text("")? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}
