use crate::error::AppError;
use crate::model::ReminderEntry;
use crate::storage::ReminderStore;
use std::path::{Path, PathBuf};

pub const STORE_ENV_VAR: &str = "STUDYAGENT_REMINDERS_PATH";
const STORE_FILE_NAME: &str = "reminders.json";

/// Reminder file location: env var, then `configured`, then the per-user
/// default under the app's config directory.
pub fn store_path(configured: Option<&Path>) -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if let Some(path) = configured {
        return Ok(path.to_path_buf());
    }

    Ok(crate::config::app_dir()?.join(STORE_FILE_NAME))
}

/// Missing file reads as an empty list.
pub fn load_reminders(path: &Path) -> Result<Vec<ReminderEntry>, AppError> {
    if !path.exists() {
        log::debug!("no reminder file at {}", path.display());
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|err| AppError::io_at(path, err))?;
    let entries: Vec<ReminderEntry> =
        serde_json::from_str(&content).map_err(|err| AppError::malformed_at(path, err))?;
    log::debug!("loaded {} reminders from {}", entries.len(), path.display());
    Ok(entries)
}

/// Overwrite the file with `entries`.
pub fn save_reminders(path: &Path, entries: &[ReminderEntry]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io_at(parent, err))?;
    }

    let content = serde_json::to_string_pretty(entries)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    write_private(path, content.as_bytes()).map_err(|err| AppError::io_at(path, err))?;

    log::debug!("saved {} reminders to {}", entries.len(), path.display());
    Ok(())
}

/// New files are created 0600 on unix; existing files are narrowed to 0600.
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        let file = options.open(path)?;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        write_contents(file, content)
    }
    #[cfg(not(unix))]
    {
        write_contents(options.open(path)?, content)
    }
}

fn write_contents(mut file: std::fs::File, content: &[u8]) -> std::io::Result<()> {
    use std::io::Write;

    file.write_all(content)?;
    file.flush()
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReminderStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<ReminderEntry>, AppError> {
        load_reminders(&self.path)
    }

    fn save_all(&self, entries: &[ReminderEntry]) -> Result<(), AppError> {
        save_reminders(&self.path, entries)
    }
}
