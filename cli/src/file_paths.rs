use directories::ProjectDirs;
use std::{env, fs, path};

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "irrat")
}

fn get_config_dir() -> Option<path::PathBuf> {
    // first try $IRRAT_CONFIG_DIR
    if let Some(env_var_config_dir) = env::var_os("IRRAT_CONFIG_DIR") {
        return Some(path::PathBuf::from(env_var_config_dir));
    }
    // Linux: $XDG_CONFIG_HOME/irrat or $HOME/.config/irrat
    // macOS: $HOME/Library/Application Support/irrat
    // Windows: {FOLDERID_RoamingAppData}\irrat\config
    project_dirs().map(|dirs| path::PathBuf::from(dirs.config_dir()))
}

pub fn get_config_file_location() -> Option<path::PathBuf> {
    let mut config_path = get_config_dir()?;
    config_path.push("config.toml");
    Some(config_path)
}

fn get_history_dir() -> Option<path::PathBuf> {
    // first try $IRRAT_STATE_DIR
    if let Some(env_var_history_dir) = env::var_os("IRRAT_STATE_DIR") {
        return Some(path::PathBuf::from(env_var_history_dir));
    }
    project_dirs().map(|dirs| path::PathBuf::from(dirs.data_local_dir()))
}

pub fn get_history_file_location() -> Option<path::PathBuf> {
    let mut history_path = get_history_dir()?;
    history_path.push("history");
    Some(history_path)
}

/// Like [`get_history_file_location`], but also creates the containing
/// directory so the history can be saved there.
pub fn create_history_file_location() -> Option<path::PathBuf> {
    let history_path = get_history_file_location()?;
    let dir = history_path.parent()?;
    if let Err(e) = fs::create_dir_all(dir) {
        tracing::warn!(dir = %dir.display(), "failed to create history directory: {e}");
        return None;
    }
    Some(history_path)
}
