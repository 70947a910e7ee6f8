// src/infra/paths.rs — Config and state file locations
//
// All paths respect the FICHAR_HOME environment variable for isolation.
// When FICHAR_HOME is set, config and state live under that directory.
// When unset, config uses ~/.fichar/ and state uses XDG_DATA_HOME/fichar.

use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::OnceLock;

static PROJECT_DIRS: OnceLock<ProjectDirs> = OnceLock::new();

fn project_dirs() -> &'static ProjectDirs {
    PROJECT_DIRS.get_or_init(|| {
        ProjectDirs::from("", "", "fichar").expect("Could not determine home directory")
    })
}

fn fichar_home() -> Option<PathBuf> {
    std::env::var_os("FICHAR_HOME").map(PathBuf::from)
}

/// Configuration directory: $FICHAR_HOME/ or ~/.fichar/
pub fn config_dir() -> PathBuf {
    if let Some(home) = fichar_home() {
        return home;
    }
    dirs_home().join(".fichar")
}

/// Data directory: $FICHAR_HOME/data/ or XDG_DATA_HOME/fichar
pub fn data_dir() -> PathBuf {
    if let Some(home) = fichar_home() {
        return home.join("data");
    }
    project_dirs().data_local_dir().to_path_buf()
}

fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .expect("Could not determine home directory")
        .home_dir()
        .to_path_buf()
}

pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// The single persisted-state slot.
pub fn state_file_path() -> PathBuf {
    data_dir().join("state.json")
}
