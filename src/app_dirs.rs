use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "glimpse").map(|pd| pd.config_dir().join("config.json"))
    }

    /// Directory for the opt-in log file
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("glimpse"),
            )
        } else {
            ProjectDirs::from("", "", "glimpse").map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_ends_with_file_name() {
        if let Some(path) = AppDirs::config_path() {
            assert!(path.ends_with("config.json"));
        }
    }

    #[test]
    fn state_dir_is_app_specific() {
        if let Some(dir) = AppDirs::state_dir() {
            assert!(dir.ends_with("glimpse"));
        }
    }
}
