use std::path::PathBuf;

/// File name of the database in the home directory
pub const DEFAULT_DB_NAME: &str = ".pw.db";

pub fn get_home_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home);
    }

    #[cfg(target_os = "windows")]
    if let Ok(profile) = std::env::var("USERPROFILE") {
        return PathBuf::from(profile);
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub fn get_default_db_path() -> PathBuf {
    get_home_dir().join(DEFAULT_DB_NAME)
}

pub fn get_config_dir() -> PathBuf {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(path).join("peywand");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("peywand");
    }

    get_home_dir().join(".config/peywand")
}
