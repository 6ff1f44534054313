use std::path::PathBuf;

pub const BASE_URL: &str = "http://localhost:8080";
pub const TIMEOUT_SECS: u64 = 10;
pub const SCROLL_COOLDOWN_MS: u64 = 2000;

pub fn data_dir() -> PathBuf {
    super::project_dirs()
        .map(|p| p.data_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("songdeck"))
}
