use crate::api::StreamSource;
use crate::player::PlaybackMode;
use crate::queue::NavigationMode;
use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod defaults;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub player: PlayerConfig,
    pub lyrics: LyricsConfig,
    pub input: InputConfig,
    pub paths: PathsConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the music server, e.g. http://localhost:8080
    pub base_url: String,
    /// Where tracks are listed and streamed from: "local" or "cloud"
    pub source: StreamSource,
    pub timeout_secs: u64,
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// mpv audio device name (see `mpv --audio-device=help`)
    pub audio_device: Option<String>,
    /// Volume level (0.0-1.0)
    pub volume: f64,
    /// "continuous" advances on track end, "single" stops
    pub playback: PlaybackMode,
    /// "in_place" swaps the stream, "detail_page" opens the track's page
    pub navigation: NavigationMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LyricsConfig {
    /// Auto-scroll pause after a manual scroll, in milliseconds
    pub scroll_cooldown_ms: u64,
}

impl LyricsConfig {
    pub fn scroll_cooldown(&self) -> Duration {
        Duration::from_millis(self.scroll_cooldown_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub mouse: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Last visited screen (restored on startup)
    pub last_screen: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            source: StreamSource::default(),
            timeout_secs: defaults::TIMEOUT_SECS,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            audio_device: None,
            volume: crate::player::controller::DEFAULT_VOLUME,
            playback: PlaybackMode::default(),
            navigation: NavigationMode::default(),
        }
    }
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            scroll_cooldown_ms: defaults::SCROLL_COOLDOWN_MS,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { mouse: true }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "songdeck", "songdeck")
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj = project_dirs().context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

pub fn save(cfg: &Config, override_path: Option<&Path>) -> anyhow::Result<()> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    write_config(cfg, &path)
}

pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        let cfg = Config::default();
        write_config(&cfg, &path)?;
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg = toml::from_str::<Config>(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

fn write_config(cfg: &Config, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }
    let raw = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = load(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.server.base_url, defaults::BASE_URL);
        assert_eq!(cfg.lyrics.scroll_cooldown(), Duration::from_millis(2000));
        assert_eq!(cfg.player.volume, 0.8);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.server.source = StreamSource::Cloud;
        cfg.player.navigation = NavigationMode::DetailPage;
        cfg.player.playback = PlaybackMode::Single;
        cfg.ui.last_screen = Some("Song".into());
        save(&cfg, Some(&path)).unwrap();

        let back = load(Some(&path)).unwrap();
        assert_eq!(back.server.source, StreamSource::Cloud);
        assert_eq!(back.player.navigation, NavigationMode::DetailPage);
        assert_eq!(back.player.playback, PlaybackMode::Single);
        assert_eq!(back.ui.last_screen.as_deref(), Some("Song"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
[server]
base_url = "http://music.lan:9000"

[player]
navigation = "detail_page"
"#,
        )
        .unwrap();
        assert_eq!(cfg.server.base_url, "http://music.lan:9000");
        assert_eq!(cfg.server.source, StreamSource::Local);
        assert_eq!(cfg.player.navigation, NavigationMode::DetailPage);
        assert_eq!(cfg.player.playback, PlaybackMode::Continuous);
        assert!(cfg.input.mouse);
    }
}
