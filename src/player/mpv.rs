use crate::app::events::{Event, PlayerEvent};
use crate::player::controller::MediaCommand;
use anyhow::Context;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::UnixStream,
    process::{Child, Command},
    sync::mpsc,
};

/// The media element: an idle mpv process driven over its JSON IPC socket.
#[derive(Debug)]
pub struct MpvHandle {
    child: Child,
    socket_path: PathBuf,
    writer: tokio::sync::Mutex<tokio::io::WriteHalf<UnixStream>>,
    request_id: AtomicU64,
}

impl MpvHandle {
    pub async fn spawn(
        event_tx: mpsc::Sender<Event>,
        audio_device: Option<&str>,
        log_file: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let socket_path =
            std::env::temp_dir().join(format!("songdeck-mpv-{}.sock", std::process::id()));
        let _ = std::fs::remove_file(&socket_path);

        let mut cmd = Command::new("mpv");
        cmd.args([
            "--no-video",
            "--idle=yes",
            "--input-terminal=no",
            "--really-quiet",
            "--cache=yes",
        ]);
        if let Some(dev) = audio_device {
            cmd.arg(format!("--audio-device={dev}"));
        }
        if let Some(p) = log_file {
            cmd.arg(format!("--log-file={}", p.display()));
        }
        let child = cmd
            .arg(format!("--input-ipc-server={}", socket_path.display()))
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .context("spawn mpv")?;

        let stream = connect_with_retry(&socket_path).await?;
        let (reader, writer) = tokio::io::split(stream);

        tokio::spawn(read_events_loop(reader, event_tx));

        let this = Self {
            child,
            socket_path,
            writer: tokio::sync::Mutex::new(writer),
            request_id: AtomicU64::new(1),
        };

        this.command(json!({"command":["request_log_messages", "error"]}))
            .await?;
        this.command(json!({"command":["observe_property", 1, "time-pos"]}))
            .await?;
        this.command(json!({"command":["observe_property", 2, "duration"]}))
            .await?;
        this.command(json!({"command":["observe_property", 3, "pause"]}))
            .await?;

        Ok(this)
    }

    /// Apply one controller command.
    pub async fn apply(&self, command: &MediaCommand) -> anyhow::Result<()> {
        match command {
            MediaCommand::Load { url, headers } => self.load_url(url, headers).await,
            MediaCommand::SetPause(paused) => self.set_pause(*paused).await,
            MediaCommand::Seek(secs) => self.seek_absolute(*secs).await,
            MediaCommand::SetVolume(volume) => self.set_volume(*volume).await,
            MediaCommand::Stop => self.command(json!({"command":["stop"]})).await,
        }
    }

    pub async fn load_url(&self, url: &str, headers: &[String]) -> anyhow::Result<()> {
        // Header list is per-stream; clear it when the new stream needs none.
        self.command(json!({"command":["set_property", "http-header-fields", headers.join(",")]}))
            .await?;
        self.command(json!({"command":["loadfile", url, "replace"]})).await
    }

    pub async fn set_pause(&self, paused: bool) -> anyhow::Result<()> {
        self.command(json!({"command":["set_property", "pause", paused]}))
            .await
    }

    pub async fn seek_absolute(&self, seconds: f64) -> anyhow::Result<()> {
        self.command(json!({"command":["seek", seconds, "absolute"]}))
            .await
    }

    /// `volume` in `[0, 1]`; mpv takes percent.
    pub async fn set_volume(&self, volume: f64) -> anyhow::Result<()> {
        let percent = (volume.clamp(0.0, 1.0) * 100.0).round();
        self.command(json!({"command":["set_property", "volume", percent]}))
            .await
    }

    async fn command(&self, mut v: serde_json::Value) -> anyhow::Result<()> {
        if v.get("request_id").is_none() {
            let id = self.request_id.fetch_add(1, Ordering::Relaxed);
            if let serde_json::Value::Object(ref mut o) = v {
                o.insert("request_id".to_string(), serde_json::Value::from(id));
            }
        }
        let mut w = self.writer.lock().await;
        let mut line = serde_json::to_vec(&v).context("encode mpv json")?;
        line.push(b'\n');
        w.write_all(&line).await.context("write mpv ipc")?;
        w.flush().await.context("flush mpv ipc")?;
        Ok(())
    }
}

impl Drop for MpvHandle {
    fn drop(&mut self) {
        let _ = self.child.start_kill();
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

async fn connect_with_retry(path: &Path) -> anyhow::Result<UnixStream> {
    let deadline = tokio::time::Instant::now() + std::time::Duration::from_secs(5);
    loop {
        match UnixStream::connect(path).await {
            Ok(s) => return Ok(s),
            Err(e) => {
                if tokio::time::Instant::now() > deadline {
                    return Err(e).with_context(|| format!("connect to mpv ipc {}", path.display()));
                }
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            }
        }
    }
}

async fn read_events_loop(reader: tokio::io::ReadHalf<UnixStream>, event_tx: mpsc::Sender<Event>) {
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let Ok(v) = serde_json::from_str::<serde_json::Value>(&line) else {
            continue;
        };
        if let Some(err) = v.get("error").and_then(|e| e.as_str())
            && v.get("request_id").is_some()
            && err != "success"
        {
            tracing::warn!(error = err, "mpv rejected command");
        }
        if v.get("event").and_then(|e| e.as_str()) == Some("log-message") {
            log_mpv_message(&v);
            continue;
        }
        if let Some(pe) = map_mpv_event(&v)
            && event_tx.send(Event::Player(pe)).await.is_err()
        {
            break;
        }
    }
}

fn map_mpv_event(v: &serde_json::Value) -> Option<PlayerEvent> {
    match v.get("event")?.as_str()? {
        "property-change" => {
            let data = v.get("data")?;
            match v.get("name")?.as_str()? {
                "time-pos" => Some(PlayerEvent::TimeTick {
                    seconds: data.as_f64()?,
                }),
                "duration" => Some(PlayerEvent::Duration {
                    seconds: data.as_f64()?,
                }),
                "pause" => Some(if data.as_bool()? {
                    PlayerEvent::Paused
                } else {
                    PlayerEvent::Playing
                }),
                _ => None,
            }
        }
        // "stop" and "redirect" reasons come from replacing the stream, not from finishing it.
        "end-file" => match v.get("reason").and_then(|x| x.as_str()).unwrap_or("") {
            "eof" => Some(PlayerEvent::Ended),
            "error" => {
                let err = v.get("file_error").or_else(|| v.get("error"));
                let err = err.and_then(|x| x.as_str()).unwrap_or("unknown");
                Some(PlayerEvent::Error(format!("playback failed: {err}")))
            }
            _ => None,
        },
        // Diagnostics only; failed loads surface through end-file.
        "log-message" => None,
        _ => None,
    }
}

fn log_mpv_message(v: &serde_json::Value) {
    let field = |k: &str| v.get(k).and_then(|x| x.as_str()).unwrap_or("");
    let text = field("text").trim();
    if !text.is_empty() {
        tracing::warn!(prefix = field("prefix"), level = field("level"), "mpv: {text}");
    }
}
