mod api;
mod app;
mod auth;
mod config;
mod input;
mod lyrics;
mod player;
mod queue;
mod storage;
mod tui;

use anyhow::Context;
use api::{ApiClient, Comment, StreamSource, Track};
use auth::AuthService;
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use storage::StorageHandle;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SONGDECK_LOG";

#[derive(Debug, Parser)]
#[command(name = "songdeck", version, about = "Terminal client for a music streaming server")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Print the track list for the configured source (headless).
    Home,
    /// Print one track's metadata.
    Track { id: String },
    /// Print a track's lyrics with timestamps.
    Lyrics { id: String },
    /// Print a track's comments.
    Comments { id: String },
    /// Post a comment on a track (requires login).
    Comment { id: String, text: String },
    /// Log in and remember the session.
    Login { account: String, password: String },
    /// Create an account and remember the session.
    Register { account: String, password: String },
    /// Forget the saved session.
    Logout,
    /// Show the saved session and whether the server still accepts it.
    Whoami,
    /// Print the cloud library.
    Cloud,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let cfg_path = match cli.config.clone() {
        Some(p) => p,
        None => config::default_config_path().context("default config path")?,
    };
    let command = cli.command.unwrap_or(Command::Tui);

    match command {
        Command::Tui => init_file_logging(&cfg.paths.data_dir)?,
        _ => init_stderr_logging(),
    }

    let storage = StorageHandle::in_data_dir(&cfg.paths.data_dir);
    let saved = storage
        .run(|s| s.current_user())
        .await
        .context("read saved session")?;
    let api = ApiClient::new(
        &cfg.server.base_url,
        cfg.server.timeout(),
        saved.as_ref().map(|u| u.id.as_str()),
    )?;
    let auth = AuthService::new(api.clone(), storage);
    auth.restore().await.context("restore session")?;

    match command {
        Command::Tui => {
            let mut terminal =
                tui::TerminalGuard::enter(cfg.input.mouse).context("init terminal")?;
            let mut app = app::App::new(cfg, cfg_path, api, auth);
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Home => {
            let tracks = cfg.server.source.list_tracks(&api).await?;
            print_tracks(&tracks);
        }
        Command::Track { id } => {
            let detail = api.track(&id).await?;
            println!("title:  {}", detail.title);
            println!("artist: {}", detail.artist);
            println!("album:  {}", detail.album);
            println!("audio:  {}", api.audio_url(&id));
            println!("cover:  {}", api.cover_url(&id));
        }
        Command::Lyrics { id } => {
            let parsed = lyrics::fetch_lyrics(&api, &id).await?;
            if parsed.is_empty() {
                println!("No lyrics available");
            }
            for line in &parsed.lines {
                match line.time_secs {
                    Some(t) => println!("[{}] {}", format_clock(t), line.text),
                    None => println!("{}", line.text),
                }
            }
        }
        Command::Comments { id } => {
            let comments = api.comments(&id).await?;
            print_comments(&comments);
        }
        Command::Comment { id, text } => {
            if text.trim().is_empty() {
                anyhow::bail!("Comment cannot be empty");
            }
            if !auth.is_logged_in() {
                anyhow::bail!("Please log in to comment");
            }
            let posted = api.post_comment(&id, text.trim()).await?;
            print_comments(std::slice::from_ref(&posted));
        }
        Command::Login { account, password } => {
            let user = auth.login(&account, &password).await?;
            println!("Logged in as {} ({})", user.nickname, user.email);
        }
        Command::Register { account, password } => {
            let user = auth.register(&account, &password).await?;
            println!("Registered {} ({})", user.nickname, user.email);
        }
        Command::Logout => {
            auth.logout().await?;
            println!("Logged out.");
        }
        Command::Whoami => match auth.refresh().await {
            Ok(Some(user)) => println!("{} ({})", user.nickname, user.email),
            Ok(None) => println!("Not logged in."),
            Err(e) => match auth.current_user() {
                Some(user) => println!("{} ({}) [offline: {e:#}]", user.nickname, user.email),
                None => println!("Not logged in."),
            },
        },
        Command::Cloud => {
            let tracks = StreamSource::Cloud.list_tracks(&api).await?;
            print_tracks(&tracks);
        }
    }

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// The TUI owns the terminal, so logs go to a file in the data dir.
fn init_file_logging(data_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("create dir {}", data_dir.display()))?;
    let path = data_dir.join("songdeck.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn print_tracks(tracks: &[Track]) {
    for (i, t) in tracks.iter().enumerate() {
        let lyrics = if t.has_lyrics { "" } else { "  [no lyrics]" };
        println!(
            "{:02}. {} - {}{}  (id={})",
            i + 1,
            t.display_title(),
            t.display_artist(),
            lyrics,
            t.id
        );
    }
}

fn print_comments(comments: &[Comment]) {
    if comments.is_empty() {
        println!("No comments yet");
    }
    for c in comments {
        println!("{}  {}", c.author(), c.posted_at());
        println!("    {}", c.content);
    }
}

fn format_clock(secs: f64) -> String {
    let centis = (secs * 100.0).round() as u64;
    format!("{:02}:{:02}.{:02}", centis / 6000, (centis / 100) % 60, centis % 100)
}
