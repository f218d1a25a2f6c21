//! The `mr-doctor` terminal front end: an interactive chat, or the relay
//! service it talks to.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use mr_doctor::core::conversation::{Sender, Turn};
use mr_doctor::core::{Notice, SubmitError};
use mr_doctor::{Session, SessionBuilder, notice_line, severity_badge};
use mr_doctor_gemini_model::{
    DEFAULT_MODEL, GeminiConfigBuilder, GeminiModelProvider,
};
use mr_doctor_http_model::{
    DEFAULT_ENDPOINT, HttpConfigBuilder, HttpModelProvider,
};
use mr_doctor_relay::Relay;
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt};
use tokio::net::TcpListener;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;

#[derive(Parser, Debug)]
#[command(name = "mr-doctor")]
#[command(about = "Bilingual health-advice chat assistant")]
#[command(version)]
struct CliArgs {
    /// Relay endpoint the chat posts messages to
    #[arg(long, env = "MR_DOCTOR_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Call Gemini directly instead of going through a relay
    #[arg(long)]
    direct: bool,

    /// Gemini API key, used by `--direct` and by the relay
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Give up on a reply after this many seconds and show offline guidance
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chat in the terminal (default)
    Chat,
    /// Serve `POST /api/chat` backed by Gemini
    Relay {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:5000")]
        listen: SocketAddr,
    },
}

enum SessionEvent {
    Turn(Turn),
    Notice(Notice),
    Idle,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = CliArgs::parse();
    match &args.command {
        Some(Command::Relay { listen }) => run_relay(&args, *listen).await,
        Some(Command::Chat) | None => run_chat(&args).await,
    }
}

fn gemini_provider(args: &CliArgs) -> Option<GeminiModelProvider> {
    let api_key = args.gemini_api_key.as_deref()?;
    let config = GeminiConfigBuilder::with_api_key(api_key)
        .with_model(&args.model)
        .build();
    Some(GeminiModelProvider::new(config))
}

async fn run_relay(args: &CliArgs, listen: SocketAddr) -> Result<()> {
    let provider = gemini_provider(args);
    if provider.is_none() {
        warn!("GEMINI_API_KEY is not set, every request will fail");
    }

    let listener = TcpListener::bind(listen)
        .await
        .with_context(|| format!("failed to bind {listen}"))?;
    select! {
        res = Relay::new(provider).serve(listener) => {
            res.context("relay server error")
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
            Ok(())
        }
    }
}

async fn run_chat(args: &CliArgs) -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let builder = if args.direct {
        let Some(provider) = gemini_provider(args) else {
            bail!("GEMINI_API_KEY environment variable is not set");
        };
        SessionBuilder::with_model_provider(provider)
    } else {
        let config = HttpConfigBuilder::new()
            .with_endpoint(&args.endpoint)
            .build();
        SessionBuilder::with_model_provider(HttpModelProvider::new(config))
    };
    let builder = match args.timeout_secs {
        Some(secs) => {
            builder.with_request_timeout(Duration::from_secs(secs))
        }
        None => builder,
    };

    let session = builder
        .on_turn({
            let event_tx = event_tx.clone();
            move |turn| {
                event_tx.send(SessionEvent::Turn(turn.clone())).ok();
            }
        })
        .on_notice({
            let event_tx = event_tx.clone();
            move |notice| {
                event_tx.send(SessionEvent::Notice(notice.clone())).ok();
            }
        })
        .on_composing({
            let event_tx = event_tx.clone();
            move |composing| {
                if !composing {
                    event_tx.send(SessionEvent::Idle).ok();
                }
            }
        })
        .build();

    println!(
        "{}",
        "👋 Hi, I'm Mr.Doctor. Describe how you feel, in English or Tanglish."
            .bright_white()
    );
    chat_loop(&session, event_rx).await
}

async fn chat_loop(
    session: &Session,
    mut event_rx: mpsc::UnboundedReceiver<SessionEvent>,
) -> Result<()> {
    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .context("invalid progress template")?
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    // One reader for the whole chat, so piped input is not dropped
    // between messages.
    let mut stdin = io::BufReader::new(io::stdin());

    'outer: loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = read_line(&mut stdin).await else {
            break;
        };
        match session.send_message(&line).await {
            Ok(_) => {}
            Err(SubmitError::EmptyInput) => continue,
            Err(err) => bail!(err),
        }

        let mut progress_bar = None;

        loop {
            // Create a new progress bar if it has been finished.
            progress_bar
                .get_or_insert_with(|| {
                    let progress_bar = ProgressBar::new_spinner();
                    progress_bar.set_style(progress_style.clone());
                    progress_bar.set_message("🩺 Composing...");
                    progress_bar
                })
                .inc(1);

            let sleep = sleep(Duration::from_millis(100));
            let event = select! {
                event = event_rx.recv() => {
                    let Some(event) = event else {
                        break 'outer;
                    };
                    event
                },
                _ = sleep => {
                    continue;
                }
            };

            // Finish the progress bar before printing anything else.
            if let Some(progress_bar) = &progress_bar {
                progress_bar.finish_and_clear();
            }
            progress_bar = None;

            match event {
                SessionEvent::Turn(turn) => {
                    if turn.sender() == Sender::Ai {
                        print_reply(&turn);
                    }
                }
                SessionEvent::Notice(notice) => {
                    println!("{}", notice_line(&notice));
                }
                SessionEvent::Idle => {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn print_reply(turn: &Turn) {
    for alert in turn.alerts() {
        println!("{}", severity_badge(alert));
    }
    println!("{}", turn.content().bright_white());
    println!(
        "{}",
        turn.timestamp()
            .with_timezone(&Local)
            .format("%H:%M")
            .dimmed()
    );
    println!();
}

/// Reads one message, without its line terminator.
async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> Option<String> {
    let mut line = String::new();

    match reader.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            let len = line.trim_end_matches(['\r', '\n']).len();
            line.truncate(len);
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_line_keeps_buffered_lines() {
        let mut input: &[u8] =
            b"I have a fever\r\n  I have a headache \n\nlast";
        assert_eq!(
            read_line(&mut input).await.as_deref(),
            Some("I have a fever")
        );
        assert_eq!(
            read_line(&mut input).await.as_deref(),
            Some("  I have a headache ")
        );
        assert_eq!(read_line(&mut input).await.as_deref(), Some(""));
        assert_eq!(read_line(&mut input).await.as_deref(), Some("last"));
        assert_eq!(read_line(&mut input).await, None);
    }
}
