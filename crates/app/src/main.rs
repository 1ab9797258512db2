use std::fmt;
use std::sync::Arc;

use quiz_core::{MatchResult, SessionSnapshot, SessionStatus};
use services::{FetchConfig, FetchError, HttpQuizFetcher, QuizService, SessionHandle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

const COMMANDS: &[(&str, &str)] = &[
    (":start", "start the countdown, or reset while running"),
    (":reset", "stop the countdown and clear found answers"),
    (":status", "show time left and progress"),
    (":quit", "leave"),
];

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app");
    eprintln!();
    eprintln!("While playing, type a guess and press enter, or one of:");
    for (command, help) in COMMANDS {
        eprintln!("  {command:<8} {help}");
    }
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_API_BASE_URL, QUIZ_ID, QUIZ_FETCH_TIMEOUT_SECS, RUST_LOG");
}

/// One line typed by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Start,
    Reset,
    Status,
    Help,
    Quit,
    Guess(String),
}

impl Input {
    fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        let command = match trimmed {
            ":start" | ":s" => Self::Start,
            ":reset" | ":r" => Self::Reset,
            ":status" => Self::Status,
            ":help" | ":h" => Self::Help,
            ":quit" | ":q" => Self::Quit,
            guess => Self::Guess(guess.to_owned()),
        };
        Some(command)
    }
}

fn render_status(snapshot: &SessionSnapshot) {
    println!(
        "[{}] {} found {}",
        snapshot.remaining_display,
        match snapshot.status {
            SessionStatus::NotStarted => "ready",
            SessionStatus::Running => "playing",
            SessionStatus::Won => "won",
            SessionStatus::Lost => "lost",
        },
        snapshot.progress_display
    );
}

/// Prints the end-of-round notices; the session itself owns all state.
async fn announce_outcomes(mut updates: watch::Receiver<SessionSnapshot>) {
    let mut last = updates.borrow_and_update().status;
    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();
        if snapshot.status == last {
            continue;
        }
        last = snapshot.status;
        match snapshot.status {
            SessionStatus::Won => {
                println!("Congratulations! You found all {} answers.", snapshot.total_count);
                println!("Type :start to play again.");
            }
            SessionStatus::Lost => {
                println!(
                    "Time finished. You found {} of {} answers.",
                    snapshot.found_count, snapshot.total_count
                );
                println!("Type :start to try again.");
            }
            SessionStatus::NotStarted | SessionStatus::Running => {}
        }
    }
}

async fn play(session: SessionHandle) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let Some(input) = Input::parse(&line) else {
            continue;
        };
        match input {
            Input::Start => {
                // Mirrors a single start/reset button.
                let snapshot = if session.snapshot().status == SessionStatus::Running {
                    session.reset().await?
                } else {
                    session.start().await?
                };
                render_status(&snapshot);
            }
            Input::Reset => render_status(&session.reset().await?),
            Input::Status => render_status(&session.snapshot()),
            Input::Help => print_usage(),
            Input::Quit => break,
            Input::Guess(guess) => match session.submit(guess).await? {
                MatchResult::Accepted => {
                    let snapshot = session.snapshot();
                    if let Some(found) = snapshot.found_answers.last() {
                        println!("+ {found}  ({})", snapshot.progress_display);
                    }
                }
                MatchResult::Rejected => println!("- not on the list"),
                MatchResult::NotAccepted => println!("Type :start to begin."),
            },
        }
    }

    Ok(())
}

/// Build the HTTP fetcher and open a session; any failure is a connection error.
async fn connect(config: FetchConfig) -> Result<SessionHandle, FetchError> {
    let fetcher = HttpQuizFetcher::new(config)?;
    QuizService::new(Arc::new(fetcher)).open_session().await
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        if matches!(arg.as_str(), "--help" | "-h") {
            print_usage();
            return Ok(());
        }
        return Err(ArgsError::UnknownArg(arg).into());
    }

    let session = match connect(FetchConfig::from_env()).await {
        Ok(session) => session,
        Err(err) => {
            eprintln!("Connection error. Try again later.");
            return Err(err.into());
        }
    };

    let snapshot = session.snapshot();
    tracing::info!(total = snapshot.total_count, "quiz ready");
    println!("{}", snapshot.prompt);
    render_status(&snapshot);
    println!("Type :start to begin, :help for commands.");

    let announcer = tokio::spawn(announce_outcomes(session.subscribe()));
    let result = play(session).await;
    announcer.abort();
    result
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_guesses() {
        assert_eq!(Input::parse(":start"), Some(Input::Start));
        assert_eq!(Input::parse("  :q "), Some(Input::Quit));
        assert_eq!(Input::parse("  Paris "), Some(Input::Guess("Paris".into())));
        assert_eq!(Input::parse("   "), None);
    }

    #[test]
    fn start_help_mentions_the_reset_toggle() {
        let (_, help) = COMMANDS
            .iter()
            .find(|(command, _)| *command == ":start")
            .unwrap();
        assert!(help.contains("reset while running"));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_connection_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = FetchConfig {
            base_url: format!("http://{addr}"),
            ..FetchConfig::default()
        };
        let err = connect(config).await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
    }
}
