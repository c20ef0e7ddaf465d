use {
  anyhow::Context,
  app::App,
  arguments::Arguments,
  clap::Parser,
  client::Client,
  command::Command,
  command_dispatch::CommandDispatch,
  comment::Comment,
  comment_form::{CommentForm, Field},
  comments_region::{CommentsContent, CommentsRegion},
  config::{Config, ConfigError, Options},
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  effect::Effect,
  error_region::ErrorRegion,
  event::Event,
  help_view::HelpView,
  hyper::ext::ReasonPhrase,
  list_view::ListView,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
    },
  },
  request_error::RequestError,
  reqwest::{Response, StatusCode},
  serde::{
    Deserialize, Deserializer,
    de::{self, Unexpected},
  },
  serde_json::{Map, Value},
  state::State,
  std::{
    backtrace::BacktraceStatus,
    env,
    fs::{self, OpenOptions},
    io::{self, IsTerminal, Stdout},
    path::{Path, PathBuf},
    process,
    str::FromStr,
    sync::Mutex,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
  },
  template::{CommentTemplate, TemplateError},
  thiserror::Error,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    time,
  },
  tracing::{debug, info, warn},
  tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
  },
  transient_message::TransientMessage,
  url::Url,
  utils::{deserialize_optional_string, truncate, wrap_lines},
};

mod app;
mod arguments;
mod client;
mod command;
mod command_dispatch;
mod comment;
mod comment_form;
mod comments_region;
mod config;
mod effect;
mod error_region;
mod event;
mod help_view;
mod list_view;
mod logging;
mod request_error;
mod state;
mod template;
mod transient_message;
mod utils;

const DEFAULT_LIMIT: usize = 30;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

const TRANSIENT_MESSAGE_DURATION: Duration = Duration::from_secs(3);

const DEFAULT_LOG_DIRECTIVE: &str = "commentor=info";

const APPLICATION_ERROR: &str = "Application Error";
const TIMEOUT_ERROR: &str = "Timeout Error";
const UNKNOWN_SERVER_ERROR: &str = "Unknown Server Error";

const FORM_STATUS: &str = "tab switch field • enter post • ↑/↓ scroll • \
  f5 refresh • esc quit • f1 help";

const COMMENT_POSTED_STATUS: &str = "Comment posted";
const LOADING_STATUS: &str = "Loading...";
const NO_COMMENTS_STATUS: &str = "No comments yet.";

const COMMENTS_TITLE: &str = "Comments";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press f1 or esc to close help";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Form:
  type     edit the focused field
  tab      switch between author and text
  bksp     delete the last character
  ctrl+u   clear the focused field
  enter    post the comment

Comments:
  ↑ / ↓    move selection
  pg↑ pg↓  page up or down
  home     jump to the first comment
  end      jump to the last comment
  f5       refresh now (ctrl+r also works)

The list also refreshes every minute.

Other:
  f1       toggle this help
  esc      quit (ctrl+c also works)
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let arguments = Arguments::parse();

  if let Some(path) = &arguments.log_file {
    logging::init(path)?;
  }

  let config = Config::load(&arguments).context(APPLICATION_ERROR)?;

  let state = State::initialize(config).context(APPLICATION_ERROR)?;

  let client = Client::new(REQUEST_TIMEOUT)?;

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client, state);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
