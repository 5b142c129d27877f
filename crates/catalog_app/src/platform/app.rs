use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context};
use catalog_core::{update, AppState, Msg, PRODUCTS_PATH};
use catalog_logging::{catalog_info, catalog_warn};

use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::ui;
use super::ui::input::InputCommand;

/// Everything the main loop reacts to.
pub enum AppEvent {
    /// A line typed by the user.
    Input(String),
    /// Stdin reached end of file.
    InputClosed,
    /// A message produced off the main loop (engine results).
    Core(Msg),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LaunchOptions {
    config_path: Option<PathBuf>,
    initial_location: String,
}

impl LaunchOptions {
    fn from_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut config_path = None;
        let mut initial_location = None;
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--config" {
                let path = args.next().context("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            } else if arg.starts_with("--") {
                bail!("unknown option {arg}");
            } else if initial_location.is_some() {
                bail!("unexpected argument {arg}");
            } else {
                initial_location = Some(arg);
            }
        }
        Ok(Self {
            config_path,
            initial_location: initial_location.unwrap_or_else(|| PRODUCTS_PATH.to_string()),
        })
    }
}

pub fn run_app() -> anyhow::Result<()> {
    let options = LaunchOptions::from_args(std::env::args().skip(1))?;

    let (config, problem) = config::load_or_default(options.config_path.as_deref());
    logging::initialize(config.log_destination);
    if let Some(err) = problem {
        catalog_warn!("Using default configuration: {}", err);
    }
    catalog_info!(
        "Starting catalog_app against {} at {}",
        config.base_url,
        options.initial_location
    );

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.service_settings(), event_tx.clone())
        .context("failed to start the product engine")?;
    spawn_input_reader(event_tx);

    let mut app = App {
        state: AppState::new(),
        runner,
        out: io::stdout(),
    };
    app.dispatch(Msg::Navigate(options.initial_location))?;

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Input(line) => {
                if !app.handle_line(&line)? {
                    break;
                }
            }
            AppEvent::InputClosed => break,
            AppEvent::Core(msg) => app.dispatch(msg)?,
        }
    }

    catalog_info!("catalog_app exiting");
    Ok(())
}

struct App {
    state: AppState,
    runner: EffectRunner,
    out: io::Stdout,
}

impl App {
    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);
        let redraw = state.consume_dirty();
        self.state = state;
        if redraw {
            self.draw()?;
        }
        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        for line in ui::render::render(&self.state.view()) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> io::Result<bool> {
        if line.trim().is_empty() {
            return Ok(true);
        }
        let command = match ui::input::parse(line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(self.out, "{err}")?;
                return Ok(true);
            }
        };

        match command {
            InputCommand::Quit => return Ok(false),
            InputCommand::Help => {
                for line in ui::input::HELP {
                    writeln!(self.out, "{line}")?;
                }
            }
            command => match ui::input::to_msg(command, &self.state.view()) {
                Ok(msg) => self.dispatch(msg)?,
                Err(err) => writeln!(self.out, "{err}")?,
            },
        }
        Ok(true)
    }
}

fn spawn_input_reader(events: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if events.send(AppEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = events.send(AppEvent::InputClosed);
    });
}
