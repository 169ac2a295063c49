use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use pricewatch_core::{update, AppState, ChartPanel, Msg};
use pricewatch_engine::{EngineError, EngineHandle};
use pricewatch_logging::{watch_info, watch_warn};
use thiserror::Error;

use super::config::{self, ConfigError};
use super::effects::EffectRunner;
use super::logging;
use super::ui::{self, input::UserInput};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Everything the dispatch loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Core(Msg),
    Quit,
}

pub fn run_app() -> Result<(), AppError> {
    let path = config::config_path_from_args(std::env::args().skip(1));
    let config = config::load_config(&path)?;
    logging::initialize(config.log_destination, config.log_level());
    watch_info!("Loaded configuration from {:?}", path);

    let (engine, events) = EngineHandle::new(config.client_settings())?;
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(engine.clone(), events, event_tx.clone());

    let panels = config.chart_panels();
    spawn_input_reader(event_tx.clone(), panels.clone());
    let _ = event_tx.send(AppEvent::Core(Msg::PageOpened {
        breadcrumb: config.breadcrumb.clone(),
        panels,
    }));

    let mut state = AppState::new();
    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Core(msg) => state = dispatch(state, msg, &runner),
            AppEvent::Quit => {
                dispatch(state, Msg::NavigatedAway, &runner);
                break;
            }
        }
    }

    engine.shutdown();
    watch_info!("Bye");
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (mut state, effects) = update(state, msg);
    runner.enqueue(effects);
    if state.consume_dirty() {
        ui::present(&ui::render::render(&state.view()));
    }
    state
}

/// Read commands from stdin until EOF or `quit`.
fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>, panels: Vec<ChartPanel>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let event = match ui::input::parse_line(&line) {
                Some(UserInput::Answer(answer)) => AppEvent::Core(Msg::PromptAnswered(answer)),
                Some(UserInput::Activate(id)) => AppEvent::Core(Msg::PanelActivated { id }),
                Some(UserInput::DataChanged { id, has_data }) => {
                    AppEvent::Core(Msg::PanelDataChanged { id, has_data })
                }
                Some(UserInput::Open(breadcrumb)) => AppEvent::Core(Msg::PageOpened {
                    breadcrumb,
                    panels: panels.clone(),
                }),
                Some(UserInput::Leave) => AppEvent::Core(Msg::NavigatedAway),
                Some(UserInput::Quit) => break,
                None => {
                    watch_warn!("Unrecognised input {:?}", line);
                    continue;
                }
            };
            if event_tx.send(event).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::Quit);
    });
}
