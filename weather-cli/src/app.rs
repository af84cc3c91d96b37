//! Interactive terminal loop.
//!
//! Key presses become reducer actions. Fetch effects run as tokio tasks and
//! send their result action back over a channel; overlapping lookups are not
//! sequenced, so whichever resolves last is what the screen shows.

use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use tokio::sync::mpsc;
use weather_core::{Action, Effect, WeatherController, WeatherProvider, run_effect};

use crate::{
    input::{self, Command},
    ui,
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const SPINNER_TICK: Duration = Duration::from_millis(80);

pub async fn run(provider: Arc<dyn WeatherProvider>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_app(&mut terminal, provider).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    provider: Arc<dyn WeatherProvider>,
) -> Result<()> {
    let mut controller = WeatherController::new(provider);
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

    let mut tick: u32 = 0;
    let mut last_tick = Instant::now();

    tracing::info!("interactive session started");

    loop {
        terminal.draw(|frame| ui::render(frame, controller.state(), tick))?;

        while let Ok(action) = rx.try_recv() {
            tracing::debug!(?action, "lookup resolved");
            controller.dispatch(action);
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                match input::map_key(key, controller.state()) {
                    Some(Command::Quit) => break,
                    Some(Command::Dispatch(action)) => {
                        if let Some(effect) = controller.dispatch(action) {
                            spawn_effect(controller.provider(), effect, tx.clone());
                        }
                    }
                    None => {}
                }
            }
        }

        if last_tick.elapsed() >= SPINNER_TICK {
            tick = tick.wrapping_add(1);
            last_tick = Instant::now();
        }
    }

    tracing::info!("interactive session ended");
    Ok(())
}

fn spawn_effect(
    provider: Arc<dyn WeatherProvider>,
    effect: Effect,
    tx: mpsc::UnboundedSender<Action>,
) {
    tracing::info!(?effect, "submitting weather lookup");
    tokio::spawn(async move {
        let action = run_effect(provider.as_ref(), effect).await;
        // Receiver is gone once the user quits.
        let _ = tx.send(action);
    });
}
