use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use zmenu::core::load_config_or_default;
use zmenu::tui::crossterm::into_host_input;
use zmenu::tui::terminal_guard::TerminalGuard;
use zmenu::tui::{DemoView, Flow};

mod logging;

/// Poll interval while no close timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(500);

fn main() -> io::Result<()> {
    let mut config_path: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--config=") {
            config_path = Some(PathBuf::from(value));
        }
    }

    let _logging = logging::init();
    let config = config_path
        .as_deref()
        .map(load_config_or_default)
        .unwrap_or_default();
    tracing::info!(close_delay_ms = config.close_delay_ms, "starting demo");

    let mut view =
        DemoView::new(config).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

    let guard = TerminalGuard::new()?;
    let restorer = guard.restorer();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restorer.restore();
        tracing::error!(panic = %info, "panic");
        eprintln!("{info}");
    }));

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    loop {
        view.tick(Instant::now());
        terminal.draw(|frame| view.render(frame))?;

        let timeout = view
            .next_deadline()
            .map_or(IDLE_POLL, |deadline| {
                deadline.saturating_duration_since(Instant::now())
            });
        if !crossterm::event::poll(timeout)? {
            continue;
        }
        let input = into_host_input(crossterm::event::read()?);
        if view.handle_input(input, Instant::now()) == Flow::Quit {
            break;
        }
    }

    drop(guard);
    tracing::info!("demo exited");
    Ok(())
}
