#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use gridfall::app::{App, AppResult};
use gridfall::components::{GameState, Input};
use gridfall::{config, systems, ui};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it so panics and log lines
    // land somewhere readable instead of corrupting the alternate screen.
    let log_path = "gridfall.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .expect("Failed to create log file");

    let stderr_handle = std::io::stderr();
    let stderr_fd = stderr_handle.as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    unsafe {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Gridfall");

    if config::Config::force_reload() {
        info!("Configuration loaded successfully");
    } else {
        error!("Failed to load configuration, continuing with defaults");
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let timing = config::Config::current().timing;
    let render_rate = Duration::from_millis(33); // ~30 FPS
    let tick_rate = Duration::from_millis(timing.tick_ms);
    let descent_rate = Duration::from_millis(timing.auto_descent_ms);

    let app = App::new();
    let res = run_app(&mut terminal, app, render_rate, tick_rate, descent_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    render_rate: Duration,
    tick_rate: Duration,
    descent_rate: Duration,
) -> AppResult<()> {
    let mut last_render = Instant::now();
    let mut last_tick = Instant::now();
    let mut last_descent = Instant::now();

    // Flush any pending input events that might be in the buffer
    while crossterm::event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    debug!("Resources initialized");

    loop {
        if app.should_quit {
            return Ok(());
        }

        if last_render.elapsed() >= render_rate {
            terminal.draw(|f| ui::render(f, &mut app))?;
            last_render = Instant::now();
        }

        // Slow trigger: gravity.
        if last_descent.elapsed() >= descent_rate {
            last_descent = Instant::now();
            systems::descent_system(&mut app.world);
        }

        // Fast trigger: input routing, lock detection, cleanup, respawn.
        // The session clock inside App measures the actual tick delta.
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            app.tick();
        }

        // Process keyboard input
        if crossterm::event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                debug!("Key event: {key:?}");

                if key.code == KeyCode::Char('q') {
                    app.should_quit = true;
                    continue;
                }

                let is_game_over = app.world.resource::<GameState>().game_over;

                if is_game_over {
                    // The session is single-use; Enter builds a fresh one.
                    if key.code == KeyCode::Enter {
                        info!("Restarting session");
                        app.reset();
                    }
                    continue;
                }

                // Explicit command mapping: unmapped keys fall through to
                // the no-op arm instead of erroring.
                let mut input = app.world.resource_mut::<Input>();
                match key.code {
                    KeyCode::Left | KeyCode::Char('a') => input.left = true,
                    KeyCode::Right | KeyCode::Char('d') => input.right = true,
                    KeyCode::Down | KeyCode::Char('s') => input.down = true,
                    KeyCode::Up | KeyCode::Char('w' | ' ') => input.rotate = true,
                    _ => (),
                }
            }
        }
    }
}
