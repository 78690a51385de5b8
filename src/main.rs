use std::io;
use std::io::Write;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor;
use crossterm::event;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bitlife::camera::CameraView;
use bitlife::config::Cli;
use bitlife::config::Config;
use bitlife::events::AppEvent;
use bitlife::events::CameraEvent;
use bitlife::events::EngineEvent;
use bitlife::events::Event;
use bitlife::frame::Frame;
use bitlife::io::convert_event;
use bitlife::world::World;

const FRAMERATE: u64 = 60;
const FRAMETIME: Duration = Duration::from_millis(1_000 / FRAMERATE);

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of the way of the board. Run with `RUST_LOG=debug` and
    // redirect stderr to a file to see them.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Cli::parse().into_config().context("Invalid arguments")?;
    info!(?config, "Starting");

    let mut world = World::new(config.rows, config.columns, config.live_cells, config.rules)
        .context("Failed to create the board")?;

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let res = run(&config, &mut world, &mut stdout);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    info!(
        generation = world.generation(),
        population = world.population(),
        "Exiting"
    );

    res
}

/// The board takes every terminal line but the last, which holds the status line
fn board_frame(cols: u16, rows: u16) -> Frame {
    Frame::for_terminal(cols, rows.saturating_sub(1))
}

fn run(config: &Config, world: &mut World, stdout: &mut io::Stdout) -> anyhow::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut frame = board_frame(cols, rows);

    let (w, h) = frame.window_size();
    let mut view = CameraView::new(
        w,
        h,
        config.cell_size,
        config.min_movement_speed_in_pixels,
        world.board(),
    );

    let mut paused = false;
    let mut last_tick = Instant::now();

    loop {
        // Poll events for at most a frame
        if event::poll(FRAMETIME)? {
            match convert_event(event::read()?) {
                None => {}
                Some(Event::AppEvent(AppEvent::Exit)) => break,
                Some(Event::AppEvent(AppEvent::CameraEvent(event))) => match event {
                    CameraEvent::Pan(direction) => {
                        view.pan(direction, world.board());
                    }
                    CameraEvent::Zoom(delta) => {
                        view.zoom(delta, world.board());
                    }
                    CameraEvent::Resize { cols, rows } => {
                        frame = board_frame(cols, rows);

                        let (w, h) = frame.window_size();
                        view.resize_window(w, h, world.board());

                        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
                    }
                },
                Some(Event::EngineEvent(event)) => match event {
                    EngineEvent::Step => {
                        world.tick().context("Failed to advance the world")?;
                    }
                    EngineEvent::TogglePause => paused = !paused,
                    EngineEvent::Reseed => {
                        world
                            .reseed(config.live_cells)
                            .context("Failed to reseed the board")?;
                    }
                    EngineEvent::Clear => world.clear(),
                },
            }
        }

        if !paused && last_tick.elapsed() >= config.tick {
            world.tick().context("Failed to advance the world")?;
            last_tick = Instant::now();
        }

        frame.draw(&view, world.board());
        draw(stdout, &mut frame, world, &view, paused)?;
    }

    Ok(())
}

fn draw(
    stdout: &mut io::Stdout,
    frame: &mut Frame,
    world: &World,
    view: &CameraView,
    paused: bool,
) -> io::Result<()> {
    queue!(stdout, cursor::MoveTo(0, 0))?;

    for line in frame.render().lines() {
        queue!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
    }

    let status = format!(
        "gen {} | pop {} | {} | cell {}px @ ({}, {}){}",
        world.generation(),
        world.population(),
        world.rules(),
        view.cell_size(),
        view.camera_x(),
        view.camera_y(),
        if paused { " | paused" } else { "" },
    );

    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(status)
    )?;

    stdout.flush()
}
