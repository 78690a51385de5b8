use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

use crate::camera::Direction;
use crate::events::AppEvent;
use crate::events::CameraEvent;
use crate::events::EngineEvent;
use crate::events::Event;

/// How many pixels a single zoom key press grows or shrinks cells by
pub const ZOOM_STEP: i32 = 1;

/// Converts a crossterm event into a bitlife event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..
        }) => None,
        CrossTermEvent::Key(key_event) => convert_key(key_event),
        CrossTermEvent::Resize(cols, rows) => Some(Event::AppEvent(AppEvent::CameraEvent(
            CameraEvent::Resize { cols, rows },
        ))),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Event> {
    let camera = |event| Some(Event::AppEvent(AppEvent::CameraEvent(event)));
    let engine = |event| Some(Event::EngineEvent(event));

    match key_event {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('q'),
            ..
        } => Some(Event::AppEvent(AppEvent::Exit)),

        KeyEvent {
            code: KeyCode::Char('h') | KeyCode::Left,
            ..
        } => camera(CameraEvent::Pan(Direction::Left)),
        KeyEvent {
            code: KeyCode::Char('j') | KeyCode::Down,
            ..
        } => camera(CameraEvent::Pan(Direction::Down)),
        KeyEvent {
            code: KeyCode::Char('k') | KeyCode::Up,
            ..
        } => camera(CameraEvent::Pan(Direction::Up)),
        KeyEvent {
            code: KeyCode::Char('l') | KeyCode::Right,
            ..
        } => camera(CameraEvent::Pan(Direction::Right)),

        KeyEvent {
            code: KeyCode::Char('K' | '+' | '='),
            ..
        } => camera(CameraEvent::Zoom(ZOOM_STEP)),
        KeyEvent {
            code: KeyCode::Char('J' | '-'),
            ..
        } => camera(CameraEvent::Zoom(-ZOOM_STEP)),

        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => engine(EngineEvent::TogglePause),
        KeyEvent {
            code: KeyCode::Char('n'),
            ..
        } => engine(EngineEvent::Step),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => engine(EngineEvent::Reseed),
        KeyEvent {
            code: KeyCode::Char('c'),
            ..
        } => engine(EngineEvent::Clear),

        _ => None,
    }
}
