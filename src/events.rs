use crate::camera::Direction;

pub enum Event {
    EngineEvent(EngineEvent),
    AppEvent(AppEvent),
}

pub enum EngineEvent {
    /// Advance the world by a single generation, even while paused
    Step,

    /// Stop or resume advancing the world on every tick
    TogglePause,

    /// Replace the board with a freshly seeded one
    Reseed,

    /// Kill every cell
    Clear,
}

pub enum AppEvent {
    CameraEvent(CameraEvent),

    /// Exit the application
    Exit,
}

pub enum CameraEvent {
    Pan(Direction),

    /// Change the cell size by this many pixels
    Zoom(i32),

    /// The terminal is now `cols` by `rows` characters
    Resize { cols: u16, rows: u16 },
}
