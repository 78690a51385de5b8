use tracing::debug;

use crate::CellOffset;
use crate::board::BitBoard;

/// Smallest cell size, in pixels, a view can zoom out to
pub const MIN_CELL_SIZE: CellOffset = 3;

/// Largest cell size, in pixels, a view can zoom in to
pub const MAX_CELL_SIZE: CellOffset = 29;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn unit(self) -> (CellOffset, CellOffset) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// The window of cells currently on screen.
///
/// After every operation, each axis of the view is either inside the board (when the view fits)
/// or centered on it (when the view is wider or taller than the board). The two axes are
/// handled independently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraView {
    /// Board column of the leftmost visible cell
    camera_x: CellOffset,

    /// Board row of the topmost visible cell
    camera_y: CellOffset,

    width_in_cells: CellOffset,
    height_in_cells: CellOffset,

    /// Side of a cell on screen, in pixels
    cell_size: CellOffset,

    /// Width of the host window in pixels
    window_width: CellOffset,

    /// Height of the host window in pixels
    window_height: CellOffset,

    min_movement_speed_in_pixels: CellOffset,

    /// How far a single pan moves. Never zero.
    movement_speed_in_cells: CellOffset,
}

impl CameraView {
    /// Create a view centered on `board`. `cell_size` is brought into
    /// `MIN_CELL_SIZE..=MAX_CELL_SIZE`.
    pub fn new(
        window_width: CellOffset,
        window_height: CellOffset,
        cell_size: CellOffset,
        min_movement_speed_in_pixels: CellOffset,
        board: &BitBoard,
    ) -> Self {
        let cell_size = cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
        let window_width = window_width.max(0);
        let window_height = window_height.max(0);

        let width_in_cells = window_width / cell_size;
        let height_in_cells = window_height / cell_size;

        let mut view = Self {
            camera_x: board.columns() / 2 - width_in_cells / 2,
            camera_y: board.rows() / 2 - height_in_cells / 2,
            width_in_cells,
            height_in_cells,
            cell_size,
            window_width,
            window_height,
            min_movement_speed_in_pixels,
            movement_speed_in_cells: Self::movement_speed(min_movement_speed_in_pixels, cell_size),
        };

        view.clamp_to(board);
        view
    }

    pub fn camera_x(&self) -> CellOffset {
        self.camera_x
    }

    pub fn camera_y(&self) -> CellOffset {
        self.camera_y
    }

    pub fn width_in_cells(&self) -> CellOffset {
        self.width_in_cells
    }

    pub fn height_in_cells(&self) -> CellOffset {
        self.height_in_cells
    }

    pub fn cell_size(&self) -> CellOffset {
        self.cell_size
    }

    pub fn window_width(&self) -> CellOffset {
        self.window_width
    }

    pub fn window_height(&self) -> CellOffset {
        self.window_height
    }

    pub fn movement_speed_in_cells(&self) -> CellOffset {
        self.movement_speed_in_cells
    }

    /// Board cell under the middle of the view
    pub fn center(&self) -> (CellOffset, CellOffset) {
        (
            self.camera_x + self.width_in_cells / 2,
            self.camera_y + self.height_in_cells / 2,
        )
    }

    /// Bring the camera back inside `board`, or center it on an axis where the view is larger
    /// than the board.
    pub fn clamp_to(&mut self, board: &BitBoard) {
        self.camera_x = clamp_axis(self.camera_x, self.width_in_cells, board.columns());
        self.camera_y = clamp_axis(self.camera_y, self.height_in_cells, board.rows());
    }

    /// Whether the view lies entirely inside `board`
    pub fn in_bounds(&self, board: &BitBoard) -> bool {
        axis_in_bounds(self.camera_x, self.width_in_cells, board.columns())
            && axis_in_bounds(self.camera_y, self.height_in_cells, board.rows())
    }

    /// Grow (`delta > 0`) or shrink (`delta < 0`) cells by `delta` pixels, keeping the same cell
    /// in the middle of the view.
    ///
    /// Does nothing if the new cell size would leave `MIN_CELL_SIZE..=MAX_CELL_SIZE`. Returns
    /// whether the zoom happened.
    pub fn zoom(&mut self, delta: CellOffset, board: &BitBoard) -> bool {
        let cell_size = self.cell_size.saturating_add(delta);

        if delta == 0 || !(MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&cell_size) {
            debug!(delta, cell_size = self.cell_size, "Rejected zoom");
            return false;
        }

        self.cell_size = cell_size;
        self.refit(board);

        debug!(cell_size, "Zoomed");

        true
    }

    /// The host window changed size. Keeps the cell size and the cell in the middle of the view.
    pub fn resize_window(
        &mut self,
        window_width: CellOffset,
        window_height: CellOffset,
        board: &BitBoard,
    ) {
        self.window_width = window_width.max(0);
        self.window_height = window_height.max(0);
        self.refit(board);
    }

    /// Move the camera by `(dx, dy)` cells, stopping at the board edges.
    ///
    /// A view that isn't already inside the board (it's centered on a board smaller than itself)
    /// can't be moved. Returns whether the move happened.
    pub fn move_by(&mut self, dx: CellOffset, dy: CellOffset, board: &BitBoard) -> bool {
        if !self.in_bounds(board) {
            return false;
        }

        self.camera_x = self.camera_x.saturating_add(dx);
        self.camera_y = self.camera_y.saturating_add(dy);
        self.clamp_to(board);

        true
    }

    /// Move the camera one step of `movement_speed_in_cells` in `direction`
    pub fn pan(&mut self, direction: Direction, board: &BitBoard) -> bool {
        let (dx, dy) = direction.unit();
        let speed = self.movement_speed_in_cells;

        self.move_by(dx * speed, dy * speed, board)
    }

    /// Every cell slot of the view, row by row, as `(column, row, x, y)`: the slot's position in
    /// the view followed by the board cell it shows.
    pub fn visible_cells(
        &self,
    ) -> impl Iterator<Item = (CellOffset, CellOffset, CellOffset, CellOffset)> {
        let (x0, y0) = (self.camera_x, self.camera_y);
        let width = self.width_in_cells;

        (0..self.height_in_cells).flat_map(move |row| {
            (0..width).map(move |column| (column, row, x0 + column, y0 + row))
        })
    }

    /// Recompute the view size from the window and cell size, then place it back over the same
    /// center.
    fn refit(&mut self, board: &BitBoard) {
        let (center_x, center_y) = self.center();

        self.width_in_cells = self.window_width / self.cell_size;
        self.height_in_cells = self.window_height / self.cell_size;

        let center_x = if self.width_in_cells > board.columns() {
            board.columns() / 2
        } else {
            center_x
        };
        let center_y = if self.height_in_cells > board.rows() {
            board.rows() / 2
        } else {
            center_y
        };

        self.camera_x = center_x - self.width_in_cells / 2;
        self.camera_y = center_y - self.height_in_cells / 2;
        self.movement_speed_in_cells =
            Self::movement_speed(self.min_movement_speed_in_pixels, self.cell_size);

        self.clamp_to(board);
    }

    fn movement_speed(min_pixels: CellOffset, cell_size: CellOffset) -> CellOffset {
        (min_pixels / cell_size).max(1)
    }
}

/// Clamp one axis of the camera into `0..=extent - view`, or center it if the view doesn't fit.
fn clamp_axis(pos: CellOffset, view: CellOffset, extent: CellOffset) -> CellOffset {
    if view > extent {
        (extent - view) / 2
    } else {
        pos.clamp(0, extent - view)
    }
}

fn axis_in_bounds(pos: CellOffset, view: CellOffset, extent: CellOffset) -> bool {
    pos >= 0 && pos <= extent - view
}
