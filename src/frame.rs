use crate::CellOffset;
use crate::board::BitBoard;
use crate::camera::CameraView;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Dots per braille character, horizontally
pub const DOTS_X: usize = 2;

/// Dots per braille character, vertically
pub const DOTS_Y: usize = 4;

/// A screen of braille dots. Each dot is one pixel of a [`CameraView`] window.
pub struct Frame {
    /// The dot buffer
    db: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width in dots
    w: usize,

    /// Height in dots
    h: usize,
}

impl Frame {
    pub fn new(w: usize, h: usize) -> Self {
        let (bw, bh) = (w.div_ceil(DOTS_X), h.div_ceil(DOTS_Y));

        // Each braille character is 3 bytes, and newlines one byte
        Self {
            db: vec![false; w * h],
            fb: String::with_capacity(3 * (bw * bh) + bh),
            cp: vec![BRAILLE_EMPTY; bw * bh],
            w,
            h,
        }
    }

    /// A frame covering `cols` by `rows` terminal characters
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self::new(cols as usize * DOTS_X, rows as usize * DOTS_Y)
    }

    /// Clear every dot
    pub fn reset(&mut self) {
        self.db.fill(false);
    }

    /// Turns on a square of dots, clipped to the frame
    pub fn draw_square(&mut self, x: usize, y: usize, s: usize) {
        for y in y..(y + s).min(self.h) {
            for x in x..(x + s).min(self.w) {
                let i = self.xy_from(x, y);
                self.db[i] = true;
            }
        }
    }

    /// Paint the cells `view` shows of `board`, one `cell_size` square of dots per living cell.
    pub fn draw(&mut self, view: &CameraView, board: &BitBoard) {
        self.reset();

        let s = view.cell_size() as usize;
        for (column, row, x, y) in view.visible_cells() {
            if board.cell_state(x, y) {
                self.draw_square(column as usize * s, row as usize * s, s);
            }
        }
    }

    /// Encode the dots as lines of braille characters
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(DOTS_X);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &on) in self.db.iter().enumerate() {
            if on {
                let (x, y) = self.xy_to(n);
                self.cp[(y / DOTS_Y) * bw + (x / DOTS_X)] += Self::get_hex_value(x, y);
            }
        }

        // update framebuffer
        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // every sum of dot values stays inside the braille block
            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }

        &self.fb
    }

    /// Size of the window this frame stands in for, in pixels
    pub fn window_size(&self) -> (CellOffset, CellOffset) {
        (self.w as CellOffset, self.h as CellOffset)
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}
