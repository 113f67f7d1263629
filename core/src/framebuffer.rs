use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # Frame buffer
/// 64x32 monochrome pixels stored row by row, so `(x, y)` lives at
/// `y * DISPLAY_WIDTH + x`.
///
/// Sprites are clipped at the right and bottom edges rather than wrapped.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [bool; DISPLAY_WIDTH * DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [false; DISPLAY_WIDTH * DISPLAY_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        DISPLAY_WIDTH
    }

    pub fn height(&self) -> usize {
        DISPLAY_HEIGHT
    }

    pub fn clear(&mut self) {
        self.pixels = [false; DISPLAY_WIDTH * DISPLAY_HEIGHT];
    }

    /// Off for any coordinate outside the screen
    pub fn get(&self, x: usize, y: usize) -> bool {
        Self::index(x, y).map_or(false, |i| self.pixels[i])
    }

    /// Ignores coordinates outside the screen
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        if let Some(i) = Self::index(x, y) {
            self.pixels[i] = on;
        }
    }

    /// XORs an 8-pixel-wide sprite onto the screen with its top left at `(x, y)`.
    ///
    /// Each byte of `rows` is one row, most significant bit leftmost.
    /// Returns true if any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u8]) -> bool {
        let mut collided = false;
        for (row, byte) in rows.iter().enumerate() {
            for col in 0..8 {
                if byte & (0x80 >> col) == 0 {
                    continue;
                }
                if let Some(i) = Self::index(x + col, y + row) {
                    collided |= self.pixels[i];
                    self.pixels[i] ^= true;
                }
            }
        }
        collided
    }

    /// Every pixel in row-major order
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks(DISPLAY_WIDTH)
    }

    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    fn index(x: usize, y: usize) -> Option<usize> {
        if x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT {
            Some(y * DISPLAY_WIDTH + x)
        } else {
            None
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&p| if p { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
