use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

const PIXEL_COUNT: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// # Frame buffer
/// The 64x32 monochrome screen. Each pixel is either on or off.
///
/// Pixels are stored row-major so a renderer can walk them as one flat slice;
/// pixel (x, y) lives at `y * DISPLAY_WIDTH + x`.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [bool; PIXEL_COUNT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [false; PIXEL_COUNT],
        }
    }

    /// All pixels, row by row.
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Whether the pixel at (x, y) is on; coordinates wrap around the screen edges.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[Self::index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.pixels[Self::index(x, y)] = on;
    }

    /// Flips the pixel at (x, y) and returns true if it was turned off.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[Self::index(x, y)];
        *pixel = !*pixel;
        !*pixel
    }

    pub fn clear(&mut self) {
        self.pixels = [false; PIXEL_COUNT];
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|pixel| !pixel)
    }

    fn index(x: usize, y: usize) -> usize {
        (y % DISPLAY_HEIGHT) * DISPLAY_WIDTH + (x % DISPLAY_WIDTH)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.pixels.chunks(DISPLAY_WIDTH) {
            let line: String = row.iter().map(|&on| if on { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
