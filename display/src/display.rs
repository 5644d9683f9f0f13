use log::debug;
use sdl2::pixels::PixelFormatEnum;
use thiserror::Error;

use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8_core::FrameBuffer;

/// Bytes per pixel of an RGB24 texture.
const RGB: usize = 3;

const ON: [u8; RGB] = [0xFF, 0xFF, 0xFF];
const OFF: [u8; RGB] = [0x00, 0x00, 0x00];

/// SDL2 reports most failures as plain strings.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("sdl: {0}")]
    Sdl(String),
}

impl DisplayError {
    fn sdl<E: ToString>(e: E) -> Self {
        DisplayError::Sdl(e.to_string())
    }
}

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `title` the window title
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, title: &str, scale: u32) -> Result<Self, DisplayError> {
        let video_subsystem = sdl.video().map_err(DisplayError::sdl)?;
        let window = video_subsystem
            .window(
                title,
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(DisplayError::sdl)?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(DisplayError::sdl)?;
        debug!("opened {}x scaled window", scale);

        let mut display = Display { canvas };
        display.render(&FrameBuffer::new())?;
        Ok(display)
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 RGB24 texture is a 1D array of bytes that represent concatenated rows of RGB
    /// pixels, which lines up with the FrameBuffer's own row-major layout: every pixel just
    /// becomes three bytes of white or black.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .pixels()
            .iter()
            .flat_map(|&on| if on { ON } else { OFF })
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(DisplayError::sdl)?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture
            .update(None, &pixels, DISPLAY_WIDTH * RGB)
            .map_err(DisplayError::sdl)?;

        self.canvas
            .copy(&texture, None, None)
            .map_err(DisplayError::sdl)?;
        self.canvas.present();
        Ok(())
    }

    /// Changes the window title.
    pub fn set_title(&mut self, title: &str) -> Result<(), DisplayError> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(DisplayError::sdl)
    }
}
