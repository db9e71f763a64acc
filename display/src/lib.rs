use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use vm8_core::{FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Bytes per pixel in an RGB24 texture
const CHANNELS: usize = 3;

/// # Display
/// The machine's display is composed of 64x32 black/white pixels.
/// Lit pixels are drawn white, unlit pixels black, each scaled up to a `scale`x`scale` square.
/// The display only gets a call to `render` when the FrameBuffer is updated.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `title` the window title
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, title: &str, scale: u32) -> Result<Self, String> {
        let scale = scale.max(1);
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                title,
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Display { canvas })
    }

    /// Formats a FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 RGB24 texture is a 1D array of bytes holding concatenated rows of RGB pixels,
    /// so every pixel becomes three equal bytes: 255 when lit, 0 otherwise.
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .rows()
            .flat_map(|row| row.iter())
            .flat_map(|&lit| std::iter::repeat(if lit { 0xFF } else { 0x00 }).take(CHANNELS))
            .collect()
    }

    /// Formats the FrameBuffer as an SDL2 RGB24 texture and renders it.
    /// The canvas stretches the 64x32 texture over the whole window.
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (y, row) in pixels.chunks(DISPLAY_WIDTH * CHANNELS).enumerate() {
                buffer[y * pitch..y * pitch + row.len()].copy_from_slice(row);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
