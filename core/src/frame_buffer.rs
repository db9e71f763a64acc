use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # Frame Buffer
/// The 64x32 monochrome display, indexed as `[y][x]`.
///
/// Only CLS and DRW write to it. Presentation reads a copy through `Machine::get_frame`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// XORs `sprite` onto the display with its top left corner at `(x, y)`.
    ///
    /// Each byte is one row of 8 pixels, most significant bit leftmost.
    /// Every pixel wraps around the edges independently.
    /// Returns whether any lit pixel was switched off.
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (y as usize + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if byte & (0x80 >> bit) == 0 {
                    continue;
                }
                let px = (x as usize + bit) % DISPLAY_WIDTH;
                let pixel = &mut self.pixels[py][px];
                collision |= *pixel;
                *pixel ^= true;
            }
        }
        collision
    }

    /// Whether the pixel at `(x, y)` is lit; coordinates wrap like `draw`
    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; DISPLAY_WIDTH]> {
        self.pixels.iter()
    }

    pub fn lit(&self) -> usize {
        self.pixels.iter().flatten().filter(|&&p| p).count()
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

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row_bits(frame: &FrameBuffer, y: usize, x: usize, width: usize) -> Vec<bool> {
        (x..x + width).map(|x| frame.is_on(x, y)).collect()
    }

    #[test]
    fn test_draw_sets_pixels_msb_first() {
        let mut frame = FrameBuffer::new();
        let collision = frame.draw(2, 1, &[0b1010_0001]);
        assert!(!collision);
        assert_eq!(
            row_bits(&frame, 1, 2, 8),
            [true, false, true, false, false, false, false, true]
        );
        assert_eq!(frame.lit(), 3);
    }

    #[test]
    fn test_draw_xors_and_reports_collision() {
        let mut frame = FrameBuffer::new();
        frame.draw(0, 0, &[0b0101_0000]);
        let collision = frame.draw(0, 0, &[0b1100_0000]);
        assert!(collision);
        assert_eq!(row_bits(&frame, 0, 0, 4), [true, false, false, true]);
    }

    #[test]
    fn test_collision_from_early_row_is_kept() {
        let mut frame = FrameBuffer::new();
        frame.draw(0, 0, &[0x80]);
        // the first row collides, the second doesn't
        assert!(frame.draw(0, 0, &[0x80, 0x80]));
    }

    #[test]
    fn test_draw_wraps_both_axes() {
        let mut frame = FrameBuffer::new();
        frame.draw(62, 31, &[0xF0, 0xF0]);
        assert!(frame.is_on(62, 31));
        assert!(frame.is_on(63, 31));
        assert!(frame.is_on(0, 31));
        assert!(frame.is_on(1, 31));
        assert!(frame.is_on(62, 0));
        assert!(frame.is_on(1, 0));
        assert_eq!(frame.lit(), 8);
    }

    #[test]
    fn test_clear() {
        let mut frame = FrameBuffer::new();
        frame.draw(10, 10, &[0xFF; 8]);
        frame.clear();
        assert_eq!(frame.lit(), 0);
    }

    proptest! {
        #[test]
        fn prop_clear_turns_every_pixel_off(
            draws in prop::collection::vec((any::<u8>(), any::<u8>(), prop::collection::vec(any::<u8>(), 0..16)), 0..8)
        ) {
            let mut frame = FrameBuffer::new();
            for (x, y, sprite) in &draws {
                frame.draw(*x, *y, sprite);
            }
            frame.clear();
            prop_assert_eq!(frame, FrameBuffer::new());
            frame.clear();
            prop_assert_eq!(frame, FrameBuffer::new());
        }

        #[test]
        fn prop_drawing_twice_restores_frame(
            background in prop::collection::vec(any::<u8>(), 0..16),
            x in any::<u8>(),
            y in any::<u8>(),
            sprite in prop::collection::vec(any::<u8>(), 1..16),
        ) {
            let mut frame = FrameBuffer::new();
            frame.draw(x.wrapping_add(3), y.wrapping_add(5), &background);
            let before = frame;

            frame.draw(x, y, &sprite);
            frame.draw(x, y, &sprite);

            prop_assert_eq!(frame, before);
        }

        #[test]
        fn prop_redraw_on_blank_frame_collides(
            x in any::<u8>(),
            y in any::<u8>(),
            sprite in prop::collection::vec(1..=u8::MAX, 1..16),
        ) {
            let mut frame = FrameBuffer::new();
            prop_assert!(!frame.draw(x, y, &sprite));
            prop_assert!(frame.draw(x, y, &sprite));
            prop_assert_eq!(frame.lit(), 0);
        }
    }
}
