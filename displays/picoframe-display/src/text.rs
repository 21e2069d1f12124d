//! Text rendering

use crate::color::Rgb565;
use crate::font::{glyph_bit, FontTable};
use crate::framebuffer::Framebuffer;

impl<const W: usize, const H: usize> Framebuffer<'_, W, H> {
    /// Draw one glyph with its top-left corner at (x, y)
    ///
    /// Characters without a glyph draw nothing. Only set bits are
    /// written; the background is left as is.
    pub fn draw_char(&mut self, font: &FontTable, x: i32, y: i32, c: char, color: Rgb565) {
        self.glyph_at(font, i64::from(x), i64::from(y), c, color.to_index());
    }

    fn glyph_at(&mut self, font: &FontTable, x: i64, y: i64, c: char, index: u8) {
        let Some(glyph) = font.glyph(c) else {
            return;
        };

        let bpr = font.bytes_per_row();
        for row in 0..usize::from(font.height()) {
            for col in 0..usize::from(font.width()) {
                if glyph_bit(glyph, bpr, row, col) {
                    self.plot(x + col as i64, y + row as i64, index);
                }
            }
        }
    }

    /// Draw a string starting at (x, y)
    ///
    /// `\n` returns to column `x` one glyph height down. A glyph that
    /// would cross the right edge wraps first. Glyphs whose bottom row
    /// falls below the grid are skipped, but the cursor still advances.
    pub fn draw_text(&mut self, font: &FontTable, x: i32, y: i32, text: &str, color: Rgb565) {
        let index = color.to_index();
        let w = i64::from(font.width());
        let h = i64::from(font.height());
        let x = i64::from(x);
        let (mut cx, mut cy) = (x, i64::from(y));

        for c in text.chars() {
            match c {
                '\n' => {
                    cx = x;
                    cy += h;
                }
                ' ' => cx += w,
                _ => {
                    if cx + w > W as i64 {
                        cx = x;
                        cy += h;
                    }
                    if cy + h <= H as i64 {
                        self.glyph_at(font, cx, cy, c, index);
                    }
                    cx += w;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FONT12, FONT8};
    use crate::framebuffer::FrameStorage;

    /// Compare the cells under a glyph against its bitmap
    fn glyph_matches<const W: usize, const H: usize>(
        fb: &Framebuffer<'_, W, H>,
        font: &FontTable,
        x: i32,
        y: i32,
        c: char,
        index: u8,
    ) -> bool {
        let glyph = font.glyph(c).unwrap();
        let bpr = font.bytes_per_row();
        (0..usize::from(font.height())).all(|row| {
            (0..usize::from(font.width())).all(|col| {
                let cell = fb.get(x + col as i32, y + row as i32).unwrap();
                glyph_bit(glyph, bpr, row, col) == (cell == index)
            })
        })
    }

    #[test]
    fn test_draw_char() {
        let mut storage: FrameStorage<16, 16> = [[0; 16]; 16];
        let mut fb = Framebuffer::new(&mut storage);

        fb.draw_char(&FONT8, 2, 3, 'A', Rgb565::WHITE);
        assert!(glyph_matches(&fb, &FONT8, 2, 3, 'A', 0xFF));
        // 'A' row 0 is 0x38: columns 2..=4 set
        assert_eq!(fb.get(2 + 2, 3), Some(0xFF));
        assert_eq!(fb.get(2, 3), Some(0));
    }

    #[test]
    fn test_draw_char_out_of_range() {
        let mut storage: FrameStorage<16, 16> = [[0; 16]; 16];
        let mut fb = Framebuffer::new(&mut storage);

        fb.draw_char(&FONT8, 0, 0, '\u{1f}', Rgb565::WHITE);
        fb.draw_char(&FONT8, 0, 0, '\u{7f}', Rgb565::WHITE);
        assert!(fb.as_bytes().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_draw_char_clips() {
        let mut storage: FrameStorage<16, 16> = [[0; 16]; 16];
        let mut fb = Framebuffer::new(&mut storage);

        fb.draw_char(&FONT8, 12, 12, '#', Rgb565::WHITE);
        assert!(fb.as_bytes().iter().any(|&c| c == 0xFF));
    }

    #[test]
    fn test_text_newline() {
        let mut storage: FrameStorage<32, 32> = [[0; 32]; 32];
        let mut fb = Framebuffer::new(&mut storage);

        fb.draw_text(&FONT12, 0, 0, "A\nB", Rgb565::WHITE);
        assert!(glyph_matches(&fb, &FONT12, 0, 0, 'A', 0xFF));
        assert!(glyph_matches(&fb, &FONT12, 0, 12, 'B', 0xFF));
    }

    #[test]
    fn test_text_space_advances() {
        let mut storage: FrameStorage<32, 16> = [[0; 32]; 16];
        let mut fb = Framebuffer::new(&mut storage);

        fb.draw_text(&FONT8, 0, 0, " A", Rgb565::WHITE);
        assert!(glyph_matches(&fb, &FONT8, 8, 0, 'A', 0xFF));
        assert!((0..8).all(|row| (0..8).all(|col| fb.get(col, row) == Some(0))));
    }

    #[test]
    fn test_text_wraps_at_right_edge() {
        let mut storage: FrameStorage<20, 20> = [[0; 20]; 20];
        let mut fb = Framebuffer::new(&mut storage);

        // third glyph would need columns 16..24
        fb.draw_text(&FONT8, 0, 0, "AAB", Rgb565::WHITE);
        assert!(glyph_matches(&fb, &FONT8, 0, 0, 'A', 0xFF));
        assert!(glyph_matches(&fb, &FONT8, 8, 0, 'A', 0xFF));
        assert!(glyph_matches(&fb, &FONT8, 0, 8, 'B', 0xFF));
    }

    #[test]
    fn test_text_skips_glyphs_below_screen() {
        let mut storage: FrameStorage<16, 12> = [[0; 16]; 12];
        let mut fb = Framebuffer::new(&mut storage);

        // the glyph would need rows 6..14
        fb.draw_text(&FONT8, 0, 6, "A", Rgb565::WHITE);
        assert!(fb.as_bytes().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_text_cursor_advances_past_skipped_glyph() {
        let mut storage: FrameStorage<16, 16> = [[0; 16]; 16];
        let mut fb = Framebuffer::new(&mut storage);

        // both 'A's fit on row 8; the wrap sends 'B' to row 16 where it
        // no longer fits
        fb.draw_text(&FONT8, 0, 8, "AAB", Rgb565::WHITE);
        assert!(glyph_matches(&fb, &FONT8, 0, 8, 'A', 0xFF));
        assert!(glyph_matches(&fb, &FONT8, 8, 8, 'A', 0xFF));
        assert!((0..8).all(|row| (0..16).all(|col| fb.get(col, row) == Some(0))));
    }

    #[test]
    fn test_text_at_coordinate_limits() {
        let mut storage: FrameStorage<16, 16> = [[0; 16]; 16];
        let mut fb = Framebuffer::new(&mut storage);

        fb.draw_char(&FONT8, i32::MAX - 3, i32::MAX - 3, 'A', Rgb565::WHITE);
        fb.draw_char(&FONT12, i32::MIN, i32::MIN, 'A', Rgb565::WHITE);
        fb.draw_text(&FONT8, i32::MAX, i32::MAX, "AB\nC D\n\n", Rgb565::WHITE);
        fb.draw_text(&FONT12, i32::MIN, i32::MIN, "A B\nC", Rgb565::WHITE);
        fb.draw_text(&FONT8, i32::MAX - 1, 0, "AAAA", Rgb565::WHITE);
        assert!(fb.as_bytes().iter().all(|&c| c == 0));
    }
}
