//! Display sink abstraction and an in-memory monochrome surface.
//!
//! The engine draws through [`DisplaySink`], an 84x48 monochrome pixel
//! interface modelled on a small LCD driver: pixel set/get, rectangle and
//! line primitives, string printing, and an explicit refresh. The bundled
//! [`MonoFrame`] implementation keeps the surface in memory and can render
//! itself as ASCII for the terminal front end and for tests.

/// Display width in pixels.
pub const FRAME_WIDTH: usize = 84;

/// Display height in pixels.
pub const FRAME_HEIGHT: usize = 48;

/// How a rectangle is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RectStyle {
    /// Every pixel set.
    Fill,
    /// Every pixel cleared.
    Erase,
    /// One-pixel border only.
    Outline,
}

/// A fixed 84x48 monochrome pixel surface.
///
/// `draw_rect`, `draw_line` and `print_string` have default
/// implementations in terms of `set_pixel`; a hardware-backed sink only
/// needs the pixel accessors, `clear`, and `refresh`.
pub trait DisplaySink {
    fn clear(&mut self);
    fn set_pixel(&mut self, x: usize, y: usize, on: bool);
    fn get_pixel(&self, x: usize, y: usize) -> bool;

    /// Presents the drawn frame. A memory surface may treat this as a
    /// no-op; a hardware driver flushes its buffer here.
    fn refresh(&mut self);

    fn draw_rect(&mut self, x: usize, y: usize, w: usize, h: usize, style: RectStyle) {
        for dy in 0..h {
            for dx in 0..w {
                let border = dx == 0 || dy == 0 || dx == w - 1 || dy == h - 1;
                let (px, py) = (x + dx, y + dy);
                if px >= FRAME_WIDTH || py >= FRAME_HEIGHT {
                    continue;
                }
                match style {
                    RectStyle::Fill => self.set_pixel(px, py, true),
                    RectStyle::Erase => self.set_pixel(px, py, false),
                    RectStyle::Outline => {
                        if border {
                            self.set_pixel(px, py, true);
                        }
                    }
                }
            }
        }
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs());
        for step in 0..=steps {
            let x = if steps == 0 { x0 } else { x0 + dx * step / steps };
            let y = if steps == 0 { y0 } else { y0 + dy * step / steps };
            if (0..FRAME_WIDTH as i32).contains(&x) && (0..FRAME_HEIGHT as i32).contains(&y) {
                self.set_pixel(x as usize, y as usize, true);
            }
        }
    }

    /// Prints text with the built-in 3x5 font, 4 pixels per column.
    ///
    /// Lowercase letters are uppercased; characters without a glyph
    /// advance the cursor without drawing.
    fn print_string(&mut self, text: &str, x: usize, y: usize) {
        let mut cursor = x;
        for c in text.chars() {
            if let Some(bits) = font::glyph(c.to_ascii_uppercase()) {
                for row in 0..5 {
                    for col in 0..3 {
                        if bits & (1 << (14 - (row * 3 + col))) != 0 {
                            let (px, py) = (cursor + col, y + row);
                            if px < FRAME_WIDTH && py < FRAME_HEIGHT {
                                self.set_pixel(px, py, true);
                            }
                        }
                    }
                }
            }
            cursor += 4;
        }
    }
}

/// In-memory monochrome frame, one `u64` bitmask per pixel column.
#[derive(Clone)]
pub struct MonoFrame {
    columns: [u64; FRAME_WIDTH],
}

impl Default for MonoFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl MonoFrame {
    pub const fn new() -> Self {
        Self {
            columns: [0; FRAME_WIDTH],
        }
    }

    /// Renders the frame as ASCII rows, '#' for set pixels, '.' for clear.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((FRAME_WIDTH + 1) * FRAME_HEIGHT);
        for y in 0..FRAME_HEIGHT {
            for column in &self.columns {
                out.push(if column & (1 << y) != 0 { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }

    /// Number of set pixels, handy for coverage assertions.
    pub fn lit_count(&self) -> u32 {
        self.columns.iter().map(|c| c.count_ones()).sum()
    }
}

impl DisplaySink for MonoFrame {
    fn clear(&mut self) {
        self.columns = [0; FRAME_WIDTH];
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= FRAME_WIDTH || y >= FRAME_HEIGHT {
            return;
        }
        if on {
            self.columns[x] |= 1 << y;
        } else {
            self.columns[x] &= !(1 << y);
        }
    }

    fn get_pixel(&self, x: usize, y: usize) -> bool {
        if x >= FRAME_WIDTH || y >= FRAME_HEIGHT {
            return false;
        }
        self.columns[x] & (1 << y) != 0
    }

    fn refresh(&mut self) {}
}

/// 3x5 pixel glyphs for digits and uppercase letters.
mod font {
    /// Glyph rows packed into 15 bits, row 0 in bits 14..12, left-most
    /// pixel in the high bit of each row.
    const DIGITS: [u16; 10] = [
        0b111_101_101_101_111, // 0
        0b010_110_010_010_111, // 1
        0b111_001_111_100_111, // 2
        0b111_001_111_001_111, // 3
        0b101_101_111_001_001, // 4
        0b111_100_111_001_111, // 5
        0b111_100_111_101_111, // 6
        0b111_001_001_010_010, // 7
        0b111_101_111_101_111, // 8
        0b111_101_111_001_111, // 9
    ];

    const LETTERS: [u16; 26] = [
        0b010_101_111_101_101, // A
        0b110_101_110_101_110, // B
        0b011_100_100_100_011, // C
        0b110_101_101_101_110, // D
        0b111_100_110_100_111, // E
        0b111_100_110_100_100, // F
        0b011_100_101_101_011, // G
        0b101_101_111_101_101, // H
        0b111_010_010_010_111, // I
        0b001_001_001_101_010, // J
        0b101_110_100_110_101, // K
        0b100_100_100_100_111, // L
        0b101_111_111_101_101, // M
        0b110_101_101_101_101, // N
        0b010_101_101_101_010, // O
        0b110_101_110_100_100, // P
        0b010_101_101_110_011, // Q
        0b110_101_110_110_101, // R
        0b011_100_010_001_110, // S
        0b111_010_010_010_010, // T
        0b101_101_101_101_111, // U
        0b101_101_101_101_010, // V
        0b101_101_111_111_101, // W
        0b101_101_010_101_101, // X
        0b101_101_010_010_010, // Y
        0b111_001_010_100_111, // Z
    ];

    pub(super) fn glyph(c: char) -> Option<u16> {
        match c {
            '0'..='9' => Some(DIGITS[c as usize - '0' as usize]),
            'A'..='Z' => Some(LETTERS[c as usize - 'A' as usize]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixels_round_trip_and_clear() {
        let mut frame = MonoFrame::new();
        assert!(!frame.get_pixel(10, 10));
        frame.set_pixel(10, 10, true);
        frame.set_pixel(83, 47, true);
        assert!(frame.get_pixel(10, 10));
        assert!(frame.get_pixel(83, 47));
        frame.set_pixel(10, 10, false);
        assert!(!frame.get_pixel(10, 10));
        frame.clear();
        assert_eq!(frame.lit_count(), 0);
    }

    #[test]
    fn test_out_of_bounds_pixels_are_ignored() {
        let mut frame = MonoFrame::new();
        frame.set_pixel(84, 0, true);
        frame.set_pixel(0, 48, true);
        assert_eq!(frame.lit_count(), 0);
        assert!(!frame.get_pixel(200, 200));
    }

    #[test]
    fn test_outline_rect_sets_only_the_border() {
        let mut frame = MonoFrame::new();
        frame.draw_rect(2, 2, 5, 4, RectStyle::Outline);
        // perimeter of a 5x4 rect is 14 pixels
        assert_eq!(frame.lit_count(), 14);
        assert!(frame.get_pixel(2, 2));
        assert!(frame.get_pixel(6, 5));
        assert!(!frame.get_pixel(3, 3));
    }

    #[test]
    fn test_filled_rect_covers_its_area() {
        let mut frame = MonoFrame::new();
        frame.draw_rect(0, 0, 3, 3, RectStyle::Fill);
        assert_eq!(frame.lit_count(), 9);
        frame.draw_rect(1, 1, 1, 1, RectStyle::Erase);
        assert_eq!(frame.lit_count(), 8);
    }

    #[test]
    fn test_line_endpoints_are_drawn() {
        let mut frame = MonoFrame::new();
        frame.draw_line(0, 0, 10, 5, true);
        assert!(frame.get_pixel(0, 0));
        assert!(frame.get_pixel(10, 5));
        assert!(frame.lit_count() >= 11);
    }

    #[test]
    fn test_print_string_draws_known_glyphs() {
        let mut frame = MonoFrame::new();
        frame.print_string("0", 0, 0);
        // the zero glyph lights 12 of its 15 cells
        assert_eq!(frame.lit_count(), 12);
        frame.clear();
        frame.print_string("a b", 0, 0);
        assert!(frame.lit_count() > 0);
        // space advances without drawing: 'b' starts at x=8
        assert!(frame.get_pixel(8, 0));
    }
}
