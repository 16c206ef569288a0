//! # Framebuffer Graphics Module
//!
//! Drawing into the linear 8-bit-per-pixel framebuffer handed over by the
//! boot loader. Each byte is a palette index; pixel `(x, y)` lives at
//! `y * width + x`.
//!
//! ## Modules
//!
//! - `color`: palette indices, the default table, and DAC programming
//! - `font`: indexing into the 8×16 glyph table
//!
//! ## Bounds
//!
//! The view checks once, at construction, that the buffer covers
//! `width × height`. The drawing primitives themselves do no clipping: a
//! rectangle, string or block that runs off the screen is a caller bug and
//! panics on the slice index.

pub mod color;
pub mod font;

use crate::memory_map::BootInfo;

use self::color::Color;
use self::font::{Font, Glyph, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Height of the taskbar strip at the bottom of the desktop.
pub const TASKBAR_HEIGHT: usize = 28;

pub struct Framebuffer<'a> {
    pixels: &'a mut [u8],
    pub width: usize,
    pub height: usize,
}

impl<'a> Framebuffer<'a> {
    pub fn new(pixels: &'a mut [u8], width: usize, height: usize) -> Result<Self, &'static str> {
        if pixels.len() < width * height {
            return Err("framebuffer smaller than width * height");
        }
        Ok(Self { pixels, width, height })
    }
}

impl Framebuffer<'static> {
    /// View the VRAM described by the boot information block.
    ///
    /// # Safety
    /// `info.vram` must be mapped for `scrnx * scrny` bytes. Several views may
    /// exist at once (main flow and interrupt handlers); they must draw to
    /// disjoint areas.
    pub unsafe fn from_boot_info(info: &BootInfo) -> Result<Self, &'static str> {
        let len = info.width() * info.height();
        let pixels = core::slice::from_raw_parts_mut(info.vram as usize as *mut u8, len);
        Self::new(pixels, info.width(), info.height())
    }
}

impl Framebuffer<'_> {
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.pixels
    }

    /// Fill the inclusive rectangle `(x0, y0)..=(x1, y1)`. An inverted
    /// rectangle draws nothing.
    pub fn box_fill(&mut self, color: Color, x0: usize, y0: usize, x1: usize, y1: usize) {
        if x0 > x1 {
            return;
        }
        let c = color.index();
        for y in y0..=y1 {
            let row = y * self.width;
            self.pixels[row + x0..=row + x1].fill(c);
        }
    }

    /// Draw one glyph with its top-left corner at `(x, y)`. Clear bits leave
    /// the pixel underneath alone.
    pub fn put_font(&mut self, x: usize, y: usize, color: Color, glyph: &Glyph) {
        let c = color.index();
        for (i, &bits) in glyph.iter().enumerate() {
            let row = (y + i) * self.width + x;
            for col in 0..GLYPH_WIDTH {
                if bits & (0x80 >> col) != 0 {
                    self.pixels[row + col] = c;
                }
            }
        }
    }

    /// Draw `text` left to right, 8 pixels per character, up to the first
    /// zero byte.
    pub fn put_string(&mut self, x: usize, y: usize, color: Color, font: &Font<'_>, text: &[u8]) {
        let mut x = x;
        for &code in text.iter().take_while(|&&b| b != 0) {
            self.put_font(x, y, color, font.glyph(code));
            x += GLYPH_WIDTH;
        }
    }

    /// Copy a `width × height` block from `source` (rows `source_stride`
    /// bytes apart) to `(x0, y0)`.
    pub fn put_block(
        &mut self,
        width: usize,
        height: usize,
        x0: usize,
        y0: usize,
        source: &[u8],
        source_stride: usize,
    ) {
        for y in 0..height {
            let dst = (y0 + y) * self.width + x0;
            let src = y * source_stride;
            self.pixels[dst..dst + width].copy_from_slice(&source[src..src + width]);
        }
    }

    /// Desktop background, taskbar, start button and tray.
    pub fn init_screen(&mut self) {
        let (xs, ys) = (self.width, self.height);

        self.box_fill(Color::DarkCyan, 0, 0, xs - 1, ys - 29);

        self.box_fill(Color::LightGray, 0, ys - 28, xs - 1, ys - 28);
        self.box_fill(Color::White, 0, ys - 27, xs - 1, ys - 27);
        self.box_fill(Color::LightGray, 0, ys - 26, xs - 1, ys - 1);

        // start button, raised
        self.box_fill(Color::White, 3, ys - 24, 59, ys - 24);
        self.box_fill(Color::White, 2, ys - 24, 2, ys - 4);
        self.box_fill(Color::DarkGray, 3, ys - 4, 59, ys - 4);
        self.box_fill(Color::DarkGray, 59, ys - 23, 59, ys - 5);
        self.box_fill(Color::Black, 2, ys - 3, 59, ys - 3);
        self.box_fill(Color::Black, 60, ys - 24, 60, ys - 3);

        // tray, sunken
        self.box_fill(Color::DarkGray, xs - 47, ys - 24, xs - 4, ys - 24);
        self.box_fill(Color::DarkGray, xs - 47, ys - 23, xs - 47, ys - 4);
        self.box_fill(Color::White, xs - 47, ys - 3, xs - 4, ys - 3);
        self.box_fill(Color::White, xs - 3, ys - 24, xs - 3, ys - 3);
    }
}

/// Top-left of the status strip the interrupt handlers overwrite.
pub const STATUS_LINE_WIDTH: usize = 32 * GLYPH_WIDTH;
pub const STATUS_LINE_HEIGHT: usize = GLYPH_HEIGHT;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::framebuffer::font::FONT_BYTES;

    const W: usize = 320;
    const H: usize = 200;

    fn screen(fill: u8) -> Vec<u8> {
        vec![fill; W * H]
    }

    #[test]
    fn test_new_rejects_short_buffer() {
        let mut buf = vec![0u8; W * H - 1];
        assert!(Framebuffer::new(&mut buf, W, H).is_err());
    }

    #[test]
    fn test_box_fill_covers_exact_rectangle() {
        let mut buf = screen(0xaa);
        let mut fb = Framebuffer::new(&mut buf, W, H).unwrap();
        let (x0, y0, x1, y1) = (10, 20, 41, 27);

        fb.box_fill(Color::Red, x0, y0, x1, y1);

        let mut filled = 0;
        for y in 0..H {
            for x in 0..W {
                let inside = (x0..=x1).contains(&x) && (y0..=y1).contains(&y);
                let p = fb.pixel(x, y);
                if inside {
                    assert_eq!(p, Color::Red.index());
                    filled += 1;
                } else {
                    assert_eq!(p, 0xaa, "({}, {}) touched", x, y);
                }
            }
        }
        assert_eq!(filled, (x1 - x0 + 1) * (y1 - y0 + 1));
    }

    #[test]
    fn test_box_fill_single_pixel() {
        let mut buf = screen(0);
        let mut fb = Framebuffer::new(&mut buf, W, H).unwrap();
        fb.box_fill(Color::White, W - 1, H - 1, W - 1, H - 1);
        assert_eq!(fb.as_bytes().iter().filter(|&&p| p != 0).count(), 1);
        assert_eq!(fb.pixel(W - 1, H - 1), Color::White.index());
    }

    #[test]
    fn test_box_fill_inverted_draws_nothing() {
        let mut buf = screen(0x33);
        let mut fb = Framebuffer::new(&mut buf, W, H).unwrap();
        fb.box_fill(Color::White, 10, 0, 5, 0);
        fb.box_fill(Color::White, 0, 10, 0, 5);
        assert!(fb.as_bytes().iter().all(|&p| p == 0x33));
    }

    #[test]
    #[should_panic]
    fn test_box_fill_past_end_panics() {
        let mut buf = screen(0);
        let mut fb = Framebuffer::new(&mut buf, W, H).unwrap();
        fb.box_fill(Color::White, 0, H - 1, W - 1, H);
    }

    #[test]
    fn test_put_font_solid_glyph_fills_cell() {
        let mut buf = screen(0x55);
        let mut fb = Framebuffer::new(&mut buf, W, H).unwrap();
        fb.put_font(16, 32, Color::Yellow, &[0xff; GLYPH_HEIGHT]);

        for y in 0..H {
            for x in 0..W {
                let inside = (16..24).contains(&x) && (32..48).contains(&y);
                let want = if inside { Color::Yellow.index() } else { 0x55 };
                assert_eq!(fb.pixel(x, y), want);
            }
        }
    }

    #[test]
    fn test_put_font_empty_glyph_keeps_background() {
        let mut buf: Vec<u8> = (0..W * H).map(|i| (i % 251) as u8).collect();
        let before = buf.clone();
        let mut fb = Framebuffer::new(&mut buf, W, H).unwrap();
        fb.put_font(0, 0, Color::White, &[0; GLYPH_HEIGHT]);
        assert_eq!(fb.as_bytes(), &before[..]);
    }

    #[test]
    fn test_put_font_msb_is_leftmost() {
        let mut buf = screen(0);
        let mut fb = Framebuffer::new(&mut buf, W, H).unwrap();
        let mut glyph = [0u8; GLYPH_HEIGHT];
        glyph[0] = 0x80;
        glyph[15] = 0x01;
        fb.put_font(8, 8, Color::White, &glyph);

        assert_eq!(fb.pixel(8, 8), 7);
        assert_eq!(fb.pixel(15, 23), 7);
        assert_eq!(fb.as_bytes().iter().filter(|&&p| p != 0).count(), 2);
    }

    #[test]
    fn test_put_string_stops_at_nul_and_advances() {
        let mut bytes = [0u8; FONT_BYTES];
        for code in [b'A' as usize, b'B' as usize] {
            bytes[code * GLYPH_HEIGHT..(code + 1) * GLYPH_HEIGHT].fill(0x80);
        }
        let font = Font::from_bytes(&bytes);
        let mut buf = screen(0);
        let mut fb = Framebuffer::new(&mut buf, W, H).unwrap();

        fb.put_string(4, 0, Color::Green, &font, b"AB\0A");

        assert_eq!(fb.pixel(4, 0), Color::Green.index());
        assert_eq!(fb.pixel(12, 15), Color::Green.index());
        assert_eq!(fb.pixel(20, 0), 0);
        assert_eq!(fb.as_bytes().iter().filter(|&&p| p != 0).count(), 2 * GLYPH_HEIGHT);
    }

    #[test]
    fn test_put_block_copies_sprite() {
        let sprite: Vec<u8> = (0..16 * 16).map(|i| i as u8).collect();
        let mut buf = screen(0xee);
        let mut fb = Framebuffer::new(&mut buf, W, H).unwrap();

        fb.put_block(16, 16, 100, 50, &sprite, 16);

        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(fb.pixel(100 + x, 50 + y), sprite[y * 16 + x]);
            }
        }
        assert_eq!(fb.pixel(99, 50), 0xee);
        assert_eq!(fb.pixel(116, 50), 0xee);
        assert_eq!(fb.pixel(100, 66), 0xee);
    }

    #[test]
    fn test_put_block_honours_source_stride() {
        let source = [1u8, 2, 9, 3, 4, 9];
        let mut buf = screen(0);
        let mut fb = Framebuffer::new(&mut buf, W, H).unwrap();
        fb.put_block(2, 2, 0, 0, &source, 3);
        assert_eq!([fb.pixel(0, 0), fb.pixel(1, 0), fb.pixel(0, 1), fb.pixel(1, 1)], [1, 2, 3, 4]);
        assert_eq!(fb.pixel(2, 0), 0);
    }

    #[test]
    fn test_init_screen_layout() {
        let mut buf = screen(0xff);
        let mut fb = Framebuffer::new(&mut buf, W, H).unwrap();
        fb.init_screen();

        assert_eq!(fb.pixel(0, 0), Color::DarkCyan.index());
        assert_eq!(fb.pixel(W - 1, H - 29), Color::DarkCyan.index());
        assert_eq!(fb.pixel(5, H - 28), Color::LightGray.index());
        assert_eq!(fb.pixel(5, H - 27), Color::White.index());
        assert_eq!(fb.pixel(W / 2, H - 1), Color::LightGray.index());
        // start button bevel
        assert_eq!(fb.pixel(2, H - 10), Color::White.index());
        assert_eq!(fb.pixel(60, H - 10), Color::Black.index());
        assert_eq!(fb.pixel(30, H - 4), Color::DarkGray.index());
        // tray bevel
        assert_eq!(fb.pixel(W - 47, H - 10), Color::DarkGray.index());
        assert_eq!(fb.pixel(W - 3, H - 10), Color::White.index());
        // nothing left unpainted
        assert!(fb.as_bytes().iter().all(|&p| p != 0xff));
    }

    #[test]
    fn test_init_screen_is_deterministic() {
        let mut a = screen(1);
        let mut b = screen(2);
        Framebuffer::new(&mut a, W, H).unwrap().init_screen();
        Framebuffer::new(&mut b, W, H).unwrap().init_screen();
        assert_eq!(a, b);
    }
}
