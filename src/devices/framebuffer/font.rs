//! 8×16 bitmap font table
//!
//! 256 glyphs, 16 bytes each, one byte per row with the leftmost pixel in
//! the most significant bit. The table itself is linked in by the boot
//! loader (`hankaku`); this type only indexes it.

pub const GLYPH_WIDTH: usize = 8;
pub const GLYPH_HEIGHT: usize = 16;
pub const FONT_BYTES: usize = 256 * GLYPH_HEIGHT;

pub type Glyph = [u8; GLYPH_HEIGHT];

#[derive(Clone, Copy)]
pub struct Font<'a> {
    glyphs: &'a [Glyph; 256],
}

impl<'a> Font<'a> {
    pub const fn new(glyphs: &'a [Glyph; 256]) -> Self {
        Self { glyphs }
    }

    pub fn from_bytes(bytes: &'a [u8; FONT_BYTES]) -> Self {
        // [u8; 4096] and [[u8; 16]; 256] share size and alignment.
        let glyphs = unsafe { &*(bytes as *const [u8; FONT_BYTES] as *const [Glyph; 256]) };
        Self { glyphs }
    }

    pub fn glyph(&self, code: u8) -> &'a Glyph {
        &self.glyphs[code as usize]
    }
}
