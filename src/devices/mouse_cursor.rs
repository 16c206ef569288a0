//! # Mouse Cursor
//!
//! A 16×16 arrow rendered into a palette-index sprite that the boot code then
//! blits with `Framebuffer::put_block`.

use crate::devices::framebuffer::color::Color;
use crate::devices::framebuffer::TASKBAR_HEIGHT;

pub const CURSOR_WIDTH: usize = 16;
pub const CURSOR_HEIGHT: usize = 16;

pub type CursorSprite = [u8; CURSOR_WIDTH * CURSOR_HEIGHT];

/// `*` outline, `O` fill, `.` background
#[rustfmt::skip]
const CURSOR_TEMPLATE: [&[u8; CURSOR_WIDTH]; CURSOR_HEIGHT] = [
    b"**..............",
    b"*O*.............",
    b"*OO*............",
    b"*OOO*...........",
    b"*OOOO*..........",
    b"*OOOOO*.........",
    b"*OOOOOO*........",
    b"*OOOOOOO*.......",
    b"*OOOOOOOO*......",
    b"*OOOO*****......",
    b"*OO*O*..........",
    b"*O*.*O*.........",
    b"**...*O*........",
    b"*.....*O*.......",
    b".......*O*......",
    b".........*......",
];

/// Render the cursor into `sprite`, using `background` for the transparent part.
pub fn init_mouse_cursor(sprite: &mut CursorSprite, background: Color) {
    for (y, row) in CURSOR_TEMPLATE.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            let color = match cell {
                b'*' => Color::Black,
                b'O' => Color::White,
                b'.' => background,
                _ => continue,
            };
            sprite[y * CURSOR_WIDTH + x] = color.index();
        }
    }
}

/// Where the cursor starts: centred over the desktop area above the taskbar.
pub fn cursor_home(screen_width: usize, screen_height: usize) -> (usize, usize) {
    (
        (screen_width - CURSOR_WIDTH) / 2,
        (screen_height - TASKBAR_HEIGHT - CURSOR_HEIGHT) / 2,
    )
}
