//! Device Subsystem
//!
//! - `drivers`: PS/2 controller setup
//! - `framebuffer`: palette and drawing into the 8bpp linear framebuffer
//! - `mouse_cursor`: cursor sprite

pub mod drivers;
pub mod framebuffer;
pub mod mouse_cursor;
