//! Device Drivers
//!
//! - PS/2 controller: keyboard mode and mouse enable

pub mod ps2;

pub use ps2::{enable_mouse, init_keyboard, wait_kbc_send_ready};
