//! # Nanami kernel bootstrap core
//!
//! Everything the boot glue in `main.rs` needs to bring the machine up to the
//! point where hardware interrupts are live and the screen shows diagnostics.
//!
//! ## Initialization Order
//!
//! 1. GDT and IDT at their fixed physical locations (`interrupts::gdt`, `interrupts::idt`)
//! 2. 8259 PIC cascade (`interrupts::pic`)
//! 3. `sti`
//! 4. Palette, desktop, cursor (`devices::framebuffer`, `devices::mouse_cursor`)
//! 5. PS/2 keyboard controller mode and mouse enable (`devices::drivers::ps2`)
//!
//! All hardware access goes through the [`machine::Machine`] trait so the same
//! code runs against the real CPU or against the recording mock used in tests.

#![cfg_attr(not(test), no_std)]

pub mod devices;
pub mod format;
pub mod interrupts;
pub mod kernel;
pub mod machine;
pub mod memory_map;
pub mod serial;

#[cfg(test)]
mod testing;
