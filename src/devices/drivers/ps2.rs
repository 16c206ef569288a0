//! # PS/2 Controller Setup
//!
//! Puts the 8042 keyboard controller into the mode that delivers both
//! keyboard and mouse interrupts, then tells the mouse to start reporting.
//!
//! ```text
//! ┌─────────────┐  0x64 cmd/status  ┌──────────┐
//! │    CPU      │──────────────────▶│   8042   │──▶ keyboard (IRQ1)
//! │             │◀──────────────────│          │──▶ mouse    (IRQ12)
//! └─────────────┘  0x60 data        └──────────┘
//! ```
//!
//! Waiting on the controller is best effort: after [`KBC_WAIT_BUDGET`] polls
//! the write goes out anyway rather than failing the boot.

use crate::machine::Machine;
use crate::println;

pub const PORT_KEYDAT: u16 = 0x0060;
pub const PORT_KEYSTA: u16 = 0x0064;
pub const PORT_KEYCMD: u16 = 0x0064;

/// Input buffer full: the controller has not taken the last byte yet.
const KEYSTA_SEND_NOTREADY: u8 = 0x02;
const KEYCMD_WRITE_MODE: u8 = 0x60;
/// Keyboard and mouse interrupts on, scancode translation on.
const KBC_MODE: u8 = 0x47;
const KEYCMD_SENDTO_MOUSE: u8 = 0xd4;
const MOUSECMD_ENABLE: u8 = 0xf4;

pub const KBC_WAIT_BUDGET: usize = 100_000;

/// Poll until the controller can accept a byte. Returns `false` if the
/// budget ran out first.
pub fn wait_kbc_send_ready<M: Machine>(machine: &mut M) -> bool {
    for _ in 0..KBC_WAIT_BUDGET {
        if machine.read_u8(PORT_KEYSTA) & KEYSTA_SEND_NOTREADY == 0 {
            return true;
        }
    }
    println!("ps2: controller not ready after {} polls, sending anyway", KBC_WAIT_BUDGET);
    false
}

fn send_controller_command<M: Machine>(machine: &mut M, cmd: u8) {
    wait_kbc_send_ready(machine);
    machine.write_u8(PORT_KEYCMD, cmd);
}

fn send_data<M: Machine>(machine: &mut M, data: u8) {
    wait_kbc_send_ready(machine);
    machine.write_u8(PORT_KEYDAT, data);
}

pub fn init_keyboard<M: Machine>(machine: &mut M) {
    send_controller_command(machine, KEYCMD_WRITE_MODE);
    send_data(machine, KBC_MODE);
}

/// The mouse answers with an ACK byte, which arrives as an IRQ12 and is
/// consumed by the mouse handler.
pub fn enable_mouse<M: Machine>(machine: &mut M) {
    send_controller_command(machine, KEYCMD_SENDTO_MOUSE);
    send_data(machine, MOUSECMD_ENABLE);
}
