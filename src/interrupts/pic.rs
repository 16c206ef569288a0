//! # Programmable Interrupt Controller (8259 PIC)
//!
//! ## PIC Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │   PIC 0     │◀────│   PIC 1     │
//! │ (Primary)   │IRQ2 │ (Secondary) │
//! │ IRQ 0-7     │     │ IRQ 8-15    │
//! └─────────────┘     └─────────────┘
//!       │
//!       ▼
//!     CPU
//! ```
//!
//! ## Vector Remapping
//!
//! - PIC 0: vectors 0x20-0x27 (IRQ 0-7)
//! - PIC 1: vectors 0x28-0x2f (IRQ 8-15)
//!
//! Only the keyboard (IRQ1), the cascade (IRQ2) and the mouse (IRQ12) are
//! left unmasked.

use crate::machine::Machine;

pub const PIC0_COMMAND: u16 = 0x0020;
pub const PIC0_DATA: u16 = 0x0021;
pub const PIC1_COMMAND: u16 = 0x00a0;
pub const PIC1_DATA: u16 = 0x00a1;

pub const PIC0_OFFSET: u8 = 0x20;
pub const PIC1_OFFSET: u8 = 0x28;

/// Line on the primary the secondary is wired to.
pub const CASCADE_IRQ: u8 = 2;

/// Edge triggered, cascade mode, ICW4 follows.
const ICW1_INIT: u8 = 0x11;
/// Non-buffered 8086 mode.
const ICW4_8086: u8 = 0x01;
/// OCW2 specific EOI; the low three bits select the line.
const OCW2_SPECIFIC_EOI: u8 = 0x60;

/// Keyboard (IRQ1) and cascade (IRQ2) open.
pub const PIC0_MASK: u8 = 0xf9;
/// Mouse (IRQ12 = line 4 on PIC 1) open.
pub const PIC1_MASK: u8 = 0xef;

/// Interrupt vectors as the CPU sees them after remapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InterruptIndex {
    Keyboard = PIC0_OFFSET + 1, // 0x21 - IRQ1
    Mouse = PIC1_OFFSET + 4,    // 0x2c - IRQ12
}

impl InterruptIndex {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn irq(self) -> u8 {
        self.as_u8() - PIC0_OFFSET
    }
}

/// Remap and unmask the PIC pair. Interrupts must already be disabled.
pub fn init_pic<M: Machine>(machine: &mut M) {
    machine.write_u8(PIC0_DATA, 0xff);
    machine.write_u8(PIC1_DATA, 0xff);

    machine.write_u8(PIC0_COMMAND, ICW1_INIT);
    machine.write_u8(PIC0_DATA, PIC0_OFFSET);
    machine.write_u8(PIC0_DATA, 1 << CASCADE_IRQ);
    machine.write_u8(PIC0_DATA, ICW4_8086);

    machine.write_u8(PIC1_COMMAND, ICW1_INIT);
    machine.write_u8(PIC1_DATA, PIC1_OFFSET);
    machine.write_u8(PIC1_DATA, CASCADE_IRQ);
    machine.write_u8(PIC1_DATA, ICW4_8086);

    machine.write_u8(PIC0_DATA, PIC0_MASK);
    machine.write_u8(PIC1_DATA, PIC1_MASK);
}

/// Send a specific EOI for `irq`. Lines on the secondary are acknowledged
/// there first, then on the primary's cascade line.
pub fn end_of_interrupt<M: Machine>(machine: &mut M, irq: u8) {
    if irq >= 8 {
        machine.write_u8(PIC1_COMMAND, OCW2_SPECIFIC_EOI | (irq - 8));
        machine.write_u8(PIC0_COMMAND, OCW2_SPECIFIC_EOI | CASCADE_IRQ);
    } else {
        machine.write_u8(PIC0_COMMAND, OCW2_SPECIFIC_EOI | irq);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockMachine;

    #[test]
    fn test_init_sequence() {
        let mut m = MockMachine::new();
        init_pic(&mut m);
        assert_eq!(
            m.writes(),
            [
                (0x21, 0xff),
                (0xa1, 0xff),
                (0x20, 0x11),
                (0x21, 0x20),
                (0x21, 0x04),
                (0x21, 0x01),
                (0xa0, 0x11),
                (0xa1, 0x28),
                (0xa1, 0x02),
                (0xa1, 0x01),
                (0x21, 0xf9),
                (0xa1, 0xef),
            ]
        );
    }

    #[test]
    fn test_final_masks_open_only_used_lines() {
        for irq in 0..8u8 {
            let open = PIC0_MASK & (1 << irq) == 0;
            assert_eq!(open, irq == 1 || irq == CASCADE_IRQ, "irq {}", irq);
        }
        for irq in 8..16u8 {
            let open = PIC1_MASK & (1 << (irq - 8)) == 0;
            assert_eq!(open, irq == 12, "irq {}", irq);
        }
    }

    #[test]
    fn test_vectors() {
        assert_eq!(InterruptIndex::Keyboard.as_u8(), 0x21);
        assert_eq!(InterruptIndex::Mouse.as_u8(), 0x2c);
        assert_eq!(InterruptIndex::Keyboard.irq(), 1);
        assert_eq!(InterruptIndex::Mouse.irq(), 12);
    }

    #[test]
    fn test_primary_eoi() {
        let mut m = MockMachine::new();
        end_of_interrupt(&mut m, 1);
        assert_eq!(m.writes(), [(0x20, 0x61)]);
    }

    #[test]
    fn test_secondary_eoi_acknowledges_both() {
        let mut m = MockMachine::new();
        end_of_interrupt(&mut m, 12);
        assert_eq!(m.writes(), [(0xa0, 0x64), (0x20, 0x62)]);
    }
}
