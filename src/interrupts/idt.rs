//! # Interrupt Descriptor Table
//!
//! 256 gate slots, all cleared at boot. The core never points a gate at its
//! own code: the trap-entry stubs are linked in by the boot loader, which uses
//! [`Idt::set_gate`] to install them and then routes every vector into
//! `handle_interrupt`.

use crate::machine::Machine;
use crate::memory_map::{self, Region};

pub const IDT_ENTRIES: usize = 256;

/// Present, ring 0, 32-bit interrupt gate.
pub const AR_INTGATE32: u16 = 0x008e;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateDescriptor {
    offset_low: u16,
    selector: u16,
    dw_count: u8,
    access_right: u8,
    offset_high: u16,
}

impl GateDescriptor {
    pub const NULL: GateDescriptor = GateDescriptor {
        offset_low: 0,
        selector: 0,
        dw_count: 0,
        access_right: 0,
        offset_high: 0,
    };

    pub const fn new(offset: u32, selector: u16, ar: u16) -> Self {
        Self {
            offset_low: (offset & 0xffff) as u16,
            selector,
            dw_count: ((ar >> 8) & 0xff) as u8,
            access_right: (ar & 0xff) as u8,
            offset_high: ((offset >> 16) & 0xffff) as u16,
        }
    }

    pub fn offset(&self) -> u32 {
        u32::from(self.offset_low) | (u32::from(self.offset_high) << 16)
    }

    pub fn selector(&self) -> u16 {
        self.selector
    }

    pub fn access_rights(&self) -> u16 {
        u16::from(self.access_right) | (u16::from(self.dw_count) << 8)
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

pub struct Idt<'a> {
    entries: &'a mut [GateDescriptor; IDT_ENTRIES],
    region: Region,
}

impl<'a> Idt<'a> {
    pub fn new(entries: &'a mut [GateDescriptor; IDT_ENTRIES], region: Region) -> Self {
        Self { entries, region }
    }

    pub fn entries(&self) -> &[GateDescriptor; IDT_ENTRIES] {
        self.entries
    }

    pub fn set_gate(&mut self, vector: u8, offset: u32, selector: u16, ar: u16) {
        self.entries[vector as usize] = GateDescriptor::new(offset, selector, ar);
    }
}

impl Idt<'static> {
    /// # Safety
    /// The IDT region must be identity-mapped and not referenced elsewhere.
    pub unsafe fn fixed() -> Result<Self, &'static str> {
        let entries = memory_map::IDT.as_array_mut::<GateDescriptor, IDT_ENTRIES>()?;
        Ok(Self::new(entries, memory_map::IDT))
    }
}

/// Clear every gate and load IDTR.
pub fn build_idt<M: Machine>(machine: &mut M, idt: &mut Idt<'_>) {
    idt.entries.fill(GateDescriptor::NULL);
    unsafe { machine.load_idt(idt.region.limit(), idt.region.base) };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Event, MockMachine};

    #[test]
    fn test_gate_encoding() {
        let g = GateDescriptor::new(0x0028_1234, 2 * 8, AR_INTGATE32);
        assert_eq!(g.offset(), 0x0028_1234);
        assert_eq!(g.selector(), 16);
        assert_eq!(g.access_rights(), 0x008e);
        assert_eq!(core::mem::size_of::<GateDescriptor>(), 8);
    }

    #[test]
    fn test_build_idt_clears_every_gate() {
        let mut storage = Box::new([GateDescriptor::new(0xffff_ffff, 0x10, 0x8e); IDT_ENTRIES]);
        let mut idt = Idt::new(&mut storage, memory_map::IDT);
        let mut m = MockMachine::new();

        build_idt(&mut m, &mut idt);

        assert!(idt.entries().iter().all(GateDescriptor::is_null));
        assert_eq!(m.events, [Event::LoadIdt(0x7ff, 0x0026_f800)]);
    }

    #[test]
    fn test_set_gate_touches_one_slot() {
        let mut storage = Box::new([GateDescriptor::NULL; IDT_ENTRIES]);
        let mut idt = Idt::new(&mut storage, memory_map::IDT);
        idt.set_gate(0x21, 0x0028_0040, 2 * 8, AR_INTGATE32);

        assert_eq!(idt.entries()[0x21].offset(), 0x0028_0040);
        assert_eq!(idt.entries().iter().filter(|g| !g.is_null()).count(), 1);
    }
}
