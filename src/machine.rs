//! # Hardware access seam
//!
//! Every port access, interrupt-flag change and descriptor-table register
//! load made by the bootstrap core goes through [`Machine`]. The kernel binary
//! uses [`X86Machine`]; unit tests use a recording mock.
//!
//! The descriptor tables are the 32-bit protected-mode layout (8-byte gates,
//! 32-bit bases), so the kernel is built for `target_arch = "x86"`. The
//! `x86_64` implementation only exists so the library builds and tests on
//! the development host.

#[cfg(target_arch = "x86")]
use core::arch::asm;

#[cfg(target_arch = "x86_64")]
use x86_64::instructions::{interrupts, port::Port, tables};
#[cfg(target_arch = "x86_64")]
use x86_64::structures::DescriptorTablePointer;
#[cfg(target_arch = "x86_64")]
use x86_64::VirtAddr;

pub trait Machine {
    fn read_u8(&mut self, port: u16) -> u8;
    fn write_u8(&mut self, port: u16, value: u8);

    fn interrupts_enabled(&self) -> bool;
    fn disable_interrupts(&mut self);
    fn enable_interrupts(&mut self);

    /// Load GDTR. The table must stay valid for as long as it is loaded.
    unsafe fn load_gdt(&mut self, limit: u16, base: u32);
    /// Load IDTR. The table must stay valid for as long as it is loaded.
    unsafe fn load_idt(&mut self, limit: u16, base: u32);

    fn halt(&mut self);

    /// Run `f` with interrupts off, then put the interrupt flag back the way
    /// it was. Never turns interrupts on if the caller had them off.
    fn without_interrupts<R, F>(&mut self, f: F) -> R
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> R,
    {
        let saved = self.interrupts_enabled();
        self.disable_interrupts();
        let ret = f(self);
        if saved {
            self.enable_interrupts();
        }
        ret
    }
}

/// The real processor.
pub struct X86Machine {
    _private: (),
}

impl X86Machine {
    /// # Safety
    /// Grants raw port I/O and control over the interrupt flag. Only ring-0
    /// code may construct it.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(target_arch = "x86_64")]
impl Machine for X86Machine {
    fn read_u8(&mut self, port: u16) -> u8 {
        unsafe { Port::<u8>::new(port).read() }
    }

    fn write_u8(&mut self, port: u16, value: u8) {
        unsafe { Port::<u8>::new(port).write(value) }
    }

    fn interrupts_enabled(&self) -> bool {
        interrupts::are_enabled()
    }

    fn disable_interrupts(&mut self) {
        interrupts::disable();
    }

    fn enable_interrupts(&mut self) {
        interrupts::enable();
    }

    unsafe fn load_gdt(&mut self, limit: u16, base: u32) {
        let ptr = DescriptorTablePointer {
            limit,
            base: VirtAddr::new(u64::from(base)),
        };
        tables::lgdt(&ptr);
    }

    unsafe fn load_idt(&mut self, limit: u16, base: u32) {
        let ptr = DescriptorTablePointer {
            limit,
            base: VirtAddr::new(u64::from(base)),
        };
        tables::lidt(&ptr);
    }

    fn halt(&mut self) {
        x86_64::instructions::hlt();
    }
}

/// GDTR/IDTR image in protected mode: 16-bit limit, 32-bit linear base.
#[cfg(any(test, target_arch = "x86"))]
#[repr(C, packed(2))]
struct TablePointer32 {
    limit: u16,
    base: u32,
}

#[cfg(target_arch = "x86")]
const EFLAGS_IF: u32 = 1 << 9;

#[cfg(target_arch = "x86")]
impl Machine for X86Machine {
    fn read_u8(&mut self, port: u16) -> u8 {
        let value: u8;
        unsafe {
            asm!("in al, dx", out("al") value, in("dx") port, options(nomem, nostack, preserves_flags));
        }
        value
    }

    fn write_u8(&mut self, port: u16, value: u8) {
        unsafe {
            asm!("out dx, al", in("dx") port, in("al") value, options(nomem, nostack, preserves_flags));
        }
    }

    fn interrupts_enabled(&self) -> bool {
        let eflags: u32;
        unsafe {
            asm!("pushfd", "pop {}", out(reg) eflags, options(nomem, preserves_flags));
        }
        eflags & EFLAGS_IF != 0
    }

    fn disable_interrupts(&mut self) {
        unsafe { asm!("cli", options(nomem, nostack)) }
    }

    fn enable_interrupts(&mut self) {
        unsafe { asm!("sti", options(nomem, nostack)) }
    }

    unsafe fn load_gdt(&mut self, limit: u16, base: u32) {
        let ptr = TablePointer32 { limit, base };
        asm!("lgdt [{}]", in(reg) &ptr, options(readonly, nostack, preserves_flags));
    }

    unsafe fn load_idt(&mut self, limit: u16, base: u32) {
        let ptr = TablePointer32 { limit, base };
        asm!("lidt [{}]", in(reg) &ptr, options(readonly, nostack, preserves_flags));
    }

    fn halt(&mut self) {
        unsafe { asm!("hlt", options(nomem, nostack, preserves_flags)) }
    }
}
