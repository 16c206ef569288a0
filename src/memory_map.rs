//! # Fixed physical memory map
//!
//! The boot loader and this core agree on a handful of fixed physical
//! addresses. Each is a named [`Region`] with a size, and is only ever touched
//! through a typed view whose layout is checked against that size.
//!
//! | Region   | Base         | Size    | Layout                      |
//! |----------|--------------|---------|-----------------------------|
//! | BOOTINFO | `0x0000_0ff0`| 12 B    | [`BootInfo`]                |
//! | IDT      | `0x0026_f800`| 2 KiB   | 256 × `GateDescriptor`      |
//! | GDT      | `0x0027_0000`| 64 KiB  | 8192 × `SegmentDescriptor`  |
//! | KERNEL   | `0x0028_0000`| 512 KiB | code segment (GDT slot 2)   |

use core::mem::{align_of, size_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub base: u32,
    pub size: u32,
}

pub const BOOTINFO: Region = Region {
    name: "bootinfo",
    base: 0x0000_0ff0,
    size: size_of::<BootInfo>() as u32,
};

pub const IDT: Region = Region {
    name: "idt",
    base: 0x0026_f800,
    size: 0x800,
};

pub const GDT: Region = Region {
    name: "gdt",
    base: 0x0027_0000,
    size: 0x1_0000,
};

pub const KERNEL: Region = Region {
    name: "kernel",
    base: 0x0028_0000,
    size: 0x8_0000,
};

impl Region {
    /// Value for a GDTR/IDTR limit field.
    pub const fn limit(&self) -> u16 {
        (self.size - 1) as u16
    }

    pub const fn end(&self) -> u32 {
        self.base + self.size
    }

    /// Check that `count` values of `T` exactly fill this region.
    pub fn check_layout<T>(&self, count: usize) -> Result<(), &'static str> {
        if self.base as usize % align_of::<T>() != 0 {
            return Err("region base is misaligned for its layout");
        }
        if size_of::<T>() * count != self.size as usize {
            return Err("region size does not match its layout");
        }
        Ok(())
    }

    /// View the region as `N` values of `T`.
    ///
    /// # Safety
    /// The region must be identity-mapped, and nothing else may hold a
    /// reference into it for `'static`.
    pub unsafe fn as_array_mut<T, const N: usize>(&self) -> Result<&'static mut [T; N], &'static str> {
        self.check_layout::<T>(N)?;
        Ok(&mut *(self.base as usize as *mut [T; N]))
    }

    /// View the region as one `T`.
    ///
    /// # Safety
    /// The region must be identity-mapped and hold an initialized `T`.
    pub unsafe fn as_ref<T>(&self) -> Result<&'static T, &'static str> {
        self.check_layout::<T>(1)?;
        Ok(&*(self.base as usize as *const T))
    }
}

/// Written by the boot loader before the kernel runs; never modified here.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct BootInfo {
    pub cyls: u8,
    pub leds: u8,
    pub vmode: u8,
    pub reserve: u8,
    pub scrnx: u16,
    pub scrny: u16,
    /// Physical address of the linear 8bpp framebuffer.
    pub vram: u32,
}

impl BootInfo {
    /// # Safety
    /// The boot loader must already have filled in the BOOTINFO region.
    pub unsafe fn get() -> Result<&'static BootInfo, &'static str> {
        BOOTINFO.as_ref::<BootInfo>()
    }

    pub fn width(&self) -> usize {
        self.scrnx as usize
    }

    pub fn height(&self) -> usize {
        self.scrny as usize
    }
}
