//! # Global Descriptor Table
//!
//! Flat 32-bit segmentation: slot 1 covers all 4 GiB as data, slot 2 is the
//! 512 KiB kernel code segment. The table always has 8192 slots; every slot
//! other than 1 and 2 is zeroed.

use bitflags::bitflags;

use crate::machine::Machine;
use crate::memory_map::{self, Region};

pub const GDT_ENTRIES: usize = 8192;

/// Largest limit that fits the 20-bit field with byte granularity.
const MAX_BYTE_LIMIT: u32 = 0x000f_ffff;

bitflags! {
    /// Access-rights word as passed to [`SegmentDescriptor::new`]: the low
    /// byte is the access byte, bits 12..16 are the flags nibble.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AccessRights: u16 {
        const ACCESSED    = 0x0001;
        const READ_WRITE  = 0x0002;
        const CONFORMING  = 0x0004;
        const EXECUTABLE  = 0x0008;
        const SEGMENT     = 0x0010;
        const DPL_USER    = 0x0060;
        const PRESENT     = 0x0080;
        const AVAILABLE   = 0x1000;
        const LONG_MODE   = 0x2000;
        const SIZE_32     = 0x4000;
        const GRANULARITY = 0x8000;
    }
}

/// Read/write 32-bit data segment.
pub const AR_DATA32_RW: AccessRights = AccessRights::SIZE_32
    .union(AccessRights::PRESENT)
    .union(AccessRights::SEGMENT)
    .union(AccessRights::READ_WRITE);

/// Execute/read 32-bit code segment.
pub const AR_CODE32_ER: AccessRights = AccessRights::SIZE_32
    .union(AccessRights::PRESENT)
    .union(AccessRights::SEGMENT)
    .union(AccessRights::EXECUTABLE)
    .union(AccessRights::READ_WRITE);

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentDescriptor {
    limit_low: u16,
    base_low: u16,
    base_mid: u8,
    access_right: u8,
    limit_high: u8,
    base_high: u8,
}

impl SegmentDescriptor {
    pub const NULL: SegmentDescriptor = SegmentDescriptor {
        limit_low: 0,
        base_low: 0,
        base_mid: 0,
        access_right: 0,
        limit_high: 0,
        base_high: 0,
    };

    /// Encode a descriptor. Limits above 20 bits switch to 4 KiB granularity
    /// and are divided by 4096; nothing else is validated.
    pub const fn new(limit: u32, base: u32, ar: u16) -> Self {
        let (limit, ar) = if limit > MAX_BYTE_LIMIT {
            (limit / 0x1000, ar | AccessRights::GRANULARITY.bits())
        } else {
            (limit, ar)
        };
        Self {
            limit_low: (limit & 0xffff) as u16,
            base_low: (base & 0xffff) as u16,
            base_mid: ((base >> 16) & 0xff) as u8,
            access_right: (ar & 0xff) as u8,
            limit_high: (((limit >> 16) & 0x0f) as u8) | (((ar >> 8) & 0xf0) as u8),
            base_high: ((base >> 24) & 0xff) as u8,
        }
    }

    /// The raw 20-bit limit field.
    pub fn limit(&self) -> u32 {
        u32::from(self.limit_low) | (u32::from(self.limit_high & 0x0f) << 16)
    }

    pub fn base(&self) -> u32 {
        u32::from(self.base_low) | (u32::from(self.base_mid) << 16) | (u32::from(self.base_high) << 24)
    }

    pub fn access_rights(&self) -> AccessRights {
        AccessRights::from_bits_retain(
            u16::from(self.access_right) | (u16::from(self.limit_high & 0xf0) << 8),
        )
    }

    pub fn granularity(&self) -> bool {
        self.access_rights().contains(AccessRights::GRANULARITY)
    }

    /// Segment size in bytes minus one, as the CPU will see it.
    pub fn effective_limit(&self) -> u64 {
        if self.granularity() {
            (u64::from(self.limit()) << 12) | 0xfff
        } else {
            u64::from(self.limit())
        }
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

/// The GDT as laid out in memory.
pub struct Gdt<'a> {
    entries: &'a mut [SegmentDescriptor; GDT_ENTRIES],
    region: Region,
}

impl<'a> Gdt<'a> {
    /// Wrap caller-owned storage that will be registered as living at `region`.
    pub fn new(entries: &'a mut [SegmentDescriptor; GDT_ENTRIES], region: Region) -> Self {
        Self { entries, region }
    }

    pub fn entries(&self) -> &[SegmentDescriptor; GDT_ENTRIES] {
        self.entries
    }
}

impl Gdt<'static> {
    /// The table at its fixed physical home.
    ///
    /// # Safety
    /// The GDT region must be identity-mapped and not referenced elsewhere.
    pub unsafe fn fixed() -> Result<Self, &'static str> {
        let entries = memory_map::GDT.as_array_mut::<SegmentDescriptor, GDT_ENTRIES>()?;
        Ok(Self::new(entries, memory_map::GDT))
    }
}

/// Zero every slot, install the flat data and kernel code segments, and load GDTR.
pub fn build_gdt<M: Machine>(machine: &mut M, gdt: &mut Gdt<'_>) {
    gdt.entries.fill(SegmentDescriptor::NULL);
    gdt.entries[1] = SegmentDescriptor::new(0xffff_ffff, 0x0000_0000, AR_DATA32_RW.bits());
    gdt.entries[2] = SegmentDescriptor::new(
        memory_map::KERNEL.size - 1,
        memory_map::KERNEL.base,
        AR_CODE32_ER.bits(),
    );
    unsafe { machine.load_gdt(gdt.region.limit(), gdt.region.base) };
}
