#![no_std]
#![no_main]

extern crate rlibc;

use core::panic::PanicInfo;
use spin::Lazy;

use nanami_kernel::{
    devices::framebuffer::{
        font::{Font, FONT_BYTES},
        Framebuffer,
    },
    interrupts::{
        gdt::Gdt,
        idt::Idt,
        interrupts::{InterruptContext, VectorTable},
    },
    kernel::{all_components_ready, init_kernel, Platform, BOOT_STATUS},
    machine::{Machine, X86Machine},
    memory_map::BootInfo,
    println, serial,
};

extern "C" {
    /// 8×16 font table linked in by the boot loader build.
    #[allow(non_upper_case_globals)]
    static hankaku: [u8; FONT_BYTES];
}

static VECTORS: Lazy<VectorTable<X86Machine>> = Lazy::new(VectorTable::standard);

fn font() -> Font<'static> {
    Font::from_bytes(unsafe { &hankaku })
}

/// Entered from the boot loader with interrupts disabled and BootInfo in place.
#[no_mangle]
pub extern "C" fn kernel_main() -> ! {
    serial::init();
    Lazy::force(&VECTORS);

    let mut machine = unsafe { X86Machine::new() };
    match boot(&mut machine) {
        Ok(()) if all_components_ready() => println!("All components ready"),
        Ok(()) => println!("Boot finished with components still pending"),
        Err(e) => println!("Kernel initialization failed: {}", e),
    }

    loop_arch_hlt()
}

fn boot(machine: &mut X86Machine) -> Result<(), &'static str> {
    let info = unsafe { BootInfo::get()? };
    println!("bootinfo: {}x{} vmode {:#x} vram {:#x}", info.scrnx, info.scrny, info.vmode, info.vram);

    let mut gdt = unsafe { Gdt::fixed()? };
    let mut idt = unsafe { Idt::fixed()? };
    let mut screen = unsafe { Framebuffer::from_boot_info(info)? };
    let font = font();

    let mut platform = Platform {
        machine,
        gdt: &mut gdt,
        idt: &mut idt,
        screen: &mut screen,
        font: &font,
    };
    let mut status = BOOT_STATUS.lock();
    init_kernel(&mut platform, info, &mut status)
}

/// Called by the trap-entry stubs, after saving registers, with the vector
/// that fired.
#[no_mangle]
pub extern "C" fn handle_interrupt(vector: u32) {
    let mut machine = unsafe { X86Machine::new() };
    let Ok(info) = (unsafe { BootInfo::get() }) else {
        return;
    };
    // Handlers only draw in the status strip, which the main flow leaves alone.
    let Ok(mut screen) = (unsafe { Framebuffer::from_boot_info(info) }) else {
        return;
    };
    let font = font();
    let mut ctx = InterruptContext {
        machine: &mut machine,
        screen: &mut screen,
        font: &font,
    };
    VECTORS.dispatch(vector as u8, &mut ctx);
}

fn loop_arch_hlt() -> ! {
    let mut machine = unsafe { X86Machine::new() };
    loop {
        machine.halt();
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    let msg = info.message();
    let loc = info.location();
    println!("PANIC : {} | {:?}", msg, loc);

    loop_arch_hlt()
}
