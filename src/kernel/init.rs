//! Kernel initialization phases
use crate::devices::drivers::ps2;
use crate::devices::framebuffer::color::{self, Color};
use crate::devices::framebuffer::font::Font;
use crate::devices::framebuffer::Framebuffer;
use crate::devices::mouse_cursor::{self, CursorSprite, CURSOR_HEIGHT, CURSOR_WIDTH};
use crate::interrupts::{self, gdt::Gdt, idt::Idt};
use crate::kernel::status::{BootStatus, Component, InitStatus};
use crate::machine::Machine;
use crate::memory_map::BootInfo;
use crate::println;

/// Everything the boot sequence writes to.
pub struct Platform<'a, 'fb, M> {
    pub machine: &'a mut M,
    pub gdt: &'a mut Gdt<'fb>,
    pub idt: &'a mut Idt<'fb>,
    pub screen: &'a mut Framebuffer<'fb>,
    pub font: &'a Font<'fb>,
}

/// Bring the machine up in order: tables and PIC with interrupts off,
/// interrupts on, then the display and the PS/2 devices.
pub fn init_kernel<M: Machine>(
    platform: &mut Platform<'_, '_, M>,
    info: &BootInfo,
    status: &mut BootStatus,
) -> Result<(), &'static str> {
    println!("Nanami OS bootstrap");

    let total = Component::ALL.len();

    init_phase(status, 1, total, Component::DescriptorTables, || {
        platform.machine.disable_interrupts();
        interrupts::gdt::build_gdt(platform.machine, platform.gdt);
        interrupts::idt::build_idt(platform.machine, platform.idt);
        Ok(())
    })?;

    init_phase(status, 2, total, Component::InterruptController, || {
        interrupts::pic::init_pic(platform.machine);
        platform.machine.enable_interrupts();
        Ok(())
    })?;

    init_phase(status, 3, total, Component::Display, || {
        init_display(&mut *platform, info);
        Ok(())
    })?;

    init_phase(status, 4, total, Component::Input, || {
        let (screen, font) = (&mut *platform.screen, platform.font);
        screen.put_string(0, 80, Color::White, font, b"Initializing keyboard...");
        ps2::init_keyboard(platform.machine);
        screen.put_string(0, 96, Color::White, font, b"Keyboard OK");

        screen.put_string(0, 112, Color::White, font, b"Enabling mouse...");
        ps2::enable_mouse(platform.machine);
        screen.put_string(0, 128, Color::White, font, b"Mouse OK");

        screen.put_string(0, 144, Color::White, font, b"Initialization complete!");
        Ok(())
    })?;

    println!("Kernel initialization complete");
    Ok(())
}

fn init_display<M: Machine>(platform: &mut Platform<'_, '_, M>, info: &BootInfo) {
    color::init_palette(platform.machine);

    let screen = &mut *platform.screen;
    let font = platform.font;
    screen.init_screen();

    let mut cursor: CursorSprite = [0; CURSOR_WIDTH * CURSOR_HEIGHT];
    mouse_cursor::init_mouse_cursor(&mut cursor, Color::DarkCyan);
    let (mx, my) = mouse_cursor::cursor_home(screen.width, screen.height);
    screen.put_block(CURSOR_WIDTH, CURSOR_HEIGHT, mx, my, &cursor, CURSOR_WIDTH);

    screen.put_string(8, 8, Color::White, font, b"ABC 123");
    screen.put_string(31, 31, Color::Black, font, b"Nanami OS.");
    screen.put_string(30, 30, Color::White, font, b"Nanami OS.");

    let mut line = [0u8; 40];
    let len = crate::kformat!(&mut line, "scrnx = %d", info.scrnx);
    screen.put_string(16, 64, Color::White, font, &line[..len]);
}

/// Run one phase, logging progress and recording the outcome in `status`.
pub fn init_phase<F>(
    status: &mut BootStatus,
    step: usize,
    total: usize,
    component: Component,
    init_fn: F,
) -> Result<(), &'static str>
where
    F: FnOnce() -> Result<(), &'static str>,
{
    status.set(component, InitStatus::InProgress);
    println!("[{}/{}] Initializing {}...", step, total, component.name());

    match init_fn() {
        Ok(()) => {
            status.set(component, InitStatus::Completed);
            println!("    {} initialized", component.name());
            Ok(())
        }
        Err(e) => {
            status.set(component, InitStatus::Failed(e));
            println!("    {} failed: {}", component.name(), e);
            Err(e)
        }
    }
}
