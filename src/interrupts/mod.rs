//! # Interrupt Handling Module
//!
//! - **GDT**: flat data and kernel code segments in an 8192-slot table
//! - **IDT**: 256 cleared gates, filled in by the boot loader's entry stubs
//! - **PIC**: 8259 cascade remapped to 0x20-0x2f
//! - **Handlers**: keyboard and mouse bodies plus the vector dispatch table
//!
//! ## Interrupt Vector Layout
//!
//! | Vector    | Source        | Handler                      |
//! |-----------|---------------|------------------------------|
//! | 0x20-0x27 | PIC 0 IRQ0-7  | only IRQ1 is unmasked        |
//! | 0x21      | IRQ1 keyboard | `keyboard_interrupt_handler` |
//! | 0x28-0x2f | PIC 1 IRQ8-15 | only IRQ12 is unmasked       |
//! | 0x2c      | IRQ12 mouse   | `mouse_interrupt_handler`    |
//!
//! ## Usage
//!
//! ```ignore
//! machine.disable_interrupts();
//! gdt::build_gdt(&mut machine, &mut gdt);
//! idt::build_idt(&mut machine, &mut idt);
//! pic::init_pic(&mut machine);
//! machine.enable_interrupts();
//! ```

pub mod gdt;
pub mod idt;
#[allow(clippy::module_inception)]
pub mod interrupts;
pub mod pic;

