//! # Hardware Interrupt Handlers
//!
//! | IRQ   | Vector | Handler                    |
//! |-------|--------|----------------------------|
//! | IRQ1  | 0x21   | `keyboard_interrupt_handler` |
//! | IRQ12 | 0x2c   | `mouse_interrupt_handler`    |
//!
//! The trap-entry stubs live outside this crate. They save registers and
//! call into a [`VectorTable`], which picks the handler body for the vector.
//! Handlers run with interrupts off and only draw inside the status strip at
//! the top-left of the screen.

use crate::devices::drivers::ps2::PORT_KEYDAT;
use crate::devices::framebuffer::color::Color;
use crate::devices::framebuffer::font::Font;
use crate::devices::framebuffer::{Framebuffer, STATUS_LINE_HEIGHT, STATUS_LINE_WIDTH};
use crate::interrupts::pic::{self, InterruptIndex};
use crate::machine::Machine;

/// What a handler body gets to work with.
pub struct InterruptContext<'a, 'fb, M> {
    pub machine: &'a mut M,
    pub screen: &'a mut Framebuffer<'fb>,
    pub font: &'a Font<'a>,
}

pub type HandlerFn<M> = fn(&mut InterruptContext<'_, '_, M>);

fn show_status<M>(ctx: &mut InterruptContext<'_, '_, M>, text: &[u8]) {
    ctx.screen
        .box_fill(Color::Black, 0, 0, STATUS_LINE_WIDTH - 1, STATUS_LINE_HEIGHT - 1);
    ctx.screen.put_string(0, 0, Color::White, ctx.font, text);
}

/// IRQ1. The scancode is read only to clear the controller's output buffer.
pub fn keyboard_interrupt_handler<M: Machine>(ctx: &mut InterruptContext<'_, '_, M>) {
    show_status(ctx, b"INT 21 (IRQ-1) : PS/2 keyboard");
    let _ = ctx.machine.read_u8(PORT_KEYDAT);
    pic::end_of_interrupt(ctx.machine, InterruptIndex::Keyboard.irq());
}

/// IRQ12, through the secondary PIC. EOI goes to the secondary, then the primary.
pub fn mouse_interrupt_handler<M: Machine>(ctx: &mut InterruptContext<'_, '_, M>) {
    show_status(ctx, b"INT 2C (IRQ-12) : PS/2 mouse");
    let _ = ctx.machine.read_u8(PORT_KEYDAT);
    pic::end_of_interrupt(ctx.machine, InterruptIndex::Mouse.irq());
}

/// Vector number to handler body.
pub struct VectorTable<M> {
    handlers: [Option<HandlerFn<M>>; 256],
}

impl<M: Machine> VectorTable<M> {
    pub const fn new() -> Self {
        Self { handlers: [None; 256] }
    }

    /// Keyboard and mouse wired to their remapped vectors.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.register(InterruptIndex::Keyboard.as_u8(), keyboard_interrupt_handler::<M>);
        table.register(InterruptIndex::Mouse.as_u8(), mouse_interrupt_handler::<M>);
        table
    }

    pub fn register(&mut self, vector: u8, handler: HandlerFn<M>) {
        self.handlers[vector as usize] = Some(handler);
    }

    pub fn is_registered(&self, vector: u8) -> bool {
        self.handlers[vector as usize].is_some()
    }

    /// Run the handler for `vector`. Vectors with no handler are ignored.
    pub fn dispatch(&self, vector: u8, ctx: &mut InterruptContext<'_, '_, M>) -> bool {
        match self.handlers[vector as usize] {
            Some(handler) => {
                handler(ctx);
                true
            }
            None => false,
        }
    }
}

impl<M: Machine> Default for VectorTable<M> {
    fn default() -> Self {
        Self::new()
    }
}
