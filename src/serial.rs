//! Serial console logging on COM1.
//!
//! `println!` goes to the UART in the kernel and to stdout under unit tests.

use spin::Mutex;
use uart_16550::SerialPort;

pub static SERIAL: Mutex<SerialPort> = Mutex::new(unsafe { SerialPort::new(0x3F8) });

/// Program the UART. Called once by the boot glue before anything logs.
pub fn init() {
    SERIAL.lock().init();
}

#[cfg(not(test))]
#[doc(hidden)]
pub fn _print(args: core::fmt::Arguments<'_>) {
    use crate::machine::{Machine, X86Machine};
    use core::fmt::Write;

    // An IRQ arriving while the lock is held would spin forever.
    let mut machine = unsafe { X86Machine::new() };
    machine.without_interrupts(|_| {
        let _ = SERIAL.lock().write_fmt(args);
    });
}

#[cfg(test)]
#[doc(hidden)]
pub fn _print(args: core::fmt::Arguments<'_>) {
    std::print!("{}", args);
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::serial::_print(core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => {
        $crate::serial::_print(core::format_args!("{}\n", core::format_args!($($arg)*)))
    };
}
