//! Recording machine for unit tests.

use std::vec::Vec;

use crate::machine::Machine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Read(u16),
    Write(u16, u8),
    Cli,
    Sti,
    LoadGdt(u16, u32),
    LoadIdt(u16, u32),
}

/// Logs every hardware access in order and emulates the VGA DAC well enough
/// to read back what was programmed.
pub struct MockMachine {
    pub events: Vec<Event>,
    pub interrupts: bool,
    /// Value returned from the PS/2 status port 0x64.
    pub kbc_status: u8,
    /// Value returned from the PS/2 data port 0x60.
    pub kbc_data: u8,
    dac: [[u8; 3]; 256],
    dac_write_index: usize,
    dac_read_index: usize,
    dac_write_channel: usize,
    dac_read_channel: usize,
}

impl MockMachine {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            interrupts: false,
            kbc_status: 0,
            kbc_data: 0,
            dac: [[0; 3]; 256],
            dac_write_index: 0,
            dac_read_index: 0,
            dac_write_channel: 0,
            dac_read_channel: 0,
        }
    }

    /// Only the port writes, in order.
    pub fn writes(&self) -> Vec<(u16, u8)> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                Event::Write(port, value) => Some((port, value)),
                _ => None,
            })
            .collect()
    }

    pub fn reads_of(&self, port: u16) -> usize {
        self.events.iter().filter(|e| **e == Event::Read(port)).count()
    }

    pub fn dac_entry(&self, index: u8) -> [u8; 3] {
        self.dac[index as usize]
    }
}

impl Default for MockMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine for MockMachine {
    fn read_u8(&mut self, port: u16) -> u8 {
        self.events.push(Event::Read(port));
        match port {
            0x60 => self.kbc_data,
            0x64 => self.kbc_status,
            0x3c9 => {
                let value = self.dac[self.dac_read_index][self.dac_read_channel];
                self.dac_read_channel += 1;
                if self.dac_read_channel == 3 {
                    self.dac_read_channel = 0;
                    self.dac_read_index = (self.dac_read_index + 1) % 256;
                }
                value
            }
            _ => 0xff,
        }
    }

    fn write_u8(&mut self, port: u16, value: u8) {
        self.events.push(Event::Write(port, value));
        match port {
            0x3c7 => {
                self.dac_read_index = value as usize;
                self.dac_read_channel = 0;
            }
            0x3c8 => {
                self.dac_write_index = value as usize;
                self.dac_write_channel = 0;
            }
            0x3c9 => {
                // The DAC only latches six bits per channel.
                self.dac[self.dac_write_index][self.dac_write_channel] = value & 0x3f;
                self.dac_write_channel += 1;
                if self.dac_write_channel == 3 {
                    self.dac_write_channel = 0;
                    self.dac_write_index = (self.dac_write_index + 1) % 256;
                }
            }
            _ => {}
        }
    }

    fn interrupts_enabled(&self) -> bool {
        self.interrupts
    }

    fn disable_interrupts(&mut self) {
        self.events.push(Event::Cli);
        self.interrupts = false;
    }

    fn enable_interrupts(&mut self) {
        self.events.push(Event::Sti);
        self.interrupts = true;
    }

    unsafe fn load_gdt(&mut self, limit: u16, base: u32) {
        self.events.push(Event::LoadGdt(limit, base));
    }

    unsafe fn load_idt(&mut self, limit: u16, base: u32) {
        self.events.push(Event::LoadIdt(limit, base));
    }

    fn halt(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_section_restores_enabled_flag() {
        let mut m = MockMachine::new();
        m.interrupts = true;
        let seen = m.without_interrupts(|m| m.interrupts_enabled());
        assert!(!seen);
        assert!(m.interrupts);
        assert_eq!(m.events, [Event::Cli, Event::Sti]);
    }

    #[test]
    fn test_critical_section_keeps_disabled_flag() {
        let mut m = MockMachine::new();
        m.interrupts = false;
        m.without_interrupts(|m| m.write_u8(0x80, 0));
        assert!(!m.interrupts);
        assert!(!m.events.contains(&Event::Sti));
    }
}
