//! 16-color palette and VGA DAC programming

use crate::machine::Machine;

/// Write-mode index port: the next data write starts at this palette entry.
const DAC_WRITE_INDEX: u16 = 0x03c8;
/// Read-mode index port.
const DAC_READ_INDEX: u16 = 0x03c7;
const DAC_DATA: u16 = 0x03c9;

/// Palette indices of the default table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Purple = 5,
    Cyan = 6,
    White = 7,
    LightGray = 8,
    DarkRed = 9,
    DarkGreen = 10,
    DarkYellow = 11,
    DarkBlue = 12,
    DarkPurple = 13,
    DarkCyan = 14,
    DarkGray = 15,
}

impl Color {
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> u8 {
        color.index()
    }
}

/// One palette entry with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// The DAC takes six bits per channel.
    pub const fn to_dac(self) -> [u8; 3] {
        [self.r / 4, self.g / 4, self.b / 4]
    }
}

pub const DEFAULT_PALETTE: [Rgb; 16] = [
    Rgb::from_hex(0x000000), // black
    Rgb::from_hex(0xff0000), // red
    Rgb::from_hex(0x00ff00), // green
    Rgb::from_hex(0xffff00), // yellow
    Rgb::from_hex(0x0000ff), // blue
    Rgb::from_hex(0xff00ff), // purple
    Rgb::from_hex(0x00ffff), // cyan
    Rgb::from_hex(0xffffff), // white
    Rgb::from_hex(0xc6c6c6), // light gray
    Rgb::from_hex(0x840000), // dark red
    Rgb::from_hex(0x008400), // dark green
    Rgb::from_hex(0x848400), // dark yellow
    Rgb::from_hex(0x000084), // dark blue
    Rgb::from_hex(0x840084), // dark purple
    Rgb::from_hex(0x008484), // dark cyan
    Rgb::from_hex(0x848484), // dark gray
];

/// Program palette entries `start..=end` from `rgb[0..]`.
///
/// The index/data port pair is stateful, so the whole sequence runs with
/// interrupts off.
pub fn set_palette<M: Machine>(machine: &mut M, start: u8, end: u8, rgb: &[Rgb]) {
    machine.without_interrupts(|machine| {
        machine.write_u8(DAC_WRITE_INDEX, start);
        for (_, entry) in (start..=end).zip(rgb) {
            for channel in entry.to_dac() {
                machine.write_u8(DAC_DATA, channel);
            }
        }
    });
}

pub fn init_palette<M: Machine>(machine: &mut M) {
    set_palette(machine, 0, 15, &DEFAULT_PALETTE);
}

/// Read one entry back from the DAC, in its 6-bit form.
pub fn read_palette<M: Machine>(machine: &mut M, index: u8) -> [u8; 3] {
    machine.without_interrupts(|machine| {
        machine.write_u8(DAC_READ_INDEX, index);
        [
            machine.read_u8(DAC_DATA),
            machine.read_u8(DAC_DATA),
            machine.read_u8(DAC_DATA),
        ]
    })
}
