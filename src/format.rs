//! Boot-time diagnostic formatting into a caller-supplied byte buffer.
//!
//! Supports `%d`, `%x`, `%X`, `%s` and `%c` over an explicit argument list.
//! There is no width, padding or float support, and the destination is not
//! grown: an undersized buffer panics on the slice index.

use core::fmt;

/// One formatter argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    Int(i32),
    Uint(u32),
    Str(&'a str),
    Char(u8),
}

impl Arg<'_> {
    fn bits(&self) -> u32 {
        match *self {
            Arg::Int(v) => v as u32,
            Arg::Uint(v) => v,
            Arg::Char(c) => u32::from(c),
            Arg::Str(_) => 0,
        }
    }
}

impl From<i32> for Arg<'_> {
    fn from(v: i32) -> Self {
        Arg::Int(v)
    }
}

impl From<u32> for Arg<'_> {
    fn from(v: u32) -> Self {
        Arg::Uint(v)
    }
}

impl From<u16> for Arg<'_> {
    fn from(v: u16) -> Self {
        Arg::Int(i32::from(v))
    }
}

impl From<u8> for Arg<'_> {
    fn from(v: u8) -> Self {
        Arg::Char(v)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(v: &'a str) -> Self {
        Arg::Str(v)
    }
}

/// Byte cursor over a fixed buffer. Also usable as a `core::fmt::Write` sink.
pub struct FmtBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> FmtBuf<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        FmtBuf { buf, pos: 0 }
    }

    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    fn push(&mut self, byte: u8) {
        self.buf[self.pos] = byte;
        self.pos += 1;
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    /// Emit `value` in `radix`, most significant digit first.
    fn push_unsigned(&mut self, mut value: u32, radix: u32, upper: bool) {
        let alpha = if upper { b'A' } else { b'a' };
        let mut tmp = [0u8; 12];
        let mut i = 0;
        loop {
            let digit = (value % radix) as u8;
            tmp[i] = if digit < 10 { b'0' + digit } else { alpha + digit - 10 };
            i += 1;
            value /= radix;
            if value == 0 {
                break;
            }
        }
        for &d in tmp[..i].iter().rev() {
            self.push(d);
        }
    }

    fn push_signed(&mut self, value: i32) {
        if value < 0 {
            self.push(b'-');
        }
        self.push_unsigned(value.unsigned_abs(), 10, false);
    }
}

impl fmt::Write for FmtBuf<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        if self.pos + bytes.len() > self.buf.len() {
            return Err(fmt::Error);
        }
        self.push_bytes(bytes);
        Ok(())
    }
}

/// Render `fmt` with `args` into `buf`, followed by a zero terminator.
/// Returns the length without the terminator.
///
/// A `%` followed by anything other than a known specifier emits that byte
/// (`%%` gives `%`). Missing arguments render as `0` or an empty string.
/// `%d` reads its argument as signed, `%x`/`%X` as unsigned.
pub fn format(buf: &mut [u8], fmt: &str, args: &[Arg<'_>]) -> usize {
    let mut out = FmtBuf::new(buf);
    let mut args = args.iter();
    let mut bytes = fmt.bytes();

    while let Some(b) = bytes.next() {
        if b != b'%' {
            out.push(b);
            continue;
        }
        let Some(spec) = bytes.next() else { break };
        match spec {
            b'd' => {
                let v = args.next().map_or(0, Arg::bits);
                out.push_signed(v as i32);
            }
            b'x' | b'X' => {
                let v = args.next().map_or(0, Arg::bits);
                out.push_unsigned(v, 16, spec == b'X');
            }
            b's' => {
                if let Some(Arg::Str(s)) = args.next() {
                    let text = s.as_bytes();
                    let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
                    out.push_bytes(&text[..end]);
                }
            }
            b'c' => {
                let v = args.next().map_or(0, Arg::bits);
                out.push(v as u8);
            }
            other => out.push(other),
        }
    }

    let len = out.len();
    out.push(0);
    len
}

/// `kformat!(buf, "scrnx = %d", width)` — arguments go through `Arg::from`.
#[macro_export]
macro_rules! kformat {
    ($buf:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::format::format($buf, $fmt, &[$($crate::format::Arg::from($arg)),*])
    };
}
