use std::io::{self, Write};

/// Bytes per output line, for both the escaped string and the array form.
pub const BYTES_PER_LINE: usize = 32;

/// Writes `bytes` as one or more double-quoted literals of `\xHH` escapes,
/// 32 per literal, joined with ` +` line continuations.
///
/// # Errors
///
/// Will return `Err` if writing to `out` fails
pub fn write_escaped<W: Write + ?Sized>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    if bytes.is_empty() {
        return out.write_all(b"\"\"");
    }
    for (i, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        if i > 0 {
            out.write_all(b" +\n")?;
        }
        out.write_all(b"\"")?;
        for b in chunk {
            write!(out, "\\x{b:02X}")?;
        }
        out.write_all(b"\"")?;
    }
    Ok(())
}

/// Writes `bytes` as comma-separated decimal values, 32 per line.
///
/// # Errors
///
/// Will return `Err` if writing to `out` fails
pub fn write_decimal<W: Write + ?Sized>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    for (i, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        if i > 0 {
            out.write_all(b",\n")?;
        }
        for (j, b) in chunk.iter().enumerate() {
            if j > 0 {
                out.write_all(b", ")?;
            }
            write!(out, "{b}")?;
        }
    }
    Ok(())
}
