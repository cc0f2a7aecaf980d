use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::error::DumpError;
use crate::format::{classify, Classified, ImageFormat};
use crate::types::{span, Address, ImageRecord};

const SYNC_BYTE: u8 = 0xE6;
const HEADER_LEN: usize = 4;

/// Opens the image at `path` and reads it according to the convention implied
/// by `name`. `name` is also what the key is derived from, so in directory
/// mode it is the bare file name while `path` points into the directory.
///
/// # Errors
///
/// Will return `Err` if the name has no extension, the file cannot be opened
/// or read, or it is shorter than its addresses claim
pub fn load_image(path: &Path, name: &str) -> Result<ImageRecord, DumpError> {
    let classified = classify(name)?;
    let file = File::open(path).map_err(|source| DumpError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_image(&classified, BufReader::new(file))
}

/// # Errors
///
/// Will return `Err` if the image is truncated, too large for 16-bit
/// addressing, or the reader fails
pub fn read_image<R: Read + Seek>(
    classified: &Classified,
    mut reader: R,
) -> Result<ImageRecord, DumpError> {
    let name = classified.name.as_str();
    let record = match classified.format {
        ImageFormat::HeaderPrefixed => {
            let header = read_header(&mut reader, name)?;
            let start = Address::from_be_bytes(header[0], header[1]);
            let end = Address::from_be_bytes(header[2], header[3]);
            let bytes = read_exact_len(&mut reader, span(start, end), name, "payload")?;
            if has_trailing_data(&mut reader, name)? {
                debug!(name, "bytes past the declared end are ignored");
            }
            ImageRecord {
                name: classified.key.clone(),
                start,
                end,
                entry: start,
                bytes,
            }
        }
        format => {
            let size = file_size(&mut reader, name)?;
            let (start, end, entry) = headerless_range(format, size)
                .ok_or_else(|| DumpError::AddressOverflow {
                    name: name.to_string(),
                    size,
                })?;
            // Raw images record `end = size` but still carry exactly `size` bytes.
            let len = if format == ImageFormat::Raw {
                usize::from(end.0)
            } else {
                span(start, end)
            };
            let bytes = read_exact_len(&mut reader, len, name, "payload")?;
            ImageRecord {
                name: classified.key.clone(),
                start,
                end,
                entry,
                bytes,
            }
        }
    };

    debug!(
        name,
        key = %record.name,
        format = ?classified.format,
        start = %record.start,
        end = %record.end,
        entry = %record.entry,
        len = record.bytes.len(),
        "loaded image"
    );
    Ok(record)
}

/// Load range of a headerless image of `size` bytes, or `None` when the size
/// cannot be placed in a 64K address space.
#[must_use]
pub fn headerless_range(format: ImageFormat, size: u64) -> Option<(Address, Address, Address)> {
    match format {
        ImageFormat::Monitor => {
            let end = Address::TOP;
            let start = (u64::from(end.0).checked_add(1)?)
                .checked_sub(size)
                .filter(|_| size > 0)?;
            Some((Address(u16::try_from(start).ok()?), end, Address::MONITOR_ENTRY))
        }
        ImageFormat::Com => {
            let start = Address::TPA;
            let end = u64::from(start.0).checked_add(size)?.checked_sub(1)?;
            Some((start, Address(u16::try_from(end).ok()?), start))
        }
        ImageFormat::Raw => Some((Address(0), Address(u16::try_from(size).ok()?), Address(0))),
        ImageFormat::HeaderPrefixed => None,
    }
}

fn file_size<R: Seek>(reader: &mut R, name: &str) -> Result<u64, DumpError> {
    let size = reader.seek(SeekFrom::End(0)).map_err(|e| read_error(name, e))?;
    reader.rewind().map_err(|e| read_error(name, e))?;
    Ok(size)
}

fn read_header<R: Read>(reader: &mut R, name: &str) -> Result<[u8; HEADER_LEN], DumpError> {
    let mut first =
        read_exact_len(reader, 1, name, "header").map_err(|e| short_header(e, 0))?;
    if first[0] == SYNC_BYTE {
        first = read_exact_len(reader, 1, name, "header").map_err(|e| short_header(e, 0))?;
    }
    let rest = read_exact_len(reader, HEADER_LEN.saturating_sub(1), name, "header")
        .map_err(|e| short_header(e, 1))?;
    Ok([first[0], rest[0], rest[1], rest[2]])
}

/// Reports a short read inside the header against the whole header, with
/// `already` bytes of it read before the failing call.
fn short_header(e: DumpError, already: usize) -> DumpError {
    match e {
        DumpError::Truncated {
            name, what, found, ..
        } => DumpError::Truncated {
            name,
            what,
            expected: HEADER_LEN,
            found: found.saturating_add(already),
        },
        e => e,
    }
}

fn read_exact_len<R: Read>(
    reader: &mut R,
    len: usize,
    name: &str,
    what: &'static str,
) -> Result<Vec<u8>, DumpError> {
    let mut bytes = Vec::with_capacity(len);
    reader
        .take(u64::try_from(len).unwrap_or(u64::MAX))
        .read_to_end(&mut bytes)
        .map_err(|e| read_error(name, e))?;
    if bytes.len() < len {
        return Err(DumpError::Truncated {
            name: name.to_string(),
            what,
            expected: len,
            found: bytes.len(),
        });
    }
    Ok(bytes)
}

fn has_trailing_data<R: Read>(reader: &mut R, name: &str) -> Result<bool, DumpError> {
    let mut probe = [0u8; 1];
    let n = reader.read(&mut probe).map_err(|e| read_error(name, e))?;
    Ok(n > 0)
}

fn read_error(name: &str, source: std::io::Error) -> DumpError {
    DumpError::Read {
        name: name.to_string(),
        source,
    }
}
