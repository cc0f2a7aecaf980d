use std::path::Path;

use crate::error::DumpError;

/// Header convention of an image file, decided from its name alone.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ImageFormat {
    /// `mon*.bin`/`mon*.COM`: monitor ROM parked at the top of memory.
    Monitor,
    /// `*.COM`: CP/M program loaded at 0x100.
    Com,
    /// `*.bin`: raw dump loaded at 0.
    Raw,
    /// Anything else: optional 0xE6 sync byte, then big-endian start and end.
    HeaderPrefixed,
}

impl ImageFormat {
    #[must_use]
    pub const fn is_headerless(self) -> bool {
        !matches!(self, Self::HeaderPrefixed)
    }
}

/// Outcome of classifying a file name: the format plus the key the image is
/// published under.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Classified {
    pub name: String,
    pub format: ImageFormat,
    pub key: String,
}

/// # Errors
///
/// Will return `Err` if the file name has no `.` extension delimiter
pub fn classify(name: &str) -> Result<Classified, DumpError> {
    let file_name = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name);
    let dot = file_name
        .find('.')
        .ok_or_else(|| DumpError::MissingExtension(name.to_string()))?;
    let extension = &file_name[dot..];

    let format = match extension {
        ".bin" | ".COM" if file_name.starts_with("mon") => ImageFormat::Monitor,
        ".COM" => ImageFormat::Com,
        ".bin" => ImageFormat::Raw,
        _ => ImageFormat::HeaderPrefixed,
    };

    let key = if format.is_headerless() {
        name.to_string()
    } else {
        name.strip_suffix(extension).unwrap_or(name).to_string()
    };

    Ok(Classified {
        name: name.to_string(),
        format,
        key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_of(name: &str) -> ImageFormat {
        classify(name).unwrap().format
    }

    #[test]
    fn headerless_extensions_are_case_sensitive() {
        assert_eq!(format_of("data.bin"), ImageFormat::Raw);
        assert_eq!(format_of("GAME.COM"), ImageFormat::Com);
        assert_eq!(format_of("data.BIN"), ImageFormat::HeaderPrefixed);
        assert_eq!(format_of("game.com"), ImageFormat::HeaderPrefixed);
    }

    #[test]
    fn mon_prefix_wins_for_either_headerless_extension() {
        assert_eq!(format_of("mon32.bin"), ImageFormat::Monitor);
        assert_eq!(format_of("monitor.COM"), ImageFormat::Monitor);
        assert_eq!(format_of("roms/mon32.bin"), ImageFormat::Monitor);
        assert_eq!(format_of("mon32.rk"), ImageFormat::HeaderPrefixed);
        assert_eq!(format_of("xmon.bin"), ImageFormat::Raw);
    }

    #[test]
    fn first_dot_starts_the_extension() {
        let c = classify("game.v2.bin").unwrap();
        assert_eq!(c.format, ImageFormat::HeaderPrefixed);
        assert_eq!(c.key, "game");
    }

    #[test]
    fn keys_strip_only_header_prefixed_extensions() {
        assert_eq!(classify("game.img").unwrap().key, "game");
        assert_eq!(classify("data.bin").unwrap().key, "data.bin");
        assert_eq!(classify("TEST.COM").unwrap().key, "TEST.COM");
        assert_eq!(classify("files/klad.rk").unwrap().key, "files/klad");
    }

    #[test]
    fn dots_in_directories_do_not_count() {
        assert_eq!(classify("./roms/game.rk").unwrap().key, "./roms/game");
        assert!(matches!(
            classify("./roms/game"),
            Err(DumpError::MissingExtension(n)) if n == "./roms/game"
        ));
    }

    #[test]
    fn missing_extension_is_rejected() {
        assert!(matches!(classify("noext"), Err(DumpError::MissingExtension(_))));
    }
}
