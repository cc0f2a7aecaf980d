#![warn(
    clippy::cargo,
    clippy::complexity,
    clippy::correctness,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::pedantic,
    clippy::nursery,
    clippy::arithmetic_side_effects,
    clippy::format_push_string,
    clippy::if_then_some_else_none,
    clippy::missing_asserts_for_indexing,
    clippy::redundant_type_annotations,
    clippy::unwrap_in_result
)]
//! Turns 8-bit memory images (`.bin`, `.COM` and header-prefixed tape files)
//! into script source that embeds them as string or array literals, so an
//! emulator can preload them.

mod batch;
mod config;
mod emit;
mod encode;
mod error;
mod format;
mod image;
mod types;

pub use batch::{list_dir, read_names, run_batch, run_single, BatchSummary};
pub use config::{Config, Target};
pub use emit::{emitter_for, AssemblyScriptEmitter, Emitter, ScriptEmitter};
pub use encode::{write_decimal, write_escaped, BYTES_PER_LINE};
pub use error::DumpError;
pub use format::{classify, Classified, ImageFormat};
pub use image::{headerless_range, load_image, read_image};
pub use types::{Address, ImageRecord};

/// Converts one image file and returns its declaration as text.
///
/// # Errors
///
/// Will return an `Err` if the image could not be converted
pub fn dump_file(name: &str, config: &Config) -> Result<String, DumpError> {
    let mut out = Vec::new();
    run_single(name, config, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
