use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::config::Config;
use crate::emit::emitter_for;
use crate::error::DumpError;
use crate::image::load_image;

/// What a batch run did. Without `keep_going`, `skipped` is always empty.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped: Vec<String>,
}

/// Image names from `input`, one per line, up to the first blank line or the
/// end of input. Trailing CR and LF characters are stripped.
pub fn read_names<R: BufRead>(mut input: R) -> impl Iterator<Item = io::Result<String>> {
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => {
                done = true;
                None
            }
            Ok(_) => {
                let name = line.trim_end_matches(&['\r', '\n'][..]);
                if name.is_empty() {
                    done = true;
                    None
                } else {
                    Some(Ok(name.to_string()))
                }
            }
            Err(e) => {
                done = true;
                Some(Err(e))
            }
        }
    })
}

/// Regular files in `dir`, sorted by name.
///
/// # Errors
///
/// Will return `Err` if the directory cannot be listed
pub fn list_dir(dir: &Path) -> Result<Vec<String>, DumpError> {
    let mut names = vec![];
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => warn!(?name, "skipping file with a non UTF-8 name"),
        }
    }
    names.sort();
    Ok(names)
}

/// Converts a single image and writes its bare declaration.
///
/// # Errors
///
/// Will return `Err` if the image cannot be loaded or the output cannot be written
pub fn run_single(name: &str, config: &Config, out: &mut dyn Write) -> Result<(), DumpError> {
    let emitter = emitter_for(config.target, &config.map_name);
    let record = load_image(&config.resolve(name), name)?;
    emitter.declaration(out, &record)?;
    Ok(())
}

/// Converts every image in `names`, in order, wrapped in the target's
/// preamble and epilogue.
///
/// # Errors
///
/// Will return `Err` on the first failing image unless `config.keep_going` is
/// set, and always when reading names or writing output fails
pub fn run_batch<I>(names: I, config: &Config, out: &mut dyn Write) -> Result<BatchSummary, DumpError>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let emitter = emitter_for(config.target, &config.map_name);
    let mut summary = BatchSummary::default();

    emitter.preamble(out)?;
    for name in names {
        let name = name?;
        match load_image(&config.resolve(&name), &name) {
            Ok(record) => {
                emitter.declaration(out, &record)?;
                summary.converted = summary.converted.saturating_add(1);
            }
            Err(e) if config.keep_going && e.is_per_file() => {
                warn!(%name, error = %e, "skipping image");
                summary.skipped.push(name);
            }
            Err(e) => return Err(e),
        }
    }
    emitter.epilogue(out)?;

    info!(
        converted = summary.converted,
        skipped = summary.skipped.len(),
        "batch complete"
    );
    Ok(summary)
}
