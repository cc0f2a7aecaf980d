use std::io::{self, Write};

use crate::config::Target;
use crate::encode::{write_decimal, write_escaped};
use crate::types::ImageRecord;

/// Host-language rendering of image records. A batch is
/// `preamble`, one `declaration` per image, then `epilogue`; single-file mode
/// writes only the declaration.
pub trait Emitter {
    /// # Errors
    ///
    /// Will return `Err` if writing to `out` fails
    fn preamble(&self, out: &mut dyn Write) -> io::Result<()>;

    /// # Errors
    ///
    /// Will return `Err` if writing to `out` fails
    fn declaration(&self, out: &mut dyn Write, record: &ImageRecord) -> io::Result<()>;

    /// # Errors
    ///
    /// Will return `Err` if writing to `out` fails
    fn epilogue(&self, out: &mut dyn Write) -> io::Result<()>;
}

#[must_use]
pub fn emitter_for(target: Target, map_name: &str) -> Box<dyn Emitter> {
    match target {
        Target::Script => Box::new(ScriptEmitter::new(map_name)),
        Target::AssemblyScript => Box::new(AssemblyScriptEmitter::new(map_name)),
    }
}

/// Untyped object map of escaped string literals.
#[derive(Debug, Clone)]
pub struct ScriptEmitter {
    map_name: String,
}

impl ScriptEmitter {
    #[must_use]
    pub fn new(map_name: &str) -> Self {
        Self {
            map_name: map_name.to_string(),
        }
    }
}

impl Emitter for ScriptEmitter {
    fn preamble(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "function preloaded_files() {{")?;
        writeln!(
            out,
            "var {}: {{[key: string]: {{image: string, start: number, end: number, entry: number}}}} = {{}};",
            self.map_name
        )
    }

    fn declaration(&self, out: &mut dyn Write, record: &ImageRecord) -> io::Result<()> {
        writeln!(out, "{}['{}'] = {{", self.map_name, quote_key(&record.name))?;
        writeln!(out, "start: {},", record.start)?;
        writeln!(out, "end: {},", record.end)?;
        writeln!(out, "entry: {},", record.entry)?;
        writeln!(out, "image:")?;
        write_escaped(out, &record.bytes)?;
        write!(out, "\n}};\n\n")
    }

    fn epilogue(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "return {};", self.map_name)?;
        writeln!(out, "}}")
    }
}

/// Typed `Map<string, File>` with `u8[]` arrays.
#[derive(Debug, Clone)]
pub struct AssemblyScriptEmitter {
    map_name: String,
}

impl AssemblyScriptEmitter {
    #[must_use]
    pub fn new(map_name: &str) -> Self {
        Self {
            map_name: map_name.to_string(),
        }
    }
}

const FILE_CLASS: &str = "\
export class File {
    start: u16;
    end: u16;
    entry: u16;
    image: u8[];
    constructor(start: u16, end: u16, entry: u16, image: u8[]) {
        this.start = start;
        this.end = end;
        this.entry = entry;
        this.image = image;
    }
}
";

impl Emitter for AssemblyScriptEmitter {
    fn preamble(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(FILE_CLASS.as_bytes())?;
        writeln!(out, "export function preloaded_files(): Map<string, File> {{")?;
        writeln!(out, "let {} = new Map<string, File>();", self.map_name)?;
        writeln!(out)
    }

    fn declaration(&self, out: &mut dyn Write, record: &ImageRecord) -> io::Result<()> {
        writeln!(
            out,
            "{}.set('{}', new File(0x{:04X}, 0x{:04X}, 0x{:04X}, [",
            self.map_name,
            quote_key(&record.name),
            record.start,
            record.end,
            record.entry
        )?;
        write_decimal(out, &record.bytes)?;
        if !record.bytes.is_empty() {
            writeln!(out)?;
        }
        write!(out, "]));\n\n")
    }

    fn epilogue(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "return {};", self.map_name)?;
        writeln!(out, "}}")
    }
}

fn quote_key(key: &str) -> String {
    key.replace('\\', "\\\\").replace('\'', "\\'")
}
