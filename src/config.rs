use std::path::PathBuf;

use clap::ValueEnum;

/// Host dialect of the generated source.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, ValueEnum)]
pub enum Target {
    /// Object map of escaped string literals
    #[default]
    Script,
    /// Typed `Map<string, File>` of `u8[]` arrays
    #[value(name = "assemblyscript")]
    AssemblyScript,
}

/// Run-wide settings shared by single-file and batch conversion.
#[derive(Debug, Clone)]
pub struct Config {
    pub target: Target,
    /// Variable the declarations assign into.
    pub map_name: String,
    /// Skip files that fail to convert instead of aborting the run.
    pub keep_going: bool,
    /// Directory image names are resolved against.
    pub base_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: Target::default(),
            map_name: "files".to_string(),
            keep_going: false,
            base_dir: None,
        }
    }
}

impl Config {
    #[must_use]
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.base_dir
            .as_ref()
            .map_or_else(|| PathBuf::from(name), |dir| dir.join(name))
    }
}
