//! Command-line interface.
use clap::Parser;

use crate::config::Request;

/// Version string: the build-time `RECURSE_DIRECTORY_VERSION` when set,
/// otherwise the package version.
pub const VERSION: &str = match option_env!("RECURSE_DIRECTORY_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Render a module's template tree into file and directory resources.
///
/// Prints a JSON object keyed by destination path to standard output.
#[derive(Parser, Debug)]
#[command(name = "recurse-directory", version = VERSION)]
pub struct Cli {
    /// Module and directory inside its templates/, e.g. `mymodule/configs`
    pub source_dir: String,

    /// Destination directory for the rendered templates on the target machine
    pub destination_dir: String,

    /// Mode of the rendered files [default: 0600]
    #[arg(long)]
    pub file_mode: Option<String>,

    /// Owner of files and directories
    #[arg(long)]
    pub file_owner: Option<String>,

    /// Group of files and directories
    #[arg(long)]
    pub file_group: Option<String>,

    /// Mode of directories
    #[arg(long)]
    pub dir_mode: Option<String>,

    /// Colon-separated module search path (defaults to $RECURSE_MODULEPATH, then the current directory)
    #[arg(short = 'm', long)]
    pub modulepath: Option<String>,

    /// TOML file of template variables
    #[arg(long = "vars", value_name = "FILE")]
    pub vars_file: Option<std::path::PathBuf>,

    /// Template variable, may be repeated; overrides --vars
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Print the mapping on a single line
    #[arg(long)]
    pub compact: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The invocation arguments as a [`Request`].
    #[must_use]
    pub fn request(&self) -> Request {
        Request {
            source_dir: self.source_dir.clone(),
            destination_dir: self.destination_dir.clone(),
            file_mode: self.file_mode.clone(),
            file_owner: self.file_owner.clone(),
            file_group: self.file_group.clone(),
            dir_mode: self.dir_mode.clone(),
        }
    }
}
