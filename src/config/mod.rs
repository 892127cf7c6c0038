//! Invocation inputs: the module search path, template variables and the
//! request describing source, destination and ownership.
pub mod request;
pub mod search_path;
pub mod toml_loader;
pub mod variables;

pub use request::Request;
pub use search_path::SearchPath;
pub use variables::Variables;
