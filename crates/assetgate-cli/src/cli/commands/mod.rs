//! CLI command handlers. Each command is in its own file.

mod completions;
mod config_path;
mod resolve;
mod transforms;

pub use completions::run_completions;
pub use config_path::run_config_path;
pub use resolve::{run_resolve, ResolveArgs};
pub use transforms::run_transforms;
