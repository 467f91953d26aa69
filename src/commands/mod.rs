//! CLI use cases. Each function resolves its arguments (prompting when they
//! are missing), drives the [`Linker`](crate::linker::Linker) and prints the
//! outcome.

mod alias;
mod binary;
mod list;

pub use alias::{alias, unalias};
pub use binary::{install, remove, smart_install};
pub use list::{format_entries, list};
