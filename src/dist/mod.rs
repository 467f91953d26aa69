//! Distribution adapters run by package managers rather than by users.

pub mod formula;
pub mod postinstall;

pub use formula::Formula;
pub use postinstall::{PostInstallReport, Verification};
