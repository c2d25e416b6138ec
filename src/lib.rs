//! Personal template manager: keeps named template files and directories
//! in one place, with an optional description each, and copies them out
//! on demand.

pub mod cmd;
pub mod config;
pub mod copy;
pub mod descriptions;
pub mod store;
pub mod template;
pub mod userpath;
pub mod verbosity;
