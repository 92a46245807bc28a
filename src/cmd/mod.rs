/// CLI error type.
pub mod error;
/// Typed single-entry decode command.
pub mod get;
/// Value printers shared by commands.
pub mod print;
/// Document tree materialize-and-print command.
pub mod show;
/// File loading and output helpers.
pub mod util;
