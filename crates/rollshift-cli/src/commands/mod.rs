//! Command implementations for the rollshift CLI.

mod analyze;
mod batch;
mod convert;
mod init;

pub use analyze::cmd_analyze;
pub use batch::cmd_batch;
pub use convert::cmd_convert;
pub use init::cmd_init;
