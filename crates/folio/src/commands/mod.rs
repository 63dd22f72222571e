//! CLI command implementations.

pub(crate) mod init;
pub(crate) mod serve;

pub(crate) use init::InitArgs;
pub(crate) use serve::ServeArgs;
