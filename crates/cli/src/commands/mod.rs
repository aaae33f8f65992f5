//! Command handlers for the docslice CLI.

pub mod chunk;
pub mod init;
pub mod sections;

pub use chunk::ChunkCommand;
pub use init::InitCommand;
pub use sections::SectionsCommand;
