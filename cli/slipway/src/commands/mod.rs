//! CLI subcommand implementations.

pub mod doctor;
pub mod init;
pub mod plan;
pub mod run;
pub mod tag;
pub mod target;
