pub mod completions;
pub mod config;
pub mod extensions;
pub mod init;
pub mod render;
