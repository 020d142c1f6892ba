pub mod complete;
pub mod export;
pub mod generate;
pub mod init;
pub mod remove;
pub mod settings;
pub mod show;
pub mod summary;
pub mod validate;

pub mod util;
