pub mod init;
pub mod updates;
