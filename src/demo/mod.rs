pub mod access_log;
pub mod synthetic;
