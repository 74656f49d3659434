pub mod signature;
pub mod watch;
