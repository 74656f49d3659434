pub mod signature;
pub mod wait_ready;
pub mod watch;
