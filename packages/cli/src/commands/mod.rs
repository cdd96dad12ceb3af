pub mod init;
pub mod replay;
pub mod scan;
pub mod watch;

pub use init::{init, InitArgs};
pub use replay::{replay, ReplayArgs};
pub use scan::{scan, ScanArgs};
pub use watch::{watch, WatchArgs};
