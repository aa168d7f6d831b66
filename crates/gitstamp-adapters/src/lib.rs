pub mod clock;
pub mod command;
pub mod config;
pub mod sink;
pub mod store;

pub use clock::BuildClockAdapter;
pub use command::ProcessCommandAdapter;
pub use config::GitStampConfig;
pub use sink::FileSinkAdapter;
pub use store::{DirectoryStoreAdapter, StaticStoreAdapter};
