pub mod command_relay;
pub mod publisher;

pub use command_relay::CommandRelay;
pub use publisher::{Recap, RecapSink, publish_once, recap_task};
