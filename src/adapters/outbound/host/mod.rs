mod channel_host;
mod logging_host;

pub use channel_host::{ChannelHost, HostSignal};
pub use logging_host::LoggingHost;
