mod broker_publisher;
mod uploader;

pub use broker_publisher::BrokerPublisher;
pub use uploader::Uploader;
