mod kafka;

pub use kafka::KafkaBroker;
