/// The core's only outbound seam onto the message broker. Concrete
/// implementations live outside the core (see `upload-agent`'s
/// `rdkafka`-backed adapter) — the core only ever needs to wrap a payload
/// in the envelope and hand it off.
#[async_trait::async_trait]
pub trait BrokerPublisher: Send + Sync {
    /// Publish `payload` on `topic`, tagged with `message_type` and carrying
    /// `correlation_id` as a broker-level property.
    ///
    /// A publish failure is logged by the caller and never propagated past
    /// the worker that attempted it (at-least-once delivery is assumed to
    /// compensate for a dropped notification).
    async fn publish(
        &self,
        topic: &str,
        message_type: &str,
        payload: &str,
        correlation_id: &str,
    ) -> anyhow::Result<()>;
}
