use std::time::Duration;

use domain::model::MessageEnvelope;
use domain::service::BrokerPublisher;
use futures::StreamExt;
use rdkafka::config::RDKafkaLogLevel;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::{Headers, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::{ClientConfig, Message};
use tokio_util::sync::CancellationToken;
use upload_core::Dispatcher;

const CORRELATION_HEADER: &str = "correlation-data";

/// `rdkafka`-backed realization of [`BrokerPublisher`] plus the consumer
/// loop that feeds the [`Dispatcher`]. This is the out-of-scope broker
/// client spec.md treats as an external collaborator — `upload_core` never
/// sees `rdkafka` directly.
pub struct KafkaBroker {
    producer: FutureProducer,
    consumer: StreamConsumer,
}

impl KafkaBroker {
    pub fn new(bootstrap_servers: &str, group_id: &str, topics: &[&str]) -> anyhow::Result<Self> {
        let mut producer_config = ClientConfig::new();
        producer_config.set("bootstrap.servers", bootstrap_servers);
        producer_config.set_log_level(RDKafkaLogLevel::Debug);
        let producer: FutureProducer = producer_config.create()?;

        let mut consumer_config = ClientConfig::new();
        consumer_config
            .set("bootstrap.servers", bootstrap_servers)
            .set("group.id", group_id)
            .set("enable.auto.commit", "true")
            .set_log_level(RDKafkaLogLevel::Debug);
        let consumer: StreamConsumer = consumer_config.create()?;
        consumer.subscribe(topics)?;

        Ok(Self { producer, consumer })
    }

    /// Drains the Kafka stream, decoding each message's envelope and
    /// handing it to `dispatcher`. Exits at the next message boundary once
    /// `cancellation` fires.
    pub async fn run(&self, dispatcher: &Dispatcher, cancellation: CancellationToken) {
        let mut stream = self.consumer.stream();
        loop {
            tokio::select! {
                _ = cancellation.cancelled() => {
                    tracing::info!("kafka broker consumer stopping");
                    return;
                }
                message = stream.next() => {
                    match message {
                        Some(Ok(borrowed_message)) => self.handle(&borrowed_message, dispatcher),
                        Some(Err(error)) => tracing::error!(%error, "kafka consumer error"),
                        None => return,
                    }
                }
            }
        }
    }

    fn handle(&self, message: &rdkafka::message::BorrowedMessage<'_>, dispatcher: &Dispatcher) {
        let correlation_id = message
            .headers()
            .and_then(|headers| {
                headers.iter().find(|header| header.key == CORRELATION_HEADER).and_then(|header| {
                    header.value.map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                })
            })
            .unwrap_or_default();

        let Some(Ok(payload)) = message.payload_view::<str>() else {
            tracing::warn!(correlation_id, "received message with no decodable payload");
            return;
        };

        let envelope: MessageEnvelope = match serde_json::from_str(payload) {
            Ok(envelope) => envelope,
            Err(error) => {
                tracing::warn!(correlation_id, %error, "failed to decode broker envelope");
                return;
            }
        };

        if let Err(error) = dispatcher.on_message(envelope, &correlation_id) {
            tracing::warn!(correlation_id, %error, "dispatcher rejected message");
        }
    }
}

#[async_trait::async_trait]
impl BrokerPublisher for KafkaBroker {
    async fn publish(&self, topic: &str, message_type: &str, payload: &str, correlation_id: &str) -> anyhow::Result<()> {
        let envelope = MessageEnvelope {
            message_type: message_type.to_owned(),
            payload: payload.to_owned(),
        };
        let body = serde_json::to_string(&envelope)?;
        let headers = OwnedHeaders::new().insert(rdkafka::message::Header {
            key: CORRELATION_HEADER,
            value: Some(correlation_id),
        });

        self.producer
            .send(
                FutureRecord::to(topic).payload(&body).key(correlation_id).headers(headers),
                Duration::from_secs(5),
            )
            .await
            .map_err(|(error, _message)| anyhow::anyhow!(error))?;

        Ok(())
    }
}
