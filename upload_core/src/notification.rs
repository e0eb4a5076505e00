use domain::model::{message_type, topic, FileUploadNotification, ProcessRequest};
use domain::service::BrokerPublisher;

/// Build and publish the completion notification for a finalized request.
/// A publish failure is logged and swallowed — the at-least-once broker is
/// expected to make up for a lost notification on a future retry of
/// whatever drove this request in the first place.
pub async fn publish(broker: &dyn BrokerPublisher, request: &ProcessRequest) {
    let notification = FileUploadNotification::from_request(request);
    let payload = match serde_json::to_string(&notification) {
        Ok(payload) => payload,
        Err(error) => {
            tracing::error!(
                correlation_id = %request.correlation_id,
                %error,
                "failed to encode upload notification"
            );
            return;
        }
    };

    match broker
        .publish(
            topic::FILE_UPLOAD_NOTIFICATION,
            message_type::ARBITRARY_TO_CLOUD,
            &payload,
            &request.correlation_id,
        )
        .await
    {
        Ok(()) => tracing::info!(
            correlation_id = %request.correlation_id,
            upload_id = %request.upload_id,
            result = notification.upload_result,
            "published upload notification"
        ),
        Err(error) => tracing::warn!(
            correlation_id = %request.correlation_id,
            %error,
            "failed to publish upload notification"
        ),
    }
}
