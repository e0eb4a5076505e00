use domain::model::ProcessRequest;

/// Remove every file named in `request.file_list` from
/// `request.container_path`. A missing file is a skip, not an error; a
/// removal failure is logged and does not stop the remaining files —
/// deletion errors are never reported back to the cloud.
pub async fn delete_files(request: &ProcessRequest) {
    for file_name in &request.file_list {
        let local_path = request.local_path(file_name);
        match tokio::fs::metadata(&local_path).await {
            Ok(_) => match tokio::fs::remove_file(&local_path).await {
                Ok(()) => tracing::info!(
                    correlation_id = %request.correlation_id,
                    path = %local_path.display(),
                    "deleted uploaded file"
                ),
                Err(error) => tracing::warn!(
                    correlation_id = %request.correlation_id,
                    path = %local_path.display(),
                    %error,
                    "failed to delete uploaded file"
                ),
            },
            Err(_) => tracing::trace!(
                correlation_id = %request.correlation_id,
                path = %local_path.display(),
                "skipped deleting, file does not exist"
            ),
        }
    }
}
