use std::path::Path;

use domain::service::Uploader;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

const BLOB_TYPE_HEADER: &str = "x-ms-blob-type";
const BLOCK_BLOB: &str = "BlockBlob";

/// `reqwest`-backed realization of [`Uploader`]: a single PUT of the whole
/// file body to the blob-storage SAS URI handed back by the companion
/// module, per the wire contract in `domain::model::BlobUriResponse`.
pub struct HttpUploader {
    client: reqwest::Client,
}

impl HttpUploader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpUploader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, local_path: &Path, uri: &str) -> anyhow::Result<bool> {
        let mut file = File::open(local_path).await?;
        let mut body = Vec::new();
        file.read_to_end(&mut body).await?;

        let response = self
            .client
            .put(uri)
            .header(BLOB_TYPE_HEADER, BLOCK_BLOB)
            .header(reqwest::header::CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(%uri, status = %response.status(), "upload rejected by blob storage");
        }

        Ok(response.status().is_success())
    }
}
