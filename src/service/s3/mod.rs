//! Read access to the bucket the invoice documents are uploaded to

mod get_object_bytes;

#[allow(unused_imports)]
use mockall::automock;

#[cfg(test)]
pub use MockS3Client as S3;
#[cfg(not(test))]
pub use S3Client as S3;

/// Thin wrapper so the handler can swap in a mock under test
#[derive(Clone, Debug)]
pub struct S3Client {
    client: aws_sdk_s3::Client,
}

#[cfg_attr(test, automock)]
impl S3Client {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Downloads the whole object, the invoice documents are small enough to hold in memory
    #[tracing::instrument(skip(self))]
    pub async fn get_object_bytes(&self, bucket: &str, key: &str) -> anyhow::Result<Vec<u8>> {
        get_object_bytes::get_object_bytes(&self.client, bucket, key).await
    }
}
