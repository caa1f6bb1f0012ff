mod batch_write_items;
mod batch_writer;

pub use batch_writer::*;

use anyhow::Result;
use aws_sdk_dynamodb::types::WriteRequest;
#[allow(unused_imports)]
use mockall::automock;

#[cfg(test)]
pub use MockDynamodbClient as DynamoDB;
#[cfg(not(test))]
pub use DynamodbClient as DynamoDB;

#[derive(Clone, Debug)]
pub struct DynamodbClient {
    /// Inner DynamoDB client
    inner: aws_sdk_dynamodb::Client,
}

#[cfg_attr(test, automock)]
impl DynamodbClient {
    pub fn new(inner: aws_sdk_dynamodb::Client) -> Self {
        Self { inner }
    }

    /// Writes up to 25 requests to the table in one call, returning the unprocessed ones
    #[tracing::instrument(skip(self, requests))]
    pub async fn batch_write(
        &self,
        table: &str,
        requests: Vec<WriteRequest>,
    ) -> Result<Vec<WriteRequest>> {
        batch_write_items::batch_write_items(&self.inner, table, requests).await
    }
}
