use std::{collections::HashMap, time::Duration};

use anyhow::Context;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};

use super::DynamoDB;

/// Maximum number of requests DynamoDB accepts in one BatchWriteItem call
pub const MAX_BATCH_SIZE: usize = 25;

/// Consecutive flushes allowed to leave items unprocessed before giving up
pub const MAX_UNPROCESSED_ATTEMPTS: u32 = 8;

const BASE_BACKOFF: Duration = Duration::from_millis(25);

/// Buffers put requests for a single table and sends them in batches.
///
/// A batch is sent whenever the buffer fills up, [BatchWriter::close] drains whatever is left.
/// Unprocessed items returned by the service are queued again behind the buffered ones.
pub struct BatchWriter<'a> {
    client: &'a DynamoDB,
    table: &'a str,
    buffer: Vec<WriteRequest>,
    unprocessed_attempts: u32,
}

impl<'a> BatchWriter<'a> {
    pub fn new(client: &'a DynamoDB, table: &'a str) -> Self {
        Self {
            client,
            table,
            buffer: Vec::with_capacity(MAX_BATCH_SIZE),
            unprocessed_attempts: 0,
        }
    }

    /// Queues an item, sending a batch if the buffer is full
    pub async fn put_item(&mut self, item: HashMap<String, AttributeValue>) -> anyhow::Result<()> {
        let put_request = PutRequest::builder()
            .set_item(Some(item))
            .build()
            .context("could not build put request")?;

        self.buffer
            .push(WriteRequest::builder().put_request(put_request).build());

        if self.buffer.len() >= MAX_BATCH_SIZE {
            self.flush().await?;
        }

        Ok(())
    }

    /// Sends every buffered item, including those the service hands back as unprocessed
    #[tracing::instrument(skip(self), fields(table = %self.table, pending = self.buffer.len()))]
    pub async fn close(mut self) -> anyhow::Result<()> {
        while !self.buffer.is_empty() {
            self.flush().await?;
        }
        Ok(())
    }

    /// Sends up to [MAX_BATCH_SIZE] items from the front of the buffer
    async fn flush(&mut self) -> anyhow::Result<()> {
        let size = self.buffer.len().min(MAX_BATCH_SIZE);
        let batch: Vec<WriteRequest> = self.buffer.drain(..size).collect();

        let unprocessed = self.client.batch_write(self.table, batch).await?;

        tracing::debug!(
            table = %self.table,
            batch_size = size,
            unprocessed = unprocessed.len(),
            "flushed batch"
        );

        if unprocessed.is_empty() {
            self.unprocessed_attempts = 0;
            return Ok(());
        }

        self.unprocessed_attempts += 1;
        if self.unprocessed_attempts > MAX_UNPROCESSED_ATTEMPTS {
            anyhow::bail!(
                "{} items were still unprocessed after {} attempts writing to {}",
                unprocessed.len() + self.buffer.len(),
                MAX_UNPROCESSED_ATTEMPTS,
                self.table
            );
        }

        self.buffer.extend(unprocessed);
        tokio::time::sleep(BASE_BACKOFF * 2u32.pow(self.unprocessed_attempts - 1)).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::service::dynamodb::MockDynamodbClient;

    fn item(id: usize) -> HashMap<String, AttributeValue> {
        HashMap::from([("id".to_string(), AttributeValue::S(format!("NF-{id}")))])
    }

    fn request_id(request: &WriteRequest) -> String {
        request
            .put_request()
            .and_then(|put| put.item().get("id"))
            .and_then(|id| id.as_s().ok())
            .cloned()
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn empty_writer_sends_nothing() {
        let mut client = MockDynamodbClient::default();
        client.expect_batch_write().times(0);

        BatchWriter::new(&client, "NotasFiscais")
            .close()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn sends_full_batches_then_the_remainder() {
        let sizes = Arc::new(Mutex::new(Vec::new()));
        let recorded = sizes.clone();

        let mut client = MockDynamodbClient::default();
        client
            .expect_batch_write()
            .withf(|table, _| table == "NotasFiscais")
            .times(3)
            .returning(move |_, requests| {
                recorded.lock().unwrap().push(requests.len());
                Ok(vec![])
            });

        let mut writer = BatchWriter::new(&client, "NotasFiscais");
        for id in 0..60 {
            writer.put_item(item(id)).await.unwrap();
        }
        writer.close().await.unwrap();

        assert_eq!(*sizes.lock().unwrap(), vec![25, 25, 10]);
    }

    #[tokio::test]
    async fn unprocessed_items_are_resent() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let recorded = sent.clone();
        let mut first_call = true;

        let mut client = MockDynamodbClient::default();
        client
            .expect_batch_write()
            .times(2)
            .returning(move |_, requests| {
                recorded
                    .lock()
                    .unwrap()
                    .push(requests.iter().map(request_id).collect::<Vec<_>>());
                if first_call {
                    first_call = false;
                    Ok(requests.into_iter().skip(1).collect())
                } else {
                    Ok(vec![])
                }
            });

        let mut writer = BatchWriter::new(&client, "NotasFiscais");
        for id in 0..3 {
            writer.put_item(item(id)).await.unwrap();
        }
        writer.close().await.unwrap();

        assert_eq!(
            *sent.lock().unwrap(),
            vec![
                vec!["NF-0".to_string(), "NF-1".to_string(), "NF-2".to_string()],
                vec!["NF-1".to_string(), "NF-2".to_string()],
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_when_items_stay_unprocessed() {
        let mut client = MockDynamodbClient::default();
        client
            .expect_batch_write()
            .times(MAX_UNPROCESSED_ATTEMPTS as usize + 1)
            .returning(|_, requests| Ok(requests));

        let mut writer = BatchWriter::new(&client, "NotasFiscais");
        writer.put_item(item(1)).await.unwrap();
        let err = writer.close().await.unwrap_err();

        assert!(err.to_string().contains("1 items were still unprocessed"));
    }

    #[tokio::test]
    async fn write_failure_is_propagated() {
        let mut client = MockDynamodbClient::default();
        client
            .expect_batch_write()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("throttled")));

        let mut writer = BatchWriter::new(&client, "NotasFiscais");
        writer.put_item(item(1)).await.unwrap();

        assert!(writer.close().await.is_err());
    }
}
