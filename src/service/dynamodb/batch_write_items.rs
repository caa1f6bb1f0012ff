use anyhow::Context;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::WriteRequest;

/// Sends a single BatchWriteItem call for the table.
/// Returns the requests the service left unprocessed.
#[tracing::instrument(skip(client, requests), fields(request_count = requests.len()))]
pub async fn batch_write_items(
    client: &Client,
    table: &str,
    requests: Vec<WriteRequest>,
) -> anyhow::Result<Vec<WriteRequest>> {
    let output = client
        .batch_write_item()
        .request_items(table, requests)
        .send()
        .await
        .context(format!("failed to batch write items to {table}"))?;

    Ok(output
        .unprocessed_items
        .and_then(|mut unprocessed| unprocessed.remove(table))
        .unwrap_or_default())
}
