use anyhow::Context;
use aws_sdk_s3::Client;

#[tracing::instrument(skip(client), err)]
pub async fn get_object_bytes(client: &Client, bucket: &str, key: &str) -> anyhow::Result<Vec<u8>> {
    let object = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .with_context(|| format!("could not get item {key} from bucket {bucket}"))?;

    let expected_len = object.content_length();
    let bytes = object
        .body
        .collect()
        .await
        .with_context(|| format!("could not read body of {key}"))?
        .into_bytes();

    tracing::trace!(?expected_len, len = bytes.len(), "object downloaded");

    Ok(bytes.to_vec())
}
