use serde::Deserialize;
use thiserror::Error;

/// S3 upload notification. Only the fields needed to locate the uploaded object are read,
/// everything else in the notification is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<StorageEventRecord>,
}

#[derive(Debug, Deserialize)]
pub struct StorageEventRecord {
    pub s3: StorageEntity,
}

#[derive(Debug, Deserialize)]
pub struct StorageEntity {
    pub bucket: StorageBucket,
    pub object: StorageObject,
}

#[derive(Debug, Deserialize)]
pub struct StorageBucket {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StorageObject {
    /// Url encoded, with spaces sent as `+`
    pub key: Option<String>,
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("event contains no records")]
    NoRecords,
    #[error("record is missing the bucket name")]
    MissingBucket,
    #[error("record is missing the object key")]
    MissingKey,
    #[error("unable to decode object key {key}")]
    UndecodableKey {
        key: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Bucket and decoded key of the uploaded object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    /// Reads the location from the first record of the event
    pub fn from_event(event: &StorageEvent) -> Result<Self, EventError> {
        let record = event.records.first().ok_or(EventError::NoRecords)?;

        let bucket = record
            .s3
            .bucket
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .ok_or(EventError::MissingBucket)?;

        let key = record
            .s3
            .object
            .key
            .as_deref()
            .ok_or(EventError::MissingKey)?;

        Ok(Self {
            bucket,
            key: decode_key(key)?,
        })
    }
}

/// S3 notifications encode keys as form data so `+` is a space and must be replaced
/// before percent decoding, otherwise `%2B` and `+` become indistinguishable
pub fn decode_key(key: &str) -> Result<String, EventError> {
    let plus_decoded = key.replace('+', " ");
    urlencoding::decode(&plus_decoded)
        .map(|decoded| decoded.into_owned())
        .map_err(|source| EventError::UndecodableKey {
            key: key.to_string(),
            source,
        })
}
