use serde::Serialize;

pub mod invoice;
pub mod location;

pub use invoice::*;
pub use location::*;

/// Message returned to the caller once every invoice has been written
pub const SUCCESS_MESSAGE: &str = "Dados processados com sucesso!";

/// The value returned to the lambda runtime on success
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct IngestResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON encoded message
    pub body: String,
}

impl IngestResponse {
    pub fn success() -> anyhow::Result<Self> {
        Ok(Self {
            status_code: 200,
            body: serde_json::to_string(SUCCESS_MESSAGE)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_body_is_json_encoded() {
        let response = IngestResponse::success().unwrap();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "statusCode": 200,
                "body": "\"Dados processados com sucesso!\""
            })
        );
    }
}
