use std::sync::Arc;

use crate::{config::Config, service};

/// Clients and configuration built once per process and shared by every invocation
#[derive(Clone)]
pub struct Context {
    pub s3_client: Arc<service::s3::S3>,
    pub dynamodb_client: Arc<service::dynamodb::DynamoDB>,
    pub config: Config,
}
