#![recursion_limit = "256"]

mod config;
mod context;
mod entrypoint;
mod environment;
mod handler;
mod model;
mod service;

use std::sync::Arc;

use anyhow::Context as _;
use config::Config;
use context::Context;
use entrypoint::Entrypoint;
use handler::handler;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use model::StorageEvent;

#[tokio::main]
async fn main() -> Result<(), Error> {
    Entrypoint::from_env().init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("all necessary env vars should be available")?;

    tracing::trace!(environment=%config.environment, endpoint_url=?config.endpoint_url, "initialized config");

    let sdk_config = config.load_aws_config().await;

    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.force_path_style())
        .build();

    let ctx = Context {
        s3_client: Arc::new(service::s3::S3::new(aws_sdk_s3::Client::from_conf(
            s3_config,
        ))),
        dynamodb_client: Arc::new(service::dynamodb::DynamoDB::new(
            aws_sdk_dynamodb::Client::new(&sdk_config),
        )),
        config,
    };

    tracing::trace!("initialized clients");

    let func = service_fn(move |event: LambdaEvent<StorageEvent>| {
        let ctx = ctx.clone();
        async move { handler(ctx, event).await }
    });

    run(func).await
}
