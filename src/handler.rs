use lambda_runtime::{Error, LambdaEvent};

use crate::{
    context::Context,
    model::{IngestResponse, ObjectLocation, StorageEvent},
    service,
};

/// Processes the s3 upload notification.
/// Only the first record is read, any error is logged and returned to the runtime.
#[tracing::instrument(
    skip(ctx, event),
    fields(request_id = %event.context.request_id, environment = %ctx.config.environment)
)]
pub async fn handler(
    ctx: Context,
    event: LambdaEvent<StorageEvent>,
) -> Result<IngestResponse, Error> {
    tracing::debug!(payload=?event.payload, "event received");

    match process(&ctx, &event.payload).await {
        Ok(response) => Ok(response),
        Err(err) => {
            tracing::error!(error=?err, "error processing file");
            // the runtime only reports the top level message, so flatten the cause chain into it
            Err(format!("{err:#}").into())
        }
    }
}

async fn process(ctx: &Context, event: &StorageEvent) -> anyhow::Result<IngestResponse> {
    let location = ObjectLocation::from_event(event)?;

    if event.records.len() > 1 {
        tracing::warn!(
            record_count = event.records.len(),
            "event has more than one record, only the first is processed"
        );
    }

    service::invoice::ingest(ctx, &location).await?;

    IngestResponse::success()
}
