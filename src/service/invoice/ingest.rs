use std::collections::HashMap;

use anyhow::Context;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::{
    config::INVOICE_TABLE_NAME,
    context,
    model::{ObjectLocation, PersistedItem, parse_invoices},
    service::dynamodb::BatchWriter,
};

/// Reads the invoice document at the location and writes every invoice to the table.
/// Returns the number of invoices written.
#[tracing::instrument(skip(ctx, location), fields(bucket=%location.bucket, key=%location.key))]
pub async fn ingest(ctx: &context::Context, location: &ObjectLocation) -> anyhow::Result<usize> {
    tracing::info!("processing file");

    let bytes = ctx
        .s3_client
        .get_object_bytes(&location.bucket, &location.key)
        .await?;

    let content = String::from_utf8(bytes).context("invoice document is not valid utf-8")?;
    let invoices = parse_invoices(&content)?;

    tracing::info!(invoice_count = invoices.len(), "invoice document read");

    let invoice_count = invoices.len();
    let mut writer = BatchWriter::new(&ctx.dynamodb_client, INVOICE_TABLE_NAME);

    tracing::trace!(table = INVOICE_TABLE_NAME, "writing invoices");

    for invoice in invoices {
        tracing::trace!(id = %invoice.id, "saving invoice");
        let item: HashMap<String, AttributeValue> =
            serde_dynamo::to_item(PersistedItem::from(invoice))
                .context("could not convert invoice to item")?;
        writer.put_item(item).await?;
    }

    writer.close().await?;

    tracing::info!(invoice_count, "all invoices saved");

    Ok(invoice_count)
}
