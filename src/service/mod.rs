pub mod dynamodb;
pub mod invoice;
pub mod s3;
