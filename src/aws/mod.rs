/// AWS layer: SDK configuration, caller identity, DynamoDB access.
pub mod attribute;
pub mod config;
pub mod dynamo;
pub mod identity;

pub use config::{AwsOptions, AwsSession};
pub use dynamo::{DynamoStore, RecordStore};
pub use identity::{IdentityProvider, StsIdentity};
