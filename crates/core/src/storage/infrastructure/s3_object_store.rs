use std::collections::HashSet;
use std::path::Path;

use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;

use crate::shared::aws_context::AwsContext;
use crate::shared::constants::DEFAULT_REGION;
use crate::shared::remote_error::RemoteError;
use crate::storage::domain::object_store::ObjectStore;

/// Object store backed by Amazon S3.
pub struct S3ObjectStore {
    context: AwsContext,
    client: Client,
}

impl S3ObjectStore {
    pub fn new(context: AwsContext) -> Self {
        let client = Client::new(context.config());
        Self { context, client }
    }
}

/// S3 rejects an explicit location constraint for its default region.
fn bucket_configuration(region: Option<&str>) -> Option<CreateBucketConfiguration> {
    region.filter(|r| *r != DEFAULT_REGION).map(|r| {
        CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(r))
            .build()
    })
}

fn remote_error<E>(operation: &str, err: E) -> RemoteError
where
    E: std::error::Error + Send + Sync + 'static,
{
    format!("{operation}: {}", DisplayErrorContext(err)).into()
}

impl ObjectStore for S3ObjectStore {
    fn list_bucket_names(&self) -> Result<HashSet<String>, RemoteError> {
        let output = self
            .context
            .block_on(self.client.list_buckets().send())
            .map_err(|e| remote_error("ListBuckets", e))?;
        Ok(output
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(str::to_string))
            .collect())
    }

    fn create_bucket(&self, bucket: &str) -> Result<(), RemoteError> {
        log::debug!("Creating bucket {bucket}");
        self.context
            .block_on(
                self.client
                    .create_bucket()
                    .bucket(bucket)
                    .set_create_bucket_configuration(bucket_configuration(self.context.region()))
                    .send(),
            )
            .map_err(|e| remote_error("CreateBucket", e))?;
        Ok(())
    }

    fn put_object(&self, bucket: &str, key: &str, source: &Path) -> Result<(), RemoteError> {
        self.context.block_on(async {
            let body = ByteStream::from_path(source).await?;
            self.client
                .put_object()
                .bucket(bucket)
                .key(key)
                .body(body)
                .send()
                .await
                .map_err(|e| remote_error("PutObject", e))?;
            Ok::<(), RemoteError>(())
        })
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), RemoteError> {
        self.context
            .block_on(self.client.delete_object().bucket(bucket).key(key).send())
            .map_err(|e| remote_error("DeleteObject", e))?;
        Ok(())
    }
}
