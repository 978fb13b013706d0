use std::collections::HashSet;
use std::path::Path;

use crate::shared::remote_error::RemoteError;

/// Domain interface for the bucket/object store that holds uploaded media.
pub trait ObjectStore: Send {
    fn list_bucket_names(&self) -> Result<HashSet<String>, RemoteError>;

    fn create_bucket(&self, bucket: &str) -> Result<(), RemoteError>;

    /// Stream the file at `source` into `bucket` under `key`.
    fn put_object(&self, bucket: &str, key: &str, source: &Path) -> Result<(), RemoteError>;

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), RemoteError>;
}
