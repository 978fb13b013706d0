pub mod s3_object_store;
