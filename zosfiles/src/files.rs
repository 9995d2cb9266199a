//! `Files`, one method per z/OSMF REST files capability.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

use zosfiles_shared::{ZosFilesError, ZosFilesResult};

use crate::handler::{ByteStream, RequestHandler, ResponseBody};
use crate::options::{
    CopyDatasetRequest, CopyFileRequest, DatasetCreationOptions, DefaultDatasetProfile,
    MountOptions, UssEntryType, ZfsCreationOptions,
};
use crate::request::{RequestBody, RequestBuilder, RequestDescriptor};

/// Entry point for USS file, dataset, and zFS operations.
///
/// Every method validates its inputs, builds one request, sends it, and
/// returns the decoded body unchanged. Validation failures are returned
/// before anything is sent.
///
/// `Files` holds no mutable state; it can be shared freely.
#[derive(Clone)]
pub struct Files {
    builder: RequestBuilder,
    handler: Arc<dyn RequestHandler>,
}

impl Files {
    /// Connect to z/OSMF through the bundled reqwest transport.
    #[cfg(feature = "rest")]
    pub fn new(connection: &crate::rest::ZosmfConnection) -> ZosFilesResult<Self> {
        let client = crate::rest::RestClient::new(connection)?;
        let builder = connection
            .headers
            .iter()
            .fold(RequestBuilder::new(&connection.url), |b, (name, value)| {
                b.with_default_header(name, value.as_str())
            });
        Ok(Self::with_handler(builder, Arc::new(client)))
    }

    /// Use a custom request handler.
    pub fn with_handler(builder: RequestBuilder, handler: Arc<dyn RequestHandler>) -> Self {
        Self { builder, handler }
    }

    /// The builder used for every request; exposes the exact descriptors
    /// without sending them.
    pub fn request_builder(&self) -> &RequestBuilder {
        &self.builder
    }

    async fn send(&self, request: RequestDescriptor) -> ZosFilesResult<ResponseBody> {
        tracing::debug!(method = %request.method, url = %request.url, "zosfiles request");
        self.handler.perform_request(request).await
    }

    async fn send_streamed(&self, request: RequestDescriptor) -> ZosFilesResult<ByteStream> {
        tracing::debug!(method = %request.method, url = %request.url, "zosfiles streamed request");
        self.handler.perform_streamed_request(request).await
    }

    // ========================================================================
    // USS files
    // ========================================================================

    /// List the USS directory at `path`.
    pub async fn list_files(&self, path: &str) -> ZosFilesResult<ResponseBody> {
        self.send(self.builder.list_files(path)).await
    }

    /// Content of a USS file. The complete path must be given.
    pub async fn get_file_content(&self, file_path: &str) -> ZosFilesResult<ResponseBody> {
        let request = self.builder.get_file_content(file_path);
        self.send(request).await
    }

    pub async fn get_file_content_streamed(&self, file_path: &str) -> ZosFilesResult<ByteStream> {
        let request = self.builder.get_file_content(file_path);
        self.send_streamed(request).await
    }

    /// Create a file or directory. `mode` is a permission string such as
    /// `rwxr-xr-x`.
    pub async fn create_uss(
        &self,
        file_path: &str,
        entry_type: UssEntryType,
        mode: Option<&str>,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self.builder.create_uss(file_path, entry_type, mode)?;
        self.send(request).await
    }

    /// Delete a file or directory; `recursive` removes non-empty directories.
    pub async fn delete_uss(
        &self,
        file_path: &str,
        recursive: bool,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self.builder.delete_uss(file_path, recursive);
        self.send(request).await
    }

    /// Replace the content of an existing USS file.
    pub async fn write_to_uss(
        &self,
        file_path: &str,
        data: impl Into<Bytes>,
        encoding: Option<&str>,
    ) -> ZosFilesResult<ResponseBody> {
        let body = RequestBody::Bytes(data.into());
        let request = self.builder.write_to_uss(file_path, body, encoding);
        self.send(request).await
    }

    /// Upload a local file into a USS file.
    ///
    /// Fails with `SourceNotFound` before any request when `input_file` is
    /// not a regular file.
    pub async fn upload_file_to_uss(
        &self,
        input_file: impl AsRef<Path>,
        file_path: &str,
        encoding: Option<&str>,
    ) -> ZosFilesResult<ResponseBody> {
        let body = local_source(input_file.as_ref()).await?;
        let request = self.builder.write_to_uss(file_path, body, encoding);
        self.send(request).await
    }

    /// Stream a USS file into a local file. Returns the bytes written.
    pub async fn download_uss(
        &self,
        file_path: &str,
        output_file: impl AsRef<Path>,
    ) -> ZosFilesResult<u64> {
        let stream = self.get_file_content_streamed(file_path).await?;
        write_stream(stream, output_file.as_ref()).await
    }

    // ========================================================================
    // Datasets: listing and reading
    // ========================================================================

    /// Datasets matching `name_pattern`; `attributes` adds the base
    /// attribute set to each entry.
    pub async fn list_dsn(
        &self,
        name_pattern: &str,
        attributes: bool,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self.builder.list_dsn(name_pattern, attributes);
        self.send(request).await
    }

    /// Members of a PDS/PDSE, as the `items` array of the response.
    ///
    /// `limit` defaults to 1000 and `attributes` to `member`. A response
    /// without an `items` array fails with `MalformedResponse`.
    pub async fn list_dsn_members(
        &self,
        dataset_name: &str,
        member_pattern: Option<&str>,
        member_start: Option<&str>,
        limit: Option<u32>,
        attributes: Option<&str>,
    ) -> ZosFilesResult<Vec<Value>> {
        let request = self.builder.list_dsn_members(
            dataset_name,
            member_pattern,
            member_start,
            limit,
            attributes,
        );
        let response = self.send(request).await?;
        if let ResponseBody::Json(Value::Object(mut body)) = response
            && let Some(Value::Array(items)) = body.remove("items")
        {
            return Ok(items);
        }

        tracing::warn!(dataset = dataset_name, "Member list response has no 'items' array");
        Err(ZosFilesError::MalformedResponse(format!(
            "member list for {dataset_name} has no 'items' array"
        )))
    }

    pub async fn get_dsn_content(&self, dataset_name: &str) -> ZosFilesResult<ResponseBody> {
        let request = self.builder.get_dsn_content(dataset_name);
        self.send(request).await
    }

    pub async fn get_dsn_content_streamed(&self, dataset_name: &str) -> ZosFilesResult<ByteStream> {
        let request = self.builder.get_dsn_content(dataset_name);
        self.send_streamed(request).await
    }

    /// Dataset content without codepage conversion. With `with_prefixes`,
    /// each record is preceded by its 4-byte big-endian length.
    pub async fn get_dsn_binary_content(
        &self,
        dataset_name: &str,
        with_prefixes: bool,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self
            .builder
            .get_dsn_binary_content(dataset_name, with_prefixes);
        self.send(request).await
    }

    pub async fn get_dsn_binary_content_streamed(
        &self,
        dataset_name: &str,
        with_prefixes: bool,
    ) -> ZosFilesResult<ByteStream> {
        let request = self
            .builder
            .get_dsn_binary_content(dataset_name, with_prefixes);
        self.send_streamed(request).await
    }

    /// Stream a dataset's text content into a local file.
    pub async fn download_dsn(
        &self,
        dataset_name: &str,
        output_file: impl AsRef<Path>,
    ) -> ZosFilesResult<u64> {
        let stream = self.get_dsn_content_streamed(dataset_name).await?;
        write_stream(stream, output_file.as_ref()).await
    }

    /// Stream a dataset's binary content into a local file.
    pub async fn download_binary_dsn(
        &self,
        dataset_name: &str,
        output_file: impl AsRef<Path>,
        with_prefixes: bool,
    ) -> ZosFilesResult<u64> {
        let stream = self
            .get_dsn_binary_content_streamed(dataset_name, with_prefixes)
            .await?;
        write_stream(stream, output_file.as_ref()).await
    }

    // ========================================================================
    // Datasets: writing, creating, deleting
    // ========================================================================

    /// Replace the content of an existing dataset or member.
    pub async fn write_to_dsn(
        &self,
        dataset_name: &str,
        data: impl Into<Bytes>,
        encoding: Option<&str>,
    ) -> ZosFilesResult<ResponseBody> {
        let body = RequestBody::Bytes(data.into());
        let request = self.builder.write_to_dsn(dataset_name, body, encoding);
        self.send(request).await
    }

    /// Upload a local file into a dataset or member.
    ///
    /// Fails with `SourceNotFound` before any request when `input_file` is
    /// not a regular file.
    pub async fn upload_file_to_dsn(
        &self,
        input_file: impl AsRef<Path>,
        dataset_name: &str,
        encoding: Option<&str>,
    ) -> ZosFilesResult<ResponseBody> {
        let body = local_source(input_file.as_ref()).await?;
        let request = self.builder.write_to_dsn(dataset_name, body, encoding);
        self.send(request).await
    }

    /// Allocate a sequential or partitioned dataset.
    pub async fn create_data_set(
        &self,
        dataset_name: &str,
        options: &DatasetCreationOptions,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self.builder.create_data_set(dataset_name, options)?;
        self.send(request).await
    }

    /// Allocate a dataset from a named preset.
    pub async fn create_default_data_set(
        &self,
        dataset_name: &str,
        profile: DefaultDatasetProfile,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self.builder.create_default_data_set(dataset_name, profile)?;
        self.send(request).await
    }

    pub async fn delete_data_set(
        &self,
        dataset_name: &str,
        volume: Option<&str>,
        member_name: Option<&str>,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self
            .builder
            .delete_data_set(dataset_name, volume, member_name);
        self.send(request).await
    }

    // ========================================================================
    // Datasets: HSM
    // ========================================================================

    /// Migrate a dataset. Without `wait` the request is queued.
    pub async fn migrate_data_set(
        &self,
        dataset_name: &str,
        wait: bool,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self.builder.migrate_data_set(dataset_name, wait)?;
        self.send(request).await
    }

    pub async fn recall_migrated_data_set(
        &self,
        dataset_name: &str,
        wait: bool,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self.builder.recall_migrated_data_set(dataset_name, wait)?;
        self.send(request).await
    }

    /// Delete a migrated dataset; `purge` ignores retention.
    pub async fn delete_migrated_data_set(
        &self,
        dataset_name: &str,
        purge: bool,
        wait: bool,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self
            .builder
            .delete_migrated_data_set(dataset_name, purge, wait)?;
        self.send(request).await
    }

    // ========================================================================
    // Datasets: rename and copy
    // ========================================================================

    pub async fn rename_dataset(
        &self,
        before_dataset_name: &str,
        after_dataset_name: &str,
        enq: Option<&str>,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self
            .builder
            .rename_dataset(before_dataset_name, after_dataset_name, enq)?;
        self.send(request).await
    }

    /// Rename a member. `enq`, when given, must be `SHRW` or `EXCLU`.
    pub async fn rename_dataset_member(
        &self,
        dataset_name: &str,
        before_member_name: &str,
        after_member_name: &str,
        enq: Option<&str>,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self.builder.rename_dataset_member(
            dataset_name,
            before_member_name,
            after_member_name,
            enq,
        )?;
        self.send(request).await
    }

    pub async fn copy_from_dataset(
        &self,
        request: &CopyDatasetRequest,
    ) -> ZosFilesResult<ResponseBody> {
        self.send(self.builder.copy_from_dataset(request)?).await
    }

    pub async fn copy_from_file(&self, request: &CopyFileRequest) -> ZosFilesResult<ResponseBody> {
        self.send(self.builder.copy_from_file(request)?).await
    }

    // ========================================================================
    // zFS filesystems
    // ========================================================================

    pub async fn create_zfs_file_system(
        &self,
        file_system_name: &str,
        options: &ZfsCreationOptions,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self
            .builder
            .create_zfs_file_system(file_system_name, options)?;
        self.send(request).await
    }

    pub async fn delete_zfs_file_system(
        &self,
        file_system_name: &str,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self.builder.delete_zfs_file_system(file_system_name);
        self.send(request).await
    }

    pub async fn mount_file_system(
        &self,
        file_system_name: &str,
        mount_point: &str,
        options: MountOptions,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self
            .builder
            .mount_file_system(file_system_name, mount_point, options)?;
        self.send(request).await
    }

    pub async fn unmount_file_system(
        &self,
        file_system_name: &str,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self.builder.unmount_file_system(file_system_name)?;
        self.send(request).await
    }

    /// Mounted filesystems, filtered by `file_path` or `file_system_name`.
    pub async fn list_unix_file_systems(
        &self,
        file_path: Option<&str>,
        file_system_name: Option<&str>,
    ) -> ZosFilesResult<ResponseBody> {
        let request = self
            .builder
            .list_unix_file_systems(file_path, file_system_name);
        self.send(request).await
    }
}

/// Body for an upload, after checking the source exists.
async fn local_source(path: &Path) -> ZosFilesResult<RequestBody> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(RequestBody::File(path.to_path_buf())),
        _ => Err(ZosFilesError::SourceNotFound(path.to_path_buf())),
    }
}

/// Write `stream` into `output_file`. A failed download leaves no file behind.
async fn write_stream(stream: ByteStream, output_file: &Path) -> ZosFilesResult<u64> {
    let file = tokio::fs::File::create(output_file).await?;
    match copy_stream(stream, file).await {
        Ok(written) => {
            tracing::info!(path = %output_file.display(), bytes = written, "Download complete");
            Ok(written)
        }
        Err(err) => {
            if let Err(cleanup) = tokio::fs::remove_file(output_file).await {
                tracing::warn!(
                    path = %output_file.display(),
                    error = %cleanup,
                    "Failed to remove partial download"
                );
            }
            Err(err)
        }
    }
}

async fn copy_stream(mut stream: ByteStream, mut file: tokio::fs::File) -> ZosFilesResult<u64> {
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}
