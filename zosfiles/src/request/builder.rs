//! Translates operations into [`RequestDescriptor`]s.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;

use zosfiles_shared::ZosFilesResult;
use zosfiles_shared::constants::{api, defaults, headers};

use super::body::{ActionBody, DatasetRef, FileRef, HsmBody, MountBody, UssCreateBody};
use super::{HttpMethod, RequestBody, RequestDescriptor, expect, header_key};
use crate::options::{
    CopyDatasetRequest, CopyFileRequest, DatasetCreationOptions, DefaultDatasetProfile, Enqueue,
    FileType, MountOptions, UssEntryType, ZfsCreationOptions,
};

/// Builds descriptors against one REST files endpoint.
///
/// Holds the endpoint (`<base>/zosmf/restfiles/`) and the default headers
/// sent with every request. Methods that carry caller options run the
/// matching validation first, so an `Err` here means nothing was sent.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    endpoint: String,
    default_headers: BTreeMap<String, String>,
}

impl RequestBuilder {
    /// Create a builder for the z/OSMF host at `base_url`
    /// (e.g. `https://zosmf.example.com:443`).
    pub fn new(base_url: &str) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), api::RESTFILES_PATH);
        let default_headers = BTreeMap::from([
            (header_key(headers::CONTENT_TYPE), headers::JSON.to_string()),
            (header_key(headers::CSRF), String::new()),
            (header_key(headers::ACCEPT_ENCODING), headers::GZIP.to_string()),
        ]);
        Self {
            endpoint,
            default_headers,
        }
    }

    /// Add or override a header sent with every request. Names are
    /// case-insensitive.
    pub fn with_default_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.default_headers.insert(header_key(name), value.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    fn request(&self, method: HttpMethod, resource: &str) -> RequestDescriptor {
        RequestDescriptor::new(
            method,
            format!("{}{}", self.endpoint, resource),
            self.default_headers.clone(),
        )
    }

    // ------------------------------------------------------------------
    // Listing
    // ------------------------------------------------------------------

    pub fn list_files(&self, path: &str) -> RequestDescriptor {
        self.request(HttpMethod::Get, api::USS_FILES)
            .with_query("path", Some(path))
    }

    /// `attributes` asks for the base attribute set instead of names only.
    pub fn list_dsn(&self, name_pattern: &str, attributes: bool) -> RequestDescriptor {
        let request = self
            .request(HttpMethod::Get, api::DATASETS)
            .with_query("dslevel", Some(name_pattern));
        if attributes {
            request.with_header(headers::IBM_ATTRIBUTES, "base")
        } else {
            request
        }
    }

    pub fn list_dsn_members(
        &self,
        dataset_name: &str,
        member_pattern: Option<&str>,
        member_start: Option<&str>,
        limit: Option<u32>,
        attributes: Option<&str>,
    ) -> RequestDescriptor {
        let resource = format!("{}/member", dataset_resource(dataset_name, None, None));
        self.request(HttpMethod::Get, &resource)
            .with_query("start", member_start)
            .with_query("pattern", member_pattern)
            .with_header(
                headers::IBM_MAX_ITEMS,
                limit.unwrap_or(defaults::MEMBER_LIST_LIMIT).to_string(),
            )
            .with_header(
                headers::IBM_ATTRIBUTES,
                attributes.unwrap_or(defaults::MEMBER_ATTRIBUTES),
            )
    }

    /// Mounted filesystems, optionally filtered by path or filesystem name.
    /// The server rejects both filters at once.
    pub fn list_unix_file_systems(
        &self,
        file_path: Option<&str>,
        file_system_name: Option<&str>,
    ) -> RequestDescriptor {
        self.request(HttpMethod::Get, api::MOUNTED_FS)
            .with_query("path", file_path)
            .with_query("fsname", file_system_name)
    }

    // ------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------

    pub fn get_file_content(&self, file_path: &str) -> RequestDescriptor {
        self.request(HttpMethod::Get, &uss_resource(file_path))
            .with_uss_path(file_path)
    }

    pub fn get_dsn_content(&self, dataset_name: &str) -> RequestDescriptor {
        self.request(HttpMethod::Get, &dataset_resource(dataset_name, None, None))
    }

    /// Raw bytes; `with_prefixes` asks for a 4-byte big-endian length before
    /// each record.
    pub fn get_dsn_binary_content(
        &self,
        dataset_name: &str,
        with_prefixes: bool,
    ) -> RequestDescriptor {
        let data_type = if with_prefixes { "record" } else { "binary" };
        self.get_dsn_content(dataset_name)
            .with_header(headers::ACCEPT, headers::OCTET_STREAM)
            .with_header(headers::IBM_DATA_TYPE, data_type)
    }

    // ------------------------------------------------------------------
    // Writing
    // ------------------------------------------------------------------

    pub fn write_to_dsn(
        &self,
        dataset_name: &str,
        body: RequestBody,
        encoding: Option<&str>,
    ) -> RequestDescriptor {
        self.request(HttpMethod::Put, &dataset_resource(dataset_name, None, None))
            .with_header(headers::CONTENT_TYPE, text_content_type(encoding))
            .with_body(body)
            .with_expected(expect::WRITE)
    }

    pub fn write_to_uss(
        &self,
        file_path: &str,
        body: RequestBody,
        encoding: Option<&str>,
    ) -> RequestDescriptor {
        self.request(HttpMethod::Put, &uss_resource(file_path))
            .with_header(headers::CONTENT_TYPE, text_content_type(encoding))
            .with_body(body)
            .with_expected(expect::WRITE)
            .with_uss_path(file_path)
    }

    // ------------------------------------------------------------------
    // Creating and deleting
    // ------------------------------------------------------------------

    pub fn create_uss(
        &self,
        file_path: &str,
        entry_type: UssEntryType,
        mode: Option<&str>,
    ) -> ZosFilesResult<RequestDescriptor> {
        let body = UssCreateBody {
            entry_type,
            mode: mode.map(str::to_string),
        };
        Ok(self
            .request(HttpMethod::Post, &uss_resource(file_path))
            .with_body(json_body(&body)?)
            .with_expected(expect::CREATE))
    }

    pub fn delete_uss(&self, file_path: &str, recursive: bool) -> RequestDescriptor {
        let request = self
            .request(HttpMethod::Delete, &uss_resource(file_path))
            .with_expected(expect::USS_DELETE)
            .with_uss_path(file_path);
        if recursive {
            request.with_header(headers::IBM_OPTION, "recursive")
        } else {
            request
        }
    }

    pub fn create_data_set(
        &self,
        dataset_name: &str,
        options: &DatasetCreationOptions,
    ) -> ZosFilesResult<RequestDescriptor> {
        let normalized = options.normalize()?;
        Ok(self
            .request(HttpMethod::Post, &dataset_resource(dataset_name, None, None))
            .with_body(json_body(&normalized)?)
            .with_expected(expect::CREATE))
    }

    pub fn create_default_data_set(
        &self,
        dataset_name: &str,
        profile: DefaultDatasetProfile,
    ) -> ZosFilesResult<RequestDescriptor> {
        Ok(self
            .request(HttpMethod::Post, &dataset_resource(dataset_name, None, None))
            .with_body(json_body(&profile.options())?)
            .with_expected(expect::CREATE))
    }

    /// `volume` addresses an uncataloged dataset; `member` a single member.
    pub fn delete_data_set(
        &self,
        dataset_name: &str,
        volume: Option<&str>,
        member_name: Option<&str>,
    ) -> RequestDescriptor {
        self.request(
            HttpMethod::Delete,
            &dataset_resource(dataset_name, member_name, volume),
        )
        .with_expected(expect::DATASET_DELETE)
    }

    // ------------------------------------------------------------------
    // HSM
    // ------------------------------------------------------------------

    pub fn migrate_data_set(
        &self,
        dataset_name: &str,
        wait: bool,
    ) -> ZosFilesResult<RequestDescriptor> {
        self.hsm(dataset_name, &HsmBody::migrate(wait))
    }

    pub fn recall_migrated_data_set(
        &self,
        dataset_name: &str,
        wait: bool,
    ) -> ZosFilesResult<RequestDescriptor> {
        self.hsm(dataset_name, &HsmBody::recall(wait))
    }

    pub fn delete_migrated_data_set(
        &self,
        dataset_name: &str,
        purge: bool,
        wait: bool,
    ) -> ZosFilesResult<RequestDescriptor> {
        self.hsm(dataset_name, &HsmBody::delete(purge, wait))
    }

    fn hsm(&self, dataset_name: &str, body: &HsmBody) -> ZosFilesResult<RequestDescriptor> {
        Ok(self
            .request(HttpMethod::Put, &dataset_resource(dataset_name, None, None))
            .with_body(json_body(body)?)
            .with_expected(expect::ACTION))
    }

    // ------------------------------------------------------------------
    // Rename and copy
    // ------------------------------------------------------------------

    pub fn rename_dataset(
        &self,
        before_dataset_name: &str,
        after_dataset_name: &str,
        enq: Option<&str>,
    ) -> ZosFilesResult<RequestDescriptor> {
        let mut body = ActionBody::rename();
        body.from_dataset = Some(DatasetRef::new(before_dataset_name));
        body.enq = Enqueue::parse_optional(enq)?;

        let target = dataset_resource(after_dataset_name.trim(), None, None);
        self.action(&target, &body)
    }

    pub fn rename_dataset_member(
        &self,
        dataset_name: &str,
        before_member_name: &str,
        after_member_name: &str,
        enq: Option<&str>,
    ) -> ZosFilesResult<RequestDescriptor> {
        let mut from = DatasetRef::new(dataset_name);
        from.member = Some(before_member_name.trim().to_string());

        let mut body = ActionBody::rename();
        body.from_dataset = Some(from);
        body.enq = Enqueue::parse_optional(enq)?;

        let target = dataset_resource(
            dataset_name.trim(),
            Some(after_member_name.trim()),
            None,
        );
        self.action(&target, &body)
    }

    pub fn copy_from_dataset(
        &self,
        request: &CopyDatasetRequest,
    ) -> ZosFilesResult<RequestDescriptor> {
        let mut from = DatasetRef::new(&request.from_dataset);
        from.member = request.from_member.clone();
        from.volser = request.volser.clone();
        from.alias = request.alias;

        let mut body = ActionBody::copy();
        body.from_dataset = Some(from);
        body.replace = Some(request.replace);
        body.enq = request.enqueue()?;

        let target = dataset_resource(
            request.to_dataset.trim(),
            request.to_member.as_deref(),
            None,
        );
        self.action(&target, &body)
    }

    /// `replace` is only sent for text transfers.
    pub fn copy_from_file(&self, request: &CopyFileRequest) -> ZosFilesResult<RequestDescriptor> {
        let file_type = request.transfer_type()?;

        let mut body = ActionBody::copy();
        body.from_file = Some(FileRef {
            filename: request.from_filename.trim().to_string(),
            file_type,
        });
        if file_type == FileType::Text {
            body.replace = Some(request.replace);
        }
        body.enq = request.enqueue()?;

        let target = dataset_resource(
            request.to_dataset.trim(),
            request.to_member.as_deref(),
            None,
        );
        self.action(&target, &body)
    }

    fn action(&self, resource: &str, body: &ActionBody) -> ZosFilesResult<RequestDescriptor> {
        Ok(self
            .request(HttpMethod::Put, resource)
            .with_body(json_body(body)?)
            .with_expected(expect::ACTION))
    }

    // ------------------------------------------------------------------
    // zFS and mounts
    // ------------------------------------------------------------------

    pub fn create_zfs_file_system(
        &self,
        file_system_name: &str,
        options: &ZfsCreationOptions,
    ) -> ZosFilesResult<RequestDescriptor> {
        options.validate()?;
        Ok(self
            .request(HttpMethod::Post, &zfs_resource(file_system_name))
            .with_body(json_body(options)?)
            .with_expected(expect::CREATE))
    }

    pub fn delete_zfs_file_system(&self, file_system_name: &str) -> RequestDescriptor {
        self.request(HttpMethod::Delete, &zfs_resource(file_system_name))
            .with_expected(expect::USS_DELETE)
    }

    pub fn mount_file_system(
        &self,
        file_system_name: &str,
        mount_point: &str,
        options: MountOptions,
    ) -> ZosFilesResult<RequestDescriptor> {
        self.mount_action(file_system_name, &MountBody::mount(mount_point, options))
    }

    pub fn unmount_file_system(&self, file_system_name: &str) -> ZosFilesResult<RequestDescriptor> {
        self.mount_action(file_system_name, &MountBody::unmount())
    }

    fn mount_action(
        &self,
        file_system_name: &str,
        body: &MountBody,
    ) -> ZosFilesResult<RequestDescriptor> {
        let resource = format!("{}/{}", api::MOUNTED_FS, segment(file_system_name));
        Ok(self
            .request(HttpMethod::Put, &resource)
            .with_body(json_body(body)?)
            .with_expected(expect::MOUNT))
    }
}

/// Escaped inside a USS path. `/` stays literal as the separator.
const USS_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Escaped inside a single dataset, member, volume or filesystem name.
/// `(`, `)`, `$`, `@` and `.` stay literal.
const SEGMENT: &AsciiSet = &USS_PATH.add(b'/');

fn segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// `ds/[-VOLUME/]NAME[(MEMBER)]`
fn dataset_resource(name: &str, member: Option<&str>, volume: Option<&str>) -> String {
    let mut resource = format!("{}/", api::DATASETS);
    if let Some(volume) = volume {
        resource.push_str(&format!("-{}/", segment(volume)));
    }
    resource.push_str(&segment(name));
    if let Some(member) = member {
        resource.push_str(&format!("({})", segment(member)));
    }
    resource
}

fn uss_resource(path: &str) -> String {
    let path = utf8_percent_encode(path.trim_start_matches('/'), USS_PATH);
    format!("{}/{}", api::USS_FILES, path)
}

fn zfs_resource(name: &str) -> String {
    format!("{}/{}", api::ZFS, segment(name))
}

fn text_content_type(encoding: Option<&str>) -> String {
    format!(
        "text/plain; charset={}",
        encoding.unwrap_or(defaults::ENCODING)
    )
}

fn json_body<T: Serialize>(value: &T) -> ZosFilesResult<RequestBody> {
    Ok(RequestBody::Json(serde_json::to_value(value)?))
}
