//! Constants for the z/OSMF REST files API.
//!
//! Centralized location for paths, header names, and allocation limits
//! shared between the request builder and the transport.

/// REST API path segments.
pub mod api {
    /// Root of the REST files service, relative to the z/OSMF host.
    pub const RESTFILES_PATH: &str = "/zosmf/restfiles/";

    /// Dataset resources.
    pub const DATASETS: &str = "ds";

    /// USS file resources.
    pub const USS_FILES: &str = "fs";

    /// Mounted filesystem resources.
    pub const MOUNTED_FS: &str = "mfs";

    /// zFS filesystem resources.
    pub const ZFS: &str = "mfs/zfs";
}

/// Header names and fixed values used on the wire.
pub mod headers {
    pub const ACCEPT: &str = "Accept";
    pub const ACCEPT_ENCODING: &str = "Accept-Encoding";
    pub const CONTENT_TYPE: &str = "Content-Type";

    /// CSRF marker z/OSMF requires on every state-changing request.
    pub const CSRF: &str = "X-CSRF-ZOSMF-HEADER";

    pub const IBM_DATA_TYPE: &str = "X-IBM-Data-Type";
    pub const IBM_MAX_ITEMS: &str = "X-IBM-Max-Items";
    pub const IBM_ATTRIBUTES: &str = "X-IBM-Attributes";
    pub const IBM_OPTION: &str = "X-IBM-Option";

    pub const JSON: &str = "application/json";
    pub const OCTET_STREAM: &str = "application/octet-stream";
    pub const GZIP: &str = "gzip";
}

/// Allocation limits enforced before a request is built.
pub mod limits {
    /// Largest primary/secondary quantity z/OS accepts (2^24 - 1).
    pub const MAX_ALLOCATION_QUANTITY: u32 = 16_777_215;

    /// Highest accepted zFS `perms` value. Compared as a decimal number.
    pub const MAX_PERMS: i64 = 777;
}

/// Defaults applied when a caller omits an argument.
pub mod defaults {
    /// Character set announced on text writes.
    pub const ENCODING: &str = "utf-8";

    /// `X-IBM-Max-Items` for member listings.
    pub const MEMBER_LIST_LIMIT: u32 = 1000;

    /// `X-IBM-Attributes` for member listings.
    pub const MEMBER_ATTRIBUTES: &str = "member";
}

pub mod envs {
    /// z/OSMF base URL (required).
    pub const ZOSFILES_URL: &str = "ZOSFILES_URL";

    /// User for basic authentication (optional).
    pub const ZOSFILES_USER: &str = "ZOSFILES_USER";

    /// Password for basic authentication (optional).
    pub const ZOSFILES_PASSWORD: &str = "ZOSFILES_PASSWORD";
}
