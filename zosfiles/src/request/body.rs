//! JSON bodies of the z/OSMF dataset and filesystem actions.

use serde::Serialize;

use crate::options::{Enqueue, FileType, MountOptions, UssEntryType};

/// Source dataset of a copy or rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetRef {
    pub dsn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volser: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<bool>,
}

impl DatasetRef {
    pub fn new(dsn: &str) -> Self {
        Self {
            dsn: dsn.trim().to_string(),
            member: None,
            volser: None,
            alias: None,
        }
    }
}

/// Source USS file of a copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRef {
    pub filename: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
}

/// `{"request": "copy" | "rename", ...}` sent with `PUT ds/<target>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ActionBody {
    pub request: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_dataset: Option<DatasetRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_file: Option<FileRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enq: Option<Enqueue>,
}

impl ActionBody {
    pub fn copy() -> Self {
        Self::new("copy")
    }

    pub fn rename() -> Self {
        Self::new("rename")
    }

    fn new(request: &'static str) -> Self {
        Self {
            request,
            from_dataset: None,
            from_file: None,
            replace: None,
            enq: None,
        }
    }
}

/// HSM requests: `hmigrate`, `hrecall`, `hdelete`.
///
/// `wait` and `purge` travel as the JSON strings `"true"`/`"false"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HsmBody {
    pub request: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purge: Option<String>,
    pub wait: String,
}

impl HsmBody {
    pub fn migrate(wait: bool) -> Self {
        Self::new("hmigrate", None, wait)
    }

    pub fn recall(wait: bool) -> Self {
        Self::new("hrecall", None, wait)
    }

    pub fn delete(purge: bool, wait: bool) -> Self {
        Self::new("hdelete", Some(purge), wait)
    }

    fn new(request: &'static str, purge: Option<bool>, wait: bool) -> Self {
        Self {
            request,
            purge: purge.map(|p| p.to_string()),
            wait: wait.to_string(),
        }
    }
}

/// Body of `POST fs/<path>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UssCreateBody {
    #[serde(rename = "type")]
    pub entry_type: UssEntryType,
    /// Permission string, e.g. `rwxr-xr-x`.
    pub mode: Option<String>,
}

/// Body of `PUT mfs/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MountBody {
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_point: Option<String>,
    #[serde(flatten)]
    pub options: Option<MountOptions>,
}

impl MountBody {
    pub fn mount(mount_point: &str, options: MountOptions) -> Self {
        Self {
            action: "mount",
            mount_point: Some(mount_point.to_string()),
            options: Some(options),
        }
    }

    pub fn unmount() -> Self {
        Self {
            action: "unmount",
            mount_point: None,
            options: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hsm_flags_are_strings() {
        assert_eq!(
            serde_json::to_value(HsmBody::migrate(false)).unwrap(),
            json!({"request": "hmigrate", "wait": "false"})
        );
        assert_eq!(
            serde_json::to_value(HsmBody::delete(true, false)).unwrap(),
            json!({"request": "hdelete", "purge": "true", "wait": "false"})
        );
    }

    #[test]
    fn test_mount_body() {
        let body = MountBody::mount("/u/ibmuser/mnt", MountOptions::default());
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"action": "mount", "mount-point": "/u/ibmuser/mnt", "fs-type": "zFS"})
        );
        assert_eq!(
            serde_json::to_value(MountBody::unmount()).unwrap(),
            json!({"action": "unmount"})
        );
    }

    #[test]
    fn test_uss_create_keeps_null_mode() {
        let body = UssCreateBody {
            entry_type: UssEntryType::Directory,
            mode: None,
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"type": "dir", "mode": null})
        );
    }
}
