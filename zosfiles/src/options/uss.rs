//! USS entry and mount options.

use serde::Serialize;

use zosfiles_shared::ZosFilesError;

wire_enum! {
    /// Kind of USS entry to create.
    pub enum UssEntryType, invalid = |v: &str| {
        ZosFilesError::InvalidOptionValue(format!("Invalid USS entry type: {v}"))
    }, {
        File => "file",
        Directory => "dir",
    }
}

wire_enum! {
    /// Access mode of a mounted filesystem.
    pub enum MountMode, invalid = |v: &str| {
        ZosFilesError::InvalidOptionValue(format!("Invalid mount mode: {v}"))
    }, {
        ReadWrite => "rdwr",
        ReadOnly => "rdonly",
    }
}

/// Extra fields of a mount request. `action` and `mount-point` are set by
/// the request builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MountOptions {
    /// Filesystem type (default: zFS).
    pub fs_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<MountMode>,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            fs_type: "zFS".to_string(),
            mode: None,
        }
    }
}

impl MountOptions {
    pub fn fs_type(mut self, fs_type: impl Into<String>) -> Self {
        self.fs_type = fs_type.into();
        self
    }

    pub fn mode(mut self, mode: MountMode) -> Self {
        self.mode = Some(mode);
        self
    }
}
