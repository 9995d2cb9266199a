//! zFS filesystem creation options.

use serde::Serialize;

use zosfiles_shared::constants::limits::{MAX_ALLOCATION_QUANTITY, MAX_PERMS};
use zosfiles_shared::{ZosFilesError, ZosFilesResult};

/// Body of `POST mfs/zfs/<name>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZfsCreationOptions {
    /// Permissions of the root directory, written as octal digits (e.g. 755).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perms: Option<i64>,
    /// Primary allocation in cylinders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cyls_pri: Option<u32>,
    /// Secondary allocation in cylinders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cyls_sec: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<String>>,
    /// Owning group of the root directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Seconds the server waits for the allocation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

impl ZfsCreationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn perms(mut self, perms: i64) -> Self {
        self.perms = Some(perms);
        self
    }

    pub fn cyls_pri(mut self, cyls: u32) -> Self {
        self.cyls_pri = Some(cyls);
        self
    }

    pub fn cyls_sec(mut self, cyls: u32) -> Self {
        self.cyls_sec = Some(cyls);
        self
    }

    pub fn storage_class(mut self, class: impl Into<String>) -> Self {
        self.storage_class = Some(class.into());
        self
    }

    pub fn management_class(mut self, class: impl Into<String>) -> Self {
        self.management_class = Some(class.into());
        self
    }

    pub fn data_class(mut self, class: impl Into<String>) -> Self {
        self.data_class = Some(class.into());
        self
    }

    pub fn volumes(mut self, volumes: Vec<String>) -> Self {
        self.volumes = Some(volumes);
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn timeout(mut self, secs: u32) -> Self {
        self.timeout = Some(secs);
        self
    }

    /// Check `perms` and the cylinder quantities; the first violation wins.
    ///
    /// `perms` is bounded by the decimal number 777, not octal 0o777.
    pub fn validate(&self) -> ZosFilesResult<()> {
        if let Some(perms) = self.perms
            && !(0..=MAX_PERMS).contains(&perms)
        {
            return Err(ZosFilesError::InvalidPermsOption(perms));
        }

        for cyls in [self.cyls_pri, self.cyls_sec].into_iter().flatten() {
            if cyls > MAX_ALLOCATION_QUANTITY {
                return Err(ZosFilesError::MaxAllocationQuantityExceeded);
            }
        }

        Ok(())
    }
}
