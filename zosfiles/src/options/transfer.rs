//! Copy and rename requests.

use zosfiles_shared::{ZosFilesError, ZosFilesResult};

wire_enum! {
    /// Serialization (enqueue) mode requested on the target dataset.
    pub enum Enqueue, invalid = |_: &str| ZosFilesError::InvalidValuesForEnq, {
        /// Shared with write.
        Shrw => "SHRW",
        /// Exclusive.
        Exclu => "EXCLU",
    }
}

impl Enqueue {
    /// Parse an optional caller-supplied mode; unset and empty both mean
    /// "let the server decide".
    pub fn parse_optional(value: Option<&str>) -> ZosFilesResult<Option<Enqueue>> {
        match value {
            None | Some("") => Ok(None),
            Some(mode) => mode.parse().map(Some),
        }
    }
}

wire_enum! {
    /// Transfer mode for copying a USS file into a dataset.
    pub enum FileType, invalid = |_: &str| {
        ZosFilesError::InvalidOptionValue("Invalid value for type.".to_string())
    }, {
        Text => "text",
        Binary => "binary",
        Executable => "executable",
    }
}

/// Copy a dataset or member into another dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyDatasetRequest {
    pub from_dataset: String,
    pub from_member: Option<String>,
    /// Volume of an uncataloged source.
    pub volser: Option<String>,
    /// Copy alias entries along with the member.
    pub alias: Option<bool>,
    pub to_dataset: String,
    pub to_member: Option<String>,
    /// Raw enqueue mode; validated when the request is built.
    pub enq: Option<String>,
    /// Overwrite like-named members in the target.
    pub replace: bool,
}

impl CopyDatasetRequest {
    pub fn new(from_dataset: impl Into<String>, to_dataset: impl Into<String>) -> Self {
        Self {
            from_dataset: from_dataset.into(),
            to_dataset: to_dataset.into(),
            ..Default::default()
        }
    }

    pub fn from_member(mut self, member: impl Into<String>) -> Self {
        self.from_member = Some(member.into());
        self
    }

    pub fn volser(mut self, volser: impl Into<String>) -> Self {
        self.volser = Some(volser.into());
        self
    }

    pub fn alias(mut self, alias: bool) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn to_member(mut self, member: impl Into<String>) -> Self {
        self.to_member = Some(member.into());
        self
    }

    pub fn enq(mut self, enq: impl Into<String>) -> Self {
        self.enq = Some(enq.into());
        self
    }

    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Validated enqueue mode.
    pub fn enqueue(&self) -> ZosFilesResult<Option<Enqueue>> {
        Enqueue::parse_optional(self.enq.as_deref())
    }
}

/// Copy a USS file into a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFileRequest {
    pub from_filename: String,
    pub to_dataset: String,
    pub to_member: Option<String>,
    /// Raw transfer mode (`text`, `binary`, `executable`); validated when
    /// the request is built.
    pub file_type: String,
    pub enq: Option<String>,
    /// Only sent for `text` transfers.
    pub replace: bool,
}

impl CopyFileRequest {
    pub fn new(from_filename: impl Into<String>, to_dataset: impl Into<String>) -> Self {
        Self {
            from_filename: from_filename.into(),
            to_dataset: to_dataset.into(),
            to_member: None,
            file_type: FileType::Text.as_str().to_string(),
            enq: None,
            replace: false,
        }
    }

    pub fn to_member(mut self, member: impl Into<String>) -> Self {
        self.to_member = Some(member.into());
        self
    }

    pub fn file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = file_type.into();
        self
    }

    pub fn enq(mut self, enq: impl Into<String>) -> Self {
        self.enq = Some(enq.into());
        self
    }

    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Validated transfer mode.
    pub fn transfer_type(&self) -> ZosFilesResult<FileType> {
        self.file_type.parse()
    }

    /// Validated enqueue mode.
    pub fn enqueue(&self) -> ZosFilesResult<Option<Enqueue>> {
        Enqueue::parse_optional(self.enq.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enqueue_values() {
        assert_eq!(Enqueue::parse_optional(None).unwrap(), None);
        assert_eq!(Enqueue::parse_optional(Some("")).unwrap(), None);
        assert_eq!(
            Enqueue::parse_optional(Some("SHRW")).unwrap(),
            Some(Enqueue::Shrw)
        );
        assert_eq!(
            Enqueue::parse_optional(Some("EXCLU")).unwrap(),
            Some(Enqueue::Exclu)
        );
    }

    #[test]
    fn test_enqueue_rejects_others() {
        for bad in ["RANDOM", "SHR", "shrw", " SHRW"] {
            let err = Enqueue::parse_optional(Some(bad)).unwrap_err();
            assert!(matches!(err, ZosFilesError::InvalidValuesForEnq), "{bad}");
        }
    }

    #[test]
    fn test_file_type() {
        let req = CopyFileRequest::new("/u/ibmuser/a.txt", "IBMUSER.DATA");
        assert_eq!(req.transfer_type().unwrap(), FileType::Text);

        let req = req.file_type("executable");
        assert_eq!(req.transfer_type().unwrap(), FileType::Executable);

        let err = req.file_type("invalid").transfer_type().unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for type.");
    }

    #[test]
    fn test_copy_dataset_builder() {
        let req = CopyDatasetRequest::new("IBMUSER.SRC", "IBMUSER.DST")
            .from_member("A")
            .to_member("B")
            .enq("EXCLU")
            .replace(true);
        assert_eq!(req.from_member.as_deref(), Some("A"));
        assert_eq!(req.to_member.as_deref(), Some("B"));
        assert_eq!(req.enqueue().unwrap(), Some(Enqueue::Exclu));
        assert!(req.replace);
    }
}
