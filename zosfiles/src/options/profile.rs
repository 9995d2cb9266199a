//! Preset allocations for `create_default_data_set`.

use zosfiles_shared::ZosFilesError;

use super::dataset::{
    AllocationUnit, DatasetCreationOptions, DatasetOrganization, RecordFormat,
};

wire_enum! {
    /// Named allocation templates.
    pub enum DefaultDatasetProfile, invalid = |_: &str| {
        ZosFilesError::InvalidOptionValue("Invalid type for default data set.".to_string())
    }, {
        /// FB 80 PDS, 5 directory blocks.
        Partitioned => "partitioned",
        /// FB 80 sequential.
        Sequential => "sequential",
        /// FB 80 PDS, 25 directory blocks.
        Classic => "classic",
        /// VB 260 PDS for C sources.
        C => "c",
        /// Undefined-format load library.
        Binary => "binary",
    }
}

impl DefaultDatasetProfile {
    /// The complete option set sent for this profile.
    ///
    /// Presets are sent as-is, without [`normalize`](DatasetCreationOptions::normalize).
    pub fn options(&self) -> DatasetCreationOptions {
        let base = DatasetCreationOptions::new()
            .alcunit(AllocationUnit::Cyl)
            .primary(1)
            .recfm(RecordFormat::Fb)
            .blksize(6160)
            .lrecl(80);

        match self {
            DefaultDatasetProfile::Partitioned => base.dsorg(DatasetOrganization::Po).dirblk(5),
            DefaultDatasetProfile::Sequential => base.dsorg(DatasetOrganization::Ps),
            DefaultDatasetProfile::Classic => base.dsorg(DatasetOrganization::Po).dirblk(25),
            DefaultDatasetProfile::C => base
                .dsorg(DatasetOrganization::Po)
                .recfm(RecordFormat::Vb)
                .blksize(32760)
                .lrecl(260)
                .dirblk(25),
            DefaultDatasetProfile::Binary => base
                .dsorg(DatasetOrganization::Po)
                .primary(10)
                .recfm(RecordFormat::U)
                .blksize(27998)
                .lrecl(27998)
                .dirblk(25),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::partitioned(
        DefaultDatasetProfile::Partitioned,
        json!({"alcunit": "CYL", "dsorg": "PO", "primary": 1, "dirblk": 5, "recfm": "FB", "blksize": 6160, "lrecl": 80})
    )]
    #[case::sequential(
        DefaultDatasetProfile::Sequential,
        json!({"alcunit": "CYL", "dsorg": "PS", "primary": 1, "recfm": "FB", "blksize": 6160, "lrecl": 80})
    )]
    #[case::classic(
        DefaultDatasetProfile::Classic,
        json!({"alcunit": "CYL", "dsorg": "PO", "primary": 1, "recfm": "FB", "blksize": 6160, "lrecl": 80, "dirblk": 25})
    )]
    #[case::c(
        DefaultDatasetProfile::C,
        json!({"dsorg": "PO", "alcunit": "CYL", "primary": 1, "recfm": "VB", "blksize": 32760, "lrecl": 260, "dirblk": 25})
    )]
    #[case::binary(
        DefaultDatasetProfile::Binary,
        json!({"dsorg": "PO", "alcunit": "CYL", "primary": 10, "recfm": "U", "blksize": 27998, "lrecl": 27998, "dirblk": 25})
    )]
    fn test_profile_body(#[case] profile: DefaultDatasetProfile, #[case] expected: serde_json::Value) {
        let body = serde_json::to_value(profile.options()).unwrap();
        assert_eq!(body, expected);
    }

    #[test]
    fn test_profiles_pass_validation() {
        for profile in DefaultDatasetProfile::ALL {
            assert!(profile.options().normalize().is_ok(), "{profile}");
        }
    }

    #[test]
    fn test_parse_profile() {
        assert_eq!(
            "partitioned".parse::<DefaultDatasetProfile>().unwrap(),
            DefaultDatasetProfile::Partitioned
        );
        let err = "vsam".parse::<DefaultDatasetProfile>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid type for default data set.");
    }
}
