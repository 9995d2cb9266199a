//! Dataset allocation options.

use serde::Serialize;

use zosfiles_shared::constants::limits::MAX_ALLOCATION_QUANTITY;
use zosfiles_shared::{ZosFilesError, ZosFilesResult};

wire_enum! {
    /// Space allocation unit.
    pub enum AllocationUnit, invalid = |v: &str| {
        ZosFilesError::InvalidOptionValue(format!("Invalid value for 'alcunit': {v}"))
    }, {
        Cyl => "CYL",
        Trk => "TRK",
    }
}

wire_enum! {
    /// Record format.
    pub enum RecordFormat, invalid = |v: &str| {
        ZosFilesError::InvalidOptionValue(format!("Invalid value for 'recfm': {v}"))
    }, {
        F => "F",
        Fb => "FB",
        V => "V",
        Vb => "VB",
        U => "U",
    }
}

wire_enum! {
    /// Dataset organization: partitioned or physical sequential.
    pub enum DatasetOrganization, invalid = |v: &str| {
        ZosFilesError::InvalidOptionValue(format!("Invalid value for 'dsorg': {v}"))
    }, {
        Po => "PO",
        Ps => "PS",
    }
}

/// Options for allocating a sequential or partitioned dataset.
///
/// Serializes to the JSON body z/OSMF expects on `POST ds/<name>`; unset
/// fields are omitted. Run [`normalize`](Self::normalize) before sending.
///
/// # Examples
///
/// ```
/// use zosfiles::options::{DatasetCreationOptions, DatasetOrganization, RecordFormat};
///
/// let opts = DatasetCreationOptions::new()
///     .dsorg(DatasetOrganization::Po)
///     .primary(10)
///     .dirblk(5)
///     .recfm(RecordFormat::Fb)
///     .lrecl(80)
///     .normalize()
///     .unwrap();
///
/// assert_eq!(opts.secondary, Some(1));
/// assert_eq!(opts.blksize, Some(80));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetCreationOptions {
    /// Volume serial.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volser: Option<String>,
    /// Device type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dsorg: Option<DatasetOrganization>,
    /// Allocation unit (default: TRK).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcunit: Option<AllocationUnit>,
    /// Primary space quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<u32>,
    /// Secondary space quantity (default: primary / 10).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<u32>,
    /// Directory blocks; PO only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dirblk: Option<u32>,
    /// Average block length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avgblk: Option<u32>,
    /// Record format (default: F).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recfm: Option<RecordFormat>,
    /// Block size (default: lrecl).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blksize: Option<u32>,
    /// Logical record length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lrecl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storclass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mgntclass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataclass: Option<String>,
    /// Dataset type (LIBRARY, PDS, BASIC, ...), passed through as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dsntype: Option<String>,
    /// Existing dataset whose attributes are copied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like: Option<String>,
}

impl DatasetCreationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn volser(mut self, volser: impl Into<String>) -> Self {
        self.volser = Some(volser.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn dsorg(mut self, dsorg: DatasetOrganization) -> Self {
        self.dsorg = Some(dsorg);
        self
    }

    pub fn alcunit(mut self, alcunit: AllocationUnit) -> Self {
        self.alcunit = Some(alcunit);
        self
    }

    pub fn primary(mut self, primary: u32) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn secondary(mut self, secondary: u32) -> Self {
        self.secondary = Some(secondary);
        self
    }

    pub fn dirblk(mut self, dirblk: u32) -> Self {
        self.dirblk = Some(dirblk);
        self
    }

    pub fn avgblk(mut self, avgblk: u32) -> Self {
        self.avgblk = Some(avgblk);
        self
    }

    pub fn recfm(mut self, recfm: RecordFormat) -> Self {
        self.recfm = Some(recfm);
        self
    }

    pub fn blksize(mut self, blksize: u32) -> Self {
        self.blksize = Some(blksize);
        self
    }

    pub fn lrecl(mut self, lrecl: u32) -> Self {
        self.lrecl = Some(lrecl);
        self
    }

    pub fn storclass(mut self, storclass: impl Into<String>) -> Self {
        self.storclass = Some(storclass.into());
        self
    }

    pub fn mgntclass(mut self, mgntclass: impl Into<String>) -> Self {
        self.mgntclass = Some(mgntclass.into());
        self
    }

    pub fn dataclass(mut self, dataclass: impl Into<String>) -> Self {
        self.dataclass = Some(dataclass.into());
        self
    }

    pub fn dsntype(mut self, dsntype: impl Into<String>) -> Self {
        self.dsntype = Some(dsntype.into());
        self
    }

    pub fn like(mut self, like: impl Into<String>) -> Self {
        self.like = Some(like.into());
        self
    }

    /// Validate and fill defaults, returning a new value.
    ///
    /// Options are processed in a fixed order (volser, unit, dsorg, alcunit,
    /// primary, secondary, dirblk, avgblk, recfm, blksize, lrecl, storclass,
    /// mgntclass, dataclass, dsntype, like); the `secondary` default reads
    /// `primary`, so the order matters.
    ///
    /// # Errors
    ///
    /// - [`MissingRequiredOption`](ZosFilesError::MissingRequiredOption) when
    ///   `like` is unset and `primary` or `lrecl` is missing.
    /// - [`InvalidOptionValue`](ZosFilesError::InvalidOptionValue) when a
    ///   quantity exceeds 16,777,215 or `dirblk` contradicts `dsorg`.
    pub fn normalize(&self) -> ZosFilesResult<DatasetCreationOptions> {
        if self.like.is_none() {
            if self.primary.is_none() {
                return Err(ZosFilesError::MissingRequiredOption("primary"));
            }
            if self.lrecl.is_none() {
                return Err(ZosFilesError::MissingRequiredOption("lrecl"));
            }
        }

        let mut normalized = self.clone();

        normalized.alcunit.get_or_insert(AllocationUnit::Trk);

        if let Some(primary) = normalized.primary {
            check_quantity("primary", primary)?;
            normalized.secondary.get_or_insert(primary / 10);
        }
        if let Some(secondary) = normalized.secondary {
            check_quantity("secondary", secondary)?;
        }

        if let Some(dirblk) = normalized.dirblk {
            match normalized.dsorg {
                Some(DatasetOrganization::Ps) if dirblk != 0 => {
                    return Err(ZosFilesError::InvalidOptionValue(format!(
                        "'dirblk' must be 0 for a sequential dataset, got {dirblk}"
                    )));
                }
                Some(DatasetOrganization::Po) if dirblk == 0 => {
                    return Err(ZosFilesError::InvalidOptionValue(
                        "'dirblk' must not be 0 for a partitioned dataset".to_string(),
                    ));
                }
                _ => {}
            }
        }

        normalized.recfm.get_or_insert(RecordFormat::F);

        if normalized.blksize.is_none() {
            normalized.blksize = normalized.lrecl;
        }

        Ok(normalized)
    }
}

fn check_quantity(name: &str, value: u32) -> ZosFilesResult<()> {
    if value > MAX_ALLOCATION_QUANTITY {
        return Err(ZosFilesError::InvalidOptionValue(format!(
            "'{name}' of {value} exceeds the maximum allocation quantity of {MAX_ALLOCATION_QUANTITY}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> DatasetCreationOptions {
        DatasetCreationOptions::new().primary(100).lrecl(80)
    }

    #[test]
    fn test_missing_primary_without_like() {
        let err = DatasetCreationOptions::new().lrecl(80).normalize().unwrap_err();
        assert!(matches!(err, ZosFilesError::MissingRequiredOption("primary")));
    }

    #[test]
    fn test_missing_lrecl_without_like() {
        let err = DatasetCreationOptions::new().primary(10).normalize().unwrap_err();
        assert!(matches!(err, ZosFilesError::MissingRequiredOption("lrecl")));
    }

    #[test]
    fn test_like_lifts_required_options() {
        let opts = DatasetCreationOptions::new()
            .like("IBMUSER.TEMPLATE")
            .normalize()
            .unwrap();
        assert_eq!(opts.like.as_deref(), Some("IBMUSER.TEMPLATE"));
        assert_eq!(opts.primary, None);
        assert_eq!(opts.secondary, None);
        assert_eq!(opts.blksize, None);
    }

    #[test]
    fn test_defaults_filled() {
        let opts = minimal().normalize().unwrap();
        assert_eq!(opts.alcunit, Some(AllocationUnit::Trk));
        assert_eq!(opts.recfm, Some(RecordFormat::F));
        assert_eq!(opts.blksize, Some(80));
    }

    #[test]
    fn test_explicit_values_kept() {
        let opts = minimal()
            .alcunit(AllocationUnit::Cyl)
            .recfm(RecordFormat::Vb)
            .blksize(27920)
            .secondary(3)
            .normalize()
            .unwrap();
        assert_eq!(opts.alcunit, Some(AllocationUnit::Cyl));
        assert_eq!(opts.recfm, Some(RecordFormat::Vb));
        assert_eq!(opts.blksize, Some(27920));
        assert_eq!(opts.secondary, Some(3));
    }

    #[test]
    fn test_secondary_derived_by_truncation() {
        let opts = minimal().normalize().unwrap();
        assert_eq!(opts.secondary, Some(10));

        let opts = DatasetCreationOptions::new()
            .primary(19)
            .lrecl(80)
            .normalize()
            .unwrap();
        assert_eq!(opts.secondary, Some(1));
    }

    #[test]
    fn test_primary_over_limit() {
        let err = DatasetCreationOptions::new()
            .primary(MAX_ALLOCATION_QUANTITY + 1)
            .lrecl(80)
            .normalize()
            .unwrap_err();
        assert!(matches!(err, ZosFilesError::InvalidOptionValue(_)));

        let err = DatasetCreationOptions::new()
            .primary(MAX_ALLOCATION_QUANTITY + 1)
            .secondary(1)
            .lrecl(80)
            .normalize()
            .unwrap_err();
        assert!(matches!(err, ZosFilesError::InvalidOptionValue(_)));
    }

    #[test]
    fn test_primary_at_limit() {
        let opts = DatasetCreationOptions::new()
            .primary(MAX_ALLOCATION_QUANTITY)
            .lrecl(80)
            .normalize()
            .unwrap();
        assert_eq!(opts.secondary, Some(MAX_ALLOCATION_QUANTITY / 10));
    }

    #[test]
    fn test_secondary_over_limit() {
        let err = minimal()
            .secondary(MAX_ALLOCATION_QUANTITY + 1)
            .normalize()
            .unwrap_err();
        assert!(matches!(err, ZosFilesError::InvalidOptionValue(_)));
    }

    #[test]
    fn test_dirblk_consistency() {
        let ps_nonzero = minimal().dsorg(DatasetOrganization::Ps).dirblk(5);
        assert!(ps_nonzero.normalize().is_err());

        let po_zero = minimal().dsorg(DatasetOrganization::Po).dirblk(0);
        assert!(po_zero.normalize().is_err());

        let ps_zero = minimal().dsorg(DatasetOrganization::Ps).dirblk(0);
        assert!(ps_zero.normalize().is_ok());

        let po_nonzero = minimal().dsorg(DatasetOrganization::Po).dirblk(5);
        assert!(po_nonzero.normalize().is_ok());

        // No dsorg: nothing to contradict.
        assert!(minimal().dirblk(0).normalize().is_ok());
    }

    #[test]
    fn test_input_left_untouched() {
        let input = minimal();
        let before = input.clone();
        let _ = input.normalize().unwrap();
        assert_eq!(input, before);
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("CYL".parse::<AllocationUnit>().unwrap(), AllocationUnit::Cyl);
        assert_eq!("FB".parse::<RecordFormat>().unwrap(), RecordFormat::Fb);
        assert_eq!("PS".parse::<DatasetOrganization>().unwrap(), DatasetOrganization::Ps);

        assert!(matches!(
            "BLK".parse::<AllocationUnit>(),
            Err(ZosFilesError::InvalidOptionValue(_))
        ));
        assert!(matches!(
            "VBA".parse::<RecordFormat>(),
            Err(ZosFilesError::InvalidOptionValue(_))
        ));
        assert!(matches!(
            "VS".parse::<DatasetOrganization>(),
            Err(ZosFilesError::InvalidOptionValue(_))
        ));
    }

    #[test]
    fn test_serialize_omits_unset() {
        let body = serde_json::to_value(minimal().normalize().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "alcunit": "TRK",
                "primary": 100,
                "secondary": 10,
                "recfm": "F",
                "blksize": 80,
                "lrecl": 80
            })
        );
    }
}
