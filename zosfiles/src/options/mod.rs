//! Caller-facing options and the validation rules applied to them.
//!
//! Everything in this module is pure: validation either returns a new,
//! normalized value or fails with a [`ZosFilesError`](zosfiles_shared::ZosFilesError)
//! before any request exists.

/// Declares a closed set of wire tokens as a Rust enum.
///
/// Generates `as_str`, `Display`, `Serialize` (as the wire token) and a
/// `FromStr` that maps unknown tokens through `$invalid`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident, invalid = $invalid:expr, {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
        $vis enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The token sent on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = zosfiles_shared::ZosFilesError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($wire => Ok($name::$variant),)+
                    other => Err(($invalid)(other)),
                }
            }
        }
    };
}

pub mod dataset;
pub mod profile;
pub mod transfer;
pub mod uss;
pub mod zfs;

pub use dataset::{AllocationUnit, DatasetCreationOptions, DatasetOrganization, RecordFormat};
pub use profile::DefaultDatasetProfile;
pub use transfer::{CopyDatasetRequest, CopyFileRequest, Enqueue, FileType};
pub use uss::{MountMode, MountOptions, UssEntryType};
pub use zfs::ZfsCreationOptions;
