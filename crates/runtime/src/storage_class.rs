//! S3 storage class selected through a pair of switch parameters

pub const STANDARD_STORAGE_PARAMETER: &str = "StandardStorage";
pub const REDUCED_REDUNDANCY_STORAGE_PARAMETER: &str = "ReducedRedundancyStorage";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum S3StorageClass {
    Standard,
    ReducedRedundancy,
}

impl S3StorageClass {
    /// Member name on the SDK's `S3StorageClass` constant class
    pub fn sdk_member(self) -> &'static str {
        match self {
            S3StorageClass::Standard => "Standard",
            S3StorageClass::ReducedRedundancy => "ReducedRedundancy",
        }
    }
}

/// Presence of the two storage-class switches on one invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageClassSwitches {
    pub standard_storage: bool,
    pub reduced_redundancy_storage: bool,
}

/// Standard is checked first; with neither switch the request keeps the
/// service default.
pub fn resolve_storage_class(switches: StorageClassSwitches) -> Option<S3StorageClass> {
    if switches.standard_storage {
        Some(S3StorageClass::Standard)
    } else if switches.reduced_redundancy_storage {
        Some(S3StorageClass::ReducedRedundancy)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_wins_tie() {
        let both = StorageClassSwitches {
            standard_storage: true,
            reduced_redundancy_storage: true,
        };
        assert_eq!(resolve_storage_class(both), Some(S3StorageClass::Standard));
    }

    #[test]
    fn test_single_switches() {
        let reduced = StorageClassSwitches {
            reduced_redundancy_storage: true,
            ..Default::default()
        };
        assert_eq!(
            resolve_storage_class(reduced),
            Some(S3StorageClass::ReducedRedundancy)
        );
        assert_eq!(
            resolve_storage_class(reduced).map(S3StorageClass::sdk_member),
            Some("ReducedRedundancy")
        );
    }

    #[test]
    fn test_no_switch_leaves_unset() {
        assert_eq!(resolve_storage_class(StorageClassSwitches::default()), None);
    }
}
