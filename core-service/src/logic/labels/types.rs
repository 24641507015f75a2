//! Label Types
//!
//! Data structures only - lookups live in `registry`.

use serde::{Deserialize, Serialize};

// ============================================================================
// CLASS IDS (output index of the classifier)
// ============================================================================

pub const CLASS_NORMAL: usize = 0;
pub const CLASS_KERNELRND: usize = 1;
pub const CLASS_KERNDTLB: usize = 2;
pub const CLASS_KERNUTILS: usize = 3;
pub const CLASS_KERNSQLA: usize = 4;
pub const CLASS_KERNSTOR: usize = 5;
pub const CLASS_KERNSTACK: usize = 6;
pub const CLASS_KERNPANIC: usize = 7;
pub const CLASS_KERNMEM: usize = 8;
pub const CLASS_KERNIO: usize = 9;
pub const CLASS_KERNINFO: usize = 10;

/// Name of the only non-anomalous class
pub const NORMAL_CLASS_NAME: &str = "-";

// ============================================================================
// CLASS LABEL
// ============================================================================

/// One entry of the label table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassLabel {
    /// Classifier output index
    pub id: usize,
    /// Display name ("-" for normal, "KERN*" for anomalies)
    pub name: String,
    /// 0 (normal) to 5 (critical)
    pub severity: u8,
}

impl ClassLabel {
    pub fn new(id: usize, name: impl Into<String>, severity: u8) -> Self {
        Self {
            id,
            name: name.into(),
            severity: severity.min(5),
        }
    }

    pub fn is_normal(&self) -> bool {
        self.id == CLASS_NORMAL
    }
}

impl std::fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
