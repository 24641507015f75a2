//! Labels Module
//!
//! Fixed class id → name → severity table shared by every other component.
//!
//! ## Structure
//! - `types`: `ClassLabel` and the well-known class ids
//! - `registry`: `LabelRegistry` lookups

pub mod types;
pub mod registry;

pub use types::{
    ClassLabel,
    CLASS_NORMAL,
    CLASS_KERNELRND,
    CLASS_KERNDTLB,
    CLASS_KERNUTILS,
    CLASS_KERNSQLA,
    CLASS_KERNSTOR,
    CLASS_KERNSTACK,
    CLASS_KERNPANIC,
    CLASS_KERNMEM,
    CLASS_KERNIO,
    CLASS_KERNINFO,
    NORMAL_CLASS_NAME,
};

pub use registry::LabelRegistry;
