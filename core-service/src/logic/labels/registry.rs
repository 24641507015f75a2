//! Label & Severity Registry
//!
//! Built once at startup and never mutated. A lookup miss on the default
//! table is a programming error, surfaced as `CoreError::UnknownClass`.

use super::types::{ClassLabel, NORMAL_CLASS_NAME};
use crate::error::{CoreError, CoreResult};

/// Default kernel label table: (name, severity), indexed by class id
const KERNEL_LABELS: [(&str, u8); 11] = [
    (NORMAL_CLASS_NAME, 0),
    ("KERNELRND", 3),
    ("KERNDTLB", 4),
    ("KERNUTILS", 2),
    ("KERNSQLA", 2),
    ("KERNSTOR", 3),
    ("KERNSTACK", 4),
    ("KERNPANIC", 5),
    ("KERNMEM", 4),
    ("KERNIO", 3),
    ("KERNINFO", 1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRegistry {
    labels: Vec<ClassLabel>,
}

impl LabelRegistry {
    /// Build a registry from labels whose ids match their position
    pub fn new(labels: Vec<ClassLabel>) -> CoreResult<Self> {
        if let Some((pos, label)) = labels.iter().enumerate().find(|(pos, l)| l.id != *pos) {
            return Err(CoreError::UnknownClass(format!(
                "label '{}' has id {} at position {}",
                label.name, label.id, pos
            )));
        }
        Ok(Self { labels })
    }

    /// The fixed 11-class kernel table
    pub fn kernel() -> Self {
        let labels = KERNEL_LABELS
            .iter()
            .enumerate()
            .map(|(id, (name, severity))| ClassLabel::new(id, *name, *severity))
            .collect();
        Self { labels }
    }

    pub fn class_by_id(&self, id: usize) -> CoreResult<&ClassLabel> {
        self.labels
            .get(id)
            .ok_or_else(|| CoreError::UnknownClass(format!("id {}", id)))
    }

    pub fn class_by_name(&self, name: &str) -> CoreResult<&ClassLabel> {
        self.labels
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| CoreError::UnknownClass(name.to_string()))
    }

    pub fn severity_of(&self, name: &str) -> CoreResult<u8> {
        self.class_by_name(name).map(|l| l.severity)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in id order
    pub fn iter(&self) -> impl Iterator<Item = &ClassLabel> {
        self.labels.iter()
    }
}

impl Default for LabelRegistry {
    fn default() -> Self {
        Self::kernel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::labels::{CLASS_KERNDTLB, CLASS_KERNPANIC, CLASS_NORMAL};

    #[test]
    fn test_every_class_has_bounded_severity() {
        let registry = LabelRegistry::kernel();
        assert_eq!(registry.len(), 11);

        for id in 0..11 {
            let label = registry.class_by_id(id).unwrap();
            let severity = registry.severity_of(&label.name).unwrap();
            assert!(severity <= 5, "{} severity out of range", label.name);
            assert_eq!(severity, label.severity);
        }
    }

    #[test]
    fn test_normal_class_is_zero() {
        let registry = LabelRegistry::kernel();
        let normal = registry.class_by_id(CLASS_NORMAL).unwrap();
        assert_eq!(normal.name, "-");
        assert_eq!(normal.severity, 0);
        assert!(normal.is_normal());

        // Only class 0 is normal-severity
        assert!(registry.iter().skip(1).all(|l| l.severity > 0));
    }

    #[test]
    fn test_known_names() {
        let registry = LabelRegistry::kernel();
        assert_eq!(registry.class_by_id(CLASS_KERNPANIC).unwrap().name, "KERNPANIC");
        assert_eq!(registry.severity_of("KERNPANIC").unwrap(), 5);
        assert_eq!(registry.class_by_name("KERNDTLB").unwrap().id, CLASS_KERNDTLB);
        assert_eq!(registry.severity_of("KERNINFO").unwrap(), 1);
    }

    #[test]
    fn test_unknown_lookups_fail() {
        let registry = LabelRegistry::kernel();
        assert!(matches!(registry.class_by_id(11), Err(CoreError::UnknownClass(_))));
        assert!(matches!(registry.severity_of("KERNFOO"), Err(CoreError::UnknownClass(_))));
    }

    #[test]
    fn test_new_rejects_misplaced_ids() {
        let labels = vec![ClassLabel::new(0, "-", 0), ClassLabel::new(5, "X", 1)];
        assert!(LabelRegistry::new(labels).is_err());

        let labels = vec![ClassLabel::new(0, "-", 0), ClassLabel::new(1, "X", 1)];
        assert_eq!(LabelRegistry::new(labels).unwrap().len(), 2);
    }
}
