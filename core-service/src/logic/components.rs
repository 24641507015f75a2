//! Component Inference
//!
//! Ranks the subsystems a log line talks about by keyword hits.

use serde::{Deserialize, Serialize};

/// Reported when no component keyword matches
pub const UNKNOWN_COMPONENT: &str = "unknown";

/// Declaration order doubles as the tie-break order
const COMPONENT_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "memory",
        &["cache", "memory", "ram", "buffer", "tlb", "allocation", "heap", "stack", "leak", "page"],
    ),
    (
        "storage",
        &[
            "disk", "storage", "io", "read", "write", "mount", "lustre", "filesystem", "partition",
            "sector", "block",
        ],
    ),
    (
        "network",
        &[
            "network", "connection", "packet", "socket", "link", "interface", "eth", "tcp", "udp",
            "ip", "dns", "http",
        ],
    ),
    (
        "process",
        &[
            "process", "thread", "execution", "terminated", "application", "daemon", "service",
            "job", "task", "pid", "fork",
        ],
    ),
    (
        "system",
        &[
            "system", "kernel", "panic", "crash", "boot", "shutdown", "firmware", "driver",
            "module", "interrupt", "bios", "uefi",
        ],
    ),
];

/// Component name → lowercase keyword set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentTable {
    components: Vec<(String, Vec<String>)>,
}

impl ComponentTable {
    pub fn new(components: Vec<(String, Vec<String>)>) -> Self {
        Self { components }
    }

    /// Components with at least one keyword hit, most hits first.
    /// Each keyword counts once, however often it occurs.
    pub fn identify(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();

        let mut scored: Vec<(&str, usize)> = self
            .components
            .iter()
            .map(|(name, keywords)| {
                let hits = keywords
                    .iter()
                    .filter(|k| lower.contains(k.as_str()))
                    .count();
                (name.as_str(), hits)
            })
            .filter(|(_, hits)| *hits > 0)
            .collect();

        if scored.is_empty() {
            return vec![UNKNOWN_COMPONENT.to_string()];
        }

        // sort_by is stable: ties keep declaration order
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(name, _)| name.to_string()).collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|(name, _)| name.as_str())
    }
}

impl Default for ComponentTable {
    fn default() -> Self {
        Self::new(
            COMPONENT_KEYWORDS
                .iter()
                .map(|(name, keywords)| {
                    (
                        name.to_string(),
                        keywords.iter().map(|k| k.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }
}
