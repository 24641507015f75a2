//! Narrative templates: root cause and recommendation text per class

use crate::logic::components::UNKNOWN_COMPONENT;
use crate::logic::labels::NORMAL_CLASS_NAME;

pub const NO_ANOMALY_ROOT_CAUSE: &str = "No anomaly detected.";
pub const NO_ACTION_RECOMMENDATION: &str = "No action needed - log indicates normal operation.";

/// Root cause for `class_name`, quoting the key indicators where the template has them
pub fn root_cause(class_name: &str, key_indicators: &[String]) -> String {
    if class_name == NORMAL_CLASS_NAME {
        return NO_ANOMALY_ROOT_CAUSE.to_string();
    }

    let indicators = key_indicators.join(", ");
    let cause = match class_name {
        "KERNELRND" => "Random kernel errors detected. Often caused by hardware or driver issues.",
        "KERNDTLB" => {
            // The only template without indicators
            return "Memory addressing issue. The Translation Lookaside Buffer (TLB) is experiencing errors, indicating potential memory management problems or hardware issues with the memory management unit.".to_string();
        }
        "KERNUTILS" => "Kernel utility functionality issue. Problems with kernel utilities that may affect system performance.",
        "KERNSQLA" => "SQLite/database access issues in the kernel. May affect data storage and retrieval operations.",
        "KERNSTOR" => "Storage subsystem issue. Problems with disk I/O, filesystem, or storage drivers.",
        "KERNSTACK" => "Kernel stack corruption or overflow. Often indicates serious software bugs or memory corruption issues.",
        "KERNPANIC" => "Critical kernel error causing system instability. The system may crash or become unresponsive.",
        "KERNMEM" => "Memory management issue in the kernel. May cause memory leaks, fragmentation, or corruption.",
        "KERNIO" => "Input/Output subsystem error. Issues with data transfer between CPU and peripheral devices.",
        "KERNINFO" => "Kernel informational message. Not necessarily an error, but may indicate notable system events.",
        other => return format!("Unknown anomaly type: {}", other),
    };

    format!("{} Key indicators: {}", cause, indicators)
}

/// Component-driven advice plus a class-specific suffix for the serious classes
pub fn recommendation(class_name: &str, affected_components: &[String]) -> String {
    if class_name == NORMAL_CLASS_NAME {
        return NO_ACTION_RECOMMENDATION.to_string();
    }

    let primary = affected_components
        .first()
        .map(String::as_str)
        .unwrap_or(UNKNOWN_COMPONENT);

    let mut advice = component_advice(primary).to_string();
    if let Some(suffix) = class_suffix(class_name) {
        advice.push_str(suffix);
    }
    advice
}

fn component_advice(component: &str) -> &'static str {
    match component {
        "memory" => "Check system memory usage and hardware health. Consider memory diagnostics.",
        "storage" => "Verify disk health and file system integrity. Check storage drivers and connections.",
        "network" => "Investigate network connectivity and interface configuration. Monitor bandwidth and packet loss.",
        "process" => "Review application logs for more details. Check for resource constraints or application bugs.",
        "system" => "Consider kernel updates or patches. Review system logs for context around this event.",
        _ => "Monitor system performance and check related logs for more context.",
    }
}

fn class_suffix(class_name: &str) -> Option<&'static str> {
    match class_name {
        "KERNPANIC" => Some(" CRITICAL: This is a serious issue that requires immediate attention! Backup important data."),
        "KERNSTACK" => Some(" Consider system memory diagnostics and kernel updates."),
        "KERNSTOR" => Some(" Check disk health with SMART diagnostics and file system consistency."),
        _ => None,
    }
}
