//! Status constants reported by the warehouse backend
//!
//! Statuses travel as upper-case string tags. Each entity type has a fixed
//! enumeration; the workflow tables in `workflows/` must cover every value
//! listed here.

use serde::{Deserialize, Serialize};

pub const ARRIVED: &str = "ARRIVED";
pub const PENDING: &str = "PENDING";
pub const APPROVED: &str = "APPROVED";
pub const REJECTED: &str = "REJECTED";
pub const CANCELLED: &str = "CANCELLED";
/// Spelling used by the pending-variant import request pages.
pub const CANCELED: &str = "CANCELED";
pub const INSPECTING: &str = "INSPECTING";
pub const INSPECTED: &str = "INSPECTED";
pub const IMPORTING: &str = "IMPORTING";
pub const IMPORTED: &str = "IMPORTED";
pub const EXPORTING: &str = "EXPORTING";
pub const EXPORTED: &str = "EXPORTED";
pub const PRODUCTION_APPROVED: &str = "PRODUCTION_APPROVED";
pub const PRODUCTION_REJECTED: &str = "PRODUCTION_REJECTED";

/// Every status an import request can carry, across both page variants.
pub const IMPORT_REQUEST_STATUSES: &[&str] = &[
    ARRIVED, PENDING, CANCELLED, CANCELED, REJECTED, APPROVED, INSPECTING, INSPECTED, IMPORTING,
    IMPORTED,
];

pub const EXPORT_REQUEST_STATUSES: &[&str] = &[
    PENDING,
    REJECTED,
    CANCELLED,
    APPROVED,
    EXPORTING,
    EXPORTED,
    PRODUCTION_APPROVED,
    PRODUCTION_REJECTED,
];

pub const INSPECTION_REQUEST_STATUSES: &[&str] = &[PENDING, INSPECTING, CANCELLED, INSPECTED];

/// Statuses that take an entity out of the normal stage progression.
pub const TERMINAL_EXCEPTION_STATUSES: &[&str] = &[CANCELLED, CANCELED, REJECTED, PRODUCTION_REJECTED];

/// Kind of request whose lifecycle a workflow describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    ImportRequest,
    ExportRequest,
    InspectionRequest,
}

impl EntityType {
    /// All entity types, in display order
    pub fn all() -> &'static [EntityType] {
        &[
            EntityType::ImportRequest,
            EntityType::ExportRequest,
            EntityType::InspectionRequest,
        ]
    }

    /// The full status enumeration for this entity type
    pub fn statuses(&self) -> &'static [&'static str] {
        match self {
            EntityType::ImportRequest => IMPORT_REQUEST_STATUSES,
            EntityType::ExportRequest => EXPORT_REQUEST_STATUSES,
            EntityType::InspectionRequest => INSPECTION_REQUEST_STATUSES,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::ImportRequest => "import-request",
            EntityType::ExportRequest => "export-request",
            EntityType::InspectionRequest => "inspection-request",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "import-request" | "import" => Ok(EntityType::ImportRequest),
            "export-request" | "export" => Ok(EntityType::ExportRequest),
            "inspection-request" | "inspection" => Ok(EntityType::InspectionRequest),
            _ => Err(format!("Unknown entity type: {}", s)),
        }
    }
}

/// Check whether a status tag is one of the terminal-exception statuses
pub fn is_terminal_exception(status: &str) -> bool {
    TERMINAL_EXCEPTION_STATUSES.contains(&status)
}
