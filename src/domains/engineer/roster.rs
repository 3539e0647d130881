use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineerStatus {
    Active,
    Available,
    Busy,
    Inactive,
    OnLeave,
}

impl EngineerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineerStatus::Active => "active",
            EngineerStatus::Available => "available",
            EngineerStatus::Busy => "busy",
            EngineerStatus::Inactive => "inactive",
            EngineerStatus::OnLeave => "on_leave",
        }
    }
}

impl std::fmt::Display for EngineerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field technician. Roster administration happens outside the dispatch
/// core; these records are read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engineer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department_id: Option<String>,
    pub skills: Vec<String>,
    pub status: EngineerStatus,
    pub total_projects: u32,
    pub completed_projects: u32,
}
