//! Load-based assignee suggestions for new work orders.

use chrono::{DateTime, Utc};

use super::roster::{Engineer, EngineerStatus};

/// Upper bound on suggestions returned by [`recommend_engineers`].
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Ranks active engineers by ascending assigned-project count and returns at
/// most [`MAX_RECOMMENDATIONS`] of them. Ties keep roster order (stable sort).
///
/// `reference` is the candidate start instant the caller is planning around.
/// It is accepted for call-site symmetry but deliberately not checked against
/// the engineers' existing bookings: eligibility is status-only, a known
/// simplification of "available at that time" carried over from the board's
/// behavior. Callers wanting hard guarantees still go through the conflict
/// guard at commit time.
pub fn recommend_engineers(reference: DateTime<Utc>, engineers: &[Engineer]) -> Vec<&Engineer> {
    let mut eligible: Vec<&Engineer> = engineers
        .iter()
        .filter(|engineer| engineer.status == EngineerStatus::Active)
        .collect();
    eligible.sort_by_key(|engineer| engineer.total_projects);
    eligible.truncate(MAX_RECOMMENDATIONS);

    tracing::debug!(
        reference = %reference,
        candidates = eligible.len(),
        "ranked engineers by current load"
    );
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engineer(id: &str, status: EngineerStatus, total_projects: u32) -> Engineer {
        Engineer {
            id: id.to_string(),
            name: format!("Engineer {id}"),
            email: format!("{id}@example.com"),
            phone: "555-0100".to_string(),
            department_id: None,
            skills: vec!["hvac".to_string()],
            status,
            total_projects,
            completed_projects: 0,
        }
    }

    #[test]
    fn ranks_by_ascending_load_and_caps_at_three() {
        let roster = vec![
            engineer("e1", EngineerStatus::Active, 7),
            engineer("e2", EngineerStatus::Active, 2),
            engineer("e3", EngineerStatus::Active, 5),
            engineer("e4", EngineerStatus::Active, 1),
        ];
        let picks = recommend_engineers(Utc::now(), &roster);
        let ids: Vec<&str> = picks.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e4", "e2", "e3"]);
    }

    #[test]
    fn only_active_engineers_are_eligible() {
        let roster = vec![
            engineer("e1", EngineerStatus::Busy, 0),
            engineer("e2", EngineerStatus::Available, 0),
            engineer("e3", EngineerStatus::OnLeave, 0),
            engineer("e4", EngineerStatus::Inactive, 0),
            engineer("e5", EngineerStatus::Active, 9),
        ];
        let picks = recommend_engineers(Utc::now(), &roster);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].id, "e5");
    }

    #[test]
    fn ties_preserve_roster_order() {
        let roster = vec![
            engineer("e1", EngineerStatus::Active, 3),
            engineer("e2", EngineerStatus::Active, 3),
            engineer("e3", EngineerStatus::Active, 3),
        ];
        let picks = recommend_engineers(Utc::now(), &roster);
        let ids: Vec<&str> = picks.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2", "e3"]);
    }

    #[test]
    fn empty_roster_yields_no_recommendations() {
        assert!(recommend_engineers(Utc::now(), &[]).is_empty());
    }
}
