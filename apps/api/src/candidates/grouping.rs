//! Candidate Aggregator: folds application rows into one entry per contact number.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::application::ApplicationRow;
use crate::models::matching::MatchResultRow;

/// Shown when a value is absent.
pub const PLACEHOLDER: &str = "\u{2014}";
/// Shown when a previous application has no screening response.
pub const NO_RESPONSE: &str = "Null";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedCandidate {
    pub contact: String,
    pub name: String,
    pub location: String,
    /// Date of the most recent application.
    pub date: NaiveDate,
    /// Every role code applied to, most recent first.
    pub role_codes: Vec<String>,
    /// Date of the second most recent application.
    pub last_applied: Option<NaiveDate>,
    /// `"<role code>: <score>, <screening response>"` per role among previous applications.
    pub last_applied_roles: Vec<String>,
    /// Always 1. Kept for consumers of the console's column; see `application_count`.
    pub times_applied: u32,
    pub application_count: usize,
    /// Members, most recent first.
    pub applications: Vec<ApplicationRow>,
    #[serde(skip)]
    latest_at: DateTime<Utc>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Match scores keyed by (application ID, role code). The newest result per key wins.
fn score_index(results: &[MatchResultRow]) -> HashMap<(&str, &str), Option<&str>> {
    let mut newest: HashMap<(&str, &str), &MatchResultRow> = HashMap::new();
    for r in results {
        let (Some(app_id), Some(role)) = (r.application_id.as_deref(), r.role_code.as_deref())
        else {
            continue;
        };
        newest
            .entry((app_id, role))
            .and_modify(|kept| {
                if r.created_at > kept.created_at {
                    *kept = r;
                }
            })
            .or_insert(r);
    }
    newest
        .into_iter()
        .map(|(key, r)| (key, r.score.as_deref()))
        .collect()
}

fn distinct_role_codes<'a>(apps: impl Iterator<Item = &'a ApplicationRow>) -> Vec<&'a str> {
    let mut codes: Vec<&str> = Vec::new();
    for code in apps.filter_map(|a| non_empty(a.role_code.as_deref())) {
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

fn history_line(
    role_code: &str,
    previous: &[ApplicationRow],
    scores: &HashMap<(&str, &str), Option<&str>>,
) -> String {
    // Only the most recent previous application for the role is consulted.
    let app = previous
        .iter()
        .find(|a| non_empty(a.role_code.as_deref()) == Some(role_code));

    let score = app
        .and_then(|a| a.application_id.as_deref())
        .and_then(|id| scores.get(&(id, role_code)).copied().flatten())
        .and_then(|s| non_empty(Some(s)))
        .unwrap_or(PLACEHOLDER);
    let response = app
        .and_then(|a| non_empty(a.screening_response.as_deref()))
        .unwrap_or(NO_RESPONSE);

    format!("{role_code}: {score}, {response}")
}

fn build_group(
    contact: String,
    mut apps: Vec<ApplicationRow>,
    scores: &HashMap<(&str, &str), Option<&str>>,
) -> Option<GroupedCandidate> {
    apps.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let (latest, previous) = apps.split_first()?;

    let role_codes = distinct_role_codes(apps.iter())
        .into_iter()
        .map(str::to_string)
        .collect();
    let last_applied_roles = distinct_role_codes(previous.iter())
        .into_iter()
        .map(|code| history_line(code, previous, scores))
        .collect();

    Some(GroupedCandidate {
        contact,
        name: non_empty(latest.candidate_name.as_deref())
            .unwrap_or(PLACEHOLDER)
            .to_string(),
        location: non_empty(latest.current_location.as_deref())
            .unwrap_or(PLACEHOLDER)
            .to_string(),
        date: latest.created_at.date_naive(),
        role_codes,
        last_applied: previous.first().map(|a| a.created_at.date_naive()),
        last_applied_roles,
        times_applied: 1,
        application_count: apps.len(),
        latest_at: latest.created_at,
        applications: apps,
    })
}

/// Groups applications by trimmed contact number, newest group first.
/// Applications without a contact number belong to no group.
pub fn group_by_contact(
    applications: &[ApplicationRow],
    match_results: &[MatchResultRow],
) -> Vec<GroupedCandidate> {
    let scores = score_index(match_results);

    let mut order: Vec<String> = Vec::new();
    let mut partitions: HashMap<String, Vec<ApplicationRow>> = HashMap::new();
    for app in applications {
        let Some(contact) = non_empty(app.contact_number.as_deref()) else {
            continue;
        };
        partitions
            .entry(contact.to_string())
            .or_insert_with(|| {
                order.push(contact.to_string());
                Vec::new()
            })
            .push(app.clone());
    }

    let mut groups: Vec<GroupedCandidate> = order
        .into_iter()
        .filter_map(|contact| {
            let apps = partitions.remove(&contact)?;
            build_group(contact, apps, &scores)
        })
        .collect();
    groups.sort_by(|a, b| b.latest_at.cmp(&a.latest_at));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn app(id: i64, contact: Option<&str>, role: Option<&str>, created_at: DateTime<Utc>) -> ApplicationRow {
        ApplicationRow {
            id,
            created_at,
            application_id: Some(format!("APP_{id}")),
            role_code: role.map(String::from),
            candidate_name: Some(format!("Candidate {id}")),
            email: None,
            contact_number: contact.map(String::from),
            experience_years: None,
            relevant_experience_years: None,
            notice_period: None,
            current_ctc: None,
            expected_ctc: None,
            current_location: Some("Pune".into()),
            resume_url: None,
            job_applied: None,
            skills: None,
            documents: None,
            jd_mapping: "NOT STARTED".into(),
            screening_response: None,
        }
    }

    fn score(app_id: &str, role: &str, value: &str) -> MatchResultRow {
        scored_at(app_id, role, value, at(1, 0))
    }

    fn scored_at(app_id: &str, role: &str, value: &str, created_at: DateTime<Utc>) -> MatchResultRow {
        MatchResultRow {
            id: Uuid::new_v4(),
            created_at,
            application_id: Some(app_id.into()),
            role_code: Some(role.into()),
            score: Some(value.into()),
            missing_skills: None,
            extracted_skills: None,
            jd_summary: None,
            resume_summary: None,
        }
    }

    #[test]
    fn test_two_applications_fold_into_one_candidate() {
        let apps = vec![
            app(1, Some("111"), Some("A"), at(1, 9)),
            app(2, Some("111"), Some("B"), at(5, 9)),
        ];
        let groups = group_by_contact(&apps, &[]);

        assert_eq!(groups.len(), 1);
        let g = &groups[0];
        assert_eq!(g.contact, "111");
        assert_eq!(g.name, "Candidate 2");
        assert_eq!(g.date, at(5, 9).date_naive());
        assert_eq!(g.role_codes, vec!["B", "A"]);
        assert_eq!(g.last_applied, Some(at(1, 9).date_naive()));
        assert_eq!(g.last_applied_roles, vec!["A: \u{2014}, Null"]);
        assert_eq!(g.times_applied, 1);
        assert_eq!(g.application_count, 2);
    }

    #[test]
    fn test_history_uses_score_and_response_of_latest_previous_application() {
        let mut older = app(1, Some("111"), Some("A"), at(1, 9));
        older.screening_response = Some("No answer".into());
        let mut newer = app(2, Some("111"), Some("A"), at(2, 9));
        newer.screening_response = Some("Interested".into());
        let latest = app(3, Some("111"), Some("B"), at(3, 9));

        let groups = group_by_contact(
            &[older, newer, latest],
            &[score("APP_1", "A", "40"), score("APP_2", "A", "82")],
        );
        assert_eq!(groups[0].last_applied_roles, vec!["A: 82, Interested"]);
        assert_eq!(groups[0].role_codes, vec!["B", "A"]);
    }

    #[test]
    fn test_rescored_application_shows_newest_score() {
        let older = app(1, Some("111"), Some("A"), at(1, 9));
        let latest = app(2, Some("111"), Some("B"), at(3, 9));
        let stale = scored_at("APP_1", "A", "40", at(1, 10));
        let fresh = scored_at("APP_1", "A", "82", at(11, 10));

        for results in [vec![fresh.clone(), stale.clone()], vec![stale, fresh]] {
            let groups = group_by_contact(&[older.clone(), latest.clone()], &results);
            assert_eq!(groups[0].last_applied_roles, vec!["A: 82, Null"]);
        }
    }

    #[test]
    fn test_blank_contacts_are_not_grouped() {
        let apps = vec![
            app(1, None, Some("A"), at(1, 9)),
            app(2, Some("   "), Some("A"), at(2, 9)),
            app(3, Some(" 222 "), Some("A"), at(3, 9)),
        ];
        let groups = group_by_contact(&apps, &[]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].contact, "222");
        assert_eq!(groups[0].last_applied, None);
        assert!(groups[0].last_applied_roles.is_empty());
    }

    #[test]
    fn test_groups_are_ordered_by_latest_application() {
        let apps = vec![
            app(1, Some("111"), Some("A"), at(4, 9)),
            app(2, Some("222"), Some("A"), at(1, 9)),
            app(3, Some("222"), Some("B"), at(6, 9)),
            app(4, Some("333"), Some("C"), at(5, 9)),
        ];
        let contacts: Vec<String> = group_by_contact(&apps, &[])
            .into_iter()
            .map(|g| g.contact)
            .collect();
        assert_eq!(contacts, vec!["222", "333", "111"]);
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let apps = vec![
            app(1, Some("111"), Some("A"), at(1, 9)),
            app(2, Some("222"), Some("A"), at(1, 9)),
            app(3, Some("111"), Some("B"), at(1, 9)),
            app(4, Some("333"), None, at(2, 9)),
        ];
        let scores = vec![score("APP_1", "A", "70")];
        assert_eq!(group_by_contact(&apps, &scores), group_by_contact(&apps, &scores));
    }

    #[test]
    fn test_missing_identity_fields_use_placeholder() {
        let mut row = app(1, Some("111"), None, at(1, 9));
        row.candidate_name = Some(" ".into());
        row.current_location = None;
        let groups = group_by_contact(&[row], &[]);
        assert_eq!(groups[0].name, PLACEHOLDER);
        assert_eq!(groups[0].location, PLACEHOLDER);
        assert!(groups[0].role_codes.is_empty());
    }
}
