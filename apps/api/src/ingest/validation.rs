use reqwest::Url;

use crate::models::application::{CandidateDraft, NewApplication};
use crate::models::job::{JobDraft, JobStatus, NewJob};

pub const JD_URL_REASON: &str = "JD must be a valid file URL (http:// or https://)";

/// True when `value` parses as an absolute URL with scheme exactly http or https.
pub fn is_http_url(value: &str) -> bool {
    match Url::parse(value.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required(value: &Option<String>, label: &str) -> Result<String, String> {
    present(value).ok_or_else(|| format!("Missing {label}"))
}

/// Required-field check then format check for one job. The first failure is
/// returned as a human-readable reason.
pub fn validate_job_draft(draft: &JobDraft) -> Result<NewJob, String> {
    let role_code = required(&draft.role_code, "Role Code")?;
    let role_name = required(&draft.role_name, "Role Name")?;
    let location = required(&draft.location, "Location")?;
    let jd_url = required(&draft.jd_url, "JD URL")?;

    if !is_http_url(&jd_url) {
        return Err(JD_URL_REASON.to_string());
    }
    let status = match present(&draft.status) {
        Some(raw) => raw.parse::<JobStatus>()?,
        None => JobStatus::default(),
    };

    Ok(NewJob {
        role_code,
        role_name,
        status,
        location,
        jd_url,
        current_updates: present(&draft.current_updates),
        minimum_experience: present(&draft.minimum_experience),
        duration: present(&draft.duration),
        monthly_ctc: present(&draft.monthly_ctc),
        skills: present(&draft.skills),
    })
}

/// Required-field check for one application. Only the candidate name is
/// mandatory; blank optional fields become `None`.
pub fn validate_candidate_draft(
    draft: &CandidateDraft,
    application_id: String,
) -> Result<NewApplication, String> {
    let candidate_name = required(&draft.candidate_name, "Candidate Name")?;

    Ok(NewApplication {
        application_id,
        role_code: present(&draft.role_code),
        candidate_name,
        email: present(&draft.email),
        contact_number: present(&draft.contact_number),
        experience_years: present(&draft.experience_years),
        relevant_experience_years: present(&draft.relevant_experience_years),
        notice_period: present(&draft.notice_period),
        current_ctc: present(&draft.current_ctc),
        expected_ctc: present(&draft.expected_ctc),
        current_location: present(&draft.current_location),
        resume_url: present(&draft.resume_url),
        job_applied: present(&draft.job_applied),
        skills: present(&draft.skills),
        documents: present(&draft.documents),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(jd_url: &str) -> JobDraft {
        JobDraft {
            role_code: Some("ENG-1".into()),
            role_name: Some("Backend Engineer".into()),
            location: Some("Pune".into()),
            jd_url: Some(jd_url.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_http_and_https_are_accepted() {
        assert!(is_http_url("http://x.com/jd.pdf"));
        assert!(is_http_url("https://files.example.com/jd/ENG-1.pdf"));
    }

    #[test]
    fn test_other_schemes_and_garbage_are_rejected() {
        assert!(!is_http_url("ftp://x.com/jd.pdf"));
        assert!(!is_http_url("file:///tmp/jd.pdf"));
        assert!(!is_http_url("x.com/jd.pdf"));
        assert!(!is_http_url("not a url"));
    }

    #[test]
    fn test_ftp_jd_is_rejected_even_when_complete() {
        let err = validate_job_draft(&job("ftp://x.com/jd.pdf")).unwrap_err();
        assert_eq!(err, JD_URL_REASON);
    }

    #[test]
    fn test_first_missing_field_wins() {
        let draft = JobDraft {
            role_code: Some("  ".into()),
            location: None,
            ..job("ftp://x.com/jd.pdf")
        };
        assert_eq!(validate_job_draft(&draft).unwrap_err(), "Missing Role Code");
    }

    #[test]
    fn test_status_defaults_to_active_and_rejects_unknown() {
        assert_eq!(
            validate_job_draft(&job("https://x.com/jd")).unwrap().status,
            JobStatus::Active
        );
        let draft = JobDraft {
            status: Some("archived".into()),
            ..job("https://x.com/jd")
        };
        assert!(validate_job_draft(&draft).unwrap_err().contains("archived"));
    }

    #[test]
    fn test_candidate_requires_only_a_name() {
        let draft = CandidateDraft {
            candidate_name: Some(" Asha ".into()),
            email: Some("".into()),
            ..Default::default()
        };
        let app = validate_candidate_draft(&draft, "APP_UNKNOWN_1".into()).unwrap();
        assert_eq!(app.candidate_name, "Asha");
        assert_eq!(app.email, None);

        let err = validate_candidate_draft(&CandidateDraft::default(), "x".into()).unwrap_err();
        assert_eq!(err, "Missing Candidate Name");
    }
}
