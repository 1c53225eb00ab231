//! Client-side draft validation.
//!
//! Drafts hold user input as typed fields; `validate()` either rejects
//! with per-field errors (mirroring the backend's 400 payload shape) or
//! yields the wire body to submit. Server-side validation still applies
//! on top -- this layer only catches what a form can catch locally.

use flocklink_api::FieldError;
use flocklink_api::types::{FarmWrite, ProgramTaskWrite, ScheduledReportWrite, WorkerWrite};

use crate::model::{IntegrationType, ReportFrequency, TaskPriority};

/// User input for creating or editing a farm.
#[derive(Debug, Clone, Default)]
pub struct FarmDraft {
    pub name: String,
    pub location: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub integration: IntegrationType,
}

impl FarmDraft {
    pub fn validate(&self) -> Result<FarmWrite, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(field_error("name", "name is required"));
        }
        if let Some(email) = non_empty(self.contact_email.as_deref())
            && !looks_like_email(email)
        {
            errors.push(field_error("contact_email", "not a valid email address"));
        }
        if let Some(phone) = non_empty(self.contact_phone.as_deref())
            && !looks_like_phone(phone)
        {
            errors.push(field_error("contact_phone", "not a valid phone number"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(FarmWrite {
            name: self.name.trim().to_owned(),
            location: non_empty_owned(self.location.as_deref()),
            contact_name: non_empty_owned(self.contact_name.as_deref()),
            contact_email: non_empty_owned(self.contact_email.as_deref()),
            contact_phone: non_empty_owned(self.contact_phone.as_deref()),
            integration_type: Some(self.integration.to_string()),
        })
    }
}

/// User input for creating or editing a worker.
#[derive(Debug, Clone, Default)]
pub struct WorkerDraft {
    pub farm_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub is_active: bool,
    pub receive_daily_tasks: bool,
}

impl WorkerDraft {
    pub fn validate(&self) -> Result<WorkerWrite, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(field_error("name", "name is required"));
        }
        if self.farm_id <= 0 {
            errors.push(field_error("farm", "a farm must be selected"));
        }
        if let Some(email) = non_empty(self.email.as_deref())
            && !looks_like_email(email)
        {
            errors.push(field_error("email", "not a valid email address"));
        }
        if let Some(phone) = non_empty(self.phone.as_deref())
            && !looks_like_phone(phone)
        {
            errors.push(field_error("phone", "not a valid phone number"));
        }
        if self.receive_daily_tasks && non_empty(self.email.as_deref()).is_none() {
            errors.push(field_error(
                "email",
                "an email address is required to receive daily tasks",
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(WorkerWrite {
            farm: self.farm_id,
            name: self.name.trim().to_owned(),
            email: non_empty_owned(self.email.as_deref()),
            phone: non_empty_owned(self.phone.as_deref()),
            role: non_empty_owned(self.role.as_deref()),
            is_active: Some(self.is_active),
            receive_daily_tasks: Some(self.receive_daily_tasks),
        })
    }
}

/// User input for one task on a program's schedule.
#[derive(Debug, Clone, Default)]
pub struct ProgramTaskDraft {
    pub program_id: i64,
    pub day_offset: i32,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub recurring: bool,
}

impl ProgramTaskDraft {
    pub fn validate(&self) -> Result<ProgramTaskWrite, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(field_error("title", "title is required"));
        }
        if self.program_id <= 0 {
            errors.push(field_error("program", "a program must be selected"));
        }
        if self.day_offset < 0 {
            errors.push(field_error("day_offset", "cannot be before flock placement"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ProgramTaskWrite {
            program: self.program_id,
            day_offset: self.day_offset,
            title: self.title.trim().to_owned(),
            description: non_empty_owned(self.description.as_deref()),
            priority: Some(self.priority.to_string()),
            recurring: Some(self.recurring),
        })
    }
}

/// User input for scheduling a report.
#[derive(Debug, Clone, Default)]
pub struct ScheduledReportDraft {
    pub template_id: i64,
    pub frequency: ReportFrequency,
    pub recipients: Vec<String>,
    pub enabled: bool,
}

impl ScheduledReportDraft {
    pub fn validate(&self) -> Result<ScheduledReportWrite, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.template_id <= 0 {
            errors.push(field_error("template", "a template must be selected"));
        }
        if self.recipients.is_empty() {
            errors.push(field_error("recipients", "at least one recipient is required"));
        }
        for recipient in &self.recipients {
            if !looks_like_email(recipient) {
                errors.push(field_error(
                    "recipients",
                    format!("'{recipient}' is not a valid email address"),
                ));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ScheduledReportWrite {
            template: self.template_id,
            frequency: self.frequency.to_string(),
            recipients: self.recipients.clone(),
            enabled: Some(self.enabled),
        })
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn field_error(field: &str, message: impl Into<String>) -> FieldError {
    FieldError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn non_empty_owned(s: Option<&str>) -> Option<String> {
    non_empty(s).map(str::to_owned)
}

/// `local@domain.tld` shape check. The backend does the real validation.
fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// At least seven digits, allowing separators and a leading `+`.
fn looks_like_phone(s: &str) -> bool {
    let digits = s.chars().filter(char::is_ascii_digit).count();
    let allowed = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.'));
    digits >= 7 && allowed
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn farm_draft_requires_name() {
        let draft = FarmDraft::default();
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn farm_draft_rejects_bad_email() {
        let draft = FarmDraft {
            name: "Hilltop".into(),
            contact_email: Some("not-an-email".into()),
            ..Default::default()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors[0].field, "contact_email");
    }

    #[test]
    fn farm_draft_trims_and_drops_empty_optionals() {
        let draft = FarmDraft {
            name: "  Hilltop  ".into(),
            location: Some("   ".into()),
            contact_email: Some("owner@hilltop.farm".into()),
            integration: IntegrationType::Rotem,
            ..Default::default()
        };
        let body = draft.validate().unwrap();
        assert_eq!(body.name, "Hilltop");
        assert!(body.location.is_none());
        assert_eq!(body.integration_type.as_deref(), Some("rotem"));
    }

    #[test]
    fn worker_draft_collects_multiple_errors() {
        let draft = WorkerDraft {
            farm_id: 0,
            name: String::new(),
            phone: Some("123".into()),
            ..Default::default()
        };
        let errors = draft.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"farm"));
        assert!(fields.contains(&"phone"));
    }

    #[test]
    fn worker_daily_tasks_requires_email() {
        let draft = WorkerDraft {
            farm_id: 1,
            name: "Ana".into(),
            receive_daily_tasks: true,
            ..Default::default()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn program_task_rejects_negative_day() {
        let draft = ProgramTaskDraft {
            program_id: 1,
            day_offset: -3,
            title: "Vaccination".into(),
            ..Default::default()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors[0].field, "day_offset");
    }

    #[test]
    fn phone_accepts_separators() {
        assert!(looks_like_phone("+1 (555) 123-4567"));
        assert!(!looks_like_phone("555-12"));
        assert!(!looks_like_phone("call me maybe"));
    }

    #[test]
    fn scheduled_report_requires_valid_recipients() {
        let draft = ScheduledReportDraft {
            template_id: 3,
            recipients: vec!["ops@hilltop.farm".into(), "bogus".into()],
            enabled: true,
            ..Default::default()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("bogus"));
    }
}
