use chrono::{DateTime, Local, NaiveDate, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// One row of `public.students`, identity and timestamps assigned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudentRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: NaiveDate,
    pub enrollment_date: NaiveDate,
    pub grade_level: String,
    pub major: Option<String>,
    pub gpa: Option<f64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub status: StudentStatus,
}

impl StudentRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "student_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Graduated,
    Withdrawn,
}

impl StudentStatus {
    pub const ALL: [Self; 4] = [Self::Active, Self::Inactive, Self::Graduated, Self::Withdrawn];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Graduated => "graduated",
            Self::Withdrawn => "withdrawn",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Graduated => "Graduated",
            Self::Withdrawn => "Withdrawn",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownStatus;

impl FromStr for StudentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "graduated" => Ok(Self::Graduated),
            "withdrawn" => Ok(Self::Withdrawn),
            _ => Err(UnknownStatus),
        }
    }
}

/// Raw form input, everything still a string. Runs through [`StudentDraft::validate`]
/// before anything touches the database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub enrollment_date: String,
    pub grade_level: String,
    pub major: String,
    pub gpa: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub status: String,
}

/// Validated domain fields, ready to hand to the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: NaiveDate,
    pub enrollment_date: NaiveDate,
    pub grade_level: String,
    pub major: Option<String>,
    pub gpa: Option<f64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub status: StudentStatus,
}

/// Whether a draft belongs to a brand-new record or an existing one. Only
/// affects the empty-status default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every problem found in one validation pass, in field-declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

impl StudentDraft {
    /// Empty draft for the create form: status active, enrollment date today.
    pub fn for_create() -> Self {
        Self {
            status: StudentStatus::Active.to_string(),
            enrollment_date: Local::now().date_naive().to_string(),
            ..Self::default()
        }
    }

    /// Prefills an edit form: nulls become empty strings, gpa its decimal string.
    pub fn from_record(record: &StudentRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone().unwrap_or_default(),
            date_of_birth: record.date_of_birth.to_string(),
            enrollment_date: record.enrollment_date.to_string(),
            grade_level: record.grade_level.clone(),
            major: record.major.clone().unwrap_or_default(),
            gpa: record.gpa.map(|gpa| gpa.to_string()).unwrap_or_default(),
            address: record.address.clone().unwrap_or_default(),
            city: record.city.clone().unwrap_or_default(),
            state: record.state.clone().unwrap_or_default(),
            zip_code: record.zip_code.clone().unwrap_or_default(),
            emergency_contact_name: record.emergency_contact_name.clone().unwrap_or_default(),
            emergency_contact_phone: record.emergency_contact_phone.clone().unwrap_or_default(),
            status: record.status.to_string(),
        }
    }

    /// Pure, synchronous, and exhaustive: collects every field error in one
    /// pass rather than bailing at the first, so the form can show them all.
    pub fn validate(&self, mode: DraftMode) -> Result<StudentInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let first_name =
            required_text(&mut errors, "first_name", "First name", &self.first_name, 100);
        let last_name = required_text(&mut errors, "last_name", "Last name", &self.last_name, 100);

        let email = required_text(&mut errors, "email", "Email", &self.email, 255).and_then(
            |email| {
                if EmailAddress::is_valid(&email) {
                    Some(email)
                } else {
                    errors.push("email", "Invalid email address");
                    None
                }
            },
        );

        let phone = optional_text(&mut errors, "phone", "Phone", &self.phone, 20);
        let date_of_birth =
            required_date(&mut errors, "date_of_birth", "Date of birth", &self.date_of_birth);
        let enrollment_date = required_date(
            &mut errors,
            "enrollment_date",
            "Enrollment date",
            &self.enrollment_date,
        );
        let grade_level =
            required_text(&mut errors, "grade_level", "Grade level", &self.grade_level, 50);
        let major = optional_text(&mut errors, "major", "Major", &self.major, 100);

        let gpa = {
            let trimmed = self.gpa.trim();
            if trimmed.is_empty() {
                None
            } else {
                match trimmed.parse::<f64>() {
                    Ok(value) if (0.0..=4.0).contains(&value) => Some(value),
                    _ => {
                        errors.push("gpa", "GPA must be between 0 and 4");
                        None
                    }
                }
            }
        };

        let address = {
            let trimmed = self.address.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        };
        let city = optional_text(&mut errors, "city", "City", &self.city, 100);
        let state = optional_text(&mut errors, "state", "State", &self.state, 50);
        let zip_code = optional_text(&mut errors, "zip_code", "Zip code", &self.zip_code, 10);
        let emergency_contact_name = optional_text(
            &mut errors,
            "emergency_contact_name",
            "Emergency contact name",
            &self.emergency_contact_name,
            200,
        );
        let emergency_contact_phone = optional_text(
            &mut errors,
            "emergency_contact_phone",
            "Emergency contact phone",
            &self.emergency_contact_phone,
            20,
        );

        let status = {
            let trimmed = self.status.trim();
            if trimmed.is_empty() {
                match mode {
                    DraftMode::Create => Some(StudentStatus::default()),
                    DraftMode::Edit => {
                        errors.push("status", "Status is required");
                        None
                    }
                }
            } else {
                match trimmed.parse::<StudentStatus>() {
                    Ok(status) => Some(status),
                    Err(UnknownStatus) => {
                        errors.push(
                            "status",
                            "Status must be active, inactive, graduated or withdrawn",
                        );
                        None
                    }
                }
            }
        };

        match (
            first_name,
            last_name,
            email,
            date_of_birth,
            enrollment_date,
            grade_level,
            status,
        ) {
            (
                Some(first_name),
                Some(last_name),
                Some(email),
                Some(date_of_birth),
                Some(enrollment_date),
                Some(grade_level),
                Some(status),
            ) if errors.is_empty() => Ok(StudentInput {
                first_name,
                last_name,
                email,
                phone,
                date_of_birth,
                enrollment_date,
                grade_level,
                major,
                gpa,
                address,
                city,
                state,
                zip_code,
                emergency_contact_name,
                emergency_contact_phone,
                status,
            }),
            _ => Err(errors),
        }
    }
}

fn required_text(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: &str,
    max_len: usize,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{label} is required"));
        return None;
    }
    if trimmed.chars().count() > max_len {
        errors.push(field, format!("{label} must be at most {max_len} characters"));
        return None;
    }
    Some(trimmed.to_owned())
}

fn optional_text(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: &str,
    max_len: usize,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().count() > max_len {
        errors.push(field, format!("{label} must be at most {max_len} characters"));
        return None;
    }
    Some(trimmed.to_owned())
}

fn required_date(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: &str,
) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{label} is required"));
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(field, format!("{label} must be a valid date"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> StudentDraft {
        StudentDraft {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            phone: String::new(),
            date_of_birth: "1815-12-10".to_owned(),
            enrollment_date: "2024-09-01".to_owned(),
            grade_level: "Sophomore".to_owned(),
            major: String::new(),
            gpa: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            emergency_contact_name: String::new(),
            emergency_contact_phone: String::new(),
            status: "active".to_owned(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        let input = valid_draft().validate(DraftMode::Create).unwrap();
        assert_eq!(input.first_name, "Ada");
        assert_eq!(input.status, StudentStatus::Active);
        assert_eq!(input.gpa, None);
        assert_eq!(input.phone, None);
    }

    #[test]
    fn missing_required_field_reports_only_that_field() {
        let mut draft = valid_draft();
        draft.first_name = String::new();

        let errors = draft.validate(DraftMode::Create).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("first_name"), Some("First name is required"));
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut draft = valid_draft();
        draft.last_name = "   ".to_owned();

        let errors = draft.validate(DraftMode::Create).unwrap_err();
        assert_eq!(errors.get("last_name"), Some("Last name is required"));
    }

    #[test]
    fn all_errors_reported_in_one_pass() {
        let errors = StudentDraft::default()
            .validate(DraftMode::Create)
            .unwrap_err();

        for field in [
            "first_name",
            "last_name",
            "email",
            "date_of_birth",
            "enrollment_date",
            "grade_level",
        ] {
            assert!(errors.get(field).is_some(), "expected error for {field}");
        }
        // empty status defaults to active on create, so exactly the six above
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn invalid_email_is_rejected() {
        let mut draft = valid_draft();
        draft.email = "not-an-email".to_owned();

        let errors = draft.validate(DraftMode::Create).unwrap_err();
        assert_eq!(errors.get("email"), Some("Invalid email address"));
    }

    #[test]
    fn over_long_field_is_rejected() {
        let mut draft = valid_draft();
        draft.first_name = "x".repeat(101);

        let errors = draft.validate(DraftMode::Create).unwrap_err();
        assert_eq!(
            errors.get("first_name"),
            Some("First name must be at most 100 characters")
        );
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let mut draft = valid_draft();
        draft.date_of_birth = "10/12/1815".to_owned();

        let errors = draft.validate(DraftMode::Create).unwrap_err();
        assert_eq!(
            errors.get("date_of_birth"),
            Some("Date of birth must be a valid date")
        );
    }

    #[test]
    fn gpa_out_of_range_or_unparseable_fails() {
        for bad in ["5", "-1", "abc", "4.5", "NaN"] {
            let mut draft = valid_draft();
            draft.gpa = bad.to_owned();

            let errors = draft.validate(DraftMode::Create).unwrap_err();
            assert_eq!(
                errors.get("gpa"),
                Some("GPA must be between 0 and 4"),
                "gpa input {bad:?}"
            );
        }
    }

    #[test]
    fn gpa_in_range_parses() {
        let mut draft = valid_draft();
        draft.gpa = "3.75".to_owned();

        let input = draft.validate(DraftMode::Create).unwrap();
        assert_eq!(input.gpa, Some(3.75));
    }

    #[test]
    fn empty_gpa_is_absent_not_an_error() {
        let mut draft = valid_draft();
        draft.gpa = String::new();

        let input = draft.validate(DraftMode::Create).unwrap();
        assert_eq!(input.gpa, None);
    }

    #[test]
    fn empty_optionals_normalize_to_absent() {
        let mut draft = valid_draft();
        draft.major = "  ".to_owned();
        draft.city = String::new();

        let input = draft.validate(DraftMode::Create).unwrap();
        assert_eq!(input.major, None);
        assert_eq!(input.city, None);
        assert_eq!(input.address, None);
    }

    #[test]
    fn empty_status_defaults_to_active_on_create_only() {
        let mut draft = valid_draft();
        draft.status = String::new();

        let input = draft.clone().validate(DraftMode::Create).unwrap();
        assert_eq!(input.status, StudentStatus::Active);

        let errors = draft.validate(DraftMode::Edit).unwrap_err();
        assert_eq!(errors.get("status"), Some("Status is required"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut draft = valid_draft();
        draft.status = "expelled".to_owned();

        let errors = draft.validate(DraftMode::Create).unwrap_err();
        assert!(errors.get("status").is_some());
    }

    #[test]
    fn draft_round_trips_from_record() {
        let record = StudentRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            phone: None,
            date_of_birth: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            grade_level: "Sophomore".to_owned(),
            major: Some("Mathematics".to_owned()),
            gpa: Some(3.5),
            address: None,
            city: None,
            state: None,
            zip_code: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            status: StudentStatus::Graduated,
        };

        let draft = StudentDraft::from_record(&record);
        assert_eq!(draft.phone, "");
        assert_eq!(draft.gpa, "3.5");
        assert_eq!(draft.date_of_birth, "1815-12-10");
        assert_eq!(draft.status, "graduated");

        let input = draft.validate(DraftMode::Edit).unwrap();
        assert_eq!(input.major.as_deref(), Some("Mathematics"));
        assert_eq!(input.status, StudentStatus::Graduated);
    }
}
