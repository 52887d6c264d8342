// src/profile/validation.rs
//! Profile schema: one named validator per field.
//!
//! `validate` checks every field and collects all failures in one pass.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

use crate::profile::errors::ValidationErrors;
use crate::profile::transcoder::split_values;
use crate::types::profile::{DomainProfile, EmploymentType, ProfileField, ProfileRecord};

// ASCII character classes only
const URL_PATTERN: &str = r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/A-Za-z0-9_ .-]*)*/?$";
const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";

const REQUIRED: &str = "Required";
const EXPECTED_STRING: &str = "Expected string";
const EXPECTED_NUMBER: &str = "Expected number";
const EXPECTED_BOOLEAN: &str = "Expected boolean";

type FieldResult<T> = Result<T, String>;

fn url_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern is a valid regex"))
}

fn email_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

pub fn is_valid_url(candidate: &str) -> bool {
    url_regex().is_match(candidate)
}

pub fn is_valid_email(candidate: &str) -> bool {
    !candidate.starts_with('.') && !candidate.contains("..") && email_regex().is_match(candidate)
}

/// Validate a candidate record and build the domain profile from it
pub fn validate(candidate: &ProfileRecord) -> Result<DomainProfile, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let e = &mut errors;

    let name = collect(e, ProfileField::Name, validate_name(candidate));
    let email = collect(e, ProfileField::Email, validate_email(candidate));
    let phone = collect(e, ProfileField::Phone, validate_phone(candidate));
    let location = collect(
        e,
        ProfileField::Location,
        validate_required_text(candidate, ProfileField::Location, "Location is required"),
    );
    let current_title = collect(
        e,
        ProfileField::CurrentTitle,
        validate_required_text(
            candidate,
            ProfileField::CurrentTitle,
            "Current title is required",
        ),
    );
    let employment_type = collect(
        e,
        ProfileField::EmploymentType,
        validate_employment_type(candidate),
    );
    let experience_years = collect(
        e,
        ProfileField::ExperienceYears,
        validate_experience_years(candidate),
    );
    let current_industry = collect(
        e,
        ProfileField::CurrentIndustry,
        validate_required_text(
            candidate,
            ProfileField::CurrentIndustry,
            "Current industry is required",
        ),
    );
    let preferred_job_titles = collect(
        e,
        ProfileField::PreferredJobTitles,
        validate_multi_value(candidate, ProfileField::PreferredJobTitles),
    );
    let preferred_industries = collect(
        e,
        ProfileField::PreferredIndustries,
        validate_multi_value(candidate, ProfileField::PreferredIndustries),
    );
    let salary_expectations = collect(
        e,
        ProfileField::SalaryExpectations,
        validate_salary_expectations(candidate),
    );
    let education = collect(
        e,
        ProfileField::Education,
        validate_required_text(
            candidate,
            ProfileField::Education,
            "Education details are required",
        ),
    );
    let skills = collect(
        e,
        ProfileField::Skills,
        validate_multi_value(candidate, ProfileField::Skills),
    );
    let certifications = collect(
        e,
        ProfileField::Certifications,
        validate_multi_value(candidate, ProfileField::Certifications),
    );
    let career_goals = collect(
        e,
        ProfileField::CareerGoals,
        validate_required_text(candidate, ProfileField::CareerGoals, "Career goals are required"),
    );
    let relocation_willingness = collect(
        e,
        ProfileField::RelocationWillingness,
        validate_boolean(candidate, ProfileField::RelocationWillingness),
    );
    let linkedin = collect(
        e,
        ProfileField::Linkedin,
        validate_url(candidate, ProfileField::Linkedin, "Invalid LinkedIn URL"),
    );
    let portfolio = collect(
        e,
        ProfileField::Portfolio,
        validate_url(candidate, ProfileField::Portfolio, "Invalid portfolio URL"),
    );
    let resume_link = collect(e, ProfileField::ResumeLink, validate_resume_link(candidate));

    if !errors.is_empty() {
        debug!("Profile validation failed on {} field(s)", errors.len());
        return Err(errors);
    }

    Ok(DomainProfile {
        name,
        email,
        phone,
        location,
        current_title,
        employment_type,
        experience_years,
        current_industry,
        preferred_job_titles,
        preferred_industries,
        salary_expectations,
        education,
        skills,
        certifications,
        career_goals,
        relocation_willingness,
        linkedin,
        portfolio,
        resume_link,
        extra: candidate.extra_fields(),
    })
}

/// Record a failure and keep going with a placeholder
fn collect<T: Default>(errors: &mut ValidationErrors, field: ProfileField, result: FieldResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(message) => {
            errors.add(field, message);
            T::default()
        }
    }
}

// ===== Field Validators =====

fn required_string(candidate: &ProfileRecord, field: ProfileField) -> FieldResult<&str> {
    match candidate.field(field) {
        None | Some(Value::Null) => Err(REQUIRED.to_string()),
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(_) => Err(EXPECTED_STRING.to_string()),
    }
}

fn min_chars(value: &str, min: usize, message: &str) -> FieldResult<String> {
    if value.chars().count() < min {
        Err(message.to_string())
    } else {
        Ok(value.to_string())
    }
}

fn validate_name(candidate: &ProfileRecord) -> FieldResult<String> {
    let name = required_string(candidate, ProfileField::Name)?;
    min_chars(name, 2, "Name must be at least 2 characters")
}

fn validate_email(candidate: &ProfileRecord) -> FieldResult<String> {
    let email = required_string(candidate, ProfileField::Email)?;
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if !is_valid_email(email) {
        return Err("Invalid email address".to_string());
    }
    Ok(email.to_string())
}

fn validate_phone(candidate: &ProfileRecord) -> FieldResult<String> {
    let phone = required_string(candidate, ProfileField::Phone)?;
    min_chars(phone, 10, "Phone number must be at least 10 digits")
}

fn validate_required_text(
    candidate: &ProfileRecord,
    field: ProfileField,
    message: &str,
) -> FieldResult<String> {
    let value = required_string(candidate, field)?;
    min_chars(value, 1, message)
}

fn validate_employment_type(candidate: &ProfileRecord) -> FieldResult<EmploymentType> {
    let raw = required_string(candidate, ProfileField::EmploymentType)?;
    raw.parse::<EmploymentType>().map_err(|_| {
        format!(
            "Invalid employment type. Expected one of: {}",
            EmploymentType::ALL
                .iter()
                .map(EmploymentType::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

fn non_negative_number(
    candidate: &ProfileRecord,
    field: ProfileField,
    message: &str,
) -> FieldResult<f64> {
    let number = match candidate.field(field) {
        None | Some(Value::Null) => return Err(REQUIRED.to_string()),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| EXPECTED_NUMBER.to_string())?,
        Some(_) => return Err(EXPECTED_NUMBER.to_string()),
    };

    if number < 0.0 {
        return Err(message.to_string());
    }
    Ok(number)
}

fn validate_experience_years(candidate: &ProfileRecord) -> FieldResult<u32> {
    let years = non_negative_number(
        candidate,
        ProfileField::ExperienceYears,
        "Years of experience must be positive",
    )?;

    if years.fract() != 0.0 || years > f64::from(u32::MAX) {
        return Err("Years of experience must be a whole number".to_string());
    }
    Ok(years as u32)
}

fn validate_salary_expectations(candidate: &ProfileRecord) -> FieldResult<f64> {
    non_negative_number(
        candidate,
        ProfileField::SalaryExpectations,
        "Salary expectations must be positive",
    )
}

/// Comma-separated string, or an already-split sequence of strings
fn validate_multi_value(candidate: &ProfileRecord, field: ProfileField) -> FieldResult<Vec<String>> {
    match candidate.field(field) {
        None | Some(Value::Null) => Err(REQUIRED.to_string()),
        Some(Value::String(raw)) => Ok(split_values(raw)),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if s.trim().is_empty() => None,
                Value::String(s) => Some(Ok(s.trim().to_string())),
                _ => Some(Err(EXPECTED_STRING.to_string())),
            })
            .collect(),
        Some(_) => Err(EXPECTED_STRING.to_string()),
    }
}

fn validate_boolean(candidate: &ProfileRecord, field: ProfileField) -> FieldResult<bool> {
    match candidate.field(field) {
        None | Some(Value::Null) => Err(REQUIRED.to_string()),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(EXPECTED_BOOLEAN.to_string()),
    }
}

fn validate_url(candidate: &ProfileRecord, field: ProfileField, message: &str) -> FieldResult<String> {
    let url = required_string(candidate, field)?;
    if is_valid_url(url) {
        Ok(url.to_string())
    } else {
        Err(message.to_string())
    }
}

fn validate_resume_link(candidate: &ProfileRecord) -> FieldResult<Option<String>> {
    match candidate.field(ProfileField::ResumeLink) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(link)) if link.is_empty() => Ok(None),
        Some(Value::String(link)) if is_valid_url(link) => Ok(Some(link.clone())),
        Some(Value::String(_)) => Err("Invalid resume URL".to_string()),
        Some(_) => Err(EXPECTED_STRING.to_string()),
    }
}
