// src/types/profile.rs
//! Profile data structures shared by the validator, the transcoder and the editor

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::profile::transcoder::join_values;

// ===== Employment Type =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-Time")]
    FullTime,
    #[serde(rename = "Part-Time")]
    PartTime,
    Contract,
    Internship,
    Freelance,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 5] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contract,
        EmploymentType::Internship,
        EmploymentType::Freelance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-Time",
            EmploymentType::PartTime => "Part-Time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Internship => "Internship",
            EmploymentType::Freelance => "Freelance",
        }
    }
}

impl Default for EmploymentType {
    fn default() -> Self {
        EmploymentType::FullTime
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown employment type: {}", s))
    }
}

// ===== Profile Fields =====

/// How a field is represented in the form and checked by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    MultiValue,
    Number,
    Boolean,
    Choice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Location,
    CurrentTitle,
    EmploymentType,
    ExperienceYears,
    CurrentIndustry,
    PreferredJobTitles,
    PreferredIndustries,
    SalaryExpectations,
    Education,
    Skills,
    Certifications,
    CareerGoals,
    RelocationWillingness,
    Linkedin,
    Portfolio,
    ResumeLink,
}

impl ProfileField {
    /// Declaration order, which is also the order errors are reported in
    pub const ALL: [ProfileField; 19] = [
        ProfileField::Name,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::Location,
        ProfileField::CurrentTitle,
        ProfileField::EmploymentType,
        ProfileField::ExperienceYears,
        ProfileField::CurrentIndustry,
        ProfileField::PreferredJobTitles,
        ProfileField::PreferredIndustries,
        ProfileField::SalaryExpectations,
        ProfileField::Education,
        ProfileField::Skills,
        ProfileField::Certifications,
        ProfileField::CareerGoals,
        ProfileField::RelocationWillingness,
        ProfileField::Linkedin,
        ProfileField::Portfolio,
        ProfileField::ResumeLink,
    ];

    pub const MULTI_VALUE: [ProfileField; 4] = [
        ProfileField::PreferredJobTitles,
        ProfileField::PreferredIndustries,
        ProfileField::Skills,
        ProfileField::Certifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
            ProfileField::Location => "location",
            ProfileField::CurrentTitle => "current_title",
            ProfileField::EmploymentType => "employment_type",
            ProfileField::ExperienceYears => "experience_years",
            ProfileField::CurrentIndustry => "current_industry",
            ProfileField::PreferredJobTitles => "preferred_job_titles",
            ProfileField::PreferredIndustries => "preferred_industries",
            ProfileField::SalaryExpectations => "salary_expectations",
            ProfileField::Education => "education",
            ProfileField::Skills => "skills",
            ProfileField::Certifications => "certifications",
            ProfileField::CareerGoals => "career_goals",
            ProfileField::RelocationWillingness => "relocation_willingness",
            ProfileField::Linkedin => "linkedin",
            ProfileField::Portfolio => "portfolio",
            ProfileField::ResumeLink => "resume_link",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            ProfileField::PreferredJobTitles
            | ProfileField::PreferredIndustries
            | ProfileField::Skills
            | ProfileField::Certifications => FieldKind::MultiValue,
            ProfileField::ExperienceYears | ProfileField::SalaryExpectations => FieldKind::Number,
            ProfileField::RelocationWillingness => FieldKind::Boolean,
            ProfileField::EmploymentType => FieldKind::Choice,
            _ => FieldKind::Text,
        }
    }

    /// Owned by the authentication identity, never edited in the form
    pub fn is_read_only(&self) -> bool {
        matches!(self, ProfileField::Email)
    }

    pub fn is_known(name: &str) -> bool {
        name.parse::<ProfileField>().is_ok()
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown profile field: {}", s))
    }
}

impl Serialize for ProfileField {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ===== Unvalidated Record =====

/// Loosely-typed profile record: wire data from the backend, or the
/// editor's form state before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileRecord(Map<String, Value>);

impl ProfileRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Accepts only JSON objects
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn field(&self, field: ProfileField) -> Option<&Value> {
        self.0.get(field.as_str())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn set(&mut self, field: ProfileField, value: Value) -> Option<Value> {
        self.0.insert(field.as_str().to_string(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields that are not part of the profile schema
    pub fn extra_fields(&self) -> Map<String, Value> {
        self.0
            .iter()
            .filter(|(key, _)| !ProfileField::is_known(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for ProfileRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for ProfileRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ===== Validated Profile =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub current_title: String,
    pub employment_type: EmploymentType,
    pub experience_years: u32,
    pub current_industry: String,
    pub preferred_job_titles: Vec<String>,
    pub preferred_industries: Vec<String>,
    pub salary_expectations: f64,
    pub education: String,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub career_goals: String,
    pub relocation_willingness: bool,
    pub linkedin: String,
    pub portfolio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_link: Option<String>,
    /// Fields the backend sent that the form does not know about
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DomainProfile {
    /// Domain-shaped record, multi-value fields as sequences
    pub fn to_record(&self) -> ProfileRecord {
        let mut record: ProfileRecord = self.extra.clone().into();

        record.set(ProfileField::Name, Value::from(self.name.clone()));
        record.set(ProfileField::Email, Value::from(self.email.clone()));
        record.set(ProfileField::Phone, Value::from(self.phone.clone()));
        record.set(ProfileField::Location, Value::from(self.location.clone()));
        record.set(ProfileField::CurrentTitle, Value::from(self.current_title.clone()));
        record.set(
            ProfileField::EmploymentType,
            Value::from(self.employment_type.as_str()),
        );
        record.set(ProfileField::ExperienceYears, Value::from(self.experience_years));
        record.set(
            ProfileField::CurrentIndustry,
            Value::from(self.current_industry.clone()),
        );
        record.set(
            ProfileField::PreferredJobTitles,
            Value::from(self.preferred_job_titles.clone()),
        );
        record.set(
            ProfileField::PreferredIndustries,
            Value::from(self.preferred_industries.clone()),
        );
        record.set(
            ProfileField::SalaryExpectations,
            Value::from(self.salary_expectations),
        );
        record.set(ProfileField::Education, Value::from(self.education.clone()));
        record.set(ProfileField::Skills, Value::from(self.skills.clone()));
        record.set(ProfileField::Certifications, Value::from(self.certifications.clone()));
        record.set(ProfileField::CareerGoals, Value::from(self.career_goals.clone()));
        record.set(
            ProfileField::RelocationWillingness,
            Value::from(self.relocation_willingness),
        );
        record.set(ProfileField::Linkedin, Value::from(self.linkedin.clone()));
        record.set(ProfileField::Portfolio, Value::from(self.portfolio.clone()));
        if let Some(resume_link) = &self.resume_link {
            record.set(ProfileField::ResumeLink, Value::from(resume_link.clone()));
        }

        record
    }

    /// Typed wire form, multi-value fields joined with ", "
    pub fn to_wire(&self) -> WireProfile {
        WireProfile {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            location: self.location.clone(),
            current_title: self.current_title.clone(),
            employment_type: self.employment_type,
            experience_years: self.experience_years,
            current_industry: self.current_industry.clone(),
            preferred_job_titles: join_values(&self.preferred_job_titles),
            preferred_industries: join_values(&self.preferred_industries),
            salary_expectations: self.salary_expectations,
            education: self.education.clone(),
            skills: join_values(&self.skills),
            certifications: join_values(&self.certifications),
            career_goals: self.career_goals.clone(),
            relocation_willingness: self.relocation_willingness,
            linkedin: self.linkedin.clone(),
            portfolio: self.portfolio.clone(),
            resume_link: self.resume_link.clone(),
            extra: self.extra.clone(),
        }
    }
}

// ===== Wire Profile =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub current_title: String,
    pub employment_type: EmploymentType,
    pub experience_years: u32,
    pub current_industry: String,
    pub preferred_job_titles: String,
    pub preferred_industries: String,
    pub salary_expectations: f64,
    pub education: String,
    pub skills: String,
    pub certifications: String,
    pub career_goals: String,
    pub relocation_willingness: bool,
    pub linkedin: String,
    pub portfolio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_link: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_profile;
    use serde_json::json;

    #[test]
    fn test_employment_type_wire_spelling() {
        assert_eq!(
            serde_json::to_value(EmploymentType::FullTime).unwrap(),
            json!("Full-Time")
        );
        assert_eq!(
            "Part-Time".parse::<EmploymentType>().unwrap(),
            EmploymentType::PartTime
        );
        assert!("part-time".parse::<EmploymentType>().is_err());
    }

    #[test]
    fn test_profile_field_names() {
        for field in ProfileField::ALL {
            assert_eq!(field.as_str().parse::<ProfileField>().unwrap(), field);
        }
        assert!(!ProfileField::is_known("is_profile_complete"));
        assert_eq!(ProfileField::Skills.kind(), FieldKind::MultiValue);
        assert!(ProfileField::Email.is_read_only());
    }

    #[test]
    fn test_to_wire_joins_multi_value_fields() {
        let wire = sample_profile().to_wire();
        assert_eq!(wire.preferred_job_titles, "Tech Lead, Staff Engineer");
        assert_eq!(wire.skills, "Rust, TypeScript");
        assert_eq!(wire.certifications, "");

        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(value["employment_type"], json!("Contract"));
        assert!(value.get("resume_link").is_none());
    }

    #[test]
    fn test_to_record_keeps_extra_fields() {
        let mut profile = sample_profile();
        profile
            .extra
            .insert("is_profile_complete".to_string(), json!(true));

        let record = profile.to_record();
        assert_eq!(record.get("is_profile_complete"), Some(&json!(true)));
        assert_eq!(record.field(ProfileField::Skills), Some(&json!(["Rust", "TypeScript"])));
        assert!(!record.contains_key("resume_link"));
        assert_eq!(record.extra_fields().len(), 1);
    }
}
