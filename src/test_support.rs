// src/test_support.rs
//! Shared fixtures for unit tests

use serde_json::{json, Map};

use crate::types::auth::AuthUser;
use crate::types::profile::{DomainProfile, EmploymentType, ProfileRecord};

pub fn sample_profile() -> DomainProfile {
    DomainProfile {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "+1 (555) 000-0000".to_string(),
        location: "Berlin, Germany".to_string(),
        current_title: "Software Engineer".to_string(),
        employment_type: EmploymentType::Contract,
        experience_years: 6,
        current_industry: "Technology".to_string(),
        preferred_job_titles: vec!["Tech Lead".to_string(), "Staff Engineer".to_string()],
        preferred_industries: vec!["Finance".to_string()],
        salary_expectations: 95000.0,
        education: "BSc Computer Science".to_string(),
        skills: vec!["Rust".to_string(), "TypeScript".to_string()],
        certifications: vec![],
        career_goals: "Lead a platform team".to_string(),
        relocation_willingness: true,
        linkedin: "https://linkedin.com/in/jdoe".to_string(),
        portfolio: "https://jdoe.dev".to_string(),
        resume_link: None,
        extra: Map::new(),
    }
}

/// A valid profile as the backend sends it
pub fn sample_wire() -> ProfileRecord {
    let value = json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "+1 (555) 000-0000",
        "location": "Berlin, Germany",
        "current_title": "Software Engineer",
        "employment_type": "Contract",
        "experience_years": 6,
        "current_industry": "Technology",
        "preferred_job_titles": "Tech Lead, Staff Engineer",
        "preferred_industries": "Finance",
        "salary_expectations": 95000.0,
        "education": "BSc Computer Science",
        "skills": "Rust, TypeScript",
        "certifications": "",
        "career_goals": "Lead a platform team",
        "relocation_willingness": true,
        "linkedin": "https://linkedin.com/in/jdoe",
        "portfolio": "https://jdoe.dev"
    });
    ProfileRecord::from_value(value).unwrap_or_default()
}

pub fn sample_user() -> AuthUser {
    AuthUser {
        id: "4b6f3c1e-user".to_string(),
        email: "jane@example.com".to_string(),
        name: Some("Jane Doe".to_string()),
        access_token: "token-123".to_string(),
        is_profile_complete: false,
    }
}
