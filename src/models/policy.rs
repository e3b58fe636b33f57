// src/models/policy.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{editor::Editable, error::AppError, filter::Searchable},
    db::store::Record,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyCategory {
    Conduct,
    Safety,
    Privacy,
    Leave,
    Compensation,
    Security,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyStatus {
    Active,
    Draft,
    Review,
    Archived,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Compliant,
    Partial,
    NonCompliant,
    Pending,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

// Política de RH
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub title: String,
    pub category: PolicyCategory,
    pub description: String,
    pub version: String,
    pub status: PolicyStatus,
    pub compliance: ComplianceStatus,
    pub risk_level: RiskLevel,
    pub acknowledged_count: u32,
    pub employee_count: u32,
    pub effective_date: NaiveDate,
    pub next_review: NaiveDate,
    pub updated_at: DateTime<Utc>,
}

impl Record for Policy {
    const RESOURCE: &'static str = "policy";

    fn id(&self) -> Uuid {
        self.id
    }

    fn company_id(&self) -> Option<Uuid> {
        self.company_id
    }
}

impl Searchable for Policy {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str(), self.version.as_str()]
    }
}

fn validate_review_after_effective(form: &PolicyForm) -> Result<(), ValidationError> {
    if form.next_review < form.effective_date {
        let mut err = ValidationError::new("review_date");
        err.message = Some("La prochaine révision doit suivre la date d'effet.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_review_after_effective"))]
pub struct PolicyForm {
    #[validate(length(min = 1, message = "Le titre est obligatoire."))]
    pub title: String,
    pub category: PolicyCategory,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "La version est obligatoire."))]
    pub version: String,
    pub status: PolicyStatus,
    pub compliance: ComplianceStatus,
    pub risk_level: RiskLevel,
    pub employee_count: u32,
    pub effective_date: NaiveDate,
    pub next_review: NaiveDate,
}

impl Policy {
    pub fn from_form(form: PolicyForm, company_id: Option<Uuid>, now: DateTime<Utc>) -> Result<Self, AppError> {
        form.validate()?;
        Ok(Policy {
            id: Uuid::new_v4(),
            company_id,
            title: form.title,
            category: form.category,
            description: form.description,
            version: form.version,
            status: form.status,
            compliance: form.compliance,
            risk_level: form.risk_level,
            acknowledged_count: 0,
            employee_count: form.employee_count,
            effective_date: form.effective_date,
            next_review: form.next_review,
            updated_at: now,
        })
    }
}

impl Editable for Policy {
    type Form = PolicyForm;

    fn to_form(&self) -> PolicyForm {
        PolicyForm {
            title: self.title.clone(),
            category: self.category,
            description: self.description.clone(),
            version: self.version.clone(),
            status: self.status,
            compliance: self.compliance,
            risk_level: self.risk_level,
            employee_count: self.employee_count,
            effective_date: self.effective_date,
            next_review: self.next_review,
        }
    }

    fn apply_form(&self, form: PolicyForm, now: DateTime<Utc>) -> Result<Self, AppError> {
        form.validate()?;
        Ok(Policy {
            title: form.title,
            category: form.category,
            description: form.description,
            version: form.version,
            status: form.status,
            compliance: form.compliance,
            risk_level: form.risk_level,
            // Reduzir o quadro não pode deixar mais ciências do que funcionários.
            acknowledged_count: self.acknowledged_count.min(form.employee_count),
            employee_count: form.employee_count,
            effective_date: form.effective_date,
            next_review: form.next_review,
            updated_at: now,
            ..self.clone()
        })
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct PolicyQuery {
    pub search: Option<String>,
    pub category: Option<PolicyCategory>,
    pub status: Option<PolicyStatus>,
    pub compliance: Option<ComplianceStatus>,
    pub risk_level: Option<RiskLevel>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyStats {
    pub total: usize,
    pub active: usize,
    pub compliance_rate: f64,
    pub acknowledgment_rate: f64,
    pub high_risk: usize,
    pub overdue_reviews: usize,
}
