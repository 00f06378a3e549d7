//! Business-owner form intake with Django-style per-field validation errors.

use std::collections::BTreeMap;

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use crowdmap_core::CrowdLevel;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::store::Submission;

const REQUIRED: &str = "This field is required.";
const INVALID_EMAIL: &str = "Enter a valid email address.";
const INVALID_CHOICE: &str = "Select a valid choice.";

#[derive(Debug, Deserialize)]
pub struct SubmitFormRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    business_type: String,
    #[serde(default)]
    crowd_intensity: String,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum SubmitFormResponse {
    Accepted {
        success: bool,
        message: &'static str,
    },
    Rejected {
        success: bool,
        errors: BTreeMap<&'static str, Vec<&'static str>>,
    },
}

pub async fn submit_form(
    State(state): State<AppState>,
    Json(request): Json<SubmitFormRequest>,
) -> impl IntoResponse {
    match validate(&request) {
        Ok(submission) => {
            tracing::info!(name = %submission.name, "form submission accepted");
            state.submissions.append(submission).await;
            Json(SubmitFormResponse::Accepted {
                success: true,
                message: "Form submitted successfully!",
            })
        }
        Err(errors) => {
            tracing::debug!(fields = errors.len(), "form submission rejected");
            Json(SubmitFormResponse::Rejected {
                success: false,
                errors,
            })
        }
    }
}

/// Field-level validation mirroring a model form: required text fields, an
/// email sanity check, and a closed choice set for the intensity. All field
/// errors are collected before the result is decided.
fn validate(
    request: &SubmitFormRequest,
) -> Result<Submission, BTreeMap<&'static str, Vec<&'static str>>> {
    let mut errors: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    let mut require = |field: &'static str, value: &str| {
        if value.trim().is_empty() {
            errors.entry(field).or_default().push(REQUIRED);
        }
    };

    require("name", &request.name);
    require("email", &request.email);
    require("phone", &request.phone);
    require("business_type", &request.business_type);

    let email = request.email.trim();
    if !email.is_empty() && !is_plausible_email(email) {
        errors.entry("email").or_default().push(INVALID_EMAIL);
    }

    let crowd_intensity = match request.crowd_intensity.trim().parse::<CrowdLevel>() {
        Ok(level) => Some(level),
        Err(_) => {
            let message = if request.crowd_intensity.trim().is_empty() {
                REQUIRED
            } else {
                INVALID_CHOICE
            };
            errors.entry("crowd_intensity").or_default().push(message);
            None
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Submission {
        name: request.name.trim().to_string(),
        email: email.to_string(),
        phone: request.phone.trim().to_string(),
        business_type: request.business_type.trim().to_string(),
        crowd_intensity: crowd_intensity.unwrap_or(CrowdLevel::Medium),
        latitude: request.latitude,
        longitude: request.longitude,
        created_at: Utc::now(),
    })
}

/// Lightweight shape check: one `@` with non-empty local part and a domain
/// containing a dot.
fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
