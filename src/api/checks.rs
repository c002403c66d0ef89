//! Form-field validation endpoints

use axum::{Json, extract::Query};
use serde::Deserialize;

use crate::admin::{FormValidation, check_token, check_website};

#[derive(Debug, Deserialize)]
pub struct FieldQuery {
    #[serde(default)]
    pub value: String,
}

/// GET /check/token?value=
pub async fn check_token_field(Query(query): Query<FieldQuery>) -> Json<FormValidation> {
    Json(check_token(&query.value))
}

/// GET /check/website?value=
pub async fn check_website_field(Query(query): Query<FieldQuery>) -> Json<FormValidation> {
    Json(check_website(&query.value))
}
