use serde::{Deserialize, Serialize};

/// Body of `POST /businesses`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewBusiness {
    pub legal_name: String,
    pub sponsor_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formation_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

/// Partial patch for `PATCH /businesses/:id`; unset fields are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BusinessUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Business {
    #[serde(alias = "id")]
    pub business_id: String,
    #[serde(default)]
    pub legal_name: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub sponsor_email: Option<String>,
    #[serde(rename = "type", default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub formation_state: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub sponsor_verification_sent: Option<bool>,
    #[serde(default)]
    pub estimated_completion: Option<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LlcStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub file_number: Option<String>,
    #[serde(default)]
    pub filed_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EinStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub estimated_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BankAccountStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub routing: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub estimated_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SponsorVerification {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub verification_status: Option<String>,
}

/// `GET /businesses/:id/status` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessStatus {
    pub business_id: String,
    #[serde(default, alias = "legal_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub llc: Option<LlcStatus>,
    #[serde(default)]
    pub ein: Option<EinStatus>,
    #[serde(default)]
    pub bank_account: Option<BankAccountStatus>,
    #[serde(default)]
    pub sponsor: Option<SponsorVerification>,
}
