use serde::{Deserialize, Serialize};

/// Body of `POST /sponsors` (fetch-or-create by email).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSponsor {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sponsor {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub verification_status: Option<String>,
}
