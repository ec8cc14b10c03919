use serde::{Deserialize, Serialize};

/// Body of `POST /agents`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterAgent {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentUser {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Registration response: the issued credential pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentRegistration {
    #[serde(default)]
    pub user: Option<AgentUser>,
    pub public_key: String,
    pub secret_key: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl AgentRegistration {
    /// Bearer credential in `<public>:<secret>` form.
    pub fn api_key(&self) -> String {
        format!("{}:{}", self.public_key, self.secret_key)
    }

    /// First eight characters of the secret, for display.
    pub fn secret_preview(&self) -> String {
        let prefix: String = self.secret_key.chars().take(8).collect();
        format!("{}...", prefix)
    }
}
