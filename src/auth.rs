use serde::{Deserialize, Serialize};

/// Authentication modes understood by the connector platform.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthType {
  None,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct AuthTypeResponse {
  #[serde(rename = "type")]
  pub auth_type: AuthType,
}

/// The connector needs no credentials of its own; the host platform handles auth.
pub const fn get_auth_type() -> AuthTypeResponse {
  AuthTypeResponse {
    auth_type: AuthType::None,
  }
}
