use serde::{Deserialize, Serialize};

/// Identity of the logged-in user as returned by the login endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Payload of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LoginData {
    pub token: String,
    #[serde(rename = "userInfo")]
    pub user_info: UserInfo,
}

/// Which username is remembered. The password lives in the keychain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RememberedUser {
    pub username: String,
}

/// Credentials kept for pre-filling the next login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RememberedLogin {
    pub username: String,
    pub password: String,
}
