use serde::{Deserialize, Serialize};

use crate::data::text_enum;

pub type UserID = String;

text_enum! {
    UserRole {
        User => "user",
        Organizer => "organizer",
    }
}

impl Default for UserRole {
    fn default() -> UserRole {
        UserRole::User
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserID,
    pub name: Option<String>,
    pub email: String,
    pub role: UserRole,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub profile: UserProfile,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: UserRole,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
