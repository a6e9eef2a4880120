use serde::{Deserialize, Serialize};

use crate::data::text_enum;

pub type MemberID = i64;

text_enum! {
    MemberRole {
        Lead => "lead",
        Dev => "dev",
        Designer => "designer",
    }
}

impl Default for MemberRole {
    fn default() -> Self {
        MemberRole::Dev
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub id: MemberID,
    pub name: String,
    pub role: MemberRole,
    pub email: String,
}

#[derive(Deserialize, Debug)]
pub struct InviteRequest {
    pub email: String,
    #[serde(default)]
    pub role: MemberRole,
}
