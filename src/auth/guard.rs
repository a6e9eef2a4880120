use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::State;

use crate::data::DBConnection;
use crate::internal_error::InternalError;
use crate::tasks::data::Assignee;

use super::data::UserProfile;
use super::helpers::get_user_for_token;

/// The signed-in user behind an `Authorization: Bearer <token>` header.
/// Routes take `Option<CurrentUser>` since nothing requires a login.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub token: String,
    pub profile: UserProfile,
}

impl CurrentUser {
    /// How this user appears on tasks they create.
    pub fn assignee(&self) -> Assignee {
        let name = match &self.profile.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ if !self.profile.email.is_empty() => self.profile.email.clone(),
            _ => Assignee::anonymous().name,
        };

        Assignee {
            id: self.profile.id.clone(),
            name,
        }
    }
}

fn bearer_token<'r>(request: &'r Request<'_>) -> Option<&'r str> {
    request
        .headers()
        .get_one("Authorization")?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CurrentUser {
    type Error = InternalError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = match bearer_token(request) {
            Some(token) => token.to_string(),
            None => return Outcome::Forward(Status::Unauthorized),
        };

        let db_connection = match request.guard::<&State<DBConnection>>().await {
            Outcome::Success(db_connection) => db_connection,
            _ => {
                return Outcome::Error((
                    Status::InternalServerError,
                    InternalError::from("database is not managed"),
                ))
            }
        };

        let lookup = db_connection
            .lock()
            .map_err(InternalError::from)
            .and_then(|connection| get_user_for_token(&token, &connection));

        match lookup {
            Ok(Some(profile)) => Outcome::Success(CurrentUser { token, profile }),
            Ok(None) => Outcome::Forward(Status::Unauthorized),
            Err(e) => Outcome::Error((e.status(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::data::UserRole;

    fn user(name: Option<&str>, email: &str) -> CurrentUser {
        CurrentUser {
            token: "t".to_string(),
            profile: UserProfile {
                id: "u1".to_string(),
                name: name.map(str::to_string),
                email: email.to_string(),
                role: UserRole::User,
            },
        }
    }

    #[test]
    fn assignee_prefers_name_then_email() {
        assert_eq!(user(Some("Ada"), "ada@example.com").assignee().name, "Ada");
        assert_eq!(user(None, "ada@example.com").assignee().name, "ada@example.com");
        assert_eq!(user(Some(" "), "").assignee().name, "Anonymous Member");
        assert_eq!(user(None, "").assignee().id, "u1");
    }
}
