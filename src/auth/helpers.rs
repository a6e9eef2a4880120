use rusqlite::{params, Connection, OptionalExtension, Row};
use sha2::{Digest, Sha256};

use crate::data::new_id;
use crate::internal_error::{InternalError, InternalResult};

use super::data::*;

pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());

    hex::encode(hasher.finalize())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn get_profile_from_row(row: &Row) -> rusqlite::Result<UserProfile> {
    Ok(UserProfile {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: row.get(3)?,
    })
}

fn create_session(profile: UserProfile, db_connection: &Connection) -> InternalResult<Session> {
    let token = new_id();

    db_connection.execute(
        "INSERT INTO sessions (token, user_id) VALUES (?1, ?2)",
        params![token, profile.id],
    )?;

    Ok(Session { token, profile })
}

pub fn sign_up_user(request: SignupRequest, db_connection: &Connection) -> InternalResult<Session> {
    let email = normalize_email(&request.email);
    if email.is_empty() || request.password.is_empty() {
        return Err(InternalError::Invalid("Email and password are required.".to_string()));
    }
    if request.password != request.confirm_password {
        return Err(InternalError::Invalid("Passwords do not match.".to_string()));
    }

    let taken: Option<String> = db_connection
        .query_row("SELECT id FROM users WHERE email = (?1)", params![email], |row| row.get(0))
        .optional()?;
    if taken.is_some() {
        return Err(InternalError::Invalid("Email is already in use.".to_string()));
    }

    let name = match request.name.trim() {
        "" => None,
        name => Some(name.to_string()),
    };
    let profile = UserProfile {
        id: new_id(),
        name,
        email,
        role: request.role,
    };
    let salt = new_id();

    db_connection.execute(
        "INSERT INTO users (id, name, email, role, salt, password_hash) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            profile.id,
            profile.name,
            profile.email,
            profile.role,
            salt,
            hash_password(&salt, &request.password)
        ],
    )?;

    tracing::info!("new account {} ({})", profile.email, profile.role);

    create_session(profile, db_connection)
}

pub fn login_user(request: &LoginRequest, db_connection: &Connection) -> InternalResult<Session> {
    let email = normalize_email(&request.email);

    let stored = db_connection
        .query_row(
            "SELECT id, name, email, role, salt, password_hash FROM users WHERE email = (?1)",
            params![email],
            |row| Ok((get_profile_from_row(row)?, row.get::<_, String>(4)?, row.get::<_, String>(5)?)),
        )
        .optional()?;

    match stored {
        Some((profile, salt, password_hash)) if hash_password(&salt, &request.password) == password_hash => {
            create_session(profile, db_connection)
        }
        _ => {
            tracing::debug!("failed login for {}", email);
            Err(InternalError::Unauthorized("Invalid email or password.".to_string()))
        }
    }
}

pub fn logout_session(token: &str, db_connection: &Connection) -> InternalResult<bool> {
    let deleted = db_connection.execute("DELETE FROM sessions WHERE token = (?1)", params![token])?;

    Ok(deleted > 0)
}

pub fn get_user_for_token(token: &str, db_connection: &Connection) -> InternalResult<Option<UserProfile>> {
    let profile = db_connection
        .query_row(
            "SELECT users.id, users.name, users.email, users.role
             FROM sessions JOIN users ON users.id = sessions.user_id
             WHERE sessions.token = (?1)",
            params![token],
            get_profile_from_row,
        )
        .optional()?;

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_connection;

    fn signup(email: &str, password: &str, confirm: &str) -> SignupRequest {
        SignupRequest {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
            ..SignupRequest::default()
        }
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        let connection = test_connection();

        let e = sign_up_user(signup("ada@example.com", "hunter2", "hunter3"), &connection).unwrap_err();

        assert_eq!(e.to_string(), "Passwords do not match.");
    }

    #[test]
    fn signup_then_login() {
        let connection = test_connection();

        let session = sign_up_user(signup("Ada@Example.com ", "hunter2", "hunter2"), &connection).unwrap();
        assert_eq!(session.profile.email, "ada@example.com");
        assert_eq!(session.profile.role, UserRole::User);

        let again = login_user(&login("ada@example.com", "hunter2"), &connection).unwrap();
        assert_eq!(again.profile, session.profile);
        assert_ne!(again.token, session.token);
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let connection = test_connection();
        sign_up_user(signup("ada@example.com", "hunter2", "hunter2"), &connection).unwrap();

        let e = login_user(&login("ada@example.com", "nope"), &connection).unwrap_err();
        assert!(matches!(e, InternalError::Unauthorized(_)));

        let e = login_user(&login("bob@example.com", "hunter2"), &connection).unwrap_err();
        assert!(matches!(e, InternalError::Unauthorized(_)));
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let connection = test_connection();
        sign_up_user(signup("ada@example.com", "a", "a"), &connection).unwrap();

        assert!(sign_up_user(signup("ADA@example.com", "b", "b"), &connection).is_err());
    }

    #[test]
    fn logout_ends_session() {
        let connection = test_connection();
        let session = sign_up_user(signup("ada@example.com", "a", "a"), &connection).unwrap();

        assert_eq!(
            get_user_for_token(&session.token, &connection).unwrap(),
            Some(session.profile.clone())
        );
        assert!(logout_session(&session.token, &connection).unwrap());
        assert_eq!(get_user_for_token(&session.token, &connection).unwrap(), None);
    }

    #[test]
    fn salt_changes_hash() {
        assert_ne!(hash_password("a", "pw"), hash_password("b", "pw"));
        assert_eq!(hash_password("a", "pw").len(), 64);
    }
}
