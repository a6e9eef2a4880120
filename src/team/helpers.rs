use rusqlite::{params, Connection};

use crate::internal_error::InternalResult;

use super::data::*;

pub fn get_team_from_db(project_id: &str, db_connection: &Connection) -> InternalResult<Vec<TeamMember>> {
    let mut statement = db_connection.prepare(
        "SELECT rowid, name, role, email FROM team_members WHERE project_id = (?1) ORDER BY rowid ASC",
    )?;

    let members = statement
        .query_map(params![project_id], |row| {
            Ok(TeamMember {
                id: row.get(0)?,
                name: row.get(1)?,
                role: row.get(2)?,
                email: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<TeamMember>>>()?;

    Ok(members)
}

/// Invited members show up under their e-mail until they pick a name.
pub fn invite_member_to_db(
    project_id: &str,
    invite: &InviteRequest,
    db_connection: &Connection,
) -> InternalResult<Option<TeamMember>> {
    let email = invite.email.trim();
    if email.is_empty() {
        return Ok(None);
    }

    db_connection.execute(
        "INSERT INTO team_members (project_id, name, role, email) VALUES (?1, ?2, ?3, ?4)",
        params![project_id, email, invite.role, email],
    )?;

    Ok(Some(TeamMember {
        id: db_connection.last_insert_rowid(),
        name: email.to_string(),
        role: invite.role,
        email: email.to_string(),
    }))
}

pub fn remove_member_from_db(
    project_id: &str,
    member_id: MemberID,
    db_connection: &Connection,
) -> InternalResult<bool> {
    let deleted = db_connection.execute(
        "DELETE FROM team_members WHERE project_id = (?1) AND rowid = (?2)",
        params![project_id, member_id],
    )?;

    Ok(deleted > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_connection;

    #[test]
    fn invite_uses_email_as_name() {
        let connection = test_connection();
        let invite = InviteRequest {
            email: " alex@example.com ".to_string(),
            role: MemberRole::Designer,
        };

        let member = invite_member_to_db("p1", &invite, &connection).unwrap().unwrap();

        assert_eq!(member.name, "alex@example.com");
        assert_eq!(member.role, MemberRole::Designer);
        assert_eq!(get_team_from_db("p1", &connection).unwrap(), vec![member]);
    }

    #[test]
    fn blank_invite_is_ignored() {
        let connection = test_connection();
        let invite = InviteRequest {
            email: "   ".to_string(),
            role: MemberRole::Dev,
        };

        assert!(invite_member_to_db("p1", &invite, &connection).unwrap().is_none());
    }

    #[test]
    fn role_defaults_to_dev() {
        let invite: InviteRequest = serde_json::from_str(r#"{"email": "sam@example.com"}"#).unwrap();

        assert_eq!(invite.role, MemberRole::Dev);
    }

    #[test]
    fn remove_member() {
        let connection = test_connection();
        let invite = InviteRequest {
            email: "jordan@example.com".to_string(),
            role: MemberRole::Lead,
        };
        let member = invite_member_to_db("p1", &invite, &connection).unwrap().unwrap();

        assert!(remove_member_from_db("p1", member.id, &connection).unwrap());
        assert!(get_team_from_db("p1", &connection).unwrap().is_empty());
    }
}
