use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::data::DBConnection;
use crate::internal_error::{InternalError, InternalResult};

use super::data::*;
use super::guard::CurrentUser;
use super::helpers::*;

#[post("/auth/signup", format = "json", data = "<request>")]
pub fn signup(request: Json<SignupRequest>, db_connection: &State<DBConnection>) -> InternalResult<Json<Session>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(sign_up_user(request.into_inner(), &db_connection)?))
}

#[post("/auth/login", format = "json", data = "<request>")]
pub fn login(request: Json<LoginRequest>, db_connection: &State<DBConnection>) -> InternalResult<Json<Session>> {
    let db_connection = db_connection.lock()?;

    Ok(Json(login_user(&request, &db_connection)?))
}

#[post("/auth/logout")]
pub fn logout(user: Option<CurrentUser>, db_connection: &State<DBConnection>) -> InternalResult<()> {
    if let Some(user) = user {
        let db_connection = db_connection.lock()?;
        logout_session(&user.token, &db_connection)?;
    }

    Ok(())
}

#[get("/auth/me")]
pub fn me(user: Option<CurrentUser>) -> InternalResult<Json<UserProfile>> {
    match user {
        Some(user) => Ok(Json(user.profile)),
        None => Err(InternalError::Unauthorized("Not signed in.".to_string())),
    }
}
