use rocket::figment::Figment;
use rocket::fs::FileServer;
use rocket::{routes, Build, Rocket};

use std::sync::{Arc, Mutex};

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod events;
pub mod ideas;
pub mod internal_error;
pub mod milestones;
pub mod projects;
pub mod resources;
pub mod storage;
pub mod submission;
pub mod tasks;
pub mod team;

use config::AppConfig;
use data::{open_database, DBConnection};
use events::ChangeBus;
use internal_error::InternalResult;

pub fn build_rocket(figment: Figment) -> InternalResult<Rocket<Build>> {
    let config = AppConfig::from_figment(&figment)?;

    let connection = open_database(&config.database_path)?;
    let connection: DBConnection = Arc::new(Mutex::new(connection));
    tracing::info!("using database {}", config.database_path.display());

    let rocket = rocket::custom(figment)
        .manage(connection)
        .manage(ChangeBus::new(config.event_capacity))
        .mount(
            "/api",
            routes![
                projects::endpoints::get_projects,
                projects::endpoints::project_events,
                projects::endpoints::add_project,
                projects::endpoints::edit_project,
                projects::endpoints::delete_project,
                milestones::endpoints::get_milestones,
                milestones::endpoints::milestone_events,
                milestones::endpoints::save_milestone,
                milestones::endpoints::delete_milestone,
                milestones::endpoints::add_milestone_step,
                milestones::endpoints::toggle_milestone_step,
                milestones::endpoints::complete_milestone,
                tasks::endpoints::get_tasks,
                tasks::endpoints::get_task_board,
                tasks::endpoints::task_events,
                tasks::endpoints::task_board_events,
                tasks::endpoints::add_task,
                tasks::endpoints::move_task_status,
                tasks::endpoints::delete_task,
                tasks::endpoints::reset_tasks,
                ideas::endpoints::get_ideas,
                ideas::endpoints::idea_events,
                ideas::endpoints::add_idea,
                ideas::endpoints::vote_idea,
                ideas::endpoints::pin_idea,
                ideas::endpoints::delete_idea,
                ideas::endpoints::get_categories,
                ideas::endpoints::add_category,
                resources::endpoints::get_resources,
                resources::endpoints::get_resource_categories,
                resources::endpoints::resource_events,
                resources::endpoints::add_resource,
                resources::endpoints::rate_resource,
                resources::endpoints::delete_resource,
                team::endpoints::get_team,
                team::endpoints::team_events,
                team::endpoints::invite_member,
                team::endpoints::remove_member,
                submission::endpoints::get_submission,
                submission::endpoints::submission_events,
                submission::endpoints::save_submission,
                submission::endpoints::submit_project,
                submission::endpoints::get_showcase,
                submission::endpoints::showcase_events,
                dashboard::endpoints::get_dashboard,
                dashboard::endpoints::dashboard_events,
                storage::endpoints::get_entry,
                storage::endpoints::set_entry,
                storage::endpoints::entry_events,
                auth::endpoints::signup,
                auth::endpoints::login,
                auth::endpoints::logout,
                auth::endpoints::me,
            ],
        );

    let rocket = match config.static_dir {
        Some(static_dir) if static_dir.is_dir() => rocket.mount("/", FileServer::from(static_dir).rank(15)),
        Some(static_dir) => {
            tracing::warn!("static_dir {} is not a directory, not serving it", static_dir.display());
            rocket
        }
        None => rocket,
    };

    Ok(rocket)
}
