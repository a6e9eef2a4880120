use rusqlite::{params, Connection, Row};

use crate::internal_error::InternalResult;

use super::data::*;

/// The star count as stored, or `None` outside one to five.
pub fn checked_rating(rating: i64) -> Option<u8> {
    u8::try_from(rating)
        .ok()
        .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
}

/// Every field filled in and a rating between one and five stars.
pub fn is_complete(resource: &NewResource) -> bool {
    [
        &resource.name,
        &resource.description,
        &resource.url,
        &resource.category,
    ]
    .iter()
    .all(|field| !field.trim().is_empty())
        && checked_rating(resource.rating).is_some()
}

pub fn matches_filter(resource: &Resource, category: Option<&str>, search: &str) -> bool {
    let in_category = match category {
        None | Some(ALL_CATEGORIES) => true,
        Some(category) => resource.category == category,
    };

    in_category && resource.name.to_lowercase().contains(&search.to_lowercase())
}

pub fn filter_resources(resources: Vec<Resource>, category: Option<&str>, search: &str) -> Vec<Resource> {
    resources
        .into_iter()
        .filter(|resource| matches_filter(resource, category, search))
        .collect()
}

/// `All` followed by each category in order of first appearance.
pub fn resource_categories(resources: &[Resource]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];

    for resource in resources {
        if !categories.contains(&resource.category) {
            categories.push(resource.category.clone());
        }
    }

    categories
}

pub fn get_resource_from_row(row: &Row) -> rusqlite::Result<Resource> {
    Ok(Resource {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        url: row.get(3)?,
        category: row.get(4)?,
        rating: row.get(5)?,
    })
}

pub fn get_resources_from_db(project_id: &str, db_connection: &Connection) -> InternalResult<Vec<Resource>> {
    let mut statement = db_connection.prepare(
        "SELECT rowid, name, description, url, category, rating
         FROM resources WHERE project_id = (?1) ORDER BY rowid ASC",
    )?;

    let resources = statement
        .query_map(params![project_id], get_resource_from_row)?
        .collect::<rusqlite::Result<Vec<Resource>>>()?;

    Ok(resources)
}

pub fn add_resource_to_db(
    project_id: &str,
    resource: NewResource,
    db_connection: &Connection,
) -> InternalResult<Option<Resource>> {
    let rating = match checked_rating(resource.rating) {
        Some(rating) if is_complete(&resource) => rating,
        _ => return Ok(None),
    };

    let resource = Resource {
        id: 0,
        name: resource.name.trim().to_string(),
        description: resource.description.trim().to_string(),
        url: resource.url.trim().to_string(),
        category: resource.category.trim().to_string(),
        rating,
    };

    db_connection.execute(
        "INSERT INTO resources (project_id, name, description, url, category, rating)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            project_id,
            resource.name,
            resource.description,
            resource.url,
            resource.category,
            resource.rating
        ],
    )?;

    Ok(Some(Resource {
        id: db_connection.last_insert_rowid(),
        ..resource
    }))
}

pub fn rate_resource_in_db(
    project_id: &str,
    resource_id: ResourceID,
    rating: i64,
    db_connection: &Connection,
) -> InternalResult<bool> {
    let rating = match checked_rating(rating) {
        Some(rating) => rating,
        None => return Ok(false),
    };

    let updated = db_connection.execute(
        "UPDATE resources SET rating = (?1) WHERE project_id = (?2) AND rowid = (?3)",
        params![rating, project_id, resource_id],
    )?;

    Ok(updated > 0)
}

pub fn delete_resource_from_db(
    project_id: &str,
    resource_id: ResourceID,
    db_connection: &Connection,
) -> InternalResult<bool> {
    let deleted = db_connection.execute(
        "DELETE FROM resources WHERE project_id = (?1) AND rowid = (?2)",
        params![project_id, resource_id],
    )?;

    Ok(deleted > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_connection;

    fn new_resource(name: &str, category: &str, rating: i64) -> NewResource {
        NewResource {
            name: name.to_string(),
            description: "docs".to_string(),
            url: "https://example.com".to_string(),
            category: category.to_string(),
            rating,
        }
    }

    fn resource(id: i64, name: &str, category: &str) -> Resource {
        Resource {
            id,
            name: name.to_string(),
            description: String::new(),
            url: String::new(),
            category: category.to_string(),
            rating: 3,
        }
    }

    #[test]
    fn incomplete_resources_are_rejected() {
        assert!(is_complete(&new_resource("Stripe", "APIs", 4)));
        assert!(!is_complete(&new_resource("Stripe", "APIs", 0)));
        assert!(!is_complete(&new_resource("Stripe", "APIs", 6)));
        assert!(!is_complete(&new_resource("  ", "APIs", 4)));
        assert!(!is_complete(&new_resource("Stripe", "", 4)));
    }

    #[test]
    fn ratings_beyond_a_byte_are_out_of_range() {
        assert_eq!(checked_rating(1), Some(1));
        assert_eq!(checked_rating(5), Some(5));
        for rating in [0, 6, 256, 300, -1, i64::MIN] {
            assert_eq!(checked_rating(rating), None);
        }
    }

    #[test]
    fn out_of_range_rating_adds_nothing() {
        let connection = test_connection();

        for rating in [0, 6, 300, -1] {
            let added = add_resource_to_db("p1", new_resource("Stripe", "APIs", rating), &connection).unwrap();
            assert!(added.is_none());
        }

        assert!(get_resources_from_db("p1", &connection).unwrap().is_empty());
    }

    #[test]
    fn filter_by_category_and_case_insensitive_name() {
        let resources = vec![
            resource(1, "Stripe API", "APIs"),
            resource(2, "Figma", "Design"),
            resource(3, "OpenAI api", "APIs"),
        ];

        let ids = |found: Vec<Resource>| found.into_iter().map(|r| r.id).collect::<Vec<_>>();

        assert_eq!(ids(filter_resources(resources.clone(), None, "")), vec![1, 2, 3]);
        assert_eq!(ids(filter_resources(resources.clone(), Some("All"), "API")), vec![1, 3]);
        assert_eq!(ids(filter_resources(resources.clone(), Some("APIs"), "open")), vec![3]);
        assert_eq!(ids(filter_resources(resources, Some("Design"), "api")), Vec::<i64>::new());
    }

    #[test]
    fn categories_keep_first_appearance_order() {
        let resources = vec![
            resource(1, "a", "Tools"),
            resource(2, "b", "APIs"),
            resource(3, "c", "Tools"),
        ];

        assert_eq!(resource_categories(&resources), vec!["All", "Tools", "APIs"]);
    }

    #[test]
    fn rating_outside_range_is_ignored() {
        let connection = test_connection();
        let added = add_resource_to_db("p1", new_resource("Vercel", "Hosting", 3), &connection)
            .unwrap()
            .unwrap();

        for rating in [0, 6, 300, -1] {
            assert!(!rate_resource_in_db("p1", added.id, rating, &connection).unwrap());
        }
        assert!(rate_resource_in_db("p1", added.id, 5, &connection).unwrap());

        let stored = get_resources_from_db("p1", &connection).unwrap();
        assert_eq!(stored[0].rating, 5);
        assert_eq!(stored[0].name, "Vercel");
    }

    #[test]
    fn delete_is_project_scoped() {
        let connection = test_connection();
        let added = add_resource_to_db("p1", new_resource("Vercel", "Hosting", 3), &connection)
            .unwrap()
            .unwrap();

        assert!(!delete_resource_from_db("p2", added.id, &connection).unwrap());
        assert!(delete_resource_from_db("p1", added.id, &connection).unwrap());
        assert!(get_resources_from_db("p1", &connection).unwrap().is_empty());
    }
}
