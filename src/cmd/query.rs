use super::print_json;
use crate::{request::Projection, Result};
use orbit::members::{self, MatchSet};

/// Run a query-mode search. With a projection, one attribute of every
/// matched member is printed per line; without one the raw match payload
/// is printed. Read-only either way.
pub async fn run(client: &orbit::Client, query: &str, projection: Option<Projection>) -> Result {
    let matches = members::search(client, "query", query).await?;
    match projection {
        Some(projection) => {
            if matches.is_empty() {
                println!("No members for query: {query}");
                return Ok(());
            }
            for value in project(&matches, projection) {
                println!("\"{value}\"");
            }
            Ok(())
        }
        None => print_json(&matches),
    }
}

fn project(matches: &MatchSet, projection: Projection) -> Vec<String> {
    matches
        .data
        .iter()
        .map(|record| record.attribute(projection.attribute()).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_set(body: serde_json::Value) -> MatchSet {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn projects_one_value_per_match_in_order() {
        let matches = match_set(serde_json::json!({
            "data": [
                { "attributes": { "id": "1", "company": "A", "location": "Lisbon" } },
                { "attributes": { "id": "2", "company": "B" } },
            ]
        }));
        assert_eq!(project(&matches, Projection::Company), vec!["A", "B"]);
        assert_eq!(project(&matches, Projection::Location), vec!["Lisbon", ""]);
    }

    #[test]
    fn projects_nothing_from_an_empty_match_set() {
        let matches = match_set(serde_json::json!({ "data": [] }));
        assert!(project(&matches, Projection::Company).is_empty());
    }
}
