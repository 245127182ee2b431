use crate::Result;
use orbit::members::{self, MatchSet};

/// Run the field-update workflow: for each search value, locate matching
/// members and, when a new value was given, apply the update to every
/// match. A failed search aborts the run; the mutation tally is summed
/// here across all search values and reported once at the end.
pub async fn run(
    client: &orbit::Client,
    field: &str,
    new_value: Option<&str>,
    search_values: &[String],
) -> Result {
    let mut tally = 0;
    for value in search_values {
        println!("Checking for members with {field}: {value}");
        let matches = members::search(client, field, value).await?;
        println!("Number of matching members: {}", matches.len());
        if matches.is_empty() {
            continue;
        }
        if let Some(new_value) = new_value {
            tally += apply_update(client, &matches, field, new_value).await;
        }
    }
    println!("\n===\nNumber Of Members Updated: {tally}");
    Ok(())
}

/// Applies a single-field update to one member. The orbit client is the
/// real implementation; tests substitute a stub.
pub(crate) trait UpdateMembers {
    async fn update_field(&self, member_id: &str, field: &str, value: &str) -> orbit::Result;
}

impl UpdateMembers for orbit::Client {
    async fn update_field(&self, member_id: &str, field: &str, value: &str) -> orbit::Result {
        members::update_field(self, member_id, field, value).await
    }
}

/// Apply the update to every member of the match set, in order, and
/// return how many succeeded. One member's failure never stops the rest
/// of the batch: it is reported and the loop moves on.
pub(crate) async fn apply_update<U: UpdateMembers>(
    updater: &U,
    matches: &MatchSet,
    field: &str,
    new_value: &str,
) -> usize {
    let mut updated = 0;
    for record in &matches.data {
        let member = match record.member() {
            Ok(member) => member,
            Err(err) => {
                tracing::warn!(%err, "skipping member record that failed to parse");
                continue;
            }
        };
        if member.id.is_empty() {
            tracing::warn!(name = %member.name, "skipping member record without an id");
            continue;
        }
        println!("Member Name: {}", member.name);
        println!("Member Email: {}", member.email);
        println!("Member ID: {}", member.id);
        match updater.update_field(&member.id, field, new_value).await {
            Ok(()) => {
                println!("{field} changed to: {new_value}");
                updated += 1;
            }
            Err(err) => {
                println!("Error: {err}");
            }
        }
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubUpdater {
        fail_ids: Vec<&'static str>,
        attempted: Mutex<Vec<String>>,
    }

    impl StubUpdater {
        fn failing(fail_ids: Vec<&'static str>) -> Self {
            Self {
                fail_ids,
                ..Default::default()
            }
        }

        fn attempted(&self) -> Vec<String> {
            self.attempted.lock().unwrap().clone()
        }
    }

    impl UpdateMembers for StubUpdater {
        async fn update_field(&self, member_id: &str, _field: &str, _value: &str) -> orbit::Result {
            self.attempted.lock().unwrap().push(member_id.to_string());
            if self.fail_ids.contains(&member_id) {
                Err(orbit::Error::status(orbit::StatusCode::UNPROCESSABLE_ENTITY))
            } else {
                Ok(())
            }
        }
    }

    fn match_set(body: serde_json::Value) -> MatchSet {
        serde_json::from_value(body).unwrap()
    }

    fn three_members() -> MatchSet {
        match_set(serde_json::json!({
            "data": [
                { "attributes": { "id": "1", "name": "Mia", "email": "mia@acme.com" } },
                { "attributes": { "id": "2", "name": "Lee", "email": "lee@acme.com" } },
                { "attributes": { "id": "3", "name": "Sam", "email": "sam@acme.com" } },
            ]
        }))
    }

    #[tokio::test]
    async fn empty_match_set_issues_no_updates() {
        let updater = StubUpdater::default();
        let matches = match_set(serde_json::json!({ "data": [] }));
        let updated = apply_update(&updater, &matches, "company", "Acme Inc").await;
        assert_eq!(updated, 0);
        assert!(updater.attempted().is_empty());
    }

    #[tokio::test]
    async fn every_success_counts() {
        let updater = StubUpdater::default();
        let updated = apply_update(&updater, &three_members(), "company", "Acme Inc").await;
        assert_eq!(updated, 3);
        assert_eq!(updater.attempted(), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_batch() {
        let updater = StubUpdater::failing(vec!["2"]);
        let updated = apply_update(&updater, &three_members(), "company", "Acme Inc").await;
        assert_eq!(updated, 2);
        // All members are still attempted, in order.
        assert_eq!(updater.attempted(), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn all_failures_leave_the_tally_at_zero() {
        let updater = StubUpdater::failing(vec!["1", "2", "3"]);
        let updated = apply_update(&updater, &three_members(), "company", "Acme Inc").await;
        assert_eq!(updated, 0);
        assert_eq!(updater.attempted().len(), 3);
    }

    #[tokio::test]
    async fn unparseable_and_id_less_records_are_skipped() {
        let updater = StubUpdater::default();
        let matches = match_set(serde_json::json!({
            "data": [
                { "attributes": "not an object" },
                { "attributes": { "name": "No Id" } },
                { "attributes": { "id": "3", "name": "Sam" } },
            ]
        }));
        let updated = apply_update(&updater, &matches, "company", "Acme Inc").await;
        assert_eq!(updated, 1);
        assert_eq!(updater.attempted(), vec!["3"]);
    }
}
