use crate::{deserialize_null_string, Client, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fetch all members of the client's workspace whose `field` matches the
/// given value. The server does the filtering; the returned match set
/// preserves the server's ordering.
pub async fn search(client: &Client, field: &str, value: &str) -> Result<MatchSet> {
    tracing::debug!(field, value, "searching members");
    client
        .fetch(
            &format!("/api/v1/{}/members", client.workspace()),
            &[(field, value)],
        )
        .await
}

/// Set a single field on the given member to a new value. This is an
/// unconditional write; the current value of the field is not consulted.
pub async fn update_field(client: &Client, member_id: &str, field: &str, value: &str) -> Result {
    tracing::debug!(member_id, field, "updating member");
    let body = HashMap::from([(field, value)]);
    client
        .put(
            &format!("/api/v1/{}/members/{member_id}", client.workspace()),
            &body,
        )
        .await
}

/// The ordered result of one member search.
///
/// Member attributes are kept as raw json per record so a single
/// malformed record can be skipped without discarding the whole set.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MatchSet {
    pub data: Vec<MemberRecord>,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MemberRecord {
    #[serde(default)]
    pub attributes: serde_json::Value,
}

impl MemberRecord {
    /// Parse this record's attributes into a typed member.
    pub fn member(&self) -> Result<Member> {
        serde_json::from_value(self.attributes.clone()).map_err(crate::Error::from)
    }

    /// Project a single string attribute out of the raw record. Missing
    /// and null attributes project as the empty string.
    pub fn attribute(&self, name: &str) -> &str {
        self.attributes
            .get(name)
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Default)]
pub struct Member {
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub id: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub name: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub email: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub title: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub avatar_url: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub bio: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub birthday: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub company: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub location: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub teammate: bool,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub url: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub orbit_url: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub twitter: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub github: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub discourse: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub discord: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub devto: String,
    #[serde(
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "deserialize_null_string::deserialize"
    )]
    pub linkedin: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_set_preserves_order_and_nulls() {
        let body = serde_json::json!({
            "data": [
                { "attributes": { "id": "1", "name": "Mia", "company": null } },
                { "attributes": { "id": "2", "name": "Lee", "company": "Acme",
                                  "tags": ["dev", "speaker"] } },
            ]
        });
        let matches: MatchSet = serde_json::from_value(body).unwrap();
        assert_eq!(matches.len(), 2);

        let first = matches.data[0].member().unwrap();
        assert_eq!(first.id, "1");
        assert_eq!(first.company, "");

        let second = matches.data[1].member().unwrap();
        assert_eq!(second.id, "2");
        assert_eq!(second.tags, vec!["dev", "speaker"]);
    }

    #[test]
    fn malformed_record_fails_alone() {
        let body = serde_json::json!({
            "data": [
                { "attributes": "not an object" },
                { "attributes": { "id": "2", "email": "lee@example.com" } },
            ]
        });
        let matches: MatchSet = serde_json::from_value(body).unwrap();
        assert!(matches.data[0].member().is_err());
        assert_eq!(matches.data[1].member().unwrap().email, "lee@example.com");
    }

    #[test]
    fn attribute_projection() {
        let record: MemberRecord = serde_json::from_value(serde_json::json!({
            "attributes": { "company": "Acme", "location": null }
        }))
        .unwrap();
        assert_eq!(record.attribute("company"), "Acme");
        assert_eq!(record.attribute("location"), "");
        assert_eq!(record.attribute("missing"), "");
    }

    #[test]
    fn member_without_id_parses_empty() {
        let record: MemberRecord =
            serde_json::from_value(serde_json::json!({ "attributes": { "name": "Mia" } })).unwrap();
        let member = record.member().unwrap();
        assert!(member.id.is_empty());
    }
}
