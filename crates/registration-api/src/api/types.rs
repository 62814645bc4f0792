//! API request and response types.

use crate::store::Registration;
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

/// An incoming registration submission.
///
/// Every field is defaulted so that body extraction never rejects on a
/// missing field; required-field enforcement is the store's job. Field names
/// follow the public form (`regId`, `g-recaptcha-response`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSubmission {
    #[serde(default)]
    pub reg_id: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub contact: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub college: String,

    #[serde(default)]
    pub department: String,

    #[serde(default)]
    pub year: String,

    #[serde(default, deserialize_with = "string_or_list")]
    pub events: Vec<String>,

    #[serde(default, deserialize_with = "string_or_list")]
    pub workshops: Vec<String>,

    #[serde(default)]
    pub accommodation: bool,

    /// Human-verification proof produced by the challenge widget.
    #[serde(default, rename = "g-recaptcha-response")]
    pub recaptcha_response: Option<String>,
}

impl RegisterSubmission {
    /// Build the in-memory registration, assigning the generated token.
    /// The store merges in its own timestamp at save time.
    pub fn into_registration(self, token: String) -> Registration {
        Registration {
            reg_id: self.reg_id,
            email: self.email,
            contact: self.contact,
            name: self.name,
            college: self.college,
            department: self.department,
            year: self.year,
            events: self.events,
            workshops: self.workshops,
            accommodation: self.accommodation,
            token,
            registered_at: Utc::now(),
        }
    }
}

/// Accept either a JSON array of strings or a single comma-separated string
/// (the urlencoded form cannot carry real arrays).
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrList;

    impl<'de> serde::de::Visitor<'de> for StringOrList {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a list of strings or a comma-separated string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::SeqAccess<'de>,
        {
            let mut items = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                items.push(item);
            }
            Ok(items)
        }
    }

    deserializer.deserialize_any(StringOrList)
}

/// Root endpoint payload.
#[derive(Debug, Serialize)]
pub struct DescribeResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub registrations: usize,
}
