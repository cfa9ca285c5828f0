//! Breach lookup model: request validation, wire types, and the API port.

use async_trait::async_trait;
use serde::Deserialize;

use crate::Result;

/// A candidate email that passed the loose `@` + `.` check.
///
/// The check is intentionally shallow: anything containing both characters
/// is forwarded to the API as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupRequest {
    candidate_email: String,
}

/// Rejected input, carrying the trimmed text the user sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidEmail(pub String);

impl LookupRequest {
    pub fn parse(raw: &str) -> std::result::Result<Self, InvalidEmail> {
        let email = raw.trim();
        if !email.contains('@') || !email.contains('.') {
            return Err(InvalidEmail(email.to_string()));
        }
        Ok(Self {
            candidate_email: email.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.candidate_email
    }
}

/// One breach as returned by `GET /api/v3/breachedaccount/{account}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BreachRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub breach_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data_classes: Vec<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_verified: bool,
}

fn null_as_empty<'de, D>(d: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(d)?.unwrap_or_default())
}

fn null_as_false<'de, D>(d: D) -> std::result::Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(d)?.unwrap_or(false))
}

/// Outcome of a completed HTTP exchange with the breach API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupResult {
    /// HTTP 404: the account is not in any breach.
    NoBreach,
    /// HTTP 200: breaches in the order the API returned them.
    Breaches(Vec<BreachRecord>),
    /// Any other status, with the raw body.
    ApiError { status: u16, body: String },
}

/// Port for the breach database.
///
/// `Err` means the exchange itself failed (transport fault or an unparseable
/// 200 body); every HTTP status the server actually answered with is an `Ok`.
#[async_trait]
pub trait BreachApi: Send + Sync {
    async fn breached_account(&self, request: &LookupRequest) -> Result<LookupResult>;
}
