//! Typed payloads exchanged with the backend.
//!
//! Only the fields the client actually reads are typed; everything else in
//! a response body is ignored on deserialization.

use serde::{Deserialize, Serialize};

/// Authenticated user identity as returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Login credentials posted to `/login`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Success body of `POST /login`: `{data: {user}, message}`.
///
/// Note the nesting: login wraps the user in a `data` envelope while
/// `GET /user` returns the bare identity. The session store preserves
/// that asymmetry.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginEnvelope {
    pub data: LoginData,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginData {
    pub user: User,
}

/// One record of `GET /ufs`: a federative-unit code plus display label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UfRecord {
    pub sigla: String,
    pub label: String,
}

/// An antenna record. List endpoints may return sparse objects, so every
/// field is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Antenna {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub deployment_date: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Pagination metadata attached to the antenna list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub current_page: u64,
    #[serde(default)]
    pub last_page: u64,
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub to: Option<u64>,
}

/// One entry of the antenna ranking returned alongside the list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub score: i64,
}

/// Body of the paginated list endpoint:
/// `{data: {antennas: {items, meta}, ranking}}`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AntennaListEnvelope {
    #[serde(default)]
    pub data: AntennaListData,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AntennaListData {
    #[serde(default)]
    pub antennas: AntennaPage,
    #[serde(default)]
    pub ranking: Vec<RankingEntry>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AntennaPage {
    #[serde(default)]
    pub items: Vec<Antenna>,
    #[serde(default)]
    pub meta: PageMeta,
}
