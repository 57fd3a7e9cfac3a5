//! Antenna store: paginated list with ranking, plus the create/edit form.
//!
//! The list endpoint returns both the page of antennas and a ranking in a
//! single envelope. Form dates arrive from the date widget in Brazilian
//! `dd/mm/yyyy` and are converted to ISO on submit.

#[cfg(test)]
#[path = "antennas_test.rs"]
mod antennas_test;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::net::http::Transport;
use crate::net::types::{Antenna, AntennaListEnvelope, PageMeta, RankingEntry};

const ANTENNAS_PATH: &str = "/antennas";

const MSG_LOAD_FAILED: &str = "Erro ao carregar antenas.";
const MSG_CREATE_FAILED: &str = "Erro ao cadastrar antena.";
const MSG_UPDATE_FAILED: &str = "Erro ao atualizar antena.";
const MSG_DELETE_FAILED: &str = "Erro ao excluir antena.";
const MSG_LOOKUP_FAILED: &str = "Erro ao buscar antena.";

/// Failure of an antenna operation, carrying the user-facing message.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct AntennaOpError {
    pub message: String,
}

impl AntennaOpError {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Create/edit form fields. `state` is the UF code.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AntennaForm {
    pub description: String,
    pub serial_number: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub height: Option<f64>,
    pub deployment_date: String,
    pub state: String,
    pub photo: Option<String>,
}

impl Default for AntennaForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            serial_number: String::new(),
            latitude: None,
            longitude: None,
            height: None,
            deployment_date: String::new(),
            state: "AC".to_owned(),
            photo: None,
        }
    }
}

/// List page, ranking, and paging controls.
#[derive(Clone, Debug, PartialEq)]
pub struct AntennaListState {
    pub antennas: Vec<Antenna>,
    pub pagination: PageMeta,
    pub ranking: Vec<RankingEntry>,
    pub current_page: u64,
    pub per_page: u64,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for AntennaListState {
    fn default() -> Self {
        Self {
            antennas: Vec::new(),
            pagination: PageMeta::default(),
            ranking: Vec::new(),
            current_page: 1,
            per_page: 5,
            loading: false,
            error: None,
        }
    }
}

/// Antenna store over the resource client.
pub struct AntennaStore<T> {
    list: RefCell<AntennaListState>,
    form: RefCell<AntennaForm>,
    details: RefCell<HashMap<i64, Antenna>>,
    api: T,
}

impl<T: Transport> AntennaStore<T> {
    pub fn new(api: T) -> Self {
        Self {
            list: RefCell::new(AntennaListState::default()),
            form: RefCell::new(AntennaForm::default()),
            details: RefCell::new(HashMap::new()),
            api,
        }
    }

    pub fn snapshot(&self) -> AntennaListState {
        self.list.borrow().clone()
    }

    pub fn form(&self) -> AntennaForm {
        self.form.borrow().clone()
    }

    pub fn set_form(&self, form: AntennaForm) {
        *self.form.borrow_mut() = form;
    }

    pub fn reset_form(&self) {
        *self.form.borrow_mut() = AntennaForm::default();
    }

    pub fn detail(&self, id: i64) -> Option<Antenna> {
        self.details.borrow().get(&id).cloned()
    }

    /// Load the current page of antennas plus the ranking.
    ///
    /// # Errors
    ///
    /// Fails with the server message when present, otherwise the generic
    /// load message. The previous list is left untouched on failure.
    pub async fn load(&self) -> Result<(), AntennaOpError> {
        let (page, per_page) = {
            let state = self.list.borrow();
            (state.current_page, state.per_page)
        };

        self.begin();
        let path = format!("{ANTENNAS_PATH}?page={page}&per_page={per_page}");
        let result = match self.api.get(&path).await {
            Ok(response) => {
                let envelope: AntennaListEnvelope =
                    serde_json::from_value(response.data).unwrap_or_default();
                let mut state = self.list.borrow_mut();
                state.antennas = envelope.data.antennas.items;
                state.pagination = envelope.data.antennas.meta;
                state.ranking = envelope.data.ranking;
                Ok(())
            }
            Err(err) => Err(self.fail(err.message.as_deref().unwrap_or(MSG_LOAD_FAILED))),
        };
        self.finish();
        result
    }

    /// Jump to a page and reload.
    ///
    /// # Errors
    ///
    /// Same failure contract as [`AntennaStore::load`].
    pub async fn set_page(&self, page: u64) -> Result<(), AntennaOpError> {
        self.list.borrow_mut().current_page = page;
        self.load().await
    }

    /// Change the page size, resetting to the first page. A no-op when the
    /// size is unchanged.
    ///
    /// # Errors
    ///
    /// Same failure contract as [`AntennaStore::load`].
    pub async fn set_per_page(&self, per_page: u64) -> Result<(), AntennaOpError> {
        {
            let mut state = self.list.borrow_mut();
            if state.per_page == per_page {
                return Ok(());
            }
            state.per_page = per_page;
            state.current_page = 1;
        }
        self.load().await
    }

    /// Create an antenna from the current form. The deployment date is
    /// converted to ISO before posting; on success the created record is
    /// appended to the list and the form resets to its defaults.
    ///
    /// # Errors
    ///
    /// Fails with the server message when present, otherwise the generic
    /// create message.
    pub async fn submit_form(&self) -> Result<Antenna, AntennaOpError> {
        let mut form = self.form.borrow().clone();
        form.deployment_date = to_iso_date(&form.deployment_date);

        let body = serde_json::to_value(&form)
            .map_err(|_| AntennaOpError::new(MSG_CREATE_FAILED))?;

        self.begin();
        let result = match self.api.post(ANTENNAS_PATH, Some(&body)).await {
            Ok(response) => match antenna_from_body(response.data) {
                Some(created) => {
                    self.list.borrow_mut().antennas.push(created.clone());
                    self.reset_form();
                    Ok(created)
                }
                None => Err(self.fail(MSG_CREATE_FAILED)),
            },
            Err(err) => Err(self.fail(err.message.as_deref().unwrap_or(MSG_CREATE_FAILED))),
        };
        self.finish();
        result
    }

    /// Update an antenna and cache the returned record by id.
    ///
    /// # Errors
    ///
    /// Fails with the server message when present, otherwise the generic
    /// update message.
    pub async fn update(&self, id: i64, data: &AntennaForm) -> Result<Antenna, AntennaOpError> {
        let mut data = data.clone();
        data.deployment_date = to_iso_date(&data.deployment_date);

        let body = serde_json::to_value(&data)
            .map_err(|_| AntennaOpError::new(MSG_UPDATE_FAILED))?;

        self.begin();
        let path = format!("{ANTENNAS_PATH}/{id}");
        let result = match self.api.put(&path, Some(&body)).await {
            Ok(response) => match antenna_from_body(response.data) {
                Some(updated) => {
                    self.details.borrow_mut().insert(id, updated.clone());
                    Ok(updated)
                }
                None => Err(self.fail(MSG_UPDATE_FAILED)),
            },
            Err(err) => Err(self.fail(err.message.as_deref().unwrap_or(MSG_UPDATE_FAILED))),
        };
        self.finish();
        result
    }

    /// Delete an antenna by serial number and drop it from the list.
    ///
    /// # Errors
    ///
    /// Fails with the server message when present, otherwise the generic
    /// delete message.
    pub async fn delete(&self, serial_number: &str) -> Result<(), AntennaOpError> {
        self.begin();
        let path = format!("{ANTENNAS_PATH}/{serial_number}");
        let result = match self.api.delete(&path).await {
            Ok(_) => {
                self.list
                    .borrow_mut()
                    .antennas
                    .retain(|a| a.serial_number.as_deref() != Some(serial_number));
                Ok(())
            }
            Err(err) => Err(self.fail(err.message.as_deref().unwrap_or(MSG_DELETE_FAILED))),
        };
        self.finish();
        result
    }

    /// Look an antenna up by serial number.
    ///
    /// # Errors
    ///
    /// Fails with the lookup message when the antenna is missing or the
    /// request fails.
    pub async fn load_by_serial(&self, serial_number: &str) -> Result<Antenna, AntennaOpError> {
        let path = format!("{ANTENNAS_PATH}/serial/{serial_number}");
        match self.api.get(&path).await {
            Ok(response) => {
                antenna_from_body(response.data).ok_or_else(|| AntennaOpError::new(MSG_LOOKUP_FAILED))
            }
            Err(_) => Err(AntennaOpError::new(MSG_LOOKUP_FAILED)),
        }
    }

    fn begin(&self) {
        let mut state = self.list.borrow_mut();
        state.loading = true;
        state.error = None;
    }

    fn finish(&self) {
        self.list.borrow_mut().loading = false;
    }

    fn fail(&self, message: &str) -> AntennaOpError {
        self.list.borrow_mut().error = Some(message.to_owned());
        AntennaOpError::new(message)
    }
}

/// Convert a `dd/mm/yyyy` form date to ISO `yyyy-mm-dd`. Anything that is
/// not three numeric slash-separated parts passes through unchanged.
pub(crate) fn to_iso_date(input: &str) -> String {
    let parts: Vec<&str> = input.split('/').collect();
    let all_numeric = parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    if all_numeric {
        format!("{}-{}-{}", parts[2], parts[1], parts[0])
    } else {
        input.to_owned()
    }
}

/// Accept either a bare antenna object or a `{data: antenna}` envelope.
fn antenna_from_body(body: serde_json::Value) -> Option<Antenna> {
    let value = match body {
        serde_json::Value::Object(ref map) if map.contains_key("data") => {
            map.get("data").cloned().unwrap_or(serde_json::Value::Null)
        }
        other => other,
    };
    if value.is_null() {
        return None;
    }
    serde_json::from_value(value).ok()
}
