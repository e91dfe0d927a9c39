//! Client layer: typed access to the hospital REST API.
//!
//! [`HospitalApi`] is the seam the service layer depends on;
//! [`HospitalApiClient`] implements it over `reqwest`.

pub mod hospital_api;
pub mod wire;

use std::future::Future;

use serde_json::Value;

pub use hospital_api::HospitalApiClient;
pub use wire::{AuthToken, Credentials, NewAccount};

use crate::domain::{PageTarget, RecordPage, ResourceKind, Session};
use crate::error::ConsoleError;

/// Operations the console performs against the hospital API.
///
/// Every resource shares the same shape: a paginated collection at
/// `/api/<slug>` and single records at `/api/<slug>/<id>`.
pub trait HospitalApi: Send + Sync {
    /// Fetches one page of a collection.
    fn list(
        &self,
        kind: ResourceKind,
        target: PageTarget,
        session: &Session,
    ) -> impl Future<Output = Result<RecordPage, ConsoleError>> + Send;

    /// Fetches the records used to fill form dropdowns.
    fn lookup(
        &self,
        kind: ResourceKind,
        session: &Session,
    ) -> impl Future<Output = Result<Vec<Value>, ConsoleError>> + Send;

    /// Returns the total number of records in a collection.
    fn count(
        &self,
        kind: ResourceKind,
        session: &Session,
    ) -> impl Future<Output = Result<u64, ConsoleError>> + Send;

    /// Fetches a single record.
    fn get(
        &self,
        kind: ResourceKind,
        id: &str,
        session: &Session,
    ) -> impl Future<Output = Result<Value, ConsoleError>> + Send;

    /// Creates a record, returning the API's confirmation message.
    fn create(
        &self,
        kind: ResourceKind,
        body: &Value,
        session: &Session,
    ) -> impl Future<Output = Result<String, ConsoleError>> + Send;

    /// Replaces a record, returning the API's confirmation message.
    fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        body: &Value,
        session: &Session,
    ) -> impl Future<Output = Result<String, ConsoleError>> + Send;

    /// Deletes a record, returning the API's confirmation message.
    fn delete(
        &self,
        kind: ResourceKind,
        id: &str,
        session: &Session,
    ) -> impl Future<Output = Result<String, ConsoleError>> + Send;

    /// Exchanges credentials for a token.
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AuthToken, ConsoleError>> + Send;

    /// Creates an account and returns its token.
    fn register(
        &self,
        account: &NewAccount,
    ) -> impl Future<Output = Result<AuthToken, ConsoleError>> + Send;
}
