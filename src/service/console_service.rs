//! Console service: the generic list/form controller behind every screen.

use std::collections::BTreeMap;

use chrono::Utc;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::client::{AuthToken, Credentials, HospitalApi, NewAccount};
use crate::domain::resource::record_id;
use crate::domain::session::gate;
use crate::domain::{Access, Area, ListState, PageTarget, PaginationView, ResourceKind, Session};
use crate::error::ConsoleError;

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A loaded list screen.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScreenView {
    /// Resource shown on the screen.
    pub resource: ResourceKind,
    /// Screen title.
    pub title: String,
    /// Records on the current page.
    #[schema(value_type = Vec<Object>)]
    pub records: Vec<Value>,
    /// Pagination bar; absent when there are no records.
    pub pagination: Option<PaginationView>,
}

/// Data needed to open the create/edit dialog.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FormView {
    /// Resource being edited.
    pub resource: ResourceKind,
    /// Record id when editing, absent when creating.
    pub id: Option<String>,
    /// Current record when editing.
    #[schema(value_type = Option<Object>)]
    pub record: Option<Value>,
    /// Dropdown options keyed by collection slug.
    #[schema(value_type = Object)]
    pub lookups: BTreeMap<String, Vec<Value>>,
}

/// Result of a create, update, or delete: the API's message and the
/// refreshed screen.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MutationOutcome {
    /// Confirmation message from the hospital API.
    pub message: String,
    /// Screen refetched after the mutation.
    pub screen: ScreenView,
}

/// One dashboard card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ResourceCount {
    /// Counted resource.
    pub resource: ResourceKind,
    /// Card title.
    pub title: String,
    /// Total records.
    pub total: u64,
}

/// Registration form as submitted by the UI.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password repeated.
    pub confirm_password: String,
}

impl Registration {
    /// Checks the form before it is sent upstream.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidRequest`] when the passwords differ
    /// or the password is shorter than [`MIN_PASSWORD_LEN`].
    pub fn validate(&self) -> Result<(), ConsoleError> {
        if self.password != self.confirm_password {
            return Err(ConsoleError::InvalidRequest(
                "Passwords do not match".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ConsoleError::InvalidRequest(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

impl From<Registration> for NewAccount {
    fn from(form: Registration) -> Self {
        Self {
            name: form.name,
            username: form.username,
            email: form.email,
            password: form.password,
        }
    }
}

/// Orchestrates every admin screen over a [`HospitalApi`].
///
/// Stateless between calls: each call builds a fresh [`ListState`] from
/// the API, so a refetch after navigation or a mutation always replaces
/// what was displayed.
#[derive(Debug, Clone)]
pub struct ConsoleService<A> {
    api: A,
}

impl<A: HospitalApi> ConsoleService<A> {
    /// Creates a new `ConsoleService`.
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// Returns a reference to the inner API client.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    fn require(session: &Session) -> Result<(), ConsoleError> {
        if session.is_valid() {
            Ok(())
        } else {
            Err(ConsoleError::Unauthorized(
                "session token missing or expired".to_string(),
            ))
        }
    }

    /// Decides whether `area` may be shown for `session`.
    #[must_use]
    pub fn gate(&self, area: Area, session: Option<&Session>) -> Access {
        gate(area, session, Utc::now())
    }

    /// Loads one page of a resource.
    ///
    /// `base_query` is the screen's query string; pagination links keep
    /// its other parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Unauthorized`] for an invalid session, or
    /// any error from the hospital API.
    pub async fn load_screen(
        &self,
        kind: ResourceKind,
        target: PageTarget,
        base_query: &str,
        session: &Session,
    ) -> Result<ScreenView, ConsoleError> {
        Self::require(session)?;
        let mut state = ListState::new();
        state.replace(self.api.list(kind, target, session).await?);

        let pagination = state.view(base_query);
        Ok(ScreenView {
            resource: kind,
            title: kind.title().to_string(),
            pagination,
            records: state.into_page().records,
        })
    }

    /// Loads the create (`id == None`) or edit dialog for a resource.
    ///
    /// Lookup collections are fetched concurrently. A lookup that fails
    /// for any reason other than authorization yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Unauthorized`] for an invalid session,
    /// [`ConsoleError::NotFound`] if the edited record does not exist.
    pub async fn load_form(
        &self,
        kind: ResourceKind,
        id: Option<&str>,
        session: &Session,
    ) -> Result<FormView, ConsoleError> {
        Self::require(session)?;
        let record = match id {
            Some(id) => Some(self.api.get(kind, id, session).await?),
            None => None,
        };

        let fetched = join_all(kind.lookups().iter().map(|&lookup| async move {
            (lookup, self.api.lookup(lookup, session).await)
        }))
        .await;

        let mut lookups = BTreeMap::new();
        for (lookup, result) in fetched {
            let records = match result {
                Ok(records) => records,
                Err(e @ ConsoleError::Unauthorized(_)) => return Err(e),
                Err(e) => {
                    tracing::warn!(resource = %kind, lookup = %lookup, error = %e, "lookup failed");
                    Vec::new()
                }
            };
            lookups.insert(lookup.slug().to_string(), records);
        }

        Ok(FormView {
            resource: kind,
            id: record
                .as_ref()
                .and_then(record_id)
                .or_else(|| id.map(str::to_string)),
            record,
            lookups,
        })
    }

    /// Submits the dialog: creates when `id` is `None`, otherwise updates,
    /// then refetches the screen at `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidRequest`] if `body` is not a JSON
    /// object, or any error from the hospital API.
    pub async fn submit(
        &self,
        kind: ResourceKind,
        id: Option<&str>,
        body: &Value,
        target: PageTarget,
        base_query: &str,
        session: &Session,
    ) -> Result<MutationOutcome, ConsoleError> {
        Self::require(session)?;
        if !body.is_object() {
            return Err(ConsoleError::InvalidRequest(
                "form body must be a JSON object".to_string(),
            ));
        }

        let message = match id {
            Some(id) => self.api.update(kind, id, body, session).await?,
            None => self.api.create(kind, body, session).await?,
        };
        let screen = self.load_screen(kind, target, base_query, session).await?;
        Ok(MutationOutcome { message, screen })
    }

    /// Deletes a record, then refetches the screen at `target`.
    ///
    /// # Errors
    ///
    /// Returns any error from the hospital API.
    pub async fn delete(
        &self,
        kind: ResourceKind,
        id: &str,
        target: PageTarget,
        base_query: &str,
        session: &Session,
    ) -> Result<MutationOutcome, ConsoleError> {
        Self::require(session)?;
        let message = self.api.delete(kind, id, session).await?;
        let screen = self.load_screen(kind, target, base_query, session).await?;
        Ok(MutationOutcome { message, screen })
    }

    /// Counts every dashboard resource concurrently.
    ///
    /// A count that fails is reported as 0.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Unauthorized`] for an invalid session.
    pub async fn dashboard(&self, session: &Session) -> Result<Vec<ResourceCount>, ConsoleError> {
        Self::require(session)?;
        let counts = join_all(ResourceKind::DASHBOARD.iter().map(|&kind| async move {
            let total = match self.api.count(kind, session).await {
                Ok(total) => total,
                Err(e) => {
                    tracing::warn!(resource = %kind, error = %e, "count failed");
                    0
                }
            };
            ResourceCount {
                resource: kind,
                title: kind.title().to_string(),
                total,
            }
        }))
        .await;
        Ok(counts)
    }

    /// Exchanges credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidRequest`] for blank fields, or
    /// [`ConsoleError::Unauthorized`] when the API rejects them.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthToken, ConsoleError> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(ConsoleError::InvalidRequest(
                "email and password are required".to_string(),
            ));
        }
        let token = self.api.login(credentials).await?;
        tracing::info!("administrator signed in");
        Ok(token)
    }

    /// Validates and submits a registration.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidRequest`] when validation fails
    /// (nothing is sent upstream), or the API's rejection.
    pub async fn register(&self, form: Registration) -> Result<AuthToken, ConsoleError> {
        form.validate()?;
        let token = self.api.register(&form.into()).await?;
        tracing::info!("administrator registered");
        Ok(token)
    }
}
