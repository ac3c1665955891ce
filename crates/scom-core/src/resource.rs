// ── Declarative resource contract ──
//
// Every managed resource kind implements `Resource`: four lifecycle
// operations over a declared `Spec`, each yielding the remote id and the
// observed `State`. Implementations borrow the `Session` and await their
// remote calls one after another.

use serde::Serialize;

use crate::error::CoreError;

/// The kinds of remote objects the controllers manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
pub enum ResourceKind {
    #[strum(serialize = "server")]
    Server,
    #[strum(serialize = "PTR record")]
    PtrRecord,
    #[strum(serialize = "L2 segment")]
    L2Segment,
}

/// Outcome of a lifecycle operation: the remote id plus observed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Applied<S> {
    pub id: String,
    pub state: S,
}

impl<S> Applied<S> {
    pub fn new(id: impl Into<String>, state: S) -> Self {
        Self {
            id: id.into(),
            state,
        }
    }
}

/// Lifecycle of one declaratively managed resource kind.
///
/// `update` receives the previously applied declaration when the caller
/// knows it; `None` means unknown, and the change is always applied.
#[allow(async_fn_in_trait)]
pub trait Resource {
    /// Declared fields.
    type Spec;
    /// Observed fields.
    type State;

    const KIND: ResourceKind;

    async fn create(&self, spec: &Self::Spec) -> Result<Applied<Self::State>, CoreError>;

    async fn read(&self, id: &str, spec: &Self::Spec) -> Result<Applied<Self::State>, CoreError>;

    async fn update(
        &self,
        id: &str,
        prior: Option<&Self::Spec>,
        spec: &Self::Spec,
    ) -> Result<Applied<Self::State>, CoreError>;

    async fn delete(&self, id: &str, spec: &Self::Spec) -> Result<(), CoreError>;
}

/// Parse a numeric remote id handed back as a string.
pub(crate) fn numeric_id(kind: ResourceKind, id: &str) -> Result<u64, CoreError> {
    id.trim().parse().map_err(|_| CoreError::Validation {
        field: format!("{kind} id"),
        reason: format!("'{id}' is not a numeric id"),
    })
}
