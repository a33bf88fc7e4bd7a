use std::sync::Arc;

use crate::domain::entities::Session;
use crate::domain::ports::ChatApiPort;

/// Authenticated client plus the session its calls run under.
#[derive(Clone)]
pub struct SessionContext {
    pub client: Arc<dyn ChatApiPort>,
    pub session: Session,
}

impl SessionContext {
    #[must_use]
    pub fn new(client: Arc<dyn ChatApiPort>, session: Session) -> Self {
        Self { client, session }
    }

    /// Username of the session owner.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.session.username
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
