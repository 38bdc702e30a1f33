use skytrip_catalog::SeatLayout;
use skytrip_core::AuthProvider;
use skytrip_order::SessionState;
use skytrip_store::StatePersistor;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::facade::SearchFacade;
use crate::session::Session;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
    pub search: SearchFacade,
    pub auth: Arc<dyn AuthProvider>,
    pub persistor: StatePersistor,
    pub layout: Arc<SeatLayout>,
}

impl AppState {
    /// Build the state, restoring whatever the persistor allows from the last run.
    pub async fn restore(
        search: SearchFacade,
        auth: Arc<dyn AuthProvider>,
        persistor: StatePersistor,
        layout: Arc<SeatLayout>,
    ) -> Self {
        let state = match persistor.rehydrate(SessionState::default()).await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Could not rehydrate session state, starting fresh: {}", e);
                SessionState::default()
            }
        };

        let mut session = Session::new(state);
        session.signed_in = auth.is_session_active().await;

        Self {
            session: Arc::new(RwLock::new(session)),
            search,
            auth,
            persistor,
            layout,
        }
    }

    /// Write the persisted slice of the session. Failures are logged only.
    pub async fn persist(&self) {
        let snapshot = self.session.read().await.state.clone();
        if let Err(e) = self.persistor.save(&snapshot).await {
            tracing::warn!("Failed to persist session state: {}", e);
        }
    }
}
