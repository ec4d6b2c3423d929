use crate::infra::api::ApiClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
}

impl AppState {
    pub fn profile_source(&self) -> ApiClient {
        self.api.clone()
    }

    pub fn registration_gateway(&self) -> ApiClient {
        self.api.clone()
    }
}
