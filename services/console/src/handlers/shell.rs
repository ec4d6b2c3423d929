use axum::extract::{Query, State, rejection::QueryRejection};
use axum::{Json, http::Uri};
use serde::Deserialize;

use crate::listing::ListingView;
use crate::shell::ShellView;
use crate::shell::pages::{Page, Route, resolve};
use crate::state::AppState;

// ── GET <any path> ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShellQuery {
    /// Render the users page with its error banner already dismissed.
    pub dismissed: bool,
}

/// Fallback for every GET: resolve the path and build its view model.
///
/// Unknown paths get the coming-soon page with a 200, never a 404.
pub async fn render(
    State(state): State<AppState>,
    uri: Uri,
    query: Result<Query<ShellQuery>, QueryRejection>,
) -> Json<ShellView> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let path = uri.path();
    let page = match resolve(path) {
        Route::Dashboard => Page::dashboard(),
        Route::Register => Page::register(),
        Route::Users => {
            let mut view = ListingView::new(state.profile_source());
            view.activate().await;
            if query.dismissed {
                view.dismiss_error();
            }
            Page::users(view.snapshot())
        }
        Route::Placeholder { title } => Page::placeholder(title),
        Route::ComingSoon => Page::coming_soon(),
    };
    Json(ShellView::new(path, page))
}
