//! Admin dashboard handler.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;

use crate::error::ServerError;
use crate::state::AppState;
use crate::views;

/// Handle GET /admin.
///
/// The data directory is created on first visit, so a fresh site opens
/// with an empty dashboard instead of an error.
pub(crate) async fn dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    state.store.ensure_dir()?;
    let documents = state.store.list(".json")?;
    Ok(Html(views::dashboard_page(&documents)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TokenSigner;
    use folio_store::DocStore;
    use tempfile::TempDir;

    fn make_state(temp: &TempDir) -> Arc<AppState> {
        Arc::new(AppState {
            store: DocStore::new(temp.path().join("data")),
            site_root: temp.path().to_path_buf(),
            admin_password: Some("test-password".to_owned()),
            signer: TokenSigner::new(b"test-key").unwrap(),
        })
    }

    #[tokio::test]
    async fn test_dashboard_creates_data_dir() {
        let temp = TempDir::new().unwrap();
        let state = make_state(&temp);
        assert!(!temp.path().join("data").exists());

        let Html(page) = dashboard(State(state)).await.unwrap();

        assert!(temp.path().join("data").is_dir());
        assert!(page.contains("No documents yet"));
    }

    #[tokio::test]
    async fn test_dashboard_lists_json_documents_only() {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join("data");
        std::fs::create_dir(&data).unwrap();
        std::fs::write(data.join("about.json"), "{}").unwrap();
        std::fs::write(data.join("contact.json"), "{}").unwrap();
        std::fs::write(data.join("notes.txt"), "scratch").unwrap();
        let state = make_state(&temp);

        let Html(page) = dashboard(State(state)).await.unwrap();

        assert!(page.contains("about.json"));
        assert!(page.contains("contact.json"));
        assert!(!page.contains("notes.txt"));
    }
}
