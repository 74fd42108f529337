//! Library, plans, reading and downloads.

use std::path::PathBuf;
use std::sync::Arc;

use super::FolioApp;
use crate::error::{ErrorContext, FolioError, FolioResult, ResultExt};
use crate::models::{ContentItem, ContentKind, Plan};
use crate::reader::ReaderSession;
use crate::selectors::{content_by_id, CategorizedContent};
use crate::storage::StorageManager;
use crate::store::effects;
use crate::traits::{CredentialsProvider, HttpClient, ImageLoader};

impl<C: HttpClient, P: CredentialsProvider> FolioApp<C, P> {
    /// Fetch the library, optionally only one kind, and return it grouped.
    pub async fn refresh_library(
        &mut self,
        kind: Option<ContentKind>,
    ) -> FolioResult<CategorizedContent> {
        if let Err(e) = effects::fetch_content(&mut self.store, &self.api, kind).await {
            self.expire_if_rejected(&e).await;
            return Err(e);
        }
        Ok(self.library().clone())
    }

    /// Load the library and the plans together, as the home screen does.
    pub async fn refresh_home(&mut self) -> FolioResult<CategorizedContent> {
        if let Err(e) = effects::fetch_home(&mut self.store, &self.api).await {
            self.expire_if_rejected(&e).await;
            return Err(e);
        }
        Ok(self.library().clone())
    }

    /// The library as currently held by the store, grouped by kind.
    pub fn library(&mut self) -> &CategorizedContent {
        self.selectors.categorized(&self.store)
    }

    pub fn search(&mut self, query: &str) -> Vec<ContentItem> {
        self.selectors.search(&self.store, query).to_vec()
    }

    pub fn top_rated(&mut self, n: usize) -> Vec<ContentItem> {
        self.selectors.top_rated(&self.store, n).to_vec()
    }

    pub async fn refresh_plans(&mut self) -> FolioResult<Vec<Plan>> {
        if let Err(e) = effects::fetch_plans(&mut self.store, &self.api).await {
            self.expire_if_rejected(&e).await;
            return Err(e);
        }
        Ok(self.selectors.active_plans(&self.store).to_vec())
    }

    pub fn free_plan(&mut self) -> Option<Plan> {
        self.selectors.free_plan(&self.store).cloned()
    }

    pub fn paid_plans(&mut self) -> Vec<Plan> {
        self.selectors.paid_plans(&self.store).to_vec()
    }

    /// Full record for `content_id`, fetching the detail when the list entry
    /// lacks what `needs` asks for.
    async fn content_with(
        &mut self,
        content_id: &str,
        needs: fn(&ContentItem) -> bool,
    ) -> FolioResult<ContentItem> {
        if let Some(item) = content_by_id(&self.store.content.items, content_id) {
            if needs(item) {
                return Ok(item.clone());
            }
        }
        let result = effects::fetch_content_detail(&mut self.store, &self.api, content_id).await;
        if let Err(ref e) = result {
            self.expire_if_rejected(e).await;
        }
        result
    }

    /// Open the reader on a document.
    ///
    /// Must be called from within a tokio runtime; the initial pages start
    /// loading immediately.
    pub async fn open_reader<L: ImageLoader + 'static>(
        &mut self,
        content_id: &str,
        loader: Arc<L>,
        screen_width: f64,
        viewport_height: f64,
    ) -> FolioResult<ReaderSession<L>> {
        let item = self
            .content_with(content_id, |i| !i.pages.is_empty())
            .await?;
        if item.pages.is_empty() {
            return Err(FolioError::not_found(format!("Pages of '{}'", item.name)));
        }

        tracing::info!("Opening {} ({} pages)", item.name, item.pages.len());
        Ok(ReaderSession::open(
            item.id,
            item.pages,
            loader,
            screen_width,
            viewport_height,
            self.config.reader,
        ))
    }

    /// Download a document into `storage` and return where it was saved.
    pub async fn download(
        &mut self,
        content_id: &str,
        storage: &StorageManager,
    ) -> FolioResult<PathBuf> {
        let context = || ErrorContext::new("download").with_content_id(content_id);

        let item = self
            .content_with(content_id, |i| i.file.is_some())
            .await
            .with_context(context)?;
        let url = item.file.ok_or_else(|| {
            FolioError::not_found(format!("Download for '{}'", item.name)).with_context(context())
        })?;

        let bytes = match self.api.download(&url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                // Only our own API saw the token, so only its 401 ends the session
                if self.api.is_api_url(&url) {
                    self.expire_if_rejected(&e).await;
                }
                return Err(e.with_context(context().with_endpoint(url)));
            }
        };
        let path = storage
            .save_document(content_id, &bytes)
            .with_context(context)?;

        self.store.toasts.success(format!("Downloaded {}", item.name));
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use crate::adapters::mock::{InMemoryCredentials, MockHttpClient, MockImageLoader, MockResponse};
    use crate::app::FolioApp;
    use crate::config::ClientConfig;
    use crate::error::FolioError;
    use crate::models::ContentKind;
    use crate::storage::StorageManager;
    use crate::traits::Response;
    use bytes::Bytes;
    use std::sync::Arc;
    use tempfile::TempDir;

    const BASE: &str = "https://api.test";

    fn app(http: &MockHttpClient) -> FolioApp<MockHttpClient, InMemoryCredentials> {
        FolioApp::new(
            Arc::new(http.clone()),
            InMemoryCredentials::new(),
            ClientConfig::default().with_api_base_url(BASE),
        )
    }

    fn json(http: &MockHttpClient, path: &str, body: serde_json::Value) {
        http.set_response(
            &format!("{}{}", BASE, path),
            MockResponse::Success(Response::json_body(200, &body)),
        );
    }

    fn library_fixture(http: &MockHttpClient) {
        json(
            http,
            "/magazines",
            serde_json::json!({ "data": [
                { "_id": "m1", "name": "Tech Monthly", "magzineType": "magazine", "rating": 4.0,
                  "pages": ["https://cdn.test/m1/1.jpg", "https://cdn.test/m1/2.jpg"] },
                { "_id": "a1", "name": "Gardening", "magzineType": "article", "rating": 4.8 },
                { "_id": "d1", "name": "Weekly", "magzineType": "digest",
                  "file": "https://cdn.test/d1.pdf" }
            ] }),
        );
    }

    #[tokio::test]
    async fn test_refresh_library_groups_items() {
        let http = MockHttpClient::new();
        library_fixture(&http);
        let mut app = app(&http);

        let library = app.refresh_library(None).await.unwrap();
        assert_eq!(library.magazines.len(), 1);
        assert_eq!(library.articles.len(), 1);
        assert_eq!(library.digests.len(), 1);

        assert_eq!(app.search("garden")[0].id, "a1");
        assert_eq!(app.top_rated(1)[0].id, "a1");
        assert_eq!(app.library().of_kind(ContentKind::Digest)[0].id, "d1");
    }

    #[tokio::test]
    async fn test_refresh_plans() {
        let http = MockHttpClient::new();
        json(
            &http,
            "/plans",
            serde_json::json!({ "data": [
                { "_id": "free", "name": "Free", "price": 0, "isActive": true },
                { "_id": "pro", "name": "Pro", "price": 4.99, "isActive": true },
                { "_id": "old", "name": "Legacy", "price": 2.0, "isActive": false }
            ] }),
        );
        let mut app = app(&http);

        let active = app.refresh_plans().await.unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(app.free_plan().unwrap().id, "free");
        assert_eq!(app.paid_plans().len(), 1);
    }

    #[tokio::test]
    async fn test_open_reader_uses_listed_pages() {
        let http = MockHttpClient::new();
        library_fixture(&http);
        let mut app = app(&http);
        app.refresh_library(None).await.unwrap();

        let loader = Arc::new(MockImageLoader::new());
        let mut reader = app
            .open_reader("m1", Arc::clone(&loader), 400.0, 800.0)
            .await
            .unwrap();
        reader.wait_ready().await;

        assert_eq!(reader.page_count(), 2);
        assert_eq!(reader.page_label(), "1 / 2");
        // listing already had the pages, no detail request
        assert_eq!(http.get_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_open_reader_fetches_detail_when_needed() {
        let http = MockHttpClient::new();
        library_fixture(&http);
        json(
            &http,
            "/magazines/a1",
            serde_json::json!({ "data": { "_id": "a1", "name": "Gardening", "pages": ["p1"] } }),
        );
        let mut app = app(&http);
        app.refresh_library(None).await.unwrap();

        let reader = app
            .open_reader("a1", Arc::new(MockImageLoader::new()), 400.0, 800.0)
            .await
            .unwrap();
        assert_eq!(reader.page_count(), 1);
        assert_eq!(reader.content_id(), "a1");
    }

    #[tokio::test]
    async fn test_open_reader_without_pages() {
        let http = MockHttpClient::new();
        json(
            &http,
            "/magazines/d1",
            serde_json::json!({ "data": { "_id": "d1", "name": "Weekly" } }),
        );
        let mut app = app(&http);

        let err = app
            .open_reader("d1", Arc::new(MockImageLoader::new()), 400.0, 800.0)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, FolioError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_download_saves_document() {
        let http = MockHttpClient::new();
        library_fixture(&http);
        http.set_response(
            "https://cdn.test/d1.pdf",
            MockResponse::Success(Response::new(200, Bytes::from_static(b"%PDF-1.4"))),
        );
        let temp_dir = TempDir::new().unwrap();
        let storage = StorageManager::under(temp_dir.path());
        let mut app = app(&http);
        app.refresh_library(None).await.unwrap();

        let path = app.download("d1", &storage).await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.4");
        assert!(storage.has_document("d1"));
        assert_eq!(storage.report().document_count, 1);
    }

    #[tokio::test]
    async fn test_download_failure_carries_context() {
        let http = MockHttpClient::new();
        library_fixture(&http);
        http.set_response(
            "https://cdn.test/d1.pdf",
            MockResponse::Success(Response::new(404, Bytes::new())),
        );
        let temp_dir = TempDir::new().unwrap();
        let storage = StorageManager::under(temp_dir.path());
        let mut app = app(&http);
        app.refresh_library(None).await.unwrap();

        let err = app.download("d1", &storage).await.unwrap_err();
        let context = err.context().unwrap();
        assert_eq!(context.operation, "download");
        assert_eq!(context.content_id.as_deref(), Some("d1"));
        assert!(!storage.has_document("d1"));
    }
}
