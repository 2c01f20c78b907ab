#[cfg(test)]
pub mod tests {
    use reqwest::{
        Client,
        multipart::{Form, Part},
    };
    use std::{path::PathBuf, sync::Arc};
    use tempfile::TempDir;
    use tokio::net::TcpListener;

    use heroes_app::{
        app_bus::AppBus, config::Config, storage::ImageStore,
        test_utils::tests::MockUnitOfWorkProvider,
    };
    use heroes_db::FsImageStore;
    use heroes_types::errors::Result;
    use heroes_web::{AppState, WebRouter};

    pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n";

    /// A running server with its own uploads directory and in-memory store.
    pub struct TestServer {
        pub client: Client,
        pub base_url: String,
        pub uploads: TempDir,
        pub provider: Arc<MockUnitOfWorkProvider>,
    }

    impl TestServer {
        pub fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }

        /// Where a stored `images/...` path lives on disk.
        pub fn stored_file(&self, image: &str) -> PathBuf {
            self.uploads.path().join(image)
        }
    }

    pub async fn setup_web_app() -> Result<TestServer> {
        let uploads = TempDir::new()?;
        let config = Arc::new(Config {
            port: 0,
            uploads_dir: uploads.path().to_path_buf(),
            admin_dir: uploads.path().join("admin"),
            max_upload_bytes: 1024 * 1024,
            log_dir: uploads.path().join("logs"),
        });

        let provider = Arc::new(MockUnitOfWorkProvider::new());
        let app_bus = Arc::new(AppBus::new(config.clone(), provider.clone()));
        let images: Arc<dyn ImageStore> = Arc::new(FsImageStore::new(&config.uploads_dir));
        let state = AppState::new(app_bus, images);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(WebRouter::serve_on(listener, state));

        Ok(TestServer {
            client: Client::new(),
            base_url: format!("http://{}", addr),
            uploads,
            provider,
        })
    }

    pub fn image_part(file_name: &str, mime: &str) -> Part {
        Part::bytes(PNG_BYTES.to_vec())
            .file_name(file_name.to_string())
            .mime_str(mime)
            .expect("valid mime")
    }

    /// Every field a new hero needs, without the image.
    pub fn hero_form(name: &str) -> Form {
        Form::new()
            .text("name", name.to_string())
            .text("nickname", "Superman")
            .text("birthDate", "1938")
            .text("deathDate", "")
            .text("description", "Last son of Krypton")
            .text("values", "hope, justice")
    }

    pub async fn create_hero(server: &TestServer, name: &str) -> serde_json::Value {
        let form = hero_form(name).part("image", image_part("s.png", "image/png"));
        let res = server
            .client
            .post(server.url("/api/heroes"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::CREATED);
        res.json().await.unwrap()
    }
}
