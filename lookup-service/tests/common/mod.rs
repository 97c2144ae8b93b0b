use lookup_service::config::{LookupConfig, LookupSettings};
use lookup_service::store::RecordStore;
use lookup_service::Application;
use service_core::config::Config as CoreConfig;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_not_found_status(404).await
    }

    pub async fn spawn_with_not_found_status(not_found_status: u16) -> Self {
        let config = LookupConfig {
            common: CoreConfig { port: 0 }, // Random port for testing
            lookup: LookupSettings { not_found_status },
        };

        let store = RecordStore::seeded().expect("Failed to initialize record store");
        let app = Application::build(config, store)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, client }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
