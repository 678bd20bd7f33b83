pub mod logger;

pub mod api;
pub mod cart;
pub mod config;
pub mod errors;
pub mod models;
pub mod notifications;
pub mod pages;
pub mod related;
pub mod render;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use serde_json::json;

use api::{ApiClient, HttpTransport};
use cart::CartStore;
use config::AppConfig;
use errors::AppError;
use logger::LoggerConfig;
use notifications::NotificationCenter;
use storage::{FileStorage, KeyValueStorage};

/// Estat global del client, compartit per totes les operacions de pàgina.
pub struct AppState {
    pub config: AppConfig,
    pub api: ApiClient,
    pub cart: CartStore,
    pub notifications: NotificationCenter,
}

impl AppState {
    /// Construeix l'estat amb els col·laboradors injectats. És el punt
    /// d'entrada dels tests i de shells amb transports o emmagatzematges
    /// alternatius.
    pub fn new(
        config: AppConfig,
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Self {
        let notifications = NotificationCenter::new();
        let api = ApiClient::new(config.api.base_url.clone(), transport);
        let cart = CartStore::new(storage, notifications.clone());

        Self {
            config,
            api,
            cart,
            notifications,
        }
    }
}

/// Inicialitza el client amb la configuració d'entorn:
/// config → logger → emmagatzematge → estat.
pub fn init() -> Result<AppState, AppError> {
    let config = config::init_config().clone();

    let logger_config = LoggerConfig {
        level: config.logging.level(),
        log_to_file: config.logging.log_to_file,
        log_to_stdout: config.logging.log_to_stdout,
        json_format: config.logging.json_format,
    };
    if let Err(e) = logger::init_global_logger(&config.storage.data_dir, logger_config) {
        eprintln!("⚠️  No s'ha pogut inicialitzar el logger: {}", e);
    }

    log_info!(
        "APP",
        "Client iniciant-se",
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "environment": config.environment.as_str(),
            "api_base_url": config.api.base_url
        })
    );

    let api = ApiClient::from_config(&config.api)?;
    let storage = Arc::new(FileStorage::new(&config.storage.data_dir)?);

    let notifications = NotificationCenter::new();
    let cart = CartStore::new(storage, notifications.clone());

    Ok(AppState {
        config,
        api,
        cart,
        notifications,
    })
}
