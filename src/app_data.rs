use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::AppSettings;
use crate::services::{AuthService, ChatNotifier, Mailer, Notifier, TokenService};
use crate::stores::{CityStore, ProductStore, RequestStore, ServiceStore, UserStore};

/// Centralized application data following the main-owned stores pattern
///
/// All stores and services are created once at startup and shared across
/// the API structs via `Arc<AppData>`. Notification channels are injected
/// so tests can substitute recording fakes.
pub struct AppData {
    pub db: DatabaseConnection,
    pub city_store: Arc<CityStore>,
    pub user_store: Arc<UserStore>,
    pub product_store: Arc<ProductStore>,
    pub service_store: Arc<ServiceStore>,
    pub request_store: Arc<RequestStore>,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
    pub notifier: Arc<Notifier>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// Database connection should be established and migrated before
    /// calling this.
    pub fn init(
        db: DatabaseConnection,
        settings: &AppSettings,
        mailer: Option<Arc<dyn Mailer>>,
        chat: Option<Arc<dyn ChatNotifier>>,
    ) -> Self {
        let city_store = Arc::new(CityStore::new(db.clone()));
        let user_store = Arc::new(UserStore::new(db.clone()));
        let product_store = Arc::new(ProductStore::new(db.clone()));
        let service_store = Arc::new(ServiceStore::new(db.clone()));
        let request_store = Arc::new(RequestStore::new(db.clone()));

        let token_service = Arc::new(TokenService::new(&settings.jwt));
        let auth_service = Arc::new(AuthService::new(
            user_store.clone(),
            token_service.clone(),
        ));

        let notifier = Arc::new(Notifier::new(db.clone(), mailer, chat));

        Self {
            db,
            city_store,
            user_store,
            product_store,
            service_store,
            request_store,
            token_service,
            auth_service,
            notifier,
        }
    }
}
