use poem::{get, listener::TcpListener, middleware::Cors, EndpointExt, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use service_center::api::{
    self, AdminApi, AuthApi, CityApi, HealthApi, ProductApi, RequestApi, ServiceApi,
};
use service_center::app_data::AppData;
use service_center::config::{self, AppSettings};
use service_center::services::{ChatNotifier, Mailer, SmtpMailer, TelegramNotifier};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    config::init_logging().expect("Failed to initialize logging");

    let settings = AppSettings::from_env().expect("Invalid configuration");

    // Connect to database and run migrations
    let db: DatabaseConnection = Database::connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Database migrations completed");

    // Outbound notification channels; each is optional and its absence
    // only disables that channel
    let mailer: Option<Arc<dyn Mailer>> = match SmtpMailer::new(&settings.smtp) {
        Ok(mailer) => Some(Arc::new(mailer)),
        Err(e) => {
            tracing::warn!(error = %e, "SMTP transport unavailable, email notifications disabled");
            None
        }
    };

    let chat: Option<Arc<dyn ChatNotifier>> = settings
        .telegram
        .as_ref()
        .map(|telegram| {
            Arc::new(TelegramNotifier::new(telegram.bot_token.clone())) as Arc<dyn ChatNotifier>
        });
    if chat.is_none() {
        tracing::info!("Telegram bot token not configured, chat notifications disabled");
    }

    let app_data = Arc::new(AppData::init(db, &settings, mailer, chat));

    // Create OpenAPI service with all API implementations
    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(app_data.clone()),
            CityApi::new(app_data.clone()),
            ProductApi::new(app_data.clone()),
            ServiceApi::new(app_data.clone()),
            RequestApi::new(app_data.clone()),
            AdminApi::new(app_data.clone()),
        ),
        "Service Center API",
        "1.0.0",
    )
    .server("http://localhost:8000/api");

    let ui = api_service.swagger_ui();

    let app = Route::new()
        .at("/", get(api::health::root))
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .with(Cors::new());

    tracing::info!("Starting server on http://0.0.0.0:8000");
    tracing::info!("Swagger UI available at http://localhost:8000/swagger");

    Server::new(TcpListener::bind("0.0.0.0:8000")).run(app).await
}
