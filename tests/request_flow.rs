// End-to-end flow: city + staff + catalog + customer request + fan-out

use async_trait::async_trait;
use jsonwebtoken::Algorithm;
use migration::{Migrator, MigratorTrait};
use poem_openapi::auth::Bearer;
use poem_openapi::param::{Path, Query};
use poem_openapi::payload::Json;
use sea_orm::Database;
use std::sync::{Arc, Mutex};

use service_center::api::auth::BearerAuth;
use service_center::api::{AuthApi, CityApi, RequestApi, ServiceApi};
use service_center::app_data::AppData;
use service_center::config::{AppSettings, JwtSettings, SmtpSettings};
use service_center::services::{ChatNotifier, Mailer, NotifyError};
use service_center::types::dto::auth::LoginRequest;
use service_center::types::dto::city::CityPayload;
use service_center::types::dto::request::{CreateRequestPayload, RequestStatusUpdate};
use service_center::types::dto::service::ServicePayload;
use service_center::types::dto::user::CreateUserRequest;

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push((
            recipient.to_string(),
            subject.to_string(),
            body.to_string(),
        ));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingChat {
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ChatNotifier for RecordingChat {
    async fn send(&self, chat_id: &str, message: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), message.to_string()));
        Ok(())
    }
}

fn test_settings() -> AppSettings {
    AppSettings {
        database_url: "sqlite::memory:".to_string(),
        jwt: JwtSettings {
            secret: "test-secret-key-minimum-32-characters-long".to_string(),
            algorithm: Algorithm::HS256,
            expire_minutes: 30,
        },
        smtp: SmtpSettings {
            server: "localhost".to_string(),
            port: 587,
            username: "noreply@example.com".to_string(),
            password: String::new(),
        },
        telegram: None,
    }
}

async fn setup(
    mailer: Arc<RecordingMailer>,
    chat: Arc<RecordingChat>,
) -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    Arc::new(AppData::init(
        db,
        &test_settings(),
        Some(mailer),
        Some(chat),
    ))
}

fn bearer(token: &str) -> BearerAuth {
    BearerAuth(Bearer {
        token: token.to_string(),
    })
}

#[tokio::test]
async fn test_full_request_lifecycle_with_notifications() {
    let mailer = Arc::new(RecordingMailer::default());
    let chat = Arc::new(RecordingChat::default());
    let app_data = setup(mailer.clone(), chat.clone()).await;

    let auth_api = AuthApi::new(app_data.clone());
    let city_api = CityApi::new(app_data.clone());
    let service_api = ServiceApi::new(app_data.clone());
    let request_api = RequestApi::new(app_data.clone());

    // Bootstrap an admin directly through the stores, then log in over the API
    let bootstrap_city = app_data
        .city_store
        .insert(&CityPayload {
            name: "HQ".to_string(),
            active: true,
        })
        .await
        .unwrap();
    let admin_hash = service_center::services::crypto::hash_password("adminpass").unwrap();
    app_data
        .user_store
        .insert(
            &CreateUserRequest {
                username: "admin1".to_string(),
                email: "admin1@example.com".to_string(),
                password: "adminpass".to_string(),
                city_id: bootstrap_city.id,
                role: "admin".to_string(),
                is_active: true,
                telegram_id: None,
            },
            admin_hash,
        )
        .await
        .unwrap();

    let login = auth_api
        .login(Json(LoginRequest {
            username: "admin1".to_string(),
            password: "adminpass".to_string(),
        }))
        .await
        .expect("login should succeed");
    let admin_token = login.access_token.clone();

    // Admin creates the city and a manager with both channels configured
    let omsk = city_api
        .create_city(
            bearer(&admin_token),
            Json(CityPayload {
                name: "Omsk".to_string(),
                active: true,
            }),
        )
        .await
        .unwrap();

    auth_api
        .create_user(
            bearer(&admin_token),
            Json(CreateUserRequest {
                username: "manager1".to_string(),
                email: "manager1@example.com".to_string(),
                password: "managerpass".to_string(),
                city_id: omsk.id,
                role: "manager".to_string(),
                is_active: true,
                telegram_id: Some("chat-1".to_string()),
            }),
        )
        .await
        .unwrap();

    // A global service the customer will reference
    let diagnostics = service_api
        .create_service(
            bearer(&admin_token),
            Json(ServicePayload {
                name: "Diagnostics".to_string(),
                description: "Full device check".to_string(),
                price: 10.0,
                estimated_time: "1 day".to_string(),
                is_available: true,
                city_id: None,
            }),
        )
        .await
        .unwrap();

    // Customer submits a request without authenticating
    let created = request_api
        .create_request(Json(CreateRequestPayload {
            name: "Ivan".to_string(),
            phone: "+70000000000".to_string(),
            email: Some("ivan@example.com".to_string()),
            city_id: omsk.id,
            message: "Phone will not turn on".to_string(),
            service_id: Some(diagnostics.id),
            product_id: None,
        }))
        .await
        .expect("request creation should succeed");

    assert_eq!(created.status, "new");
    assert_eq!(created.created_at, created.updated_at);

    // The fan-out runs as a detached task; wait for it to land
    for _ in 0..100 {
        if !mailer.sent.lock().unwrap().is_empty() && !chat.sent.lock().unwrap().is_empty() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    {
        let emails = mailer.sent.lock().unwrap();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].0, "manager1@example.com");
        assert!(emails[0].1.contains("Omsk"));
        assert!(emails[0].2.contains("Diagnostics"));

        let chats = chat.sent.lock().unwrap();
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0].0, "chat-1");
    }

    // Manager logs in and works the request
    let manager_login = auth_api
        .login(Json(LoginRequest {
            username: "manager1".to_string(),
            password: "managerpass".to_string(),
        }))
        .await
        .unwrap();
    let manager_token = manager_login.access_token.clone();

    let listing = request_api
        .list_requests(
            bearer(&manager_token),
            Query(None),
            Query(None),
            Query(None),
            Query(None),
        )
        .await
        .unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, created.id);

    let completed = request_api
        .update_request_status(
            bearer(&manager_token),
            Path(created.id),
            Json(RequestStatusUpdate {
                status: "completed".to_string(),
            }),
        )
        .await
        .unwrap();
    assert_eq!(completed.status, "completed");
}
