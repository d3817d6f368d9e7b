use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;

use crate::config::SmtpSettings;
use crate::types::db::{city, product, request, service, user};
use crate::types::internal::role::Role;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("smtp delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("invalid email message: {0}")]
    Email(#[from] lettre::error::Error),

    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("telegram request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("telegram API returned status {0}")]
    TelegramStatus(reqwest::StatusCode),
}

/// Email delivery channel, accepting (recipient, subject, body)
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Chat delivery channel, accepting (chat id, formatted message)
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    async fn send(&self, chat_id: &str, message: &str) -> Result<(), NotifyError>;
}

/// SMTP mailer (STARTTLS) built from the SMTP settings
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, NotifyError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.server)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        let from: Mailbox = settings.username.parse()?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient.parse()?)
            .subject(subject)
            .body(body.to_string())?;

        self.transport.send(message).await?;

        Ok(())
    }
}

/// Telegram Bot API channel
pub struct TelegramNotifier {
    client: reqwest::Client,
    bot_token: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            bot_token,
        }
    }
}

#[async_trait]
impl ChatNotifier for TelegramNotifier {
    async fn send(&self, chat_id: &str, message: &str) -> Result<(), NotifyError> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": chat_id,
                "text": message,
                "parse_mode": "HTML",
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::TelegramStatus(response.status()));
        }

        Ok(())
    }
}

/// Fan-out of new-request notifications to the owning city's managers
///
/// Runs detached from the HTTP response path. Delivery is best effort:
/// each manager and channel is attempted independently, failures are
/// logged and never retried, and nothing is reported to the customer.
pub struct Notifier {
    db: DatabaseConnection,
    mailer: Option<Arc<dyn Mailer>>,
    chat: Option<Arc<dyn ChatNotifier>>,
}

impl Notifier {
    pub fn new(
        db: DatabaseConnection,
        mailer: Option<Arc<dyn Mailer>>,
        chat: Option<Arc<dyn ChatNotifier>>,
    ) -> Self {
        Self { db, mailer, chat }
    }

    /// Notify all active managers of the request's city
    ///
    /// Aborts silently when the request or its city cannot be reloaded;
    /// the request itself stays untouched either way.
    pub async fn notify_managers(&self, request_id: i32) {
        let request = match request::Entity::find_by_id(request_id).one(&self.db).await {
            Ok(Some(request)) => request,
            Ok(None) => return,
            Err(e) => {
                tracing::error!(request_id, error = %e, "failed to reload request for notification");
                return;
            }
        };

        let city = match city::Entity::find_by_id(request.city_id).one(&self.db).await {
            Ok(Some(city)) => city,
            Ok(None) => return,
            Err(e) => {
                tracing::error!(request_id, error = %e, "failed to reload city for notification");
                return;
            }
        };

        let managers = match user::Entity::find()
            .filter(user::Column::CityId.eq(request.city_id))
            .filter(user::Column::Role.eq(Role::Manager.as_str()))
            .filter(user::Column::IsActive.eq(true))
            .all(&self.db)
            .await
        {
            Ok(managers) => managers,
            Err(e) => {
                tracing::error!(request_id, error = %e, "failed to load managers for notification");
                return;
            }
        };

        let (subject, body) = self.build_notification(&request, &city).await;

        for manager in managers {
            if let Some(mailer) = &self.mailer {
                if !manager.email.is_empty() {
                    if let Err(e) = mailer.send(&manager.email, &subject, &body).await {
                        tracing::error!(
                            request_id,
                            manager = %manager.username,
                            error = %e,
                            "email notification failed"
                        );
                    }
                }
            }

            if let Some(chat) = &self.chat {
                if let Some(chat_id) = &manager.telegram_id {
                    let text = format!("<b>{}</b>\n\n{}", subject, body);
                    if let Err(e) = chat.send(chat_id, &text).await {
                        tracing::error!(
                            request_id,
                            manager = %manager.username,
                            error = %e,
                            "telegram notification failed"
                        );
                    }
                }
            }
        }
    }

    /// Build the single human-readable notification for a request
    async fn build_notification(
        &self,
        request: &request::Model,
        city: &city::Model,
    ) -> (String, String) {
        let subject = format!("New request #{} from {}", request.id, city.name);

        let mut body = format!("A new request #{} has arrived\n\n", request.id);
        body.push_str(&format!("Customer: {}\n", request.name));
        body.push_str(&format!("Phone: {}\n", request.phone));
        if let Some(email) = &request.email {
            body.push_str(&format!("Email: {}\n", email));
        }
        body.push_str(&format!("City: {}\n", city.name));
        body.push_str(&format!("Message: {}\n", request.message));

        if let Some(service_id) = request.service_id {
            if let Ok(Some(service)) = service::Entity::find_by_id(service_id).one(&self.db).await {
                body.push_str(&format!("Service: {}\n", service.name));
            }
        }

        if let Some(product_id) = request.product_id {
            if let Ok(Some(product)) = product::Entity::find_by_id(product_id).one(&self.db).await {
                body.push_str(&format!("Product: {}\n", product.name));
            }
        }

        (subject, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, Database, Set};
    use std::sync::Mutex;

    /// Mailer fake that records every send
    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<(String, String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(
            &self,
            recipient: &str,
            subject: &str,
            body: &str,
        ) -> Result<(), NotifyError> {
            if self.fail {
                let err = "not-an-address".parse::<lettre::Address>().unwrap_err();
                return Err(NotifyError::Address(err));
            }
            self.sent.lock().unwrap().push((
                recipient.to_string(),
                subject.to_string(),
                body.to_string(),
            ));
            Ok(())
        }
    }

    /// Chat fake that records every send
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

    async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    async fn seed_city(db: &DatabaseConnection, name: &str) -> city::Model {
        city::ActiveModel {
            name: Set(name.to_string()),
            active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to seed city")
    }

    async fn seed_user(
        db: &DatabaseConnection,
        username: &str,
        city_id: i32,
        role: &str,
        active: bool,
        telegram_id: Option<&str>,
    ) -> user::Model {
        user::ActiveModel {
            username: Set(username.to_string()),
            email: Set(format!("{}@example.com", username)),
            password_hash: Set("hash".to_string()),
            city_id: Set(city_id),
            role: Set(role.to_string()),
            is_active: Set(active),
            telegram_id: Set(telegram_id.map(str::to_string)),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to seed user")
    }

    async fn seed_request(db: &DatabaseConnection, city_id: i32) -> request::Model {
        request::ActiveModel {
            name: Set("Ivan".to_string()),
            phone: Set("+70000000000".to_string()),
            email: Set(Some("ivan@example.com".to_string())),
            city_id: Set(city_id),
            message: Set("Screen is broken".to_string()),
            status: Set("new".to_string()),
            created_at: Set(0),
            updated_at: Set(0),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to seed request")
    }

    #[tokio::test]
    async fn test_notify_managers_sends_both_channels() {
        let db = setup_test_db().await;
        let city = seed_city(&db, "Omsk").await;
        seed_user(&db, "manager1", city.id, "manager", true, Some("chat-1")).await;
        let request = seed_request(&db, city.id).await;

        let mailer = Arc::new(RecordingMailer::default());
        let chat = Arc::new(RecordingChat::default());
        let notifier = Notifier::new(db, Some(mailer.clone()), Some(chat.clone()));

        notifier.notify_managers(request.id).await;

        let emails = mailer.sent.lock().unwrap();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].0, "manager1@example.com");
        assert!(emails[0].1.contains("Omsk"));
        assert!(emails[0].2.contains("Ivan"));
        assert!(emails[0].2.contains("+70000000000"));
        assert!(emails[0].2.contains("Screen is broken"));

        let chats = chat.sent.lock().unwrap();
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0].0, "chat-1");
        assert!(chats[0].1.contains("<b>"));
    }

    #[tokio::test]
    async fn test_notify_managers_with_no_managers_is_a_noop() {
        let db = setup_test_db().await;
        let city = seed_city(&db, "Omsk").await;
        let request = seed_request(&db, city.id).await;

        let mailer = Arc::new(RecordingMailer::default());
        let chat = Arc::new(RecordingChat::default());
        let notifier = Notifier::new(db.clone(), Some(mailer.clone()), Some(chat.clone()));

        notifier.notify_managers(request.id).await;

        assert!(mailer.sent.lock().unwrap().is_empty());
        assert!(chat.sent.lock().unwrap().is_empty());

        // The request itself is untouched
        let reloaded = request::Entity::find_by_id(request.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.status, "new");
    }

    #[tokio::test]
    async fn test_notify_managers_skips_other_cities_and_inactive_staff() {
        let db = setup_test_db().await;
        let city = seed_city(&db, "Omsk").await;
        let other_city = seed_city(&db, "Tomsk").await;
        seed_user(&db, "local", city.id, "manager", true, None).await;
        seed_user(&db, "faraway", other_city.id, "manager", true, None).await;
        seed_user(&db, "retired", city.id, "manager", false, None).await;
        seed_user(&db, "boss", city.id, "admin", true, None).await;
        let request = seed_request(&db, city.id).await;

        let mailer = Arc::new(RecordingMailer::default());
        let notifier = Notifier::new(db, Some(mailer.clone()), None);

        notifier.notify_managers(request.id).await;

        let emails = mailer.sent.lock().unwrap();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].0, "local@example.com");
    }

    #[tokio::test]
    async fn test_email_failure_does_not_block_chat_channel() {
        let db = setup_test_db().await;
        let city = seed_city(&db, "Omsk").await;
        seed_user(&db, "manager1", city.id, "manager", true, Some("chat-1")).await;
        let request = seed_request(&db, city.id).await;

        let mailer = Arc::new(RecordingMailer {
            sent: Mutex::new(Vec::new()),
            fail: true,
        });
        let chat = Arc::new(RecordingChat::default());
        let notifier = Notifier::new(db, Some(mailer.clone()), Some(chat.clone()));

        notifier.notify_managers(request.id).await;

        assert!(mailer.sent.lock().unwrap().is_empty());
        assert_eq!(chat.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_manager_without_telegram_gets_email_only() {
        let db = setup_test_db().await;
        let city = seed_city(&db, "Omsk").await;
        seed_user(&db, "manager1", city.id, "manager", true, None).await;
        let request = seed_request(&db, city.id).await;

        let mailer = Arc::new(RecordingMailer::default());
        let chat = Arc::new(RecordingChat::default());
        let notifier = Notifier::new(db, Some(mailer.clone()), Some(chat.clone()));

        notifier.notify_managers(request.id).await;

        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
        assert!(chat.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_request_aborts_silently() {
        let db = setup_test_db().await;

        let mailer = Arc::new(RecordingMailer::default());
        let notifier = Notifier::new(db, Some(mailer.clone()), None);

        notifier.notify_managers(4242).await;

        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_notification_includes_service_and_product_names() {
        let db = setup_test_db().await;
        let city = seed_city(&db, "Omsk").await;
        seed_user(&db, "manager1", city.id, "manager", true, None).await;

        let service = service::ActiveModel {
            name: Set("Screen replacement".to_string()),
            description: Set("Replace a cracked screen".to_string()),
            price: Set(100.0),
            estimated_time: Set("2 days".to_string()),
            is_available: Set(true),
            city_id: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let request = request::ActiveModel {
            name: Set("Ivan".to_string()),
            phone: Set("+70000000000".to_string()),
            email: Set(None),
            city_id: Set(city.id),
            message: Set("Please fix".to_string()),
            service_id: Set(Some(service.id)),
            status: Set("new".to_string()),
            created_at: Set(0),
            updated_at: Set(0),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let mailer = Arc::new(RecordingMailer::default());
        let notifier = Notifier::new(db, Some(mailer.clone()), None);

        notifier.notify_managers(request.id).await;

        let emails = mailer.sent.lock().unwrap();
        assert_eq!(emails.len(), 1);
        assert!(emails[0].2.contains("Screen replacement"));
        // No email line for a request submitted without one
        assert!(!emails[0].2.contains("Email:"));
    }
}
