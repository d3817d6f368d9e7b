// Services layer - Business logic and orchestration
pub mod auth_service;
pub mod crypto;
pub mod notifier;
pub mod policy;
pub mod token_service;

pub use auth_service::AuthService;
pub use notifier::{ChatNotifier, Mailer, Notifier, NotifyError, SmtpMailer, TelegramNotifier};
pub use token_service::TokenService;
