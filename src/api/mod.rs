// API layer - HTTP endpoints
pub mod admin;
pub mod auth;
pub mod cities;
pub mod health;
pub mod products;
pub mod requests;
pub mod services;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use cities::CityApi;
pub use health::HealthApi;
pub use products::ProductApi;
pub use requests::RequestApi;
pub use services::ServiceApi;
