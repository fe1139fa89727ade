//! Business services.

pub mod auth;
pub mod craft_score;
pub mod email;
pub mod market_demand;
pub mod speech;
pub mod storage;
pub mod translate;

pub use auth::{AuthError, AuthService};
pub use email::{EmailError, EmailService};
pub use speech::{SpeechClient, SpeechError};
pub use storage::{MediaStorage, StorageError};
pub use translate::{TranslateClient, TranslateError};
