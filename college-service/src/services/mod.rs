pub mod credentials;
pub mod database;
pub mod enrollments;
pub mod error;
pub mod metrics;
pub mod records;
pub mod seed;
pub mod store;
pub mod token;

pub use credentials::{CredentialProvider, StaticCredentials};
pub use database::{MongoDb, MongoStore};
pub use enrollments::EnrollmentService;
pub use error::ServiceError;
pub use records::RecordService;
pub use seed::seed_demo_data;
pub use store::{MemoryStore, Page, RecordStore};
pub use token::{Identity, IssuedToken, TokenClaims, TokenService};
