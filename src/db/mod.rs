//! Database module: models, schema, and per-entity stores.
//!
//! Layout:
//! - `models.rs`: API-facing records and request inputs
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `pool.rs`: pool construction and schema bootstrap
//! - one store per entity, each holding an injected pool clone

pub mod contact;
pub mod docs;
pub mod experience;
pub mod models;
pub mod pool;
pub mod projects;
pub mod schema;

pub use contact::ContactStore;
pub use docs::DocStore;
pub use experience::ExperienceStore;
pub use models::{
    ContactInput, ContactMessage, CreateDocInput, CreateExperienceInput, CreateProjectInput,
    DocEntry, Experience, Localized, LocalizedList, Project, StatusLabel, UpdateDocInput,
};
pub use pool::{apply_schema, connect};
pub use projects::ProjectStore;
pub use schema::SQLITE_INIT;
