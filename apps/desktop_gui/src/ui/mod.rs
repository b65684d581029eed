pub mod app;
pub mod portraits;

pub use app::{DreamTeamApp, TeamStore};
