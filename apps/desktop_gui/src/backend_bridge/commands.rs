//! Backend commands queued from UI to backend worker.

use client_core::RequestGeneration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    LoadCatalog,
    LoadCharacter {
        uri: String,
        generation: RequestGeneration,
    },
    FetchPortrait {
        uri: String,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadCatalog => "load_catalog",
            Self::LoadCharacter { .. } => "load_character",
            Self::FetchPortrait { .. } => "fetch_portrait",
        }
    }
}
