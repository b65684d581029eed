//! UI/backend events and error modeling for the desktop controller.

use client_core::RequestGeneration;
use shared::domain::Character;

use crate::media::PortraitImage;

pub enum UiEvent {
    Info(String),
    CatalogLoaded(Vec<Character>),
    CatalogFailed(UiError),
    CharacterLoaded {
        generation: RequestGeneration,
        character: Character,
    },
    CharacterFailed {
        generation: RequestGeneration,
        error: UiError,
    },
    PortraitLoaded {
        uri: String,
        image: PortraitImage,
    },
    PortraitFailed {
        uri: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Storage,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Catalog,
    CharacterDetail,
    Team,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("persist")
            || message_lower.contains("storage")
            || message_lower.contains("failed to write")
            || message_lower.contains("disk")
        {
            UiErrorCategory::Storage
        } else if message_lower.contains("invalid")
            || message_lower.contains("malformed")
            || message_lower.contains("decode")
            || message_lower.contains("payload")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("request to")
            || message_lower.contains("returned http")
            || message_lower.contains("dns")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Validation => "Data",
        UiErrorCategory::Storage => "Storage",
        UiErrorCategory::Unknown => "Error",
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
