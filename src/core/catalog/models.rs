//! Catalog Item Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SearchError};

/// Named grouping of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

impl Category {
    /// Create a category. The name must not be blank.
    pub fn new(id: u64, name: impl Into<String>) -> Result<Self> {
        let category = Self {
            id,
            name: name.into(),
        };
        category.validate()?;
        Ok(category)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SearchError::InvalidInput(format!(
                "category {} has an empty name",
                self.id
            )));
        }
        Ok(())
    }
}

/// Catalog entry as seen by the search pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    /// Free text, may be missing entirely
    #[serde(default)]
    pub description: Option<String>,
    pub category: Category,
    pub price: f64,
    /// Units in stock; unsigned so it can never go negative
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub is_with_prescription: bool,
    /// Image reference (path or URL), never searched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Create an over-the-counter item with zero quantity and no description.
    pub fn new(id: u64, name: impl Into<String>, category: Category, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            category,
            price,
            quantity: 0,
            is_with_prescription: false,
            image: None,
            updated_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_prescription(mut self, required: bool) -> Self {
        self.is_with_prescription = required;
        self
    }

    /// Lowercased item name, the text the ranker embeds.
    pub fn name_lower(&self) -> String {
        self.name.to_lowercase()
    }

    /// Lowercased whitespace tokens of the description; empty when missing.
    pub fn description_tokens(&self) -> Vec<String> {
        self.description
            .as_deref()
            .map(|d| d.to_lowercase().split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        self.category.validate()
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
