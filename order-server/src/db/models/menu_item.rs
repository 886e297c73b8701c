//! Menu Item Model (option/choice schema)
//!
//! Consulted read-only by the pricing engine and the kitchen queue. Menu
//! CRUD endpoints live outside this service; the storage layer only exposes
//! upsert/get for seeding.

use serde::{Deserialize, Serialize};

/// Selection mode for an option group
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionType {
    /// Exactly one choice may be selected
    Single,
    /// Any number of choices may be selected
    Multiple,
}

/// One selectable choice within an option group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionChoice {
    pub id: String,
    pub name: String,
    /// Surcharge added to the unit price when selected
    #[serde(default)]
    pub price_delta: f64,
}

/// Option group on a menu item (e.g. "Size", "Extras")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionGroup {
    pub id: String,
    pub name: String,
    pub selection: SelectionType,
    /// Required groups must be selected at checkout
    #[serde(default)]
    pub required: bool,
    pub choices: Vec<OptionChoice>,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub shop_id: String,
    pub name: String,
    pub base_price: f64,
    /// Discount percentage; values outside (0, 100] are treated as no discount
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub option_groups: Vec<OptionGroup>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl MenuItem {
    /// Look up an option group by id
    pub fn option_group(&self, group_id: &str) -> Option<&OptionGroup> {
        self.option_groups.iter().find(|g| g.id == group_id)
    }
}

impl OptionGroup {
    /// Look up a choice by id
    pub fn choice(&self, choice_id: &str) -> Option<&OptionChoice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }
}
