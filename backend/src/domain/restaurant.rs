//! Restaurant, category, and dish aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tag grouping restaurants, identified by a slug derived from its name.
///
/// Categories are created on demand when a restaurant references a name with
/// no existing slug, and are never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub cover_image: Option<String>,
    /// Unique canonical identifier; see [`crate::domain::slug::slugify`].
    pub slug: String,
}

/// A restaurant owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub cover_image: String,
    pub address: String,
    pub category_id: Option<i32>,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a restaurant row that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub name: String,
    pub cover_image: String,
    pub address: String,
    pub category_id: i32,
    pub owner_id: i32,
}

/// A customisation choice within a dish option ("size: large, +2").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChoice {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<i32>,
}

/// A customisation axis offered by a dish ("spice level", "size").
///
/// Either the option itself carries a flat `extra` charge, or individual
/// choices carry their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishOption {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<OptionChoice>,
}

/// A menu item belonging to exactly one restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dish {
    pub id: i32,
    pub name: String,
    /// Whole currency units.
    pub price: i32,
    pub photo: Option<String>,
    pub description: String,
    pub restaurant_id: i32,
    pub options: Vec<DishOption>,
}

/// Fields for a dish row that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDish {
    pub name: String,
    pub price: i32,
    pub photo: Option<String>,
    pub description: String,
    pub restaurant_id: i32,
    pub options: Vec<DishOption>,
}

/// Partial update applied to an existing restaurant.
///
/// `None` fields are left untouched; the category is only reassigned when a
/// new category id is supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantChanges {
    pub name: Option<String>,
    pub cover_image: Option<String>,
    pub address: Option<String>,
    pub category_id: Option<i32>,
}

/// Partial update applied to an existing dish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DishChanges {
    pub name: Option<String>,
    pub price: Option<i32>,
    pub photo: Option<String>,
    pub description: Option<String>,
    pub options: Option<Vec<DishOption>>,
}

impl Dish {
    /// Locate a customisation axis by name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&DishOption> {
        self.options.iter().find(|option| option.name == name)
    }
}

impl DishOption {
    /// Locate a choice by name.
    #[must_use]
    pub fn choice(&self, name: &str) -> Option<&OptionChoice> {
        self.choices.iter().find(|choice| choice.name == name)
    }
}
