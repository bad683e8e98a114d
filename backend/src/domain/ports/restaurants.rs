//! Driving port for restaurant, category, and dish management.

use async_trait::async_trait;
use pagination::{PageRequest, Paginated};

use crate::domain::restaurant::{Category, DishOption, Restaurant};
use crate::domain::user::User;
use crate::domain::Error;

/// Fields required to open a restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub cover_image: String,
    pub address: String,
    /// Free-text category name, normalised to a slug by the service.
    pub category_name: String,
}

/// Partial restaurant update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditRestaurantRequest {
    pub restaurant_id: i32,
    pub name: Option<String>,
    pub cover_image: Option<String>,
    pub address: Option<String>,
    pub category_name: Option<String>,
}

/// Fields required to add a dish to a restaurant's menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDishRequest {
    pub restaurant_id: i32,
    pub name: String,
    pub price: i32,
    pub description: String,
    pub photo: Option<String>,
    pub options: Vec<DishOption>,
}

/// Partial dish update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDishRequest {
    pub dish_id: i32,
    pub name: Option<String>,
    pub price: Option<i32>,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub options: Option<Vec<DishOption>>,
}

/// A category together with how many restaurants it groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryWithCount {
    pub category: Category,
    pub restaurant_count: u64,
}

/// A category page: the category, one window of its restaurants, totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPage {
    pub category: Category,
    pub restaurants: Vec<Restaurant>,
    pub total_results: u64,
    pub total_pages: u32,
}

/// Use-case surface for the restaurant domain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Restaurants: Send + Sync {
    /// Open a restaurant owned by `owner`, creating its category on demand.
    async fn create_restaurant(
        &self,
        owner: &User,
        request: CreateRestaurantRequest,
    ) -> Result<(), Error>;

    /// Edit a restaurant; only its owner may.
    async fn edit_restaurant(
        &self,
        owner: &User,
        request: EditRestaurantRequest,
    ) -> Result<(), Error>;

    /// Delete a restaurant; only its owner may.
    async fn delete_restaurant(&self, owner: &User, restaurant_id: i32) -> Result<(), Error>;

    /// Every category with its restaurant count.
    async fn all_categories(&self) -> Result<Vec<CategoryWithCount>, Error>;

    /// A category resolved by slug plus one page of its restaurants.
    async fn find_category_by_slug(
        &self,
        slug: &str,
        page: PageRequest,
    ) -> Result<CategoryPage, Error>;

    /// One page of all restaurants.
    async fn all_restaurants(&self, page: PageRequest) -> Result<Paginated<Restaurant>, Error>;

    /// Fetch a restaurant by id.
    async fn find_restaurant_by_id(&self, restaurant_id: i32) -> Result<Restaurant, Error>;

    /// One page of restaurants whose name contains `query`, case-insensitively.
    async fn search_restaurant_by_name(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<Paginated<Restaurant>, Error>;

    /// Add a dish to a restaurant's menu; only the restaurant's owner may.
    async fn create_dish(&self, owner: &User, request: CreateDishRequest) -> Result<(), Error>;

    /// Edit a dish; only the owning restaurant's owner may.
    async fn edit_dish(&self, owner: &User, request: EditDishRequest) -> Result<(), Error>;

    /// Delete a dish; only the owning restaurant's owner may.
    async fn delete_dish(&self, owner: &User, dish_id: i32) -> Result<(), Error>;
}
