//! Restaurant service implementing the [`Restaurants`] driving port.
//!
//! Owner-gated mutations over restaurants and dishes plus the public listing,
//! search, and category surface. Categories are resolved lazily: any mutation
//! that names a category gets or creates it by slug.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageRequest, Paginated, total_pages};

use crate::domain::Error;
use crate::domain::ports::{
    CategoryPage, CategoryRepository, CategoryWithCount, CreateDishRequest,
    CreateRestaurantRequest, DishRepository, EditDishRequest, EditRestaurantRequest,
    RestaurantRepository, Restaurants,
};
use crate::domain::restaurant::{
    Category, DishChanges, NewDish, NewRestaurant, Restaurant, RestaurantChanges,
};
use crate::domain::slug::slugify;
use crate::domain::user::User;

fn fault(message: &str, error: &dyn std::fmt::Display) -> Error {
    tracing::error!(error = %error, "restaurant operation failed");
    Error::internal(message)
}

/// Restaurant service over restaurant, category, and dish storage.
pub struct RestaurantService<R, C, D> {
    restaurants: Arc<R>,
    categories: Arc<C>,
    dishes: Arc<D>,
}

impl<R, C, D> RestaurantService<R, C, D> {
    /// Create the service from its repositories.
    pub fn new(restaurants: Arc<R>, categories: Arc<C>, dishes: Arc<D>) -> Self {
        Self {
            restaurants,
            categories,
            dishes,
        }
    }
}

impl<R, C, D> RestaurantService<R, C, D>
where
    R: RestaurantRepository,
    C: CategoryRepository,
    D: DishRepository,
{
    async fn resolve_category(
        &self,
        name: &str,
        failure: &str,
    ) -> Result<Category, Error> {
        let trimmed = name.trim();
        let slug = slugify(trimmed);
        self.categories
            .get_or_create(trimmed, &slug)
            .await
            .map_err(|error| fault(failure, &error))
    }

    async fn owned_restaurant(
        &self,
        owner: &User,
        restaurant_id: i32,
        denial: &str,
        failure: &str,
    ) -> Result<Restaurant, Error> {
        let restaurant = self
            .restaurants
            .find_by_id(restaurant_id)
            .await
            .map_err(|error| fault(failure, &error))?
            .ok_or_else(|| Error::not_found("Restaurant not found"))?;
        if restaurant.owner_id != owner.id {
            return Err(Error::forbidden(denial));
        }
        Ok(restaurant)
    }
}

#[async_trait]
impl<R, C, D> Restaurants for RestaurantService<R, C, D>
where
    R: RestaurantRepository,
    C: CategoryRepository,
    D: DishRepository,
{
    async fn create_restaurant(
        &self,
        owner: &User,
        request: CreateRestaurantRequest,
    ) -> Result<(), Error> {
        let category = self
            .resolve_category(&request.category_name, "Could not create restaurant")
            .await?;
        self.restaurants
            .insert(NewRestaurant {
                name: request.name,
                cover_image: request.cover_image,
                address: request.address,
                category_id: category.id,
                owner_id: owner.id,
            })
            .await
            .map_err(|error| fault("Could not create restaurant", &error))?;
        Ok(())
    }

    async fn edit_restaurant(
        &self,
        owner: &User,
        request: EditRestaurantRequest,
    ) -> Result<(), Error> {
        self.owned_restaurant(
            owner,
            request.restaurant_id,
            "You can't edit a restaurant that you don't own",
            "Could not edit Restaurant",
        )
        .await?;

        let category_id = match request.category_name {
            Some(name) => Some(
                self.resolve_category(&name, "Could not edit Restaurant")
                    .await?
                    .id,
            ),
            None => None,
        };

        self.restaurants
            .update(
                request.restaurant_id,
                RestaurantChanges {
                    name: request.name,
                    cover_image: request.cover_image,
                    address: request.address,
                    category_id,
                },
            )
            .await
            .map_err(|error| fault("Could not edit Restaurant", &error))
    }

    async fn delete_restaurant(&self, owner: &User, restaurant_id: i32) -> Result<(), Error> {
        self.owned_restaurant(
            owner,
            restaurant_id,
            "You can't delete a restaurant that you don't own",
            "Could not delete restaurant.",
        )
        .await?;
        self.restaurants
            .delete(restaurant_id)
            .await
            .map_err(|error| fault("Could not delete restaurant.", &error))
    }

    async fn all_categories(&self) -> Result<Vec<CategoryWithCount>, Error> {
        let categories = self
            .categories
            .all()
            .await
            .map_err(|error| fault("Could not load categories", &error))?;

        let mut counted = Vec::with_capacity(categories.len());
        for category in categories {
            let restaurant_count = self
                .restaurants
                .count_by_category(category.id)
                .await
                .map_err(|error| fault("Could not load categories", &error))?;
            counted.push(CategoryWithCount {
                category,
                restaurant_count,
            });
        }
        Ok(counted)
    }

    async fn find_category_by_slug(
        &self,
        slug: &str,
        page: PageRequest,
    ) -> Result<CategoryPage, Error> {
        let category = self
            .categories
            .find_by_slug(slug)
            .await
            .map_err(|error| fault("Could not load category", &error))?
            .ok_or_else(|| Error::not_found("Category not found"))?;

        let restaurants = self
            .restaurants
            .find_by_category(category.id, page)
            .await
            .map_err(|error| fault("Could not load category", &error))?;
        let total_results = self
            .restaurants
            .count_by_category(category.id)
            .await
            .map_err(|error| fault("Could not load category", &error))?;

        Ok(CategoryPage {
            category,
            restaurants,
            total_results,
            total_pages: total_pages(total_results),
        })
    }

    async fn all_restaurants(&self, page: PageRequest) -> Result<Paginated<Restaurant>, Error> {
        let (results, total) = self
            .restaurants
            .list(page)
            .await
            .map_err(|error| fault("Could not load restaurants", &error))?;
        Ok(Paginated::new(results, total))
    }

    async fn find_restaurant_by_id(&self, restaurant_id: i32) -> Result<Restaurant, Error> {
        self.restaurants
            .find_by_id(restaurant_id)
            .await
            .map_err(|error| fault("Could not find restaurant", &error))?
            .ok_or_else(|| Error::not_found("Restaurant not found"))
    }

    async fn search_restaurant_by_name(
        &self,
        query: &str,
        page: PageRequest,
    ) -> Result<Paginated<Restaurant>, Error> {
        let (results, total) = self
            .restaurants
            .search_by_name(query, page)
            .await
            .map_err(|error| fault("Could not search for restaurants", &error))?;
        Ok(Paginated::new(results, total))
    }

    async fn create_dish(&self, owner: &User, request: CreateDishRequest) -> Result<(), Error> {
        self.owned_restaurant(
            owner,
            request.restaurant_id,
            "You can't do that.",
            "Could not create dish",
        )
        .await?;
        self.dishes
            .insert(NewDish {
                name: request.name,
                price: request.price,
                photo: request.photo,
                description: request.description,
                restaurant_id: request.restaurant_id,
                options: request.options,
            })
            .await
            .map_err(|error| fault("Could not create dish", &error))?;
        Ok(())
    }

    async fn edit_dish(&self, owner: &User, request: EditDishRequest) -> Result<(), Error> {
        let dish = self
            .dishes
            .find_by_id(request.dish_id)
            .await
            .map_err(|error| fault("Could not edit dish", &error))?
            .ok_or_else(|| Error::not_found("Dish not found"))?;
        self.owned_restaurant(
            owner,
            dish.restaurant_id,
            "You can't do that.",
            "Could not edit dish",
        )
        .await?;

        self.dishes
            .update(
                request.dish_id,
                DishChanges {
                    name: request.name,
                    price: request.price,
                    photo: request.photo,
                    description: request.description,
                    options: request.options,
                },
            )
            .await
            .map_err(|error| fault("Could not edit dish", &error))
    }

    async fn delete_dish(&self, owner: &User, dish_id: i32) -> Result<(), Error> {
        let dish = self
            .dishes
            .find_by_id(dish_id)
            .await
            .map_err(|error| fault("Could not delete dish", &error))?
            .ok_or_else(|| Error::not_found("Dish not found"))?;
        self.owned_restaurant(
            owner,
            dish.restaurant_id,
            "You can't do that.",
            "Could not delete dish",
        )
        .await?;

        self.dishes
            .delete(dish_id)
            .await
            .map_err(|error| fault("Could not delete dish", &error))
    }
}

#[cfg(test)]
#[path = "restaurant_service_tests.rs"]
mod tests;
