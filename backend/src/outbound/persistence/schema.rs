//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; regenerate with
//! `diesel print-schema` after a migration changes the schema.

diesel::table! {
    /// Registered accounts across all three roles.
    users (id) {
        id -> Int4,
        /// Unique login identifier.
        email -> Varchar,
        /// Bcrypt hash; the raw credential is never stored.
        password_hash -> Varchar,
        /// One of `client`, `owner`, `delivery`.
        role -> Varchar,
        verified -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One-time email verification codes, at most one per user.
    verifications (id) {
        id -> Int4,
        code -> Varchar,
        user_id -> Int4,
    }
}

diesel::table! {
    /// Restaurant grouping tags, unique by slug.
    categories (id) {
        id -> Int4,
        name -> Varchar,
        cover_image -> Nullable<Varchar>,
        slug -> Varchar,
    }
}

diesel::table! {
    /// Restaurants, each owned by exactly one user.
    restaurants (id) {
        id -> Int4,
        name -> Varchar,
        cover_image -> Varchar,
        address -> Varchar,
        category_id -> Nullable<Int4>,
        owner_id -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Menu items; customisation options are stored as JSONB.
    dishes (id) {
        id -> Int4,
        name -> Varchar,
        /// Whole currency units.
        price -> Int4,
        photo -> Nullable<Varchar>,
        description -> Varchar,
        restaurant_id -> Int4,
        options -> Jsonb,
    }
}

diesel::table! {
    /// Orders placed against a restaurant.
    orders (id) {
        id -> Int4,
        customer_id -> Int4,
        /// Assigned when a rider picks the order up.
        driver_id -> Nullable<Int4>,
        restaurant_id -> Int4,
        /// One of `pending`, `cooking`, `cooked`, `picked_up`, `delivered`.
        status -> Varchar,
        total_price -> Nullable<Int4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Dishes within an order with the customisations chosen at order time.
    order_items (id) {
        id -> Int4,
        order_id -> Int4,
        dish_id -> Int4,
        options -> Jsonb,
    }
}

diesel::joinable!(verifications -> users (user_id));
diesel::joinable!(restaurants -> categories (category_id));
diesel::joinable!(dishes -> restaurants (restaurant_id));
diesel::joinable!(orders -> restaurants (restaurant_id));
diesel::joinable!(order_items -> orders (order_id));
diesel::joinable!(order_items -> dishes (dish_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    verifications,
    categories,
    restaurants,
    dishes,
    orders,
    order_items,
);
