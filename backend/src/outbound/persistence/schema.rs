//! Diesel table definitions mirroring `backend/migrations`.
//!
//! Regenerate with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `password_hash` holds an Argon2 PHC string.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Campground listings. `comment_ids` keeps attachment order.
    listings (id) {
        id -> Uuid,
        name -> Varchar,
        image -> Text,
        description -> Text,
        comment_ids -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments with a denormalised author snapshot.
    comments (id) {
        id -> Uuid,
        body -> Text,
        created_at -> Timestamptz,
        author_id -> Uuid,
        author_username -> Varchar,
    }
}

diesel::joinable!(comments -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(users, listings, comments);
