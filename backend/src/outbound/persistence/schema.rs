//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    /// Stored pastes keyed by their public slug.
    pastes (slug) {
        #[max_length = 16]
        slug -> Varchar,
        content -> Text,
        /// Null when the paste never expires.
        expires_at -> Nullable<Timestamptz>,
        /// Null when reads are unlimited.
        max_views -> Nullable<Int4>,
        view_count -> Int4,
        created_at -> Timestamptz,
    }
}
