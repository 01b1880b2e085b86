//! Diesel schema for group persistence.

diesel::table! {
    /// Collaboration group records owned by problem tasks.
    groups (id) {
        /// Internal group identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Member JSON array.
        members -> Jsonb,
        /// Owning task.
        task_id -> Uuid,
        /// Linked problem sub-item, if any.
        problem_item_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
