//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with checklist, assignment, and assessment payloads.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional long-form description.
        description -> Nullable<Text>,
        /// Priority level.
        #[max_length = 20]
        priority -> Varchar,
        /// Current status.
        #[max_length = 20]
        status -> Varchar,
        /// Category fixed at creation.
        #[max_length = 20]
        category -> Varchar,
        /// Due date.
        due_date -> Timestamptz,
        /// Ordered checklist items.
        checklist -> Jsonb,
        /// Derived progress percentage.
        progress -> SmallInt,
        /// Assigned user identifiers, stored as a JSON array for
        /// containment queries.
        assignees -> Jsonb,
        /// Creating administrator.
        created_by -> Uuid,
        /// Opaque attachment references.
        attachments -> Jsonb,
        /// Assessment payload: essay questions, multiple-choice questions,
        /// and problem sub-items.
        questions -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
