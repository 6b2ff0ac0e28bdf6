//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Trimmed task title.
        #[max_length = 200]
        title -> Varchar,
        /// Optional free-form description.
        #[max_length = 1000]
        description -> Nullable<Varchar>,
        /// Completion flag.
        is_completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}
