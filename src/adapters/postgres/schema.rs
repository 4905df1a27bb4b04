//! Diesel schema for the kanban tables.

diesel::table! {
    /// Top-level boards.
    boards (id) {
        /// Surrogate identifier.
        id -> Int8,
        /// Board name.
        #[max_length = 500]
        name -> Varchar,
        /// Board description.
        #[max_length = 1000]
        description -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered columns within a board.
    #[sql_name = "columns"]
    board_columns (id) {
        /// Surrogate identifier.
        id -> Int8,
        /// Column name, unique per board.
        #[max_length = 255]
        name -> Varchar,
        /// Owning board.
        board -> Int8,
        /// Ordering key, unique per board.
        position -> Float8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks within a column.
    tasks (id) {
        /// Surrogate identifier.
        id -> Int8,
        /// Task name.
        #[max_length = 500]
        name -> Varchar,
        /// Task description.
        #[max_length = 5000]
        description -> Varchar,
        /// Owning column.
        #[sql_name = "column"]
        column_id -> Int8,
        /// Ordering key, unique per column.
        position -> Float8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments attached to a task.
    comments (id) {
        /// Surrogate identifier.
        id -> Int8,
        /// Comment body.
        #[max_length = 5000]
        text -> Varchar,
        /// Owning task.
        task -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(board_columns -> boards (board));
diesel::joinable!(tasks -> board_columns (column_id));
diesel::joinable!(comments -> tasks (task));

diesel::allow_tables_to_appear_in_same_query!(boards, board_columns, tasks, comments);
