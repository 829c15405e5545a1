//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations that
//! may end in a [`Problem`](crate::Problem).

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use problem::log_op_start;
/// log_op_start!("load_user");
/// log_op_start!("load_user", user_id = 7);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use problem::log_op_end;
/// log_op_end!("load_user", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation that ended in a problem
///
/// Records the problem's kind label, numeric code, category and title.
/// External problems are logged at `warn`, internal ones at `error`.
///
/// # Example
///
/// ```
/// # use problem::{log_op_error, Kind, Problem};
/// let problem = Problem::new(Kind::NotFound, "Not Found", "user 7 missing", None, None);
/// log_op_error!("load_user", problem, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {
        $crate::log_op_error!($op, $err, duration_ms = $duration,)
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let problem: &$crate::Problem = &$err;
        let kind = problem.kind();
        if kind.is_external() {
            tracing::warn!(
                component = module_path!(),
                op = $op,
                event = $crate::core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err.kind = kind.label(),
                err.code = kind.code(),
                err.category = kind.category(),
                err.title = problem.title(),
                $($field)*
            );
        } else {
            tracing::error!(
                component = module_path!(),
                op = $op,
                event = $crate::core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err.kind = kind.label(),
                err.code = kind.code(),
                err.category = kind.category(),
                err.title = problem.title(),
                $($field)*
            );
        }
    }};
}
