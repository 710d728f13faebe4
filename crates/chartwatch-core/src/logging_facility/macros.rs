//! Operation boundary macros
//!
//! A pipeline operation logs one `start` event, then either an `end` event
//! carrying `duration_ms` or an `end_error` event carrying the error kind and
//! code. Extra `tracing` fields may follow the fixed ones in every macro.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use chartwatch_core::log_op_start;
/// log_op_start!("fetch_chart");
/// log_op_start!("fetch_chart", url = "https://example.com/chart");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = chartwatch_core_types::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use chartwatch_core::log_op_end;
/// log_op_end!("run_pipeline", duration_ms = 42, entry_count = 20);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = chartwatch_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Log an operation that ended in an error
///
/// Anything convertible into `ExError` is accepted; the event records its
/// kind, stable code and rendered message.
///
/// ```ignore
/// # use chartwatch_core::{log_op_error, errors::ChartError};
/// let err = ChartError::InvalidDate { value: "yesterday".to_string() };
/// log_op_error!("load_snapshot", err, duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = chartwatch_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            error = %ex_err,
            $($($field)*)?
        );
    }};
}
