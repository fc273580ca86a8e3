//! Request validation helpers. Each rejects with `INVALID_ARGUMENT` before
//! any backend call is made.

/// Return `INVALID_ARGUMENT` with `$message` unless `$cond` holds.
///
/// ```ignore
/// require!(!request.user_id.is_empty(), "userId cannot be nil or empty");
/// ```
#[macro_export]
macro_rules! require {
    ($cond:expr, $message:expr) => {
        if !$cond {
            return Err($crate::error::RpcStatus::invalid_argument($message));
        }
    };
}

/// Require a non-empty string, yielding it.
///
/// ```ignore
/// let id = require_value!(request.value, "id cannot be nil or empty");
/// ```
#[macro_export]
macro_rules! require_value {
    ($value:expr, $message:expr) => {{
        let value = $value;
        $crate::require!(!value.is_empty(), $message);
        value
    }};
}

/// Require an optional wrapper to be present and non-empty, yielding the
/// inner value.
#[macro_export]
macro_rules! require_present {
    ($value:expr, $message:expr) => {
        match $value {
            Some(value) if !value.is_empty() => value,
            _ => return Err($crate::error::RpcStatus::invalid_argument($message)),
        }
    };
}
