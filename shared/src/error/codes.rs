//! Unified error codes for the menu service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Age confirmation errors
//! - 4xxx: Order errors
//! - 6xxx: Catalog errors (categories, dishes)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so browser scripts can
/// branch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Username is already taken
    UsernameExists = 1008,
    /// Password too short
    PasswordTooShort = 1009,
    /// Password and confirmation differ
    PasswordMismatch = 1010,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Staff or superuser required
    StaffRequired = 2002,

    // ==================== 3xxx: Age ====================
    /// 21+ content needs an age confirmation first
    AgeRequired = 3001,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// User has no order in the `new` state
    NoOpenOrder = 4002,
    /// Order has no items
    OrderEmpty = 4003,
    /// User's open order is already with the kitchen
    OrderInKitchen = 4004,
    /// Status change not allowed from the current status
    InvalidTransition = 4005,

    // ==================== 6xxx: Catalog ====================
    /// Dish not found
    DishNotFound = 6001,
    /// Dish is not available for ordering
    DishUnavailable = 6002,
    /// Dish price is invalid
    InvalidPrice = 6003,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category still has dishes
    CategoryHasDishes = 6102,
    /// Slug already used
    SlugExists = 6103,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Session has expired",
            ErrorCode::TokenInvalid => "Session token is invalid",
            ErrorCode::UsernameExists => "Username is already taken",
            ErrorCode::PasswordTooShort => "Password is too short",
            ErrorCode::PasswordMismatch => "Passwords do not match",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::StaffRequired => "Staff account required",

            // Age
            ErrorCode::AgeRequired => "Age confirmation (21+) required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::NoOpenOrder => "Nothing to submit",
            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::OrderInKitchen => "Order is already with the kitchen",
            ErrorCode::InvalidTransition => "Order status change not allowed",

            // Catalog
            ErrorCode::DishNotFound => "Dish not found",
            ErrorCode::DishUnavailable => "Dish is not available",
            ErrorCode::InvalidPrice => "Invalid price",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasDishes => "Category still has dishes",
            ErrorCode::SlugExists => "Slug is already used",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }

    /// Short machine key used in the `{ok, error}` action payloads
    pub const fn key(&self) -> &'static str {
        match self {
            ErrorCode::AgeRequired => "age_required",
            ErrorCode::NoOpenOrder => "no_order",
            ErrorCode::OrderEmpty => "empty",
            ErrorCode::OrderInKitchen => "order_in_kitchen",
            ErrorCode::InvalidTransition => "invalid_transition",
            ErrorCode::DishUnavailable => "unavailable",
            ErrorCode::NotFound
            | ErrorCode::OrderNotFound
            | ErrorCode::DishNotFound
            | ErrorCode::CategoryNotFound => "not_found",
            ErrorCode::NotAuthenticated | ErrorCode::TokenExpired | ErrorCode::TokenInvalid => {
                "unauthorized"
            }
            ErrorCode::PermissionDenied | ErrorCode::StaffRequired => "forbidden",
            ErrorCode::InternalError | ErrorCode::DatabaseError | ErrorCode::ConfigError => {
                "internal"
            }
            _ => "invalid",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1008 => Ok(ErrorCode::UsernameExists),
            1009 => Ok(ErrorCode::PasswordTooShort),
            1010 => Ok(ErrorCode::PasswordMismatch),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::StaffRequired),

            // Age
            3001 => Ok(ErrorCode::AgeRequired),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::NoOpenOrder),
            4003 => Ok(ErrorCode::OrderEmpty),
            4004 => Ok(ErrorCode::OrderInKitchen),
            4005 => Ok(ErrorCode::InvalidTransition),

            // Catalog
            6001 => Ok(ErrorCode::DishNotFound),
            6002 => Ok(ErrorCode::DishUnavailable),
            6003 => Ok(ErrorCode::InvalidPrice),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6102 => Ok(ErrorCode::CategoryHasDishes),
            6103 => Ok(ErrorCode::SlugExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::StaffRequired.code(), 2002);
        assert_eq!(ErrorCode::AgeRequired.code(), 3001);
        assert_eq!(ErrorCode::OrderEmpty.code(), 4003);
        assert_eq!(ErrorCode::CategoryHasDishes.code(), 6102);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(4002), Ok(ErrorCode::NoOpenOrder));
        assert_eq!(ErrorCode::try_from(6103), Ok(ErrorCode::SlugExists));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
        assert_eq!(ErrorCode::try_from(7001), Err(InvalidErrorCode(7001)));
        assert_eq!(ErrorCode::try_from(3002), Err(InvalidErrorCode(3002)));
    }

    #[test]
    fn test_roundtrip_every_code() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidCredentials,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::UsernameExists,
            ErrorCode::PasswordTooShort,
            ErrorCode::PasswordMismatch,
            ErrorCode::PermissionDenied,
            ErrorCode::StaffRequired,
            ErrorCode::AgeRequired,
            ErrorCode::OrderNotFound,
            ErrorCode::NoOpenOrder,
            ErrorCode::OrderEmpty,
            ErrorCode::OrderInKitchen,
            ErrorCode::InvalidTransition,
            ErrorCode::DishNotFound,
            ErrorCode::DishUnavailable,
            ErrorCode::InvalidPrice,
            ErrorCode::CategoryNotFound,
            ErrorCode::CategoryHasDishes,
            ErrorCode::SlugExists,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
            ErrorCode::ConfigError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::AgeRequired).unwrap();
        assert_eq!(json, "3001");
        let code: ErrorCode = serde_json::from_str("4003").unwrap();
        assert_eq!(code, ErrorCode::OrderEmpty);
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(ErrorCode::AgeRequired.key(), "age_required");
        assert_eq!(ErrorCode::NoOpenOrder.key(), "no_order");
        assert_eq!(ErrorCode::OrderEmpty.key(), "empty");
        assert_eq!(ErrorCode::OrderNotFound.key(), "not_found");
        assert_eq!(ErrorCode::DishNotFound.key(), "not_found");
    }
}
