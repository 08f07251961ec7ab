//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the range of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 4xxx: Booking errors (45xx: visit requests)
/// - 5xxx: Rating errors (55xx: comments)
/// - 6xxx: Vendor/listing errors (65xx: uploads)
/// - 8xxx: Account errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Booking errors (40xx-44xx)
    Booking,
    /// Visit request errors (45xx)
    Visit,
    /// Rating errors (50xx-54xx)
    Rating,
    /// Comment errors (55xx)
    Comment,
    /// Vendor/listing errors (60xx-64xx)
    Vendor,
    /// Upload errors (65xx)
    Upload,
    /// Account errors (8xxx)
    Account,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            4000..4500 => Self::Booking,
            4500..5000 => Self::Visit,
            5000..5500 => Self::Rating,
            5500..6000 => Self::Comment,
            6000..6500 => Self::Vendor,
            6500..7000 => Self::Upload,
            8000..9000 => Self::Account,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Booking => "booking",
            Self::Visit => "visit",
            Self::Rating => "rating",
            Self::Comment => "comment",
            Self::Vendor => "vendor",
            Self::Upload => "upload",
            Self::Account => "account",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(7), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Booking);
        assert_eq!(ErrorCategory::from_code(4501), ErrorCategory::Visit);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Rating);
        assert_eq!(ErrorCategory::from_code(5501), ErrorCategory::Comment);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Vendor);
        assert_eq!(ErrorCategory::from_code(6501), ErrorCategory::Upload);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::Account);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::Success.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::NotAuthenticated.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::DateAlreadyBooked.category(),
            ErrorCategory::Booking
        );
        assert_eq!(ErrorCode::VisitNotFound.category(), ErrorCategory::Visit);
        assert_eq!(
            ErrorCode::NotEligibleToRate.category(),
            ErrorCategory::Rating
        );
        assert_eq!(
            ErrorCode::NotEligibleToComment.category(),
            ErrorCategory::Comment
        );
        assert_eq!(ErrorCode::VendorNotFound.category(), ErrorCategory::Vendor);
        assert_eq!(ErrorCode::FileTooLarge.category(), ErrorCategory::Upload);
        assert_eq!(ErrorCode::AccountNotFound.category(), ErrorCategory::Account);
        assert_eq!(ErrorCode::InternalError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Booking).unwrap();
        assert_eq!(json, "\"booking\"");
    }
}
