//! Unified error codes for the Trellis marketplace
//!
//! This module defines all error codes used across the server and clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Booking errors (45xx: visit requests)
//! - 5xxx: Rating errors (55xx: comments)
//! - 6xxx: Vendor/listing errors (65xx: uploads)
//! - 8xxx: Account errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
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
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// Password too short
    PasswordTooShort = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,
    /// Caller does not own the target resource
    NotResourceOwner = 2004,

    // ==================== 4xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 4001,
    /// Date already has a confirmed booking for this vendor
    DateAlreadyBooked = 4002,
    /// Requested date is in the past
    DateInPast = 4003,
    /// Booking has already been cancelled
    BookingAlreadyCancelled = 4004,

    // ==================== 45xx: Visit Requests ====================
    /// Visit request not found
    VisitNotFound = 4501,

    // ==================== 5xxx: Rating ====================
    /// Caller has no confirmed booking with this vendor
    NotEligibleToRate = 5001,
    /// Star value outside 1..=5
    InvalidStarValue = 5002,

    // ==================== 55xx: Comments ====================
    /// Caller has no confirmed booking with this vendor
    NotEligibleToComment = 5501,
    /// Comment body is empty
    CommentEmpty = 5502,

    // ==================== 6xxx: Vendor / Listing ====================
    /// Vendor not found
    VendorNotFound = 6001,
    /// Vendor is not accepting bookings
    VendorNotAccepting = 6002,
    /// Account already has a vendor profile
    VendorProfileExists = 6003,
    /// Listing not found
    ListingNotFound = 6101,
    /// Listing has invalid price
    ListingInvalidPrice = 6102,

    // ==================== 65xx: File Upload ====================
    /// File too large
    FileTooLarge = 6501,
    /// Unsupported file format
    UnsupportedFileFormat = 6502,
    /// Invalid/corrupted image file
    InvalidImageFile = 6503,
    /// No file provided in request
    NoFileProvided = 6504,
    /// Empty file provided
    EmptyFile = 6505,
    /// No filename provided
    NoFilename = 6506,
    /// Invalid file extension
    InvalidFileExtension = 6507,
    /// Image processing failed
    ImageProcessingFailed = 6508,
    /// File storage failed
    FileStorageFailed = 6509,
    /// Stored media not found
    MediaNotFound = 6510,

    // ==================== 8xxx: Account ====================
    /// Account not found
    AccountNotFound = 8001,
    /// Username already exists
    UsernameExists = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
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
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::NotResourceOwner => "Caller does not own this resource",

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::DateAlreadyBooked => "Date is already booked for this vendor",
            ErrorCode::DateInPast => "Date must not be in the past",
            ErrorCode::BookingAlreadyCancelled => "Booking has already been cancelled",

            // Visit
            ErrorCode::VisitNotFound => "Visit request not found",

            // Rating
            ErrorCode::NotEligibleToRate => "A confirmed booking is required before rating",
            ErrorCode::InvalidStarValue => "Star rating must be between 1 and 5",

            // Comments
            ErrorCode::NotEligibleToComment => "A confirmed booking is required before commenting",
            ErrorCode::CommentEmpty => "Comment body must not be empty",

            // Vendor / Listing
            ErrorCode::VendorNotFound => "Vendor not found",
            ErrorCode::VendorNotAccepting => "Vendor is not accepting bookings",
            ErrorCode::VendorProfileExists => "Account already has a vendor profile",
            ErrorCode::ListingNotFound => "Listing not found",
            ErrorCode::ListingInvalidPrice => "Listing has invalid price",

            // File Upload
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::NoFilename => "No filename provided",
            ErrorCode::InvalidFileExtension => "Invalid file extension",
            ErrorCode::ImageProcessingFailed => "Image processing failed",
            ErrorCode::FileStorageFailed => "File storage failed",
            ErrorCode::MediaNotFound => "Stored media not found",

            // Account
            ErrorCode::AccountNotFound => "Account not found",
            ErrorCode::UsernameExists => "Username already exists",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
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
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::AccountDisabled),
            1006 => Ok(ErrorCode::PasswordTooShort),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::NotResourceOwner),

            // Booking
            4001 => Ok(ErrorCode::BookingNotFound),
            4002 => Ok(ErrorCode::DateAlreadyBooked),
            4003 => Ok(ErrorCode::DateInPast),
            4004 => Ok(ErrorCode::BookingAlreadyCancelled),

            // Visit
            4501 => Ok(ErrorCode::VisitNotFound),

            // Rating
            5001 => Ok(ErrorCode::NotEligibleToRate),
            5002 => Ok(ErrorCode::InvalidStarValue),

            // Comments
            5501 => Ok(ErrorCode::NotEligibleToComment),
            5502 => Ok(ErrorCode::CommentEmpty),

            // Vendor / Listing
            6001 => Ok(ErrorCode::VendorNotFound),
            6002 => Ok(ErrorCode::VendorNotAccepting),
            6003 => Ok(ErrorCode::VendorProfileExists),
            6101 => Ok(ErrorCode::ListingNotFound),
            6102 => Ok(ErrorCode::ListingInvalidPrice),

            // File Upload
            6501 => Ok(ErrorCode::FileTooLarge),
            6502 => Ok(ErrorCode::UnsupportedFileFormat),
            6503 => Ok(ErrorCode::InvalidImageFile),
            6504 => Ok(ErrorCode::NoFileProvided),
            6505 => Ok(ErrorCode::EmptyFile),
            6506 => Ok(ErrorCode::NoFilename),
            6507 => Ok(ErrorCode::InvalidFileExtension),
            6508 => Ok(ErrorCode::ImageProcessingFailed),
            6509 => Ok(ErrorCode::FileStorageFailed),
            6510 => Ok(ErrorCode::MediaNotFound),

            // Account
            8001 => Ok(ErrorCode::AccountNotFound),
            8002 => Ok(ErrorCode::UsernameExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
