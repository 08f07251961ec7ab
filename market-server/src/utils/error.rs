//! 统一错误处理
//!
//! 应用错误类型来自 shared::error；此模块负责把仓储层与预订领域的错误
//! 转换为带错误码的 [`AppError`]。

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::booking::BookingError;
use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let message = err.to_string();
        match err {
            BookingError::RequiredField(field) => {
                AppError::with_message(ErrorCode::RequiredField, message)
                    .with_detail("field", field)
            }
            BookingError::InvalidDate(_) => {
                AppError::with_message(ErrorCode::InvalidFormat, message)
            }
            BookingError::DateInPast(date) => {
                AppError::with_message(ErrorCode::DateInPast, message).with_detail("date", date)
            }
            BookingError::DateAlreadyBooked {
                vendor_id,
                event_date,
            } => AppError::with_message(ErrorCode::DateAlreadyBooked, message)
                .with_detail("vendor_id", vendor_id)
                .with_detail("event_date", event_date),
            BookingError::VendorNotFound(_) => {
                AppError::with_message(ErrorCode::VendorNotFound, message)
            }
            BookingError::VendorNotAccepting(_) => {
                AppError::with_message(ErrorCode::VendorNotAccepting, message)
            }
            BookingError::BookingNotFound(_) => {
                AppError::with_message(ErrorCode::BookingNotFound, message)
            }
            BookingError::BookingAlreadyCancelled(_) => {
                AppError::with_message(ErrorCode::BookingAlreadyCancelled, message)
            }
            BookingError::VisitNotFound(_) => {
                AppError::with_message(ErrorCode::VisitNotFound, message)
            }
            BookingError::NotEligibleToRate { .. } => {
                AppError::new(ErrorCode::NotEligibleToRate)
            }
            BookingError::InvalidStarValue(stars) => {
                AppError::with_message(ErrorCode::InvalidStarValue, message)
                    .with_detail("stars", stars)
            }
            BookingError::NotEligibleToComment { .. } => {
                AppError::new(ErrorCode::NotEligibleToComment)
            }
            BookingError::CommentEmpty => AppError::new(ErrorCode::CommentEmpty),
            BookingError::Forbidden(msg) => AppError::forbidden(msg),
            BookingError::Repo(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_error_codes() {
        let err: AppError = BookingError::DateAlreadyBooked {
            vendor_id: 1,
            event_date: "2030-06-01".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::DateAlreadyBooked);

        let err: AppError = BookingError::NotEligibleToRate {
            customer_id: 1,
            vendor_id: 2,
        }
        .into();
        assert_eq!(err.code, ErrorCode::NotEligibleToRate);

        let err: AppError = BookingError::InvalidStarValue(9).into();
        assert_eq!(err.code, ErrorCode::InvalidStarValue);

        let err: AppError = BookingError::VendorNotFound(7).into();
        assert_eq!(err.code, ErrorCode::VendorNotFound);
    }

    #[test]
    fn test_repo_error_codes() {
        let err: AppError = RepoError::NotFound("Vendor 1 not found".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: AppError = RepoError::Duplicate("username taken".into()).into();
        assert_eq!(err.code, ErrorCode::AlreadyExists);

        let err: AppError = RepoError::Database("disk I/O error".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
