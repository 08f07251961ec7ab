//! Database Models

// Accounts
pub mod account;

// Vendor Domain
pub mod listing;
pub mod vendor;

// Booking Domain
pub mod comment;
pub mod reservation;
pub mod visit;

// Media
pub mod media;

// Re-exports
pub use account::{Account, AccountCreate, AccountUpdate, Role};
pub use comment::{Comment, CommentCreate, CommentWithAuthor};
pub use listing::{Listing, ListingCreate, ListingQuery, ListingUpdate};
pub use media::{Media, MediaCreate};
pub use reservation::{
    BookingRequest, BookingStatus, Reservation, ReservationWithCustomer, ReservationWithVendor,
};
pub use vendor::{Vendor, VendorCreate, VendorKind, VendorQuery, VendorUpdate};
pub use visit::{VisitRequest, VisitRequestCreate, VisitWithCustomer, VisitWithVendor};
