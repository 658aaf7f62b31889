//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods that
//! accept `&PgPool` (reads) or `&mut Transaction` (mutations that must stay
//! atomic with their sibling writes and authorization reads).

pub mod activity_repo;
pub mod member_repo;
pub mod report_repo;
pub mod trip_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use member_repo::MemberRepo;
pub use report_repo::ReportRepo;
pub use trip_repo::TripRepo;
pub use user_repo::UserRepo;
