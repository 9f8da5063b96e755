pub mod document;
pub mod booking;
pub mod partner;
pub mod customer;
pub mod complaint;
pub mod normalize;
pub mod repository;
pub mod fetch;

pub use document::Document;
pub use booking::{Booking, BookingStatus, ServiceCategory};
pub use partner::{Partner, PartnerStatus, StatusChange};
pub use customer::{AccountStatus, Customer};
pub use complaint::{Complaint, ComplaintPriority, ComplaintResponse, ComplaintStatus, OriginatorType};
pub use repository::{DocumentSource, FieldFilter, SourceError};
pub use fetch::FetchState;
