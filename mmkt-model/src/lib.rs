//! Entity model for the money-market deal store.
//!
//! Defines the relationship contracts the loader is generic over and the
//! entity families that implement them:
//! - [`Root`]: an aggregate with a stable, unique identifier
//! - [`Bag`]: a descriptor for one multi-valued relationship of a root
//! - [`BagRow`]: one (root id, element) pair returned by a batch bag query
//! - [`EntityRef`]: an eagerly joined to-one reference
//!
//! Families: users, dealers, fiscal years/quarters/months, report batches,
//! money-market lists and upload notifications.

mod dealer;
mod entity_ref;
mod fiscal;
mod placeholder;
mod relation;
mod report;
mod user;

pub use dealer::Dealer;
pub use entity_ref::EntityRef;
pub use fiscal::{FiscalMonth, FiscalQuarter, FiscalYear, FiscalYearStatus, ParseStatusError};
pub use placeholder::{Authorities, Authority, Placeholder, Placeholders};
pub use relation::{Bag, BagRow, Root};
pub use report::{MoneyMarketList, ReportBatch, UploadNotification};
pub use user::AppUser;
