pub mod category;
pub mod common;
pub mod debt;
pub mod goal;
pub mod maintenance;
pub mod shopping;
pub mod transaction;

pub use category::Category;
pub use common::{Displayable, EntityKind, FlowType, Mode, Record};
pub use debt::Debt;
pub use goal::Goal;
pub use maintenance::{MaintenanceItem, MaintenanceStatus};
pub use shopping::ShoppingItem;
pub use transaction::{AttachmentType, Transaction, TransactionStatus};
