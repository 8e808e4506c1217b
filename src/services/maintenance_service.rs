use crate::{
    db::{Database, Patch},
    domain::{MaintenanceItem, MaintenanceStatus},
};

use super::{encoded, ServiceError, ServiceResult};

pub const JUST_SERVICED: &str = "Just serviced";

pub struct MaintenanceService;

impl MaintenanceService {
    /// Marks an item as serviced.
    pub fn complete(db: &Database, item_id: &str) -> ServiceResult<MaintenanceItem> {
        let patch = Patch::new()
            .set("status", encoded(MaintenanceStatus::UpToDate)?)
            .set("dueIn", JUST_SERVICED);
        db.maintenance()
            .update(item_id, &patch)
            .ok_or_else(|| ServiceError::NotFound {
                kind: "Maintenance item",
                id: item_id.to_string(),
            })
    }
}
