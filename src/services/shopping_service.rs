use crate::{
    db::{Database, Patch},
    domain::ShoppingItem,
};

use super::{ServiceError, ServiceResult};

pub struct ShoppingService;

impl ShoppingService {
    /// Changes the stock on hand by `delta`, never below zero.
    pub fn adjust(db: &Database, item_id: &str, delta: f64) -> ServiceResult<ShoppingItem> {
        if !delta.is_finite() {
            return Err(ServiceError::Invalid(format!(
                "Quantity change must be a number, got {delta}"
            )));
        }
        let item = db
            .shopping()
            .get_by_id(item_id)
            .ok_or_else(|| not_found(item_id))?;
        let current = (item.current_qty + delta).max(0.0);
        db.shopping()
            .update(item_id, &Patch::new().set("currentQty", current))
            .ok_or_else(|| not_found(item_id))
    }

    /// What it costs to bring every item back to its ideal stock.
    pub fn restock_cost(items: &[ShoppingItem]) -> f64 {
        items.iter().map(|item| item.missing_qty() * item.price).sum()
    }
}

fn not_found(id: &str) -> ServiceError {
    ServiceError::NotFound {
        kind: "Shopping item",
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStore;
    use tempfile::tempdir;

    #[test]
    fn adjust_floors_at_zero() {
        let dir = tempdir().unwrap();
        let db = Database::new(LocalStore::new(dir.path().to_path_buf()).unwrap(), None);
        let mut rice = ShoppingItem::new("Rice", "Pantry", "kg", 5.0, 6.5);
        rice.current_qty = 2.0;
        let rice = db.shopping().add(rice);

        let item = ShoppingService::adjust(&db, &rice.id, 1.0).unwrap();
        assert_eq!(item.current_qty, 3.0);
        let item = ShoppingService::adjust(&db, &rice.id, -10.0).unwrap();
        assert_eq!(item.current_qty, 0.0);
        assert_eq!(db.shopping().get_by_id(&rice.id).unwrap().current_qty, 0.0);
    }

    #[test]
    fn restock_cost_ignores_overstocked_items() {
        let mut beans = ShoppingItem::new("Beans", "Pantry", "kg", 4.0, 8.0);
        beans.current_qty = 1.0;
        let mut soap = ShoppingItem::new("Soap", "Cleaning", "un", 2.0, 3.0);
        soap.current_qty = 5.0;
        assert_eq!(ShoppingService::restock_cost(&[beans, soap]), 24.0);
    }
}
