pub mod case;
pub mod local;
pub mod remote;

pub use local::{generate_id, LocalStore, KEY_PREFIX};
pub use remote::{RestTableClient, Row, TableClient};
