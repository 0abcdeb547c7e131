use bikeflow::repository::Repository;
use tokio::sync::RwLock;

/// `None` until the background load finishes, and for good if it fails.
#[derive(Default)]
pub struct AppState {
    pub repository: RwLock<Option<Repository>>,
}
