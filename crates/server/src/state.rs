use insightboard_store::InsightStore;

#[derive(Clone)]
pub struct AppState {
    pub store: InsightStore,
}

impl AppState {
    pub fn new(store: InsightStore) -> Self {
        Self { store }
    }
}
