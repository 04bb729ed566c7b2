use std::sync::Arc;

use campus_service::CampusService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CampusService>,
}
impl AppState {
	pub fn new(config: campus_config::Config) -> Self {
		Self { service: Arc::new(CampusService::new(config)) }
	}

	pub fn with_service(service: CampusService) -> Self {
		Self { service: Arc::new(service) }
	}
}
