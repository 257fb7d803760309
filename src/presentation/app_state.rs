// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::upload_service::UploadService;
use crate::application::version_service::VersionService;
use crate::infrastructure::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub upload_service: UploadService,
    pub version_service: VersionService,
    pub config: ServerConfig,
}
