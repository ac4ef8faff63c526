//! Pages
//!
//! One component per route. Each page fetches its own data and refetches
//! when the app-wide reload trigger fires.

mod assets;
mod audit;
mod client_detail;
mod clients;
mod dashboard;
mod documents;
mod finance;
mod import_wizard;
mod installations;
mod maintenance;
mod not_found;
mod pickers;
mod project_detail;
mod projects;
mod settings;
mod subproject_detail;
mod users;

pub use assets::AssetsPage;
pub use audit::AuditPage;
pub use client_detail::ClientDetailPage;
pub use clients::ClientsPage;
pub use dashboard::DashboardPage;
pub use documents::DocumentsPage;
pub use finance::FinancePage;
pub use installations::InstallationsPage;
pub use maintenance::MaintenancePage;
pub use not_found::NotFound;
pub use project_detail::ProjectDetailPage;
pub use projects::ProjectsPage;
pub use settings::SettingsPage;
pub use subproject_detail::SubprojectDetailPage;
pub use users::UsersPage;
