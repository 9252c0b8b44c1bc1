pub mod core;
pub mod features;
pub mod modules;
pub mod shared;

pub use crate::core::config::Config;
pub use crate::core::error::{AppError, Result};
pub use crate::core::session::{Session, SessionEvent, SessionStore, SessionUser};
pub use crate::features::admin::AdminTriageView;
pub use crate::features::auth::AuthService;
pub use crate::features::form::ReportFormController;
pub use crate::features::location::LocationTracker;
pub use crate::features::map::MapPresenter;
pub use crate::features::reports::{FilterCriteria, Report, ReportFeed};
pub use crate::modules::api::{CivicApi, HttpCivicApi};
