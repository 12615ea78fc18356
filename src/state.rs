use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::crm::CrmProvider;
use crate::services::messaging::MessagingProvider;

pub struct AppState {
    pub db: Option<Arc<Mutex<Connection>>>,
    pub config: AppConfig,
    pub crm: Option<Box<dyn CrmProvider>>,
    pub messaging: Option<Box<dyn MessagingProvider>>,
}
