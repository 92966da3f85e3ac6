// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod postgrest_datasource;
        pub(crate) mod preferences_datasource;
        pub(crate) mod storage_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod client_model;
        pub(crate) mod demand_model;
        pub(crate) mod notification_model;
        pub(crate) mod postgrest_error_model;
        pub(crate) mod timestamp_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod clients_repository_impl;
        pub(crate) mod demands_repository_impl;
        pub(crate) mod file_storage_impl;
        pub(crate) mod notifications_repository_impl;
        pub(crate) mod preferences_repository_impl;
        mod utils;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod client;
        pub(crate) mod demand;
        pub(crate) mod notification;
        pub(crate) mod preferences;
        pub(crate) mod session;
        pub(crate) mod ui_state;
    }
    pub(crate) mod logic {
        pub(crate) mod client_impl;
        pub(crate) mod client_notes;
        pub(crate) mod demand_impl;
        pub(crate) mod demand_summary;
        pub(crate) mod duplicate_guard;
        pub(crate) mod session_impl;
        pub(crate) mod slug;
        pub(crate) mod status;
    }
    pub(crate) mod repositories {
        pub(crate) mod clients_repository;
        pub(crate) mod demands_repository;
        pub(crate) mod file_storage;
        pub(crate) mod notifications_repository;
        pub(crate) mod preferences_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod clients_usecase;
        pub(crate) mod demands_usecase;
        pub(crate) mod notifications_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod anvisa_service;
    pub(crate) mod background_loader;
    pub(crate) mod batch;
    pub(crate) mod clientes_view_model;
    pub(crate) mod connectivity;
    pub(crate) mod controllers;
    pub(crate) mod event_router;
    pub(crate) mod notification_fmt;
    pub(crate) mod selection;
    pub(crate) mod ui_state;
    mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::client::*;
        pub use crate::domain::entities::demand::*;
        pub use crate::domain::entities::notification::*;
        pub use crate::domain::entities::preferences::*;
        pub use crate::domain::entities::session::*;
        pub use crate::domain::entities::ui_state::*;
        pub use crate::domain::logic::demand_summary::DemandSummary;
    }

    pub mod logic {
        pub use crate::domain::logic::demand_summary::{most_recent, summarize, summary_label};
        pub use crate::domain::logic::duplicate_guard::{
            ensure_no_open_duplicate, find_open_duplicate,
        };
        pub use crate::domain::logic::slug::{demand_storage_key, slugify_process};
        pub use crate::domain::logic::status::{
            is_closed_status, is_open_status, normalize_status, status_label,
        };
    }

    pub mod usecases {
        pub use crate::domain::repositories::preferences_repository::PreferencesRepository;
        pub use crate::domain::usecases::clients_usecase::ClientsUsecase;
        pub use crate::domain::usecases::demands_usecase::DemandsUsecase;
        pub use crate::domain::usecases::notifications_usecase::NotificationsUsecase;
    }

    pub mod ui {
        pub use crate::presentation::anvisa_service::*;
        pub use crate::presentation::background_loader::*;
        pub use crate::presentation::batch::*;
        pub use crate::presentation::clientes_view_model::*;
        pub use crate::presentation::connectivity::*;
        pub use crate::presentation::controllers::*;
        pub use crate::presentation::event_router::*;
        pub use crate::presentation::notification_fmt::*;
        pub use crate::presentation::selection::*;
        pub use crate::presentation::ui_state::*;
    }
}
