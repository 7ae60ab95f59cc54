pub mod error;
pub use error::{AppError, ListingError};

pub mod config;

pub mod logging;

pub mod fs {
    pub mod path_resolver;
}

pub mod controller {
    pub mod actions;
    pub use actions::Action;

    pub mod backend;
    pub use backend::ListingBackend;

    pub mod http_backend;
    pub use http_backend::HttpListingBackend;

    pub mod navigation;
    pub use navigation::{ListingOutcome, NavigationController, OutcomeDisposition};
}

pub mod model {
    pub mod entry;
    pub use entry::DirectoryEntry;

    pub mod listing;
    pub use listing::Listing;

    pub mod display_list;

    pub mod nav_state;
    pub use nav_state::{NavPhase, NavigationState, RequestId};

    pub mod ui_state;
    pub use ui_state::{LoadingState, UIState};
}

pub mod view {
    pub mod icons;

    pub mod theme;

    pub mod traits;
    pub use traits::RenderSink;

    pub mod ui;

    pub mod components {
        pub mod error_overlay;
        pub use error_overlay::ErrorOverlay;
        pub mod loading_overlay;
        pub use loading_overlay::LoadingOverlay;
        pub mod object_table;
        pub use object_table::EntryTable;
        pub mod status_bar;
        pub use status_bar::StatusBar;
    }
}
