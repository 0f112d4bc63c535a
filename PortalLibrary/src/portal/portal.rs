use tokio::time::sleep;
use std::time::Duration;
use actix_web::{web, App, HttpServer};
use Common::utils::log_entry::system::SystemEntry;
use crate::utils::logging::*;
use crate::utils::config::Config;
use crate::portal::auth_orchestrator::AuthOrchestrator;
use crate::portal::detection_client::DetectionClient;
use crate::portal::overlay_renderer::OverlayRenderer;
use crate::portal::preference_store::PreferenceStore;
use crate::portal::session_manager::SessionManager;
use crate::web::api::{config, dashboard, default, detect, javascript, log, misc, onboarding, preference, signin};

pub struct Portal;

impl Portal {
    pub async fn run() {
        logging_information!(SystemEntry::Initializing);
        let store = match PreferenceStore::connect(&Config::now().await).await {
            Ok(store) => store,
            Err(entry) => {
                logging_entry!(entry);
                return;
            },
        };
        let renderer = match OverlayRenderer::new() {
            Ok(renderer) => renderer,
            Err(entry) => {
                logging_entry!(entry);
                store.close().await;
                return;
            },
        };
        //Every service the handlers touch is owned here and handed to the
        //web layer as shared app data.
        let session_manager = web::Data::new(SessionManager::new());
        let auth_orchestrator = web::Data::new(AuthOrchestrator::new(store.clone()));
        let detection_client = web::Data::new(DetectionClient::new(&Config::now().await));
        let overlay_renderer = web::Data::new(renderer);
        let preference_store = web::Data::new(store.clone());
        logging_information!(SystemEntry::InitializeComplete);
        let http_server = loop {
            let config = Config::now().await;
            let session_manager = session_manager.clone();
            let auth_orchestrator = auth_orchestrator.clone();
            let detection_client = detection_client.clone();
            let overlay_renderer = overlay_renderer.clone();
            let preference_store = preference_store.clone();
            let http_server = HttpServer::new(move || {
                App::new()
                    .app_data(session_manager.clone())
                    .app_data(auth_orchestrator.clone())
                    .app_data(detection_client.clone())
                    .app_data(overlay_renderer.clone())
                    .app_data(preference_store.clone())
                    .service(config::initialize())
                    .service(dashboard::initialize())
                    .service(detect::initialize())
                    .service(javascript::initialize())
                    .service(log::initialize())
                    .service(misc::initialize())
                    .service(onboarding::initialize())
                    .service(preference::initialize())
                    .service(signin::initialize())
                    .default_service(web::route().to(default::default_route))
            }).bind(format!("0.0.0.0:{}", config.http_server_bind_port));
            match http_server {
                Ok(http_server) => break http_server,
                Err(err) => {
                    logging_critical!("Portal", "Failed to bind port", format!("Err: {err}"));
                    sleep(Duration::from_secs(config.bind_retry_duration)).await;
                    continue;
                },
            }
        };
        logging_information!(SystemEntry::WebReady);
        logging_information!(SystemEntry::Online);
        if let Err(err) = http_server.run().await {
            logging_emergency!("Portal", "An error occurred while running the web service", format!("Err: {err}"));
        }
        store.close().await;
    }

    pub async fn terminate() {
        logging_information!(SystemEntry::Terminating);
        logging_information!(SystemEntry::TerminateComplete);
    }
}
