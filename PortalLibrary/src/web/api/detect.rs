use std::io::Cursor;
use std::path::Path;
use serde::Deserialize;
use image::ImageFormat;
use sanitize_filename::sanitize;
use futures::{StreamExt, TryStreamExt};
use actix_multipart::{Field, Multipart};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder, Scope};
use Common::utils::log_entry::io::IOEntry;
use Common::utils::log_entry::misc::MiscEntry;
use crate::portal::detection_client::{DetectError, DetectionClient};
use crate::portal::overlay_renderer::OverlayRenderer;
use crate::portal::session_manager::SessionManager;
use crate::portal::utils::annotation::OverlayStyle;
use crate::portal::utils::display_geometry::DisplayGeometry;
use crate::portal::utils::submission::{StoredPhoto, ViewMode};
use crate::utils::config::Config;
use crate::utils::logging::*;
use crate::utils::static_files::StaticFiles;
use crate::web::utils::identity::authenticated_email;

pub fn initialize() -> Scope {
    web::scope("/detect")
        .service(page)
        .service(submit)
        .service(state)
        .service(overlay)
        .service(view_mode)
}

#[get("")]
async fn page() -> impl Responder {
    let html = StaticFiles::get("html/detect.html").expect("File not found in static files.").data;
    HttpResponse::Ok().content_type("text/html").body(html)
}

//The whole pipeline runs inside this request: store the photo, call the
//detection backend, record the outcome. The response is the updated
//submission view, so the page renders success and failure the same way.
#[post("/submit")]
async fn submit(request: HttpRequest, mut payload: Multipart, session_manager: web::Data<SessionManager>, detection_client: web::Data<DetectionClient>) -> impl Responder {
    let email = match authenticated_email(&request, &session_manager).await {
        Some(email) => email,
        None => return HttpResponse::Unauthorized().body("Sign in required"),
    };
    let mut backend_host = String::new();
    let mut photo_name = None;
    let mut photo_data = Vec::new();
    while let Ok(Some(mut field)) = payload.try_next().await {
        let (field_name, file_name) = match field.content_disposition() {
            Some(content_disposition) => (
                content_disposition.get_name().map(str::to_string),
                content_disposition.get_filename().map(str::to_string),
            ),
            None => return HttpResponse::BadRequest().body("Invalid payload."),
        };
        match field_name.as_deref() {
            Some("backendHost") => {
                backend_host = match read_text_field(&mut field).await {
                    Ok(value) => value,
                    Err(_) => return HttpResponse::BadRequest().body("Invalid payload."),
                };
            },
            Some("file") => {
                let file_name = match file_name {
                    Some(file_name) => file_name,
                    None => return HttpResponse::BadRequest().body("Invalid payload."),
                };
                let sanitized_file_name = sanitize(file_name);
                if sanitized_file_name.is_empty() {
                    logging_entry!(warning_entry!(MiscEntry::InvalidFileNameError));
                    return HttpResponse::BadRequest().body("Invalid filename.");
                }
                let file_extension = Path::new(&sanitized_file_name).extension()
                    .and_then(|os_str| os_str.to_str()).unwrap_or("");
                match file_extension {
                    "png" | "jpg" | "jpeg" => {},
                    _ => {
                        logging_entry!(warning_entry!(MiscEntry::UnsupportedFileTypeError));
                        return HttpResponse::BadRequest().body("Invalid file type or extension.");
                    },
                }
                photo_data = match read_field_bytes(&mut field).await {
                    Ok(data) => data,
                    Err(_) => return HttpResponse::BadRequest().body("Invalid payload."),
                };
                photo_name = Some(sanitized_file_name);
            },
            _ => return HttpResponse::BadRequest().body("Invalid payload."),
        }
    }
    let (photo_name, photo_data) = match photo_name {
        Some(photo_name) if !photo_data.is_empty() => (photo_name, photo_data),
        _ => return HttpResponse::BadRequest().body(DetectError::MissingImage.user_message()),
    };
    //Decode before any network traffic. The natural dimensions anchor every
    //later overlay fit, and an undecodable file never reaches the backend.
    let photo = match image::load_from_memory(&photo_data) {
        Ok(photo) => photo,
        Err(err) => {
            logging_entry!(error_entry!(IOEntry::ImageDecodeError(photo_name.clone(), err.to_string())));
            return HttpResponse::BadRequest().body("Invalid image file.");
        },
    };
    session_manager.select_photo(&email, StoredPhoto::new(photo_name.clone(), photo)).await;
    let sequence = match session_manager.submit(&email).await {
        Some(sequence) => sequence,
        None => return HttpResponse::BadRequest().body(DetectError::MissingImage.user_message()),
    };
    let result = match detection_client.detect(&backend_host, &photo_name, photo_data).await {
        Ok(report) => Ok(report),
        Err(error) => {
            if let Some(entry) = error.log_entry(&backend_host) {
                logging_entry!(entry);
            }
            Err(error.user_message())
        },
    };
    if !session_manager.complete(&email, sequence, result).await {
        logging_entry!(information_entry!(MiscEntry::StaleSubmissionEntry(sequence)));
    }
    HttpResponse::Ok().json(web::Json(session_manager.submission_view(&email).await))
}

#[get("/state")]
async fn state(request: HttpRequest, session_manager: web::Data<SessionManager>) -> impl Responder {
    match authenticated_email(&request, &session_manager).await {
        Some(email) => HttpResponse::Ok().json(web::Json(session_manager.submission_view(&email).await)),
        None => HttpResponse::Unauthorized().body("Sign in required"),
    }
}

#[derive(Deserialize)]
struct OverlayQuery {
    #[serde(default)]
    container_width: Option<u32>,
    #[serde(default)]
    container_height: Option<u32>,
}

#[get("/overlay")]
async fn overlay(request: HttpRequest, query: web::Query<OverlayQuery>, session_manager: web::Data<SessionManager>, overlay_renderer: web::Data<OverlayRenderer>) -> impl Responder {
    let email = match authenticated_email(&request, &session_manager).await {
        Some(email) => email,
        None => return HttpResponse::Unauthorized().body("Sign in required"),
    };
    let snapshot = match session_manager.result_snapshot(&email).await {
        Some(snapshot) => snapshot,
        None => return HttpResponse::NotFound().body("No detection result."),
    };
    let config = Config::now().await;
    let query = query.into_inner();
    let container_width = query.container_width.unwrap_or(config.default_container_width);
    let container_height = query.container_height.unwrap_or(config.default_container_height);
    if !DisplayGeometry::valid_container(container_width, container_height) {
        return HttpResponse::BadRequest().body("Invalid container size.");
    }
    let geometry = DisplayGeometry::fit(snapshot.natural_width, snapshot.natural_height, container_width, container_height);
    let style = OverlayStyle::from_config(&config);
    let canvas = overlay_renderer.annotate(&style, &snapshot.image, &snapshot.report.detections, &geometry);
    let mut buffer = Cursor::new(Vec::new());
    match canvas.write_to(&mut buffer, ImageFormat::Png) {
        Ok(()) => HttpResponse::Ok().content_type("image/png").body(buffer.into_inner()),
        Err(err) => {
            logging_entry!(error_entry!(IOEntry::ImageEncodeError(err.to_string())));
            HttpResponse::InternalServerError().finish()
        },
    }
}

#[derive(Deserialize)]
struct ViewModeBody {
    view_mode: ViewMode,
}

#[post("/view_mode")]
async fn view_mode(request: HttpRequest, body: web::Json<ViewModeBody>, session_manager: web::Data<SessionManager>) -> impl Responder {
    match authenticated_email(&request, &session_manager).await {
        Some(email) => {
            session_manager.set_view_mode(&email, body.into_inner().view_mode).await;
            HttpResponse::Ok().json(web::Json(session_manager.submission_view(&email).await))
        },
        None => HttpResponse::Unauthorized().body("Sign in required"),
    }
}

async fn read_field_bytes(field: &mut Field) -> Result<Vec<u8>, ()> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|_| ())?;
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn read_text_field(field: &mut Field) -> Result<String, ()> {
    let data = read_field_bytes(field).await?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
