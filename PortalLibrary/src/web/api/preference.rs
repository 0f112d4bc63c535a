use serde::Deserialize;
use serde_json::json;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder, Scope};
use crate::portal::preference_store::PreferenceStore;
use crate::portal::session_manager::SessionManager;
use crate::portal::utils::user_profile::PreferenceUpdate;
use crate::utils::logging::*;
use crate::web::utils::identity::authenticated_email;

pub fn initialize() -> Scope {
    web::scope("/user")
        .service(details)
        .service(onboarding)
}

#[derive(Deserialize)]
struct DetailsQuery {
    #[serde(default)]
    email: Option<String>,
}

//Profile reads and writes are limited to the signed-in user's own row; the
//addressed email must match the session.
#[get("/details")]
async fn details(request: HttpRequest, query: web::Query<DetailsQuery>, session_manager: web::Data<SessionManager>, preference_store: web::Data<PreferenceStore>) -> impl Responder {
    let session_email = match authenticated_email(&request, &session_manager).await {
        Some(email) => email,
        None => return HttpResponse::Unauthorized().body("Sign in required"),
    };
    let email = match query.into_inner().email {
        Some(email) if !email.trim().is_empty() => email,
        _ => return HttpResponse::BadRequest().body("Email is required"),
    };
    if email != session_email {
        return HttpResponse::Forbidden().body("Forbidden");
    }
    match preference_store.user_details(&email).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(web::Json(profile)),
        Ok(None) => HttpResponse::NotFound().body("User not found"),
        Err(entry) => {
            logging_entry!(entry);
            HttpResponse::InternalServerError().body("Internal server error")
        },
    }
}

#[post("/onboarding")]
async fn onboarding(request: HttpRequest, update: web::Json<PreferenceUpdate>, session_manager: web::Data<SessionManager>, preference_store: web::Data<PreferenceStore>) -> impl Responder {
    let session_email = match authenticated_email(&request, &session_manager).await {
        Some(email) => email,
        None => return HttpResponse::Unauthorized().body("Sign in required"),
    };
    let update = update.into_inner();
    if update.email != session_email {
        return HttpResponse::Forbidden().body("Forbidden");
    }
    match preference_store.update_preferences(&update).await {
        Ok(true) => HttpResponse::Ok().json(web::Json(json!({ "message": "Success" }))),
        Ok(false) => HttpResponse::InternalServerError().body("Something went wrong"),
        Err(entry) => {
            logging_entry!(entry);
            HttpResponse::InternalServerError().body("Something went wrong")
        },
    }
}
