use uuid::Uuid;
use serde_json::json;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder, Scope};
use actix_web::cookie::{Cookie, SameSite};
use crate::portal::auth_orchestrator::AuthOrchestrator;
use crate::portal::session_manager::SessionManager;
use crate::portal::utils::sign_in::{ExternalIdentity, SignInOutcome};
use crate::utils::logging::*;
use crate::utils::static_files::StaticFiles;
use crate::web::utils::identity::{authenticated_email, SESSION_COOKIE};

pub fn initialize() -> Scope {
    web::scope("/signin")
        .service(page)
        .service(complete)
        .service(session)
        .service(signout)
}

#[get("")]
async fn page() -> impl Responder {
    let html = StaticFiles::get("html/signin.html").expect("File not found in static files.").data;
    HttpResponse::Ok().content_type("text/html").body(html)
}

//The identity arrives already verified by the external provider; this
//endpoint only decides admission and routing, then opens the session.
#[post("/complete")]
async fn complete(identity: web::Json<ExternalIdentity>, auth_orchestrator: web::Data<AuthOrchestrator>, session_manager: web::Data<SessionManager>) -> impl Responder {
    match auth_orchestrator.sign_in(identity.into_inner()).await {
        Ok(SignInOutcome::Allowed { email, redirect }) => {
            let token = session_manager.open_session(&email).await;
            let cookie = Cookie::build(SESSION_COOKIE, token.to_string())
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .finish();
            HttpResponse::Ok().cookie(cookie).json(web::Json(json!({ "redirect": redirect })))
        },
        Ok(SignInOutcome::Denied { reason }) => HttpResponse::Forbidden().body(reason),
        Err(entry) => {
            logging_entry!(entry);
            HttpResponse::InternalServerError().body("Internal server error")
        },
    }
}

#[get("/session")]
async fn session(request: HttpRequest, session_manager: web::Data<SessionManager>) -> impl Responder {
    match authenticated_email(&request, &session_manager).await {
        Some(email) => HttpResponse::Ok().json(web::Json(json!({ "email": email }))),
        None => HttpResponse::Unauthorized().body("Sign in required"),
    }
}

#[post("/signout")]
async fn signout(request: HttpRequest, session_manager: web::Data<SessionManager>) -> impl Responder {
    if let Some(cookie) = request.cookie(SESSION_COOKIE) {
        if let Ok(token) = Uuid::parse_str(cookie.value()) {
            session_manager.close_session(token).await;
        }
    }
    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();
    HttpResponse::Ok().cookie(removal).finish()
}
