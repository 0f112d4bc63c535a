use actix_web::{web, HttpRequest, HttpResponse, Responder};
use actix_web::http::header;
use crate::portal::session_manager::SessionManager;
use crate::web::utils::identity::authenticated_email;

//Only the root path lands here with a redirect; every other unmatched path
//is a plain 404.
pub async fn default_route(request: HttpRequest, session_manager: web::Data<SessionManager>) -> impl Responder {
    if request.path() != "/" {
        return HttpResponse::NotFound().body("404 Not Found");
    }
    let target = if authenticated_email(&request, &session_manager).await.is_some() {
        "/dashboard"
    } else {
        "/signin"
    };
    HttpResponse::SeeOther().insert_header((header::LOCATION, target)).finish()
}
