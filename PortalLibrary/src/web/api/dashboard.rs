use actix_web::{get, web, HttpResponse, Responder, Scope};
use crate::utils::static_files::StaticFiles;

pub fn initialize() -> Scope {
    web::scope("/dashboard")
        .service(page)
}

#[get("")]
async fn page() -> impl Responder {
    let html = StaticFiles::get("html/dashboard.html").expect("File not found in static files.").data;
    HttpResponse::Ok().content_type("text/html").body(html)
}
