use uuid::Uuid;
use actix_web::HttpRequest;
use crate::portal::session_manager::SessionManager;

pub const SESSION_COOKIE: &str = "portal_session";

//The session cookie is the only thing the web layer trusts. Anything
//missing, unparseable, or unknown to the session manager reads as signed
//out.
pub async fn authenticated_email(request: &HttpRequest, session_manager: &SessionManager) -> Option<String> {
    let cookie = request.cookie(SESSION_COOKIE)?;
    let token = Uuid::parse_str(cookie.value()).ok()?;
    session_manager.resolve(token).await
}
