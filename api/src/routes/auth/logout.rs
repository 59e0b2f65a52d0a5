use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::MessageResponse;
use crate::middleware::{with_session, Session};

/// Handler for POST /api/auth/logout
///
/// Always succeeds; the session middleware removes the token cookie when
/// one was sent.
pub async fn logout(state: web::Data<AppState>, Session(session): Session) -> HttpResponse {
    let session = state.auth_service.logout(&session);
    with_session(
        HttpResponse::Ok().json(MessageResponse::new("User logged out")),
        session,
    )
}
