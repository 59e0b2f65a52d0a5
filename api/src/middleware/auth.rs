//! Cookie-based JWT session middleware.
//!
//! Before the handler runs, the token in the session cookie is resolved into
//! a `SessionContext` and stored in the request extensions; expired tokens
//! still within the renewal limit come back renewed. After the handler, the
//! final session (the one a handler attached to the response, or else the
//! resolved one) is compared with the inbound token. When they differ the
//! cookie is rewritten, or removed if the session became anonymous.

use actix_web::{
    cookie::{time, Cookie, SameSite},
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use chrono::{DateTime, Utc};
use fl_core::{AuthError, AuthenticatedSession, DomainError, SessionContext};
use fl_shared::config::SessionCookieConfig;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::app::AppAuthService;
use crate::handlers::handle_domain_error;

/// Session cookie middleware factory
pub struct SessionCookieAuth {
    auth_service: Arc<AppAuthService>,
    cookie: Arc<SessionCookieConfig>,
}

impl SessionCookieAuth {
    pub fn new(auth_service: Arc<AppAuthService>, cookie: SessionCookieConfig) -> Self {
        Self {
            auth_service,
            cookie: Arc::new(cookie),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionCookieAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionCookieAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionCookieAuthMiddleware {
            service: Rc::new(service),
            auth_service: Arc::clone(&self.auth_service),
            cookie: Arc::clone(&self.cookie),
        }))
    }
}

/// Session cookie middleware service
pub struct SessionCookieAuthMiddleware<S> {
    service: Rc<S>,
    auth_service: Arc<AppAuthService>,
    cookie: Arc<SessionCookieConfig>,
}

impl<S, B> Service<ServiceRequest> for SessionCookieAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let auth_service = Arc::clone(&self.auth_service);
        let config = Arc::clone(&self.cookie);

        Box::pin(async move {
            let inbound = req
                .cookie(&config.cookie_name)
                .map(|c| c.value().to_string())
                .filter(|t| !t.is_empty());

            let session = auth_service.resolve_session(inbound.as_deref()).await;
            req.extensions_mut().insert(session.clone());

            let mut res = service.call(req).await?;

            let outbound = res
                .response()
                .extensions()
                .get::<SessionContext>()
                .cloned()
                .unwrap_or(session);

            if outbound.token_changed(inbound.as_deref()) {
                let cookie = session_cookie(&config, &outbound, Utc::now());
                if let Err(e) = res.response_mut().add_cookie(&cookie) {
                    tracing::warn!(error = %e, "Failed to write session cookie");
                }
            }

            Ok(res)
        })
    }
}

/// Cookie carrying the session token, or a removal cookie when anonymous
pub fn session_cookie(
    config: &SessionCookieConfig,
    session: &SessionContext,
    now: DateTime<Utc>,
) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.cookie_name.clone(), String::new())
        .path(config.path.clone())
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(same_site(&config.same_site))
        .finish();

    match session {
        SessionContext::Authenticated(principal) => {
            cookie.set_value(principal.token.clone());
            let remaining = (principal.expires_at - now).num_seconds().max(0);
            cookie.set_max_age(time::Duration::seconds(remaining));
            if let Ok(expires) = time::OffsetDateTime::from_unix_timestamp(principal.expires_at.timestamp())
            {
                cookie.set_expires(expires);
            }
        }
        SessionContext::Anonymous => cookie.make_removal(),
    }

    cookie
}

fn same_site(value: &str) -> SameSite {
    match value.to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}

/// Attach the session a handler produced so the middleware can persist it
pub fn with_session(mut response: HttpResponse, session: SessionContext) -> HttpResponse {
    response.extensions_mut().insert(session);
    response
}

/// Extractor for the resolved session; anonymous when none was resolved
pub struct Session(pub SessionContext);

impl FromRequest for Session {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let session = req
            .extensions()
            .get::<SessionContext>()
            .cloned()
            .unwrap_or_default();
        ready(Ok(Session(session)))
    }
}

/// Extractor for required authentication
pub struct Authenticated(pub AuthenticatedSession);

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let principal = req
            .extensions()
            .get::<SessionContext>()
            .and_then(|s| s.principal().cloned());

        let result = principal.map(Authenticated).ok_or_else(|| {
            let error = DomainError::from(AuthError::AuthenticationRequired);
            InternalError::from_response("Authentication required", handle_domain_error(&error))
                .into()
        });
        ready(result)
    }
}
