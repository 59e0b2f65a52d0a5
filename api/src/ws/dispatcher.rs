//! Executes websocket requests against the services.

use chrono::{DateTime, Utc};
use fl_core::{DomainError, SessionContext};
use tracing::{debug, warn};
use validator::Validate;

use crate::app::AppState;
use crate::dto::UserResponse;

use super::protocol::{Action, ClientMessage, InboundFrame, ProtocolError, ServerMessage, ServerPayload};

/// Successful outcome of one request
struct Reply {
    status_message: &'static str,
    payload: Option<ServerPayload>,
}

impl Reply {
    fn new(status_message: &'static str, payload: Option<ServerPayload>) -> Self {
        Self {
            status_message,
            payload,
        }
    }
}

enum Failure {
    Protocol(ProtocolError),
    Domain(DomainError),
}

impl From<DomainError> for Failure {
    fn from(error: DomainError) -> Self {
        Failure::Domain(error)
    }
}

impl Failure {
    fn message(&self, action: Action) -> String {
        let detail = match self {
            Failure::Protocol(error) => error.to_string(),
            // Internal details stay in the logs
            Failure::Domain(error) => error.to_error_response().message,
        };
        match action.failure_prefix() {
            Some(prefix) => format!("{}: {}", prefix, detail),
            None => detail,
        }
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    state: AppState,
}

impl Dispatcher {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Answer one text frame
    ///
    /// Returns the reply together with the session to use for the next
    /// frame of the connection.
    pub async fn dispatch(&self, session: SessionContext, text: &str) -> (ServerMessage, SessionContext) {
        self.dispatch_at(session, text, Utc::now()).await
    }

    pub async fn dispatch_at(
        &self,
        session: SessionContext,
        text: &str,
        now: DateTime<Utc>,
    ) -> (ServerMessage, SessionContext) {
        let frame: InboundFrame = match serde_json::from_str(text) {
            Ok(frame) => frame,
            Err(e) => {
                debug!(error = %e, "Malformed websocket frame");
                let failure = Failure::Protocol(ProtocolError::Malformed(e.to_string()));
                let reply = ServerMessage::fail(Action::Unknown, failure.message(Action::Unknown), &session);
                return (reply, session);
            }
        };

        let frame_token = frame.auth.as_ref().and_then(|a| a.token.clone());
        let session = self.refresh_session(session, frame_token, now).await;

        let message = match ClientMessage::from_frame(&frame) {
            Ok(message) => message,
            Err(error) => {
                let action = Action::parse(&frame.action);
                debug!(action = %frame.action, error = %error, "Rejected websocket frame");
                let reply = ServerMessage::fail(action, Failure::Protocol(error).message(action), &session);
                return (reply, session);
            }
        };

        let action = message.action();
        let (result, session) = self.handle(message, session).await;
        let reply = match result {
            Ok(reply) => ServerMessage::ok(action, reply.status_message, reply.payload, &session),
            Err(failure) => {
                if let Failure::Domain(DomainError::Internal { message }) = &failure {
                    warn!(?action, error = %message, "Websocket request failed");
                }
                ServerMessage::fail(action, failure.message(action), &session)
            }
        };
        (reply, session)
    }

    /// A token in the frame replaces the connection's session when it
    /// differs; otherwise the session's own token is assessed again so that
    /// long-lived connections cross into renewal.
    async fn refresh_session(
        &self,
        session: SessionContext,
        frame_token: Option<String>,
        now: DateTime<Utc>,
    ) -> SessionContext {
        let token = match frame_token.filter(|t| !t.is_empty()) {
            Some(token) if session.token() != Some(token.as_str()) => token,
            _ => match session.token() {
                Some(token) => token.to_string(),
                None => return session,
            },
        };
        self.state
            .auth_service
            .resolve_session_at(Some(&token), now)
            .await
    }

    async fn handle(
        &self,
        message: ClientMessage,
        session: SessionContext,
    ) -> (Result<Reply, Failure>, SessionContext) {
        let auth = &self.state.auth_service;
        let marketplace = &self.state.marketplace_service;

        match message {
            ClientMessage::Login(request) => match auth.login(&request.email, &request.password).await {
                Ok(outcome) => (
                    Ok(Reply::new("User logged in", Some(ServerPayload::Profile(outcome.profile)))),
                    outcome.session,
                ),
                Err(error) => (Err(error.into()), session),
            },
            ClientMessage::Logout => {
                let session = auth.logout(&session);
                (Ok(Reply::new("User logged out", None)), session)
            }
            ClientMessage::TopAds => {
                let result = marketplace
                    .top_ads()
                    .await
                    .map(|ads| Reply::new("Top ads returned", Some(ServerPayload::Ads(ads))))
                    .map_err(Failure::from);
                (result, session)
            }
            ClientMessage::SearchAds(request) => {
                let result = marketplace
                    .search_ads(&request.search_phrase, request.category_id)
                    .await
                    .map(|ads| Reply::new("Ads found", Some(ServerPayload::Ads(ads))))
                    .map_err(Failure::from);
                (result, session)
            }
            ClientMessage::Ad(request) => {
                let result = marketplace
                    .view_ad(request.ad_id)
                    .await
                    .map(|ad| Reply::new("Ad returned", Some(ServerPayload::Ad(ad))))
                    .map_err(Failure::from);
                (result, session)
            }
            ClientMessage::SaveUpdateAd(request) => {
                if let Err(errors) = request.validate() {
                    return (Err(invalid(errors)), session);
                }
                let result = marketplace
                    .save_update_ad(&session, request.into())
                    .await
                    .map(|ad| Reply::new("Ad saved/updated", Some(ServerPayload::Ad(ad))))
                    .map_err(Failure::from);
                (result, session)
            }
            ClientMessage::SaveUpdateUser(request) => {
                if let Err(errors) = request.validate() {
                    return (Err(invalid(errors)), session);
                }
                match self.state.user_service.save_update_user(&session, request.into()).await {
                    Ok(saved) => (
                        Ok(Reply::new(
                            "User saved/updated",
                            Some(ServerPayload::User(UserResponse::from(&saved.user))),
                        )),
                        saved.session,
                    ),
                    Err(error) => (Err(Failure::from(error)), session),
                }
            }
            ClientMessage::ChangePassword(request) => {
                let result = auth
                    .change_password(&session, request.into())
                    .await
                    .map(|()| Reply::new("Password changed", None))
                    .map_err(Failure::from);
                (result, session)
            }
            ClientMessage::ResetPassword(request) => {
                let email = request.email.unwrap_or_default();
                let result = auth
                    .reset_password(&email)
                    .await
                    .map(|()| Reply::new("Password reset", None))
                    .map_err(Failure::from);
                (result, session)
            }
            ClientMessage::Categories => {
                let result = marketplace
                    .categories()
                    .await
                    .map(|categories| Reply::new("Categories returned", Some(ServerPayload::Categories(categories))))
                    .map_err(Failure::from);
                (result, session)
            }
        }
    }
}

fn invalid(errors: validator::ValidationErrors) -> Failure {
    Failure::Protocol(ProtocolError::InvalidPayload(errors.to_string()))
}
