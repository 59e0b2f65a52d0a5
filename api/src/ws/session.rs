//! Websocket connection actor: heartbeat, text frames and per-connection session.

use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use fl_core::SessionContext;
use tracing::{info, warn};
use uuid::Uuid;

use crate::app::AppState;
use crate::middleware::Session;

use super::dispatcher::Dispatcher;
use super::protocol::ServerMessage;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

/// Handler for GET /marketplace/api/ws/main
///
/// The connection starts with the session resolved from the cookie.
pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
    Session(session): Session,
) -> Result<HttpResponse, Error> {
    let ws_session = WsSession::new(Dispatcher::new(state.get_ref().clone()), session);
    ws::start(ws_session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    dispatcher: Dispatcher,
    session: SessionContext,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(dispatcher: Dispatcher, session: SessionContext) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            dispatcher,
            session,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMessage) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    /// Requests are answered one at a time; `ctx.wait` holds back the next
    /// frame until the session produced by this one is stored.
    fn handle_text(&mut self, text: String, ctx: &mut ws::WebsocketContext<Self>) {
        let dispatcher = self.dispatcher.clone();
        let session = self.session.clone();

        ctx.wait(
            async move { dispatcher.dispatch(session, &text).await }
                .into_actor(self)
                .map(|(reply, session), actor, ctx| {
                    actor.session = session;
                    Self::send_json(ctx, &reply);
                }),
        );
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            user_id = ?self.session.user_id(),
            "[WS SESSION] started"
        );
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                self.handle_text(text.to_string(), ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                warn!(conn_id = %self.conn_id, "[WS SESSION] binary frame ignored");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}
