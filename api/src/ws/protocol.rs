//! Wire format of the websocket API.

use fl_core::{Ad, AuthProfile, Category, SessionContext};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::dto::{
    ChangePasswordRequest, LoginRequest, ResetPasswordRequest, SaveAdRequest, SaveUserRequest,
    SearchAdsRequest, UserResponse, ViewAdRequest,
};

/// Raw inbound frame, before the payload is typed
#[derive(Debug, Clone, Deserialize)]
pub struct InboundFrame {
    pub action: String,

    #[serde(default)]
    pub payload: Value,

    #[serde(default)]
    pub auth: Option<FrameAuth>,
}

/// Auth envelope of an inbound frame; only the token is read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameAuth {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Login,
    Logout,
    TopAds,
    SearchAds,
    Ad,
    SaveUpdateAd,
    SaveUpdateUser,
    ChangePassword,
    ResetPassword,
    Categories,
    Unknown,
}

impl Action {
    pub fn parse(name: &str) -> Self {
        match name {
            "LOGIN" => Action::Login,
            "LOGOUT" => Action::Logout,
            "TOP_ADS" => Action::TopAds,
            "SEARCH_ADS" => Action::SearchAds,
            "AD" => Action::Ad,
            "SAVE_UPDATE_AD" => Action::SaveUpdateAd,
            "SAVE_UPDATE_USER" => Action::SaveUpdateUser,
            "CHANGE_PASSWORD" => Action::ChangePassword,
            "RESET_PASSWORD" => Action::ResetPassword,
            "CATEGORIES" => Action::Categories,
            _ => Action::Unknown,
        }
    }

    /// Prefix of the status message of a failed request
    pub(crate) fn failure_prefix(&self) -> Option<&'static str> {
        match self {
            Action::Login => Some("User not logged in"),
            Action::Logout => Some("User not logged out"),
            Action::TopAds => Some("Fetching top ads failed"),
            Action::SearchAds => Some("Search for ads failed"),
            Action::Ad => Some("Search for ad failed"),
            Action::SaveUpdateAd => Some("Save/update ad failed"),
            Action::SaveUpdateUser => Some("Save/update user failed"),
            Action::ChangePassword => Some("Change password failed"),
            Action::Categories => Some("Fetching categories failed"),
            Action::ResetPassword | Action::Unknown => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    Malformed(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// A request with its typed payload
#[derive(Debug, Clone)]
pub enum ClientMessage {
    Login(LoginRequest),
    Logout,
    TopAds,
    SearchAds(SearchAdsRequest),
    Ad(ViewAdRequest),
    SaveUpdateAd(SaveAdRequest),
    SaveUpdateUser(SaveUserRequest),
    ChangePassword(ChangePasswordRequest),
    ResetPassword(ResetPasswordRequest),
    Categories,
}

impl ClientMessage {
    /// Type the payload of a frame according to its action
    pub fn from_frame(frame: &InboundFrame) -> Result<Self, ProtocolError> {
        let payload = frame.payload.clone();
        Ok(match Action::parse(&frame.action) {
            Action::Login => ClientMessage::Login(typed(payload)?),
            Action::Logout => ClientMessage::Logout,
            Action::TopAds => ClientMessage::TopAds,
            Action::SearchAds => ClientMessage::SearchAds(typed_or_default(payload)?),
            Action::Ad => ClientMessage::Ad(typed(payload)?),
            Action::SaveUpdateAd => ClientMessage::SaveUpdateAd(typed(payload)?),
            Action::SaveUpdateUser => ClientMessage::SaveUpdateUser(typed(payload)?),
            Action::ChangePassword => ClientMessage::ChangePassword(typed(payload)?),
            Action::ResetPassword => ClientMessage::ResetPassword(typed_or_default(payload)?),
            Action::Categories => ClientMessage::Categories,
            Action::Unknown => return Err(ProtocolError::UnknownAction(frame.action.clone())),
        })
    }

    pub fn action(&self) -> Action {
        match self {
            ClientMessage::Login(_) => Action::Login,
            ClientMessage::Logout => Action::Logout,
            ClientMessage::TopAds => Action::TopAds,
            ClientMessage::SearchAds(_) => Action::SearchAds,
            ClientMessage::Ad(_) => Action::Ad,
            ClientMessage::SaveUpdateAd(_) => Action::SaveUpdateAd,
            ClientMessage::SaveUpdateUser(_) => Action::SaveUpdateUser,
            ClientMessage::ChangePassword(_) => Action::ChangePassword,
            ClientMessage::ResetPassword(_) => Action::ResetPassword,
            ClientMessage::Categories => Action::Categories,
        }
    }
}

fn typed<T: DeserializeOwned>(payload: Value) -> Result<T, ProtocolError> {
    serde_json::from_value(payload).map_err(|e| ProtocolError::InvalidPayload(e.to_string()))
}

fn typed_or_default<T: DeserializeOwned + Default>(payload: Value) -> Result<T, ProtocolError> {
    if payload.is_null() {
        return Ok(T::default());
    }
    typed(payload)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Fail,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ServerPayload {
    Profile(AuthProfile),
    Ads(Vec<Ad>),
    Ad(Ad),
    Categories(Vec<Category>),
    User(UserResponse),
}

/// Auth envelope of every reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub is_anonymous: bool,

    /// Unix timestamp after which the token can no longer be renewed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
}

impl From<&SessionContext> for AuthState {
    fn from(session: &SessionContext) -> Self {
        match session.principal() {
            Some(principal) => Self {
                token: Some(principal.token.clone()),
                email: Some(principal.email.clone()),
                is_anonymous: false,
                expires: Some(principal.expires_at.timestamp()),
            },
            None => Self {
                is_anonymous: true,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMessage {
    pub action: Action,

    pub status: Status,

    pub status_message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<ServerPayload>,

    pub auth: AuthState,
}

impl ServerMessage {
    pub fn ok(
        action: Action,
        status_message: impl Into<String>,
        payload: Option<ServerPayload>,
        session: &SessionContext,
    ) -> Self {
        Self {
            action,
            status: Status::Ok,
            status_message: status_message.into(),
            payload,
            auth: AuthState::from(session),
        }
    }

    pub fn fail(action: Action, status_message: impl Into<String>, session: &SessionContext) -> Self {
        Self {
            action,
            status: Status::Fail,
            status_message: status_message.into(),
            payload: None,
            auth: AuthState::from(session),
        }
    }
}
