//! Translation of installer notifications into reconciliation signals.
//!
//! Local notifications carry a positional parameter list, notifications
//! replayed from another cluster node carry a single payload. Anything that
//! does not match the expected shape is dropped without raising a signal:
//! installation must never fail because its event metadata was malformed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::model::InstalledItemRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InstallEventKind {
    InstallStarting,
    PostStepStarting,
    ItemsInstalled,
    InstallEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventOrigin {
    Local,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "camelCase")]
pub enum InstallNotification {
    Local {
        kind: InstallEventKind,
        #[serde(default)]
        parameters: Vec<Value>,
    },
    Remote {
        kind: InstallEventKind,
        #[serde(default)]
        payload: Option<Value>,
    },
}

impl InstallNotification {
    pub fn local(kind: InstallEventKind, parameters: Vec<Value>) -> Self {
        InstallNotification::Local { kind, parameters }
    }

    pub fn remote(kind: InstallEventKind, payload: Option<Value>) -> Self {
        InstallNotification::Remote { kind, payload }
    }

    pub fn kind(&self) -> InstallEventKind {
        match self {
            InstallNotification::Local { kind, .. } | InstallNotification::Remote { kind, .. } => {
                *kind
            }
        }
    }

    pub fn origin(&self) -> EventOrigin {
        match self {
            InstallNotification::Local { .. } => EventOrigin::Local,
            InstallNotification::Remote { .. } => EventOrigin::Remote,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallSignal {
    InstallStarting(EventOrigin),
    PostStepStarting(EventOrigin),
    ItemsInstalled {
        origin: EventOrigin,
        refs: Vec<InstalledItemRef>,
    },
    InstallEnded(EventOrigin),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstallationArgs {
    items_to_install: Option<Vec<InstalledItemRef>>,
}

/// Maps a notification to a signal, or `None` when it should be ignored.
pub fn translate(notification: &InstallNotification) -> Option<InstallSignal> {
    let origin = notification.origin();
    match notification.kind() {
        InstallEventKind::InstallStarting => Some(InstallSignal::InstallStarting(origin)),
        InstallEventKind::PostStepStarting => Some(InstallSignal::PostStepStarting(origin)),
        InstallEventKind::InstallEnded => Some(InstallSignal::InstallEnded(origin)),
        InstallEventKind::ItemsInstalled => {
            let refs = installed_items(notification)?;
            if refs.is_empty() {
                debug!("ignoring {origin:?} items-installed notification with no items");
                return None;
            }
            Some(InstallSignal::ItemsInstalled { origin, refs })
        }
    }
}

fn installed_items(notification: &InstallNotification) -> Option<Vec<InstalledItemRef>> {
    let payload = match notification {
        InstallNotification::Local { parameters, .. } => {
            let [payload] = parameters.as_slice() else {
                debug!(
                    "ignoring local items-installed notification with {} parameters",
                    parameters.len()
                );
                return None;
            };
            payload
        }
        InstallNotification::Remote { payload, .. } => {
            let Some(payload) = payload else {
                debug!("ignoring remote items-installed notification without payload");
                return None;
            };
            payload
        }
    };

    match InstallationArgs::deserialize(payload) {
        Ok(args) => args.items_to_install,
        Err(e) => {
            debug!("ignoring items-installed notification with malformed payload: {e}");
            None
        }
    }
}
