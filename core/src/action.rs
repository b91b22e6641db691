//! High-level actions triggered by key bindings or by an outside controller
//! (tray icon, toggle command).
//!
//! Each action maps to a state transition on one seat's `ImeSession`. The
//! names are the kebab-case strings used in configuration files.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info};

use crate::context::ImeContext;
use crate::engine::Composer;
use crate::session::{ImeSession, InputMode};

/// Error returned for action names that are not in the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("unrecognized action '{0}'")]
    Unrecognized(String),
}

/// Every action a binding or controller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Enable,
    Disable,
    Toggle,
    DeleteLeft,
    DeleteRight,
    MoveLeft,
    MoveRight,
    Compose,
    Accept,
    Discard,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::Enable,
        Action::Disable,
        Action::Toggle,
        Action::DeleteLeft,
        Action::DeleteRight,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Compose,
        Action::Accept,
        Action::Discard,
    ];

    /// Name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Action::Enable => "enable",
            Action::Disable => "disable",
            Action::Toggle => "toggle",
            Action::DeleteLeft => "delete-left",
            Action::DeleteRight => "delete-right",
            Action::MoveLeft => "move-left",
            Action::MoveRight => "move-right",
            Action::Compose => "compose",
            Action::Accept => "accept",
            Action::Discard => "discard",
        }
    }

    /// Apply the action to a seat.
    ///
    /// Editing actions are no-ops while the mode is off or nothing is being
    /// composed. The platform reads `context` afterwards for the new preview
    /// and any committed text.
    pub fn apply<C: Composer>(self, session: &mut ImeSession<C>, context: &mut ImeContext) {
        debug!(action = self.name(), "applying action");
        match self {
            Action::Enable => enable(session, context),
            Action::Disable => disable(session, context),
            Action::Toggle => {
                if session.is_composing() {
                    disable(session, context)
                } else {
                    enable(session, context)
                }
            }
            Action::DeleteLeft => edit(session, context, |c| c.delete_backward(1)),
            Action::DeleteRight => edit(session, context, |c| c.delete_forward(1)),
            Action::MoveLeft => edit(session, context, |c| c.move_left()),
            Action::MoveRight => edit(session, context, |c| c.move_right()),
            Action::Compose => {
                if session.is_composing() {
                    session.sync_to_context(context);
                } else {
                    enable(session, context);
                }
            }
            Action::Accept => {
                if session.is_composing() && !session.composer().is_empty() {
                    session.commit(context);
                }
            }
            Action::Discard => {
                if session.is_composing() && !session.composer().is_empty() {
                    session.clear();
                    session.sync_to_context(context);
                }
            }
        }
    }
}

fn enable<C: Composer>(session: &mut ImeSession<C>, context: &mut ImeContext) {
    if !session.is_composing() {
        info!("composing enabled");
    }
    session.set_mode(InputMode::Composing);
    session.sync_to_context(context);
}

fn disable<C: Composer>(session: &mut ImeSession<C>, context: &mut ImeContext) {
    if session.is_composing() {
        info!("composing disabled");
    }
    session.set_mode(InputMode::Direct);
    session.commit(context);
}

fn edit<C, F>(session: &mut ImeSession<C>, context: &mut ImeContext, op: F)
where
    C: Composer,
    F: FnOnce(&mut C),
{
    if !session.is_composing() || session.composer().is_empty() {
        return;
    }
    op(session.composer_mut());
    session.sync_to_context(context);
    if session.composer().is_empty() {
        // Nothing left to compose: close the preview.
        session.commit(context);
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.name() == name)
            .ok_or_else(|| ActionError::Unrecognized(name.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
