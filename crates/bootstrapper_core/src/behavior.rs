//! Bootstrapper behavior contract.
//!
//! A behavior is one discrete step applied to the host's extensions. Which
//! behaviors run, and when, is decided by the host.

use crate::configuration::binding::BindingError;
use crate::extension::contract::Extension;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One step applied to a set of extensions.
pub trait Behavior {
    /// Stable id used in diagnostics.
    fn name(&self) -> &str;

    fn behave(&self, extensions: &mut [Box<dyn Extension>]) -> Result<(), BehaviorError>;
}

/// Behavior execution errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BehaviorError {
    Binding(BindingError),
}

impl Display for BehaviorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Binding(err) => write!(f, "configuration binding failed: {err}"),
        }
    }
}

impl Error for BehaviorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Binding(err) => Some(err),
        }
    }
}

impl From<BindingError> for BehaviorError {
    fn from(value: BindingError) -> Self {
        Self::Binding(value)
    }
}

/// Runs `behaviors` in order over `extensions`, stopping at the first failure.
pub fn apply_behaviors(
    behaviors: &[&dyn Behavior],
    extensions: &mut [Box<dyn Extension>],
) -> Result<(), BehaviorError> {
    for behavior in behaviors {
        if let Err(err) = behavior.behave(extensions) {
            error!(
                "event=behavior_apply module=behavior status=error behavior={} extensions={}",
                behavior.name(),
                extensions.len()
            );
            return Err(err);
        }
        info!(
            "event=behavior_apply module=behavior status=ok behavior={} extensions={}",
            behavior.name(),
            extensions.len()
        );
    }
    Ok(())
}
