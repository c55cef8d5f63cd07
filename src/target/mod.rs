pub mod commands;

use std::sync::{Arc, RwLock};

use crate::utils::sync::{read, write};

pub const DEFAULT_TARGET: &str = "NH4_1209";

/// The prediction target the worker should score against.
///
/// One value for the whole process, replaced wholesale on every set. Clones
/// share the same cell.
#[derive(Clone)]
pub struct TargetSelector {
    current: Arc<RwLock<String>>,
}

impl Default for TargetSelector {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET)
    }
}

impl TargetSelector {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial.into())),
        }
    }

    pub fn get(&self) -> String {
        read(&self.current).clone()
    }

    /// Replace the active target, returning the previous one.
    pub fn set(&self, target: impl Into<String>) -> String {
        std::mem::replace(&mut *write(&self.current), target.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_is_nh4() {
        assert_eq!(TargetSelector::default().get(), "NH4_1209");
    }

    #[test]
    fn set_replaces_and_returns_previous() {
        let selector = TargetSelector::new("NH4_1209");
        let previous = selector.set("COD_1300");
        assert_eq!(previous, "NH4_1209");
        assert_eq!(selector.get(), "COD_1300");
        assert_eq!(selector.get(), "COD_1300");
    }

    #[test]
    fn clones_observe_the_same_value() {
        let selector = TargetSelector::default();
        let handle = selector.clone();
        handle.set("TP_0800");
        assert_eq!(selector.get(), "TP_0800");
    }
}
