//! Controller addresses and the output-binding seam.
//!
//! Edges and lit panels may carry a controller spec of the form
//! `<ip>#<universe>:<offset>`. The loader decodes it and hands it to an
//! [`OutputBinder`]; network and DMX semantics belong to the binder.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::graph::{EdgeId, PanelId};

/// Controller spec marking an edge with no output.
pub const UNCONTROLLED: &str = "uncontrolled";

/// Where an entity's pixels are sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ControllerAddress {
    /// Controller IP address, as written.
    pub ip: String,
    /// Universe number on that controller.
    pub universe: u32,
    /// Strand offset within the universe.
    pub offset: u32,
}

impl FromStr for ControllerAddress {
    type Err = String;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = spec.split('#').collect();
        let &[ip, rest] = parts.as_slice() else {
            return Err(format!("expected one '#', found {}", parts.len() - 1));
        };
        let parts: Vec<&str> = rest.split(':').collect();
        let &[universe, offset] = parts.as_slice() else {
            return Err(format!("expected one ':', found {}", parts.len() - 1));
        };
        let universe = universe
            .parse()
            .map_err(|_| format!("universe {universe:?} is not an integer"))?;
        let offset = offset
            .parse()
            .map_err(|_| format!("offset {offset:?} is not an integer"))?;
        Ok(Self {
            ip: ip.to_string(),
            universe,
            offset,
        })
    }
}

impl fmt::Display for ControllerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}:{}", self.ip, self.universe, self.offset)
    }
}

/// An entity bound to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundEntity {
    /// An edge strip.
    Edge(EdgeId),
    /// A lit panel.
    Panel(PanelId),
}

/// Receiver of controller bindings discovered during load.
pub trait OutputBinder {
    /// Bind `entity` to `address`; `forward` is false for edges wired from
    /// their higher vertex toward their lower one.
    fn bind(&mut self, entity: BoundEntity, address: &ControllerAddress, forward: bool);
}

/// One recorded binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// The bound entity.
    pub entity: BoundEntity,
    /// Its controller.
    pub address: ControllerAddress,
    /// Wiring direction.
    pub forward: bool,
}

/// A binder that records every binding in order.
#[derive(Debug, Clone, Default)]
pub struct BindingLog {
    /// Bindings in load order.
    pub bindings: Vec<Binding>,
}

impl OutputBinder for BindingLog {
    fn bind(&mut self, entity: BoundEntity, address: &ControllerAddress, forward: bool) {
        self.bindings.push(Binding {
            entity,
            address: address.clone(),
            forward,
        });
    }
}
