//! Chat command layer for a wrapped Minecraft server: item lookup, quantity
//! parsing, privileges, the command registry and dispatcher, and the
//! built-in commands.
//!
//! The [`Dispatcher`] consumes server output lines and produces console
//! [`Instruction`]s; it does no I/O besides optional state persistence.

pub mod commands;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod instruction;
pub mod items;
pub mod line;
pub mod privilege;
pub mod properties;
pub mod quantity;
pub mod registry;
pub mod session;
pub mod state;
pub mod store;

#[cfg(test)]
mod testing;

pub use context::Options;
pub use dispatcher::{Dispatch, Dispatcher, Resolution};
pub use error::{CommandError, RegistryError};
pub use instruction::Instruction;
pub use items::{ItemCatalog, ItemId};
pub use privilege::{PrivilegeModel, Tier};
pub use registry::{CommandDescriptor, CommandRegistry};
pub use store::StateStore;
