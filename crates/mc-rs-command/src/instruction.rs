//! Console instructions written to the game server's stdin.

use std::fmt;

use crate::items::ItemId;

/// A single line of server console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `say <text>`, a chat broadcast.
    Say(String),
    Give {
        user: String,
        item: ItemId,
        quantity: u32,
    },
    Teleport {
        user: String,
        target: String,
    },
    TimeSet(u32),
    TimeAdd(u32),
    Kick(String),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Say(text) => write!(f, "say {text}"),
            Instruction::Give {
                user,
                item,
                quantity,
            } => write!(f, "give {user} {item} {quantity}"),
            Instruction::Teleport { user, target } => write!(f, "tp {user} {target}"),
            Instruction::TimeSet(value) => write!(f, "time set {value}"),
            Instruction::TimeAdd(value) => write!(f, "time add {value}"),
            Instruction::Kick(user) => write!(f, "kick {user}"),
        }
    }
}

/// Outgoing instruction queue. Writes are fire-and-forget; the wrapper drains
/// the queue after each processed line or tick.
#[derive(Debug, Default)]
pub struct Outbox {
    queue: Vec<Instruction>,
}

impl Outbox {
    /// Queue one instruction.
    pub fn push(&mut self, instruction: Instruction) {
        self.queue.push(instruction);
    }

    /// Queue a chat broadcast.
    pub fn say(&mut self, text: impl Into<String>) {
        self.queue.push(Instruction::Say(text.into()));
    }

    pub fn extend(&mut self, instructions: impl IntoIterator<Item = Instruction>) {
        self.queue.extend(instructions);
    }

    /// Take everything queued so far.
    pub fn drain(&mut self) -> Vec<Instruction> {
        std::mem::take(&mut self.queue)
    }
}
