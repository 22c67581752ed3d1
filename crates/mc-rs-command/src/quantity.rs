//! Quantity tokens and slot-sized give instructions.
//!
//! A quantity token is one or more `{digits}{letter?}` groups, e.g. `2d2m`:
//!
//! | letter | meaning                         |
//! |--------|---------------------------------|
//! | `m`    | digits × 64 (whole stacks)      |
//! | `d`    | round(64 / digits), a fraction  |
//! | `s`    | 64 − digits, at least 1         |
//! | other  | digits                          |
//!
//! Flags are case sensitive: `9M` is 9.

use crate::instruction::Instruction;
use crate::items::ItemId;

/// Items per inventory slot, and the largest quantity one `give` may carry.
pub const STACK_SIZE: u32 = 64;

/// Upper bound on any single give, 40 full slots.
pub const MAX_QUANTITY: u32 = 2560;

/// True if the token starts with at least one ASCII digit.
pub fn is_quantifier(token: &str) -> bool {
    token.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

/// Evaluate a quantity token, clamped to [`MAX_QUANTITY`].
pub fn parse_quantifier(token: &str) -> u32 {
    let mut chars = token.chars().peekable();
    let mut total: u32 = 0;

    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            chars.next();
            continue;
        }

        let mut digits: u32 = 0;
        while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
            digits = digits.saturating_mul(10).saturating_add(d);
            chars.next();
        }
        let flag = chars.next_if(|c| c.is_ascii_lowercase());

        let term = match flag {
            Some('m') => digits.saturating_mul(STACK_SIZE),
            Some('d') => (STACK_SIZE as f64 / digits.max(1) as f64).round() as u32,
            Some('s') => STACK_SIZE.saturating_sub(digits).max(1),
            _ => digits,
        };
        total = total.saturating_add(term);
    }

    total.min(MAX_QUANTITY)
}

/// Split command arguments into an item name and a quantity.
///
/// A single argument is always the item. Otherwise the last argument is the
/// quantity if it looks like one, and the rest form the item name.
pub fn split_item_and_quantity(default: u32, args: &[String]) -> (String, u32) {
    match args {
        [] => (String::new(), default),
        [item] => (item.clone(), default),
        [rest @ .., last] if is_quantifier(last) => (rest.join(" "), parse_quantifier(last)),
        all => (all.join(" "), default),
    }
}

/// Turn a quantity into one `give` per slot.
pub fn expand_give(user: &str, item: ItemId, quantity: u32) -> Vec<Instruction> {
    let give = |quantity| Instruction::Give {
        user: user.to_string(),
        item,
        quantity,
    };

    if quantity <= STACK_SIZE {
        return vec![give(quantity)];
    }

    let quantity = quantity.min(MAX_QUANTITY);
    let full = quantity / STACK_SIZE;
    let remainder = quantity % STACK_SIZE;
    let mut instructions: Vec<Instruction> = (0..full).map(|_| give(STACK_SIZE)).collect();
    if remainder > 0 {
        instructions.push(give(remainder));
    }
    instructions
}
