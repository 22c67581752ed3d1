//! Points and the leaderboard.

use std::collections::BTreeMap;

use crate::context::CommandContext;
use crate::error::CommandError;
use crate::registry::Outcome;

use super::parse_number;

/// Charged to anyone who tries to give themselves points.
const SELF_PENALTY: i64 = 20;

/// Entries printed by `!board`.
const BOARD_SIZE: usize = 5;

/// `!points <target> [amount]`
pub fn points(
    ctx: &mut CommandContext<'_>,
    user: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let target = args[0].to_lowercase();
    let amount: i64 = match args.get(1) {
        Some(amount) => parse_number(amount)?,
        None => 1,
    };
    let requester = user.to_lowercase();

    if requester == target {
        ctx.say("Did you just try to give yourself points? Sure, minus twenty.");
        *ctx.state.points.entry(target).or_default() -= SELF_PENALTY;
        return Ok(Outcome::Done);
    }

    let cap = ctx.tier_of(user).points_cap();
    if amount < 0 {
        ctx.say("Subtracting points? For shame.");
        let penalty = amount.saturating_abs().min(cap);
        *ctx.state.points.entry(requester).or_default() -= penalty;
        return Ok(Outcome::Done);
    }

    let amount = amount.min(cap);
    let total = {
        let balance = ctx.state.points.entry(target.clone()).or_default();
        *balance = balance.saturating_add(amount);
        *balance
    };
    ctx.say(format!(
        "{user} has given {target} {amount} points for a total of {total}."
    ));
    Ok(Outcome::Done)
}

/// `!board [target]`
pub fn board(
    ctx: &mut CommandContext<'_>,
    _: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    if let Some(target) = args.first() {
        let key = target.to_lowercase();
        match ctx.state.points.get(&key).copied() {
            Some(balance) => ctx.say(format!("{key}: {balance}")),
            None => ctx.say(format!("{target} has no points.")),
        }
        return Ok(Outcome::Done);
    }

    for line in leaderboard(&ctx.state.points, BOARD_SIZE) {
        ctx.say(line);
    }
    Ok(Outcome::Done)
}

/// Highest balances first; users sharing a balance are listed together in
/// name order, and the listing stops after `limit` users.
fn leaderboard(points: &BTreeMap<String, i64>, limit: usize) -> Vec<String> {
    let mut by_balance: BTreeMap<i64, Vec<&str>> = BTreeMap::new();
    for (user, &balance) in points {
        by_balance.entry(balance).or_default().push(user);
    }

    by_balance
        .iter()
        .rev()
        .flat_map(|(balance, users)| users.iter().map(move |u| format!("{u}: {balance}")))
        .take(limit)
        .collect()
}
