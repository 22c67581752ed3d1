//! Saved shortcuts and command history replay.

use crate::context::CommandContext;
use crate::error::CommandError;
use crate::registry::Outcome;
use crate::state::HISTORY_LEN;

use super::parse_number;

/// `!s <label> [command...]` saves a shortcut, or runs it when given only the
/// label.
pub fn s(ctx: &mut CommandContext<'_>, user: &str, args: &[String]) -> Result<Outcome, CommandError> {
    let label = &args[0];
    let command = &args[1..];
    let key = user.to_lowercase();

    if command.is_empty() {
        let saved = ctx
            .state
            .shortcuts
            .get(&key)
            .and_then(|labels| labels.get(label))
            .cloned();
        return match saved {
            Some(line) => Ok(Outcome::Expand(line)),
            None => {
                ctx.say(format!("{label} is not a valid shortcut for {user}."));
                Ok(Outcome::Done)
            }
        };
    }

    ctx.state
        .shortcuts
        .entry(key)
        .or_default()
        .insert(label.clone(), command.to_vec());
    ctx.say(format!("Shortcut labelled {label} for {user} has been added."));
    Ok(Outcome::Done)
}

/// `!shortcuts` lists the requester's labels.
pub fn shortcuts(
    ctx: &mut CommandContext<'_>,
    user: &str,
    _: &[String],
) -> Result<Outcome, CommandError> {
    let labels = ctx
        .state
        .shortcuts
        .get(&user.to_lowercase())
        .map(|labels| labels.keys().cloned().collect::<Vec<_>>().join(", "))
        .unwrap_or_default();
    ctx.say(format!("Shortcuts for {user}: {labels}."));
    Ok(Outcome::Done)
}

/// `!last [n]` re-runs the n-th most recent command, 1 being the newest.
pub fn last(ctx: &mut CommandContext<'_>, user: &str, args: &[String]) -> Result<Outcome, CommandError> {
    let n: usize = match args.first() {
        Some(n) => parse_number(n)?,
        None => 1,
    };
    if !(1..=HISTORY_LEN).contains(&n) {
        return Err(CommandError::ValidationFailed(format!(
            "Only the last {HISTORY_LEN} commands are remembered."
        )));
    }

    let entry = ctx
        .state
        .history_of(user)
        .and_then(|history| history.get(n - 1))
        .cloned();
    match entry {
        Some(line) => Ok(Outcome::Expand(line)),
        None => {
            ctx.say(format!("{user} has no command {n} to repeat."));
            Ok(Outcome::Done)
        }
    }
}

/// `!history` prints the remembered commands, newest first.
pub fn history(
    ctx: &mut CommandContext<'_>,
    user: &str,
    _: &[String],
) -> Result<Outcome, CommandError> {
    let lines: Vec<String> = ctx
        .state
        .history_of(user)
        .map(|history| {
            history
                .iter()
                .enumerate()
                .map(|(idx, words)| format!("{}. !{}", idx + 1, words.join(" ")))
                .collect()
        })
        .unwrap_or_default();
    if lines.is_empty() {
        ctx.say(format!("No history for {user}."));
    }
    for line in lines {
        ctx.say(line);
    }
    Ok(Outcome::Done)
}
