//! Commands about connected users: teleporting, listing, do not disturb,
//! half-op management and uptime.

use crate::context::CommandContext;
use crate::error::CommandError;
use crate::instruction::Instruction;
use crate::registry::Outcome;

/// Property names printed per line by `!property`.
const PROPERTIES_PER_LINE: usize = 3;

/// `!tp <target>`
pub fn tp(ctx: &mut CommandContext<'_>, user: &str, args: &[String]) -> Result<Outcome, CommandError> {
    let target = &args[0];
    if ctx.check_dnd(target) {
        return Ok(Outcome::Done);
    }
    ctx.out.push(Instruction::Teleport {
        user: user.to_string(),
        target: target.clone(),
    });
    Ok(Outcome::Done)
}

/// `!tpall` brings every disturbable user to the requester.
pub fn tpall(
    ctx: &mut CommandContext<'_>,
    user: &str,
    _: &[String],
) -> Result<Outcome, CommandError> {
    let teleports: Vec<Instruction> = ctx
        .disturbable_users()
        .into_iter()
        .filter(|u| !u.eq_ignore_ascii_case(user))
        .map(|u| Instruction::Teleport {
            user: u,
            target: user.to_string(),
        })
        .collect();
    ctx.out.extend(teleports);
    Ok(Outcome::Done)
}

/// `!list`: `[...]` marks the requester, `@` ops and `%` half-ops.
pub fn list(ctx: &mut CommandContext<'_>, user: &str, _: &[String]) -> Result<Outcome, CommandError> {
    let entries: Vec<String> = ctx
        .sessions
        .online()
        .into_iter()
        .map(|name| {
            let marked = format!("{}{name}", ctx.tier_of(&name).marker());
            if name.eq_ignore_ascii_case(user) {
                format!("[{marked}]")
            } else {
                marked
            }
        })
        .collect();
    ctx.say(entries.join(", "));
    Ok(Outcome::Done)
}

/// `!dnd` toggles do-not-disturb for the requester.
pub fn dnd(ctx: &mut CommandContext<'_>, user: &str, _: &[String]) -> Result<Outcome, CommandError> {
    let key = user.to_lowercase();
    if ctx.state.dnd.remove(&key) {
        ctx.say(format!("{user} is ready to be disturbed. *cough*"));
    } else {
        ctx.state.dnd.insert(key);
        ctx.say(format!("{user} does not wish to be disturbed."));
    }
    Ok(Outcome::Done)
}

/// `!disturb <target>` clears someone else's do-not-disturb.
pub fn disturb(
    ctx: &mut CommandContext<'_>,
    user: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let target = &args[0];
    ctx.state.dnd.remove(&target.to_lowercase());
    ctx.say(format!("{target} is being disturbed by {user}!"));
    Ok(Outcome::Done)
}

/// `!printdnd` lists users who do not wish to be disturbed.
pub fn printdnd(
    ctx: &mut CommandContext<'_>,
    _: &str,
    _: &[String],
) -> Result<Outcome, CommandError> {
    if ctx.state.dnd.is_empty() {
        ctx.say("Everybody is ready to be disturbed.");
    } else {
        let names: Vec<&str> = ctx.state.dnd.iter().map(String::as_str).collect();
        let line = names.join(", ");
        ctx.say(line);
    }
    Ok(Outcome::Done)
}

/// `!hop <target>` makes the target a half-op.
pub fn hop(ctx: &mut CommandContext<'_>, user: &str, args: &[String]) -> Result<Outcome, CommandError> {
    let target = &args[0];
    ctx.privileges.add_hop(target);
    ctx.say(format!("{target} is now a hop, thanks {user}!"));
    Ok(Outcome::Done)
}

/// `!dehop <target>` revokes half-op.
pub fn dehop(
    ctx: &mut CommandContext<'_>,
    user: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let target = &args[0];
    ctx.privileges.remove_hop(target);
    ctx.say(format!("{target} has been de-hoped, thanks {user}!"));
    Ok(Outcome::Done)
}

/// `!uptime [target]`, the current session plus logged time in minutes.
pub fn uptime(
    ctx: &mut CommandContext<'_>,
    user: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let target = args.first().map(String::as_str).unwrap_or(user);
    let logged = ctx.state.uptime.get(&target.to_lowercase()).copied();

    let Some(session) = ctx.session_seconds(target) else {
        match logged {
            Some(logged) => ctx.say(format!(
                "{target} has {} minutes of logged time.",
                minutes(logged)
            )),
            None => ctx.say(format!("{target} does not exist.")),
        }
        return Ok(Outcome::Done);
    };

    let total = logged
        .map(|logged| format!("  Out of a total of {} minutes.", minutes(logged + session)))
        .unwrap_or_default();
    ctx.say(format!(
        "{target} has been online for {} minutes.{total}",
        minutes(session)
    ));
    Ok(Outcome::Done)
}

fn minutes(seconds: u64) -> String {
    format!("{:.2}", seconds as f64 / 60.0)
}

/// `!rules` prints the configured rules.
pub fn rules(ctx: &mut CommandContext<'_>, _: &str, _: &[String]) -> Result<Outcome, CommandError> {
    let rules = ctx.options.rules.clone();
    ctx.say(rules);
    Ok(Outcome::Done)
}

/// `!property [key]`
pub fn property(
    ctx: &mut CommandContext<'_>,
    _: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let properties = &ctx.runtime.server_properties;
    let lines: Vec<String> = match args.first() {
        Some(key) => vec![properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(k, v)| format!("{k} is currently {v}"))
            .unwrap_or_else(|| format!("{key} is not a server property."))],
        None => properties
            .chunks(PROPERTIES_PER_LINE)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|(k, _)| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .collect(),
    };
    for line in lines {
        ctx.say(line);
    }
    Ok(Outcome::Done)
}

/// `!welcome [message...]`
pub fn welcome(
    ctx: &mut CommandContext<'_>,
    user: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    if args.is_empty() {
        let line = if ctx.options.welcome.is_empty() {
            "There is no welcome message.".to_string()
        } else {
            format!("The welcome message is: {}", ctx.options.welcome)
        };
        ctx.say(line);
        return Ok(Outcome::Done);
    }

    ctx.options.welcome = args.join(" ");
    ctx.say(format!("{user} has changed the welcome message."));
    Ok(Outcome::Done)
}
