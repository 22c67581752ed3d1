//! Per-user auto-give timers.

use crate::context::CommandContext;
use crate::error::CommandError;
use crate::instruction::Instruction;
use crate::quantity::split_item_and_quantity;
use crate::registry::Outcome;

/// Interval used when `!addtimer` is given no number.
pub const DEFAULT_INTERVAL: u32 = 30;

/// `!addtimer <item...> [seconds]`
pub fn addtimer(
    ctx: &mut CommandContext<'_>,
    user: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let (item, interval) = split_item_and_quantity(DEFAULT_INTERVAL, args);
    let item = ctx.resolve_item(&item)?;
    if interval == 0 {
        return Err(CommandError::ValidationFailed(
            "A timer needs an interval of at least one second.".into(),
        ));
    }

    ctx.state
        .timers
        .entry(user.to_lowercase())
        .or_default()
        .insert(item, interval);
    ctx.say(format!(
        "Timer added for {user}.  Giving item id {item} every {interval} seconds."
    ));
    Ok(Outcome::Done)
}

/// `!deltimer <item...>`
pub fn deltimer(
    ctx: &mut CommandContext<'_>,
    user: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let item = ctx.resolve_item(&args.join(" "))?;
    let key = user.to_lowercase();
    let removed = match ctx.state.timers.get_mut(&key) {
        Some(timers) => {
            let removed = timers.remove(&item).is_some();
            if timers.is_empty() {
                ctx.state.timers.remove(&key);
            }
            removed
        }
        None => false,
    };
    if removed {
        ctx.say(format!("Timer for item id {item} removed for {user}."));
    }
    Ok(Outcome::Done)
}

/// `!printtimer` lists the requester's timers.
pub fn printtimer(
    ctx: &mut CommandContext<'_>,
    user: &str,
    _: &[String],
) -> Result<Outcome, CommandError> {
    let lines: Vec<String> = ctx
        .state
        .timers
        .get(&user.to_lowercase())
        .map(|timers| {
            timers
                .iter()
                .map(|(item, interval)| format!("{item} every {interval} seconds."))
                .collect()
        })
        .unwrap_or_default();

    if lines.is_empty() {
        ctx.say(format!("No timers have been added for {user}."));
    }
    for line in lines {
        ctx.say(line);
    }
    Ok(Outcome::Done)
}

/// `!stop` removes every timer the requester owns.
pub fn stop(ctx: &mut CommandContext<'_>, user: &str, _: &[String]) -> Result<Outcome, CommandError> {
    ctx.state.timers.remove(&user.to_lowercase());
    Ok(Outcome::Done)
}

/// Give one of each due item to every online user with timers.
pub(crate) fn fire(ctx: &mut CommandContext<'_>) {
    let counter = ctx.runtime.counter;
    let mut due = Vec::new();
    for session in ctx.sessions.iter() {
        let Some(timers) = ctx.state.timers.get(&session.display_name.to_lowercase()) else {
            continue;
        };
        for (&item, &interval) in timers {
            if interval > 0 && counter % u64::from(interval) == 0 {
                due.push(Instruction::Give {
                    user: session.display_name.clone(),
                    item,
                    quantity: 1,
                });
            }
        }
    }
    ctx.out.extend(due);
}

#[cfg(test)]
mod tests {
    use crate::testing::Harness;

    #[test]
    fn addtimer_defaults_to_thirty_seconds() {
        let mut h = Harness::with_users(&["basicxman"]).hop("basicxman");
        let out = h.run("basicxman", "addtimer cobblestone");
        assert_eq!(
            out,
            vec!["say Timer added for basicxman.  Giving item id 4 every 30 seconds."]
        );
        assert_eq!(h.state().timers["basicxman"][&4], 30);
    }

    #[test]
    fn timer_fires_on_interval() {
        let mut h = Harness::with_users(&["basicxman"]).hop("basicxman");
        h.run("basicxman", "addtimer arrow 2");
        assert!(h.tick().is_empty());
        assert_eq!(h.tick(), vec!["give basicxman 262 1"]);
        assert!(h.tick().is_empty());
        assert_eq!(h.tick(), vec!["give basicxman 262 1"]);
    }

    #[test]
    fn offline_users_get_nothing() {
        let mut h = Harness::with_users(&["basicxman"]).hop("basicxman");
        h.run("basicxman", "addtimer arrow 1");
        h.disconnect("basicxman");
        assert!(h.tick().is_empty());
    }

    #[test]
    fn deltimer_and_stop_remove_timers() {
        let mut h = Harness::with_users(&["basicxman"]).hop("basicxman");
        h.run("basicxman", "addtimer arrow 5");
        h.run("basicxman", "addtimer cobblestone 5");
        h.run("basicxman", "deltimer arrow");
        assert_eq!(h.run("basicxman", "printtimer"), vec!["say 4 every 5 seconds."]);
        h.run("basicxman", "stop");
        assert_eq!(
            h.run("basicxman", "printtimer"),
            vec!["say No timers have been added for basicxman."]
        );
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut h = Harness::with_users(&["basicxman"]).hop("basicxman");
        let out = h.run("basicxman", "addtimer arrow 0");
        assert_eq!(out.len(), 1);
        assert!(h.state().timers.is_empty());
    }
}
