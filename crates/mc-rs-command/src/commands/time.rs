//! Clock commands: time of day, time warp, disco.

use crate::context::CommandContext;
use crate::error::CommandError;
use crate::instruction::Instruction;
use crate::registry::Outcome;

use super::parse_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Dawn,
    Morning,
    Day,
    Evening,
    Dusk,
    Night,
}

impl TimeOfDay {
    /// Value passed to `time set`.
    pub fn ticks(self) -> u32 {
        match self {
            TimeOfDay::Dawn => 23000,
            TimeOfDay::Morning => 0,
            TimeOfDay::Day => 6000,
            TimeOfDay::Evening => 11000,
            TimeOfDay::Dusk => 12500,
            TimeOfDay::Night => 14000,
        }
    }

    fn quote(self) -> &'static str {
        match self {
            TimeOfDay::Dawn => "The sun peeks over the horizon.",
            TimeOfDay::Morning => "",
            TimeOfDay::Day => "High noon.",
            TimeOfDay::Evening => "",
            TimeOfDay::Dusk => "The sun is setting, get inside.",
            TimeOfDay::Night => "Night falls, watch out for creepers.",
        }
    }
}

fn change_time(ctx: &mut CommandContext<'_>, time: TimeOfDay) -> Result<Outcome, CommandError> {
    ctx.out.push(Instruction::TimeSet(time.ticks()));
    if !time.quote().is_empty() {
        ctx.say(time.quote());
    }
    Ok(Outcome::Done)
}

pub fn dawn(ctx: &mut CommandContext<'_>, _: &str, _: &[String]) -> Result<Outcome, CommandError> {
    change_time(ctx, TimeOfDay::Dawn)
}

pub fn morning(
    ctx: &mut CommandContext<'_>,
    _: &str,
    _: &[String],
) -> Result<Outcome, CommandError> {
    change_time(ctx, TimeOfDay::Morning)
}

pub fn day(ctx: &mut CommandContext<'_>, _: &str, _: &[String]) -> Result<Outcome, CommandError> {
    change_time(ctx, TimeOfDay::Day)
}

pub fn evening(
    ctx: &mut CommandContext<'_>,
    _: &str,
    _: &[String],
) -> Result<Outcome, CommandError> {
    change_time(ctx, TimeOfDay::Evening)
}

pub fn dusk(ctx: &mut CommandContext<'_>, _: &str, _: &[String]) -> Result<Outcome, CommandError> {
    change_time(ctx, TimeOfDay::Dusk)
}

pub fn night(ctx: &mut CommandContext<'_>, _: &str, _: &[String]) -> Result<Outcome, CommandError> {
    change_time(ctx, TimeOfDay::Night)
}

/// `!warptime [rate]`
pub fn warptime(
    ctx: &mut CommandContext<'_>,
    user: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let Some(rate) = args.first() else {
        match ctx.runtime.time_warp {
            0 => ctx.say("Time warp is off."),
            rate => ctx.say(format!("Time warp is at {rate} per second.")),
        }
        return Ok(Outcome::Done);
    };

    let rate: u32 = parse_number(rate)?;
    ctx.runtime.time_warp = rate;
    if rate == 0 {
        ctx.say(format!("{user} has turned off the time warp."));
    } else {
        ctx.say(format!("{user} has warped time to {rate} per second."));
    }
    Ok(Outcome::Done)
}

/// `!printtime` shows the tick counter.
pub fn printtime(
    ctx: &mut CommandContext<'_>,
    _: &str,
    _: &[String],
) -> Result<Outcome, CommandError> {
    let counter = ctx.runtime.counter;
    ctx.say(format!("Timer is at {counter}."));
    Ok(Outcome::Done)
}

/// `!disco` toggles the disco flag and announces it.
pub fn disco(
    ctx: &mut CommandContext<'_>,
    user: &str,
    _: &[String],
) -> Result<Outcome, CommandError> {
    if ctx.runtime.disco {
        ctx.say("Disco ends.");
    } else {
        ctx.say(format!(
            "{user} has requested disco, they likely can't actually dance."
        ));
    }
    ctx.runtime.disco = !ctx.runtime.disco;
    Ok(Outcome::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    #[test]
    fn time_commands_set_time() {
        let mut h = Harness::with_users(&["basicxman"]).op("basicxman");
        for (name, time) in [
            ("morning", TimeOfDay::Morning),
            ("evening", TimeOfDay::Evening),
            ("night", TimeOfDay::Night),
            ("dawn", TimeOfDay::Dawn),
            ("dusk", TimeOfDay::Dusk),
            ("day", TimeOfDay::Day),
        ] {
            let out = h.run("basicxman", name);
            assert_eq!(out[0], format!("time set {}", time.ticks()));
        }
    }

    #[test]
    fn half_ops_cannot_change_time() {
        let mut h = Harness::with_users(&["mike_n_7"]).hop("mike_n_7");
        let out = h.run("mike_n_7", "morning");
        assert_eq!(out, vec!["say mike_n_7 is not an op, cannot use !morning."]);
    }

    #[test]
    fn warp_is_emitted_every_tick() {
        let mut h = Harness::with_users(&["basicxman"]).op("basicxman");
        h.run("basicxman", "warptime 20");
        assert_eq!(h.tick(), vec!["time add 20"]);
        assert_eq!(h.tick(), vec!["time add 20"]);
        h.run("basicxman", "warptime 0");
        assert!(h.tick().is_empty());
    }

    #[test]
    fn warptime_rejects_garbage() {
        let mut h = Harness::with_users(&["basicxman"]).op("basicxman");
        let out = h.run("basicxman", "warptime fast");
        assert_eq!(out, vec!["say fast is not a number."]);
        assert_eq!(h.run("basicxman", "warptime"), vec!["say Time warp is off."]);
    }

    #[test]
    fn disco_toggles() {
        let mut h = Harness::with_users(&["basicxman"]).op("basicxman");
        assert!(h.run("basicxman", "disco")[0].contains("requested disco"));
        assert_eq!(h.run("basicxman", "disco"), vec!["say Disco ends."]);
    }

    #[test]
    fn printtime_reports_counter() {
        let mut h = Harness::with_users(&["basicxman"]).op("basicxman");
        h.tick();
        h.tick();
        assert_eq!(h.run("basicxman", "printtime"), vec!["say Timer is at 2."]);
    }
}
