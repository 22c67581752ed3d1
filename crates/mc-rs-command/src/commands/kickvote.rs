//! Kickvotes: weighted votes that kick a user once they cross a threshold.

use rand::seq::SliceRandom;
use tracing::info;

use crate::context::CommandContext;
use crate::error::CommandError;
use crate::instruction::Instruction;
use crate::registry::Outcome;

/// A running vote against one user.
#[derive(Debug, Clone)]
pub struct KickVote {
    /// Target as the server spells the name.
    pub target: String,
    pub tally: u32,
    /// Voters in voting order, lowercased.
    pub voters: Vec<String>,
    /// Tick counter value when the vote started.
    pub started: u64,
}

/// `!kickvote [target]`
pub fn kickvote(
    ctx: &mut CommandContext<'_>,
    user: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let Some(target) = args.first() else {
        return vote(ctx, user, args);
    };
    if !ctx.sessions.is_online(target) {
        ctx.say(format!("No user {target} exists."));
        return Ok(Outcome::Done);
    }

    let key = target.to_lowercase();
    if ctx.runtime.kickvotes.contains_key(&key) {
        submit_vote(ctx, user, &key);
        return Ok(Outcome::Done);
    }

    let target = ctx.sessions.display_name(target);
    let record = KickVote {
        target: target.clone(),
        tally: ctx.tier_of(user).kick_influence(),
        voters: vec![user.to_lowercase()],
        started: ctx.runtime.counter,
    };
    ctx.runtime.kickvotes.insert(key.clone(), record);
    ctx.runtime.last_kick_vote = Some(key.clone());
    info!(initiator = user, against = %target, "Kickvote started");
    ctx.say(format!("A kickvote has been initiated for {target}."));
    ctx.say(format!("To vote enter !kickvote {target}."));
    check_kickvote(ctx, &key);
    Ok(Outcome::Done)
}

/// `!vote`, a vote on the most recently started kickvote.
pub fn vote(ctx: &mut CommandContext<'_>, user: &str, _: &[String]) -> Result<Outcome, CommandError> {
    match ctx.runtime.last_kick_vote.clone() {
        Some(key) if ctx.runtime.kickvotes.contains_key(&key) => submit_vote(ctx, user, &key),
        _ => ctx.say("No kickvote was initiated, dummy."),
    }
    Ok(Outcome::Done)
}

/// `!cancelvote <target>` drops a running kickvote.
pub fn cancelvote(
    ctx: &mut CommandContext<'_>,
    user: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let target = &args[0];
    match ctx.runtime.kickvotes.remove(&target.to_lowercase()) {
        Some(record) => ctx.say(format!(
            "{user} has cancelled the kickvote on {}.",
            record.target
        )),
        None => ctx.say(format!("There is no kickvote against {target} dummy.")),
    }
    Ok(Outcome::Done)
}

/// `!kickvotes` lists every running vote with its tally and voters.
pub fn kickvotes(
    ctx: &mut CommandContext<'_>,
    _: &str,
    _: &[String],
) -> Result<Outcome, CommandError> {
    let lines: Vec<String> = ctx
        .runtime
        .kickvotes
        .values()
        .map(|v| format!("{}: {} {}", v.target, v.tally, v.voters.join(", ")))
        .collect();
    if lines.is_empty() {
        ctx.say("There are no kickvotes.");
    }
    for line in lines {
        ctx.say(line);
    }
    Ok(Outcome::Done)
}

/// `!roulette` kicks a random online user. The requester is entered three
/// extra times.
pub fn roulette(
    ctx: &mut CommandContext<'_>,
    user: &str,
    _: &[String],
) -> Result<Outcome, CommandError> {
    let mut candidates = ctx.sessions.online();
    candidates.extend(std::iter::repeat(user.to_string()).take(3));

    let picked = candidates
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or_else(|| CommandError::Runtime("no roulette candidates".into()))?;
    ctx.say(format!(
        "{user} has requested a roulette kick, they have a higher chance of being kicked."
    ));
    ctx.out.push(Instruction::Kick(picked));
    Ok(Outcome::Done)
}

fn submit_vote(ctx: &mut CommandContext<'_>, user: &str, key: &str) {
    let influence = ctx.tier_of(user).kick_influence();
    let voter = user.to_lowercase();
    let Some(record) = ctx.runtime.kickvotes.get_mut(key) else {
        return;
    };
    if record.voters.contains(&voter) {
        ctx.say("You have already voted.");
        return;
    }
    record.voters.push(voter);
    record.tally += influence;
    check_kickvote(ctx, key);
}

/// Kick the target once the tally reaches the threshold.
fn check_kickvote(ctx: &mut CommandContext<'_>, key: &str) {
    let threshold = ctx.options.vote_threshold;
    let passed = ctx
        .runtime
        .kickvotes
        .get(key)
        .is_some_and(|record| record.tally >= threshold);
    if !passed {
        return;
    }
    if let Some(record) = ctx.runtime.kickvotes.remove(key) {
        info!(against = %record.target, tally = record.tally, "Kickvote passed");
        ctx.say(format!(
            "Enough votes have been given to kick {}.",
            record.target
        ));
        ctx.out.push(Instruction::Kick(record.target));
    }
}

/// Drop votes that have been open for the expiration window.
pub(crate) fn expire_votes(ctx: &mut CommandContext<'_>) {
    let now = ctx.runtime.counter;
    let window = ctx.options.vote_expiration;
    let expired: Vec<String> = ctx
        .runtime
        .kickvotes
        .iter()
        .filter(|(_, v)| now.saturating_sub(v.started) >= window)
        .map(|(key, _)| key.clone())
        .collect();

    for key in expired {
        if let Some(record) = ctx.runtime.kickvotes.remove(&key) {
            ctx.say(format!("The kickvote for {} has expired.", record.target));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::Harness;

    fn harness() -> Harness {
        Harness::with_users(&["basicxman", "mike_n_7", "blizzard4U", "Ian_zers"])
            .op("basicxman")
            .hop("mike_n_7")
    }

    #[test]
    fn initiating_announces_the_vote() {
        let mut h = harness();
        let out = h.run("blizzard4U", "kickvote Ian_zers");
        assert_eq!(
            out,
            vec![
                "say A kickvote has been initiated for Ian_zers.",
                "say To vote enter !kickvote Ian_zers.",
            ]
        );
        assert_eq!(h.runtime().kickvotes["ian_zers"].tally, 1);
    }

    #[test]
    fn weighted_votes_pass_at_threshold() {
        let mut h = harness();
        h.run("blizzard4U", "kickvote Ian_zers");
        assert!(h.run("mike_n_7", "vote").is_empty());
        assert_eq!(h.runtime().kickvotes["ian_zers"].tally, 3);
        let out = h.run("basicxman", "kickvote ian_zers");
        assert_eq!(
            out,
            vec![
                "say Enough votes have been given to kick Ian_zers.",
                "kick Ian_zers",
            ]
        );
        assert!(h.runtime().kickvotes.is_empty());
        assert_eq!(h.run("mike_n_7", "vote"), vec!["say No kickvote was initiated, dummy."]);
    }

    #[test]
    fn double_voting_is_rejected() {
        let mut h = harness();
        h.run("blizzard4U", "kickvote Ian_zers");
        assert_eq!(h.run("blizzard4U", "kickvote"), vec!["say You have already voted."]);
        assert_eq!(h.runtime().kickvotes["ian_zers"].tally, 1);
    }

    #[test]
    fn target_must_be_online() {
        let mut h = harness();
        assert_eq!(
            h.run("blizzard4U", "kickvote notch"),
            vec!["say No user notch exists."]
        );
    }

    #[test]
    fn votes_expire_without_kick() {
        let mut h = harness();
        h.set_vote_expiration(3);
        h.run("blizzard4U", "kickvote Ian_zers");
        assert!(h.tick().is_empty());
        assert!(h.tick().is_empty());
        assert_eq!(h.tick(), vec!["say The kickvote for Ian_zers has expired."]);
        assert!(h.runtime().kickvotes.is_empty());
    }

    #[test]
    fn cancel_and_list() {
        let mut h = harness();
        h.run("blizzard4U", "kickvote Ian_zers");
        assert_eq!(
            h.run("basicxman", "kickvotes"),
            vec!["say Ian_zers: 1 blizzard4u"]
        );
        assert_eq!(
            h.run("basicxman", "cancelvote ian_zers"),
            vec!["say basicxman has cancelled the kickvote on Ian_zers."]
        );
        assert_eq!(
            h.run("basicxman", "cancelvote ian_zers"),
            vec!["say There is no kickvote against ian_zers dummy."]
        );
    }

    #[test]
    fn roulette_kicks_someone_online() {
        let mut h = Harness::with_users(&["basicxman"]).op("basicxman");
        let out = h.run("basicxman", "roulette");
        assert_eq!(out.len(), 2);
        assert_eq!(out[1], "kick basicxman");
    }
}
