//! `!help`.

use crate::context::CommandContext;
use crate::error::CommandError;
use crate::registry::Outcome;

/// Longest help line before wrapping.
const LINE_WIDTH: usize = 60;

/// `!help [command]`
pub fn help(ctx: &mut CommandContext<'_>, user: &str, args: &[String]) -> Result<Outcome, CommandError> {
    if let Some(name) = args.first() {
        let name = name.trim_start_matches('!');
        let lines = match ctx.registry.get(name) {
            Some(desc) => vec![desc.usage(), desc.help.to_string()],
            None => vec![format!("{name} does not exist.")],
        };
        for line in lines {
            ctx.say(line);
        }
        return Ok(Outcome::Done);
    }

    let tier = ctx.tier_of(user);
    let names: Vec<String> = ctx
        .registry
        .iter()
        .filter(|desc| tier >= desc.tier)
        .map(|desc| format!("!{}", desc.name))
        .collect();
    for line in wrap(&names, LINE_WIDTH) {
        ctx.say(line);
    }
    Ok(Outcome::Done)
}

/// Join words with ", " into lines of roughly `width` characters.
fn wrap(words: &[String], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut buf: Vec<&str> = Vec::new();
    let mut len = 0;
    for word in words {
        len += word.len() + 2;
        if len > width && !buf.is_empty() {
            lines.push(buf.join(", "));
            buf.clear();
            len = word.len();
        }
        buf.push(word);
    }
    if !buf.is_empty() {
        lines.push(buf.join(", "));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    #[test]
    fn wrap_breaks_near_width() {
        let words: Vec<String> = (0..20).map(|n| format!("!command{n}")).collect();
        let lines = wrap(&words, LINE_WIDTH);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.len() <= LINE_WIDTH + 2));
        assert_eq!(lines.join(", "), words.join(", "));
    }

    #[test]
    fn listing_is_filtered_by_tier() {
        let mut h = Harness::with_users(&["basicxman", "blizzard4U"]).op("basicxman");
        let user = h.run("blizzard4U", "help").join(" ");
        assert!(user.contains("!list"));
        assert!(!user.contains("!give"));
        assert!(!user.contains("!morning"));

        let op = h.run("basicxman", "help").join(" ");
        assert!(op.contains("!give"));
        assert!(op.contains("!morning"));
    }

    #[test]
    fn help_for_one_command() {
        let mut h = Harness::with_users(&["basicxman"]);
        let out = h.run("basicxman", "help points");
        assert_eq!(out[0], "say !points <target> [amount]");
        assert_eq!(out.len(), 2);
        assert_eq!(h.run("basicxman", "help bogus"), vec!["say bogus does not exist."]);
    }
}
