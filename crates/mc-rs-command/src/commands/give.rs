//! Item commands: give, kits and golden apples.

use crate::context::CommandContext;
use crate::error::CommandError;
use crate::items::{ItemId, GOLDEN_APPLE};
use crate::quantity::{expand_give, split_item_and_quantity};
use crate::registry::{Outcome, Validation};

/// Named item bundles as `(item, quantity)` pairs, in name order.
pub const KITS: &[(&str, &[(ItemId, u32)])] = &[
    ("armour", &[(310, 1), (311, 1), (312, 1), (313, 1)]),
    ("builder", &[(4, 256), (20, 64), (50, 64), (58, 1), (54, 2)]),
    ("diamond", &[(276, 1), (277, 1), (278, 1), (279, 1), (293, 1)]),
    ("farming", &[(293, 1), (295, 64), (3, 64), (326, 1)]),
    ("iron", &[(267, 1), (256, 1), (257, 1), (258, 1), (292, 1)]),
    ("nether", &[(49, 14), (259, 1), (50, 64)]),
    ("ranged", &[(261, 1), (262, 320)]),
    ("redstone", &[(331, 128), (76, 32), (356, 16), (69, 8), (77, 8)]),
    ("stone", &[(272, 1), (273, 1), (274, 1), (275, 1)]),
];

fn find_kit(group: &str) -> Option<&'static [(ItemId, u32)]> {
    let group = group.to_lowercase();
    KITS.iter()
        .find(|(name, _)| *name == group)
        .map(|(_, items)| *items)
}

fn kit_names() -> String {
    KITS.iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `!give <item...> [quantity]`
pub fn give(
    ctx: &mut CommandContext<'_>,
    user: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let (item, quantity) = split_item_and_quantity(1, args);
    let item = ctx.resolve_item(&item)?;
    ctx.out.extend(expand_give(user, item, quantity));
    Ok(Outcome::Done)
}

/// Reject unknown kit names, listing the known ones.
pub fn validate_kit(_ctx: &CommandContext<'_>, args: &[String]) -> Validation {
    let group = args.first().map(String::as_str).unwrap_or_default();
    if find_kit(group).is_some() {
        Validation::Ok
    } else {
        Validation::Rejected(format!(
            "{group} is not a valid kit. Kits: {}",
            kit_names()
        ))
    }
}

/// `!kit <group>`
pub fn kit(
    ctx: &mut CommandContext<'_>,
    user: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let group = &args[0];
    let items =
        find_kit(group).ok_or_else(|| CommandError::Runtime(format!("kit {group} vanished")))?;
    for &(item, quantity) in items {
        ctx.out.extend(expand_give(user, item, quantity));
    }
    Ok(Outcome::Done)
}

/// `!kitlist` names every kit.
pub fn kitlist(
    ctx: &mut CommandContext<'_>,
    _: &str,
    _: &[String],
) -> Result<Outcome, CommandError> {
    ctx.say(format!("Kits: {}", kit_names()));
    Ok(Outcome::Done)
}

/// `!nom` gives one golden apple.
pub fn nom(ctx: &mut CommandContext<'_>, user: &str, _: &[String]) -> Result<Outcome, CommandError> {
    ctx.out.extend(expand_give(user, GOLDEN_APPLE, 1));
    Ok(Outcome::Done)
}

/// `!om nom nom nom`, one golden apple per argument.
pub fn om(
    ctx: &mut CommandContext<'_>,
    user: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    for _ in args {
        nom(ctx, user, &[])?;
    }
    Ok(Outcome::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    #[test]
    fn give_single_slot() {
        let mut h = Harness::with_users(&["foo"]).hop("foo");
        assert_eq!(h.run("foo", "give cobblestone 64"), vec!["give foo 4 64"]);
    }

    #[test]
    fn give_multiple_slots() {
        let mut h = Harness::with_users(&["foo"]).hop("foo");
        assert_eq!(
            h.run("foo", "give cobblestone 2m"),
            vec!["give foo 4 64", "give foo 4 64"]
        );
    }

    #[test]
    fn give_less_than_a_slot() {
        let mut h = Harness::with_users(&["foo"]).hop("foo");
        assert_eq!(h.run("foo", "give cobblestone 32"), vec!["give foo 4 32"]);
    }

    #[test]
    fn give_multi_word_item_defaults_to_one() {
        let mut h = Harness::with_users(&["foo"]).hop("foo");
        assert_eq!(h.run("foo", "give flint and steel"), vec!["give foo 259 1"]);
    }

    #[test]
    fn give_unknown_item() {
        let mut h = Harness::with_users(&["foo"]).hop("foo");
        assert_eq!(h.run("foo", "give asdf"), vec!["say No item asdf found."]);
    }

    #[test]
    fn regular_users_cannot_give() {
        let mut h = Harness::with_users(&["blizzard4U"]);
        let out = h.run("blizzard4U", "give cobblestone");
        assert_eq!(out, vec!["say blizzard4U is not a half-op, cannot use !give."]);
    }

    #[test]
    fn giveall_skips_dnd_users() {
        let mut h = Harness::with_users(&["basicxman", "blizzard4U", "mike_n_7"]).op("basicxman");
        h.run("mike_n_7", "dnd");
        let out = h.run("basicxman", "giveall cobblestone");
        assert_eq!(
            out,
            vec![
                "say basicxman is putting out.",
                "give basicxman 4 1",
                "give blizzard4U 4 1",
            ]
        );
    }

    #[test]
    fn kit_gives_every_item() {
        let mut h = Harness::with_users(&["foo"]).hop("foo");
        let out = h.run("foo", "kit ranged");
        assert_eq!(out.len(), 6);
        assert_eq!(out[0], "give foo 261 1");
        assert!(out[1..].iter().all(|line| line == "give foo 262 64"));
    }

    #[test]
    fn invalid_kit_prints_kit_list() {
        let mut h = Harness::with_users(&["foo"]).hop("foo");
        let out = h.run("foo", "kit bogus");
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with("say bogus is not a valid kit."));
        assert!(out[0].contains("diamond"));
    }

    #[test]
    fn om_noms_per_argument() {
        let mut h = Harness::with_users(&["foo"]).hop("foo");
        let out = h.run("foo", "om nom nom nom");
        assert_eq!(out, vec!["give foo 322 1"; 3]);
    }

    #[test]
    fn kits_are_sorted() {
        let names: Vec<&str> = KITS.iter().map(|(n, _)| *n).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
