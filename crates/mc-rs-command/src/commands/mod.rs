//! Built-in chat commands.

pub mod give;
pub mod help;
pub mod kickvote;
pub mod notes;
pub mod points;
pub mod shortcuts;
pub mod time;
pub mod timers;
pub mod users;

use crate::privilege::Tier;
use crate::registry::{CommandDescriptor, Param};

use Param::{Optional, Required, Rest, Variadic};

/// Every built-in command.
pub fn builtin() -> Vec<CommandDescriptor> {
    vec![
        // Time of day
        CommandDescriptor::new("dawn", Tier::Op, time::dawn).help("Changes to dawn."),
        CommandDescriptor::new("morning", Tier::Op, time::morning).help("Changes to morning."),
        CommandDescriptor::new("day", Tier::Op, time::day).help("Changes to day."),
        CommandDescriptor::new("evening", Tier::Op, time::evening).help("Changes to evening."),
        CommandDescriptor::new("dusk", Tier::Op, time::dusk).help("Changes to dusk."),
        CommandDescriptor::new("night", Tier::Op, time::night).help("Changes to night."),
        CommandDescriptor::new("warptime", Tier::Op, time::warptime)
            .params(&[Optional("rate")])
            .help("Advances the clock by rate every second, 0 turns it off."),
        CommandDescriptor::new("printtime", Tier::Op, time::printtime)
            .help("Prints the seconds counted since startup."),
        CommandDescriptor::new("disco", Tier::Op, time::disco).help("Toggles disco."),
        // Items
        CommandDescriptor::new("give", Tier::HalfOp, give::give)
            .params(&[Variadic("item")])
            .all("is putting out.")
            .help("Gives an item by name or id, optionally followed by a quantity like 64, 2m or 2d."),
        CommandDescriptor::new("kit", Tier::HalfOp, give::kit)
            .params(&[Required("group")])
            .all("is providing kits to all.")
            .validator(give::validate_kit)
            .help("Gives the contents of a kit, see !kitlist."),
        CommandDescriptor::new("kitlist", Tier::None, give::kitlist)
            .help("Lists the available kits."),
        CommandDescriptor::new("nom", Tier::HalfOp, give::nom)
            .all("is providing noms to all.")
            .help("Gives a golden apple."),
        CommandDescriptor::new("om", Tier::HalfOp, give::om)
            .params(&[Rest("nom")])
            .all("is noming everybody, gross.")
            .help("Gives a golden apple per nom, !om nom nom nom."),
        // Timers
        CommandDescriptor::new("addtimer", Tier::HalfOp, timers::addtimer)
            .params(&[Variadic("item")])
            .help("Gives an item every so many seconds (default 30), !addtimer arrow 10."),
        CommandDescriptor::new("deltimer", Tier::HalfOp, timers::deltimer)
            .params(&[Variadic("item")])
            .help("Removes the timer for an item."),
        CommandDescriptor::new("printtimer", Tier::HalfOp, timers::printtimer)
            .help("Prints your timers."),
        CommandDescriptor::new("stop", Tier::HalfOp, timers::stop)
            .help("Removes all of your timers."),
        // Users
        CommandDescriptor::new("tp", Tier::HalfOp, users::tp)
            .params(&[Required("target")])
            .all("is teleporting all users to their location.")
            .all_handler(users::tpall)
            .help("Teleports you to the target user."),
        CommandDescriptor::new("list", Tier::None, users::list)
            .help("Lists connected users, @ marks ops and % half-ops."),
        CommandDescriptor::new("dnd", Tier::None, users::dnd)
            .help("Toggles do not disturb."),
        CommandDescriptor::new("disturb", Tier::Op, users::disturb)
            .params(&[Required("target")])
            .help("Removes somebody from the do not disturb list."),
        CommandDescriptor::new("printdnd", Tier::Op, users::printdnd)
            .help("Prints the users who do not wish to be disturbed."),
        CommandDescriptor::new("hop", Tier::Op, users::hop)
            .params(&[Required("target")])
            .help("Gives half-op privileges to the target user."),
        CommandDescriptor::new("dehop", Tier::Op, users::dehop)
            .params(&[Required("target")])
            .help("Revokes half-op privileges from the target user."),
        CommandDescriptor::new("uptime", Tier::None, users::uptime)
            .params(&[Optional("target")])
            .help("Prints session and total uptime."),
        CommandDescriptor::new("rules", Tier::None, users::rules).help("Prints the rules."),
        CommandDescriptor::new("property", Tier::Op, users::property)
            .params(&[Optional("key")])
            .help("Prints a server property, or the list of property names."),
        CommandDescriptor::new("welcome", Tier::Op, users::welcome)
            .params(&[Rest("message")])
            .help("Sets the login welcome message, % is replaced by the user's name."),
        // Points
        CommandDescriptor::new("points", Tier::None, points::points)
            .params(&[Required("target"), Optional("amount")])
            .help("Gives points to another user."),
        CommandDescriptor::new("board", Tier::None, points::board)
            .params(&[Optional("target")])
            .help("Prints the leaderboard or one user's points."),
        // Kickvotes
        CommandDescriptor::new("kickvote", Tier::None, kickvote::kickvote)
            .params(&[Optional("target")])
            .help("Starts a kickvote against a user, or votes on the last one."),
        CommandDescriptor::new("vote", Tier::None, kickvote::vote)
            .help("Votes on the last kickvote."),
        CommandDescriptor::new("cancelvote", Tier::Op, kickvote::cancelvote)
            .params(&[Required("target")])
            .help("Cancels the kickvote against a user."),
        CommandDescriptor::new("kickvotes", Tier::Op, kickvote::kickvotes)
            .help("Prints every running kickvote."),
        CommandDescriptor::new("roulette", Tier::Op, kickvote::roulette)
            .help("Kicks a random user, you are three times as likely."),
        // Notes
        CommandDescriptor::new("memo", Tier::None, notes::memo)
            .params(&[Required("target"), Variadic("message")])
            .help("Leaves a message for a user's next login."),
        CommandDescriptor::new("todo", Tier::None, notes::todo)
            .params(&[Rest("item")])
            .help("Adds to the todo list, or prints it."),
        CommandDescriptor::new("finished", Tier::None, notes::finished)
            .params(&[Variadic("item")])
            .help("Removes a todo item by number or text."),
        // Shortcuts and history
        CommandDescriptor::new("s", Tier::HalfOp, shortcuts::s)
            .params(&[Required("label"), Rest("command")])
            .help("Runs a shortcut, or saves one: !s cobble give cobblestone 64."),
        CommandDescriptor::new("shortcuts", Tier::HalfOp, shortcuts::shortcuts)
            .help("Lists your shortcuts."),
        CommandDescriptor::new("last", Tier::None, shortcuts::last)
            .params(&[Optional("n")])
            .help("Repeats your n-th most recent command."),
        CommandDescriptor::new("history", Tier::None, shortcuts::history)
            .help("Prints your most recent commands."),
        CommandDescriptor::new("help", Tier::None, help::help)
            .params(&[Optional("command")])
            .help("Lists your commands, or describes one."),
    ]
}

/// Parse a numeric argument or reject it with a notice.
pub(crate) fn parse_number<T: std::str::FromStr>(
    value: &str,
) -> Result<T, crate::error::CommandError> {
    value.parse().map_err(|_| {
        crate::error::CommandError::ValidationFailed(format!("{value} is not a number."))
    })
}
