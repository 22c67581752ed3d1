//! Memos for offline users and the shared todo list.

use crate::context::CommandContext;
use crate::error::CommandError;
use crate::registry::Outcome;
use crate::state::{Memo, MAX_MEMOS};

/// `!memo <target> <message...>`
pub fn memo(ctx: &mut CommandContext<'_>, user: &str, args: &[String]) -> Result<Outcome, CommandError> {
    let target = &args[0];
    let text = args[1..].join(" ");

    let queue = ctx.state.memos.entry(target.to_lowercase()).or_default();
    if queue.len() >= MAX_MEMOS {
        ctx.say(format!("{target} has too many memos, try again later."));
        return Ok(Outcome::Done);
    }
    queue.push(Memo {
        from: user.to_string(),
        text,
    });
    ctx.say(format!("Memo for {target} added."));
    Ok(Outcome::Done)
}

/// Chat lines delivering and clearing a user's queued memos.
pub(crate) fn take_memos(ctx: &mut CommandContext<'_>, user: &str) -> Vec<String> {
    ctx.state
        .memos
        .remove(&user.to_lowercase())
        .unwrap_or_default()
        .into_iter()
        .map(|memo| format!("Memo from {}: {}", memo.from, memo.text))
        .collect()
}

/// `!todo [item...]` appends an item, or prints the list.
pub fn todo(ctx: &mut CommandContext<'_>, _: &str, args: &[String]) -> Result<Outcome, CommandError> {
    if !args.is_empty() {
        let item = args.join(" ");
        ctx.state.todo.push(item);
        let n = ctx.state.todo.len();
        ctx.say(format!("Added todo item {n}."));
        return Ok(Outcome::Done);
    }

    let lines: Vec<String> = ctx
        .state
        .todo
        .iter()
        .enumerate()
        .map(|(idx, item)| format!("{}. {item}", idx + 1))
        .collect();
    if lines.is_empty() {
        ctx.say("The todo list is empty.");
    }
    for line in lines {
        ctx.say(line);
    }
    Ok(Outcome::Done)
}

/// `!finished <number | item...>` removes by 1-based position or exact text.
pub fn finished(
    ctx: &mut CommandContext<'_>,
    _: &str,
    args: &[String],
) -> Result<Outcome, CommandError> {
    let wanted = args.join(" ");
    let todo = &mut ctx.state.todo;

    let idx = match wanted.parse::<usize>() {
        Ok(n) if (1..=todo.len()).contains(&n) => Some(n - 1),
        _ => todo.iter().position(|item| *item == wanted),
    };
    match idx {
        Some(idx) => {
            let item = todo.remove(idx);
            ctx.say(format!("Finished {item}."));
        }
        None => ctx.say(format!("No todo item {wanted} found.")),
    }
    Ok(Outcome::Done)
}

#[cfg(test)]
mod tests {
    use crate::testing::Harness;

    #[test]
    fn memos_are_delivered_on_login() {
        let mut h = Harness::with_users(&["basicxman"]);
        assert_eq!(
            h.run("basicxman", "memo mike_n_7 the wall fell over"),
            vec!["say Memo for mike_n_7 added."]
        );
        let out = h.connect("Mike_N_7");
        assert_eq!(out, vec!["say Memo from basicxman: the wall fell over"]);
        assert!(h.state().memos.is_empty());
        assert!(h.connect("Mike_N_7").is_empty());
    }

    #[test]
    fn memo_queue_is_bounded() {
        let mut h = Harness::with_users(&["basicxman"]);
        for n in 0..5 {
            h.run("basicxman", &format!("memo mike_n_7 note {n}"));
        }
        assert_eq!(
            h.run("basicxman", "memo mike_n_7 one more"),
            vec!["say mike_n_7 has too many memos, try again later."]
        );
        assert_eq!(h.state().memos["mike_n_7"].len(), 5);
    }

    #[test]
    fn memo_needs_text() {
        let mut h = Harness::with_users(&["basicxman"]);
        assert_eq!(
            h.run("basicxman", "memo mike_n_7"),
            vec!["say Expected message."]
        );
    }

    #[test]
    fn todo_append_list_and_finish() {
        let mut h = Harness::with_users(&["basicxman"]);
        assert_eq!(h.run("basicxman", "todo"), vec!["say The todo list is empty."]);
        h.run("basicxman", "todo build a wall");
        h.run("basicxman", "todo dig a moat");
        h.run("basicxman", "todo light the spawn");
        assert_eq!(
            h.run("basicxman", "todo"),
            vec![
                "say 1. build a wall",
                "say 2. dig a moat",
                "say 3. light the spawn",
            ]
        );
        assert_eq!(h.run("basicxman", "finished 2"), vec!["say Finished dig a moat."]);
        assert_eq!(
            h.run("basicxman", "finished build a wall"),
            vec!["say Finished build a wall."]
        );
        assert_eq!(h.run("basicxman", "finished 9"), vec!["say No todo item 9 found."]);
        assert_eq!(h.state().todo, vec!["light the spawn"]);
    }
}
