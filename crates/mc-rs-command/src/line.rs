//! Classification of game server output lines.

/// What a server output line means to the extension layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Login(String),
    Disconnect(String),
    Opped(String),
    Deopped(String),
    /// `<user> !name args...`, or `<user> :label` as `s label`. Words after
    /// the label are ignored so the shorthand never defines a shortcut.
    Command {
        user: String,
        name: String,
        args: Vec<String>,
    },
    Other,
}

/// Drop everything up to and including the `[INFO]` tag.
fn strip_prefix(line: &str) -> &str {
    match line.find("[INFO]") {
        Some(idx) => line[idx + "[INFO]".len()..].trim_start(),
        None => line.trim_start(),
    }
}

/// Classify one raw server output line.
pub fn classify(line: &str) -> LineEvent {
    let line = strip_prefix(line.trim_end());

    if let Some(rest) = line.strip_prefix('<') {
        return match rest.split_once('>') {
            Some((user, message)) => chat(user, message.trim_start()),
            None => LineEvent::Other,
        };
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [.., "De-opping", user] => return LineEvent::Deopped(user.to_string()),
        [.., "Opping", user] => return LineEvent::Opped(user.to_string()),
        _ => {}
    }
    if line.contains("lost connection") {
        return first_token(line).map_or(LineEvent::Other, LineEvent::Disconnect);
    }
    if line.contains("logged in") {
        return first_token(line).map_or(LineEvent::Other, LineEvent::Login);
    }
    LineEvent::Other
}

fn chat(user: &str, message: &str) -> LineEvent {
    if user.is_empty() {
        return LineEvent::Other;
    }
    let (name, args): (String, Vec<String>) = if let Some(command) = message.strip_prefix('!') {
        let mut words = command.split_whitespace();
        let Some(name) = words.next() else {
            return LineEvent::Other;
        };
        (name.to_lowercase(), words.map(String::from).collect())
    } else if let Some(label) = message.strip_prefix(':') {
        let Some(label) = label.split_whitespace().next() else {
            return LineEvent::Other;
        };
        ("s".to_string(), vec![label.to_string()])
    } else {
        return LineEvent::Other;
    };

    LineEvent::Command {
        user: user.to_string(),
        name,
        args,
    }
}

/// First word, cut before any `[address]` suffix.
fn first_token(line: &str) -> Option<String> {
    let token = line.split_whitespace().next()?;
    let token = token.split('[').next().unwrap_or(token);
    (!token.is_empty()).then(|| token.to_string())
}
