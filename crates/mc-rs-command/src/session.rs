//! Live user sessions, created on login and dropped on disconnect.

/// A connected user.
#[derive(Debug, Clone)]
pub struct Session {
    /// Name as the server spelled it.
    pub display_name: String,
    /// Tick counter value at login.
    pub login_tick: u64,
}

/// Connected users in login order, looked up case-insensitively.
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: Vec<Session>,
}

impl SessionTable {
    /// Add a session. A repeated login replaces the old entry.
    pub fn login(&mut self, user: &str, tick: u64) {
        self.logout(user);
        self.sessions.push(Session {
            display_name: user.to_string(),
            login_tick: tick,
        });
    }

    /// Remove a session, returning it if the user was online.
    pub fn logout(&mut self, user: &str) -> Option<Session> {
        let idx = self.position(user)?;
        Some(self.sessions.remove(idx))
    }

    pub fn get(&self, user: &str) -> Option<&Session> {
        self.position(user).map(|idx| &self.sessions[idx])
    }

    pub fn is_online(&self, user: &str) -> bool {
        self.position(user).is_some()
    }

    /// Display name of an online user, or the name as given.
    pub fn display_name(&self, user: &str) -> String {
        self.get(user)
            .map(|s| s.display_name.clone())
            .unwrap_or_else(|| user.to_string())
    }

    /// Display names of everyone online, in login order.
    pub fn online(&self) -> Vec<String> {
        self.sessions.iter().map(|s| s.display_name.clone()).collect()
    }

    /// Restart every session's clock at `tick`, returning each user with the
    /// tick their session had started at.
    pub fn restart_all(&mut self, tick: u64) -> Vec<(String, u64)> {
        self.sessions
            .iter_mut()
            .map(|s| (s.display_name.clone(), std::mem::replace(&mut s.login_tick, tick)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn position(&self, user: &str) -> Option<usize> {
        self.sessions
            .iter()
            .position(|s| s.display_name.eq_ignore_ascii_case(user))
    }
}
