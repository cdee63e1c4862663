use tempo_core::{Section, Theme, User, ViewMode};

/// Navigation and chrome state for one session's UI.
#[derive(Debug, Clone)]
pub struct AppState {
    active_section: Section,
    sidebar_open: bool,
    theme: Theme,
    view_mode: ViewMode,
    user: Option<User>,
    authenticated: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_section: Section::Calendar,
            sidebar_open: true,
            theme: Theme::System,
            view_mode: ViewMode::Day,
            user: None,
            authenticated: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_section(&self) -> Section {
        self.active_section
    }

    pub fn navigate(&mut self, section: Section) {
        self.active_section = section;
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar_open = open;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn login(&mut self, user: User) {
        self.user = Some(user);
        self.authenticated = true;
    }

    /// Sign out and return to the calendar home surface.
    pub fn logout(&mut self) {
        self.user = None;
        self.authenticated = false;
        self.active_section = Section::Calendar;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".into(),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            avatar: None,
        }
    }

    #[test]
    fn test_login_logout_cycle() {
        let mut app = AppState::new();
        app.navigate(Section::Chat);
        app.login(user());
        assert!(app.authenticated());
        assert_eq!(app.active_section(), Section::Chat);

        app.logout();
        assert!(!app.authenticated());
        assert!(app.user().is_none());
        // Logout always lands back on the calendar.
        assert_eq!(app.active_section(), Section::Calendar);
    }

    #[test]
    fn test_toggle_sidebar() {
        let mut app = AppState::new();
        assert!(app.sidebar_open());
        app.toggle_sidebar();
        assert!(!app.sidebar_open());
    }
}
