//! Client session and the gate deciding which pages it may view

use crate::data::user::User;

/// Authentication state derived from the [Session]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No token
    Unauthenticated,
    /// Token present, the profile may still be loading
    Authenticated,
}

/// Bearer token and profile of the logged in user. The profile is only kept while a token is
/// present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Bearer token of the current login
    token: Option<String>,
    /// Profile fetched with [Session::token]
    logged_in_user: Option<User>,
    /// Confirmation shown once the user lands on the listing
    notice: Option<String>,
    /// Reason the profile could not be fetched after login
    profile_error: Option<String>,
}

/// Confirmation recorded by [Session::login]
pub const LOGIN_NOTICE: &str = "Logged in successfully";

impl Session {
    /// Logged out session
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the token of a successful login. Any profile of a previous login is dropped until
    /// the new one is fetched.
    pub fn login(&mut self, token: String) {
        log::info!("Session authenticated");
        self.token = Some(token);
        self.logged_in_user = None;
        self.notice = Some(LOGIN_NOTICE.to_owned());
        self.profile_error = None;
    }

    /// Attach the fetched profile. Ignored when the session is no longer authenticated, e.g. the
    /// user logged out before the profile request resolved.
    pub fn set_logged_in_user(&mut self, user: User) -> bool {
        if self.token.is_none() {
            log::warn!("Discarding profile of `{}`, session is not authenticated", user.name);
            return false;
        }
        self.logged_in_user = Some(user);
        self.profile_error = None;
        true
    }

    /// Record that the profile request failed so the listing can report it. Ignored when the
    /// session is no longer authenticated.
    pub fn set_profile_error(&mut self, message: String) -> bool {
        if self.token.is_none() {
            return false;
        }
        self.profile_error = Some(message);
        true
    }

    /// Pending login confirmation
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Close the login confirmation
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Pending profile fetch failure
    pub fn profile_error(&self) -> Option<&str> {
        self.profile_error.as_deref()
    }

    /// Close the profile fetch failure
    pub fn dismiss_profile_error(&mut self) {
        self.profile_error = None;
    }

    /// Forget the token, the profile and every pending banner
    pub fn logout(&mut self) {
        log::info!("Session cleared");
        *self = Self::default();
    }

    /// Bearer token, [None] when logged out
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Profile of the current login, once fetched
    pub fn logged_in_user(&self) -> Option<&User> {
        self.token.as_ref().and(self.logged_in_user.as_ref())
    }

    /// Whether a token is held
    pub const fn auth_state(&self) -> AuthState {
        if self.token.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Shorthand for [AuthState::Authenticated]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.auth_state(), AuthState::Authenticated)
    }
}

/// Every page of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Login and register toggle
    Login,
    /// Movie listing
    Home,
    /// Create a movie
    AddMovie,
    /// Edit the movie of the route's `id`
    EditMovie,
}

impl Page {
    /// Route pattern of the page
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Home => "/home",
            Self::AddMovie => "/add-movie",
            Self::EditMovie => "/edit-movie/:id",
        }
    }

    /// Concrete path of the edit page for the movie `id`
    pub fn edit_movie_path(id: &str) -> String {
        format!("/edit-movie/{id}")
    }

    /// True for pages that need a token
    pub const fn is_protected(&self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Page the user must be sent to instead of `self`, if any. Unauthenticated users are sent
    /// to the login page from every protected page and authenticated users are sent from the
    /// login page to the movie listing.
    pub const fn redirect(&self, session: &Session) -> Option<Self> {
        match (session.auth_state(), self.is_protected()) {
            (AuthState::Unauthenticated, true) => Some(Self::Login),
            (AuthState::Authenticated, false) => Some(Self::Home),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use rstest::{fixture, rstest};

    use super::{AuthState, Page, Session, LOGIN_NOTICE};
    use crate::data::user::User;

    fn user() -> User {
        User {
            id: Some("u1".to_owned()),
            name: "Jane".to_owned(),
            email: "jane@example.com".to_owned(),
        }
    }

    #[fixture]
    fn session() -> Session {
        let mut session = Session::new();
        session.login("token-1".to_owned());
        session.set_logged_in_user(user());
        session
    }

    #[rstest]
    fn login_should_authenticate(session: Session) {
        assert_eq!(session.auth_state(), AuthState::Authenticated);
        assert_eq!(session.token(), Some("token-1"));
        assert_eq!(session.logged_in_user(), Some(&user()));
    }

    #[rstest]
    fn logout_should_clear_token_and_user(mut session: Session) {
        session.logout();

        assert_eq!(session.token(), None);
        assert_eq!(session.logged_in_user(), None);
        assert_eq!(session, Session::new());
    }

    #[rstest]
    #[case(Page::Home)]
    #[case(Page::AddMovie)]
    #[case(Page::EditMovie)]
    fn protected_pages_should_redirect_to_login_after_logout(mut session: Session, #[case] page: Page) {
        assert_eq!(page.redirect(&session), None);

        session.logout();

        assert_eq!(page.redirect(&session), Some(Page::Login));
    }

    #[rstest]
    fn login_page_should_redirect_authenticated_user_home(session: Session) {
        assert_eq!(Page::Login.redirect(&session), Some(Page::Home));
        assert_eq!(Page::Login.redirect(&Session::new()), None);
    }

    #[test]
    fn login_should_leave_notice_for_listing() {
        let mut session = Session::new();

        session.login("token-1".to_owned());

        assert_eq!(session.notice(), Some(LOGIN_NOTICE));

        session.dismiss_notice();

        assert_eq!(session.notice(), None);
    }

    #[test]
    fn failed_profile_fetch_should_be_kept_until_profile_arrives() {
        let mut session = Session::new();
        session.login("token-1".to_owned());

        assert!(session.set_profile_error("Request failed with status code 500".to_owned()));
        assert_eq!(
            session.profile_error(),
            Some("Request failed with status code 500")
        );

        session.set_logged_in_user(user());

        assert_eq!(session.profile_error(), None);
    }

    #[test]
    fn profile_error_without_token_should_be_discarded() {
        let mut session = Session::new();

        assert!(!session.set_profile_error("boom".to_owned()));
        assert_eq!(session.profile_error(), None);
    }

    #[rstest]
    fn logout_should_clear_notice_and_profile_error(mut session: Session) {
        session.set_profile_error("boom".to_owned());

        session.logout();

        assert_eq!(session.notice(), None);
        assert_eq!(session.profile_error(), None);
    }

    #[test]
    fn profile_without_token_should_be_discarded() {
        let mut session = Session::new();

        assert!(!session.set_logged_in_user(user()));
        assert_eq!(session.logged_in_user(), None);
    }

    #[test]
    fn edit_movie_path_should_embed_id() {
        assert_eq!(Page::edit_movie_path("m1"), "/edit-movie/m1");
    }
}
