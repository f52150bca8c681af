mod api;
mod components;
mod config;
mod pages;

use leptos::*;
use leptos_router::*;
use movie_catalog_common::session::Session;

use crate::{
    api::{AuthorizedApi, UnauthorizedApi},
    pages::{
        home::Home,
        login::Login,
        movie_form::{AddMovie, EditMovie},
        Page,
    },
};

/// Render `page` through the session gate. While the session may not view `page` the user is
/// redirected, otherwise `render` builds the page.
fn gated<F, IV>(cx: Scope, page: Page, session: RwSignal<Session>, render: F) -> View
where
    F: Fn(Scope) -> IV + 'static,
    IV: IntoView,
{
    let redirect = create_memo(cx, move |_| session.with(|session| page.redirect(session)));
    (move || match redirect.get() {
        Some(target) => {
            log::debug!("Redirecting from {} to {}", page.path(), target.path());
            view! { cx, <Redirect path=target.path()/> }.into_view(cx)
        }
        None => render(cx).into_view(cx),
    })
    .into_view(cx)
}

/// Like [gated] for protected pages that need the token of the session to call the backend
fn authorized<F, IV>(cx: Scope, page: Page, session: RwSignal<Session>, render: F) -> View
where
    F: Fn(Scope, AuthorizedApi) -> IV + 'static,
    IV: IntoView,
{
    let token = create_memo(cx, move |_| session.with(|session| session.token().map(str::to_owned)));
    gated(cx, page, session, move |cx| {
        token
            .get()
            .map(|token| render(cx, AuthorizedApi::new(config::API_URL, token)))
    })
}

#[component]
pub fn App(cx: Scope) -> impl IntoView {
    let session = create_rw_signal(cx, Session::new());
    let unauthorized_api = UnauthorizedApi::new(config::API_URL);

    view! {
        cx,
        <Router>
            <Routes>
                <Route
                    path=Page::Login.path()
                    view=move |cx| {
                        gated(cx, Page::Login, session, move |cx| {
                            view! { cx, <Login api=unauthorized_api session=session/> }
                        })
                    }
                />
                <Route
                    path=Page::Home.path()
                    view=move |cx| {
                        authorized(cx, Page::Home, session, move |cx, api| {
                            view! { cx, <Home api=api session=session/> }
                        })
                    }
                />
                <Route
                    path=Page::AddMovie.path()
                    view=move |cx| {
                        authorized(cx, Page::AddMovie, session, |cx, api| {
                            view! { cx, <AddMovie api=api/> }
                        })
                    }
                />
                <Route
                    path=Page::EditMovie.path()
                    view=move |cx| {
                        authorized(cx, Page::EditMovie, session, |cx, api| {
                            view! { cx, <EditMovie api=api/> }
                        })
                    }
                />
            </Routes>
        </Router>
    }
}
