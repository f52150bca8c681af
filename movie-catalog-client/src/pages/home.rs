use leptos::*;
use movie_catalog_common::{data::movie::Movie, session::Session};

use crate::{
    api::AuthorizedApi,
    components::{alert::Alert, movie_card::MovieCard},
    pages::Page,
};

#[component]
pub fn Home(cx: Scope, api: AuthorizedApi, session: RwSignal<Session>) -> impl IntoView {
    let (movies, set_movies) = create_signal(cx, Vec::<Movie>::new());
    let (loading, set_loading) = create_signal(cx, true);
    let (error, set_error) = create_signal(cx, None::<String>);

    spawn_local(async move {
        match api.movies().await {
            Ok(list) => set_movies.set(list),
            Err(err) => {
                log::error!("Unable to fetch movies. {err}");
                set_error.set(Some(err.to_string()));
            }
        }
        set_loading.set(false);
    });

    let greeting = move || {
        session.with(|session| {
            session.logged_in_user().map(|user| {
                let name = user.name.clone();
                view! { cx, <span class="me-3">"Hi, " <b>{name}</b></span> }
            })
        })
    };
    let notice = Signal::derive(cx, move || session.with(|session| session.notice().map(str::to_owned)));
    let profile_error = Signal::derive(cx, move || {
        session.with(|session| session.profile_error().map(str::to_owned))
    });

    view! { cx,
        <main class="container mt-4">
            <div class="d-flex justify-content-between align-items-center mb-3">
                <h2>"Movie List"</h2>
                <div>
                    {greeting}
                    <a class="btn btn-primary me-2" href=Page::AddMovie.path()>"Add Movie"</a>
                    <button class="btn btn-outline-danger" type="button" on:click=move |_| session.update(Session::logout)>
                        "Logout"
                    </button>
                </div>
            </div>
            <Alert message=notice level="success" on_close=move || session.update(Session::dismiss_notice)/>
            <Alert
                message=profile_error
                level="warning"
                on_close=move || session.update(Session::dismiss_profile_error)
            />
            <Alert message=error.into() level="danger" on_close=move || set_error.set(None)/>
            {move || {
                if loading.get() {
                    return view! { cx, <p>"Loading..."</p> }.into_view(cx);
                }
                let list = movies.get();
                if list.is_empty() {
                    return view! { cx, <p>"No movies yet"</p> }.into_view(cx);
                }
                view! { cx,
                    <div class="row row-cols-1 row-cols-md-3 g-4">
                        {list.into_iter().map(|movie| view! { cx, <MovieCard movie=movie/> }).collect::<Vec<_>>()}
                    </div>
                }
                    .into_view(cx)
            }}
        </main>
    }
}
