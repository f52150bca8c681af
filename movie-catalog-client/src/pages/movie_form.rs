use leptos::*;
use leptos_router::use_params_map;
use movie_catalog_common::{
    data::person::{EntityKind, Person},
    form::Form,
    movie_form::{require_movie_id, FormMode, MovieForm, MovieSubmission},
    sequence::RequestToken,
    validation::schemas,
};

use crate::{
    api::AuthorizedApi,
    components::{
        alert::Alert,
        entity_form::EntityForm,
        field::{FormLens, SelectField, TextAreaField, TextField},
    },
};

/// Fetch the option list of `kind` and hand the outcome to the movie form along with `token`
pub fn load_options(api: AuthorizedApi, state: RwSignal<MovieForm>, kind: EntityKind, token: RequestToken) {
    spawn_local(async move {
        let result = api.people(kind).await.map_err(|err| {
            log::error!("Unable to fetch {} options. {err}", kind.label());
            err.to_string()
        });
        state.update(|movie_form| movie_form.apply_options(kind, token, result));
    });
}

fn refresh(api: AuthorizedApi, state: RwSignal<MovieForm>, kind: EntityKind) {
    let mut token = None;
    state.update(|movie_form| token = Some(movie_form.begin_refresh(kind)));
    if let Some(token) = token {
        load_options(api, state, kind, token);
    }
}

fn send(api: AuthorizedApi, state: RwSignal<MovieForm>) {
    let mut accepted: Option<MovieSubmission> = None;
    state.update(|movie_form| {
        movie_form.submit(|submission| accepted = Some(submission));
    });
    let Some(MovieSubmission { mode, request }) = accepted else {
        return;
    };
    spawn_local(async move {
        let result = match &mode {
            FormMode::Create => api.add_movie(&request).await,
            FormMode::Edit { id } => api.edit_movie(id, &request).await,
        };
        let result = result.map_err(|err| {
            log::error!("Unable to save movie `{}`. {err}", request.name);
            err.to_string()
        });
        state.update(|movie_form| movie_form.completed(result));
    });
}

fn movie_form(state: &MovieForm) -> &Form {
    state.form()
}

fn movie_form_mut(state: &mut MovieForm) -> &mut Form {
    state.form_mut()
}

fn producer_options(people: &[Person]) -> Vec<(String, String)> {
    people
        .iter()
        .map(|person| (person.id.clone(), person.name.clone()))
        .collect()
}

#[component]
pub fn AddMovie(cx: Scope, api: AuthorizedApi) -> impl IntoView {
    view! { cx, <MovieFormView api=api initial=MovieForm::create()/> }
}

#[component]
pub fn EditMovie(cx: Scope, api: AuthorizedApi) -> impl IntoView {
    let params = use_params_map(cx);
    let (error, set_error) = create_signal(cx, None::<String>);
    let (loaded, set_loaded) = create_signal(cx, None::<MovieForm>);

    match require_movie_id(params.with(|params| params.get("id").cloned())) {
        Ok(id) => {
            let api = api.clone();
            spawn_local(async move {
                match api.movie(&id).await {
                    Ok(movie) => set_loaded.set(Some(MovieForm::edit(id, &movie))),
                    Err(err) => {
                        log::error!("Unable to fetch movie `{id}`. {err}");
                        set_error.set(Some(err.to_string()));
                    }
                }
            });
        }
        Err(err) => {
            log::warn!("{err}");
            set_error.set(Some(err.to_string()));
        }
    }

    view! { cx,
        <Alert message=error.into() level="danger" on_close=move || set_error.set(None)/>
        {move || {
            loaded
                .get()
                .map(|initial| view! { cx, <MovieFormView api=api.clone() initial=initial/> })
        }}
    }
}

#[component]
fn MovieFormView(cx: Scope, api: AuthorizedApi, initial: MovieForm) -> impl IntoView {
    let is_edit = initial.mode().is_edit();
    let state = create_rw_signal(cx, initial);
    let lens = FormLens::new(state, movie_form, movie_form_mut);

    refresh(api.clone(), state, EntityKind::Actor);
    refresh(api.clone(), state, EntityKind::Producer);

    let success = Signal::derive(cx, move || state.with(|movie_form| movie_form.success().map(str::to_owned)));
    let error = Signal::derive(cx, move || state.with(|movie_form| movie_form.error().map(str::to_owned)));
    let actors = create_memo(cx, move |_| {
        state.with(|movie_form| movie_form.options(EntityKind::Actor).items().to_vec())
    });
    let producers = create_memo(cx, move |_| {
        state.with(|movie_form| movie_form.options(EntityKind::Producer).items().to_vec())
    });
    let actors_placeholder = move || {
        state.with(|movie_form| {
            let options = movie_form.options(EntityKind::Actor);
            if options.is_loaded() {
                "Actors' list is empty"
            } else if options.is_loading() {
                "Loading..."
            } else {
                "Actors could not be loaded"
            }
        })
    };
    let in_flight = move || lens.with(Form::is_in_flight);
    let send_api = api.clone();

    view! { cx,
        <main class="container mt-4">
            <h2>{if is_edit { "Edit Movie" } else { "Add New Movie" }}</h2>
            <Alert
                message=success
                level="success"
                on_close=move || state.update(MovieForm::dismiss_success)
            />
            <Alert
                message=error
                level="danger"
                on_close=move || state.update(MovieForm::dismiss_error)
            />
            <form on:submit=move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                send(send_api.clone(), state);
            }>
                <TextField lens=lens name=schemas::NAME label="Name" input_type="text" placeholder="Movie name"/>
                <TextField
                    lens=lens
                    name=schemas::YEAR_OF_RELEASE
                    label="Year of release"
                    input_type="text"
                    placeholder="e.g. 1999"
                />
                <TextAreaField lens=lens name=schemas::PLOT label="Plot"/>
                <TextField
                    lens=lens
                    name=schemas::POSTER
                    label="Poster"
                    input_type="url"
                    placeholder="https://example.com/poster.jpg"
                />
                <div class="form-group mb-2">
                    <label>"Actors"</label>
                    {move || {
                        is_edit.then(|| {
                            let names = state.with(|movie_form| {
                                movie_form
                                    .associated_actors()
                                    .iter()
                                    .map(|actor| actor.name.as_str())
                                    .collect::<Vec<_>>()
                                    .join(", ")
                            });
                            view! { cx, <p class="text-muted">"Current actors: " {names}</p> }
                        })
                    }}
                    {move || {
                        let items = actors.get();
                        if items.is_empty() {
                            return view! { cx, <p>{actors_placeholder()}</p> }.into_view(cx);
                        }
                        items
                            .into_iter()
                            .map(|actor| {
                                let id = actor.id.clone();
                                let checked_id = actor.id.clone();
                                view! { cx,
                                    <div class="form-check">
                                        <input
                                            class="form-check-input"
                                            type="checkbox"
                                            id=format!("actor-{}", actor.id)
                                            prop:checked=move || {
                                                state.with(|movie_form| movie_form.selected_actors().contains(&checked_id))
                                            }
                                            on:change=move |_| state.update(|movie_form| movie_form.toggle_actor(&id))
                                        />
                                        <label class="form-check-label" for=format!("actor-{}", actor.id)>
                                            {actor.name}
                                        </label>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                            .into_view(cx)
                    }}
                    {move || {
                        lens.with(|form| form.visible_error(schemas::ACTORS))
                            .map(|error| view! { cx, <div class="invalid-feedback d-block">{error}</div> })
                    }}
                    <button
                        class="btn btn-link"
                        type="button"
                        on:click=move |_| state.update(|movie_form| movie_form.sub_form_mut(EntityKind::Actor).toggle())
                    >
                        "New Actor"
                    </button>
                </div>
                <EntityForm state=state api=api.clone() kind=EntityKind::Actor/>
                <SelectField
                    lens=lens
                    name=schemas::PRODUCER
                    label="Producer"
                    placeholder="Select producer"
                    options=move || producers.with(|people| producer_options(people))
                />
                <button
                    class="btn btn-link"
                    type="button"
                    on:click=move |_| state.update(|movie_form| movie_form.sub_form_mut(EntityKind::Producer).toggle())
                >
                    "New Producer"
                </button>
                <EntityForm state=state api=api kind=EntityKind::Producer/>
                <button class="btn btn-primary" type="submit" prop:disabled=in_flight>
                    {move || match (in_flight(), is_edit) {
                        (true, _) => "Saving...",
                        (false, true) => "Edit Movie",
                        (false, false) => "Create Movie",
                    }}
                </button>
            </form>
        </main>
    }
}
