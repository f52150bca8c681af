//! Quick-add form creating an actor or producer without leaving the movie form

use leptos::*;
use movie_catalog_common::{
    data::person::{EntityKind, Gender},
    form::Form,
    movie_form::MovieForm,
    validation::schemas,
};
use strum::IntoEnumIterator;

use crate::{
    api::AuthorizedApi,
    components::field::{FormLens, SelectField, TextAreaField, TextField},
    pages::movie_form::load_options,
};

fn actor_form(state: &MovieForm) -> &Form {
    state.sub_form(EntityKind::Actor).form()
}

fn actor_form_mut(state: &mut MovieForm) -> &mut Form {
    state.sub_form_mut(EntityKind::Actor).form_mut()
}

fn producer_form(state: &MovieForm) -> &Form {
    state.sub_form(EntityKind::Producer).form()
}

fn producer_form_mut(state: &mut MovieForm) -> &mut Form {
    state.sub_form_mut(EntityKind::Producer).form_mut()
}

fn lens(state: RwSignal<MovieForm>, kind: EntityKind) -> FormLens<MovieForm> {
    match kind {
        EntityKind::Actor => FormLens::new(state, actor_form, actor_form_mut),
        EntityKind::Producer => FormLens::new(state, producer_form, producer_form_mut),
    }
}

fn gender_options() -> Vec<(String, String)> {
    Gender::iter()
        .map(|gender| (gender.as_ref().to_owned(), gender.label().to_owned()))
        .collect()
}

/// Validate the quick-add form of `kind` and send it. The outcome is reported to the movie form,
/// which refreshes the matching option list after a creation.
fn submit(api: AuthorizedApi, state: RwSignal<MovieForm>, kind: EntityKind) {
    let mut accepted = None;
    state.update(|movie_form| {
        movie_form
            .sub_form_mut(kind)
            .submit(|request| accepted = Some(request));
    });
    let Some(request) = accepted else {
        return;
    };
    spawn_local(async move {
        let result = api.add_person(kind, &request).await;
        let mut refresh = None;
        state.update(|movie_form| {
            let sub_form = movie_form.sub_form_mut(kind);
            let event = match result {
                Ok(()) => sub_form.created(),
                Err(error) => {
                    log::error!("Unable to add {} `{}`. {error}", kind.label(), request.name);
                    sub_form.failed(error.to_string())
                }
            };
            refresh = movie_form.apply_sub_form_event(event);
        });
        if let Some(token) = refresh {
            load_options(api, state, kind, token);
        }
    });
}

#[component]
pub fn EntityForm(cx: Scope, state: RwSignal<MovieForm>, api: AuthorizedApi, kind: EntityKind) -> impl IntoView {
    let visible = create_memo(cx, move |_| state.with(|movie_form| movie_form.sub_form(kind).is_visible()));
    let lens = lens(state, kind);
    let disabled = move || lens.with(Form::is_in_flight);
    let title = format!("Add New {}", kind.label());

    move || {
        let api = api.clone();
        let title = title.clone();
        let heading = title.clone();
        visible.get().then(move || {
            view! { cx,
                <div class="card card-body mb-3">
                    <h5>{heading}</h5>
                    <TextField lens=lens name=schemas::NAME label="Name" input_type="text"/>
                    <SelectField
                        lens=lens
                        name=schemas::GENDER
                        label="Gender"
                        placeholder="Select gender"
                        options=gender_options
                    />
                    <TextField lens=lens name=schemas::DOB label="Date of birth" input_type="date"/>
                    <TextAreaField lens=lens name=schemas::BIO label="Bio"/>
                    <button
                        class="btn btn-secondary"
                        type="button"
                        prop:disabled=disabled
                        on:click=move |_| submit(api.clone(), state, kind)
                    >
                        {move || if disabled() { "Please wait...".to_owned() } else { title.clone() }}
                    </button>
                </div>
            }
        })
    }
}
