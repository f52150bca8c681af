use leptos::*;
use movie_catalog_common::{form::Form, validation::schemas};

use crate::components::field::{FormLens, TextField};

/// Email and password inputs, plus the name input when `register` is set
#[component]
pub fn CredentialsForm<F>(cx: Scope, form: RwSignal<Form>, register: Signal<bool>, on_submit: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let lens = FormLens::root(form);
    let disabled = move || form.with(Form::is_in_flight);
    view! { cx,
        <form on:submit=move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            on_submit();
        }>
            {move || {
                register.get().then(|| {
                    view! { cx,
                        <TextField
                            lens=lens
                            name=schemas::NAME
                            label="Name"
                            input_type="text"
                            placeholder="Enter your name"
                        />
                    }
                })
            }}
            <TextField
                lens=lens
                name=schemas::EMAIL
                label="Email"
                input_type="email"
                placeholder="Enter your email"
            />
            <TextField
                lens=lens
                name=schemas::PASSWORD
                label="Password"
                input_type="password"
                placeholder="Enter your password"
            />
            <button class="btn btn-primary" type="submit" prop:disabled=disabled>
                {move || match (disabled(), register.get()) {
                    (true, _) => "Please wait...",
                    (false, true) => "Register",
                    (false, false) => "Login",
                }}
            </button>
        </form>
    }
}
