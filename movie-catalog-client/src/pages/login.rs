use leptos::*;
use movie_catalog_common::{
    data::user::{Credentials, Registration},
    form::Form,
    session::Session,
    validation::{schemas, FormValues},
};

use crate::{
    api::UnauthorizedApi,
    components::{alert::Alert, credentials::CredentialsForm},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
}

impl Mode {
    fn form(self) -> Form {
        match self {
            Self::Login => Form::empty(schemas::login()),
            Self::Register => Form::empty(schemas::register()),
        }
    }

    const fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

#[component]
pub fn Login(cx: Scope, api: UnauthorizedApi, session: RwSignal<Session>) -> impl IntoView {
    let (mode, set_mode) = create_signal(cx, Mode::Login);
    let form = create_rw_signal(cx, Mode::Login.form());
    let (success, set_success) = create_signal(cx, None::<String>);
    let (error, set_error) = create_signal(cx, None::<String>);

    let login_action = create_action(cx, move |credentials: &Credentials| {
        let credentials = credentials.clone();
        async move {
            let result = api.login(&credentials).await;
            form.update(Form::complete);
            let token = match result {
                Ok(token) => token,
                Err(err) => {
                    log::error!("Unable to login with {}. {err}", credentials.email);
                    set_error.set(Some(err.to_string()));
                    return;
                }
            };
            let authorized = api.authorize(token.clone());
            session.update(|session| session.login(token));
            match authorized.user_info().await {
                Ok(user) => session.update(|session| {
                    session.set_logged_in_user(user);
                }),
                Err(err) => {
                    log::error!("Unable to fetch the profile of {}. {err}", credentials.email);
                    session.update(|session| {
                        session.set_profile_error(err.to_string());
                    });
                }
            }
        }
    });

    let register_action = create_action(cx, move |registration: &Registration| {
        let registration = registration.clone();
        async move {
            let result = api.signup(&registration).await;
            form.update(Form::complete);
            match result {
                Ok(message) => set_success.set(Some(message)),
                Err(err) => {
                    log::error!("Unable to register {}. {err}", registration.email);
                    set_error.set(Some(err.to_string()));
                }
            }
        }
    });

    let clear_banners = move || {
        set_success.set(None);
        set_error.set(None);
    };

    let on_submit = move || {
        clear_banners();
        let mut accepted: Option<FormValues> = None;
        form.update(|form| {
            form.submit(|values| accepted = Some(values));
        });
        let Some(values) = accepted else {
            return;
        };
        match mode.get() {
            Mode::Login => login_action.dispatch(Credentials::from(&values)),
            Mode::Register => register_action.dispatch(Registration::from(&values)),
        }
    };

    let toggle_mode = move |_: ev::MouseEvent| {
        let next = mode.get().toggled();
        clear_banners();
        form.set(next.form());
        set_mode.set(next);
    };

    let register = Signal::derive(cx, move || mode.get() == Mode::Register);

    view! { cx,
        <main class="container mt-4">
            <h3>{move || if register.get() { "Register" } else { "Login" }}</h3>
            <Alert message=success.into() level="success" on_close=move || set_success.set(None)/>
            <Alert message=error.into() level="danger" on_close=move || set_error.set(None)/>
            <CredentialsForm form=form register=register on_submit=on_submit/>
            <button class="btn btn-link" type="button" on:click=toggle_mode>
                {move || {
                    if register.get() {
                        "Already have an account? Login"
                    } else {
                        "New here? Register"
                    }
                }}
            </button>
        </main>
    }
}
