//! Inputs bound to a single field of a [Form]

use leptos::*;
use movie_catalog_common::form::Form;

/// View of a [Form] held somewhere inside the page state signal. Lets the same input component
/// drive the top level form of a page and the forms nested in it.
pub struct FormLens<S: 'static> {
    state: RwSignal<S>,
    read: fn(&S) -> &Form,
    write: fn(&mut S) -> &mut Form,
}

impl<S: 'static> Clone for FormLens<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: 'static> Copy for FormLens<S> {}

impl<S: 'static> FormLens<S> {
    pub fn new(state: RwSignal<S>, read: fn(&S) -> &Form, write: fn(&mut S) -> &mut Form) -> Self {
        Self { state, read, write }
    }

    pub fn with<O>(&self, f: impl FnOnce(&Form) -> O) -> O {
        let read = self.read;
        self.state.with(|state| f(read(state)))
    }

    pub fn update(&self, f: impl FnOnce(&mut Form)) {
        let write = self.write;
        self.state.update(|state| f(write(state)));
    }

    fn text(&self, name: &'static str) -> String {
        self.with(|form| form.text(name).to_owned())
    }

    fn set(&self, name: &'static str, value: String) {
        self.update(|form| form.set_field_value(name, value));
    }

    fn touch(&self, name: &'static str) {
        self.update(|form| form.set_field_touched(name));
    }
}

fn root(form: &Form) -> &Form {
    form
}

fn root_mut(form: &mut Form) -> &mut Form {
    form
}

impl FormLens<Form> {
    /// Lens over a signal holding the form itself
    pub fn root(state: RwSignal<Form>) -> Self {
        Self::new(state, root, root_mut)
    }
}

/// Text of `name` that only notifies its readers when the text itself changes, not on every
/// update of the page state
fn selected_value<S: 'static>(cx: Scope, lens: FormLens<S>, name: &'static str) -> Memo<String> {
    create_memo(cx, move |_| lens.text(name))
}

#[component]
fn FieldError<S>(cx: Scope, lens: FormLens<S>, name: &'static str) -> impl IntoView
where
    S: 'static,
{
    move || {
        lens.with(|form| form.visible_error(name))
            .map(|error| view! { cx, <div class="invalid-feedback d-block">{error}</div> })
    }
}

#[component]
pub fn TextField<S>(
    cx: Scope,
    lens: FormLens<S>,
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView
where
    S: 'static,
{
    view! { cx,
        <div class="form-group mb-2">
            <label for=name>{label}</label>
            <input
                class="form-control"
                type=input_type
                id=name
                name=name
                placeholder=placeholder
                prop:value=move || lens.text(name)
                on:input=move |ev| lens.set(name, event_target_value(&ev))
                on:blur=move |_| lens.touch(name)
            />
            <FieldError lens=lens name=name/>
        </div>
    }
}

#[component]
pub fn TextAreaField<S>(
    cx: Scope,
    lens: FormLens<S>,
    name: &'static str,
    label: &'static str,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView
where
    S: 'static,
{
    view! { cx,
        <div class="form-group mb-2">
            <label for=name>{label}</label>
            <textarea
                class="form-control"
                id=name
                name=name
                placeholder=placeholder
                prop:value=move || lens.text(name)
                on:input=move |ev| lens.set(name, event_target_value(&ev))
                on:blur=move |_| lens.touch(name)
            />
            <FieldError lens=lens name=name/>
        </div>
    }
}

/// Single choice out of `(value, label)` pairs. The empty choice shows `placeholder`.
#[component]
pub fn SelectField<S, O>(
    cx: Scope,
    lens: FormLens<S>,
    name: &'static str,
    label: &'static str,
    placeholder: &'static str,
    options: O,
) -> impl IntoView
where
    S: 'static,
    O: Fn() -> Vec<(String, String)> + 'static,
{
    let current = selected_value(cx, lens, name);
    view! { cx,
        <div class="form-group mb-2">
            <label for=name>{label}</label>
            <select
                class="form-select"
                id=name
                name=name
                on:change=move |ev| {
                    lens.set(name, event_target_value(&ev));
                    lens.touch(name);
                }
                on:blur=move |_| lens.touch(name)
            >
                <option value="">{placeholder}</option>
                {move || {
                    let current = current.get();
                    options()
                        .into_iter()
                        .map(|(value, text)| {
                            let selected = value == current;
                            view! { cx, <option value=value selected=selected>{text}</option> }
                        })
                        .collect::<Vec<_>>()
                }}
            </select>
            <FieldError lens=lens name=name/>
        </div>
    }
}
