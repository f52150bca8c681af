use leptos::*;

/// Dismissible banner. Renders nothing while `message` is empty.
#[component]
pub fn Alert<F>(cx: Scope, message: Signal<Option<String>>, level: &'static str, on_close: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    move || {
        message.get().map(|text| {
            view! { cx,
                <div class=format!("alert alert-{level} alert-dismissible") role="alert">
                    {text}
                    <button type="button" class="btn-close" aria-label="Close" on:click=move |_| on_close()/>
                </div>
            }
        })
    }
}
