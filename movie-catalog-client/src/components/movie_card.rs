use leptos::*;
use movie_catalog_common::data::movie::Movie;

use crate::pages::Page;

#[component]
pub fn MovieCard(cx: Scope, movie: Movie) -> impl IntoView {
    let edit_path = Page::edit_movie_path(&movie.id);
    let actors = movie.actor_names();
    let producer = movie.producer_name().to_owned();
    view! { cx,
        <div class="col">
            <div class="card h-100">
                <img src=movie.poster class="card-img-top" alt=movie.name.clone()/>
                <div class="card-body">
                    <h5 class="card-title">{movie.name} " (" {movie.year_of_release} ")"</h5>
                    <p class="card-text">{movie.plot}</p>
                    <p class="card-text"><b>"Producer: "</b>{producer}</p>
                    <p class="card-text"><b>"Actors: "</b>{actors}</p>
                    <a class="btn btn-outline-primary" href=edit_path>"Edit"</a>
                </div>
            </div>
        </div>
    }
}
