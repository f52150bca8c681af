//! State of the create/edit movie page: the movie form itself, the actor and producer option
//! lists it selects from and the quick-add sub-forms feeding those lists.

use crate::{
    data::{
        movie::{Movie, MovieRequest},
        person::{EntityKind, Person},
    },
    error::{CatalogError, CatalogResult},
    form::{Form, Submission},
    sequence::{RequestSequence, RequestToken},
    sub_form::{SubForm, SubFormEvent},
    validation::schemas,
};

/// Whether the page creates a movie or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// Add page, submits to the add endpoint
    Create,
    /// Edit page, submits to the edit endpoint of `id`
    Edit {
        /// Backend id of the edited movie
        id: String,
    },
}

impl FormMode {
    /// True on the edit page
    pub const fn is_edit(&self) -> bool {
        matches!(self, Self::Edit { .. })
    }

    /// Banner shown once the backend accepted the movie
    const fn success_message(&self) -> &'static str {
        match self {
            Self::Create => "Movie added successfully",
            Self::Edit { .. } => "Movie edited successfully",
        }
    }
}

/// Validated request ready to be sent, along with the endpoint it targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieSubmission {
    /// Selects the endpoint
    pub mode: FormMode,
    /// Body to send
    pub request: MovieRequest,
}

/// Remotely fetched list of selectable actors or producers
#[derive(Debug, Clone, Default)]
pub struct OptionList {
    /// [None] until a response arrived
    items: Option<Vec<Person>>,
    /// Set while a refresh is pending
    loading: bool,
    /// Tokens of the refreshes, newest wins
    sequence: RequestSequence,
}

impl OptionList {
    /// Start a refresh. The returned token must accompany the response.
    pub fn begin_refresh(&mut self) -> RequestToken {
        self.loading = true;
        self.sequence.issue()
    }

    /// Store the response to `token`. Responses to superseded requests are dropped and `false`
    /// is returned.
    pub fn apply(&mut self, token: RequestToken, items: Vec<Person>) -> bool {
        if !self.sequence.is_current(token) {
            log::debug!("Dropping stale option list response");
            return false;
        }
        self.items = Some(items);
        self.loading = false;
        true
    }

    /// Record that the request for `token` failed. Previously loaded items are kept.
    pub fn fail(&mut self, token: RequestToken) -> bool {
        if !self.sequence.is_current(token) {
            return false;
        }
        self.loading = false;
        true
    }

    /// Loaded options, empty before the first response
    pub fn items(&self) -> &[Person] {
        self.items.as_deref().unwrap_or_default()
    }

    /// True while a refresh is pending
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// True once any response arrived, even an empty list
    pub const fn is_loaded(&self) -> bool {
        self.items.is_some()
    }
}

/// Everything the add and edit pages hold
#[derive(Debug, Clone)]
pub struct MovieForm {
    /// Create or edit
    mode: FormMode,
    /// Movie fields
    form: Form,
    /// Selectable actors
    actors: OptionList,
    /// Selectable producers
    producers: OptionList,
    /// Actors of the movie when the page opened
    original_actors: Vec<String>,
    /// Actors picked on this page, in pick order
    selected_actors: Vec<String>,
    /// Quick-add form for actors
    actor_form: SubForm,
    /// Quick-add form for producers
    producer_form: SubForm,
    /// Success banner
    success: Option<String>,
    /// Error banner
    error: Option<String>,
}

impl MovieForm {
    /// Empty form for a new movie
    pub fn create() -> Self {
        Self::with_form(FormMode::Create, Form::empty(schemas::movie()))
    }

    /// Form seeded from the fetched `movie`, submitted to the edit endpoint of `id`
    pub fn edit(id: String, movie: &Movie) -> Self {
        Self::with_form(
            FormMode::Edit { id },
            Form::new(schemas::movie(), movie.form_values()),
        )
    }

    /// Build the page state around an existing `form`. The actors it already holds become the
    /// originally associated actors.
    pub fn with_form(mode: FormMode, form: Form) -> Self {
        let original_actors = form.list(schemas::ACTORS).to_vec();
        Self {
            mode,
            form,
            actors: OptionList::default(),
            producers: OptionList::default(),
            original_actors,
            selected_actors: Vec::new(),
            actor_form: SubForm::new(EntityKind::Actor),
            producer_form: SubForm::new(EntityKind::Producer),
            success: None,
            error: None,
        }
    }

    /// Create or edit
    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Movie fields
    pub const fn form(&self) -> &Form {
        &self.form
    }

    /// Movie fields, for input handlers
    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    /// Option list of `kind`
    pub const fn options(&self, kind: EntityKind) -> &OptionList {
        match kind {
            EntityKind::Actor => &self.actors,
            EntityKind::Producer => &self.producers,
        }
    }

    /// Option list of `kind`, for responses
    fn options_mut(&mut self, kind: EntityKind) -> &mut OptionList {
        match kind {
            EntityKind::Actor => &mut self.actors,
            EntityKind::Producer => &mut self.producers,
        }
    }

    /// Start a refresh of the `kind` options. See [OptionList::begin_refresh].
    pub fn begin_refresh(&mut self, kind: EntityKind) -> RequestToken {
        self.options_mut(kind).begin_refresh()
    }

    /// Apply the outcome of an option list request. A failure of the current request shows the
    /// error banner, stale outcomes are ignored entirely.
    pub fn apply_options(
        &mut self,
        kind: EntityKind,
        token: RequestToken,
        result: Result<Vec<Person>, String>,
    ) {
        match result {
            Ok(items) => {
                self.options_mut(kind).apply(token, items);
            }
            Err(message) => {
                if self.options_mut(kind).fail(token) {
                    self.error = Some(message);
                }
            }
        }
    }

    /// Quick-add form of `kind`
    pub const fn sub_form(&self, kind: EntityKind) -> &SubForm {
        match kind {
            EntityKind::Actor => &self.actor_form,
            EntityKind::Producer => &self.producer_form,
        }
    }

    /// Quick-add form of `kind`, for input handlers
    pub fn sub_form_mut(&mut self, kind: EntityKind) -> &mut SubForm {
        match kind {
            EntityKind::Actor => &mut self.actor_form,
            EntityKind::Producer => &mut self.producer_form,
        }
    }

    /// React to a finished quick-add request. A creation returns the token of the single refresh
    /// started for the matching option list.
    pub fn apply_sub_form_event(&mut self, event: SubFormEvent) -> Option<RequestToken> {
        match event {
            SubFormEvent::Created { kind, message } => {
                self.success = Some(message.to_owned());
                Some(self.begin_refresh(kind))
            }
            SubFormEvent::Failed { message, .. } => {
                self.error = Some(message);
                None
            }
        }
    }

    /// Ids of the actors associated with the movie when the page opened
    pub fn original_actors(&self) -> &[String] {
        &self.original_actors
    }

    /// Ids picked on this page
    pub fn selected_actors(&self) -> &[String] {
        &self.selected_actors
    }

    /// Replace the new actor selection and sync the form's actor field with the actors that
    /// would be submitted
    pub fn select_actors(&mut self, ids: Vec<String>) {
        self.selected_actors = ids;
        let effective = self.effective_actors();
        self.form.set_field_value(schemas::ACTORS, effective);
        self.form.set_field_touched(schemas::ACTORS);
    }

    /// Add `id` to the new selection, or remove it if it is already selected
    pub fn toggle_actor(&mut self, id: &str) {
        let mut ids = self.selected_actors.clone();
        if let Some(position) = ids.iter().position(|selected| selected == id) {
            ids.remove(position);
        } else {
            ids.push(id.to_owned());
        }
        self.select_actors(ids);
    }

    /// New selections win. Without any, the actors originally associated with the movie are kept.
    pub fn effective_actors(&self) -> Vec<String> {
        if self.selected_actors.is_empty() {
            self.original_actors.clone()
        } else {
            self.selected_actors.clone()
        }
    }

    /// Loaded actor options that are already associated with the movie being edited
    pub fn associated_actors(&self) -> Vec<&Person> {
        self.actors
            .items()
            .iter()
            .filter(|actor| self.original_actors.contains(&actor.id))
            .collect()
    }

    /// Validate the movie and hand the request to `on_submit`. Banners are cleared first.
    pub fn submit<F>(&mut self, on_submit: F) -> Submission
    where
        F: FnOnce(MovieSubmission),
    {
        self.success = None;
        self.error = None;
        let effective = self.effective_actors();
        if self.form.list(schemas::ACTORS) != effective.as_slice() {
            self.form.set_field_value(schemas::ACTORS, effective);
        }
        let mut accepted = None;
        let submission = self.form.submit(|values| accepted = Some(values));
        let Some(values) = accepted else {
            return submission;
        };
        match MovieRequest::try_from(&values) {
            Ok(request) => {
                on_submit(MovieSubmission {
                    mode: self.mode.clone(),
                    request,
                });
                submission
            }
            Err(error) => {
                self.form.complete();
                self.error = Some(error.to_string());
                Submission::Rejected(self.form.errors().clone())
            }
        }
    }

    /// Finish the round trip of an accepted submission
    pub fn completed(&mut self, result: Result<(), String>) {
        self.form.complete();
        match result {
            Ok(()) => self.success = Some(self.mode.success_message().to_owned()),
            Err(message) => self.error = Some(message),
        }
    }

    /// Current success banner
    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Current error banner
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Close the success banner
    pub fn dismiss_success(&mut self) {
        self.success = None;
    }

    /// Close the error banner
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

/// Id of the movie to edit taken from the route. A missing or blank id is an error shown as a
/// banner.
/// # Errors
/// Returns [CatalogError::MissingMovieId] when `id` is absent or blank
pub fn require_movie_id(id: Option<String>) -> CatalogResult<String> {
    id.filter(|id| !id.trim().is_empty())
        .ok_or(CatalogError::MissingMovieId)
}

#[cfg(test)]
mod test {
    use rstest::{fixture, rstest};

    use super::{require_movie_id, FormMode, MovieForm, MovieSubmission};
    use crate::{
        data::{
            movie::Movie,
            person::{EntityKind, Person},
        },
        error::CatalogError,
        form::Submission,
        sub_form::SubFormEvent,
        validation::schemas,
    };

    fn person(id: &str, name: &str) -> Person {
        Person {
            id: id.to_owned(),
            name: name.to_owned(),
            gender: None,
            date_of_birth: None,
            bio: String::new(),
        }
    }

    #[fixture]
    fn movie() -> Movie {
        Movie {
            id: "m1".to_owned(),
            name: "Inception".to_owned(),
            year_of_release: 2010,
            plot: "Dreams within dreams".to_owned(),
            poster: "https://images.example.com/inception.jpg".to_owned(),
            actors: vec![person("a1", "Leonardo DiCaprio"), person("a2", "Elliot Page")],
            producer: Some(person("p1", "Emma Thomas")),
        }
    }

    fn submit(form: &mut MovieForm) -> (Submission, Vec<MovieSubmission>) {
        let mut sent = Vec::new();
        let submission = form.submit(|request| sent.push(request));
        (submission, sent)
    }

    #[test]
    fn create_should_start_empty() {
        let form = MovieForm::create();

        assert_eq!(form.mode(), &FormMode::Create);
        assert_eq!(form.form().text(schemas::NAME), "");
        assert!(form.form().list(schemas::ACTORS).is_empty());
        assert!(form.original_actors().is_empty());
    }

    #[test]
    fn empty_create_should_not_submit() {
        let mut form = MovieForm::create();

        let (submission, sent) = submit(&mut form);

        assert!(sent.is_empty());
        assert!(matches!(submission, Submission::Rejected(errors) if errors.len() == 6));
    }

    #[rstest]
    fn edit_without_new_selection_should_resubmit_original_actors(movie: Movie) {
        let mut form = MovieForm::edit(movie.id.clone(), &movie);

        let (submission, sent) = submit(&mut form);

        assert_eq!(submission, Submission::Accepted);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].mode, FormMode::Edit { id: "m1".to_owned() });
        assert_eq!(sent[0].request.actors, movie.actor_ids());
        assert_eq!(sent[0].request.producer, "p1");
        assert_eq!(sent[0].request.year_of_release, 2010);
    }

    #[rstest]
    fn name_short_after_trimming_should_not_submit(movie: Movie) {
        let mut form = MovieForm::edit(movie.id.clone(), &movie);
        form.form_mut().set_field_value(schemas::NAME, " a");

        let (submission, sent) = submit(&mut form);

        assert!(sent.is_empty());
        assert!(matches!(submission, Submission::Rejected(_)));
        assert_eq!(
            form.form().visible_error(schemas::NAME),
            Some("Name should have atleast 2 characters")
        );
    }

    #[rstest]
    fn padded_name_should_be_sent_trimmed(movie: Movie) {
        let mut form = MovieForm::edit(movie.id.clone(), &movie);
        form.form_mut().set_field_value(schemas::NAME, "  Up  ");

        let (_, sent) = submit(&mut form);

        assert_eq!(sent[0].request.name, "Up");
    }

    #[rstest]
    fn new_selection_should_take_precedence(movie: Movie) {
        let mut form = MovieForm::edit(movie.id.clone(), &movie);

        form.select_actors(vec!["a3".to_owned()]);
        let (_, sent) = submit(&mut form);

        assert_eq!(sent[0].request.actors, ["a3"]);
    }

    #[rstest]
    fn clearing_selection_should_fall_back_to_original_actors(movie: Movie) {
        let mut form = MovieForm::edit(movie.id.clone(), &movie);

        form.select_actors(vec!["a3".to_owned()]);
        form.select_actors(Vec::new());

        assert_eq!(form.form().list(schemas::ACTORS), ["a1", "a2"]);
    }

    #[test]
    fn toggle_actor_should_add_then_remove() {
        let mut form = MovieForm::create();

        form.toggle_actor("a1");
        form.toggle_actor("a2");
        form.toggle_actor("a1");

        assert_eq!(form.selected_actors(), ["a2"]);
        assert_eq!(form.form().list(schemas::ACTORS), ["a2"]);
        assert!(form.form().is_touched(schemas::ACTORS));
    }

    #[test]
    fn create_with_selection_should_submit_selected_actors() {
        let mut form = MovieForm::create();
        {
            let inner = form.form_mut();
            inner.set_field_value(schemas::NAME, "Dunkirk");
            inner.set_field_value(schemas::YEAR_OF_RELEASE, "2017");
            inner.set_field_value(schemas::PLOT, "Evacuation of Dunkirk");
            inner.set_field_value(schemas::POSTER, "https://images.example.com/dunkirk.png");
            inner.set_field_value(schemas::PRODUCER, "p1");
        }
        form.select_actors(vec!["a1".to_owned(), "a4".to_owned()]);

        let (submission, sent) = submit(&mut form);

        assert_eq!(submission, Submission::Accepted);
        assert_eq!(sent[0].mode, FormMode::Create);
        assert_eq!(sent[0].request.actors, ["a1", "a4"]);
        assert!(form.form().is_in_flight());
    }

    #[rstest]
    fn completed_should_set_banner_and_leave_in_flight(movie: Movie) {
        let mut form = MovieForm::edit(movie.id.clone(), &movie);
        submit(&mut form);

        form.completed(Ok(()));

        assert!(!form.form().is_in_flight());
        assert_eq!(form.success(), Some("Movie edited successfully"));

        submit(&mut form);
        assert_eq!(form.success(), None);
        form.completed(Err("Movie not found".to_owned()));

        assert!(!form.form().is_in_flight());
        assert_eq!(form.error(), Some("Movie not found"));
    }

    #[rstest]
    #[case(EntityKind::Actor)]
    #[case(EntityKind::Producer)]
    fn sub_form_creation_should_refresh_matching_list_once(#[case] kind: EntityKind) {
        let mut form = MovieForm::create();
        let initial = form.begin_refresh(kind);
        form.apply_options(kind, initial, Ok(vec![person("x1", "First")]));
        form.sub_form_mut(kind).toggle();

        let event = form.sub_form_mut(kind).created();
        let token = form.apply_sub_form_event(event);

        let token = token.expect("creation should start a refresh");
        assert!(form.options(kind).is_loading());
        assert!(!form.sub_form(kind).is_visible());
        assert_eq!(form.success(), Some(kind.success_message()));
        let other = match kind {
            EntityKind::Actor => EntityKind::Producer,
            EntityKind::Producer => EntityKind::Actor,
        };
        assert!(!form.options(other).is_loading());

        form.apply_options(kind, token, Ok(vec![person("x1", "First"), person("x2", "Second")]));

        assert_eq!(form.options(kind).items().len(), 2);
        assert!(!form.options(kind).is_loading());
    }

    #[test]
    fn sub_form_failure_should_not_refresh() {
        let mut form = MovieForm::create();
        form.sub_form_mut(EntityKind::Producer).toggle();

        let event = form
            .sub_form_mut(EntityKind::Producer)
            .failed("Producer already exists".to_owned());
        let token = form.apply_sub_form_event(event);

        assert_eq!(token, None);
        assert!(!form.options(EntityKind::Producer).is_loading());
        assert!(form.sub_form(EntityKind::Producer).is_visible());
        assert_eq!(form.error(), Some("Producer already exists"));
    }

    #[test]
    fn stale_option_response_should_be_dropped() {
        let mut form = MovieForm::create();
        let stale = form.begin_refresh(EntityKind::Actor);
        let fresh = form.begin_refresh(EntityKind::Actor);

        form.apply_options(EntityKind::Actor, fresh, Ok(vec![person("a1", "New")]));
        form.apply_options(EntityKind::Actor, stale, Ok(Vec::new()));
        form.apply_options(EntityKind::Actor, stale, Err("timeout".to_owned()));

        assert_eq!(form.options(EntityKind::Actor).items(), [person("a1", "New")]);
        assert_eq!(form.error(), None);
    }

    #[test]
    fn option_list_should_distinguish_loading_loaded_and_failed() {
        let mut form = MovieForm::create();
        assert!(!form.options(EntityKind::Producer).is_loaded());

        let failed = form.begin_refresh(EntityKind::Producer);
        form.apply_options(EntityKind::Producer, failed, Err("offline".to_owned()));

        let options = form.options(EntityKind::Producer);
        assert!(!options.is_loading());
        assert!(!options.is_loaded());

        let token = form.begin_refresh(EntityKind::Producer);
        form.apply_options(EntityKind::Producer, token, Ok(Vec::new()));

        let options = form.options(EntityKind::Producer);
        assert!(options.is_loaded());
        assert!(options.items().is_empty());
    }

    #[rstest]
    fn associated_actors_should_resolve_original_ids(movie: Movie) {
        let mut form = MovieForm::edit(movie.id.clone(), &movie);
        let token = form.begin_refresh(EntityKind::Actor);
        form.apply_options(
            EntityKind::Actor,
            token,
            Ok(vec![
                person("a1", "Leonardo DiCaprio"),
                person("a3", "Tom Hardy"),
                person("a2", "Elliot Page"),
            ]),
        );

        let names: Vec<&str> = form
            .associated_actors()
            .iter()
            .map(|actor| actor.name.as_str())
            .collect();

        assert_eq!(names, ["Leonardo DiCaprio", "Elliot Page"]);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("  ".to_owned()))]
    fn missing_movie_id_should_be_an_error(#[case] id: Option<String>) {
        assert!(matches!(require_movie_id(id), Err(CatalogError::MissingMovieId)));
    }
}
