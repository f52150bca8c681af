pub mod alert;
pub mod credentials;
pub mod entity_form;
pub mod field;
pub mod movie_card;
