pub mod home;
pub mod login;
pub mod movie_form;

pub use movie_catalog_common::session::Page;
