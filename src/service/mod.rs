pub mod dialog;
pub mod form;
pub mod submitter;
pub mod validation;
