//! Question retrieval and quiz selection.

mod error;
mod pagination;
mod questions;
mod quiz;
mod request;

pub use error::{TriviaError, TriviaResult};
pub use pagination::paginate;
pub use questions::{
    CategoryListing, CreatedQuestion, DeletedQuestion, Listing, QuestionPage, QuestionService,
    SubmissionOutcome,
};
pub use quiz::{QuizCategory, QuizSelector};
pub use request::{parse_body, QuestionSubmission};
