//! PostgreSQL implementations of the store traits.

pub mod connection;
pub mod file;
pub mod recipe;
pub mod step;
pub mod tag;
pub mod user;

pub use connection::ConnectionRepository;
pub use file::FileRepository;
pub use recipe::RecipeRepository;
pub use step::StepRepository;
pub use tag::TagRepository;
pub use user::UserRepository;
