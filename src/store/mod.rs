mod posts;
mod users;

pub use posts::PostStore;
pub use users::UserStore;
