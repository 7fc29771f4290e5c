pub mod author;
pub mod book;
pub mod book_authors;
pub mod category;
pub mod copy;
pub mod fine;
pub mod member;
pub mod publisher;
pub mod staff;
pub mod transaction;
