mod catalog_queries;
mod lending_service;

pub use catalog_queries::{
    get_available_books, get_book, get_borrow_history, get_borrowed_books, list_books,
    search_books,
};
pub use lending_service::{ServiceDependencies, add_book, borrow_book, return_book};
