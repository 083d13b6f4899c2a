use bookstall_core::{Author, Book, User};

pub fn book(id: i64, title: &str, price: &str, stock: u32) -> Book {
    Book {
        id,
        title: title.to_string(),
        description: format!("Description of {title}"),
        price: price.parse().unwrap(),
        stock_quantity: stock,
        authors: vec![Author {
            id: id * 100,
            name: format!("Author {id}"),
        }],
        publisher: None,
    }
}

pub fn user(username: &str) -> User {
    User {
        id: 1,
        username: username.to_string(),
        email: format!("{username}@example.com"),
    }
}
