//! View-state container for the storefront.
//!
//! `StoreApp` owns every piece of mutable UI state. Key handling is a pure
//! transition: it mutates local state and returns an [`Action`] for the event
//! loop to execute, so no network call ever happens inside this module and
//! the whole thing is testable without a terminal or a server.

use std::time::Instant;

use bookstall_core::config::TuiConfig;
use bookstall_core::{Book, Cart, Session};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::net::NetEvent;

#[derive(Debug, Clone)]
pub enum CatalogState {
    Loading,
    Ready(Vec<Book>),
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginFocus,
    pub error: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginFocus {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone)]
pub enum Overlay {
    None,
    Login(LoginForm),
    Cart,
}

/// Effect requested by a key press, executed by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    FetchCatalog,
    SubmitLogin { username: String, password: String },
    StartCheckout,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub since: Instant,
}

pub struct StoreApp {
    pub config: TuiConfig,
    pub catalog: CatalogState,
    pub selected: usize,
    pub session: Session,
    pub cart: Cart,
    pub overlay: Overlay,
    pub cart_selected: usize,
    pub checkout_running: bool,
    pub status: Option<StatusLine>,
}

impl StoreApp {
    pub fn new(config: TuiConfig) -> Self {
        Self {
            config,
            catalog: CatalogState::Loading,
            selected: 0,
            session: Session::default(),
            cart: Cart::new(),
            overlay: Overlay::None,
            cart_selected: 0,
            checkout_running: false,
            status: None,
        }
    }

    pub fn books(&self) -> &[Book] {
        match &self.catalog {
            CatalogState::Ready(books) => books,
            _ => &[],
        }
    }

    pub fn selected_book(&self) -> Option<&Book> {
        self.books().get(self.selected)
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            since: Instant::now(),
        });
    }

    pub fn expire_status(&mut self) {
        let ttl = std::time::Duration::from_millis(self.config.status_ttl_ms);
        if let Some(status) = &self.status {
            if status.since.elapsed() >= ttl {
                self.status = None;
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        match self.overlay {
            Overlay::Login(_) => self.handle_login_key(key),
            Overlay::Cart => self.handle_cart_key(key),
            Overlay::None => self.handle_browse_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('r') => {
                self.catalog = CatalogState::Loading;
                self.selected = 0;
                return Action::FetchCatalog;
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Char('g') => self.selected = 0,
            KeyCode::Char('G') => {
                self.selected = self.books().len().saturating_sub(1);
            }
            KeyCode::Char('l') => {
                if !self.session.is_authenticated() {
                    self.overlay = Overlay::Login(LoginForm::default());
                }
            }
            KeyCode::Char('o') => {
                if self.session.is_authenticated() {
                    self.log_out();
                }
            }
            KeyCode::Char('c') => {
                if self.session.is_authenticated() {
                    self.overlay = Overlay::Cart;
                    self.cart_selected = 0;
                }
            }
            KeyCode::Char('a') | KeyCode::Enter => {
                if self.session.is_authenticated() {
                    if let Some(book) = self.selected_book().cloned() {
                        if book.in_stock() {
                            self.cart.add(&book);
                            self.set_status(format!("Added \"{}\" to cart", book.title));
                        }
                    }
                }
            }
            _ => {}
        }
        Action::None
    }

    /// Logout tears down everything the session gated: the cart contents and
    /// any open cart view go with it, in one step.
    fn log_out(&mut self) {
        self.session.log_out();
        self.cart.clear();
        self.overlay = Overlay::None;
        self.checkout_running = false;
        self.set_status("Logged out");
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> Action {
        let Overlay::Login(form) = &mut self.overlay else {
            return Action::None;
        };
        // Fields are frozen while a request is in flight to prevent a
        // duplicate submission.
        if form.submitting {
            return Action::None;
        }
        match key.code {
            KeyCode::Esc => {
                self.overlay = Overlay::None;
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
                form.focus = match form.focus {
                    LoginFocus::Username => LoginFocus::Password,
                    LoginFocus::Password => LoginFocus::Username,
                };
            }
            KeyCode::Enter => {
                if form.username.trim().is_empty() || form.password.is_empty() {
                    form.error = Some("Username and password are required".to_string());
                } else {
                    form.submitting = true;
                    form.error = None;
                    return Action::SubmitLogin {
                        username: form.username.clone(),
                        password: form.password.clone(),
                    };
                }
            }
            KeyCode::Backspace => {
                match form.focus {
                    LoginFocus::Username => form.username.pop(),
                    LoginFocus::Password => form.password.pop(),
                };
            }
            KeyCode::Char(ch) => match form.focus {
                LoginFocus::Username => form.username.push(ch),
                LoginFocus::Password => form.password.push(ch),
            },
            _ => {}
        }
        Action::None
    }

    fn handle_cart_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                // Closing the view never waits on the checkout: the completion
                // event clears the cart whether or not the modal is still up.
                self.overlay = Overlay::None;
            }
            // Only the mutating controls go inert while an order is placed.
            _ if self.checkout_running => {}
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cart_selected + 1 < self.cart.len() {
                    self.cart_selected += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cart_selected = self.cart_selected.saturating_sub(1);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if let Some(line) = self.cart.lines().get(self.cart_selected) {
                    let (id, qty) = (line.book.id, line.quantity);
                    self.cart.set_quantity(id, qty + 1);
                }
            }
            KeyCode::Char('-') => {
                if let Some(line) = self.cart.lines().get(self.cart_selected) {
                    // Decrement stops at 1; removal is explicit via 'x'.
                    if line.quantity > 1 {
                        let (id, qty) = (line.book.id, line.quantity);
                        self.cart.set_quantity(id, qty - 1);
                    }
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(line) = self.cart.lines().get(self.cart_selected) {
                    let id = line.book.id;
                    self.cart.remove(id);
                    if self.cart_selected >= self.cart.len() {
                        self.cart_selected = self.cart.len().saturating_sub(1);
                    }
                }
            }
            KeyCode::Enter => {
                if !self.cart.is_empty() {
                    self.checkout_running = true;
                    return Action::StartCheckout;
                }
            }
            _ => {}
        }
        Action::None
    }

    pub fn handle_net(&mut self, event: NetEvent) {
        match event {
            NetEvent::CatalogLoaded(books) => {
                if self.selected >= books.len() {
                    self.selected = books.len().saturating_sub(1);
                }
                self.catalog = CatalogState::Ready(books);
            }
            NetEvent::CatalogFailed(message) => {
                self.catalog = CatalogState::Failed(message);
            }
            NetEvent::SessionProbed(Some(user)) => {
                self.session.log_in(user);
            }
            NetEvent::SessionProbed(None) => {
                // Probe failures resolve to anonymous without any banner.
            }
            NetEvent::LoginSucceeded(user) => {
                self.set_status(format!("Welcome, {}!", user.username));
                self.session.log_in(user);
                self.overlay = Overlay::None;
            }
            NetEvent::LoginFailed(message) => {
                if let Overlay::Login(form) = &mut self.overlay {
                    form.submitting = false;
                    form.error = Some(message);
                }
            }
            NetEvent::CheckoutComplete => {
                self.cart.clear();
                self.checkout_running = false;
                self.overlay = Overlay::None;
                self.set_status("Order placed successfully!");
            }
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.books().len();
        if len == 0 {
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, len as isize - 1) as usize;
    }
}
