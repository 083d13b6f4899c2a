use bookstall_core::catalog::{preview_description, Book};
use bookstall_core::CartLine;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use rust_decimal::Decimal;

use crate::app::{CatalogState, LoginFocus, LoginForm, Overlay, StoreApp};

const SAMPLE_TEASER: &str = "\"This is a sample excerpt from the book. \
Login to read the full content and access all features...\"";

pub fn draw(f: &mut Frame<'_>, app: &StoreApp) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    draw_header(f, chunks[0], app);
    draw_main(f, chunks[1], app);
    draw_footer(f, chunks[2], app);

    match &app.overlay {
        Overlay::Login(form) => draw_login_modal(f, size, form),
        Overlay::Cart => draw_cart_modal(f, size, app),
        Overlay::None => {}
    }
}

fn fmt_price(price: Decimal) -> String {
    format!("€{price:.2}")
}

fn draw_header(f: &mut Frame<'_>, area: Rect, app: &StoreApp) {
    let mut parts = vec![
        Span::styled("Bookstall", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
    ];
    match app.session.user() {
        Some(user) => {
            parts.push(Span::styled(
                format!("Welcome, {}!", user.username),
                Style::default().fg(Color::Green),
            ));
            parts.push(Span::raw("  "));
            parts.push(Span::styled(
                format!("Cart ({})", app.cart.item_count()),
                Style::default().fg(Color::Cyan),
            ));
        }
        None => {
            parts.push(Span::styled(
                "Browsing as guest",
                Style::default().fg(Color::Gray),
            ));
        }
    }
    let header = Paragraph::new(Line::from(parts)).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn draw_main(f: &mut Frame<'_>, area: Rect, app: &StoreApp) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    draw_catalog(f, chunks[0], app);
    draw_detail(f, chunks[1], app);
}

fn draw_catalog(f: &mut Frame<'_>, area: Rect, app: &StoreApp) {
    let block = Block::default().borders(Borders::ALL).title("Books");
    let lines: Vec<Line> = match &app.catalog {
        CatalogState::Loading => vec![Line::from("Loading books...")],
        CatalogState::Failed(message) => vec![
            Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press r to retry",
                Style::default().fg(Color::Gray),
            )),
        ],
        CatalogState::Ready(books) if books.is_empty() => {
            vec![Line::from("No books available at the moment.")]
        }
        CatalogState::Ready(books) => books
            .iter()
            .enumerate()
            .map(|(idx, book)| catalog_line(idx, book, app))
            .collect(),
    };

    let viewport = area.height.saturating_sub(2) as usize;
    let offset = if viewport > 0 && app.selected >= viewport {
        (app.selected + 1 - viewport) as u16
    } else {
        0
    };
    let widget = Paragraph::new(lines).block(block).scroll((offset, 0));
    f.render_widget(widget, area);
}

fn catalog_line<'a>(idx: usize, book: &'a Book, app: &StoreApp) -> Line<'a> {
    let selected = idx == app.selected;
    let marker = if selected { "> " } else { "  " };
    let style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut spans = vec![
        Span::styled(marker, style),
        Span::styled(book.title.as_str(), style),
        Span::raw(" "),
        Span::styled(fmt_price(book.price), Style::default().fg(Color::Gray)),
    ];
    if !book.in_stock() {
        spans.push(Span::styled(
            " (out of stock)",
            Style::default().fg(Color::Red),
        ));
    }
    if app.cart.quantity_of(book.id) > 0 {
        spans.push(Span::styled(
            format!(" [in cart x{}]", app.cart.quantity_of(book.id)),
            Style::default().fg(Color::Cyan),
        ));
    }
    Line::from(spans)
}

fn draw_detail(f: &mut Frame<'_>, area: Rect, app: &StoreApp) {
    let block = Block::default().borders(Borders::ALL).title("Details");
    let Some(book) = app.selected_book() else {
        let widget = Paragraph::new("").block(block);
        f.render_widget(widget, area);
        return;
    };

    let lines = detail_lines(book, app.session.is_authenticated());
    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

/// Detail-panel content for one book. Anonymous visitors get the truncated
/// description, the sample teaser and the price, but no stock or publisher.
fn detail_lines(book: &Book, authenticated: bool) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            book.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if !book.authors.is_empty() {
        lines.push(Line::from(format!("Authors: {}", book.author_line())));
    }
    lines.push(Line::from(vec![
        Span::raw("Price: "),
        Span::styled(fmt_price(book.price), Style::default().fg(Color::Green)),
    ]));
    if authenticated {
        lines.push(Line::from(format!("Stock: {}", book.stock_quantity)));
        if let Some(publisher) = &book.publisher {
            lines.push(Line::from(format!("Publisher: {}", publisher.name)));
        }
    }
    lines.push(Line::from(""));

    if authenticated {
        lines.push(Line::from(book.description.clone()));
    } else {
        lines.push(Line::from(
            preview_description(&book.description).into_owned(),
        ));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Sample: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(SAMPLE_TEASER, Style::default().fg(Color::Gray)),
        ]));
    }

    lines.push(Line::from(""));
    if authenticated {
        let hint = if book.in_stock() {
            Span::styled("a: add to cart", Style::default().fg(Color::Cyan))
        } else {
            Span::styled("Out of stock", Style::default().fg(Color::Red))
        };
        lines.push(Line::from(hint));
    } else {
        lines.push(Line::from(Span::styled(
            "Login to purchase this book and access full details",
            Style::default().fg(Color::Gray),
        )));
    }

    lines
}

fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &StoreApp) {
    let line = if let Some(status) = &app.status {
        Line::from(Span::styled(
            status.text.clone(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        let hint = match &app.overlay {
            Overlay::Login(_) => "Tab: switch field  Enter: submit  Esc: cancel",
            Overlay::Cart => "+/-: quantity  x: remove  Enter: checkout  Esc: close",
            Overlay::None => {
                if app.session.is_authenticated() {
                    "q: quit  r: reload  j/k: select  a: add to cart  c: cart  o: logout"
                } else {
                    "q: quit  r: reload  j/k: select  l: login"
                }
            }
        };
        Line::from(Span::styled(hint, Style::default().fg(Color::Gray)))
    };
    let footer = Paragraph::new(line).block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}

fn draw_login_modal(f: &mut Frame<'_>, area: Rect, form: &LoginForm) {
    let modal = centered_rect(44, 10, area);
    f.render_widget(Clear, modal);
    let block = Block::default().borders(Borders::ALL).title(" Login ");

    let field = |label: &str, value: String, focused: bool| {
        let marker = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(marker.to_string(), style),
            Span::raw(format!("{label}: ")),
            Span::styled(value, style),
        ])
    };

    let mut lines = vec![
        field(
            "Username",
            form.username.clone(),
            form.focus == LoginFocus::Username,
        ),
        field(
            "Password",
            "*".repeat(form.password.chars().count()),
            form.focus == LoginFocus::Password,
        ),
        Line::from(""),
    ];
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    if form.submitting {
        lines.push(Line::from(Span::styled(
            "Logging in...",
            Style::default().fg(Color::Yellow),
        )));
    }

    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(widget, modal);
}

fn draw_cart_modal(f: &mut Frame<'_>, area: Rect, app: &StoreApp) {
    let modal = centered_rect(60, 16, area);
    f.render_widget(Clear, modal);
    let title = format!(" Shopping Cart ({} items) ", app.cart.item_count());
    let block = Block::default().borders(Borders::ALL).title(title);

    let mut lines: Vec<Line> = if app.cart.is_empty() {
        vec![Line::from("Your cart is empty")]
    } else {
        app.cart
            .lines()
            .iter()
            .enumerate()
            .map(|(idx, line)| cart_line(idx, line, app))
            .collect()
    };

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Total: {}", fmt_price(app.cart.total())),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if app.checkout_running {
        lines.push(Line::from(Span::styled(
            "Processing...",
            Style::default().fg(Color::Yellow),
        )));
    }

    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(widget, modal);
}

fn cart_line<'a>(idx: usize, line: &'a CartLine, app: &StoreApp) -> Line<'a> {
    let selected = idx == app.cart_selected;
    let marker = if selected { "> " } else { "  " };
    let style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(marker, style),
        Span::styled(line.book.title.as_str(), style),
        Span::raw("  "),
        Span::styled(
            format!("x{}", line.quantity),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("  "),
        Span::styled(
            fmt_price(line.line_total()),
            Style::default().fg(Color::Green),
        ),
    ])
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
