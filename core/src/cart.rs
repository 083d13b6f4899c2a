//! Client-side cart state machine.
//!
//! The cart is an ordered list of lines, at most one line per book id.
//! Totals and item counts are derived on demand, never stored. A line owns a
//! copy of the book taken at add time, so a later catalog refresh does not
//! reprice or re-bound quantities already in the cart.

use rust_decimal::Decimal;

use crate::catalog::Book;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub book: Book,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.book.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge-or-append add: an existing line gains one, otherwise a new line
    /// with quantity 1 is pushed. The increment saturates at the stock
    /// snapshot captured on the book, and out-of-stock books are refused.
    pub fn add(&mut self, book: &Book) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.book.id == book.id) {
            if line.quantity < line.book.stock_quantity {
                line.quantity += 1;
            }
            return;
        }
        if book.in_stock() {
            self.lines.push(CartLine {
                book: book.clone(),
                quantity: 1,
            });
        }
    }

    /// Last-write-wins quantity update, clamped to the line's stock ceiling.
    /// Zero removes the line; unknown ids are a no-op.
    pub fn set_quantity(&mut self, book_id: i64, quantity: u32) {
        if quantity == 0 {
            self.remove(book_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.book.id == book_id) {
            line.quantity = quantity.min(line.book.stock_quantity);
        }
    }

    pub fn remove(&mut self, book_id: i64) {
        self.lines.retain(|l| l.book.id != book_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price x quantity over all lines.
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities, used for the header badge.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn quantity_of(&self, book_id: i64) -> u32 {
        self.lines
            .iter()
            .find(|l| l.book.id == book_id)
            .map_or(0, |l| l.quantity)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn book(id: i64, price: &str, stock: u32) -> Book {
        Book {
            id,
            title: format!("Book {id}"),
            description: String::new(),
            price: price.parse().unwrap(),
            stock_quantity: stock,
            authors: vec![],
            publisher: None,
        }
    }

    #[test]
    fn test_add_twice_merges_into_one_line() {
        let mut cart = Cart::new();
        let b = book(1, "10", 5);
        cart.add(&b);
        cart.add(&b);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(1), 2);
    }

    #[test]
    fn test_add_saturates_at_stock() {
        let mut cart = Cart::new();
        let b = book(1, "10", 2);
        cart.add(&b);
        cart.add(&b);
        cart.add(&b);
        assert_eq!(cart.quantity_of(1), 2);
    }

    #[test]
    fn test_add_refuses_out_of_stock() {
        let mut cart = Cart::new();
        cart.add(&book(1, "10", 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_last_write_wins() {
        let mut cart = Cart::new();
        let b = book(1, "10", 9);
        cart.add(&b);
        cart.add(&b);
        cart.set_quantity(1, 5);
        assert_eq!(cart.quantity_of(1), 5);
    }

    #[test]
    fn test_set_quantity_clamps_to_stock() {
        let mut cart = Cart::new();
        cart.add(&book(1, "10", 3));
        cart.set_quantity(1, 50);
        assert_eq!(cart.quantity_of(1), 3);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&book(1, "10", 3));
        cart.set_quantity(1, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&book(1, "10", 3));
        let before = cart.clone();
        cart.set_quantity(99, 4);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&book(1, "10", 3));
        let before = cart.clone();
        cart.remove(2);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_totals_track_any_op_sequence() {
        let mut cart = Cart::new();
        let a = book(1, "10.50", 10);
        let b = book(2, "3.99", 10);
        cart.add(&a);
        cart.add(&a);
        cart.add(&b);
        cart.set_quantity(2, 4);
        cart.remove(3);
        assert_eq!(cart.item_count(), 6);
        assert_eq!(cart.total().to_string(), "36.96");

        cart.set_quantity(1, 1);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.total().to_string(), "26.46");
    }

    #[test]
    fn test_clear_empties_regardless_of_contents() {
        let mut cart = Cart::new();
        cart.add(&book(1, "10", 3));
        cart.add(&book(2, "1", 3));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_lines_preserve_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&book(2, "1", 3));
        cart.add(&book(1, "1", 3));
        let ids: Vec<i64> = cart.lines().iter().map(|l| l.book.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_catalog_refresh_does_not_touch_lines() {
        let mut cart = Cart::new();
        let mut b = book(1, "10", 5);
        cart.add(&b);
        // Server-side price/stock change arrives with the next snapshot.
        b.price = "99".parse().unwrap();
        b.stock_quantity = 1;
        assert_eq!(cart.lines()[0].book.price.to_string(), "10");
        assert_eq!(cart.lines()[0].book.stock_quantity, 5);
    }

    #[test]
    fn test_line_total() {
        let line = CartLine {
            book: book(1, "2.50", 9),
            quantity: 3,
        };
        assert_eq!(line.line_total().to_string(), "7.50");
    }
}
