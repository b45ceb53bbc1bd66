//! Entity-DTO mappers.

use crate::dto::{PaginationResponse, TransactionResponse};
use kasir_core::{Pagination, Transaction};

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id.into_inner(),
            name: transaction.customer_name,
            menu: transaction.menu,
            price: transaction.price,
            qty: transaction.qty,
            payment: transaction.payment,
            total: transaction.total,
        }
    }
}

/// Assembles a page of transactions into its response form.
///
/// An empty result set yields [`PaginationResponse::empty`].
impl From<Pagination<Transaction>> for PaginationResponse<TransactionResponse> {
    fn from(page: Pagination<Transaction>) -> Self {
        if page.total_rows == 0 {
            return Self::empty();
        }

        let total_pages = page.total_pages();
        Self {
            total_rows: page.total_rows,
            limit: page.limit,
            current_page: page.page,
            total_pages,
            rows: page.rows.into_iter().map(TransactionResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kasir_core::Customer;

    fn sale(customer: &Customer, menu: &str, price: i64, qty: i64) -> Transaction {
        Transaction::new(customer, menu, price, qty, "Cash").unwrap()
    }

    #[test]
    fn test_transaction_projection() {
        let john = Customer::new("John Doe");
        let tx = sale(&john, "Pizza", 10, 2);
        let id = tx.id.into_inner();

        let dto = TransactionResponse::from(tx);
        assert_eq!(dto.id, id);
        assert_eq!(dto.name, "John Doe");
        assert_eq!(dto.menu, "Pizza");
        assert_eq!((dto.price, dto.qty, dto.total), (10, 2, 20));
        assert_eq!(dto.payment, "Cash");
    }

    #[test]
    fn test_page_counters_and_row_order() {
        let ann = Customer::new("Ann");
        let rows = vec![sale(&ann, "Soup", 5, 1), sale(&ann, "Tea", 2, 3)];
        let menus: Vec<String> = rows.iter().map(|t| t.menu.clone()).collect();

        let dto = PaginationResponse::from(Pagination::new(7, 2, 3, rows));
        assert_eq!(dto.total_rows, 7);
        assert_eq!(dto.limit, 2);
        assert_eq!(dto.current_page, 3);
        assert_eq!(dto.total_pages, 4);
        assert_eq!(dto.rows.iter().map(|r| r.menu.clone()).collect::<Vec<_>>(), menus);
    }

    #[test]
    fn test_exact_multiple_does_not_round_up() {
        let dto = PaginationResponse::from(Pagination::<Transaction>::new(20, 10, 1, Vec::new()));
        assert_eq!(dto.total_pages, 2);
    }

    #[test]
    fn test_empty_result_is_all_zeros() {
        let dto = PaginationResponse::from(Pagination::<Transaction>::new(0, 10, 4, Vec::new()));
        assert_eq!(dto, PaginationResponse::empty());
    }
}
