//! Sale price and tax for a catalog price.

use grasshopper_core::Cents;
use grasshopper_core::pricing::{TAX_LABEL, sale_price, sales_tax};

/// One line per figure: catalog, sale, tax and total.
#[must_use]
pub fn breakdown(base: Cents) -> Vec<String> {
    let sale = sale_price(base);
    let tax = sales_tax(sale);
    vec![
        format!("Catalog price: {base}"),
        format!("Sale price:    {sale}"),
        format!("{TAX_LABEL}: {tax}"),
        format!("Total:         {}", sale + tax),
    ]
}
