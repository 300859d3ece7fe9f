//! Console layer - the interactive text menu driving the engine.
//!
//! Pure plumbing: prompts translate operator input into engine calls, engine
//! results and errors are rendered back as text, and the full state is saved
//! after every mutating call. Policy decisions the engine leaves to the
//! caller - warning on duplicate names, confirming deletion with stock on
//! hand, surfacing low-stock alerts - happen here.

/// Prompt/parse helpers for operator input
pub mod input;

use tracing::warn;

use crate::{
    core::{InventoryEngine, LOW_STOCK_THRESHOLD, ProductUpdate},
    entities::{TransactionKind, product, transaction},
    errors::Result,
    store::StateStore,
};

/// The interactive menu session: one engine, one store, one operator.
pub struct Console<S> {
    engine: InventoryEngine,
    store: S,
    history_limit: usize,
}

impl<S: StateStore> Console<S> {
    /// Creates a session over a loaded engine and the store to persist into.
    pub const fn new(engine: InventoryEngine, store: S, history_limit: usize) -> Self {
        Self {
            engine,
            store,
            history_limit,
        }
    }

    /// Runs the menu loop until the operator quits.
    ///
    /// # Errors
    /// Returns an error only for terminal I/O failures; engine rejections
    /// and save failures are reported to the operator and the loop
    /// continues.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            println!("\n===== STOCKROOM =====");
            println!("[1] Register new product");
            println!("[2] Inbound stock (restock)");
            println!("[3] Outbound stock (sale)");
            println!("[4] List products");
            println!("[5] Search products");
            println!("[6] Edit product");
            println!("[7] Delete product");
            println!("[8] Reports");
            println!("[9] Transaction history");
            println!("[0] Quit");

            match input::menu_choice()?.as_str() {
                "1" => self.register_product().await?,
                "2" => self.record_inbound().await?,
                "3" => self.record_outbound().await?,
                "4" => {
                    self.list_products();
                }
                "5" => self.search_products()?,
                "6" => self.edit_product().await?,
                "7" => self.delete_product().await?,
                "8" => self.show_report(),
                "9" => self.show_history(),
                "0" => {
                    self.persist().await;
                    println!("Goodbye.");
                    return Ok(());
                }
                _ => println!("Invalid option. Enter a number from 0 to 9."),
            }
        }
    }

    /// Saves the full snapshot; on failure the in-memory state stays valid,
    /// so the session keeps going with durability uncertain.
    async fn persist(&self) {
        if let Err(err) = self.store.save(self.engine.state()).await {
            warn!(error = %err, "saving state failed");
            println!("Warning: saving failed ({err}). Changes are kept in memory only.");
        }
    }

    async fn register_product(&mut self) -> Result<()> {
        println!("\n--- Register new product ---");
        let name = input::required_text("Product name")?;

        if self.engine.is_name_taken(&name)
            && !input::confirm("A product with this name already exists. Continue anyway?")?
        {
            println!("Registration cancelled.");
            return Ok(());
        }

        let quantity = input::non_negative_int("Initial quantity")?;
        let cost_price = input::non_negative_decimal("Cost price")?;
        let sale_price = input::decimal_above("Sale price", cost_price)?;

        match self
            .engine
            .register_product(&name, quantity, cost_price, sale_price)
        {
            Ok(product) => {
                println!("Product registered with id {}.", product.id);
                self.persist().await;
            }
            Err(err) => println!("Error: {err}"),
        }
        Ok(())
    }

    async fn record_inbound(&mut self) -> Result<()> {
        println!("\n--- Inbound stock ---");
        if !self.list_products() {
            return Ok(());
        }

        let id = input::positive_int("Product id")?;
        let quantity = input::positive_int("Quantity to add")?;

        match self.engine.record_inbound(id, quantity) {
            Ok(record) => {
                let stock = self
                    .engine
                    .product(id)
                    .map_or(0, |p| p.stock_quantity);
                println!(
                    "Stock updated: {} now has {} units (+{}).",
                    record.product_name, stock, record.quantity
                );
                self.persist().await;
            }
            Err(err) => println!("Error: {err}"),
        }
        Ok(())
    }

    async fn record_outbound(&mut self) -> Result<()> {
        println!("\n--- Outbound stock (sale) ---");
        if !self.list_products() {
            return Ok(());
        }

        let id = input::positive_int("Product id")?;
        let quantity = input::positive_int("Quantity to sell")?;

        match self.engine.record_outbound(id, quantity) {
            Ok(receipt) => {
                let stock = self
                    .engine
                    .product(id)
                    .map_or(0, |p| p.stock_quantity);
                println!(
                    "Sale recorded: {} x{} at {:.2}, profit {:.2}. Remaining stock: {}.",
                    receipt.transaction.product_name,
                    receipt.transaction.quantity,
                    receipt.transaction.unit_value,
                    receipt.transaction.profit,
                    stock
                );
                if receipt.low_stock {
                    println!(
                        "ALERT: low stock for '{}'!",
                        receipt.transaction.product_name
                    );
                }
                self.persist().await;
            }
            Err(err) => println!("Error: {err}"),
        }
        Ok(())
    }

    /// Prints the product list; returns false when there is nothing to show.
    fn list_products(&self) -> bool {
        println!("\n--- Products in stock ---");
        let products = self.engine.list_products();
        if products.is_empty() {
            println!("No products registered.");
            return false;
        }
        for product in &products {
            println!("{}", product_line(product));
        }
        println!("Total products: {}", products.len());
        true
    }

    fn search_products(&self) -> Result<()> {
        println!("\n--- Search products ---");
        let term = input::required_text("Name or part of the name")?;
        let results = self.engine.find_products(&term);

        if results.is_empty() {
            println!("No products found.");
        } else {
            println!("Found {} product(s):", results.len());
            for product in &results {
                println!("{}", product_line(product));
            }
        }
        Ok(())
    }

    async fn edit_product(&mut self) -> Result<()> {
        println!("\n--- Edit product ---");
        if !self.list_products() {
            return Ok(());
        }

        let id = input::positive_int("Product id to edit")?;
        let Some(current) = self.engine.product(id).cloned() else {
            println!("Product not found.");
            return Ok(());
        };

        println!("Editing: {}", current.name);
        println!("[1] Change name");
        println!("[2] Change cost price");
        println!("[3] Change sale price");
        println!("[0] Cancel");

        let update = match input::menu_choice()?.as_str() {
            "1" => ProductUpdate::rename(input::required_text("New name")?),
            "2" => ProductUpdate::cost_price(input::non_negative_decimal("New cost price")?),
            "3" => ProductUpdate::sale_price(input::decimal_above(
                "New sale price",
                current.cost_price,
            )?),
            _ => {
                println!("Edit cancelled.");
                return Ok(());
            }
        };

        match self.engine.edit_product(id, update) {
            Ok(product) => {
                println!("Product updated: {}", product_line(&product));
                self.persist().await;
            }
            Err(err) => println!("Error: {err}"),
        }
        Ok(())
    }

    async fn delete_product(&mut self) -> Result<()> {
        println!("\n--- Delete product ---");
        if !self.list_products() {
            return Ok(());
        }

        let id = input::positive_int("Product id to delete")?;
        let Some(product) = self.engine.product(id).cloned() else {
            println!("Product not found.");
            return Ok(());
        };

        if product.stock_quantity > 0 {
            println!(
                "Warning: this product still has {} units in stock.",
                product.stock_quantity
            );
        }
        if !input::confirm(&format!("Confirm deletion of '{}'?", product.name))? {
            println!("Deletion cancelled.");
            return Ok(());
        }

        match self.engine.delete_product(id) {
            Ok(removed) => {
                println!("Product '{}' deleted. Its transaction history is kept.", removed.name);
                self.persist().await;
            }
            Err(err) => println!("Error: {err}"),
        }
        Ok(())
    }

    fn show_report(&self) {
        println!("\n--- Reports ---");
        let report = self.engine.build_report();

        println!("Cumulative profit: {:.2}", report.cumulative_profit);
        println!("Registered products: {}", report.product_count);
        println!("Recorded transactions: {}", report.transaction_count);
        println!("Units in stock: {}", report.units_in_stock);
        println!("Stock cost value: {:.2}", report.stock_cost_value);

        if let Some(top) = &report.highest_margin {
            println!(
                "Highest margin: {} ({:.1}%)",
                top.name,
                top.profit_margin()
            );
        }
        if !report.low_stock.is_empty() {
            println!("Products with low stock (<= {LOW_STOCK_THRESHOLD}):");
            for product in &report.low_stock {
                println!("  - {}: {} units", product.name, product.stock_quantity);
            }
        }
        if let Some(best) = &report.best_seller {
            println!(
                "Best seller: {} ({} units)",
                best.product_name, best.units_sold
            );
        }
    }

    fn show_history(&self) {
        println!("\n--- Transaction history ---");
        let recent = self.engine.list_transactions(self.history_limit);
        if recent.is_empty() {
            println!("No transactions recorded.");
            return;
        }

        println!("Showing the last {} transaction(s):", recent.len());
        for record in &recent {
            println!("{}", transaction_line(record));
        }
        println!(
            "Total transactions: {}",
            self.engine.state().transactions.len()
        );
    }
}

fn product_line(product: &product::Model) -> String {
    format!(
        "ID: {} | {} | Stock: {} | Cost: {:.2} | Sale: {:.2} | Margin: {:.1}%",
        product.id,
        product.name,
        product.stock_quantity,
        product.cost_price,
        product.sale_price,
        product.profit_margin()
    )
}

fn transaction_line(record: &transaction::Model) -> String {
    let kind = match record.kind {
        TransactionKind::Inbound => "INBOUND",
        TransactionKind::Outbound => "SALE",
    };
    format!(
        "[{}] {} | {} | Qty: {} | Unit: {:.2} | Profit: {:.2}",
        record.timestamp.format("%Y-%m-%d %H:%M"),
        kind,
        record.product_name,
        record.quantity,
        record.unit_value,
        record.profit
    )
}
