use anyhow::{bail, Context};
use clap::Subcommand;
use streamlist::cart::{self, Cart};
use streamlist::KeyValueStore;

#[derive(Subcommand)]
pub enum CartCommand {
    /// Print the cart with totals
    Show,
    /// Add a catalog product
    Add { product_id: u32 },
    /// Raise an accessory's quantity
    Inc { product_id: u32 },
    /// Lower a quantity, removing the line at zero
    Dec { product_id: u32 },
    /// Remove a line
    Remove { product_id: u32 },
}

pub fn print_catalog() -> anyhow::Result<()> {
    let products = cart::catalog().context("reading catalog")?;
    for product in products {
        let kind = if product.is_subscription() { "Plan" } else { "Accessory" };
        println!(
            "{:>3}  {:<28} {:<10} ${:.2}",
            product.id, product.service, kind, product.price
        );
        println!("     {}", product.service_info);
    }
    Ok(())
}

pub fn run<S: KeyValueStore>(command: CartCommand, store: S) -> anyhow::Result<()> {
    let mut cart = Cart::load(store);

    let changed = match command {
        CartCommand::Show => true,
        CartCommand::Add { product_id } => {
            let products = cart::catalog().context("reading catalog")?;
            let Some(product) = products.iter().find(|p| p.id == product_id) else {
                bail!("no product with id {}", product_id);
            };
            cart.add(product)?;
            true
        }
        CartCommand::Inc { product_id } => cart.increment(product_id),
        CartCommand::Dec { product_id } => cart.decrement(product_id),
        CartCommand::Remove { product_id } => cart.remove(product_id),
    };
    if !changed {
        log::info!("cart unchanged");
    }

    print_cart(&cart);
    Ok(())
}

fn print_cart<S: KeyValueStore>(cart: &Cart<S>) {
    if cart.is_empty() {
        println!("Your cart is empty. Run `streamlist catalog` to get started.");
        return;
    }
    for item in cart.items() {
        let kind = if item.is_subscription { "Subscription" } else { "Accessory" };
        println!(
            "{:>3}  {:<28} {:<12} ${:>7.2} x {:<3} ${:>8.2}",
            item.id(),
            item.product.service,
            kind,
            item.product.price,
            item.quantity,
            item.subtotal()
        );
    }
    println!(
        "Total: ${:.2} ({} item{})",
        cart.total_price(),
        cart.total_quantity(),
        if cart.total_quantity() == 1 { "" } else { "s" }
    );
}
