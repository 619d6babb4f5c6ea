use std::path::Path;

use anyhow::{bail, Context};
use clap::Subcommand;
use streamlist::session::Session;
use streamlist::JsonFileStore;

mod cart;
mod checkout;
mod list;

#[derive(Subcommand)]
pub enum Command {
    #[command(flatten)]
    List(list::ListCommand),
    /// Show the products that can be added to the cart
    Catalog,
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        command: cart::CartCommand,
    },
    /// Save card details for checkout (demo only)
    Checkout(checkout::CheckoutArgs),
    /// Mark the session as signed in
    Login,
    /// Mark the session as signed out
    Logout,
}

pub fn run(command: Command, store_path: &Path) -> anyhow::Result<()> {
    let mut store = JsonFileStore::open(store_path)
        .with_context(|| format!("opening store {}", store_path.display()))?;

    let mut session = Session::load(&mut store);
    match command {
        Command::Login => {
            session.sign_in();
            println!("Signed in.");
            return Ok(());
        }
        Command::Logout => {
            session.sign_out();
            println!("Signed out.");
            return Ok(());
        }
        _ if !session.is_signed_in() => bail!("not signed in, run `streamlist login` first"),
        _ => {}
    }

    match command {
        Command::List(command) => list::run(command, &mut store),
        Command::Catalog => cart::print_catalog(),
        Command::Cart { command } => cart::run(command, &mut store),
        Command::Checkout(args) => checkout::run(args, &mut store),
        Command::Login | Command::Logout => Ok(()),
    }
}
