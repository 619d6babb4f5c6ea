use clap::Args;
use streamlist::checkout::{CardForm, SavedCard};
use streamlist::KeyValueStore;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Name as printed on the card
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    number: Option<String>,
    /// Expiry as MM/YY
    #[arg(long)]
    expiry: Option<String>,
    #[arg(long, default_value = "")]
    cvv: String,
}

pub fn run<S: KeyValueStore>(args: CheckoutArgs, mut store: S) -> anyhow::Result<()> {
    let saved = SavedCard::load(&store).map(|card| card.to_form());
    if saved.is_some() {
        println!("Loaded saved card information from previous session.");
    }
    let saved = saved.unwrap_or_default();

    let form = CardForm::new(
        args.name.as_deref().unwrap_or(&saved.name_on_card),
        args.number.as_deref().unwrap_or(&saved.card_number),
        args.expiry.as_deref().unwrap_or(&saved.expiry),
        &args.cvv,
    );
    let card = form.save(&mut store)?;
    println!(
        "Card ending in {} saved locally (demo only, not for real payments).",
        card.last4
    );
    Ok(())
}
