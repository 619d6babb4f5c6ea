use anyhow::bail;
use clap::Subcommand;
use streamlist::{EntryId, KeyValueStore, StreamList};

#[derive(Subcommand)]
pub enum ListCommand {
    /// Print the stream list in order
    List,
    /// Add a show or movie to the end of the list
    Add { text: String },
    /// Remove an entry
    Remove { id: String },
    /// Mark an entry watched, or unwatched again
    Toggle { id: String },
    /// Replace an entry's title
    Rename { id: String, text: String },
    /// Move an entry to where another one is
    Move { id: String, target_id: String },
    /// Move the entry at one position (1-based) to another
    MoveIndex { from: usize, to: usize },
}

pub fn run<S: KeyValueStore>(command: ListCommand, store: S) -> anyhow::Result<()> {
    let mut list = StreamList::load(store);

    match command {
        ListCommand::List => {}
        ListCommand::Add { text } => {
            if list.append(&text).is_none() {
                bail!("nothing to add");
            }
        }
        ListCommand::Remove { id } => {
            let id = existing(&list, id)?;
            list.delete(&id);
        }
        ListCommand::Toggle { id } => {
            let id = existing(&list, id)?;
            list.toggle_complete(&id);
        }
        ListCommand::Rename { id, text } => {
            let id = existing(&list, id)?;
            list.begin_edit(&id);
            list.update_draft(&id, text);
            list.save_edit(&id);
        }
        ListCommand::Move { id, target_id } => {
            let id = existing(&list, id)?;
            let target_id = existing(&list, target_id)?;
            list.begin_move(&id);
            list.complete_move(&target_id);
        }
        ListCommand::MoveIndex { from, to } => {
            if from == 0 || from > list.len() || to == 0 {
                bail!("positions start at 1 and must name an entry");
            }
            list.move_entry(from - 1, to - 1);
        }
    }

    print_list(&list);
    Ok(())
}

fn existing<S: KeyValueStore>(list: &StreamList<S>, id: String) -> anyhow::Result<EntryId> {
    let id = EntryId::from(id);
    if list.get(&id).is_none() {
        bail!("no entry with id {}", id);
    }
    Ok(id)
}

fn print_list<S: KeyValueStore>(list: &StreamList<S>) {
    if list.is_empty() {
        println!("No items yet in stream list");
        return;
    }
    for row in list.rows() {
        let mark = if row.entry.complete { "x" } else { " " };
        println!(
            "{:>3}. [{}] {}  ({})",
            row.position + 1,
            mark,
            row.entry.text,
            row.entry.id
        );
    }
}
