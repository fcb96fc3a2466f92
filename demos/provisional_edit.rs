//! Provisional Edit
//!
//! This example demonstrates folding a long-running rename into history.
//!
//! Key concepts:
//! - BEGIN captures the document when a rename starts
//! - Unrelated edits keep being recorded as undo steps
//! - END carries the final title into every step since BEGIN
//! - The END itself never becomes a separate undo step
//! - Checkpoints keep pending operations across restarts
//!
//! Run with: cargo run --example provisional_edit

use retcon::builder::AmenderBuilder;
use retcon::checkpoint::Checkpoint;
use retcon::core::{Directed, Directive};
use retcon::store::Store;
use retcon::undo::{UndoAction, UndoCommand, Undoable};
use retcon::AmendedHistory;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Document {
    title: String,
    color: String,
}

const RENAME: u32 = 1;

#[derive(Debug, Clone, Default)]
enum Command {
    #[default]
    Idle,
    StartRename(String),
    Recolor(String),
    FinishRename(String),
    Undo,
}

impl Directed for Command {
    type Id = u32;

    fn directive(&self) -> Directive<u32> {
        match self {
            Self::StartRename(_) => Directive::Begin(RENAME),
            Self::FinishRename(_) => Directive::End(RENAME),
            _ => Directive::Ordinary,
        }
    }
}

impl UndoAction for Command {
    fn undo_command(&self) -> Option<UndoCommand> {
        matches!(self, Self::Undo).then_some(UndoCommand::Undo)
    }
}

fn edit(doc: &Arc<Document>, command: &Command) -> Arc<Document> {
    match command {
        Command::StartRename(title) | Command::FinishRename(title) => Arc::new(Document {
            title: title.clone(),
            color: doc.color.clone(),
        }),
        Command::Recolor(color) => Arc::new(Document {
            title: doc.title.clone(),
            color: color.clone(),
        }),
        Command::Idle | Command::Undo => Arc::clone(doc),
    }
}

fn show(label: &str, state: &AmendedHistory<Document, u32>) {
    println!("{label}");
    for doc in state.past() {
        println!("    past:    {} / {}", doc.title, doc.color);
    }
    println!("    present: {} / {}", state.present().title, state.present().color);
    println!("    pending: {:?}\n", state.pending().keys().collect::<Vec<_>>());
}

fn main() {
    println!("=== Provisional Edit ===\n");

    let initial = Document {
        title: "Untitled".to_string(),
        color: "white".to_string(),
    };

    let amender = AmenderBuilder::new(Undoable::new(initial, edit))
        .merge(|present: &Arc<Document>, entry: &Arc<Document>, _: &Command| {
            Arc::new(Document {
                title: present.title.clone(),
                color: entry.color.clone(),
            })
        })
        .build();
    let mut store = Store::new(amender);

    store.dispatch(&Command::StartRename("Draft".to_string()));
    store.dispatch(&Command::Recolor("blue".to_string()));
    store.dispatch(&Command::Recolor("green".to_string()));
    show("Before the rename is finished:", store.state());

    let checkpoint = Checkpoint::capture(store.state());
    let json = checkpoint.to_json().unwrap();
    println!("Checkpoint is {} bytes of JSON\n", json.len());

    store.dispatch(&Command::FinishRename("Quarterly Report".to_string()));
    show("After the rename is finished:", store.state());

    store.dispatch(&Command::Undo);
    show("After one undo (title stays, color reverts):", store.state());

    println!("Dispatched {} commands, {} changed the state", store.dispatch_count(), store.changes());
    println!("\n=== Example Complete ===");
}
