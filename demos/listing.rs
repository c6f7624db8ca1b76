//! # Listing Demo
//!
//! A headless host that drives a [`ListController`] through a scripted
//! session on the real [`Program`] loop:
//! - Rapid page turns (the second one is dropped)
//! - Two filter terms typed in quick succession (only the last applies)
//! - Selecting an item that the filter hides (it stays pinned)
//! - An inline rename that fails and is reverted
//!
//! Run with: `RUST_LOG=info,sieve_list=debug cargo run --example listing`

use sieve::list::rename::{check_name, save_name};
use sieve::list::{Item, ListConfig, ListController, Message, NamedItem, Notifier};
use sieve::{Command, Component, Model, Program};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const SPIDERS: [&str; 20] = [
    "amazon", "Books", "crawler", "daily-news", "ebay", "Forum", "github", "HackerNews",
    "imdb", "jobs", "kickstarter", "Lobsters", "medium", "news-archive", "openlibrary",
    "producthunt", "quotes", "Reddit", "spider-test", "wiki",
];

/// Sends warnings and errors to the log.
struct LogNotifier;

impl Notifier for LogNotifier {
    fn warning(&self, message: &str) {
        warn!("{message}");
    }

    fn error(&self, message: &str) {
        error!("{message}");
    }

    fn saving_started(&self) {
        info!("saving...");
    }
}

#[derive(Debug)]
enum Msg {
    List(Message<NamedItem>),
    Step(usize),
    Saved(bool),
}

struct Listing {
    list: ListController<NamedItem>,
}

impl Listing {
    fn log_window(&self, label: &str) {
        let ids: Vec<&str> = self.list.visible().iter().map(|item| item.id()).collect();
        info!(
            page = self.list.page(),
            range = %self.list.range_label(),
            has_previous = self.list.has_previous(),
            has_next = self.list.has_next(),
            filtering = self.list.is_filtering(),
            "{label}: {ids:?}"
        );
    }

    fn find(&self, id: &str) -> Option<Arc<NamedItem>> {
        self.list.sorted().iter().find(|item| item.id() == id).cloned()
    }

    fn list(&mut self, msg: Message<NamedItem>) -> Command<Msg> {
        self.list.update(msg).map(Msg::List)
    }

    fn after(delay: Duration, step: usize) -> Command<Msg> {
        Command::tick(delay, move |_| Msg::Step(step))
    }

    fn step(&mut self, step: usize) -> Command<Msg> {
        match step {
            0 => {
                self.log_window("initial");
                let first = self.list(Message::TurnPage(1));
                let dropped = self.list(Message::TurnPage(1));
                Command::batch([first, dropped, Self::after(Duration::from_millis(300), 1)])
            }
            1 => {
                self.log_window("after two quick page turns");
                let superseded = self.list(Message::SetFilter("s".into()));
                let kept = self.list(Message::SetFilter("sr".into()));
                Command::batch([superseded, kept, Self::after(Duration::from_millis(400), 2)])
            }
            2 => {
                self.log_window("while typing");
                Self::after(Duration::from_millis(500), 3)
            }
            3 => {
                self.log_window("filter applied");
                let current = self.find("github");
                self.list.on_current_item_changed(current);
                self.log_window("github selected");
                Command::message(Msg::Step(4))
            }
            4 => {
                let ids: Vec<String> = SPIDERS.iter().map(|s| s.to_string()).collect();
                check_name("github", "has space", &ids, &LogNotifier);
                check_name("github", "wiki", &ids, &LogNotifier);

                let Some(item) = self.find("github") else {
                    return Command::quit();
                };
                if check_name("github", "gitlab", &ids, &LogNotifier) {
                    item.set_name("gitlab");
                }
                Command::perform(
                    async move {
                        let save = async {
                            tokio::time::sleep(Duration::from_millis(50)).await;
                            Err::<(), _>(std::io::Error::other("backend unavailable"))
                        };
                        let saved = save_name(&item, save, &LogNotifier).await.is_ok();
                        info!(name = %item.name(), "display name after save");
                        saved
                    },
                    Msg::Saved,
                )
            }
            _ => Command::quit(),
        }
    }
}

impl Model for Listing {
    type Message = Msg;
    type Flags = Vec<Arc<NamedItem>>;

    fn init(items: Vec<Arc<NamedItem>>) -> (Self, Command<Msg>) {
        let list = ListController::with_items(ListConfig::default(), items);
        (Listing { list }, Command::message(Msg::Step(0)))
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::List(m) => self.list(m),
            Msg::Step(step) => self.step(step),
            Msg::Saved(saved) => {
                info!(saved, "rename finished");
                Command::quit()
            }
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sieve_list=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let items = SPIDERS
        .iter()
        .map(|id| Arc::new(NamedItem::new(*id)))
        .collect();

    match Program::<Listing>::new(items).run().await {
        Ok(listing) => info!(items = listing.list.len(), "done"),
        Err(err) => error!("listing demo failed: {err}"),
    }
}
