//! CLI commands. Each one resolves through `DogResolver` and yields JSON.

use clap::Subcommand;
use kennel_domain::{DogRepository, NewDog};
use kennel_usecase::DogResolver;
use serde_json::Value;
use tracing::info;

use crate::view::DogView;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a dog
    Create {
        #[arg(long)]
        name: String,
        /// Mark the dog as a good boi
        #[arg(long)]
        good_boi: bool,
    },
    /// Create several dogs sharing the same flag; stops at the first failure
    CreateMany {
        #[arg(long = "name", required = true)]
        names: Vec<String>,
        #[arg(long)]
        good_boi: bool,
    },
    /// Fetch one dog by id
    Get {
        /// 24-character hex id
        id: String,
    },
    /// List every dog
    List,
    /// Create Rex, read him back and list the kennel
    Demo,
}

impl Command {
    pub async fn run<R: DogRepository>(self, resolver: &DogResolver<R>) -> anyhow::Result<Value> {
        let value = match self {
            Command::Create { name, good_boi } => {
                let dog = resolver.create_dog(NewDog::new(name, good_boi)).await?;
                info!(id = %dog.id(), "Dog created");
                serde_json::to_value(DogView::from(dog))?
            }
            Command::CreateMany { names, good_boi } => {
                let inputs = names
                    .into_iter()
                    .map(|name| NewDog::new(name, good_boi))
                    .collect();
                let dogs = resolver.create_dogs(inputs).await?;
                info!(count = dogs.len(), "Dogs created");
                serde_json::to_value(dogs.into_iter().map(DogView::from).collect::<Vec<_>>())?
            }
            Command::Get { id } => serde_json::to_value(DogView::from(resolver.dog(&id).await?))?,
            Command::List => {
                let dogs = resolver.dogs().await?;
                serde_json::to_value(dogs.into_iter().map(DogView::from).collect::<Vec<_>>())?
            }
            Command::Demo => {
                let rex = resolver.create_dog(NewDog::new("Rex", true)).await?;
                let found = resolver.dog(rex.id().as_str()).await?;
                let all = resolver.dogs().await?;
                anyhow::ensure!(found == rex, "read back {:?}, expected {:?}", found, rex);
                anyhow::ensure!(all.contains(&rex), "Rex missing from the dog list");

                serde_json::json!({
                    "created": DogView::from(rex),
                    "found": DogView::from(found),
                    "dogs": all.into_iter().map(DogView::from).collect::<Vec<_>>(),
                })
            }
        };
        Ok(value)
    }
}
