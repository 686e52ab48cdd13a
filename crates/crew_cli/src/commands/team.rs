//! Team command - One discussion round across every role.

use anyhow::Result;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crew_chat::team::{follow_up, team_discussion};

#[derive(Args)]
pub struct TeamArgs {
    /// The request to put before the team
    message: String,

    /// RNG seed for a reproducible discussion
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the follow-up questions
    #[arg(long)]
    no_questions: bool,
}

pub async fn execute(args: TeamArgs) -> Result<()> {
    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("🧑‍💻 Team discussion: \"{}\"", args.message);
    println!();

    for (role, reply) in team_discussion(&args.message, &mut rng) {
        println!("── {} ──", role.display_name());
        println!("{reply}");
        if !args.no_questions {
            println!("   ❓ {}", follow_up(role, &mut rng));
        }
        println!();
    }

    Ok(())
}
