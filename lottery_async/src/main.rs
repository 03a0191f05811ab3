use std::sync::Arc;

use lottery_sim::{init_tracing, print_summary, GameConfig, RunConfig};
use lottery_sim_async::simulation;

fn print_usage(program: &str) {
    eprintln!("Usage: {} [tasks] [minutes] [mode]", program);
    eprintln!("  tasks: optional, defaults to 1");
    eprintln!("  minutes: optional, defaults to 0.5");
    eprintln!("  mode: 'bounded' (default) or 'search'");
}

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("lottery_sim_async");

    let config = match RunConfig::from_args(args.iter().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            print_usage(program);
            std::process::exit(1);
        }
    };
    let game = Arc::new(GameConfig::default());

    println!(
        "Using {} async task(s) for {:?} in {:?} mode...",
        config.workers, config.duration, config.mode
    );
    println!(
        "Winning combination: {:?} {}",
        game.winning_main(),
        game.winning_special()
    );

    let start = std::time::Instant::now();
    let result = match simulation::run(&config, game).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let duration = start.elapsed();
    println!("Simulation completed in {:?}", duration);

    print_summary(&result);

    println!("Done!");
}
