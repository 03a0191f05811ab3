use std::env;
use std::sync::Arc;
use std::time::Instant;

use lottery_sim::{init_tracing, print_summary, simulation, GameConfig, RunConfig};

fn print_usage(program: &str) {
    eprintln!("Usage: {} [workers] [minutes] [mode]", program);
    eprintln!("  workers: optional, defaults to 1");
    eprintln!("  minutes: optional, defaults to 0.5");
    eprintln!("  mode: 'bounded' (default) or 'search'");
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("lottery_sim");

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
        "Using {} worker thread(s) for {:?} in {:?} mode",
        config.workers, config.duration, config.mode
    );
    println!(
        "Winning combination: {:?} {}",
        game.winning_main(),
        game.winning_special()
    );

    let start = Instant::now();
    let result = match simulation::run(&config, game) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    println!("Run time: {}ms", start.elapsed().as_millis());

    print_summary(&result);
}
