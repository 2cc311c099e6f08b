use refrain::{Generator, LilypondRenderer, TimidityPlayer};
use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: refrain <input> [--only-print|-p]");
        process::exit(1);
    }

    // Parse flags
    let mut only_print = false;
    let mut input_path: Option<&String> = None;
    for arg in &args[1..] {
        if arg == "--only-print" || arg == "-p" {
            only_print = true;
        } else {
            input_path = Some(arg);
        }
    }
    let input_path = match input_path {
        Some(path) => path,
        None => {
            eprintln!("Usage: refrain <input> [--only-print|-p]");
            process::exit(1);
        }
    };

    // Read input file
    let source = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    let mut generator = Generator::new(LilypondRenderer, TimidityPlayer);
    if let Err(e) = generator.feed(&source) {
        eprintln!("Parameter error: {}", e);
        process::exit(1);
    }

    if only_print {
        match generator.formatted() {
            Ok(score) => print!("{}", score),
            Err(e) => {
                eprintln!("Generation error: {}", e);
                process::exit(1);
            }
        }
    } else if let Err(e) = generator.play() {
        eprintln!("Playback error: {}", e);
        process::exit(1);
    }
}
