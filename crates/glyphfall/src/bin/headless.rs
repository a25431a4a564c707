//! # GLYPHFALL Headless Runner
//!
//! Builds a scene, plays it to the end without a renderer and prints what a
//! renderer would have received.
//!
//! Usage: glyphfall_headless [TEXT] [--seed N] [--config FILE] [--max-ticks N]
//!
//! A literal `\n` in TEXT starts a new line.

use std::process::ExitCode;

use glyphfall::core::{PhaseKind, Scene, SceneConfig, SceneSeed};
use glyphfall::shared::constants::DEFAULT_TEXT;
use glyphfall::{NullSink, Player, PlayerConfig};

struct Args {
    text: String,
    seed: SceneSeed,
    config_path: Option<String>,
    max_ticks: u64,
    dump_config: bool,
    help: bool,
}

fn parse_args(argv: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut args = Args {
        text: DEFAULT_TEXT.to_string(),
        seed: SceneSeed::default(),
        config_path: None,
        max_ticks: PlayerConfig::default().max_ticks,
        dump_config: false,
        help: false,
    };

    let mut iter = argv.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|e| format!("bad seed {value:?}: {e}"))?;
                args.seed = SceneSeed::new(seed);
            }
            "--config" => {
                args.config_path = Some(iter.next().ok_or("--config needs a path")?);
            }
            "--max-ticks" => {
                let value = iter.next().ok_or("--max-ticks needs a value")?;
                args.max_ticks = value
                    .parse::<u64>()
                    .map_err(|e| format!("bad tick limit {value:?}: {e}"))?;
            }
            "--dump-config" => args.dump_config = true,
            "--help" | "-h" => args.help = true,
            text => args.text = text.replace("\\n", "\n"),
        }
    }
    Ok(args)
}

fn usage() {
    println!("Usage: glyphfall_headless [TEXT] [--seed N] [--config FILE] [--max-ticks N]");
    println!();
    println!("Options:");
    println!("  --seed N         Seed for particle motion");
    println!("  --config FILE    TOML scene configuration");
    println!("  --max-ticks N    Stop after N ticks");
    println!("  --dump-config    Print the effective configuration and exit");
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {message}");
            usage();
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        usage();
        return ExitCode::SUCCESS;
    }

    let config = match &args.config_path {
        Some(path) => match SceneConfig::from_toml_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => SceneConfig::default(),
    };

    if args.dump_config {
        return match config.to_toml_string() {
            Ok(text) => {
                print!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let scene = match Scene::new(&args.text, &config, args.seed) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Text:       {:?}", args.text);
    println!("Seed:       {:#x}", args.seed.value());
    println!("Particles:  {}", scene.len());
    println!();

    let mut player = Player::new(scene, PlayerConfig { max_ticks: args.max_ticks });
    let stats = player.run(&mut NullSink);

    println!("Ticks:      {}", stats.ticks);
    println!("Committed:  {}", stats.committed_frames);
    println!("Simulated:  {:.3}s", stats.simulated_seconds);
    for phase in PhaseKind::ALL {
        println!("  {:<10} {:>5} ticks", phase.name(), stats.ticks_in(phase));
    }
    println!();

    if stats.finished {
        println!("✅ Animation finished");
        ExitCode::SUCCESS
    } else {
        println!("⚠️ Tick limit reached before the animation finished");
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, String> {
        parse_args(argv.iter().map(|a| (*a).to_string()))
    }

    #[test]
    fn test_help_is_not_an_error() {
        let args = parse(&["--help"]).unwrap();
        assert!(args.help);
        assert!(parse(&["-h", "--seed", "3"]).unwrap().help);
    }

    #[test]
    fn test_options() {
        let args = parse(&["Hi\\nthere", "--seed", "42", "--max-ticks", "7"]).unwrap();
        assert_eq!(args.text, "Hi\nthere");
        assert_eq!(args.seed, SceneSeed::new(42));
        assert_eq!(args.max_ticks, 7);
        assert!(!args.help);
        assert!(!args.dump_config);
    }

    #[test]
    fn test_bad_values() {
        assert!(parse(&["--seed"]).is_err());
        assert!(parse(&["--seed", "many"]).is_err());
        assert!(parse(&["--max-ticks", "-1"]).is_err());
    }
}
