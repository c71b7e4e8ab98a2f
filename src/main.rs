use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

use vkbd::config::Config;
use vkbd::generate;
use vkbd::input::KeyboardSettings;
use vkbd::layout::{self, Language, Layout};
use vkbd::replay::Script;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VKBD_GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "vkbd")]
#[command(version = VERSION, about = "Bilingual on-screen keyboard core with touch/mouse reconciliation")]
struct Cli {
    /// Config file to use instead of ~/.config/vkbd/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Layout file overriding the configured one
    #[arg(long, global = true, value_name = "PATH")]
    layout: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a TOML event script and print the resulting text field
    Replay {
        script: PathBuf,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print random names as the name key would insert them
    Name {
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print random email addresses as the email key would insert them
    Email {
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print every character key's label for a language/shift state
    Labels {
        #[arg(long, value_enum, default_value_t = LangArg::En)]
        lang: LangArg,
        #[arg(long)]
        shift: bool,
    },
    /// Print the active layout in layout-file format
    Layout,
    /// Write the documented example config
    InitConfig,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LangArg {
    En,
    Ar,
}

impl From<LangArg> for Language {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::En => Language::En,
            LangArg::Ar => Language::Ar,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::get_config_path()?,
    };

    run(cli.command, &config_path, cli.layout.as_deref())
}

fn run(command: Command, config_path: &Path, layout_override: Option<&Path>) -> Result<()> {
    let load_config = || -> Result<Config> {
        let mut config = Config::load_from(config_path)?;
        if let Some(path) = layout_override {
            config.keyboard.layout_path = Some(path.to_path_buf());
        }
        Ok(config)
    };

    match command {
        Command::Replay { script, json } => {
            let config = load_config()?;
            let script = Script::load(&script)
                .with_context(|| format!("Failed to load script {}", script.display()))?;
            let outcome = script.replay(config.layout()?, KeyboardSettings::from(&config))?;
            log::info!("Replayed {} event(s)", script.events.len());

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", outcome.text);
                log::debug!(
                    "selection {}..{}, language {}",
                    outcome.selection_start,
                    outcome.selection_end,
                    outcome.language
                );
            }
        }
        Command::Name { count, seed } => {
            let mut rng = make_rng(seed);
            for _ in 0..count {
                println!("{}", generate::full_name(&mut rng));
            }
        }
        Command::Email { count, seed } => {
            let config = load_config()?;
            let mut rng = make_rng(seed);
            for _ in 0..count {
                println!("{}", generate::email(&mut rng, &config.generator.email_domains));
            }
        }
        Command::Labels { lang, shift } => {
            let layout = load_config()?.layout()?;
            print_labels(&layout, lang.into(), shift);
        }
        Command::Layout => {
            let layout = load_config()?.layout()?;
            print!("{}", layout.to_toml_string().context("Failed to serialize layout")?);
        }
        Command::InitConfig => {
            Config::create_default_file(config_path)?;
            println!("Wrote {}", config_path.display());
        }
    }

    Ok(())
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn print_labels(layout: &Layout, language: Language, shift_active: bool) {
    println!("# language key: {}", language.switch_label());
    for key in layout.char_keys() {
        let label = layout::resolve_label(&key.chars, language, shift_active);
        match label.secondary {
            Some(secondary) => println!("{}\t{}\t{}", key.id, label.primary, secondary),
            None => println!("{}\t{}", key.id, label.primary),
        }
    }
}
