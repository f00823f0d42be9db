// XO CLI — terminal front-end for the XO AI engine.
//
// Setup (logger, config, engine state) runs once; after that every line
// the user types is one call to `chat_send`.

mod repl;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use log::debug;
use tokio::io::{AsyncBufReadExt, BufReader};

use xo_ai::atoms::constants::DEFAULT_HISTORY_WINDOW;
use xo_ai::engine::render;
use xo_ai::{chat_send, Conversation, EngineConfig, EngineResult, EngineState, Mode, TurnReply};

use repl::{ReplCommand, HELP};

#[derive(Parser, Debug)]
#[command(name = "xo", version, about = "XO AI — Nexo Assistant in your terminal")]
struct Cli {
    /// Config file (default: ~/.xo/config.toml)
    #[arg(long, global = true, env = "XO_CONFIG")]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat (default)
    Chat(ChatArgs),
    /// Ask one question and print the answer
    Ask {
        #[command(flatten)]
        args: ChatArgs,
        /// The question
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },
    /// List the available modes
    Modes,
    /// List the model labels and the ids they resolve to
    Models,
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct ChatArgs {
    /// Mode: study, ideas, planner or chat
    #[arg(long)]
    mode: Option<String>,
    /// Model label
    #[arg(long)]
    model: Option<String>,
    /// Stream the reply as it is generated
    #[arg(long)]
    stream: bool,
    /// Send only the last N messages of history
    #[arg(long, value_name = "N", conflicts_with = "truncate")]
    window: Option<usize>,
    /// Send only the last 6 messages of history
    #[arg(long)]
    truncate: bool,
    /// Show message times
    #[arg(long)]
    timestamps: bool,
    /// Show diagnostics under failure notices
    #[arg(long)]
    debug: bool,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> EngineResult<EngineConfig> {
    match path {
        Some(p) => Ok(EngineConfig::load_from(p)?.with_env()),
        None => EngineConfig::load(),
    }
}

/// Flags win over the config file.
fn apply_overrides(mut cfg: EngineConfig, args: &ChatArgs) -> EngineResult<EngineConfig> {
    if let Some(mode) = &args.mode {
        cfg.mode = mode.parse::<Mode>()?;
    }
    if let Some(model) = &args.model {
        cfg.model = model.trim().to_string();
    }
    if args.stream {
        cfg.stream = true;
    }
    if let Some(n) = args.window {
        cfg.history_window = Some(n);
    } else if args.truncate {
        cfg.history_window = Some(DEFAULT_HISTORY_WINDOW);
    }
    if args.timestamps {
        cfg.show_timestamps = true;
    }
    Ok(cfg)
}

/// Print a menu with the configured selection marked.
fn print_listing(path: Option<&PathBuf>, render: impl FnOnce(&EngineConfig) -> String) -> ExitCode {
    match load_config(path) {
        Ok(cfg) => {
            print!("{}", render(&cfg));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn new_conversation(cfg: &EngineConfig) -> Conversation {
    let conv = Conversation::new(cfg.mode, cfg.model.clone());
    match &cfg.greeting {
        Some(g) => conv.with_greeting(g.clone()),
        None => conv,
    }
}

fn print_fragment(text: &str) {
    print!("{}", text);
    let _ = io::stdout().flush();
}

/// Print the outcome of one turn. Returns false when no answer arrived.
fn report(reply: &TurnReply, debug: bool) -> bool {
    match reply {
        TurnReply::Answer { streamed: true, .. } => {
            println!();
            true
        }
        TurnReply::Answer { text, .. } => {
            println!("XO AI: {}", text);
            true
        }
        TurnReply::ConfigError(msg) => {
            eprintln!("error: {}", msg);
            false
        }
        TurnReply::Busy { notice, diagnostic } => {
            eprintln!("{}", notice);
            if debug {
                eprintln!("Debug info: {}", diagnostic);
            }
            false
        }
        TurnReply::Skipped => true,
    }
}

async fn run_turn(state: &EngineState, conv: &Conversation, input: &str, debug: bool) -> (Conversation, bool) {
    if state.config.stream {
        print!("XO AI: ");
        let _ = io::stdout().flush();
    }
    let outcome = chat_send(state, conv, input, &mut print_fragment).await;
    if state.config.stream && !matches!(outcome.reply, TurnReply::Answer { .. }) {
        println!();
    }
    let ok = report(&outcome.reply, debug);
    (outcome.conversation, ok)
}

async fn run_ask(state: EngineState, prompt: &str, debug: bool) -> ExitCode {
    let conv = new_conversation(&state.config);
    let (_, ok) = run_turn(&state, &conv, prompt, debug).await;
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run_chat(state: EngineState, debug: bool) -> ExitCode {
    let mut conv = new_conversation(&state.config);
    println!("XO AI — Nexo Assistant");
    println!(
        "Mode: {} · Model: {} · powered by {}",
        conv.mode(),
        conv.model(),
        state.config.provider.name()
    );
    println!("Type /help for commands.");
    for msg in conv.messages() {
        println!("{}", render::render_message(msg, state.config.show_timestamps));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\nYou: ");
        let _ = io::stdout().flush();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("error: cannot read input: {}", e);
                return ExitCode::FAILURE;
            }
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::About => print!("{}", render::render_identity()),
            ReplCommand::Modes => print!("{}", render::render_modes(conv.mode())),
            ReplCommand::Models => print!("{}", render::render_models(conv.model())),
            ReplCommand::History => {
                print!("{}", render::render_transcript(&conv, state.config.show_timestamps))
            }
            ReplCommand::Reset => {
                conv.reset();
                println!("Started a fresh conversation.");
            }
            ReplCommand::Mode(name) => match name.parse::<Mode>() {
                Ok(mode) => {
                    conv.set_mode(mode);
                    println!("Mode: {}", mode);
                }
                Err(e) => eprintln!("error: {}", e),
            },
            ReplCommand::Model(label) => {
                println!("{}", render::render_model_choice(&label));
                conv.set_model(label);
            }
            ReplCommand::Unknown(name) => eprintln!("Unknown command /{}. Type /help.", name),
            ReplCommand::Say(text) => {
                debug!("[cli] turn {} in {}", conv.len() / 2 + 1, conv.id());
                let (next, _) = run_turn(&state, &conv, &text, debug).await;
                conv = next;
            }
        }
    }
    println!("Bye.");
    ExitCode::SUCCESS
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let (args, prompt) = match cli.command {
        Some(Command::Modes) => {
            return print_listing(cli.config.as_ref(), |cfg| render::render_modes(cfg.mode));
        }
        Some(Command::Models) => {
            return print_listing(cli.config.as_ref(), |cfg| render::render_models(&cfg.model));
        }
        Some(Command::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "xo", &mut io::stdout());
            return ExitCode::SUCCESS;
        }
        Some(Command::Ask { args, prompt }) => (args, Some(prompt.join(" "))),
        Some(Command::Chat(args)) => (args, None),
        None => (ChatArgs::default(), None),
    };

    let config = match load_config(cli.config.as_ref()).and_then(|c| apply_overrides(c, &args)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let state = EngineState::new(config);

    match prompt {
        Some(p) => run_ask(state, &p, args.debug).await,
        None => run_chat(state, args.debug).await,
    }
}
